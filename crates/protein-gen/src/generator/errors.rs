use thiserror::Error;

/// Fatal resolution failures. A broken reference graph aborts the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("definition '{name}' referenced by '{referenced_by}' is missing from the document")]
  MissingDefinition { name: String, referenced_by: String },
  #[error("root definition '{name}' is missing from the document")]
  MissingRoot { name: String },
}
