use super::TypeName;

/// A fragment of Kotlin code with `%T` placeholders for type references.
///
/// Placeholders are substituted in order at render time, once imports are known, so a
/// type is written by its simple name when imported and fully qualified otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeBlock {
  pub format: String,
  pub types: Vec<TypeName>,
}

impl CodeBlock {
  pub const TYPE_PLACEHOLDER: &'static str = "%T";

  pub fn of(code: impl Into<String>) -> Self {
    Self {
      format: code.into(),
      types: vec![],
    }
  }

  pub fn with_types(format: impl Into<String>, types: Vec<TypeName>) -> Self {
    Self {
      format: format.into(),
      types,
    }
  }
}

impl From<&str> for CodeBlock {
  fn from(code: &str) -> Self {
    Self::of(code)
  }
}

impl From<String> for CodeBlock {
  fn from(code: String) -> Self {
    Self::of(code)
  }
}
