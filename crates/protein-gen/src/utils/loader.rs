use std::path::Path;

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use indexmap::IndexMap;
use oas3::OpenApiV3Spec;
use serde_json::Value;
use thiserror::Error;

use super::source::{DocumentFormat, DocumentSource};
use crate::generator::{
  schema::{Dialect, RawDocument, RawSchema},
  tracking::ErrorTracking,
};

#[derive(Debug, Error)]
pub enum LoadError {
  #[error("document source {location} is unavailable: {reason}")]
  SourceUnavailable { location: String, reason: String },
  #[error("document {location} is invalid: {reason}")]
  DocumentInvalid { location: String, reason: String },
}

impl LoadError {
  fn unavailable(location: impl ToString, reason: impl ToString) -> Self {
    Self::SourceUnavailable {
      location: location.to_string(),
      reason: reason.to_string(),
    }
  }

  fn invalid(location: impl ToString, reason: impl ToString) -> Self {
    Self::DocumentInvalid {
      location: location.to_string(),
      reason: reason.to_string(),
    }
  }
}

/// Loads the input document. Load failures are reported to the tracker and replaced by
/// an empty document, so downstream stages run and produce empty output.
pub struct DocumentLoader<'a> {
  tracker: &'a dyn ErrorTracking,
}

impl<'a> DocumentLoader<'a> {
  pub fn new(tracker: &'a dyn ErrorTracking) -> Self {
    Self { tracker }
  }

  pub async fn load(&self, source: &DocumentSource) -> RawDocument {
    match Self::try_load(source).await {
      Ok(document) => document,
      Err(error) => {
        self.tracker.log_exception(&error);
        RawDocument::empty()
      }
    }
  }

  pub async fn try_load(source: &DocumentSource) -> Result<RawDocument, LoadError> {
    let bytes = match source {
      DocumentSource::File(path) => read_file(path).await?,
      DocumentSource::Url(url) => fetch(url).await?,
    };
    parse_document(&bytes, source.format_hint(), &source.to_string())
  }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
  let location = path.display();
  let metadata = tokio::fs::metadata(path).await.map_err(|error| match error.kind() {
    std::io::ErrorKind::NotFound => LoadError::unavailable(&location, "file does not exist"),
    _ => LoadError::unavailable(&location, error),
  })?;

  if metadata.len() == 0 {
    return Err(LoadError::invalid(&location, "file is empty"));
  }

  let file = AsyncMmapFile::open(path)
    .await
    .map_err(|error| LoadError::unavailable(&location, error))?;
  Ok(file.as_slice().to_vec())
}

async fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
  let response = reqwest::get(url).await.map_err(|error| LoadError::unavailable(url, error))?;

  let status = response.status();
  if !status.is_success() {
    return Err(LoadError::unavailable(url, format!("HTTP {}", status.as_u16())));
  }

  let body = response.bytes().await.map_err(|error| LoadError::unavailable(url, error))?;
  Ok(body.to_vec())
}

/// Parses raw bytes as JSON or YAML and extracts the schema definitions.
///
/// Without a format hint JSON is tried first, then YAML.
pub fn parse_document(bytes: &[u8], hint: Option<DocumentFormat>, location: &str) -> Result<RawDocument, LoadError> {
  let value: Value = match hint {
    Some(DocumentFormat::Json) => serde_json::from_slice(bytes).map_err(|error| LoadError::invalid(location, error))?,
    Some(DocumentFormat::Yaml) => serde_yaml::from_slice(bytes).map_err(|error| LoadError::invalid(location, error))?,
    None => match serde_json::from_slice(bytes) {
      Ok(value) => value,
      Err(_) => serde_yaml::from_slice(bytes).map_err(|error| LoadError::invalid(location, error))?,
    },
  };
  document_from_value(value, location)
}

pub fn document_from_value(value: Value, location: &str) -> Result<RawDocument, LoadError> {
  let info_field = |field: &str| {
    value
      .pointer(&format!("/info/{field}"))
      .and_then(Value::as_str)
      .map(str::to_string)
  };

  let (dialect, definitions_pointer) = if value.get("openapi").is_some() {
    serde_json::from_value::<OpenApiV3Spec>(value.clone()).map_err(|error| LoadError::invalid(location, error))?;
    (Dialect::OpenApi3, "/components/schemas")
  } else if value.get("swagger").is_some() {
    (Dialect::Swagger2, "/definitions")
  } else {
    return Err(LoadError::invalid(
      location,
      "neither a 'swagger' nor an 'openapi' version field is present",
    ));
  };

  let definitions = match value.pointer(definitions_pointer) {
    Some(definitions) => serde_json::from_value::<IndexMap<String, RawSchema>>(definitions.clone())
      .map_err(|error| LoadError::invalid(location, error))?,
    None => IndexMap::new(),
  };

  Ok(RawDocument {
    title: info_field("title"),
    version: info_field("version"),
    dialect,
    definitions,
  })
}
