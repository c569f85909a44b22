use std::{ffi::OsStr, fmt, path::PathBuf, str::FromStr};

/// Where the input document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
  File(PathBuf),
  Url(String),
}

impl DocumentSource {
  pub fn format_hint(&self) -> Option<DocumentFormat> {
    let extension = match self {
      Self::File(path) => path.extension().and_then(OsStr::to_str).map(str::to_string),
      Self::Url(url) => {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        path
          .rsplit_once('/')
          .map_or(path, |(_, last)| last)
          .rsplit_once('.')
          .map(|(_, extension)| extension.to_string())
      }
    };
    extension.and_then(|extension| DocumentFormat::from_extension(&extension.to_ascii_lowercase()))
  }
}

impl FromStr for DocumentSource {
  type Err = std::convert::Infallible;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    if input.starts_with("http://") || input.starts_with("https://") {
      Ok(Self::Url(input.to_string()))
    } else {
      Ok(Self::File(PathBuf::from(input)))
    }
  }
}

impl fmt::Display for DocumentSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::File(path) => write!(f, "{}", path.display()),
      Self::Url(url) => f.write_str(url),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
  Json,
  Yaml,
}

impl DocumentFormat {
  #[must_use]
  pub fn from_extension(extension: &str) -> Option<Self> {
    match extension {
      "json" => Some(Self::Json),
      "yaml" | "yml" => Some(Self::Yaml),
      _ => None,
    }
  }
}
