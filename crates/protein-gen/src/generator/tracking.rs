use std::{error::Error, sync::Mutex};

use crate::generator::metrics::GenerationWarning;

/// Sink for recoverable failures that should be reported but must not stop generation.
pub trait ErrorTracking: Send + Sync {
  fn log_exception(&self, error: &dyn Error);
}

/// Collects tracked failures so they can be surfaced as generation warnings.
#[derive(Debug, Default)]
pub struct TrackedErrors {
  messages: Mutex<Vec<String>>,
}

impl TrackedErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn messages(&self) -> Vec<String> {
    self.messages.lock().map(|guard| guard.clone()).unwrap_or_default()
  }

  pub fn into_warnings(self) -> Vec<GenerationWarning> {
    self
      .messages
      .into_inner()
      .unwrap_or_default()
      .into_iter()
      .map(|message| GenerationWarning::TrackedError { message })
      .collect()
  }
}

impl ErrorTracking for TrackedErrors {
  fn log_exception(&self, error: &dyn Error) {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
      message.push_str(": ");
      message.push_str(&cause.to_string());
      source = cause.source();
    }

    if let Ok(mut messages) = self.messages.lock() {
      messages.push(message);
    }
  }
}
