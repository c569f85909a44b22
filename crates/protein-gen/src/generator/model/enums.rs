use indexmap::IndexMap;

use crate::generator::metrics::GenerationWarning;

/// Distinct enum domains keyed by enum name, in first-seen order.
///
/// When the same enum name is declared with different literal sets, the domains are
/// merged (union, first-seen literal order) and a warning is produced once per name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumRegistry {
  domains: IndexMap<String, Vec<String>>,
  merged: Vec<String>,
}

impl EnumRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&mut self, name: &str, values: &[String]) -> Option<GenerationWarning> {
    let Some(existing) = self.domains.get_mut(name) else {
      self.domains.insert(name.to_string(), dedup(values));
      return None;
    };

    let differs = existing.iter().any(|value| !values.contains(value));
    let mut extended = false;
    for value in values {
      if !existing.contains(value) {
        existing.push(value.clone());
        extended = true;
      }
    }

    if (differs || extended) && !self.merged.iter().any(|merged| merged == name) {
      self.merged.push(name.to_string());
      return Some(GenerationWarning::EnumDomainMerged {
        enum_name: name.to_string(),
      });
    }
    None
  }

  #[cfg(test)]
  pub fn get(&self, name: &str) -> Option<&[String]> {
    self.domains.get(name).map(Vec::as_slice)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self
      .domains
      .iter()
      .map(|(name, values)| (name.as_str(), values.as_slice()))
  }

  pub fn len(&self) -> usize {
    self.domains.len()
  }
}

fn dedup(values: &[String]) -> Vec<String> {
  let mut out: Vec<String> = Vec::with_capacity(values.len());
  for value in values {
    if !out.contains(value) {
      out.push(value.clone());
    }
  }
  out
}
