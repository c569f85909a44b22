pub(crate) mod dao;
pub(crate) mod database;
pub(crate) mod domain;
pub(crate) mod entities;
pub(crate) mod enums;
pub(crate) mod map_helpers;
pub(crate) mod mappers;
pub(crate) mod sync_dto;
pub(crate) mod triggers;
mod types;

use std::fmt;

pub(crate) use types::{dao_name, dto_name, dto_type, mapper_name, persisted_type};

use crate::generator::{
  ast::KotlinFile,
  codegen::render_file,
  config::{GeneratorConfig, Packages},
  traversal::ModelPlan,
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter, clap::ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ArtifactKind {
  SyncDto,
  Entity,
  Dao,
  Database,
  Mapper,
  MapHelper,
  Enum,
  UndoTrigger,
  Domain,
}

impl ArtifactKind {
  /// Kinds left out unless explicitly selected.
  pub fn is_opt_in(self) -> bool {
    matches!(self, Self::Domain)
  }
}

/// Settings shared by every generator for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactContext {
  pub packages: Packages,
  pub database_name: String,
  pub database_version: u32,
}

impl ArtifactContext {
  pub fn from_config(config: &GeneratorConfig) -> Self {
    Self {
      packages: config.packages(),
      database_name: config.database_name.clone(),
      database_version: config.database_version,
    }
  }
}

/// One generated Kotlin type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactUnit {
  pub kind: ArtifactKind,
  pub file: KotlinFile,
}

impl ArtifactUnit {
  pub fn new(kind: ArtifactKind, file: KotlinFile) -> Self {
    Self { kind, file }
  }

  pub fn name(&self) -> &str {
    self.file.name()
  }

  pub fn package(&self) -> &str {
    &self.file.package
  }

  pub fn source(&self) -> String {
    render_file(&self.file)
  }
}

/// Undo-log trigger statements in execution order, plus their teardown commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerScript {
  pub triggers: Vec<String>,
  pub drop_commands: Vec<String>,
}

/// Everything produced by one generation run, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactBundle {
  units: Vec<ArtifactUnit>,
  triggers: Option<TriggerScript>,
}

impl ArtifactBundle {
  pub fn push(&mut self, unit: ArtifactUnit) {
    self.units.push(unit);
  }

  pub fn extend(&mut self, units: impl IntoIterator<Item = ArtifactUnit>) {
    self.units.extend(units);
  }

  pub fn set_triggers(&mut self, script: TriggerScript) {
    self.triggers = Some(script);
  }

  pub fn units(&self) -> &[ArtifactUnit] {
    &self.units
  }

  #[cfg(test)]
  pub fn units_of(&self, kind: ArtifactKind) -> impl Iterator<Item = &ArtifactUnit> {
    self.units.iter().filter(move |unit| unit.kind == kind)
  }

  #[cfg(test)]
  pub fn unit(&self, kind: ArtifactKind, name: &str) -> Option<&ArtifactUnit> {
    self.units_of(kind).find(|unit| unit.name() == name)
  }

  pub fn triggers(&self) -> Option<&TriggerScript> {
    self.triggers.as_ref()
  }
}

impl fmt::Display for ArtifactBundle {
  /// Concatenates all units, each preceded by a path comment.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (index, unit) in self.units.iter().enumerate() {
      if index > 0 {
        writeln!(f)?;
      }
      writeln!(f, "// ---- {}/{}.kt", unit.package().replace('.', "/"), unit.name())?;
      write!(f, "{}", unit.source())?;
    }
    Ok(())
  }
}

/// A generator reads the shared plan and contributes its own artifacts to the bundle.
pub(crate) trait ArtifactGenerator {
  fn kind(&self) -> ArtifactKind;

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle);
}

#[cfg(test)]
mod tests;
