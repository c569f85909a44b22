use std::{collections::BTreeSet, path::PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use itertools::Itertools;

use crate::{
  generator::{
    config::GeneratorConfig,
    metrics::GenerationStats,
    orchestrator::Orchestrator,
    schema::RawDocument,
    sink::FileSink,
    tracking::TrackedErrors,
  },
  ui::{Colors, GenerateCommand},
  utils::{DocumentLoader, DocumentSource},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub source: DocumentSource,
  pub output: Option<PathBuf>,
  pub to_stdout: bool,
  pub verbose: bool,
  pub quiet: bool,
  pub generator: GeneratorConfig,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      package,
      output,
      root,
      enum_package,
      database_name,
      database_version,
      only,
      stdout,
      verbose,
      quiet,
    } = command;

    if output.is_none() && !stdout {
      anyhow::bail!("Output directory (-o) is required unless --stdout is given");
    }
    if package.trim().is_empty() {
      anyhow::bail!("Package name (-p) must not be empty");
    }

    let generator = GeneratorConfig::builder()
      .package_name(package)
      .root_entity(root)
      .maybe_enum_package(enum_package)
      .database_name(database_name)
      .database_version(database_version)
      .artifacts(only.unwrap_or_default().into_iter().collect::<BTreeSet<_>>())
      .build();

    Ok(Self {
      source: input,
      output,
      to_stdout: stdout,
      verbose,
      quiet,
      generator,
    })
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  /// Progress goes to stderr when stdout carries the generated sources.
  fn emit(&self, line: &str) {
    if self.config.to_stdout {
      eprintln!("{line}");
    } else {
      println!("{line}");
    }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      self.emit(&format!("{} {message}", format_timestamp().with(self.colors.timestamp())));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      self.emit(&format!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      ));
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading schema document from: {}", self.config.source)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_document(&self, document: &RawDocument) {
    if !self.config.verbose {
      return;
    }
    let title = document.title.as_deref().unwrap_or("untitled");
    let version = document.version.as_deref().unwrap_or("-");
    self.info(&format!(
      "Parsed {} document '{title}' ({version}) with {} definitions",
      document.dialect,
      document.definitions.len()
    ));
  }

  fn log_generating(&self) {
    let kinds = self
      .config
      .generator
      .selected_artifacts()
      .iter()
      .join(", ");
    self.info(
      &format!("Generating Kotlin data layer ({kinds})...")
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Definitions in document:", stats.definitions_total.to_string());
    self.stat("Entities resolved:", stats.entities_resolved.to_string());
    self.stat("", format!("{} links synthesized", stats.links_synthesized));
    self.stat("", format!("{} persisted, {} foreign keys", stats.persisted_entities, stats.foreign_keys));
    self.stat("Enums collected:", stats.enums_collected.to_string());
    self.stat("Units generated:", stats.units_generated().to_string());
    if self.config.verbose {
      for (kind, count) in &stats.units_by_kind {
        self.stat("", format!("{count} {kind}"));
      }
    }
    if stats.triggers_generated > 0 {
      self.stat("Trigger statements:", stats.triggers_generated.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !(warning.is_skipped_item() || self.config.verbose) {
        continue;
      }

      if !printed_header {
        eprintln!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_written(&self, sink: &FileSink, count: usize) {
    self.info(
      &format!("Wrote {count} files under: {}", sink.root().display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      self.emit("");
      self.emit(&format!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated Android data layer".with(self.colors.success())
      ));
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let tracker = TrackedErrors::new();
  let document = DocumentLoader::new(&tracker).load(&config.source).await;
  logger.log_document(&document);

  logger.log_generating();
  let orchestrator =
    Orchestrator::new(document, config.generator.clone()).with_tracked_warnings(tracker.into_warnings());
  let output = orchestrator.generate()?;
  logger.print_statistics(&output.stats);

  if config.to_stdout {
    print!("{}", output.bundle);
  } else if let Some(module_dir) = &config.output {
    let sink = FileSink::new(module_dir);
    let written = sink.write(&output.bundle).await?;
    logger.log_written(&sink, written.len());
  }

  logger.log_success();
  Ok(())
}
