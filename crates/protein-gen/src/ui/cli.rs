use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};
use crate::{
  generator::{
    artifacts::ArtifactKind,
    config::{DEFAULT_DATABASE_NAME, DEFAULT_DATABASE_VERSION, DEFAULT_ROOT_ENTITY},
  },
  utils::DocumentSource,
};

#[derive(Parser, Debug)]
#[command(name = "protein-gen")]
#[command(author, version, about = "OpenAPI sync schema to Android data layer generator")]
#[command(styles = super::Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from the schema document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate the Kotlin data layer from the schema document
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path or http(s) URL of the Swagger 2 / OpenAPI 3 document (JSON or YAML)
  #[arg(short, long, value_name = "FILE|URL")]
  pub input: DocumentSource,

  /// Root Kotlin package of the generated sources
  #[arg(short, long, value_name = "PACKAGE")]
  pub package: String,

  /// Android module directory; sources go to <DIR>/src/main/java
  #[arg(short, long, value_name = "DIR")]
  pub output: Option<PathBuf>,

  /// Root definition the traversal starts from
  #[arg(long, value_name = "NAME", default_value = DEFAULT_ROOT_ENTITY)]
  pub root: String,

  /// Package for generated enums (default: <PACKAGE>.model)
  #[arg(long, value_name = "PACKAGE")]
  pub enum_package: Option<String>,

  /// Name of the generated Room database class
  #[arg(long, value_name = "NAME", default_value = DEFAULT_DATABASE_NAME)]
  pub database_name: String,

  /// Schema version of the generated Room database
  #[arg(long, value_name = "VERSION", default_value_t = DEFAULT_DATABASE_VERSION)]
  pub database_version: u32,

  /// Generate only these artifact kinds (comma-separated). `domain` is only produced when listed
  #[arg(long, value_enum, value_name = "KINDS", value_delimiter = ',')]
  pub only: Option<Vec<ArtifactKind>>,

  /// Print all generated sources to stdout instead of writing files
  #[arg(long, default_value_t = false)]
  pub stdout: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every entity reachable from the root definition
  Entities {
    /// Path or http(s) URL of the schema document
    #[arg(short, long, value_name = "FILE|URL")]
    input: DocumentSource,

    /// Root definition the traversal starts from
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ROOT_ENTITY)]
    root: String,
  },
}
