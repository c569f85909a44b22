use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use crossterm::style::Stylize;

use crate::{
  generator::{
    config::GeneratorConfig,
    orchestrator::Orchestrator,
    tracking::TrackedErrors,
    traversal::{EntityPlan, ModelPlan},
  },
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::{DocumentLoader, DocumentSource},
};

/// Placeholder package; listing never renders Kotlin.
const LISTING_PACKAGE: &str = "listing";

#[derive(Debug, Clone, PartialEq, Eq)]
struct EntityRow {
  name: String,
  kind: &'static str,
  table: Option<String>,
  columns: usize,
  foreign_keys: Vec<String>,
}

impl EntityRow {
  fn from_plan(plan: &EntityPlan<'_>) -> Self {
    let kind = if plan.sync_only {
      "sync-only"
    } else if plan.is_link() {
      "link"
    } else if plan.is_persisted() {
      "entity"
    } else {
      "skipped"
    };

    Self {
      name: plan.name().to_string(),
      kind,
      table: plan.is_persisted().then(|| plan.table.clone()),
      columns: if plan.is_persisted() { plan.columns().count() } else { 0 },
      foreign_keys: plan
        .foreign_keys()
        .map(|(field, foreign_key)| format!("{} -> {}", field.persisted_name, foreign_key.target))
        .collect(),
    }
  }
}

fn entity_rows(plan: &ModelPlan<'_>) -> Vec<EntityRow> {
  plan.entities().iter().map(EntityRow::from_plan).collect()
}

pub async fn list_entities(input: &DocumentSource, root: &str, colors: &Colors) -> anyhow::Result<()> {
  let tracker = TrackedErrors::new();
  let document = DocumentLoader::new(&tracker).load(input).await;
  for message in tracker.messages() {
    eprintln!("{}", message.with(colors.accent()));
  }

  let config = GeneratorConfig::builder()
    .package_name(LISTING_PACKAGE)
    .root_entity(root)
    .build();
  let orchestrator = Orchestrator::new(document, config);
  let resolved = orchestrator.resolve()?;
  let plan = ModelPlan::build(&resolved.model, orchestrator.naming());

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["ENTITY", "KIND", "TABLE", "COLUMNS", "FOREIGN KEYS"] {
    header.add_cell(Cell::new(title).fg(colors.label().into_comfy()));
  }
  table.set_header(header);

  for entity in entity_rows(&plan) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(entity.name)
        .fg(colors.value().into_comfy())
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(entity.kind).fg(colors.accent().into_comfy()));
    row.add_cell(Cell::new(entity.table.unwrap_or_else(|| "-".to_string())).fg(colors.primary().into_comfy()));
    row.add_cell(
      Cell::new(entity.columns)
        .fg(colors.muted().into_comfy())
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(entity.foreign_keys.join("\n")).fg(colors.primary().into_comfy()));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
