use itertools::Itertools;

use super::{ArtifactBundle, ArtifactContext, ArtifactGenerator, ArtifactKind, ArtifactUnit, TriggerScript};
use crate::generator::{
  ast::{CodeBlock, KotlinFile, PropertySpec, TypeKind, TypeName, TypeSpec},
  naming::identifiers::kotlin_string_literal,
  traversal::{EntityPlan, ModelPlan},
};

pub(crate) const UNDO_TRIGGERS: &str = "UndoTriggers";
pub(crate) const UNDO_LOG_SETUP: &str =
  "CREATE TEMP TABLE IF NOT EXISTS undo_log(seq INTEGER PRIMARY KEY AUTOINCREMENT, sql TEXT NOT NULL)";
const ROWID: &str = "rowid";

/// Undo-log triggers for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableTriggers {
  pub insert: String,
  pub update: String,
  pub delete: String,
  pub drops: Vec<String>,
}

/// SQLite triggers that record compensating statements in `undo_log`.
///
/// Each insert logs a delete, each update logs an update restoring the old values, and
/// each delete logs an insert of the old row. The column list comes from the shared
/// traversal, so it always matches the persistence entity.
pub(crate) struct TriggerGenerator<'a> {
  context: &'a ArtifactContext,
}

impl<'a> TriggerGenerator<'a> {
  pub(crate) fn new(context: &'a ArtifactContext) -> Self {
    Self { context }
  }

  pub(crate) fn tables(plan: &ModelPlan<'_>) -> Vec<TableTriggers> {
    plan.persisted().map(table_triggers).collect()
  }

  pub(crate) fn script(plan: &ModelPlan<'_>) -> TriggerScript {
    let tables = Self::tables(plan);
    let mut triggers = vec![UNDO_LOG_SETUP.to_string()];
    let mut drop_commands = vec![];
    for table in tables {
      triggers.extend([table.insert, table.update, table.delete]);
      drop_commands.extend(table.drops);
    }
    TriggerScript {
      triggers,
      drop_commands,
    }
  }

  pub(crate) fn unit(&self, script: &TriggerScript) -> ArtifactUnit {
    let undo_triggers = TypeSpec::builder()
      .kind(TypeKind::Object)
      .name(UNDO_TRIGGERS)
      .properties(vec![
        string_list("triggers", &script.triggers),
        string_list("dropTriggersCommands", &script.drop_commands),
      ])
      .build();
    ArtifactUnit::new(
      ArtifactKind::UndoTrigger,
      KotlinFile::new(self.context.packages.database.clone(), undo_triggers),
    )
  }
}

fn string_list(name: &str, statements: &[String]) -> PropertySpec {
  let initializer = if statements.is_empty() {
    "listOf()".to_string()
  } else {
    let lines = statements
      .iter()
      .map(|statement| format!("    {}", kotlin_string_literal(statement)))
      .join(",\n");
    format!("listOf(\n{lines}\n)")
  };

  PropertySpec::builder()
    .name(name)
    .type_name(TypeName::list_of(TypeName::string()))
    .initializer(CodeBlock::of(initializer))
    .build()
}

fn table_triggers(entity: &EntityPlan<'_>) -> TableTriggers {
  let table = entity.table.as_str();
  let columns: Vec<String> = entity.column_names().into_iter().map(str::to_string).collect();
  let key_columns: Vec<String> = match entity.key_columns() {
    keys if keys.is_empty() => vec![ROWID.to_string()],
    keys => keys.into_iter().map(str::to_string).collect(),
  };

  let name = |event: &str| format!("{table}_{event}_undo");
  let log = |expression: String| format!("INSERT INTO undo_log(sql) VALUES({expression})");

  let insert = format!(
    "CREATE TEMP TRIGGER IF NOT EXISTS `{}` AFTER INSERT ON `{table}` BEGIN {}; END",
    name("insert"),
    log(format!("'DELETE FROM `{table}` WHERE ' || {}", key_condition(&key_columns, "new")))
  );

  let assignments = columns
    .iter()
    .map(|column| format!("'{}=' || quote(old.{})", quoted(column), quoted(column)))
    .join(" || ',' || ");
  let update = format!(
    "CREATE TEMP TRIGGER IF NOT EXISTS `{}` AFTER UPDATE ON `{table}` BEGIN {}; END",
    name("update"),
    log(format!(
      "'UPDATE `{table}` SET ' || {assignments} || ' WHERE ' || {}",
      key_condition(&key_columns, "new")
    ))
  );

  let column_list = columns.iter().map(|column| quoted(column)).join(",");
  let old_values = columns
    .iter()
    .map(|column| format!("quote(old.{})", quoted(column)))
    .join(" || ',' || ");
  let delete = format!(
    "CREATE TEMP TRIGGER IF NOT EXISTS `{}` BEFORE DELETE ON `{table}` BEGIN {}; END",
    name("delete"),
    log(format!("'INSERT INTO `{table}`({column_list}) VALUES(' || {old_values} || ')'"))
  );

  let drops = ["insert", "update", "delete"]
    .into_iter()
    .map(|event| format!("DROP TRIGGER IF EXISTS `{}`", name(event)))
    .collect();

  TableTriggers {
    insert,
    update,
    delete,
    drops,
  }
}

fn quoted(column: &str) -> String {
  if column == ROWID {
    column.to_string()
  } else {
    format!("`{column}`")
  }
}

fn key_condition(keys: &[String], row: &str) -> String {
  keys
    .iter()
    .map(|key| format!("'{}=' || quote({row}.{})", quoted(key), quoted(key)))
    .join(" || ' AND ' || ")
}

impl ArtifactGenerator for TriggerGenerator<'_> {
  fn kind(&self) -> ArtifactKind {
    ArtifactKind::UndoTrigger
  }

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle) {
    let script = Self::script(plan);
    bundle.push(self.unit(&script));
    bundle.set_triggers(script);
  }
}
