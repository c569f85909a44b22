use indexmap::IndexMap;

use super::{ArtifactBundle, ArtifactContext, ArtifactGenerator, ArtifactKind, ArtifactUnit, dto_name, mapper_name};
use crate::generator::{
  ast::{ClassName, CodeBlock, FunSpec, KotlinFile, ParameterSpec, PropertySpec, TypeKind, TypeName, TypeSpec},
  naming::identifiers::{decapitalize, kotlin_identifier, kotlin_string_literal},
  traversal::{EntityPlan, ModelPlan},
};

pub(crate) const MAP_HELPER: &str = "MapHelper";
pub(crate) const PUT_MAP_HELPER: &str = "PutMapHelper";

/// A key-carrying field and the entity whose id space it lives in.
struct KeyField<'p> {
  persisted_name: &'p str,
  target: &'p str,
  table: &'p str,
}

/// Id translation helpers built on the shared traversal.
///
/// `MapHelper` rewrites server ids to local ids after mapping a DTO, using per-table
/// lookups keyed by the snake-case table name. `PutMapHelper` records the ids seen
/// while mapping entities back to DTOs.
pub(crate) struct MapHelperGenerator<'a> {
  context: &'a ArtifactContext,
}

impl<'a> MapHelperGenerator<'a> {
  pub(crate) fn new(context: &'a ArtifactContext) -> Self {
    Self { context }
  }

  pub(crate) fn units(&self, plan: &ModelPlan<'_>) -> Vec<ArtifactUnit> {
    let package = &self.context.packages.helper;
    vec![
      ArtifactUnit::new(ArtifactKind::MapHelper, KotlinFile::new(package.clone(), self.map_helper(plan))),
      ArtifactUnit::new(ArtifactKind::MapHelper, KotlinFile::new(package.clone(), self.put_map_helper(plan))),
    ]
  }

  fn sync_params(&self) -> TypeName {
    TypeName::of(ClassName::new(self.context.packages.sync.clone(), "SyncParams"))
  }

  fn dto_type(&self, entity: &str) -> TypeName {
    TypeName::of(ClassName::new(self.context.packages.sync_entity.clone(), dto_name(entity)))
  }

  fn entity_type(&self, entity: &str) -> TypeName {
    TypeName::of(ClassName::new(self.context.packages.database_entity.clone(), entity))
  }

  fn mapper_param(&self, entity: &str) -> ParameterSpec {
    ParameterSpec::builder()
      .name("mapper")
      .type_name(TypeName::of(ClassName::new(
        self.context.packages.mapper.clone(),
        mapper_name(entity),
      )))
      .build()
  }

  fn map_helper(&self, plan: &ModelPlan<'_>) -> TypeSpec {
    let id_map = TypeName::map_of(TypeName::int(), self.sync_params());
    let lookups = lookup_tables(plan)
      .into_iter()
      .map(|(property, table)| {
        PropertySpec::builder()
          .name(property)
          .type_name(id_map.clone())
          .initializer(CodeBlock::of(format!("st[{}] ?: mapOf()", kotlin_string_literal(table))))
          .build()
      })
      .collect();

    let functions = plan
      .mapped()
      .map(|entity| {
        let param = parameter_name(entity.name());
        let mut body = vec![CodeBlock::of(format!("val mapped = mapper.map({param})"))];
        body.extend(key_fields(entity).iter().map(|key| {
          let field = kotlin_identifier(key.persisted_name);
          CodeBlock::of(format!(
            "mapped.{field} = mapped.{field}?.let {{ {}[it]?.localId }}",
            lookup_name(key.target)
          ))
        }));
        body.push(CodeBlock::of("return mapped"));

        FunSpec::builder()
          .name("map")
          .params(vec![
            ParameterSpec::builder()
              .name(param)
              .type_name(self.dto_type(entity.name()))
              .build(),
            self.mapper_param(entity.name()),
          ])
          .returns(self.entity_type(entity.name()))
          .body(body)
          .build()
      })
      .collect();

    TypeSpec::builder()
      .kind(TypeKind::Class)
      .name(MAP_HELPER)
      .constructor_properties(vec![
        PropertySpec::builder()
          .name("st")
          .type_name(TypeName::map_of(TypeName::string(), id_map))
          .build(),
      ])
      .properties(lookups)
      .functions(functions)
      .build()
  }

  fn put_map_helper(&self, plan: &ModelPlan<'_>) -> TypeSpec {
    let id_set = TypeName::mutable_set_of(TypeName::int().nullable());
    let collectors = lookup_tables(plan)
      .into_keys()
      .map(|property| {
        PropertySpec::builder()
          .name(property)
          .type_name(id_set.clone())
          .initializer(CodeBlock::of("mutableSetOf()"))
          .build()
      })
      .collect();

    let functions = plan
      .mapped()
      .map(|entity| {
        let param = parameter_name(entity.name());
        let mut body: Vec<CodeBlock> = key_fields(entity)
          .iter()
          .map(|key| {
            CodeBlock::of(format!(
              "{}.add({param}.{})",
              lookup_name(key.target),
              kotlin_identifier(key.persisted_name)
            ))
          })
          .collect();
        body.push(CodeBlock::of(format!("return mapper.map({param})")));

        FunSpec::builder()
          .name("map")
          .params(vec![
            ParameterSpec::builder()
              .name(param)
              .type_name(self.entity_type(entity.name()))
              .build(),
            self.mapper_param(entity.name()),
          ])
          .returns(self.dto_type(entity.name()))
          .body(body)
          .build()
      })
      .collect();

    TypeSpec::builder()
      .kind(TypeKind::Class)
      .name(PUT_MAP_HELPER)
      .properties(collectors)
      .functions(functions)
      .build()
  }
}

/// Primary key first, then foreign keys in field order.
fn key_fields<'p>(entity: &'p EntityPlan<'_>) -> Vec<KeyField<'p>> {
  let primary_key = entity.primary_key().map(|field| KeyField {
    persisted_name: &field.persisted_name,
    target: entity.name(),
    table: &entity.table,
  });
  let foreign_keys = entity.foreign_keys().map(|(field, foreign_key)| KeyField {
    persisted_name: &field.persisted_name,
    target: &foreign_key.target,
    table: &foreign_key.target_table,
  });
  primary_key.into_iter().chain(foreign_keys).collect()
}

/// Lookup property name to table name, first-seen order over all mapped entities.
fn lookup_tables<'p>(plan: &'p ModelPlan<'_>) -> IndexMap<String, &'p str> {
  let mut tables = IndexMap::new();
  for entity in plan.mapped() {
    for key in key_fields(entity) {
      tables.entry(lookup_name(key.target)).or_insert(key.table);
    }
  }
  tables
}

fn lookup_name(target: &str) -> String {
  format!("{}Id", decapitalize(target))
}

fn parameter_name(entity: &str) -> String {
  kotlin_identifier(&decapitalize(entity))
}

impl ArtifactGenerator for MapHelperGenerator<'_> {
  fn kind(&self) -> ArtifactKind {
    ArtifactKind::MapHelper
  }

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle) {
    bundle.extend(self.units(plan));
  }
}
