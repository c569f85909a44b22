use super::{ArtifactBundle, ArtifactContext, ArtifactGenerator, ArtifactKind, ArtifactUnit, dao_name};
use crate::generator::{
  ast::{Annotation, ClassName, FunSpec, KotlinFile, Modifier, ParameterSpec, TypeKind, TypeName, TypeSpec, known},
  naming::identifiers::{kotlin_string_literal, strip_id_prefix},
  traversal::{EntityPlan, ModelPlan},
};

const MODIFIED_COLUMN: &str = "modified";

/// Room query interfaces. Each entity gets a generated `<E>BaseDao` holding the queries
/// and an empty `<E>Dao` extending it for hand-written additions.
pub(crate) struct DaoGenerator<'a> {
  context: &'a ArtifactContext,
}

impl<'a> DaoGenerator<'a> {
  pub(crate) fn new(context: &'a ArtifactContext) -> Self {
    Self { context }
  }

  pub(crate) fn units(&self, plan: &ModelPlan<'_>) -> Vec<ArtifactUnit> {
    let packages = &self.context.packages;
    plan
      .persisted()
      .flat_map(|entity| {
        let base = self.base_dao(entity);
        let base_type = TypeName::of(ClassName::new(packages.dao_base.clone(), base.name.clone()));
        let dao = TypeSpec::builder()
          .kind(TypeKind::Interface)
          .name(dao_name(entity.name()))
          .annotations(vec![Annotation::new(known::room_dao())])
          .superinterfaces(vec![base_type])
          .build();
        [
          ArtifactUnit::new(ArtifactKind::Dao, KotlinFile::new(packages.dao_base.clone(), base)),
          ArtifactUnit::new(ArtifactKind::Dao, KotlinFile::new(packages.dao.clone(), dao)),
        ]
      })
      .collect()
  }

  fn entity_type(&self, name: &str) -> TypeName {
    TypeName::of(ClassName::new(self.context.packages.database_entity.clone(), name))
  }

  fn base_dao(&self, entity: &EntityPlan<'_>) -> TypeSpec {
    let entity_type = self.entity_type(entity.name());
    let supertype = if !entity.is_link() && entity.has_column(MODIFIED_COLUMN) {
      "BaseEntityDao"
    } else {
      "BaseDao"
    };
    let supertype =
      TypeName::of(ClassName::new(self.context.packages.dao_base.clone(), supertype)).with_args(vec![entity_type]);

    let functions = if entity.is_link() {
      self.link_queries(entity)
    } else {
      self.entity_queries(entity)
    };

    TypeSpec::builder()
      .kind(TypeKind::Interface)
      .name(format!("{}BaseDao", entity.name()))
      .annotations(vec![Annotation::new(known::room_dao())])
      .superinterfaces(vec![supertype])
      .functions(functions)
      .build()
  }

  fn entity_queries(&self, entity: &EntityPlan<'_>) -> Vec<FunSpec> {
    let table = &entity.table;
    let entity_type = self.entity_type(entity.name());
    let mut functions = vec![];

    if let Some(primary_key) = entity.primary_key().and_then(|field| field.column.as_deref()) {
      functions.push(query(
        "findById",
        &format!("SELECT * FROM `{table}` WHERE {primary_key} = :id"),
        vec![id_param()],
        live_data(entity_type.clone().nullable()),
        true,
      ));
    }

    functions.push(query(
      "findAll",
      &format!("SELECT * FROM `{table}`"),
      vec![],
      live_data(TypeName::list_of(entity_type.clone())),
      true,
    ));

    if entity.has_column(MODIFIED_COLUMN) {
      functions.push(query(
        "findSinceBefore",
        &format!("SELECT * FROM `{table}` WHERE {MODIFIED_COLUMN} BETWEEN :since AND :before"),
        vec![param("since", TypeName::date()), param("before", TypeName::date())],
        TypeName::list_of(entity_type.clone()),
        true,
      ));
    }

    if let Some(deleted) = entity.field("isDeleted").and_then(|field| field.column.as_deref()) {
      functions.push(query(
        "findAllActive",
        &format!("SELECT * FROM `{table}` WHERE {deleted} = 0"),
        vec![],
        live_data(TypeName::list_of(entity_type.clone())),
        false,
      ));
    }

    for (field, foreign_key) in entity.foreign_keys() {
      let Some(column) = field.column.as_deref() else {
        continue;
      };
      let relation = strip_id_prefix(&field.persisted_name).unwrap_or(field.persisted_name.as_str());

      functions.push(query(
        &format!("findBy{relation}"),
        &format!("SELECT * FROM `{table}` WHERE {column} = :id"),
        vec![id_param()],
        TypeName::list_of(entity_type.clone()),
        false,
      ));

      if let Some(primary_key) = entity.primary_key().and_then(|field| field.column.as_deref()) {
        functions.push(query(
          &format!("find{relation}"),
          &format!(
            "SELECT * FROM `{}` WHERE {} = (SELECT {column} FROM `{table}` WHERE {primary_key} = :id)",
            foreign_key.target_table, foreign_key.parent_column
          ),
          vec![id_param()],
          self.entity_type(&foreign_key.target).nullable(),
          false,
        ));
      }
    }

    functions
  }

  fn link_queries(&self, entity: &EntityPlan<'_>) -> Vec<FunSpec> {
    let Some((member, group)) = entity.link_columns() else {
      return vec![];
    };
    let table = &entity.table;
    let entity_type = self.entity_type(entity.name());

    vec![
      query(
        "findByGroupId",
        &format!("SELECT * FROM `{table}` WHERE {group} = :id"),
        vec![id_param()],
        TypeName::list_of(entity_type.clone()),
        false,
      ),
      query(
        "findUnnecessary",
        &format!("SELECT * FROM `{table}` WHERE {group} = :id AND {member} NOT IN (:list)"),
        vec![id_param(), param("list", TypeName::list_of(TypeName::int()))],
        TypeName::list_of(entity_type),
        false,
      ),
    ]
  }
}

fn query(name: &str, sql: &str, params: Vec<ParameterSpec>, returns: TypeName, overrides: bool) -> FunSpec {
  FunSpec::builder()
    .name(name)
    .modifiers(if overrides { vec![Modifier::Override] } else { vec![] })
    .annotations(vec![Annotation::new(known::room_query()).arg(kotlin_string_literal(sql))])
    .params(params)
    .returns(returns)
    .build()
}

fn param(name: &str, type_name: TypeName) -> ParameterSpec {
  ParameterSpec::builder().name(name).type_name(type_name).build()
}

fn id_param() -> ParameterSpec {
  param("id", TypeName::int())
}

fn live_data(inner: TypeName) -> TypeName {
  TypeName::of(known::live_data()).with_args(vec![inner])
}

impl ArtifactGenerator for DaoGenerator<'_> {
  fn kind(&self) -> ArtifactKind {
    ArtifactKind::Dao
  }

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle) {
    bundle.extend(self.units(plan));
  }
}
