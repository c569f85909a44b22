use super::{ArtifactBundle, ArtifactContext, ArtifactGenerator, ArtifactKind, ArtifactUnit, dto_name, mapper_name};
use crate::generator::{
  ast::{ClassName, CodeBlock, FunSpec, KotlinFile, ParameterSpec, TypeKind, TypeName, TypeSpec},
  model::PropKind,
  naming::identifiers::kotlin_identifier,
  traversal::{EntityPlan, FieldPlan, ModelPlan},
};

/// Bidirectional converters between sync DTOs and persistence entities.
///
/// Object references collapse to their `id` on the way in and are not rebuilt on the
/// way out. Arrays of objects are not mapped in either direction.
pub(crate) struct MapperGenerator<'a> {
  context: &'a ArtifactContext,
}

enum Conversion {
  Direct,
  ReferenceId,
  Enum(TypeName),
  EnumArray(TypeName),
  DefaultFalse,
}

impl<'a> MapperGenerator<'a> {
  pub(crate) fn new(context: &'a ArtifactContext) -> Self {
    Self { context }
  }

  pub(crate) fn units(&self, plan: &ModelPlan<'_>) -> Vec<ArtifactUnit> {
    plan
      .mapped()
      .map(|entity| {
        ArtifactUnit::new(
          ArtifactKind::Mapper,
          KotlinFile::new(self.context.packages.mapper.clone(), self.mapper_class(entity)),
        )
      })
      .collect()
  }

  fn dto_type(&self, entity: &str) -> TypeName {
    TypeName::of(ClassName::new(self.context.packages.sync_entity.clone(), dto_name(entity)))
  }

  fn entity_type(&self, entity: &str) -> TypeName {
    TypeName::of(ClassName::new(self.context.packages.database_entity.clone(), entity))
  }

  fn mapper_class(&self, entity: &EntityPlan<'_>) -> TypeSpec {
    let dto = self.dto_type(entity.name());
    let persisted = self.entity_type(entity.name());

    let inbound: Vec<(String, CodeBlock)> = entity
      .columns()
      .filter_map(|(field, _)| {
        let conversion = self.conversion(field)?;
        Some((field.persisted_name.clone(), to_entity(field, conversion)))
      })
      .collect();

    let outbound: Vec<(String, CodeBlock)> = entity
      .columns()
      .filter(|(field, _)| !field.prop.kind.contains_object())
      .filter_map(|(field, _)| {
        let conversion = self.conversion(field)?;
        Some((field.dto_name.clone(), to_dto(field, conversion)))
      })
      .collect();

    TypeSpec::builder()
      .kind(TypeKind::Class)
      .name(mapper_name(entity.name()))
      .functions(vec![
        constructing_function("map", dto.clone(), persisted.clone(), inbound),
        constructing_function("map", persisted, dto, outbound),
      ])
      .build()
  }

  fn conversion(&self, field: &FieldPlan<'_>) -> Option<Conversion> {
    let enum_type = |enum_name: &str| TypeName::of(ClassName::new(self.context.packages.enums.clone(), enum_name));
    match &field.prop.kind {
      PropKind::Untyped => None,
      PropKind::Object { .. } => Some(Conversion::ReferenceId),
      PropKind::Enum { enum_name } => Some(Conversion::Enum(enum_type(enum_name))),
      PropKind::Array(element) => match element.as_ref() {
        PropKind::Enum { enum_name } => Some(Conversion::EnumArray(enum_type(enum_name))),
        PropKind::Array(_) | PropKind::Object { .. } | PropKind::Untyped => None,
        _ => Some(Conversion::Direct),
      },
      _ if field.is_capability() => Some(Conversion::DefaultFalse),
      _ => Some(Conversion::Direct),
    }
  }
}

fn to_entity(field: &FieldPlan<'_>, conversion: Conversion) -> CodeBlock {
  let source = format!("entity.{}", kotlin_identifier(&field.dto_name));
  match conversion {
    Conversion::Direct => CodeBlock::of(source),
    Conversion::ReferenceId => CodeBlock::of(format!("{source}?.id")),
    Conversion::DefaultFalse => CodeBlock::of(format!("{source} ?: false")),
    Conversion::Enum(enum_type) => CodeBlock::with_types(format!("{source}?.let {{ %T.from(it) }}"), vec![enum_type]),
    Conversion::EnumArray(enum_type) => {
      CodeBlock::with_types(format!("{source}.mapNotNull {{ %T.from(it) }}"), vec![enum_type])
    }
  }
}

fn to_dto(field: &FieldPlan<'_>, conversion: Conversion) -> CodeBlock {
  let source = format!("entity.{}", kotlin_identifier(&field.persisted_name));
  match conversion {
    Conversion::Enum(_) => CodeBlock::of(format!("{source}?.toString()")),
    Conversion::EnumArray(_) => CodeBlock::of(format!("{source}.map {{ it.toString() }}")),
    Conversion::Direct | Conversion::DefaultFalse | Conversion::ReferenceId => CodeBlock::of(source),
  }
}

/// `fun <name>(entity: From): To { return To(field = expr, ...) }`
pub(super) fn constructing_function(
  name: &str,
  from: TypeName,
  to: TypeName,
  assignments: Vec<(String, CodeBlock)>,
) -> FunSpec {
  let mut types = vec![to.clone()];
  let body = if assignments.is_empty() {
    "return %T()".to_string()
  } else {
    let lines = assignments
      .into_iter()
      .map(|(name, value)| {
        types.extend(value.types);
        format!("    {} = {}", kotlin_identifier(&name), value.format)
      })
      .collect::<Vec<_>>()
      .join(",\n");
    format!("return %T(\n{lines}\n)")
  };

  FunSpec::builder()
    .name(name)
    .params(vec![ParameterSpec::builder().name("entity").type_name(from).build()])
    .returns(to.clone())
    .body(vec![CodeBlock::with_types(body, types)])
    .build()
}

impl ArtifactGenerator for MapperGenerator<'_> {
  fn kind(&self) -> ArtifactKind {
    ArtifactKind::Mapper
  }

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle) {
    bundle.extend(self.units(plan));
  }
}
