use super::{ArtifactBundle, ArtifactContext, ArtifactGenerator, ArtifactKind, ArtifactUnit, dto_name, dto_type};
use crate::generator::{
  ast::{Annotation, CodeBlock, KotlinFile, PropertySpec, TypeKind, TypeSpec, known},
  naming::identifiers::kotlin_string_literal,
  traversal::{EntityPlan, FieldPlan, ModelPlan},
};

/// Gson-annotated wire classes, one per entity in the pure view.
pub(crate) struct SyncDtoGenerator<'a> {
  context: &'a ArtifactContext,
}

impl<'a> SyncDtoGenerator<'a> {
  pub(crate) fn new(context: &'a ArtifactContext) -> Self {
    Self { context }
  }

  pub(crate) fn units(&self, plan: &ModelPlan<'_>) -> Vec<ArtifactUnit> {
    plan
      .sync_entities()
      .map(|entity| {
        ArtifactUnit::new(
          ArtifactKind::SyncDto,
          KotlinFile::new(self.context.packages.sync_entity.clone(), self.dto_class(entity)),
        )
      })
      .collect()
  }

  fn dto_class(&self, entity: &EntityPlan<'_>) -> TypeSpec {
    let group_owner = entity.name().contains("Group");
    TypeSpec::builder()
      .kind(TypeKind::DataClass)
      .name(dto_name(entity.name()))
      .constructor_properties(
        entity
          .fields
          .iter()
          .map(|field| self.dto_property(field, group_owner))
          .collect(),
      )
      .build()
  }

  fn dto_property(&self, field: &FieldPlan<'_>, group_owner: bool) -> PropertySpec {
    let base = dto_type(&field.prop.kind, &self.context.packages);
    let is_array = field.prop.kind.is_array();
    let (type_name, initializer) = if is_array {
      (base, CodeBlock::of("listOf()"))
    } else {
      (base.nullable(), CodeBlock::of("null"))
    };

    PropertySpec::builder()
      .name(field.dto_name.clone())
      .type_name(type_name)
      .mutable(is_array && group_owner)
      .annotations(vec![
        Annotation::new(known::serialized_name()).arg(kotlin_string_literal(&field.prop.name)),
      ])
      .initializer(initializer)
      .build()
  }
}

impl ArtifactGenerator for SyncDtoGenerator<'_> {
  fn kind(&self) -> ArtifactKind {
    ArtifactKind::SyncDto
  }

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle) {
    bundle.extend(self.units(plan));
  }
}
