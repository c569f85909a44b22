use std::collections::HashSet;

use super::{ArtifactBundle, ArtifactContext, ArtifactGenerator, ArtifactKind, ArtifactUnit, mappers, persisted_type};
use crate::generator::{
  ast::{Annotation, ClassName, CodeBlock, KotlinFile, PropertySpec, TypeKind, TypeName, TypeSpec, known},
  naming::identifiers::{decapitalize, kotlin_identifier, strip_id_prefix},
  traversal::{EntityPlan, ModelPlan},
};

pub(crate) fn domain_mapper_name(entity: &str) -> String {
  format!("{entity}DomainMapper")
}

/// One constructor property of a domain model and the entity column behind it.
struct DomainProperty {
  name: String,
  type_name: TypeName,
  initializer: CodeBlock,
  column_field: String,
  is_reference: bool,
}

/// Parcelable domain models and their converters to and from persistence entities.
///
/// A foreign key column surfaces as a nullable reference to the target's domain model.
/// Converting to an entity keeps the referenced id. Converting back leaves references
/// unset, the caller resolves them.
pub(crate) struct DomainGenerator<'a> {
  context: &'a ArtifactContext,
}

impl<'a> DomainGenerator<'a> {
  pub(crate) fn new(context: &'a ArtifactContext) -> Self {
    Self { context }
  }

  pub(crate) fn units(&self, plan: &ModelPlan<'_>) -> Vec<ArtifactUnit> {
    let packages = &self.context.packages;
    let models = plan.mapped().map(|entity| {
      ArtifactUnit::new(
        ArtifactKind::Domain,
        KotlinFile::new(packages.domain_model.clone(), self.model_class(entity)),
      )
    });
    let mappers = plan.mapped().map(|entity| {
      ArtifactUnit::new(
        ArtifactKind::Domain,
        KotlinFile::new(packages.domain_mapper.clone(), self.mapper_class(entity)),
      )
    });
    models.chain(mappers).collect()
  }

  fn model_type(&self, entity: &str) -> TypeName {
    TypeName::of(ClassName::new(self.context.packages.domain_model.clone(), entity))
  }

  fn entity_type(&self, entity: &str) -> TypeName {
    TypeName::of(ClassName::new(self.context.packages.database_entity.clone(), entity))
  }

  fn properties(&self, entity: &EntityPlan<'_>) -> Vec<DomainProperty> {
    let taken: HashSet<&str> = entity
      .columns()
      .map(|(field, _)| field.persisted_name.as_str())
      .collect();

    entity
      .columns()
      .map(|(field, _)| {
        let reference = field.foreign_key().and_then(|foreign_key| {
          let name = decapitalize(strip_id_prefix(&field.persisted_name)?);
          (!taken.contains(name.as_str())).then_some((name, foreign_key.target.as_str()))
        });
        if let Some((name, target)) = reference {
          return DomainProperty {
            name,
            type_name: self.model_type(target).nullable(),
            initializer: CodeBlock::of("null"),
            column_field: field.persisted_name.clone(),
            is_reference: true,
          };
        }

        let base = persisted_type(&field.prop.kind, &self.context.packages);
        let (type_name, initializer) = if field.prop.kind.is_array() {
          (base, CodeBlock::of("listOf()"))
        } else if field.is_capability() {
          (base, CodeBlock::of("false"))
        } else {
          (base.nullable(), CodeBlock::of("null"))
        };
        DomainProperty {
          name: field.persisted_name.clone(),
          type_name,
          initializer,
          column_field: field.persisted_name.clone(),
          is_reference: false,
        }
      })
      .collect()
  }

  fn model_class(&self, entity: &EntityPlan<'_>) -> TypeSpec {
    let properties = self
      .properties(entity)
      .into_iter()
      .map(|property| {
        PropertySpec::builder()
          .name(property.name)
          .type_name(property.type_name)
          .mutable(true)
          .initializer(property.initializer)
          .build()
      })
      .collect();

    TypeSpec::builder()
      .kind(TypeKind::DataClass)
      .name(entity.name())
      .annotations(vec![Annotation::new(known::parcelize())])
      .constructor_properties(properties)
      .superinterfaces(vec![TypeName::of(known::parcelable())])
      .build()
  }

  fn mapper_class(&self, entity: &EntityPlan<'_>) -> TypeSpec {
    let model = self.model_type(entity.name());
    let persisted = self.entity_type(entity.name());
    let properties = self.properties(entity);

    let to_entity = properties
      .iter()
      .map(|property| {
        let source = format!("entity.{}", kotlin_identifier(&property.name));
        let value = if property.is_reference { format!("{source}?.id") } else { source };
        (property.column_field.clone(), CodeBlock::of(value))
      })
      .collect();

    let to_model = properties
      .iter()
      .filter(|property| !property.is_reference)
      .map(|property| {
        let source = format!("entity.{}", kotlin_identifier(&property.column_field));
        (property.name.clone(), CodeBlock::of(source))
      })
      .collect();

    TypeSpec::builder()
      .kind(TypeKind::Class)
      .name(domain_mapper_name(entity.name()))
      .functions(vec![
        mappers::constructing_function("transform", model.clone(), persisted.clone(), to_entity),
        mappers::constructing_function("transform", persisted, model, to_model),
      ])
      .build()
  }
}

impl ArtifactGenerator for DomainGenerator<'_> {
  fn kind(&self) -> ArtifactKind {
    ArtifactKind::Domain
  }

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle) {
    bundle.extend(self.units(plan));
  }
}
