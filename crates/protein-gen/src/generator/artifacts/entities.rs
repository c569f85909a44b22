use super::{ArtifactBundle, ArtifactContext, ArtifactGenerator, ArtifactKind, ArtifactUnit, persisted_type};
use crate::generator::{
  ast::{Annotation, ClassName, CodeBlock, KotlinFile, Modifier, PropertySpec, TypeKind, TypeName, TypeSpec, known},
  naming::identifiers::kotlin_string_literal,
  traversal::{EntityPlan, FieldPlan, ModelPlan},
};

/// Room `@Entity` classes for every persisted entity, links included.
pub(crate) struct EntityGenerator<'a> {
  context: &'a ArtifactContext,
}

impl<'a> EntityGenerator<'a> {
  pub(crate) fn new(context: &'a ArtifactContext) -> Self {
    Self { context }
  }

  pub(crate) fn units(&self, plan: &ModelPlan<'_>) -> Vec<ArtifactUnit> {
    plan
      .persisted()
      .map(|entity| {
        ArtifactUnit::new(
          ArtifactKind::Entity,
          KotlinFile::new(self.context.packages.database_entity.clone(), self.entity_class(entity)),
        )
      })
      .collect()
  }

  fn entity_class(&self, entity: &EntityPlan<'_>) -> TypeSpec {
    let packages = &self.context.packages;
    let mut superinterfaces: Vec<TypeName> = entity
      .capability
      .supertype()
      .into_iter()
      .chain(entity.interfaces.iter().copied())
      .map(|name| TypeName::of(ClassName::new(packages.database_entity.clone(), name)))
      .collect();
    superinterfaces.dedup();

    TypeSpec::builder()
      .kind(TypeKind::DataClass)
      .name(entity.name())
      .annotations(vec![self.entity_annotation(entity)])
      .constructor_properties(
        entity
          .columns()
          .map(|(field, column)| self.column_property(entity, field, column))
          .collect(),
      )
      .superinterfaces(superinterfaces)
      .build()
  }

  fn entity_annotation(&self, entity: &EntityPlan<'_>) -> Annotation {
    let mut annotation =
      Annotation::new(known::room_entity()).arg(format!("tableName = {}", kotlin_string_literal(&entity.table)));

    if entity.is_link() {
      annotation = annotation.arg(format!("primaryKeys = [{}]", string_array(&entity.key_columns())));
    }

    let foreign_keys: Vec<_> = entity.foreign_keys().collect();
    if foreign_keys.is_empty() {
      return annotation;
    }

    let indices = foreign_keys
      .iter()
      .map(|(field, _)| {
        CodeBlock::with_types(
          format!(
            "%T(value = [{}])",
            kotlin_string_literal(field.column.as_deref().unwrap_or_default())
          ),
          vec![known::room_index().into()],
        )
      })
      .collect::<Vec<_>>();
    annotation = annotation.arg(bracketed("indices", indices));

    let relations = foreign_keys
      .iter()
      .map(|(field, foreign_key)| {
        let target = ClassName::new(self.context.packages.database_entity.clone(), foreign_key.target.clone());
        CodeBlock::with_types(
          format!(
            "%T(\n    entity = %T::class,\n    parentColumns = [{}],\n    childColumns = [{}],\n    onDelete = \
             %T.CASCADE,\n    onUpdate = %T.CASCADE\n)",
            kotlin_string_literal(&foreign_key.parent_column),
            kotlin_string_literal(field.column.as_deref().unwrap_or_default()),
          ),
          vec![
            known::room_foreign_key().into(),
            target.into(),
            known::room_foreign_key().into(),
            known::room_foreign_key().into(),
          ],
        )
      })
      .collect::<Vec<_>>();
    annotation.arg(bracketed("foreignKeys", relations))
  }

  fn column_property(&self, entity: &EntityPlan<'_>, field: &FieldPlan<'_>, column: &str) -> PropertySpec {
    let base = persisted_type(&field.prop.kind, &self.context.packages);
    let (type_name, initializer) = if field.prop.kind.is_array() {
      (base, CodeBlock::of("listOf()"))
    } else if field.is_capability() {
      (base, CodeBlock::of("false"))
    } else if entity.is_link() && field.prop.required {
      (base, CodeBlock::of("0"))
    } else {
      (base.nullable(), CodeBlock::of("null"))
    };

    let mut annotations = vec![];
    if field.is_primary_key() {
      annotations.push(Annotation::new(known::room_primary_key()).arg("autoGenerate = true"));
    }
    annotations.push(Annotation::new(known::room_column_info()).arg(format!("name = {}", kotlin_string_literal(column))));

    PropertySpec::builder()
      .name(field.persisted_name.clone())
      .type_name(type_name)
      .mutable(true)
      .modifiers(if field.overrides { vec![Modifier::Override] } else { vec![] })
      .annotations(annotations)
      .initializer(initializer)
      .build()
  }
}

fn string_array(values: &[&str]) -> String {
  values
    .iter()
    .map(|value| kotlin_string_literal(value))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Joins annotation array elements into `name = [ ... ]`, one element per line.
fn bracketed(name: &str, elements: Vec<CodeBlock>) -> CodeBlock {
  let mut format = format!("{name} = [\n");
  let mut types = vec![];
  let last = elements.len().saturating_sub(1);
  for (index, element) in elements.into_iter().enumerate() {
    format.push_str("    ");
    format.push_str(&element.format.replace('\n', "\n    "));
    if index != last {
      format.push(',');
    }
    format.push('\n');
    types.extend(element.types);
  }
  format.push(']');
  CodeBlock::with_types(format, types)
}

impl ArtifactGenerator for EntityGenerator<'_> {
  fn kind(&self) -> ArtifactKind {
    ArtifactKind::Entity
  }

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle) {
    bundle.extend(self.units(plan));
  }
}
