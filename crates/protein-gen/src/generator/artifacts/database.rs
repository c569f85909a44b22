use super::{ArtifactBundle, ArtifactContext, ArtifactGenerator, ArtifactKind, ArtifactUnit, dao_name};
use crate::generator::{
  ast::{Annotation, ClassName, CodeBlock, FunSpec, KotlinFile, Modifier, TypeKind, TypeName, TypeSpec, known},
  naming::identifiers::decapitalize,
  traversal::ModelPlan,
};

/// The Room database class registering every persisted entity and exposing one DAO each.
///
/// Entities and DAO accessors are sorted by entity name.
pub(crate) struct DatabaseGenerator<'a> {
  context: &'a ArtifactContext,
}

impl<'a> DatabaseGenerator<'a> {
  pub(crate) fn new(context: &'a ArtifactContext) -> Self {
    Self { context }
  }

  pub(crate) fn unit(&self, plan: &ModelPlan<'_>) -> ArtifactUnit {
    let packages = &self.context.packages;
    let mut names: Vec<&str> = plan.persisted().map(|entity| entity.name()).collect();
    names.sort_unstable();

    let entity_types: Vec<TypeName> = names
      .iter()
      .map(|name| TypeName::of(ClassName::new(packages.database_entity.clone(), *name)))
      .collect();
    let entities_arg = if entity_types.is_empty() {
      CodeBlock::of("entities = []")
    } else {
      let lines = vec!["    %T::class"; entity_types.len()].join(",\n");
      CodeBlock::with_types(format!("entities = [\n{lines}\n]"), entity_types)
    };

    let accessors = names
      .iter()
      .map(|name| {
        let dao = dao_name(name);
        FunSpec::builder()
          .name(decapitalize(&dao))
          .modifiers(vec![Modifier::Abstract])
          .returns(TypeName::of(ClassName::new(packages.dao.clone(), dao)))
          .build()
      })
      .collect();

    let database = TypeSpec::builder()
      .kind(TypeKind::AbstractClass)
      .name(self.context.database_name.clone())
      .annotations(vec![
        Annotation::new(known::room_database())
          .arg(entities_arg)
          .arg(format!("version = {}", self.context.database_version)),
      ])
      .superclass(TypeName::of(known::room_database_base()))
      .functions(accessors)
      .build();

    ArtifactUnit::new(ArtifactKind::Database, KotlinFile::new(packages.database.clone(), database))
  }
}

impl ArtifactGenerator for DatabaseGenerator<'_> {
  fn kind(&self) -> ArtifactKind {
    ArtifactKind::Database
  }

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle) {
    bundle.push(self.unit(plan));
  }
}
