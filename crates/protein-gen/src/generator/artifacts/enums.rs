use super::{ArtifactBundle, ArtifactContext, ArtifactGenerator, ArtifactKind, ArtifactUnit};
use crate::generator::{
  ast::{
    ClassName, CodeBlock, EnumConstant, FunSpec, KotlinFile, Modifier, ParameterSpec, PropertySpec, TypeKind, TypeName, TypeSpec,
  },
  naming::identifiers::{enum_constant_names, kotlin_string_literal},
  traversal::ModelPlan,
};

/// One Kotlin enum class per collected enum domain, carrying the wire literal.
pub(crate) struct EnumGenerator<'a> {
  context: &'a ArtifactContext,
}

impl<'a> EnumGenerator<'a> {
  pub(crate) fn new(context: &'a ArtifactContext) -> Self {
    Self { context }
  }

  pub(crate) fn units(&self, plan: &ModelPlan<'_>) -> Vec<ArtifactUnit> {
    plan
      .enums()
      .iter()
      .map(|(name, values)| {
        ArtifactUnit::new(
          ArtifactKind::Enum,
          KotlinFile::new(self.context.packages.enums.clone(), enum_class(&self.context.packages.enums, name, values)),
        )
      })
      .collect()
  }
}

fn enum_class(package: &str, name: &str, values: &[String]) -> TypeSpec {
  let constants = enum_constant_names(values.iter().map(String::as_str))
    .into_iter()
    .zip(values)
    .map(|(constant, literal)| EnumConstant {
      name: constant,
      args: vec![CodeBlock::of(kotlin_string_literal(literal))],
    })
    .collect();

  let self_type = TypeName::of(ClassName::new(package, name));
  let from = FunSpec::builder()
    .name("from")
    .params(vec![
      ParameterSpec::builder()
        .name("value")
        .type_name(TypeName::string())
        .build(),
    ])
    .returns(self_type.nullable())
    .body(vec![CodeBlock::of("return values().firstOrNull { it.value == value }")])
    .build();

  TypeSpec::builder()
    .kind(TypeKind::EnumClass)
    .name(name)
    .constructor_properties(vec![
      PropertySpec::builder()
        .name("value")
        .type_name(TypeName::string())
        .build(),
    ])
    .enum_constants(constants)
    .functions(vec![
      FunSpec::builder()
        .name("toString")
        .modifiers(vec![Modifier::Override])
        .returns(TypeName::string())
        .body(vec![CodeBlock::of("return value")])
        .build(),
    ])
    .companion(Box::new(
      TypeSpec::builder()
        .kind(TypeKind::CompanionObject)
        .name("Companion")
        .functions(vec![from])
        .build(),
    ))
    .build()
}

impl ArtifactGenerator for EnumGenerator<'_> {
  fn kind(&self) -> ArtifactKind {
    ArtifactKind::Enum
  }

  fn contribute(&self, plan: &ModelPlan<'_>, bundle: &mut ArtifactBundle) {
    bundle.extend(self.units(plan));
  }
}
