mod code;
pub(crate) mod known;
mod types;

pub use code::CodeBlock;
pub use types::{ClassName, TypeName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Modifier {
  #[strum(to_string = "override")]
  Override,
  #[strum(to_string = "abstract")]
  Abstract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeKind {
  #[default]
  Class,
  DataClass,
  AbstractClass,
  Interface,
  Object,
  EnumClass,
  CompanionObject,
}

impl TypeKind {
  pub fn keyword(self) -> &'static str {
    match self {
      Self::Class => "class",
      Self::DataClass => "data class",
      Self::AbstractClass => "abstract class",
      Self::Interface => "interface",
      Self::Object => "object",
      Self::EnumClass => "enum class",
      Self::CompanionObject => "companion object",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
  pub class: ClassName,
  pub args: Vec<CodeBlock>,
}

impl Annotation {
  pub fn new(class: ClassName) -> Self {
    Self { class, args: vec![] }
  }

  #[must_use]
  pub fn arg(mut self, arg: impl Into<CodeBlock>) -> Self {
    self.args.push(arg.into());
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct PropertySpec {
  #[builder(into)]
  pub name: String,
  pub type_name: TypeName,
  #[builder(default)]
  pub mutable: bool,
  #[builder(default)]
  pub modifiers: Vec<Modifier>,
  #[builder(default)]
  pub annotations: Vec<Annotation>,
  pub initializer: Option<CodeBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ParameterSpec {
  #[builder(into)]
  pub name: String,
  pub type_name: TypeName,
  pub default: Option<CodeBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct FunSpec {
  #[builder(into)]
  pub name: String,
  #[builder(default)]
  pub modifiers: Vec<Modifier>,
  #[builder(default)]
  pub annotations: Vec<Annotation>,
  #[builder(default)]
  pub params: Vec<ParameterSpec>,
  pub returns: Option<TypeName>,
  /// Statements of the body. `None` declares the function without a body.
  pub body: Option<Vec<CodeBlock>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
  pub name: String,
  pub args: Vec<CodeBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct TypeSpec {
  #[builder(default)]
  pub kind: TypeKind,
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub kdoc: Option<String>,
  #[builder(default)]
  pub annotations: Vec<Annotation>,
  /// Properties declared in the primary constructor.
  #[builder(default)]
  pub constructor_properties: Vec<PropertySpec>,
  /// Superclass, rendered with an empty constructor call.
  pub superclass: Option<TypeName>,
  #[builder(default)]
  pub superinterfaces: Vec<TypeName>,
  #[builder(default)]
  pub enum_constants: Vec<EnumConstant>,
  #[builder(default)]
  pub properties: Vec<PropertySpec>,
  #[builder(default)]
  pub functions: Vec<FunSpec>,
  pub companion: Option<Box<TypeSpec>>,
}

impl TypeSpec {
  pub fn has_body(&self) -> bool {
    !self.enum_constants.is_empty()
      || !self.properties.is_empty()
      || !self.functions.is_empty()
      || self.companion.is_some()
  }
}

/// One generated `.kt` source file holding a single top-level type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KotlinFile {
  pub package: String,
  pub type_spec: TypeSpec,
}

impl KotlinFile {
  pub fn new(package: impl Into<String>, type_spec: TypeSpec) -> Self {
    Self {
      package: package.into(),
      type_spec,
    }
  }

  pub fn name(&self) -> &str {
    &self.type_spec.name
  }
}
