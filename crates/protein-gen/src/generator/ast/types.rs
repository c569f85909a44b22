use std::fmt;

/// Fully qualified Kotlin class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
  pub package: String,
  pub simple: String,
}

impl ClassName {
  pub fn new(package: impl Into<String>, simple: impl Into<String>) -> Self {
    Self {
      package: package.into(),
      simple: simple.into(),
    }
  }

  pub fn kotlin(simple: &str) -> Self {
    Self::new("kotlin", simple)
  }

  pub fn collections(simple: &str) -> Self {
    Self::new("kotlin.collections", simple)
  }

  /// Classes in these packages are visible without an import.
  pub fn is_implicitly_imported(&self) -> bool {
    matches!(self.package.as_str(), "kotlin" | "kotlin.collections" | "")
  }

  pub fn canonical(&self) -> String {
    if self.package.is_empty() {
      self.simple.clone()
    } else {
      format!("{}.{}", self.package, self.simple)
    }
  }
}

impl fmt::Display for ClassName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.canonical())
  }
}

/// A possibly parameterized, possibly nullable type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
  pub class: ClassName,
  pub args: Vec<TypeName>,
  pub nullable: bool,
}

impl TypeName {
  pub fn of(class: ClassName) -> Self {
    Self {
      class,
      args: vec![],
      nullable: false,
    }
  }

  pub fn int() -> Self {
    Self::of(ClassName::kotlin("Int"))
  }

  pub fn long() -> Self {
    Self::of(ClassName::kotlin("Long"))
  }

  pub fn string() -> Self {
    Self::of(ClassName::kotlin("String"))
  }

  pub fn boolean() -> Self {
    Self::of(ClassName::kotlin("Boolean"))
  }

  pub fn float() -> Self {
    Self::of(ClassName::kotlin("Float"))
  }

  pub fn any() -> Self {
    Self::of(ClassName::kotlin("Any"))
  }

  pub fn date() -> Self {
    Self::of(ClassName::new("java.util", "Date"))
  }

  pub fn list_of(element: TypeName) -> Self {
    Self::of(ClassName::collections("List")).with_args(vec![element])
  }

  pub fn map_of(key: TypeName, value: TypeName) -> Self {
    Self::of(ClassName::collections("Map")).with_args(vec![key, value])
  }

  pub fn mutable_set_of(element: TypeName) -> Self {
    Self::of(ClassName::collections("MutableSet")).with_args(vec![element])
  }

  #[must_use]
  pub fn with_args(mut self, args: Vec<TypeName>) -> Self {
    self.args = args;
    self
  }

  #[must_use]
  pub fn nullable(mut self) -> Self {
    self.nullable = true;
    self
  }

  /// Every class mentioned by this type, the type itself first.
  pub fn classes(&self) -> Vec<&ClassName> {
    let mut classes = vec![&self.class];
    for arg in &self.args {
      classes.extend(arg.classes());
    }
    classes
  }
}

impl From<ClassName> for TypeName {
  fn from(class: ClassName) -> Self {
    Self::of(class)
  }
}
