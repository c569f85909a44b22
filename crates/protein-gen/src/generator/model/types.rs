/// Normalized leaf and container kinds a property can take.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropKind {
  Integer,
  Long,
  String,
  Bool,
  Float,
  Date,
  Enum { enum_name: String },
  Object { object_name: String },
  Array(Box<PropKind>),
  /// Placeholder for a property whose shape could not be classified.
  Untyped,
}

impl PropKind {
  pub fn array_of(element: PropKind) -> Self {
    Self::Array(Box::new(element))
  }

  /// True for object references, including arrays of them at any depth.
  pub fn contains_object(&self) -> bool {
    match self {
      Self::Object { .. } => true,
      Self::Array(element) => element.contains_object(),
      _ => false,
    }
  }

  pub fn is_array(&self) -> bool {
    matches!(self, Self::Array(_))
  }

  /// Kinds that can carry an `Int` key value. 64-bit integers are not keys.
  pub fn is_key_compatible(&self) -> bool {
    matches!(self, Self::Integer | Self::Object { .. })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prop {
  /// Wire name as written in the document.
  pub name: String,
  pub kind: PropKind,
  pub required: bool,
}

impl Prop {
  pub fn new(name: impl Into<String>, kind: PropKind, required: bool) -> Self {
    Self {
      name: name.into(),
      kind,
      required,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOrigin {
  Schema { raw_name: String },
  /// Synthesized many-to-many link between a group entity and its members.
  Link { group: String, member: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntity {
  pub name: String,
  pub props: Vec<Prop>,
  pub origin: EntityOrigin,
}

impl ObjectEntity {
  pub fn is_link(&self) -> bool {
    matches!(self.origin, EntityOrigin::Link { .. })
  }

  pub fn prop(&self, name: &str) -> Option<&Prop> {
    self.props.iter().find(|prop| prop.name == name)
  }

  pub fn has_prop(&self, name: &str) -> bool {
    self.prop(name).is_some()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntity {
  pub name: String,
  pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEntity {
  Object(ObjectEntity),
  Enum(EnumEntity),
}

impl ModelEntity {
  #[cfg(test)]
  pub fn name(&self) -> &str {
    match self {
      Self::Object(entity) => &entity.name,
      Self::Enum(entity) => &entity.name,
    }
  }

  pub fn as_object(&self) -> Option<&ObjectEntity> {
    match self {
      Self::Object(entity) => Some(entity),
      Self::Enum(_) => None,
    }
  }
}
