use crate::generator::{
  ast::{ClassName, TypeName},
  config::Packages,
  model::PropKind,
};

pub(crate) fn dto_name(entity: &str) -> String {
  format!("{entity}Dto")
}

pub(crate) fn dao_name(entity: &str) -> String {
  format!("{entity}Dao")
}

pub(crate) fn mapper_name(entity: &str) -> String {
  format!("{entity}Mapper")
}

/// Kotlin type of a property in the sync DTO, without nullability.
///
/// Enums travel as their string literal, references as the referenced DTO.
pub(crate) fn dto_type(kind: &PropKind, packages: &Packages) -> TypeName {
  match kind {
    PropKind::Enum { .. } => TypeName::string(),
    PropKind::Object { object_name } => {
      TypeName::of(ClassName::new(packages.sync_entity.clone(), dto_name(object_name)))
    }
    PropKind::Array(element) => TypeName::list_of(dto_type(element, packages)),
    leaf => leaf_type(leaf),
  }
}

/// Kotlin type of a property in the persistence entity, without nullability.
///
/// References are stored as their integer key.
pub(crate) fn persisted_type(kind: &PropKind, packages: &Packages) -> TypeName {
  match kind {
    PropKind::Enum { enum_name } => TypeName::of(ClassName::new(packages.enums.clone(), enum_name.clone())),
    PropKind::Object { .. } => TypeName::int(),
    PropKind::Array(element) => TypeName::list_of(persisted_type(element, packages)),
    leaf => leaf_type(leaf),
  }
}

fn leaf_type(kind: &PropKind) -> TypeName {
  match kind {
    PropKind::Integer | PropKind::Object { .. } => TypeName::int(),
    PropKind::Long => TypeName::long(),
    PropKind::String | PropKind::Enum { .. } => TypeName::string(),
    PropKind::Bool => TypeName::boolean(),
    PropKind::Float => TypeName::float(),
    PropKind::Date => TypeName::date(),
    PropKind::Array(_) | PropKind::Untyped => TypeName::any(),
  }
}
