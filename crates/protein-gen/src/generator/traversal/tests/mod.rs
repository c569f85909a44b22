use serde_json::json;

use crate::generator::{
  metrics::GenerationWarning,
  naming::NamingResolver,
  tests::support::{resolve, sync_fixture},
  traversal::{EntityCapability, FieldRole, ModelPlan},
};

#[test]
fn test_plan_tables_and_columns() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());

  let order = plan.entity("Order").unwrap();
  assert_eq!(order.table, "order");
  assert_eq!(
    order.column_names(),
    vec!["id_order", "id_customer", "status", "total", "tags", "is_deleted", "modified"]
  );
  assert_eq!(order.key_columns(), vec!["id_order"]);
  assert_eq!(order.capability, EntityCapability::Deletable);

  let customer_ref = order.field("customer").unwrap();
  assert_eq!(customer_ref.dto_name, "customer");
  assert_eq!(customer_ref.persisted_name, "idCustomer");
  let foreign_key = customer_ref.foreign_key().unwrap();
  assert_eq!(foreign_key.target, "Customer");
  assert_eq!(foreign_key.target_table, "customer");
  assert_eq!(foreign_key.parent_column, "id_customer");

  assert!(order.field("lines").unwrap().column.is_none());
}

#[test]
fn test_plan_capabilities_and_overrides() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());

  let customer = plan.entity("Customer").unwrap();
  assert_eq!(customer.capability, EntityCapability::Timestamped);
  assert_eq!(customer.capability.supertype(), Some("BaseEntity"));
  assert_eq!(customer.interfaces, vec!["FavoriteEntity"]);

  let favorite = customer.field("isFavorite").unwrap();
  assert_eq!(
    favorite.role,
    FieldRole::Capability {
      interface: "FavoriteEntity"
    }
  );
  assert!(favorite.overrides);
  assert!(customer.field("id").unwrap().overrides);
  assert!(customer.field("modified").unwrap().overrides);
  assert!(!customer.field("name").unwrap().overrides);

  let line = plan.entity("OrderLine").unwrap();
  assert_eq!(line.capability, EntityCapability::IdOnly);
  assert_eq!(line.field("idOrder").unwrap().foreign_key().unwrap().target, "Order");
}

#[test]
fn test_plan_links_and_sync_only() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());

  let root = plan.entity("SyncData").unwrap();
  assert!(root.sync_only);
  assert!(!root.is_persisted());

  let link = plan.entity("ColorGroupLink").unwrap();
  assert!(link.is_link());
  assert_eq!(link.capability, EntityCapability::Link);
  assert_eq!(link.key_columns(), vec!["id_color", "id_color_group"]);
  assert_eq!(link.link_columns(), Some(("id_color", "id_color_group")));
  assert_eq!(link.foreign_keys().count(), 2);

  let persisted = plan.persisted().map(|entity| entity.name()).collect::<Vec<_>>();
  assert_eq!(
    persisted,
    vec!["Customer", "Order", "ColorGroup", "Color", "OrderLine", "ColorGroupLink"]
  );
  assert_eq!(plan.mapped().count(), 5);
  assert_eq!(plan.sync_entities().count(), 6);
  assert!(plan.warnings().is_empty());
}

#[test]
fn test_missing_foreign_key_target_degrades_to_plain_column() {
  let model = resolve(json!({
    "swagger": "2.0",
    "definitions": {
      "SyncData": {
        "type": "object",
        "properties": { "visits": { "type": "array", "items": { "$ref": "#/definitions/Visit" } } }
      },
      "Visit": {
        "type": "object",
        "properties": {
          "id": { "type": "integer" },
          "idClinic": { "type": "integer" },
          "idExternal": { "type": "string" }
        }
      }
    }
  }));
  let plan = ModelPlan::build(&model, NamingResolver::default());

  let visit = plan.entity("Visit").unwrap();
  assert_eq!(visit.field("idClinic").unwrap().role, FieldRole::Plain);
  assert_eq!(visit.field("idClinic").unwrap().column.as_deref(), Some("id_clinic"));
  assert_eq!(visit.field("idExternal").unwrap().role, FieldRole::Plain);
  assert_eq!(
    plan.warnings(),
    &[GenerationWarning::ForeignKeyTargetMissing {
      entity: "Visit".to_string(),
      field: "idClinic".to_string(),
      target: "Clinic".to_string(),
    }]
  );
}

#[test]
fn test_entity_without_columns_is_skipped() {
  let model = resolve(json!({
    "swagger": "2.0",
    "definitions": {
      "SyncData": {
        "type": "object",
        "properties": { "bundles": { "type": "array", "items": { "$ref": "#/definitions/Bundle" } } }
      },
      "Bundle": {
        "type": "object",
        "properties": { "items": { "type": "array", "items": { "$ref": "#/definitions/Piece" } } }
      },
      "Piece": { "type": "object", "properties": { "id": { "type": "integer" } } }
    }
  }));
  let plan = ModelPlan::build(&model, NamingResolver::default());

  assert!(!plan.entity("Bundle").unwrap().is_persisted());
  assert!(plan.warnings().iter().any(|warning| matches!(
    warning,
    GenerationWarning::EntitySkipped { entity, .. } if entity == "Bundle"
  )));
  assert_eq!(plan.persisted().map(|entity| entity.name()).collect::<Vec<_>>(), vec!["Piece"]);
}

#[test]
fn test_root_entity_is_never_persisted() {
  let model = resolve(json!({
    "swagger": "2.0",
    "definitions": {
      "SyncData": {
        "type": "object",
        "properties": { "id": { "type": "integer" }, "syncedAt": { "type": "string", "format": "date-time" } }
      }
    }
  }));
  let plan = ModelPlan::build(&model, NamingResolver::default());
  assert_eq!(plan.persisted().count(), 0);
  assert!(plan.warnings().is_empty());
}

#[test]
fn test_colliding_persisted_names_keep_first_field() {
  let model = resolve(json!({
    "swagger": "2.0",
    "definitions": {
      "SyncData": {
        "type": "object",
        "properties": { "orders": { "type": "array", "items": { "$ref": "#/definitions/Order" } } }
      },
      "Order": {
        "type": "object",
        "properties": {
          "id": { "type": "integer" },
          "customer": { "$ref": "#/definitions/Customer" },
          "idCustomer": { "type": "integer" }
        }
      },
      "Customer": { "type": "object", "properties": { "id": { "type": "integer" } } }
    }
  }));
  let plan = ModelPlan::build(&model, NamingResolver::default());

  let order = plan.entity("Order").unwrap();
  assert_eq!(order.column_names(), vec!["id_order", "id_customer"]);
  assert_eq!(order.foreign_keys().count(), 1);
  assert!(order.field("customer").unwrap().foreign_key().is_some());

  let duplicate = order.field("idCustomer").unwrap();
  assert!(!duplicate.is_persisted());
  assert_eq!(duplicate.role, FieldRole::Plain);

  assert_eq!(
    plan.warnings(),
    [GenerationWarning::FieldCollision {
      entity: "Order".to_string(),
      property: "idCustomer".to_string(),
      existing: "customer".to_string(),
    }]
  );
}

#[test]
fn test_long_keys_are_plain_columns() {
  let model = resolve(json!({
    "swagger": "2.0",
    "definitions": {
      "SyncData": {
        "type": "object",
        "properties": { "orders": { "type": "array", "items": { "$ref": "#/definitions/Order" } } }
      },
      "Order": {
        "type": "object",
        "properties": {
          "id": { "type": "integer", "format": "int64" },
          "idCustomer": { "type": "integer", "format": "int64" },
          "count": { "type": "integer", "format": "int64" }
        }
      },
      "Customer": { "type": "object", "properties": { "id": { "type": "integer" } } }
    }
  }));
  let plan = ModelPlan::build(&model, NamingResolver::default());

  let order = plan.entity("Order").unwrap();
  assert_eq!(order.column_names(), vec!["id", "id_customer", "count"]);
  assert!(order.primary_key().is_none());
  assert!(order.key_columns().is_empty());
  assert_eq!(order.foreign_keys().count(), 0);
  assert_eq!(order.capability, EntityCapability::Bare);

  let reasons = plan
    .warnings()
    .iter()
    .filter_map(|warning| match warning {
      GenerationWarning::UnsupportedProperty { entity, property, reason } if entity == "Order" => {
        Some((property.as_str(), reason.as_str()))
      }
      _ => None,
    })
    .collect::<Vec<_>>();
  assert_eq!(
    reasons,
    vec![
      ("id", "64-bit keys are stored as plain columns"),
      ("idCustomer", "64-bit keys are stored as plain columns"),
    ]
  );
}
