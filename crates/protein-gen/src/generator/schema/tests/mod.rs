use serde_json::json;

use crate::generator::schema::{RawDocument, RawSchema, SchemaLookup, raw::ref_name};

fn schema(value: serde_json::Value) -> RawSchema {
  serde_json::from_value(value).unwrap()
}

#[test]
fn test_ref_name_accepts_both_dialects() {
  assert_eq!(ref_name("#/definitions/Order"), Some("Order"));
  assert_eq!(ref_name("#/components/schemas/OrderDto"), Some("OrderDto"));
  assert_eq!(ref_name("#/definitions/"), None);
  assert_eq!(ref_name("other.json#/definitions/Order"), None);
  assert_eq!(ref_name("#/components/schemas/Order/properties/id"), None);
}

#[test]
fn test_type_array_with_null_is_nullable() {
  let schema = schema(json!({ "type": ["string", "null"], "format": "date-time" }));
  assert_eq!(schema.type_tag(), Some("string"));
  assert!(schema.is_nullable());
  assert!(schema.is_date_time());
}

#[test]
fn test_nullable_flags() {
  assert!(schema(json!({ "type": "integer", "nullable": true })).is_nullable());
  assert!(schema(json!({ "type": "integer", "x-nullable": true })).is_nullable());
  assert!(!schema(json!({ "type": "integer", "nullable": false })).is_nullable());
  assert!(!schema(json!({ "type": "integer" })).is_nullable());
}

#[test]
fn test_single_all_of_reference_counts_as_ref() {
  let wrapped = schema(json!({ "allOf": [{ "$ref": "#/definitions/Customer" }], "description": "buyer" }));
  assert_eq!(wrapped.ref_target(), Some("Customer"));

  let composed = schema(json!({
    "allOf": [{ "$ref": "#/definitions/Customer" }, { "$ref": "#/definitions/Audit" }]
  }));
  assert_eq!(composed.ref_target(), None);
}

#[test]
fn test_non_object_items_are_ignored() {
  let schema = schema(json!({ "type": "array", "items": true }));
  assert_eq!(schema.type_tag(), Some("array"));
  assert!(schema.items.is_none());
}

#[test]
fn test_enum_literals_stringify_and_drop_null() {
  let schema = schema(json!({ "enum": ["open", 2, null, true] }));
  assert!(schema.is_enum());
  assert_eq!(schema.enum_literals(), vec!["open", "2", "true"]);

  let only_null = self::schema(json!({ "type": "string", "enum": [null] }));
  assert!(!only_null.is_enum());
}

#[test]
fn test_object_like_without_type_tag() {
  assert!(schema(json!({ "properties": { "id": { "type": "integer" } } })).is_object_like());
  assert!(schema(json!({ "type": "object" })).is_object_like());
  assert!(!schema(json!({ "type": "string" })).is_object_like());
}

#[test]
fn test_referenced_names_follow_properties_and_items() {
  let schema = schema(json!({
    "type": "object",
    "properties": {
      "customer": { "$ref": "#/definitions/Customer" },
      "lines": { "type": "array", "items": { "$ref": "#/definitions/OrderLine" } },
      "note": { "type": "string" },
      "tags": { "type": "array", "items": { "type": "string" } }
    }
  }));
  assert_eq!(schema.referenced_names().collect::<Vec<_>>(), vec!["Customer", "OrderLine"]);
}

#[test]
fn test_properties_keep_document_order() {
  let schema = schema(json!({
    "type": "object",
    "properties": { "zeta": {}, "alpha": {}, "mid": {} }
  }));
  assert_eq!(schema.properties.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_document_lookup() {
  let mut document = RawDocument::empty();
  assert!(document.is_empty());
  document
    .definitions
    .insert("Order".to_string(), schema(json!({ "type": "object" })));
  assert!(document.definition("Order").is_some());
  assert!(document.definition("Missing").is_none());
  assert!(!document.is_empty());
}
