//! Test fixtures for common test scenarios.

use chrono::{TimeZone, Utc};

use crate::codegen::GenerationContext;
use crate::core::native::{NativeDescriptor, NativeParam, TypeSpec};

/// A small natives database covering two namespaces.
pub const SAMPLE_DATABASE: &str = r#"{
  "SYSTEM": {
    "0x4EDE34FBADD967A6": {
      "name": "WAIT",
      "jhash": "0x7715C03B",
      "comment": "Pauses execution of the current script.",
      "params": [{ "type": "int", "name": "ms" }],
      "return_type": "void",
      "build": "323"
    }
  },
  "ENTITY": {
    "0x621873ECE1178967": {
      "name": "SET_ENTITY_COORDS",
      "jhash": "0xDF70B41B",
      "comment": "",
      "params": [
        { "type": "Entity", "name": "entity" },
        { "type": "float", "name": "xPos" },
        { "type": "float", "name": "yPos" },
        { "type": "float", "name": "zPos" }
      ],
      "return_type": "void",
      "build": "323"
    },
    "0x3FEF770D40960D5A": {
      "name": "GET_ENTITY_COORDS",
      "jhash": "0x1647F1CB",
      "comment": "Gets the current coordinates for a specified entity.\n\tentity = The entity to get the coordinates from.",
      "params": [
        { "type": "Entity", "name": "entity" },
        { "type": "BOOL", "name": "alive" }
      ],
      "return_type": "Vector3",
      "build": "323"
    }
  }
}"#;

/// Generation context with a fixed timestamp.
pub fn test_context() -> GenerationContext {
    GenerationContext::new(
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        "https://nativedb.example",
    )
}

/// The `get_entity_coords` descriptor used by end-to-end tests.
pub fn get_entity_coords() -> NativeDescriptor {
    NativeDescriptor::new("get_entity_coords", "0x123", TypeSpec::new("Vector3"))
        .with_param(NativeParam::new("entity", TypeSpec::new("Entity")))
        .with_comment("Gets coords")
}

/// A native returning `void` with one scalar and one vector parameter.
pub fn set_waypoint() -> NativeDescriptor {
    NativeDescriptor::new("SET_NEW_WAYPOINT", "0xFE43368D2AA4F2FC", TypeSpec::new("void"))
        .with_jhash("0x8444E1F0")
        .with_build("323")
        .with_param(NativeParam::new("coords", TypeSpec::new("Vector2")))
        .with_param(NativeParam::new("blipId", TypeSpec::new("int")))
}
