//! Builtin block schemas
//!
//! Deliberately loose: they only pin the types of well-known properties and
//! never require anything, so hand-written documents validate cleanly.

use super::schema::{Schema, SchemaType};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

static BUILTIN_SCHEMAS: Lazy<IndexMap<String, Schema>> = Lazy::new(|| {
    let mut schemas = IndexMap::new();
    schemas.insert(
        "system".to_string(),
        Schema::default()
            .property("name", Schema::of_type(SchemaType::String))
            .property("version", Schema::of_type(SchemaType::String)),
    );
    schemas.insert(
        "block".to_string(),
        Schema::default()
            .property("title", Schema::of_type(SchemaType::String))
            .property("visible", Schema::of_type(SchemaType::Boolean)),
    );
    schemas.insert(
        "dom".to_string(),
        Schema::default()
            .property("className", Schema::of_type(SchemaType::String))
            .property("hidden", Schema::of_type(SchemaType::Boolean))
            .property("innerHTML", Schema::of_type(SchemaType::String)),
    );
    schemas
});

/// Builtin schema for a block type
pub fn builtin_schema(block_type: &str) -> Option<&'static Schema> {
    BUILTIN_SCHEMAS.get(block_type)
}
