//! 声明式 Schema
//!
//! A schema describes the properties a block type accepts. Schemas
//! deserialise from JSON with camelCase keys, so a project can keep them in
//! files next to its sources:
//!
//! ```json
//! {
//!   "required": ["title"],
//!   "properties": {
//!     "title": { "type": "string", "minLength": 1 },
//!     "size": { "enum": ["sm", "md", "lg"] }
//!   },
//!   "additionalProperties": false
//! }
//! ```

use crate::frontend::core::parser::ast::{LiteralValue, Node, NodeKind, UnaryOp};
use crate::util::diagnostic::codes::ErrorCodeDefinition;
use crate::util::diagnostic::Diagnostic;
use crate::util::span::Span;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Value kinds a schema can demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaType {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
    /// `{{path}}`
    Reference,
    /// `#name`
    BlockReference,
    Lambda,
    Any,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Null => "null",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
            SchemaType::Reference => "reference",
            SchemaType::BlockReference => "blockReference",
            SchemaType::Lambda => "lambda",
            SchemaType::Any => "any",
        }
    }

    /// Kinds whose values are expressions rather than static data
    fn is_expression_kind(&self) -> bool {
        matches!(
            self,
            SchemaType::Reference | SchemaType::BlockReference | SchemaType::Lambda
        )
    }
}

impl fmt::Display for SchemaType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema for one value, or for a block's property set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(alias = "min", skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(alias = "max", skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// `None` and `Some(true)` both allow unlisted properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
}

impl Schema {
    /// Schema demanding one value kind
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Parse a schema from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        schema: Schema,
    ) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn require(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.required.push(name.into());
        self
    }
}

/// What a value node looks like to the schema checker
#[derive(Debug, Clone, Copy)]
enum ValueShape<'a> {
    String(&'a str),
    Number(f64),
    Boolean(bool),
    Null,
    Array(&'a [Node]),
    Object(&'a [Node]),
    Reference,
    BlockReference,
    Lambda,
    /// Identifiers and operator expressions
    Expression,
}

impl<'a> ValueShape<'a> {
    fn of(node: &'a Node) -> Self {
        match &node.kind {
            NodeKind::Literal { value } => match value {
                LiteralValue::String(s) => ValueShape::String(s),
                LiteralValue::Number(n) => ValueShape::Number(*n),
                LiteralValue::Boolean(b) => ValueShape::Boolean(*b),
                LiteralValue::Null => ValueShape::Null,
            },
            // `-5` written with a space still counts as a number
            NodeKind::UnaryExpression {
                operator: UnaryOp::Neg,
                argument,
            } => match &argument.kind {
                NodeKind::Literal {
                    value: LiteralValue::Number(n),
                } => ValueShape::Number(-n),
                _ => ValueShape::Expression,
            },
            NodeKind::ArrayExpression { elements } => ValueShape::Array(elements),
            NodeKind::ObjectExpression { properties } => ValueShape::Object(properties),
            NodeKind::Reference { .. } => ValueShape::Reference,
            NodeKind::BlockReference { .. } => ValueShape::BlockReference,
            NodeKind::LambdaExpression { .. } => ValueShape::Lambda,
            _ => ValueShape::Expression,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ValueShape::String(_) => "string",
            ValueShape::Number(_) => "number",
            ValueShape::Boolean(_) => "boolean",
            ValueShape::Null => "null",
            ValueShape::Array(_) => "array",
            ValueShape::Object(_) => "object",
            ValueShape::Reference => "reference",
            ValueShape::BlockReference => "blockReference",
            ValueShape::Lambda => "lambda",
            ValueShape::Expression => "expression",
        }
    }

    /// Value only known at runtime
    fn is_dynamic(&self) -> bool {
        matches!(
            self,
            ValueShape::Reference
                | ValueShape::BlockReference
                | ValueShape::Lambda
                | ValueShape::Expression
        )
    }

    fn conforms_to(
        &self,
        schema_type: SchemaType,
    ) -> bool {
        schema_type == SchemaType::Any || self.type_name() == schema_type.as_str()
    }

    fn matches_json(
        &self,
        value: &serde_json::Value,
    ) -> bool {
        match (self, value) {
            (ValueShape::String(s), serde_json::Value::String(v)) => s == v,
            (ValueShape::Number(n), serde_json::Value::Number(v)) => v.as_f64() == Some(*n),
            (ValueShape::Boolean(b), serde_json::Value::Bool(v)) => b == v,
            (ValueShape::Null, serde_json::Value::Null) => true,
            _ => false,
        }
    }

    fn render(&self) -> String {
        match self {
            ValueShape::String(s) => format!("\"{}\"", s),
            ValueShape::Number(n) => n.to_string(),
            ValueShape::Boolean(b) => b.to_string(),
            ValueShape::Null => "null".to_string(),
            other => other.type_name().to_string(),
        }
    }
}

/// Checks block property sets against schemas, collecting diagnostics.
///
/// Compiled patterns are cached per checker; an invalid pattern is reported
/// once as `INVALID_SCHEMA` and then ignored.
#[derive(Debug, Default)]
pub struct SchemaChecker {
    patterns: HashMap<String, Option<Regex>>,
    reported: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl SchemaChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the direct properties of a block body
    pub fn check_block(
        &mut self,
        block_type: &str,
        label: &str,
        body: &[Node],
        span: Span,
        schema: &Schema,
    ) {
        let properties: Vec<(&str, &Node)> = body.iter().filter_map(Node::as_property).collect();
        self.check_properties(block_type, label, &properties, span, schema);
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn check_properties(
        &mut self,
        block_type: &str,
        path: &str,
        properties: &[(&str, &Node)],
        span: Span,
        schema: &Schema,
    ) {
        for required in &schema.required {
            if !properties.iter().any(|(name, _)| name == required) {
                self.diagnostics.push(
                    ErrorCodeDefinition::required_property(path, required)
                        .at(span)
                        .build(),
                );
            }
        }

        for (name, value) in properties {
            let child_path = format!("{}.{}", path, name);
            match schema.properties.get(*name) {
                Some(child) => self.check_value(block_type, &child_path, value, child),
                None if schema.additional_properties == Some(false) => {
                    self.diagnostics.push(
                        ErrorCodeDefinition::additional_property(path, name)
                            .at(value.span)
                            .build(),
                    );
                }
                None => {}
            }
        }
    }

    fn check_value(
        &mut self,
        block_type: &str,
        path: &str,
        node: &Node,
        schema: &Schema,
    ) {
        let shape = ValueShape::of(node);
        let expects_expression = schema
            .schema_type
            .map(|t| t.is_expression_kind())
            .unwrap_or(false);
        if shape.is_dynamic() && !expects_expression {
            return;
        }

        if let Some(expected) = schema.schema_type {
            if !shape.conforms_to(expected) {
                self.diagnostics.push(
                    ErrorCodeDefinition::type_mismatch(path, expected.as_str(), shape.type_name())
                        .at(node.span)
                        .build(),
                );
                return;
            }
        }

        if let Some(allowed) = &schema.enum_values {
            if !allowed.iter().any(|value| shape.matches_json(value)) {
                let listed = allowed
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.diagnostics.push(
                    ErrorCodeDefinition::enum_mismatch(path, &shape.render(), &format!("[{}]", listed))
                        .at(node.span)
                        .build(),
                );
            }
        }

        match shape {
            ValueShape::String(text) => {
                self.check_length(path, text.chars().count(), node.span, schema);
                if let Some(pattern) = &schema.pattern {
                    if let Some(regex) = self.compile(block_type, pattern, node.span) {
                        if !regex.is_match(text) {
                            self.diagnostics.push(
                                ErrorCodeDefinition::pattern_mismatch(path, text, pattern)
                                    .at(node.span)
                                    .build(),
                            );
                        }
                    }
                }
            }
            ValueShape::Number(n) => {
                if let Some(min) = schema.minimum.filter(|min| n < *min) {
                    self.diagnostics.push(
                        ErrorCodeDefinition::out_of_range("MIN_VALUE", path, n, min)
                            .at(node.span)
                            .build(),
                    );
                }
                if let Some(max) = schema.maximum.filter(|max| n > *max) {
                    self.diagnostics.push(
                        ErrorCodeDefinition::out_of_range("MAX_VALUE", path, n, max)
                            .at(node.span)
                            .build(),
                    );
                }
            }
            ValueShape::Array(elements) => {
                self.check_length(path, elements.len(), node.span, schema);
                if let Some(items) = &schema.items {
                    for (i, element) in elements.iter().enumerate() {
                        self.check_value(block_type, &format!("{}[{}]", path, i), element, items);
                    }
                }
            }
            ValueShape::Object(entries) => {
                let properties: Vec<(&str, &Node)> =
                    entries.iter().filter_map(Node::as_property).collect();
                self.check_properties(block_type, path, &properties, node.span, schema);
            }
            _ => {}
        }
    }

    fn check_length(
        &mut self,
        path: &str,
        length: usize,
        span: Span,
        schema: &Schema,
    ) {
        if let Some(min) = schema.min_length.filter(|min| length < *min) {
            self.diagnostics.push(
                ErrorCodeDefinition::bad_length("MIN_LENGTH", path, length, min)
                    .at(span)
                    .build(),
            );
        }
        if let Some(max) = schema.max_length.filter(|max| length > *max) {
            self.diagnostics.push(
                ErrorCodeDefinition::bad_length("MAX_LENGTH", path, length, max)
                    .at(span)
                    .build(),
            );
        }
    }

    fn compile(
        &mut self,
        block_type: &str,
        pattern: &str,
        span: Span,
    ) -> Option<Regex> {
        let compiled = self
            .patterns
            .entry(pattern.to_string())
            .or_insert_with(|| Regex::new(pattern).ok());
        if compiled.is_none() && self.reported.insert(pattern.to_string()) {
            let reason = match Regex::new(pattern) {
                Err(err) => err.to_string(),
                Ok(_) => format!("bad pattern /{}/", pattern),
            };
            self.diagnostics.push(
                ErrorCodeDefinition::invalid_schema(block_type, &reason)
                    .at(span)
                    .build(),
            );
        }
        compiled.clone()
    }
}
