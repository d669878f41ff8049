//! Dynamic record schemas, for destinations only known at runtime.
//!
//! A [`RecordSchema`] lists `(field, selector, type)` entries and fills a JSON
//! object from a document. The schema itself is serde-serializable, so it can
//! live in configuration files next to the selectors it uses.
use crate::error::UnmarshalError;
use crate::value::type_name;
use jsonsel_jpath::Document;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The JSON type a schema field accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Float,
    Integer,
    Bool,
    /// Any value, including objects and arrays.
    Any,
    /// All results of the selector, each of the inner type.
    List(Box<FieldType>),
}

impl FieldType {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Float => value.is_number(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Any => true,
            FieldType::List(inner) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| inner.accepts(item))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Float => "float",
            FieldType::Integer => "integer",
            FieldType::Bool => "bool",
            FieldType::Any => "any",
            FieldType::List(_) => "list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub selector: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Skip the field instead of failing when the selector matches nothing.
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSchema {
    fields: Vec<SchemaField>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, selector: &str, field_type: FieldType) -> Self {
        self.fields.push(SchemaField {
            name: name.to_string(),
            selector: selector.to_string(),
            field_type,
            optional: false,
        });
        self
    }

    pub fn optional_field(mut self, name: &str, selector: &str, field_type: FieldType) -> Self {
        self.fields.push(SchemaField {
            name: name.to_string(),
            selector: selector.to_string(),
            field_type,
            optional: true,
        });
        self
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Writes every field into `dest`, which must be a JSON object.
    ///
    /// Stops at the first error; fields written before it stay in `dest`.
    pub fn populate(&self, doc: &Document, dest: &mut Value) -> Result<(), UnmarshalError> {
        let found = type_name(dest);
        let Value::Object(record) = dest else {
            return Err(UnmarshalError::NotARecord { found });
        };
        for field in &self.fields {
            let results = doc.try_query(&field.selector)?;
            debug!(
                "Field '{}' ({}) matched {} value(s)",
                field.name,
                field.selector,
                results.len()
            );
            if let Some(value) = resolve(field, &results)? {
                record.insert(field.name.clone(), value);
            }
        }
        Ok(())
    }

    /// Builds a fresh record from `doc`.
    pub fn to_record(&self, doc: &Document) -> Result<Value, UnmarshalError> {
        let mut record = Value::Object(Map::new());
        self.populate(doc, &mut record)?;
        Ok(record)
    }

    /// Builds a record and hands it to serde to produce `T`.
    pub fn deserialize<T: DeserializeOwned>(&self, doc: &Document) -> Result<T, UnmarshalError> {
        Ok(serde_json::from_value(self.to_record(doc)?)?)
    }
}

fn resolve(field: &SchemaField, results: &[&Value]) -> Result<Option<Value>, UnmarshalError> {
    if let FieldType::List(inner) = &field.field_type {
        for (i, value) in results.iter().enumerate() {
            check(&format!("{}[{}]", field.name, i), inner, value)?;
        }
        return Ok(Some(Value::Array(
            results.iter().map(|v| (*v).clone()).collect(),
        )));
    }

    match results.first() {
        Some(first) => {
            check(&field.name, &field.field_type, first)?;
            Ok(Some((*first).clone()))
        }
        None if field.optional => Ok(None),
        None => Err(UnmarshalError::NotFound {
            field: field.name.clone(),
            selector: field.selector.clone(),
        }),
    }
}

fn check(field: &str, expected: &FieldType, value: &Value) -> Result<(), UnmarshalError> {
    if expected.accepts(value) {
        Ok(())
    } else {
        Err(UnmarshalError::TypeMismatch {
            field: field.to_string(),
            found: type_name(value),
            expected: expected.name(),
        })
    }
}
