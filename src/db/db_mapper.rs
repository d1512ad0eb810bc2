use super::db_util::db_column_name;
use anyhow::{anyhow, Result};
use log::warn;
use schemars::schema::{InstanceType, RootSchema, Schema, SchemaObject, SingleOrVec};
use sea_orm::{QueryResult, Value};
use serde::{Deserialize, Serialize};

/// Storage type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Datatype {
    Int,
    String,
    Bool,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSchema {
    /// Field name as it appears in the entity record.
    pub name: String,
    pub datatype: Datatype,
    pub nullable: bool,
}

impl ColumnSchema {
    pub fn db_name(&self) -> String {
        db_column_name(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
}

impl Datatype {
    fn from_instance_type(instance_type: &InstanceType) -> Self {
        match instance_type {
            InstanceType::Boolean => Datatype::Bool,
            InstanceType::Integer => Datatype::Int,
            InstanceType::String => Datatype::String,
            InstanceType::Number
            | InstanceType::Object
            | InstanceType::Array
            | InstanceType::Null => Datatype::Json,
        }
    }

    /// Converts a record value into a sea-orm value of this column type.
    pub fn value_with_datatype(&self, value: Option<&serde_json::Value>) -> Result<Value> {
        let value = value.filter(|v| !v.is_null());
        let converted = match self {
            Datatype::Int => match value {
                Some(v) => Some(
                    v.as_i64()
                        .ok_or_else(|| anyhow!("expected an integer, got {}", v))?,
                )
                .into(),
                None => None::<i64>.into(),
            },
            Datatype::String => match value {
                Some(serde_json::Value::String(s)) => Some(s.clone()).into(),
                Some(v) => Some(v.to_string()).into(),
                None => None::<String>.into(),
            },
            Datatype::Bool => match value {
                Some(v) => Some(
                    v.as_bool()
                        .ok_or_else(|| anyhow!("expected a boolean, got {}", v))?,
                )
                .into(),
                None => None::<bool>.into(),
            },
            Datatype::Json => value.cloned().into(),
        };
        Ok(converted)
    }

    /// Reads the column `column` of `row` back into a record value.
    pub fn json_from_row(&self, row: &QueryResult, column: &str) -> Result<serde_json::Value> {
        let value = match self {
            Datatype::Int => row
                .try_get::<Option<i64>>("", column)?
                .map(serde_json::Value::from),
            Datatype::String => row
                .try_get::<Option<String>>("", column)?
                .map(serde_json::Value::from),
            Datatype::Bool => row
                .try_get::<Option<bool>>("", column)?
                .map(serde_json::Value::from),
            Datatype::Json => row.try_get::<Option<serde_json::Value>>("", column)?,
        };
        Ok(value.unwrap_or(serde_json::Value::Null))
    }
}

fn resolve_reference<'a>(root: &'a RootSchema, reference: &str) -> Option<&'a Schema> {
    let name = reference.rsplit('/').next()?;
    root.definitions.get(name)
}

fn column_type(root: &RootSchema, schema: &SchemaObject) -> (Datatype, bool) {
    if let Some(reference) = &schema.reference {
        return match resolve_reference(root, reference) {
            Some(Schema::Object(target)) => column_type(root, target),
            _ => {
                warn!("unresolved schema reference {}", reference);
                (Datatype::Json, true)
            }
        };
    }
    match &schema.instance_type {
        Some(SingleOrVec::Single(instance_type)) => {
            (Datatype::from_instance_type(instance_type), false)
        }
        Some(SingleOrVec::Vec(instance_types)) => {
            // Optional fields come through as [T, null].
            let nullable = instance_types.contains(&InstanceType::Null);
            let datatype = instance_types
                .iter()
                .find(|t| **t != InstanceType::Null)
                .map(Datatype::from_instance_type)
                .unwrap_or(Datatype::Json);
            (datatype, nullable)
        }
        None => {
            // Option<Enum> shows up as anyOf [$ref, null].
            if let Some(any_of) = schema.subschemas.as_ref().and_then(|s| s.any_of.as_ref()) {
                for candidate in any_of {
                    if let Schema::Object(object) = candidate {
                        let (datatype, _) = column_type(root, object);
                        if object.reference.is_some() {
                            return (datatype, true);
                        }
                    }
                }
            }
            (Datatype::Json, true)
        }
    }
}

/// Derives table columns from the JSON schema of an entity struct.
pub fn table_schema_from_root(table_name: &str, root: &RootSchema) -> TableSchema {
    let mut columns = vec![];
    if let Some(object) = &root.schema.object {
        for (property_name, schema) in &object.properties {
            let (datatype, nullable) = match schema {
                Schema::Object(schema_object) => column_type(root, schema_object),
                Schema::Bool(_) => (Datatype::Json, true),
            };
            columns.push(ColumnSchema {
                name: property_name.clone(),
                datatype,
                nullable: nullable || !object.required.contains(property_name),
            });
        }
    }
    TableSchema {
        name: table_name.to_string(),
        columns,
    }
}
