use crate::db::db_mapper::table_schema_from_root;
use crate::db::db_util::entity_table_name;
use crate::db::{Persister, Record, TableSchema};
use anyhow::{anyhow, Context, Result};
use log::debug;
use schemars::schema_for;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A record kept in the store under a string id.
///
/// Fields are stored under their serde (camelCase) names and the table layout
/// is derived from the struct's JSON schema.
pub trait Entity: Serialize + DeserializeOwned + JsonSchema + Send + Sync {
    const ENTITY_TYPE: &'static str;

    fn id(&self) -> &str;

    fn to_record(&self) -> Result<Record> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields.into_iter().collect()),
            other => Err(anyhow!(
                "{} serialized to a non-object value {}",
                Self::ENTITY_TYPE,
                other
            )),
        }
    }

    fn from_record(record: Record) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(
            record.into_iter().collect(),
        ))?)
    }

    fn table_schema(namespace: &str) -> TableSchema {
        table_schema_from_root(
            &entity_table_name(namespace, Self::ENTITY_TYPE),
            &schema_for!(Self),
        )
    }
}

/// Implements [`Entity`] for a struct with an `id: String` field.
#[macro_export]
macro_rules! entity {
    ($entity:ty, $name:expr) => {
        impl $crate::store::Entity for $entity {
            const ENTITY_TYPE: &'static str = $name;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

/// Typed access to the entities of one subgraph.
pub struct EntityStore {
    namespace: String,
    persister: Box<dyn Persister>,
    tables: HashMap<&'static str, Arc<TableSchema>>,
}

impl EntityStore {
    pub fn new(namespace: &str, persister: Box<dyn Persister>) -> Self {
        EntityStore {
            namespace: namespace.to_string(),
            persister,
            tables: HashMap::new(),
        }
    }

    fn table<E: Entity>(&mut self) -> Arc<TableSchema> {
        let namespace = &self.namespace;
        self.tables
            .entry(E::ENTITY_TYPE)
            .or_insert_with(|| Arc::new(E::table_schema(namespace)))
            .clone()
    }

    pub async fn load<E: Entity>(&mut self, id: &str) -> Result<Option<E>> {
        let table = self.table::<E>();
        match self.persister.load(&table, id).await? {
            Some(record) => {
                let entity = E::from_record(record)
                    .with_context(|| format!("decoding {} {}", E::ENTITY_TYPE, id))?;
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    pub async fn save<E: Entity>(&mut self, entity: &E) -> Result<()> {
        let table = self.table::<E>();
        let record = entity.to_record()?;
        debug!("{}: save {} {}", self.namespace, E::ENTITY_TYPE, entity.id());
        self.persister.save(&table, entity.id(), &record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryPersister;
    use crate::util::BigInt;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct Thing {
        id: String,
        supplier_count: BigInt,
        note: Option<String>,
    }

    crate::entity!(Thing, "Thing");

    #[tokio::test]
    async fn test_load_and_save() -> anyhow::Result<()> {
        let mut store = EntityStore::new("venus", Box::new(MemoryPersister::new()));
        assert!(store.load::<Thing>("a").await?.is_none());

        let mut thing = Thing {
            id: "a".to_string(),
            supplier_count: BigInt::zero(),
            note: None,
        };
        store.save(&thing).await?;
        thing.supplier_count += 1;
        store.save(&thing).await?;

        assert_eq!(Some(thing), store.load::<Thing>("a").await?);
        Ok(())
    }

    #[test]
    fn test_record_uses_field_names() -> anyhow::Result<()> {
        let thing = Thing {
            id: "a".to_string(),
            supplier_count: BigInt::from(3),
            note: Some("n".to_string()),
        };
        let record = thing.to_record()?;
        assert_eq!(Some(&Value::from("3")), record.get("supplierCount"));
        let table = Thing::table_schema("venus");
        assert_eq!("venus_thing", table.name);
        assert_eq!(3, table.columns.len());
        Ok(())
    }
}
