use super::db_mapper::{ColumnSchema, Datatype, TableSchema};
use super::db_util::DEFAULT_ID_COLUMN_NAME;
use log::info;
use sea_orm::sea_query::{Alias, ColumnDef, PostgresQueryBuilder, Table, TableCreateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    tables: BTreeMap<String, TableCreateStatement>,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        DatabaseBuilder {
            tables: BTreeMap::new(),
        }
    }

    pub fn column_def(column: &ColumnSchema) -> ColumnDef {
        let mut def = ColumnDef::new(Alias::new(column.db_name()));
        match column.datatype {
            Datatype::Int => def.big_integer(),
            Datatype::String => def.text(),
            Datatype::Bool => def.boolean(),
            Datatype::Json => def.json_binary(),
        };
        if !column.nullable {
            def.not_null();
        }
        if column.name == DEFAULT_ID_COLUMN_NAME {
            def.primary_key();
        }
        def
    }

    /// Adds (or replaces) the create statement for `schema`.
    pub fn table(&mut self, schema: &TableSchema) -> &TableCreateStatement {
        let mut statement = Table::create();
        statement.table(Alias::new(&schema.name)).if_not_exists();
        for column in &schema.columns {
            statement.col(&mut Self::column_def(column));
        }
        self.tables.insert(schema.name.clone(), statement);
        &self.tables[&schema.name]
    }

    /// Use the table definitions to physically build the database.
    pub async fn create_tables(&self, seaql_db: &DatabaseConnection) -> anyhow::Result<()> {
        let builder = seaql_db.get_database_backend();
        for (table_name, table_def) in self.tables.iter() {
            info!("creating table {}", table_name);
            seaql_db.execute(builder.build(table_def)).await?;
        }
        Ok(())
    }

    /// Human-readable SQL string for all definitions in this builder.
    pub fn sql_string(&self) -> String {
        self.tables
            .values()
            .map(|table_def| table_def.to_string(PostgresQueryBuilder))
            .collect::<Vec<_>>()
            .join(";\n")
    }
}
