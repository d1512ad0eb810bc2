use super::db_mapper::TableSchema;
use super::db_util::DEFAULT_ID_COLUMN_NAME;
use super::persister::{Persister, Record};
use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::{
    Alias, Expr, InsertStatement, OnConflict, Query, SelectStatement, SimpleExpr,
};
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// Persists entity records into one table per entity type.
#[derive(Debug)]
pub struct DatabasePersister {
    db: DatabaseConnection,
}

impl DatabasePersister {
    pub fn new(db: DatabaseConnection) -> Self {
        DatabasePersister { db }
    }
}

/// `INSERT … ON CONFLICT (id) DO UPDATE` for every column of the table.
pub fn upsert_statement(table: &TableSchema, record: &Record) -> Result<InsertStatement> {
    let mut columns = vec![];
    let mut values: Vec<SimpleExpr> = vec![];
    for column in &table.columns {
        columns.push(Alias::new(column.db_name()));
        values.push(column.datatype.value_with_datatype(record.get(&column.name))?.into());
    }
    let updates: Vec<Alias> = table
        .columns
        .iter()
        .filter(|column| column.name != DEFAULT_ID_COLUMN_NAME)
        .map(|column| Alias::new(column.db_name()))
        .collect();

    let mut on_conflict = OnConflict::column(Alias::new(DEFAULT_ID_COLUMN_NAME));
    if updates.is_empty() {
        on_conflict.do_nothing();
    } else {
        on_conflict.update_columns(updates);
    }

    let mut stmt = Query::insert();
    stmt.into_table(Alias::new(&table.name))
        .columns(columns)
        .values_panic(values)
        .on_conflict(on_conflict);
    Ok(stmt)
}

pub fn select_statement(table: &TableSchema, id: &str) -> SelectStatement {
    Query::select()
        .columns(table.columns.iter().map(|column| Alias::new(column.db_name())))
        .from(Alias::new(&table.name))
        .and_where(Expr::col(Alias::new(DEFAULT_ID_COLUMN_NAME)).eq(id))
        .to_owned()
}

#[async_trait]
impl Persister for DatabasePersister {
    async fn load(&self, table: &TableSchema, id: &str) -> Result<Option<Record>> {
        let builder = self.db.get_database_backend();
        let row = match self
            .db
            .query_one(builder.build(&select_statement(table, id)))
            .await?
        {
            Some(row) => row,
            None => return Ok(None),
        };
        let mut record = Record::new();
        for column in &table.columns {
            let value = column.datatype.json_from_row(&row, &column.db_name())?;
            record.insert(column.name.clone(), value);
        }
        Ok(Some(record))
    }

    async fn save(&mut self, table: &TableSchema, id: &str, record: &Record) -> Result<()> {
        debug!("saving table_name:{}, id:{}", table.name, id);
        let stmt = upsert_statement(table, record)?;
        let builder = self.db.get_database_backend();
        self.db.execute(builder.build(&stmt)).await?;
        Ok(())
    }
}
