use sea_orm::sea_query::TableCreateStatement;
use sqlparser::ast::{ColumnDef, Statement};
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;
use std::collections::HashSet;

/// Compares two CREATE TABLE statements for semantic equivalence, even if
/// columns are ordered differently.
/// Arguments
/// * `lhs` - a sql string
/// * `rhs` - a different sql string.
pub fn is_sql_equivalent(lhs: &str, rhs: &str) -> bool {
    let dialect = PostgreSqlDialect {};

    let built_ast = &Parser::parse_sql(&dialect, lhs).unwrap()[0];
    let expected_ast = &Parser::parse_sql(&dialect, rhs).unwrap()[0];

    if let (
        Statement::CreateTable { columns: built, .. },
        Statement::CreateTable {
            columns: expected, ..
        },
    ) = (built_ast, expected_ast)
    {
        let built_columns = HashSet::<ColumnDef>::from_iter(built.iter().cloned());
        let expected_columns = HashSet::<ColumnDef>::from_iter(expected.iter().cloned());
        if built_columns != expected_columns {
            println!(
                "sql mismatch:\n{:#?}",
                expected_columns.symmetric_difference(&built_columns)
            );
            return false;
        }
        return true;
    }
    eprintln!("Don't know how to check {:#?}", built_ast);
    false
}

pub fn compare_table_create_statements(built_statement: &TableCreateStatement, expected_sql: &str) {
    use sea_orm::DbBackend;
    let db_postgres = DbBackend::Postgres;
    let built_sql = db_postgres.build(built_statement).to_string();
    let sql_equivalent = is_sql_equivalent(expected_sql, &built_sql);
    if !sql_equivalent {
        eprintln!(
            "SQL mismatch. Expected:\n{}\nReceived:\n{}",
            expected_sql, &built_sql
        );
    }
    assert!(sql_equivalent);
}
