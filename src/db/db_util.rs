use convert_case::{Case, Casing};

pub static DEFAULT_ID_COLUMN_NAME: &str = "id";

fn db_normalize(input: &str) -> String {
    input.to_case(Case::Snake)
}

pub fn db_table_name(input_name: &str) -> String {
    db_normalize(input_name)
}

pub fn db_column_name(input_name: &str) -> String {
    db_normalize(input_name)
}

/// Table holding `entity_type` records of the subgraph `namespace`.
pub fn entity_table_name(namespace: &str, entity_type: &str) -> String {
    db_table_name(&format!("{}_{}", namespace, entity_type))
}

#[test]
fn test_names() {
    assert_eq!("venus_account_v_token", entity_table_name("venus", "AccountVToken"));
    assert_eq!(
        "isolated_pools_market",
        entity_table_name("isolated-pools", "Market")
    );
    assert_eq!("total_xvs_distributed_mantissa", db_column_name("totalXvsDistributedMantissa"));
}
