use clap::{Arg, Command};
use venus_indexer::db::DatabaseBuilder;
use venus_indexer::subgraphs::SubgraphKind;

fn main() -> anyhow::Result<()> {
    let matches = Command::new("print_schema")
        .about("Prints the CREATE TABLE statements of a subgraph")
        .arg(
            Arg::new("subgraph")
                .required(false)
                .default_value("venus")
                .help("venus, venus-governance or isolated-pools"),
        )
        .get_matches();

    let kind: SubgraphKind = matches.value_of("subgraph").unwrap_or("venus").parse()?;
    let mut builder = DatabaseBuilder::new();
    for table in kind.tables() {
        builder.table(&table);
    }
    println!("{};", builder.sql_string());
    Ok(())
}
