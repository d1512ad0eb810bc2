use clap::Command;
use env_logger::Env;
use log::info;
use sea_orm::Database;
use tokio::io::{AsyncBufRead, BufReader};
use venus_indexer::chain::StaticChain;
use venus_indexer::config::IndexerConfig;
use venus_indexer::db::{DatabaseBuilder, DatabasePersister, MemoryPersister, Persister};
use venus_indexer::replay::replay_events;

async fn open_events(path: &str) -> anyhow::Result<Box<dyn AsyncBufRead + Unpin>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }
    let file = tokio::fs::File::open(path).await?;
    Ok(Box::new(BufReader::new(file)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = Command::new("Venus Indexer")
        .version("0.1.0")
        .about("Indexes Venus protocol events into entity tables");
    let config = IndexerConfig::with_clap(app);

    let env = Env::default()
        .filter_or("INDEXER_LOG_LEVEL", "info")
        .write_style_or("INDEXER_LOG_STYLE", "always");
    env_logger::init_from_env(env);

    info!("{}", config);
    let kind = config.subgraph_kind()?;

    let persister: Box<dyn Persister> = if config.postgres_backend {
        let db = Database::connect(config.database_url.as_str()).await?;
        if config.create_tables {
            let mut builder = DatabaseBuilder::new();
            for table in kind.tables() {
                builder.table(&table);
            }
            builder.create_tables(&db).await?;
        }
        Box::new(DatabasePersister::new(db))
    } else {
        Box::new(MemoryPersister::new())
    };

    let chain = match &config.chain_fixture {
        Some(path) => StaticChain::from_file(path).await?,
        None => StaticChain::new(),
    };

    let mut subgraph = kind.build(persister);
    let events = open_events(&config.events_file).await?;
    replay_events(&mut subgraph, &chain, events).await?;
    Ok(())
}
