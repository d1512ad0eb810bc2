use crate::subgraphs::SubgraphKind;
use clap::{Arg, ArgMatches, Command};
use std::env;
use std::fmt;

/// Runtime settings, from the command line layered over the environment.
pub struct IndexerConfig {
    pub events_file: String,
    pub subgraph: String,
    pub chain_fixture: Option<String>,
    pub postgres_backend: bool,
    pub database_url: String,
    pub create_tables: bool,
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<bool>().ok())
        .unwrap_or(default)
}

impl IndexerConfig {
    pub fn with_clap(app: Command) -> Self {
        let matches = app
            .arg(
                Arg::new("config")
                    .required(false)
                    .long("config")
                    .takes_value(true)
                    .help("Optionally sets an env file to use"),
            )
            .arg(
                Arg::new("events")
                    .required(false)
                    .long("events")
                    .takes_value(true)
                    .help("Newline-delimited JSON log events, '-' for stdin"),
            )
            .arg(
                Arg::new("subgraph")
                    .required(false)
                    .long("subgraph")
                    .takes_value(true)
                    .help("venus, venus-governance or isolated-pools"),
            )
            .arg(
                Arg::new("chain-fixture")
                    .required(false)
                    .long("chain-fixture")
                    .takes_value(true)
                    .help("JSON file with recorded contract call results"),
            )
            .arg(
                Arg::new("database-url")
                    .required(false)
                    .long("database-url")
                    .takes_value(true)
                    .help("Postgres connection URL"),
            )
            .get_matches();

        let input_file = matches.value_of("config").unwrap_or("");
        if !input_file.is_empty() {
            dotenvy::from_filename(input_file).ok();
        } else {
            dotenvy::dotenv().ok();
        }
        let mut config = Self::init();
        config.apply_matches(&matches);
        config
    }

    fn apply_matches(&mut self, matches: &ArgMatches) {
        if let Some(events) = matches.value_of("events") {
            self.events_file = events.to_string();
        }
        if let Some(subgraph) = matches.value_of("subgraph") {
            self.subgraph = subgraph.to_string();
        }
        if let Some(fixture) = matches.value_of("chain-fixture") {
            self.chain_fixture = Some(fixture.to_string());
        }
        if let Some(url) = matches.value_of("database-url") {
            self.database_url = url.to_string();
        }
    }

    fn init() -> Self {
        let events_file = env::var("EVENTS_FILE").unwrap_or_else(|_| "-".to_string());
        let subgraph = env::var("SUBGRAPH").unwrap_or_else(|_| "venus".to_string());
        let chain_fixture = env::var("CHAIN_FIXTURE").ok().filter(|path| !path.is_empty());
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://user@localhost:5432/venus".to_string());

        // Events are kept in memory unless postgres is asked for.
        let postgres_backend = env_bool("POSTGRES_PERSISTENCE", false);
        let create_tables = env_bool("CREATE_TABLES", true);

        IndexerConfig {
            events_file,
            subgraph,
            chain_fixture,
            postgres_backend,
            database_url,
            create_tables,
        }
    }

    pub fn subgraph_kind(&self) -> anyhow::Result<SubgraphKind> {
        self.subgraph.parse()
    }
}

impl fmt::Display for IndexerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IndexerConfig: events_file: {}\n\
        subgraph: {}\n\
        chain_fixture: {}\n\
        postgres_backend: {}\n\
        database_url: {}\n\
        create_tables: {}\n",
            self.events_file,
            self.subgraph,
            self.chain_fixture.as_deref().unwrap_or("<none>"),
            self.postgres_backend,
            self.database_url,
            self.create_tables
        )
    }
}
