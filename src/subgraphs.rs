use crate::db::{Persister, TableSchema};
use crate::indexing::Subgraph;
use crate::{governance, isolated_pools, venus};
use anyhow::anyhow;
use std::fmt;
use std::str::FromStr;

/// The subgraphs this indexer can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubgraphKind {
    Venus,
    Governance,
    IsolatedPools,
}

impl SubgraphKind {
    pub fn namespace(&self) -> &'static str {
        match self {
            SubgraphKind::Venus => venus::NAMESPACE,
            SubgraphKind::Governance => governance::NAMESPACE,
            SubgraphKind::IsolatedPools => isolated_pools::NAMESPACE,
        }
    }

    pub fn build(&self, persister: Box<dyn Persister>) -> Subgraph {
        match self {
            SubgraphKind::Venus => venus::subgraph(persister),
            SubgraphKind::Governance => governance::subgraph(persister),
            SubgraphKind::IsolatedPools => isolated_pools::subgraph(persister),
        }
    }

    pub fn tables(&self) -> Vec<TableSchema> {
        match self {
            SubgraphKind::Venus => venus::tables(),
            SubgraphKind::Governance => governance::tables(),
            SubgraphKind::IsolatedPools => isolated_pools::tables(),
        }
    }
}

impl FromStr for SubgraphKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            venus::NAMESPACE => Ok(SubgraphKind::Venus),
            governance::NAMESPACE => Ok(SubgraphKind::Governance),
            isolated_pools::NAMESPACE => Ok(SubgraphKind::IsolatedPools),
            other => Err(anyhow!(
                "unknown subgraph {}, expected one of {}, {}, {}",
                other,
                venus::NAMESPACE,
                governance::NAMESPACE,
                isolated_pools::NAMESPACE
            )),
        }
    }
}

impl fmt::Display for SubgraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.namespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryPersister;

    #[test]
    fn test_parse_subgraph_kind() {
        assert_eq!(SubgraphKind::Venus, "venus".parse().unwrap());
        assert_eq!(
            SubgraphKind::IsolatedPools,
            "isolated-pools".parse().unwrap()
        );
        assert!("compound".parse::<SubgraphKind>().is_err());
    }

    #[test]
    fn test_build_subgraphs() {
        for kind in [
            SubgraphKind::Venus,
            SubgraphKind::Governance,
            SubgraphKind::IsolatedPools,
        ] {
            let subgraph = kind.build(Box::new(MemoryPersister::new()));
            assert_eq!(kind.namespace(), subgraph.name);
            assert!(subgraph.registry.keys().next().is_some());
            assert!(!kind.tables().is_empty());
        }
    }

    #[test]
    fn test_table_names_are_namespaced() {
        let tables = SubgraphKind::Governance.tables();
        assert!(tables.iter().any(|table| table.name == "venus_governance_proposal"));
    }
}
