use super::{ChainReader, MarketSnapshot, PoolData, VTokenMetadata};
use crate::util::{Address, BigInt};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A `ChainReader` answering from fixed call results.
///
/// Used to replay recorded events where the call results were captured
/// alongside them, and to mock contract calls in tests. A call without a
/// recorded result fails the same way a reverted call would.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaticChain {
    vtokens: HashMap<Address, VTokenMetadata>,
    snapshots: HashMap<Address, MarketSnapshot>,
    balances: HashMap<Address, HashMap<Address, BigInt>>,
    prices: HashMap<Address, HashMap<Address, BigInt>>,
    pools: HashMap<Address, HashMap<BigInt, PoolData>>,
}

impl StaticChain {
    pub fn new() -> Self {
        StaticChain::default()
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading chain fixture {}", path.display()))?;
        let chain: StaticChain = serde_json::from_str(&contents)
            .with_context(|| format!("parsing chain fixture {}", path.display()))?;
        debug!(
            "loaded chain fixture with {} vTokens and {} snapshots",
            chain.vtokens.len(),
            chain.snapshots.len()
        );
        Ok(chain)
    }

    pub fn set_vtoken_metadata(&mut self, vtoken: Address, metadata: VTokenMetadata) -> &mut Self {
        self.vtokens.insert(vtoken, metadata);
        self
    }

    pub fn set_market_snapshot(&mut self, vtoken: Address, snapshot: MarketSnapshot) -> &mut Self {
        self.snapshots.insert(vtoken, snapshot);
        self
    }

    pub fn set_balance(&mut self, vtoken: Address, account: Address, balance: BigInt) -> &mut Self {
        self.balances
            .entry(vtoken)
            .or_insert_with(HashMap::new)
            .insert(account, balance);
        self
    }

    pub fn set_underlying_price(
        &mut self,
        oracle: Address,
        vtoken: Address,
        price: BigInt,
    ) -> &mut Self {
        self.prices
            .entry(oracle)
            .or_insert_with(HashMap::new)
            .insert(vtoken, price);
        self
    }

    pub fn set_pool(&mut self, registry: Address, index: BigInt, pool: PoolData) -> &mut Self {
        self.pools
            .entry(registry)
            .or_insert_with(HashMap::new)
            .insert(index, pool);
        self
    }
}

#[async_trait]
impl ChainReader for StaticChain {
    async fn vtoken_metadata(&self, vtoken: &Address) -> Result<VTokenMetadata> {
        self.vtokens
            .get(vtoken)
            .cloned()
            .ok_or_else(|| anyhow!("no vToken metadata for {}", vtoken))
    }

    async fn market_snapshot(&self, vtoken: &Address) -> Result<MarketSnapshot> {
        self.snapshots
            .get(vtoken)
            .cloned()
            .ok_or_else(|| anyhow!("no market snapshot for {}", vtoken))
    }

    async fn balance_of(&self, vtoken: &Address, account: &Address) -> Result<BigInt> {
        self.balances
            .get(vtoken)
            .and_then(|balances| balances.get(account))
            .cloned()
            .ok_or_else(|| anyhow!("no balanceOf({}) result for {}", account, vtoken))
    }

    async fn underlying_price(&self, oracle: &Address, vtoken: &Address) -> Result<BigInt> {
        self.prices
            .get(oracle)
            .and_then(|prices| prices.get(vtoken))
            .cloned()
            .ok_or_else(|| {
                anyhow!("no getUnderlyingPrice({}) result for oracle {}", vtoken, oracle)
            })
    }

    async fn pool_by_id(&self, registry: &Address, index: &BigInt) -> Result<PoolData> {
        self.pools
            .get(registry)
            .and_then(|pools| pools.get(index))
            .cloned()
            .ok_or_else(|| anyhow!("no getPoolByID({}) result for registry {}", index, registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_json() -> anyhow::Result<()> {
        let fixture = serde_json::json!({
            "balances": {
                "0x0000000000000000000000000000000000000aaa": {
                    "0x0000000000000000000000000000000000000101": "10"
                }
            },
            "snapshots": {
                "0x0000000000000000000000000000000000000aaa": {
                    "accrualBlockNumber": 999,
                    "exchangeRateMantissa": "365045823500000000000000"
                }
            }
        });
        let chain: StaticChain = serde_json::from_value(fixture)?;
        let vtoken: Address = "0x0000000000000000000000000000000000000aaa".parse()?;
        let account: Address = "0x0000000000000000000000000000000000000101".parse()?;
        assert_eq!(BigInt::from(10), chain.balance_of(&vtoken, &account).await?);
        let snapshot = chain.market_snapshot(&vtoken).await?;
        assert_eq!(Some(999), snapshot.accrual_block_number);
        assert_eq!(None, snapshot.cash_mantissa);
        assert!(chain.vtoken_metadata(&vtoken).await.is_err());
        Ok(())
    }
}
