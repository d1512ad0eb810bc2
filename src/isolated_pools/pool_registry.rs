use super::entities::Pool;
use super::events::{PoolNameSet, PoolRegistered};
use super::operations::create_pool;
use super::{POOL_REGISTRY_DATA_SOURCE, POOL_TEMPLATE};
use crate::indexing::{HandlerContext, Indexer, LogEvent, RegistryKey};
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::slice::Iter;

const POOL_REGISTRY_EVENTS: &[&str] = &["PoolRegistered", "PoolNameSet"];

pub struct PoolRegistryIndexer {
    registry_keys: Vec<RegistryKey>,
}

impl Default for PoolRegistryIndexer {
    fn default() -> Self {
        PoolRegistryIndexer {
            registry_keys: POOL_REGISTRY_EVENTS
                .iter()
                .map(|name| RegistryKey::for_event(POOL_REGISTRY_DATA_SOURCE, name))
                .collect(),
        }
    }
}

#[async_trait]
impl Indexer for PoolRegistryIndexer {
    async fn index(&self, ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
        match event.name.as_str() {
            "PoolRegistered" => handle_pool_registered(ctx, event).await,
            "PoolNameSet" => handle_pool_name_set(ctx, event).await,
            other => {
                debug!("pool registry: ignoring {}", other);
                Ok(())
            }
        }
    }

    fn id(&self) -> String {
        POOL_REGISTRY_DATA_SOURCE.to_string()
    }

    fn registry_keys(&self) -> Iter<RegistryKey> {
        self.registry_keys.iter()
    }
}

pub async fn handle_pool_registered(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: PoolRegistered = event.decode()?;
    ctx.templates.create(POOL_TEMPLATE, &params.comptroller);
    let pool = create_pool(ctx.store, &params.comptroller, params.pool).await?;
    info!("registered pool {} ({})", pool.id, pool.name);
    Ok(())
}

/// The event only carries the pool index, so the comptroller is looked up
/// through the registry.
pub async fn handle_pool_name_set(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: PoolNameSet = event.decode()?;
    let data = ctx
        .chain
        .pool_by_id(&event.address, &params.index)
        .await
        .with_context(|| format!("resolving pool {}", params.index))?;
    match ctx.store.load::<Pool>(data.comptroller.as_str()).await? {
        Some(mut pool) => {
            pool.name = params.name;
            ctx.store.save(&pool).await
        }
        None => {
            debug!("PoolNameSet: pool {} not found", data.comptroller);
            Ok(())
        }
    }
}
