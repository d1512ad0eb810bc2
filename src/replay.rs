use crate::chain::ChainReader;
use crate::indexing::{LogEvent, Subgraph};
use anyhow::Context;
use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;

/// Feeds newline-delimited JSON events to `subgraph` in order.
///
/// Blank lines are skipped. The first event that fails to parse or to index
/// stops the replay, reporting its line number. Returns how many events
/// were handled.
pub async fn replay_events<R>(
    subgraph: &mut Subgraph,
    chain: &dyn ChainReader,
    reader: R,
) -> anyhow::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = LinesStream::new(reader.lines());
    let mut line_number: u64 = 0;
    let mut handled: u64 = 0;
    while let Some(line) = lines.next().await {
        let line = line?;
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }
        let event: LogEvent = serde_json::from_str(&line)
            .with_context(|| format!("parsing event on line {}", line_number))?;
        debug!(
            "block {} log {}: {}",
            event.block.number,
            event.log_index,
            event.registry_key()
        );
        subgraph
            .handle_event(chain, &event)
            .await
            .with_context(|| format!("indexing {} on line {}", event.registry_key(), line_number))?;
        handled += 1;
    }
    info!("{}: replayed {} events", subgraph.name, handled);
    Ok(handled)
}
