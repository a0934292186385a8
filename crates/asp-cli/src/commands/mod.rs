//! Command implementations for the `asp` CLI.

mod config_init;
mod prove;
mod tree_root;

use std::path::Path;

use asp_core::schema::config::{HashFunctionName, TreeConfig};
use asp_core::schema::event::PoolEvent;
use asp_nmt::{NamespaceGrouping, event_record};
use eyre::{Context as _, ensure};
use serde::Serialize;
use tracing::info;

pub use self::config_init::config_init;
pub use self::prove::prove;
pub use self::tree_root::tree_root;

/// Read the tree configuration, falling back to defaults when no file is given.
async fn load_config(
    config_file: Option<&Path>,
    hash_function: Option<HashFunctionName>,
) -> eyre::Result<TreeConfig> {
    let mut config = match config_file {
        Some(path) => {
            let contents = tokio::fs::read_to_string(path).await.with_context(|| {
                format!("Failed to read tree configuration {}", path.display())
            })?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid tree configuration {}", path.display()))?
        }
        None => TreeConfig::default(),
    };
    if let Some(name) = hash_function {
        config.hash_function = name;
    }
    Ok(config)
}

/// Read a JSON array of events and group their records by sender.
async fn load_events(events_file: &Path, config: &TreeConfig) -> eyre::Result<NamespaceGrouping> {
    let contents = tokio::fs::read_to_string(events_file)
        .await
        .with_context(|| format!("Failed to read events file {}", events_file.display()))?;
    let events: Vec<PoolEvent> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid events file {}", events_file.display()))?;
    ensure!(
        !events.is_empty(),
        "Events file {} holds no events",
        events_file.display()
    );

    let mut grouping = NamespaceGrouping::new(config.namespace_size());
    for (position, event) in events.iter().enumerate() {
        let record =
            event_record(event).with_context(|| format!("Event {position} cannot be hashed"))?;
        grouping
            .push(record)
            .with_context(|| format!("Event {position} does not fit the tree"))?;
    }
    info!(
        events = events.len(),
        namespaces = grouping.len(),
        "Loaded events"
    );
    Ok(grouping)
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(file = ?path, "Written");
    Ok(())
}
