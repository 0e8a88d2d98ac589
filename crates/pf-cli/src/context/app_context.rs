use anyhow::Context;
use pf_config::ForgeConfig;
use pf_core::{FileStore, History, Store};
use pf_engine::Engine;
use pf_schema::RegistrySnapshot;
use pf_schema::safety::check_import_hazards;

/// Store key holding the persisted schema registry snapshot.
pub const REGISTRY_KEY: &str = "registry";

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: ForgeConfig,
    pub engine: Engine,
    pub store: FileStore,
    pub history: History,
}

impl AppContext {
    /// Open the data directory, seed the engine, and load any persisted
    /// registry snapshot and history.
    pub fn init(config: ForgeConfig) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.storage.data_dir).with_context(|| {
            format!("failed to open data directory {}", config.storage.data_dir)
        })?;

        let mut engine =
            Engine::new(config.generation.clone()).context("failed to seed prompt engine")?;

        if let Some(raw) = store.get(REGISTRY_KEY)? {
            let snapshot: RegistrySnapshot =
                serde_json::from_str(&raw).context("persisted registry snapshot is corrupt")?;
            let count = restore_registry(&mut engine, snapshot)
                .context("failed to restore persisted schema registry")?;
            tracing::debug!(count, "restored schema registry");
        }

        let history = History::load(&store, config.generation.history_limit)
            .context("failed to load generation history")?;

        Ok(Self {
            config,
            engine,
            store,
            history,
        })
    }

    /// Persist the current registry so later runs see imported or
    /// registered schemas.
    pub fn save_registry(&mut self) -> anyhow::Result<()> {
        let snapshot = self.engine.registry().export_registry();
        let raw = serde_json::to_string_pretty(&snapshot)?;
        self.store.set(REGISTRY_KEY, &raw)?;
        Ok(())
    }

    pub fn save_history(&mut self) -> anyhow::Result<()> {
        self.history
            .save(&mut self.store)
            .context("failed to save generation history")
    }
}

/// Add persisted entries the freshly seeded registry lacks. Seeded
/// (name, version) pairs always win over their persisted copies.
fn restore_registry(engine: &mut Engine, snapshot: RegistrySnapshot) -> anyhow::Result<usize> {
    let mut restored = 0;
    for entry in snapshot.entries {
        if engine
            .registry()
            .get_schema(&entry.name, &entry.version)
            .is_some()
        {
            continue;
        }
        let report = check_import_hazards(&entry.schema);
        if !report.accepted {
            anyhow::bail!(
                "{}@{}: {}",
                entry.name,
                entry.version,
                report.reasons.join("; ")
            );
        }
        engine.registry_mut().register_entry(entry)?;
        restored += 1;
    }
    Ok(restored)
}
