// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — initialises the catalogue store and provides
// methods for the Dioxus UI to call.
//
// The rusqlite-backed store is `Send` but not `Sync`, so it is wrapped in
// `Arc<Mutex<>>` for safe sharing across the Dioxus task pool.  Mutex
// contention is minimal because all operations are fast (sub-millisecond
// SQLite queries); only CSV import runs long enough to move off the UI
// thread.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::info;

use kartei_catalog::import::{ImportReport, import_csv_file};
use kartei_catalog::search::SearchQuery;
use kartei_catalog::store::CatalogStore;
use kartei_core::AppConfig;
use kartei_core::error::{KarteiError, Result};
use kartei_core::types::ProjectRecord;

use super::data_dir;

/// Settings key for the banner text shown above the results.
const SESSION_TEXT_KEY: &str = "session_text";

/// Banner text before anyone has edited it.
const DEFAULT_SESSION_TEXT: &str = "Data updated up to Sesi Jun 2025";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// All fields are cheaply cloneable (Arc-wrapped) so that the struct can be
/// passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<Mutex<CatalogStore>>,
    config: Arc<Mutex<AppConfig>>,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise all services.  Call once at app startup.
    ///
    /// Creates the data directory and opens the catalogue database.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let store = CatalogStore::open(dir.join("catalog.db"))?;

        // Load persisted config or use defaults
        let config = load_config(&dir).unwrap_or_default();

        info!("app services initialised");

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(Mutex::new(config)),
            data_dir: dir,
        })
    }

    /// In-memory fallback when the data directory is unusable.  The
    /// catalogue starts empty and nothing persists.
    pub fn fallback() -> Result<Self> {
        let store = CatalogStore::open_in_memory()?;
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(Mutex::new(AppConfig::default())),
            data_dir: std::env::temp_dir(),
        })
    }

    // -- Catalogue -----------------------------------------------------------

    /// Run a search over the catalogue.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<ProjectRecord>> {
        let store = self.store.lock().expect("store lock poisoned");
        store.search(query)
    }

    /// The whole catalogue, newest year first.
    pub fn all_records(&self) -> Result<Vec<ProjectRecord>> {
        let store = self.store.lock().expect("store lock poisoned");
        store.all_records()
    }

    /// Distinct years for the filter dropdown.
    pub fn distinct_years(&self) -> Result<Vec<String>> {
        let store = self.store.lock().expect("store lock poisoned");
        store.distinct_years()
    }

    /// Total record count.
    pub fn record_count(&self) -> Result<u64> {
        let store = self.store.lock().expect("store lock poisoned");
        store.record_count()
    }

    /// Import a CSV file into the catalogue off the UI thread.
    pub async fn import_csv(&self, path: PathBuf) -> Result<ImportReport> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let mut guard = store.lock().expect("store lock poisoned");
            import_csv_file(&mut guard, &path)
        })
        .await
        .map_err(|e| KarteiError::CsvImport(format!("import task failed: {e}")))?
    }

    // -- Settings ------------------------------------------------------------

    /// The session label shown above the results.
    pub fn session_text(&self) -> Result<String> {
        let store = self.store.lock().expect("store lock poisoned");
        store.get_setting(SESSION_TEXT_KEY, DEFAULT_SESSION_TEXT)
    }

    /// Update the session label.
    pub fn set_session_text(&self, text: &str) -> Result<()> {
        let store = self.store.lock().expect("store lock poisoned");
        store.set_setting(SESSION_TEXT_KEY, text)
    }

    // -- Config Persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().expect("config lock poisoned") = config.clone();
        persist_config(&self.data_dir, config)
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
