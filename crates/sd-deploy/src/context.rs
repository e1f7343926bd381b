//! Run context: everything a deployment run computes once up front.

use crate::changelog;
use crate::error::DeployResult;
use sd_core::{
    last_applied, list_changes, select, AppliedSet, ChangeCatalog, ChangeFile, DeltaSet,
    DeployConfig, DialectRegistry, SelectionPolicy, TimestampSyntax,
};
use sd_db::{connect, Credentials, Database};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-run settings taken from the merged configuration.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub delta_set: DeltaSet,
    pub policy: SelectionPolicy,
    /// Command prefix used to run each script
    pub command: String,
    pub script_dir: PathBuf,
}

impl RunSettings {
    /// Derive settings from `config`, resolving the script directory
    /// against `root`.
    pub fn from_config(config: &DeployConfig, root: &Path) -> Self {
        Self {
            delta_set: config.delta_set.clone(),
            policy: config.policy(),
            command: config.command().to_string(),
            script_dir: config.dir_absolute(root),
        }
    }
}

/// Resolve the dialect for `config` and open the database.
///
/// The dialect is resolved first so an unsupported scheme fails before any
/// connection attempt.
pub fn open_database(
    config: &DeployConfig,
    registry: &DialectRegistry,
) -> DeployResult<(Arc<dyn Database>, Arc<dyn TimestampSyntax>)> {
    config.validate()?;
    let url = config.connection_url()?;
    let syntax = registry.resolve(url.scheme())?;

    let credentials = Credentials {
        userid: config.userid.clone(),
        password: config.password.clone(),
    };
    let db = connect(&url, &credentials)?;
    log::debug!("Connected to {} ({})", url.scheme(), db.db_type());
    Ok((db, syntax))
}

/// State shared by every step of one run.
///
/// The applied set and the selection are computed once in
/// [`prepare`](Self::prepare); changelog writes made later in the same run
/// do not change them.
pub struct DeployContext {
    pub settings: RunSettings,
    db: Arc<dyn Database>,
    timestamp: String,
    pub catalog: ChangeCatalog,
    pub applied: AppliedSet,
    pub last_applied: i64,
    pub selection: Vec<ChangeFile>,
}

impl std::fmt::Debug for DeployContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployContext")
            .field("settings", &self.settings)
            .field("timestamp", &self.timestamp)
            .field("last_applied", &self.last_applied)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl DeployContext {
    /// Read the changelog, scan the script directory, and select changes.
    pub async fn prepare(
        settings: RunSettings,
        db: Arc<dyn Database>,
        syntax: &dyn TimestampSyntax,
    ) -> DeployResult<Self> {
        let timestamp = syntax.current_timestamp_literal();

        let applied = changelog::applied_change_numbers(db.as_ref(), &settings.delta_set).await?;
        let last = last_applied(&applied);

        let catalog = list_changes(&settings.script_dir)?;
        let selection = select(settings.policy, &catalog, &applied, last);

        log::debug!(
            "delta_set {}: {} script(s) on disk, {} applied, {} selected ({})",
            settings.delta_set,
            catalog.len(),
            applied.len(),
            selection.len(),
            settings.policy
        );

        Ok(Self {
            settings,
            db,
            timestamp,
            catalog,
            applied,
            last_applied: last,
            selection,
        })
    }

    /// Open the database described by `config` and prepare a run.
    pub async fn open(
        config: &DeployConfig,
        root: &Path,
        registry: &DialectRegistry,
    ) -> DeployResult<Self> {
        let (db, syntax) = open_database(config, registry)?;
        Self::prepare(RunSettings::from_config(config, root), db, syntax.as_ref()).await
    }

    /// Shared database handle
    pub fn db(&self) -> &dyn Database {
        self.db.as_ref()
    }

    /// Dialect timestamp expression embedded in changelog writes
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Change numbers selected for this run
    pub fn selected_numbers(&self) -> Vec<i64> {
        self.selection.iter().map(|c| c.change_number).collect()
    }
}
