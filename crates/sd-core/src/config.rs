//! Configuration types and parsing for scriptdeploy.yml

use crate::connection_url::ConnectionUrl;
use crate::delta_set::DeltaSet;
use crate::error::{CoreError, CoreResult};
use crate::selection::SelectionPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Delta-set used when none is configured
pub const DEFAULT_DELTA_SET: &str = "Main";

/// Interpreter used to run scripts when no custom command is configured
pub const DEFAULT_COMMAND: &str = "php";

/// Width of the `delta_set` changelog column
pub const MAX_DELTA_SET_LEN: usize = 10;

const DEFAULT_SCRIPT_DIR: &str = "scripts";

/// Config file names searched in the project directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["scriptdeploy.yml", "scriptdeploy.yaml"];

/// Deployment configuration from scriptdeploy.yml, merged with CLI overrides
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// Connection descriptor (`scheme:parameters`)
    #[serde(default)]
    pub url: Option<String>,

    /// User id for the database connection
    #[serde(default)]
    pub userid: Option<String>,

    /// Password for the database connection
    #[serde(default)]
    pub password: Option<String>,

    /// Directory holding the numbered scripts
    #[serde(default = "default_script_dir")]
    pub dir: String,

    /// Changelog partition to read and write
    #[serde(default)]
    pub delta_set: DeltaSet,

    /// Apply every unapplied script instead of only those above the last one
    #[serde(default)]
    pub checkall: bool,

    /// Command used to run each script instead of the default interpreter
    #[serde(default)]
    pub custom_command: Option<String>,
}

impl std::fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployConfig")
            .field("url", &self.url)
            .field("userid", &self.userid)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("dir", &self.dir)
            .field("delta_set", &self.delta_set)
            .field("checkall", &self.checkall)
            .field("custom_command", &self.custom_command)
            .finish()
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            url: None,
            userid: None,
            password: None,
            dir: default_script_dir(),
            delta_set: DeltaSet::default(),
            checkall: false,
            custom_command: None,
        }
    }
}

fn default_script_dir() -> String {
    DEFAULT_SCRIPT_DIR.to_string()
}

impl DeployConfig {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: DeployConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Locate a config file in `dir`, if one exists
    pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Load configuration from a project directory
    /// Looks for scriptdeploy.yml or scriptdeploy.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Validate the merged configuration before a run
    pub fn validate(&self) -> CoreResult<()> {
        match self.url.as_deref() {
            None | Some("") => {
                return Err(CoreError::ConfigInvalid {
                    message: "A database url is required (e.g. 'duckdb:deploy.duckdb')"
                        .to_string(),
                });
            }
            Some(url) => {
                ConnectionUrl::parse(url)?;
            }
        }

        if self.delta_set.chars().count() > MAX_DELTA_SET_LEN {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "delta_set '{}' is longer than {} characters",
                    self.delta_set, MAX_DELTA_SET_LEN
                ),
            });
        }

        if self.dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Script directory cannot be empty".to_string(),
            });
        }

        if let Some(cmd) = &self.custom_command {
            if cmd.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "custom_command cannot be blank; omit it to use the default"
                        .to_string(),
                });
            }
        }

        Ok(())
    }

    /// Parsed connection descriptor
    pub fn connection_url(&self) -> CoreResult<ConnectionUrl> {
        let url = self.url.as_deref().unwrap_or_default();
        ConnectionUrl::parse(url)
    }

    /// Selection policy implied by `checkall`
    pub fn policy(&self) -> SelectionPolicy {
        SelectionPolicy::from_checkall(self.checkall)
    }

    /// Command prefix used to invoke each script
    pub fn command(&self) -> &str {
        self.custom_command.as_deref().unwrap_or(DEFAULT_COMMAND)
    }

    /// Script directory resolved against the project root
    pub fn dir_absolute(&self, root: &Path) -> PathBuf {
        let dir = Path::new(&self.dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            root.join(dir)
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
