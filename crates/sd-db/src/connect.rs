//! Driver factory: opens a database handle for a connection descriptor.

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::traits::Database;
use sd_core::ConnectionUrl;
use std::sync::Arc;

/// Credentials from the configuration surface.
///
/// File-based drivers such as DuckDB ignore them.
#[derive(Clone, Default)]
pub struct Credentials {
    /// User id for the connection
    pub userid: Option<String>,
    /// Password for the connection
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("userid", &self.userid)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

/// Open a connection for `url`.
///
/// `duckdb` is the only bundled driver; its parameters are a file path or
/// `:memory:`. Any other scheme fails with [`DbError::NotImplemented`].
pub fn connect(url: &ConnectionUrl, credentials: &Credentials) -> DbResult<Arc<dyn Database>> {
    match url.scheme() {
        "duckdb" => {
            if credentials.userid.is_some() || credentials.password.is_some() {
                log::debug!("DuckDB ignores userid/password");
            }
            let backend = DuckDbBackend::new(url.params())?;
            Ok(Arc::new(backend))
        }
        other => Err(DbError::NotImplemented {
            backend: other.to_string(),
            feature: "connection (no bundled driver)".to_string(),
        }),
    }
}
