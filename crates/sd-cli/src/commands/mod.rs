//! CLI command implementations

pub(crate) mod common;
pub(crate) mod deploy;
pub(crate) mod init;
pub(crate) mod status;
