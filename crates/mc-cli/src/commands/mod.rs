//! CLI command implementations

pub(crate) mod common;
pub(crate) mod get;
pub(crate) mod init;
pub(crate) mod load;
pub(crate) mod meta;
pub(crate) mod plan;
