pub mod attempts;
pub mod auto_sync;
pub mod common;
pub mod completions;
pub mod session;
pub mod status;
pub mod transfer;
