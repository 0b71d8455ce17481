//! Command handlers, one module per command group.

pub mod init;
pub mod maintenance;
pub mod misc;
pub mod models;
