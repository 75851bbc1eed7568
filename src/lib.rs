pub mod cli;
pub mod config;
pub mod document;
pub mod domain;
pub mod error;
pub mod identity;
pub mod manifest;
pub mod spdx;
pub mod ui;
pub mod warning;

pub use error::{InfoSyncError, Result};
