//! stylua-ls: editor integration for the StyLua Lua formatter.
//!
//! The formatter itself lives in the external `stylua` binary. This crate
//! manages that binary (release resolution, download, version
//! reconciliation), decides which files to skip via `.styluaignore`, and
//! pipes document text through the binary - from an LSP server for editors,
//! or from the CLI.

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod ignore_filter;
pub mod install;
pub mod invoke;
pub mod lsp;
pub mod platform;
pub mod reconcile;
pub mod release;
pub mod version;

pub use error::{Error, Result};
