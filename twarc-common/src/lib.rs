//! # twarc Common Library
//!
//! Shared code for the twarc crates including:
//! - Archive access (trait plus in-memory and directory-backed implementations)
//! - Archive date parsing
//! - Configuration loading
//! - Logging bootstrap

pub mod archive;
pub mod config;
pub mod error;
pub mod logging;
pub mod time;

pub use archive::{ArchiveAccessor, ArchiveError, DirArchive, MemoryArchive};
pub use error::{Error, Result};
