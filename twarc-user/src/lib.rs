//! twarc-user: account metadata engine
//!
//! Merges the account-metadata categories of a personal-data export archive
//! into one queryable [`UserData`] record.
//!
//! - [`extractors`] - one fault-isolated extractor per archive category
//! - [`aggregator`] - runs the extractors and assembles the record
//! - [`record`] - the merged record and its read surface
//! - [`snapshot`] - `dump` / `load_part` persistence contract
//! - [`types`] - normalized category types
//!
//! ```rust,ignore
//! use twarc_common::DirArchive;
//! use twarc_user::UserData;
//!
//! let archive = DirArchive::new("/path/to/export");
//! let user = UserData::from_archive(&archive).await;
//! println!("{:?}", user.email_address());
//!
//! let json = serde_json::to_string(&user.dump())?;
//! let restored = UserData::from_part(serde_json::from_str(&json)?)?;
//! ```

pub mod aggregator;
pub mod extractors;
pub mod record;
pub mod snapshot;
pub mod types;

pub use aggregator::{AggregationReport, Aggregator};
pub use record::UserData;
pub use snapshot::{DateValue, UserLoadObject, UserSnapshot};
