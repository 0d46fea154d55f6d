//! Per-category field extractors
//!
//! One extractor per archive category. Each pulls a raw JSON shape from the
//! [`ArchiveAccessor`], normalizes it into a typed value, and falls back to the
//! category default on any failure.
//!
//! # Fault isolation
//! Missing files, unparsable files, storage failures and shape mismatches are
//! all treated the same way at the extractor boundary: the category default is
//! substituted and a warning is logged. None of them can fail the aggregation.
//! The outcome is kept in [`Extracted::outcome`] for diagnostics only.
//!
//! # Extractors
//! 1. **age** - `ageinfo.js`
//! 2. **screen_name_history** - `screen-name-change.js`
//! 3. **protected_history** - `protected-history.js`
//! 4. **creation_ip** - `account-creation-ip.js`
//! 5. **timezone** - `account-timezone.js`
//! 6. **connected_applications** - `connected-application.js`
//! 7. **email_address_changes** - `email-address-change.js`
//! 8. **login_ips** - `ip-audit.js`
//! 9. **devices** - `ni-devices.js`
//! 10. **verified** - `verified.js`
//! 11. **phone_number** - `phone-number.js`
//! 12. **personalization** - `personalization.js` (runs after age)

pub mod account;
pub mod age;
pub mod applications;
pub mod devices;
pub mod history;
pub mod personalization;

pub use account::{CreationIpExtractor, PhoneNumberExtractor, TimezoneExtractor, VerifiedExtractor};
pub use age::{parse_age, AgeExtractor, AGE_FALLBACK};
pub use applications::ConnectedApplicationsExtractor;
pub use devices::DevicesExtractor;
pub use history::{
    EmailAddressChangesExtractor, LoginIpsExtractor, ProtectedHistoryExtractor,
    ScreenNameHistoryExtractor,
};
pub use personalization::{PersonalizationExtract, PersonalizationExtractor};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use twarc_common::{ArchiveAccessor, ArchiveError};

/// Why a category could not be extracted
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Accessor could not produce the file (absent, unparsable, I/O)
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// File content does not have the expected shape
    #[error("Unexpected shape: {0}")]
    Shape(String),

    /// A date inside the file could not be parsed
    #[error("Date error: {0}")]
    Date(#[from] twarc_common::Error),
}

impl From<serde_json::Error> for ExtractionError {
    fn from(e: serde_json::Error) -> Self {
        ExtractionError::Shape(e.to_string())
    }
}

/// One archive category extractor
///
/// `normalize` is pure: the shared runner does the fetching, so every
/// extractor gets identical fault isolation.
pub trait FieldExtractor: Send + Sync {
    /// Normalized value produced for the user record
    type Output: Send;

    /// Extractor name for logs and reports
    fn name(&self) -> &'static str;

    /// Archive file this extractor reads
    fn category(&self) -> &'static str;

    /// Turn the parsed file content into the normalized value
    fn normalize(&self, raw: Value) -> Result<Self::Output, ExtractionError>;

    /// Category default, substituted on any failure
    fn fallback(&self) -> Self::Output;
}

/// Whether a category was extracted or defaulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Extracted,
    Defaulted { reason: String },
}

impl ExtractionOutcome {
    pub fn is_extracted(&self) -> bool {
        matches!(self, ExtractionOutcome::Extracted)
    }
}

/// Value produced by one extractor run, with diagnostics
#[derive(Debug, Clone)]
pub struct Extracted<T> {
    pub extractor: &'static str,
    pub category: &'static str,
    pub value: T,
    pub outcome: ExtractionOutcome,
}

/// Run one extractor against the archive, substituting its default on failure
pub async fn extract_isolated<E>(extractor: &E, archive: &dyn ArchiveAccessor) -> Extracted<E::Output>
where
    E: FieldExtractor + ?Sized,
{
    let name = extractor.name();
    let category = extractor.category();

    let result = match archive.get_file(category).await {
        Ok(raw) => extractor.normalize(raw),
        Err(e) => Err(ExtractionError::from(e)),
    };

    match result {
        Ok(value) => {
            debug!(extractor = name, category, "Extraction successful");
            Extracted {
                extractor: name,
                category,
                value,
                outcome: ExtractionOutcome::Extracted,
            }
        }
        Err(e) => {
            warn!(
                extractor = name,
                category,
                error = %e,
                "Extraction failed, using category default"
            );
            Extracted {
                extractor: name,
                category,
                value: extractor.fallback(),
                outcome: ExtractionOutcome::Defaulted {
                    reason: e.to_string(),
                },
            }
        }
    }
}

/// Deserialize the array of entries an archive file holds
pub(crate) fn entries<T: DeserializeOwned>(raw: Value) -> Result<Vec<T>, ExtractionError> {
    Ok(serde_json::from_value(raw)?)
}

/// Deserialize the first entry of a single-record archive file
pub(crate) fn first_entry<T: DeserializeOwned>(raw: Value) -> Result<T, ExtractionError> {
    entries(raw)?
        .into_iter()
        .next()
        .ok_or_else(|| ExtractionError::Shape("archive file holds no entries".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use twarc_common::MemoryArchive;

    struct CountExtractor;

    impl FieldExtractor for CountExtractor {
        type Output = usize;

        fn name(&self) -> &'static str {
            "count"
        }

        fn category(&self) -> &'static str {
            "count.js"
        }

        fn normalize(&self, raw: Value) -> Result<usize, ExtractionError> {
            raw.as_array()
                .map(Vec::len)
                .ok_or_else(|| ExtractionError::Shape("not an array".to_string()))
        }

        fn fallback(&self) -> usize {
            0
        }
    }

    #[tokio::test]
    async fn test_extract_isolated_success() {
        let archive = MemoryArchive::new().with_file("count.js", json!([1, 2, 3]));
        let extracted = extract_isolated(&CountExtractor, &archive).await;

        assert_eq!(extracted.value, 3);
        assert_eq!(extracted.extractor, "count");
        assert_eq!(extracted.category, "count.js");
        assert!(extracted.outcome.is_extracted());
    }

    #[tokio::test]
    async fn test_missing_file_defaults() {
        let archive = MemoryArchive::new();
        let extracted = extract_isolated(&CountExtractor, &archive).await;

        assert_eq!(extracted.value, 0);
        match extracted.outcome {
            ExtractionOutcome::Defaulted { reason } => assert!(reason.contains("count.js")),
            other => panic!("expected Defaulted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_shape_defaults() {
        let archive = MemoryArchive::new().with_file("count.js", json!({"not": "array"}));
        let extracted = extract_isolated(&CountExtractor, &archive).await;

        assert_eq!(extracted.value, 0);
        assert!(!extracted.outcome.is_extracted());
    }

    #[test]
    fn test_first_entry_rejects_empty_array() {
        let result: Result<Value, _> = first_entry(json!([]));
        assert!(matches!(result, Err(ExtractionError::Shape(_))));
    }
}
