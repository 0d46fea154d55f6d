//! Age extractor (`ageinfo.js`)
//!
//! Source shape:
//! ```json
//! [{ "ageMeta": {
//!     "ageInfo": { "age": ["13-54"], "birthDate": "" },
//!     "inferredAgeInfo": { "age": ["25"], "birthDate": "" }
//! } }]
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::{first_entry, ExtractionError, FieldExtractor};
use crate::types::{Age, AgeEstimate, AgeInfo};

/// Age used when the archive provides no age value
pub const AGE_FALLBACK: u32 = 20;

/// Parse the raw age strings of an archive age record
///
/// Only the first element is considered. `"13-17"` is the inclusive range
/// `[13, 17]`, `"34"` is the single age 34, and an empty list is
/// [`AGE_FALLBACK`].
///
/// # Errors
/// `ExtractionError::Shape` if an endpoint is not a non-negative integer.
pub fn parse_age(values: &[String]) -> Result<Age, ExtractionError> {
    let Some(first) = values.first() else {
        return Ok(Age::Exact(AGE_FALLBACK));
    };

    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| ExtractionError::Shape(format!("invalid age value {:?}", first)))
    };

    match first.split_once('-') {
        Some((low, high)) => Ok(Age::Range(parse(low)?, parse(high)?)),
        None => Ok(Age::Exact(parse(first)?)),
    }
}

/// Raw `ageInfo` / `inferredAgeInfo` record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAgeFields {
    #[serde(default)]
    pub age: Vec<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
}

impl RawAgeFields {
    pub(crate) fn into_estimate(self) -> Result<AgeEstimate, ExtractionError> {
        Ok(AgeEstimate {
            age: Some(parse_age(&self.age)?),
            birth_date: self.birth_date,
        })
    }
}

/// Parse an optional inferred-age record without failing its category
///
/// An unparsable inferred age is logged and dropped; the caller keeps the
/// rest of what the file carried.
pub(crate) fn inferred_estimate(fields: Option<RawAgeFields>, category: &str) -> Option<AgeEstimate> {
    match fields?.into_estimate() {
        Ok(estimate) => Some(estimate),
        Err(e) => {
            warn!(category, error = %e, "Ignoring unparsable inferred age");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAgeMeta {
    #[serde(default)]
    age_info: Option<RawAgeFields>,
    #[serde(default)]
    inferred_age_info: Option<RawAgeFields>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAgeEntry {
    age_meta: RawAgeMeta,
}

pub struct AgeExtractor;

impl FieldExtractor for AgeExtractor {
    type Output = AgeInfo;

    fn name(&self) -> &'static str {
        "age"
    }

    fn category(&self) -> &'static str {
        "ageinfo.js"
    }

    fn normalize(&self, raw: Value) -> Result<AgeInfo, ExtractionError> {
        let meta = first_entry::<RawAgeEntry>(raw)?.age_meta;

        let declared = match meta.age_info {
            Some(fields) => fields.into_estimate()?,
            None => AgeEstimate {
                age: Some(Age::Exact(AGE_FALLBACK)),
                birth_date: None,
            },
        };

        let inferred = inferred_estimate(meta.inferred_age_info, self.category());

        Ok(AgeInfo {
            age: declared.age,
            birth_date: declared.birth_date,
            inferred,
        })
    }

    fn fallback(&self) -> AgeInfo {
        AgeInfo {
            age: Some(Age::Exact(AGE_FALLBACK)),
            birth_date: None,
            inferred: None,
        }
    }
}
