//! Personalization extractor (`personalization.js`)
//!
//! Languages, interest names, advertisers and shows are deduplicated and
//! emitted sorted. Partner interests pass through untouched.
//!
//! The file may also carry its own inferred age. It is parsed with the same
//! algorithm as the age file and returned alongside the personalization; the
//! aggregator decides whether it lands in [`crate::types::AgeInfo::inferred`].

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

use super::age::{inferred_estimate, RawAgeFields};
use super::{first_entry, ExtractionError, FieldExtractor};
use crate::types::{AgeEstimate, Demographics, Interests, Personalization};

#[derive(Debug, Deserialize)]
struct RawLanguage {
    language: String,
}

#[derive(Debug, Deserialize)]
struct RawGenderInfo {
    #[serde(default)]
    gender: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDemographics {
    #[serde(default)]
    languages: Vec<RawLanguage>,
    #[serde(default)]
    gender_info: Option<RawGenderInfo>,
}

#[derive(Debug, Deserialize)]
struct RawInterest {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawAudienceAndAdvertisers {
    #[serde(default)]
    advertisers: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInterests {
    #[serde(default)]
    interests: Vec<RawInterest>,
    #[serde(default)]
    partner_interests: Vec<Value>,
    #[serde(default)]
    audience_and_advertisers: Option<RawAudienceAndAdvertisers>,
    #[serde(default)]
    shows: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawP13nData {
    #[serde(default)]
    demographics: Option<RawDemographics>,
    #[serde(default)]
    interests: Option<RawInterests>,
    #[serde(default)]
    inferred_age_info: Option<RawAgeFields>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawP13nEntry {
    p13n_data: RawP13nData,
}

/// Personalization plus the inferred age the file carried, if any
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalizationExtract {
    pub personalization: Personalization,
    pub inferred_age: Option<AgeEstimate>,
}

pub struct PersonalizationExtractor;

impl FieldExtractor for PersonalizationExtractor {
    type Output = PersonalizationExtract;

    fn name(&self) -> &'static str {
        "personalization"
    }

    fn category(&self) -> &'static str {
        "personalization.js"
    }

    fn normalize(&self, raw: Value) -> Result<PersonalizationExtract, ExtractionError> {
        let data = first_entry::<RawP13nEntry>(raw)?.p13n_data;

        let demographics = data.demographics.unwrap_or_default();
        let languages: BTreeSet<String> = demographics.languages.into_iter().map(|l| l.language).collect();
        let gender = demographics.gender_info.map(|g| g.gender).unwrap_or_default();

        let interests = match data.interests {
            Some(raw) => Interests {
                names: dedup(raw.interests.into_iter().map(|i| i.name)),
                advertisers: dedup(
                    raw.audience_and_advertisers
                        .map(|a| a.advertisers)
                        .unwrap_or_default(),
                ),
                partner_interests: raw.partner_interests,
                shows: dedup(raw.shows),
            },
            None => Interests::default(),
        };

        let inferred_age = inferred_estimate(data.inferred_age_info, self.category());

        Ok(PersonalizationExtract {
            personalization: Personalization {
                demographics: Demographics {
                    languages: languages.into_iter().collect(),
                    gender,
                },
                interests,
            },
            inferred_age,
        })
    }

    fn fallback(&self) -> PersonalizationExtract {
        PersonalizationExtract::default()
    }
}

fn dedup(values: impl IntoIterator<Item = String>) -> Vec<String> {
    values.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}
