//! Single-value account extractors
//!
//! Creation IP, timezone, verified flag and phone number each live in a
//! one-entry archive file.

use serde::Deserialize;
use serde_json::Value;

use super::{first_entry, ExtractionError, FieldExtractor};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCreationIp {
    user_creation_ip: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCreationIpEntry {
    account_creation_ip: RawCreationIp,
}

/// `account-creation-ip.js`
pub struct CreationIpExtractor;

impl FieldExtractor for CreationIpExtractor {
    type Output = Option<String>;

    fn name(&self) -> &'static str {
        "creation_ip"
    }

    fn category(&self) -> &'static str {
        "account-creation-ip.js"
    }

    fn normalize(&self, raw: Value) -> Result<Option<String>, ExtractionError> {
        let entry: RawCreationIpEntry = first_entry(raw)?;
        Ok(Some(entry.account_creation_ip.user_creation_ip))
    }

    fn fallback(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimezone {
    time_zone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimezoneEntry {
    account_timezone: RawTimezone,
}

/// `account-timezone.js`
///
/// The export stores a city-style name (`Paris`), not an IANA identifier.
pub struct TimezoneExtractor;

impl FieldExtractor for TimezoneExtractor {
    type Output = Option<String>;

    fn name(&self) -> &'static str {
        "timezone"
    }

    fn category(&self) -> &'static str {
        "account-timezone.js"
    }

    fn normalize(&self, raw: Value) -> Result<Option<String>, ExtractionError> {
        let entry: RawTimezoneEntry = first_entry(raw)?;
        Ok(Some(entry.account_timezone.time_zone))
    }

    fn fallback(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Deserialize)]
struct RawVerified {
    verified: bool,
}

#[derive(Debug, Deserialize)]
struct RawVerifiedEntry {
    verified: RawVerified,
}

/// `verified.js`
pub struct VerifiedExtractor;

impl FieldExtractor for VerifiedExtractor {
    type Output = bool;

    fn name(&self) -> &'static str {
        "verified"
    }

    fn category(&self) -> &'static str {
        "verified.js"
    }

    fn normalize(&self, raw: Value) -> Result<bool, ExtractionError> {
        let entry: RawVerifiedEntry = first_entry(raw)?;
        Ok(entry.verified.verified)
    }

    fn fallback(&self) -> bool {
        false
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPhoneDevice {
    #[serde(default)]
    phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPhoneEntry {
    device: RawPhoneDevice,
}

/// `phone-number.js`
///
/// The number itself may be legitimately absent from an otherwise
/// well-formed file; the field then stays unset.
pub struct PhoneNumberExtractor;

impl FieldExtractor for PhoneNumberExtractor {
    type Output = Option<String>;

    fn name(&self) -> &'static str {
        "phone_number"
    }

    fn category(&self) -> &'static str {
        "phone-number.js"
    }

    fn normalize(&self, raw: Value) -> Result<Option<String>, ExtractionError> {
        let entry: RawPhoneEntry = first_entry(raw)?;
        Ok(entry.device.phone_number)
    }

    fn fallback(&self) -> Option<String> {
        None
    }
}
