//! History list extractors
//!
//! Screen name changes, protect/unprotect events, email address changes and
//! login IP audit records. Each archive file is an array of wrapped entries.
//! A single unparsable date invalidates the whole category, so a list is
//! never left half-filled.

use serde::Deserialize;
use serde_json::{Map, Value};
use twarc_common::time::parse_archive_date;

use super::{entries, ExtractionError, FieldExtractor};
use crate::types::{EmailAddressChange, LoginIpRecord, ProtectedHistoryEntry, ScreenNameChange};

/// Change record as stored in the archive, date still textual
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChange {
    changed_at: String,
    #[serde(default)]
    changed_from: String,
    #[serde(default)]
    changed_to: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScreenNameWrapper {
    screen_name_change: RawChange,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScreenNameEntry {
    screen_name_change: RawScreenNameWrapper,
}

/// `screen-name-change.js`
pub struct ScreenNameHistoryExtractor;

impl FieldExtractor for ScreenNameHistoryExtractor {
    type Output = Vec<ScreenNameChange>;

    fn name(&self) -> &'static str {
        "screen_name_history"
    }

    fn category(&self) -> &'static str {
        "screen-name-change.js"
    }

    fn normalize(&self, raw: Value) -> Result<Self::Output, ExtractionError> {
        entries::<RawScreenNameEntry>(raw)?
            .into_iter()
            .map(|e| {
                let change = e.screen_name_change.screen_name_change;
                Ok(ScreenNameChange {
                    changed_at: parse_archive_date(&change.changed_at)?,
                    changed_from: change.changed_from,
                    changed_to: change.changed_to,
                })
            })
            .collect()
    }

    fn fallback(&self) -> Self::Output {
        Vec::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProtectedEntry {
    protected_history: Map<String, Value>,
}

/// `protected-history.js`
pub struct ProtectedHistoryExtractor;

impl FieldExtractor for ProtectedHistoryExtractor {
    type Output = Vec<ProtectedHistoryEntry>;

    fn name(&self) -> &'static str {
        "protected_history"
    }

    fn category(&self) -> &'static str {
        "protected-history.js"
    }

    fn normalize(&self, raw: Value) -> Result<Self::Output, ExtractionError> {
        Ok(entries::<RawProtectedEntry>(raw)?
            .into_iter()
            .map(|e| ProtectedHistoryEntry(e.protected_history))
            .collect())
    }

    fn fallback(&self) -> Self::Output {
        Vec::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEmailWrapper {
    email_change: RawChange,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEmailEntry {
    email_address_change: RawEmailWrapper,
}

/// `email-address-change.js`
pub struct EmailAddressChangesExtractor;

impl FieldExtractor for EmailAddressChangesExtractor {
    type Output = Vec<EmailAddressChange>;

    fn name(&self) -> &'static str {
        "email_address_changes"
    }

    fn category(&self) -> &'static str {
        "email-address-change.js"
    }

    fn normalize(&self, raw: Value) -> Result<Self::Output, ExtractionError> {
        entries::<RawEmailEntry>(raw)?
            .into_iter()
            .map(|e| {
                let change = e.email_address_change.email_change;
                Ok(EmailAddressChange {
                    changed_at: parse_archive_date(&change.changed_at)?,
                    changed_from: change.changed_from,
                    changed_to: change.changed_to,
                })
            })
            .collect()
    }

    fn fallback(&self) -> Self::Output {
        Vec::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIpAudit {
    created_at: String,
    login_ip: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIpAuditEntry {
    ip_audit: RawIpAudit,
}

/// `ip-audit.js`
pub struct LoginIpsExtractor;

impl FieldExtractor for LoginIpsExtractor {
    type Output = Vec<LoginIpRecord>;

    fn name(&self) -> &'static str {
        "login_ips"
    }

    fn category(&self) -> &'static str {
        "ip-audit.js"
    }

    fn normalize(&self, raw: Value) -> Result<Self::Output, ExtractionError> {
        entries::<RawIpAuditEntry>(raw)?
            .into_iter()
            .map(|e| {
                Ok(LoginIpRecord {
                    created_at: parse_archive_date(&e.ip_audit.created_at)?,
                    login_ip: e.ip_audit.login_ip,
                })
            })
            .collect()
    }

    fn fallback(&self) -> Self::Output {
        Vec::new()
    }
}
