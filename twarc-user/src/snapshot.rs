//! Snapshot dump and partial load
//!
//! [`UserData::dump`] captures the whole record in a [`UserSnapshot`].
//! [`UserData::load_part`] merges a [`UserLoadObject`] into a record: fields
//! present in the input overwrite, absent fields are left alone.
//!
//! A load object deserializes from the JSON a snapshot serializes to, so
//! `dump → JSON → load_part` round-trips. Dates in a load object may arrive
//! as canonical timestamps, archive-format strings, or epoch milliseconds;
//! they are coerced through the archive date parser before being stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use twarc_common::time::parse_archive_date;
use twarc_common::{Error, Result};

use crate::record::UserData;
use crate::types::{
    AgeInfo, ConnectedApplication, DeviceRegistry, EmailAddressChange, LoginIpRecord,
    Personalization, ProtectedHistoryEntry, ScreenNameChange, UserSummary,
};

/// Full state of a [`UserData`], canonical types throughout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub phone_number: Option<String>,
    pub verified: bool,
    pub personalization: Personalization,
    pub protected_history: Vec<ProtectedHistoryEntry>,
    pub screen_name_history: Vec<ScreenNameChange>,
    pub age_info: AgeInfo,
    pub timezone: Option<String>,
    pub creation_ip: Option<String>,
    pub applications: Vec<ConnectedApplication>,
    pub email_address_changes: Vec<EmailAddressChange>,
    pub login_ips: Vec<LoginIpRecord>,
    pub devices: DeviceRegistry,
    pub summary: UserSummary,
}

/// Date as it may appear in a partial load
///
/// Anything that is not already a canonical timestamp goes through the archive
/// date parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Timestamp(DateTime<Utc>),
    Millis(i64),
    Text(String),
}

impl DateValue {
    /// Coerce to a canonical timestamp
    ///
    /// # Errors
    /// `Error::InvalidDateFormat` if the value cannot be interpreted as a date.
    pub fn into_timestamp(self) -> Result<DateTime<Utc>> {
        match self {
            DateValue::Timestamp(ts) => Ok(ts),
            DateValue::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::InvalidDateFormat(ms.to_string())),
            DateValue::Text(text) => parse_archive_date(&text),
        }
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(ts: DateTime<Utc>) -> Self {
        DateValue::Timestamp(ts)
    }
}

/// Partial record: every field is optional
///
/// Shares its field names with [`UserSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserLoadObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalization: Option<Personalization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected_history: Option<Vec<ProtectedHistoryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_name_history: Option<Vec<ScreenNameChange<DateValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_info: Option<AgeInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<ConnectedApplication<DateValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address_changes: Option<Vec<EmailAddressChange<DateValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_ips: Option<Vec<LoginIpRecord<DateValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<DeviceRegistry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<UserSummary>,
}

impl From<UserSnapshot> for UserLoadObject {
    fn from(s: UserSnapshot) -> Self {
        Self {
            phone_number: s.phone_number,
            verified: Some(s.verified),
            personalization: Some(s.personalization),
            protected_history: Some(s.protected_history),
            screen_name_history: Some(s.screen_name_history.into_iter().map(|e| e.map_date(DateValue::from)).collect()),
            age_info: Some(s.age_info),
            timezone: s.timezone,
            creation_ip: s.creation_ip,
            applications: Some(s.applications.into_iter().map(|e| e.map_date(DateValue::from)).collect()),
            email_address_changes: Some(s.email_address_changes.into_iter().map(|e| e.map_date(DateValue::from)).collect()),
            login_ips: Some(s.login_ips.into_iter().map(|e| e.map_date(DateValue::from)).collect()),
            devices: Some(s.devices),
            summary: Some(s.summary),
        }
    }
}

impl UserData {
    /// Snapshot of the full current state
    pub fn dump(&self) -> UserSnapshot {
        UserSnapshot {
            phone_number: self.phone_number.clone(),
            verified: self.verified,
            personalization: self.personalization.clone(),
            protected_history: self.protected_history.clone(),
            screen_name_history: self.screen_name_history.clone(),
            age_info: self.age.clone(),
            timezone: self.timezone.clone(),
            creation_ip: self.creation_ip.clone(),
            applications: self.applications.clone(),
            email_address_changes: self.email_addresses.clone(),
            login_ips: self.login_ips.clone(),
            devices: self.devices.clone(),
            summary: self.summary.clone(),
        }
    }

    /// Merge a partial record into this one
    ///
    /// Every field present in `part` replaces the stored field; absent fields
    /// are untouched. No validation beyond date coercion is performed.
    ///
    /// # Errors
    /// `Error::InvalidDateFormat` if a date cannot be coerced. Coercion happens
    /// before any field is written, so on error the record is unchanged.
    pub fn load_part(&mut self, part: UserLoadObject) -> Result<()> {
        let UserLoadObject {
            phone_number,
            verified,
            personalization,
            protected_history,
            screen_name_history,
            age_info,
            timezone,
            creation_ip,
            applications,
            email_address_changes,
            login_ips,
            devices,
            summary,
        } = part;

        let screen_name_history = screen_name_history
            .map(|v| v.into_iter().map(|e| e.try_map_date(DateValue::into_timestamp)).collect::<Result<Vec<_>>>())
            .transpose()?;
        let applications = applications
            .map(|v| v.into_iter().map(|e| e.try_map_date(DateValue::into_timestamp)).collect::<Result<Vec<_>>>())
            .transpose()?;
        let email_address_changes = email_address_changes
            .map(|v| v.into_iter().map(|e| e.try_map_date(DateValue::into_timestamp)).collect::<Result<Vec<_>>>())
            .transpose()?;
        let login_ips = login_ips
            .map(|v| v.into_iter().map(|e| e.try_map_date(DateValue::into_timestamp)).collect::<Result<Vec<_>>>())
            .transpose()?;

        if let Some(v) = phone_number {
            self.phone_number = Some(v);
        }
        if let Some(v) = verified {
            self.verified = v;
        }
        if let Some(v) = personalization {
            self.personalization = v;
        }
        if let Some(v) = protected_history {
            self.protected_history = v;
        }
        if let Some(v) = screen_name_history {
            self.screen_name_history = v;
        }
        if let Some(v) = age_info {
            self.age = v;
        }
        if let Some(v) = timezone {
            self.timezone = Some(v);
        }
        if let Some(v) = creation_ip {
            self.creation_ip = Some(v);
        }
        if let Some(v) = applications {
            self.applications = v;
        }
        if let Some(v) = email_address_changes {
            self.email_addresses = v;
        }
        if let Some(v) = login_ips {
            self.login_ips = v;
        }
        if let Some(v) = devices {
            self.devices = v;
        }
        if let Some(v) = summary {
            self.summary = v;
        }

        Ok(())
    }

    /// Build a record from one partial load
    pub fn from_part(part: UserLoadObject) -> Result<Self> {
        let mut user = Self::new();
        user.load_part(part)?;
        Ok(user)
    }
}
