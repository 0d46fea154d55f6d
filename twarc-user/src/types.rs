//! Account metadata types
//!
//! Normalized shapes for every category merged into a [`crate::UserData`].
//! Nested records keep the export archive's camelCase field names on the wire.
//!
//! Date-bearing records are generic over their date representation. The
//! record itself always stores `DateTime<Utc>` (the default parameter); the
//! partial-load path uses [`crate::snapshot::DateValue`] until dates have been
//! coerced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Age value reported by the archive: either a single age or an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Age {
    Exact(u32),
    /// Inclusive `[low, high]`
    Range(u32, u32),
}

/// Age or age range plus birth date, as declared or as guessed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeEstimate {
    #[serde(default)]
    pub age: Option<Age>,
    #[serde(default)]
    pub birth_date: Option<String>,
}

/// Age information
///
/// `inferred` is the platform's guess, distinct from the self-reported values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeInfo {
    #[serde(default)]
    pub age: Option<Age>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub inferred: Option<AgeEstimate>,
}

/// One screen name change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenNameChange<D = DateTime<Utc>> {
    pub changed_at: D,
    #[serde(default)]
    pub changed_from: String,
    #[serde(default)]
    pub changed_to: String,
}

/// Opaque protect/unprotect event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtectedHistoryEntry(pub Map<String, Value>);

impl ProtectedHistoryEntry {
    /// `Protect` or `Unprotect`, when the export says so
    pub fn action(&self) -> Option<&str> {
        self.0.get("action").and_then(Value::as_str)
    }

    pub fn protected_at(&self) -> Option<&str> {
        self.0.get("protectedAt").and_then(Value::as_str)
    }
}

/// Organization behind a connected application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationOrganization {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub privacy_policy_url: Option<String>,
    #[serde(default)]
    pub terms_and_conditions_url: Option<String>,
}

/// Third-party OAuth application authorized on the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedApplication<D = DateTime<Utc>> {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub organization: Option<ApplicationOrganization>,
    pub approved_at: D,
}

/// One email address change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddressChange<D = DateTime<Utc>> {
    pub changed_at: D,
    #[serde(default)]
    pub changed_from: String,
    #[serde(default)]
    pub changed_to: String,
}

/// One login IP audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginIpRecord<D = DateTime<Utc>> {
    pub created_at: D,
    #[serde(default)]
    pub login_ip: String,
}

impl<D> ScreenNameChange<D> {
    /// Convert the date representation infallibly
    pub fn map_date<E>(self, f: impl FnOnce(D) -> E) -> ScreenNameChange<E> {
        ScreenNameChange {
            changed_at: f(self.changed_at),
            changed_from: self.changed_from,
            changed_to: self.changed_to,
        }
    }

    /// Convert the date representation, keeping every other field
    pub fn try_map_date<E, Err>(self, f: impl FnOnce(D) -> Result<E, Err>) -> Result<ScreenNameChange<E>, Err> {
        Ok(ScreenNameChange {
            changed_at: f(self.changed_at)?,
            changed_from: self.changed_from,
            changed_to: self.changed_to,
        })
    }
}

impl<D> EmailAddressChange<D> {
    pub fn map_date<E>(self, f: impl FnOnce(D) -> E) -> EmailAddressChange<E> {
        EmailAddressChange {
            changed_at: f(self.changed_at),
            changed_from: self.changed_from,
            changed_to: self.changed_to,
        }
    }

    pub fn try_map_date<E, Err>(self, f: impl FnOnce(D) -> Result<E, Err>) -> Result<EmailAddressChange<E>, Err> {
        Ok(EmailAddressChange {
            changed_at: f(self.changed_at)?,
            changed_from: self.changed_from,
            changed_to: self.changed_to,
        })
    }
}

impl<D> LoginIpRecord<D> {
    pub fn map_date<E>(self, f: impl FnOnce(D) -> E) -> LoginIpRecord<E> {
        LoginIpRecord {
            created_at: f(self.created_at),
            login_ip: self.login_ip,
        }
    }

    pub fn try_map_date<E, Err>(self, f: impl FnOnce(D) -> Result<E, Err>) -> Result<LoginIpRecord<E>, Err> {
        Ok(LoginIpRecord {
            created_at: f(self.created_at)?,
            login_ip: self.login_ip,
        })
    }
}

impl<D> ConnectedApplication<D> {
    pub fn map_date<E>(self, f: impl FnOnce(D) -> E) -> ConnectedApplication<E> {
        ConnectedApplication {
            id: self.id,
            name: self.name,
            description: self.description,
            url: self.url,
            permissions: self.permissions,
            organization: self.organization,
            approved_at: f(self.approved_at),
        }
    }

    pub fn try_map_date<E, Err>(self, f: impl FnOnce(D) -> Result<E, Err>) -> Result<ConnectedApplication<E>, Err> {
        Ok(ConnectedApplication {
            id: self.id,
            name: self.name,
            description: self.description,
            url: self.url,
            permissions: self.permissions,
            organization: self.organization,
            approved_at: f(self.approved_at)?,
        })
    }
}

/// Device registered for push notifications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushDevice {
    #[serde(default)]
    pub device_version: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub udid: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub updated_date: Option<String>,
}

/// Device registered for SMS messaging (login verification codes)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingDevice {
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub updated_date: Option<String>,
}

/// Registered devices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistry {
    #[serde(default)]
    pub push_devices: Vec<PushDevice>,
    #[serde(default)]
    pub messaging_devices: Vec<MessagingDevice>,
}

impl DeviceRegistry {
    pub fn is_empty(&self) -> bool {
        self.push_devices.is_empty() && self.messaging_devices.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    /// Distinct declared languages, sorted
    #[serde(default)]
    pub languages: Vec<String>,
    /// Empty when the export carries no gender info
    #[serde(default)]
    pub gender: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interests {
    /// Distinct interest names, sorted
    #[serde(default)]
    pub names: Vec<String>,
    /// Distinct advertisers, sorted
    #[serde(default)]
    pub advertisers: Vec<String>,
    /// Passed through from the export unchanged
    #[serde(default)]
    pub partner_interests: Vec<Value>,
    /// Distinct shows, sorted
    #[serde(default)]
    pub shows: Vec<String>,
}

/// Attributes the platform inferred about the account owner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Personalization {
    #[serde(default)]
    pub demographics: Demographics,
    #[serde(default)]
    pub interests: Interests,
}

impl Personalization {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Basic profile summary
///
/// Never populated by aggregation; it arrives through partial loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub screen_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url_https: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_banner_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_age_wire_shapes() {
        assert_eq!(serde_json::to_value(Age::Exact(34)).unwrap(), json!(34));
        assert_eq!(serde_json::to_value(Age::Range(13, 54)).unwrap(), json!([13, 54]));
        assert_eq!(serde_json::from_value::<Age>(json!([18, 24])).unwrap(), Age::Range(18, 24));
        assert_eq!(serde_json::from_value::<Age>(json!(20)).unwrap(), Age::Exact(20));
    }

    #[test]
    fn test_protected_history_lookups() {
        let entry: ProtectedHistoryEntry =
            serde_json::from_value(json!({"protectedAt": "2020-01-02T03:04:05.000Z", "action": "Protect"})).unwrap();
        assert_eq!(entry.action(), Some("Protect"));
        assert_eq!(entry.protected_at(), Some("2020-01-02T03:04:05.000Z"));

        let empty = ProtectedHistoryEntry::default();
        assert_eq!(empty.action(), None);
    }

    #[test]
    fn test_try_map_date_keeps_other_fields() {
        let change = EmailAddressChange {
            changed_at: "2020-01-01",
            changed_from: "a@example.com".to_string(),
            changed_to: "b@example.com".to_string(),
        };
        let mapped = change
            .try_map_date(|d| Ok::<_, ()>(d.len()))
            .unwrap();
        assert_eq!(mapped.changed_at, 10);
        assert_eq!(mapped.changed_to, "b@example.com");
    }

    #[test]
    fn test_map_date_keeps_other_fields() {
        let record = LoginIpRecord {
            created_at: 1_552_492_926_000i64,
            login_ip: "198.51.100.7".to_string(),
        };
        let mapped = record.map_date(|ms| ms / 1000);
        assert_eq!(mapped.created_at, 1_552_492_926);
        assert_eq!(mapped.login_ip, "198.51.100.7");

        let app = ConnectedApplication {
            id: Some("1".to_string()),
            name: "Client".to_string(),
            description: None,
            url: None,
            permissions: vec!["read".to_string()],
            organization: None,
            approved_at: 7u8,
        };
        let mapped = app.map_date(|d| d.to_string());
        assert_eq!(mapped.approved_at, "7");
        assert_eq!(mapped.permissions, vec!["read"]);
    }

    #[test]
    fn test_summary_skips_unset_optional_urls() {
        let value = serde_json::to_value(UserSummary::default()).unwrap();
        assert!(value.get("url").is_none());
        assert_eq!(value["screen_name"], json!(""));
    }

    #[test]
    fn test_default_personalization_is_empty() {
        assert!(Personalization::default().is_empty());
        assert!(DeviceRegistry::default().is_empty());
    }
}
