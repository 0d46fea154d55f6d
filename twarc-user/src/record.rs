//! Merged user record and its read surface

use crate::types::{
    AgeInfo, ConnectedApplication, DeviceRegistry, EmailAddressChange, LoginIpRecord,
    Personalization, ProtectedHistoryEntry, ScreenNameChange, UserSummary,
};

/// Account metadata merged from one export archive
///
/// Built either by [`crate::Aggregator`] from an archive, or incrementally via
/// [`UserData::load_part`] from previously dumped snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserData {
    pub(crate) screen_name_history: Vec<ScreenNameChange>,
    pub(crate) protected_history: Vec<ProtectedHistoryEntry>,
    pub(crate) age: AgeInfo,
    pub(crate) creation_ip: Option<String>,
    pub(crate) timezone: Option<String>,
    pub(crate) applications: Vec<ConnectedApplication>,
    pub(crate) email_addresses: Vec<EmailAddressChange>,
    pub(crate) login_ips: Vec<LoginIpRecord>,
    pub(crate) devices: DeviceRegistry,
    pub(crate) verified: bool,
    pub(crate) phone_number: Option<String>,
    pub(crate) personalization: Personalization,
    pub(crate) summary: UserSummary,
}

impl UserData {
    /// Empty record, ready for partial loads
    pub fn new() -> Self {
        Self::default()
    }

    /// History of screen names used, and when they changed
    pub fn screen_name_history(&self) -> &[ScreenNameChange] {
        &self.screen_name_history
    }

    /// Protect/unprotect events, within the months preceding the export
    pub fn protected_history(&self) -> &[ProtectedHistoryEntry] {
        &self.protected_history
    }

    /// History of email addresses used on the account
    pub fn email_address_history(&self) -> &[EmailAddressChange] {
        &self.email_addresses
    }

    pub fn personalization(&self) -> &Personalization {
        &self.personalization
    }

    /// Age information; the platform's guess, if any, is in `inferred`
    pub fn age(&self) -> &AgeInfo {
        &self.age
    }

    /// IP address the account was created from
    pub fn account_creation_ip(&self) -> Option<&str> {
        self.creation_ip.as_deref()
    }

    /// Timezone as the export names it (`Paris`, not `Europe/Paris`)
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// OAuth applications authorized on the account
    pub fn authorized_applications(&self) -> &[ConnectedApplication] {
        &self.applications
    }

    /// Recent login IPs
    pub fn last_logins(&self) -> &[LoginIpRecord] {
        &self.login_ips
    }

    /// Devices registered for push notifications or verification codes
    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    /// Phone number, `+<country code>` prefixed, if one was registered
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    /// Current email address
    ///
    /// The target of the latest email change. Entries sharing the latest
    /// timestamp resolve to the first one in history order.
    pub fn email_address(&self) -> Option<&str> {
        let mut current: Option<&EmailAddressChange> = None;

        for change in &self.email_addresses {
            match current {
                Some(latest) if change.changed_at <= latest.changed_at => {}
                _ => current = Some(change),
            }
        }

        current.map(|c| c.changed_to.as_str())
    }

    /// Profile summary (screen name, display name, creation date...)
    pub fn summary(&self) -> &UserSummary {
        &self.summary
    }

    pub fn screen_name(&self) -> &str {
        &self.summary.screen_name
    }

    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn bio(&self) -> &str {
        &self.summary.bio
    }

    pub fn created_at(&self) -> &str {
        &self.summary.created_at
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.summary.full_name
    }

    pub fn location(&self) -> &str {
        &self.summary.location
    }

    pub fn profile_img_url(&self) -> Option<&str> {
        self.summary.profile_image_url_https.as_deref()
    }

    pub fn profile_banner_url(&self) -> Option<&str> {
        self.summary.profile_banner_url.as_deref()
    }

    /// URL registered on the profile
    pub fn url(&self) -> Option<&str> {
        self.summary.url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn change(at: DateTime<Utc>, to: &str) -> EmailAddressChange {
        EmailAddressChange {
            changed_at: at,
            changed_from: String::new(),
            changed_to: to.to_string(),
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_email_address_empty_history() {
        assert_eq!(UserData::new().email_address(), None);
    }

    #[test]
    fn test_email_address_picks_latest_regardless_of_order() {
        let mut user = UserData::new();
        user.email_addresses = vec![
            change(day(5), "middle@example.com"),
            change(day(9), "latest@example.com"),
            change(day(1), "oldest@example.com"),
        ];
        assert_eq!(user.email_address(), Some("latest@example.com"));
    }

    #[test]
    fn test_email_address_tie_keeps_first() {
        let mut user = UserData::new();
        user.email_addresses = vec![
            change(day(1), "old@example.com"),
            change(day(7), "first@example.com"),
            change(day(7), "second@example.com"),
        ];
        assert_eq!(user.email_address(), Some("first@example.com"));
    }

    #[test]
    fn test_email_address_recomputed_after_change() {
        let mut user = UserData::new();
        user.email_addresses = vec![change(day(1), "a@example.com")];
        assert_eq!(user.email_address(), Some("a@example.com"));

        user.email_addresses.push(change(day(2), "b@example.com"));
        assert_eq!(user.email_address(), Some("b@example.com"));
    }

    #[test]
    fn test_summary_projections() {
        let mut user = UserData::new();
        user.summary = UserSummary {
            screen_name: "jdoe".to_string(),
            full_name: "J. Doe".to_string(),
            created_at: "2010-01-01T00:00:00.000Z".to_string(),
            location: "Lyon".to_string(),
            bio: "hello".to_string(),
            id: "42".to_string(),
            profile_image_url_https: Some("https://img.example/p.png".to_string()),
            profile_banner_url: None,
            url: Some("https://example.com".to_string()),
        };

        assert_eq!(user.screen_name(), "jdoe");
        assert_eq!(user.name(), "J. Doe");
        assert_eq!(user.id(), "42");
        assert_eq!(user.bio(), "hello");
        assert_eq!(user.location(), "Lyon");
        assert_eq!(user.created_at(), "2010-01-01T00:00:00.000Z");
        assert_eq!(user.profile_img_url(), Some("https://img.example/p.png"));
        assert_eq!(user.profile_banner_url(), None);
        assert_eq!(user.url(), Some("https://example.com"));
    }

    #[test]
    fn test_fresh_record_defaults() {
        let user = UserData::new();
        assert!(!user.verified());
        assert!(user.phone_number().is_none());
        assert!(user.timezone().is_none());
        assert!(user.account_creation_ip().is_none());
        assert!(user.screen_name_history().is_empty());
        assert!(user.devices().is_empty());
        assert_eq!(user.screen_name(), "");
    }
}
