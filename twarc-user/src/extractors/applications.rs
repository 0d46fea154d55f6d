//! Connected applications extractor (`connected-application.js`)
//!
//! Current exports carry `approvedAt` as a date string. Older exports carry
//! `approvedAtMsec`, a stringified epoch-milliseconds value. Both normalize to
//! the same timestamp type.

use serde::Deserialize;
use serde_json::Value;
use twarc_common::time::{parse_archive_date, parse_epoch_millis};

use super::{entries, ExtractionError, FieldExtractor};
use crate::types::{ApplicationOrganization, ConnectedApplication};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApplication {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default)]
    organization: Option<ApplicationOrganization>,
    #[serde(default)]
    approved_at: Option<String>,
    #[serde(default)]
    approved_at_msec: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApplicationEntry {
    connected_application: RawApplication,
}

pub struct ConnectedApplicationsExtractor;

impl FieldExtractor for ConnectedApplicationsExtractor {
    type Output = Vec<ConnectedApplication>;

    fn name(&self) -> &'static str {
        "connected_applications"
    }

    fn category(&self) -> &'static str {
        "connected-application.js"
    }

    fn normalize(&self, raw: Value) -> Result<Self::Output, ExtractionError> {
        entries::<RawApplicationEntry>(raw)?
            .into_iter()
            .map(|e| {
                let app = e.connected_application;
                let approved_at = match (&app.approved_at, &app.approved_at_msec) {
                    (Some(date), _) => parse_archive_date(date)?,
                    (None, Some(msec)) => parse_epoch_millis(msec)?,
                    (None, None) => {
                        return Err(ExtractionError::Shape(format!(
                            "application {:?} has no approval date",
                            app.name
                        )))
                    }
                };

                Ok(ConnectedApplication {
                    id: app.id,
                    name: app.name,
                    description: app.description,
                    url: app.url,
                    permissions: app.permissions,
                    organization: app.organization,
                    approved_at,
                })
            })
            .collect()
    }

    fn fallback(&self) -> Self::Output {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_current_export_shape() {
        let raw = json!([{ "connectedApplication": {
            "organization": { "name": "Example Org", "url": "https://example.org", "privacyPolicyUrl": "https://example.org/privacy" },
            "name": "Example Client",
            "description": "Posts things",
            "permissions": ["read", "write"],
            "approvedAt": "2020-06-01T12:00:00.000Z",
            "id": "12345"
        } }]);

        let apps = ConnectedApplicationsExtractor.normalize(raw).unwrap();
        assert_eq!(apps.len(), 1);
        let app = &apps[0];
        assert_eq!(app.id.as_deref(), Some("12345"));
        assert_eq!(app.permissions, vec!["read", "write"]);
        assert_eq!(app.approved_at, Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap());
        let org = app.organization.as_ref().unwrap();
        assert_eq!(org.name, "Example Org");
        assert_eq!(org.privacy_policy_url.as_deref(), Some("https://example.org/privacy"));
        assert!(org.terms_and_conditions_url.is_none());
    }

    #[test]
    fn test_legacy_msec_shape() {
        let raw = json!([{ "connectedApplication": {
            "name": "Old Client",
            "permissions": ["read"],
            "approvedAtMsec": "1489075284000"
        } }]);

        let apps = ConnectedApplicationsExtractor.normalize(raw).unwrap();
        assert_eq!(apps[0].approved_at.timestamp_millis(), 1_489_075_284_000);
    }

    #[test]
    fn test_both_shapes_normalize_identically() {
        let iso = json!([{ "connectedApplication": { "name": "A", "approvedAt": "2017-03-09T16:01:24.000Z" } }]);
        let msec = json!([{ "connectedApplication": { "name": "A", "approvedAtMsec": "1489075284000" } }]);

        assert_eq!(
            ConnectedApplicationsExtractor.normalize(iso).unwrap(),
            ConnectedApplicationsExtractor.normalize(msec).unwrap()
        );
    }

    #[test]
    fn test_missing_approval_date_is_error() {
        let raw = json!([{ "connectedApplication": { "name": "Dateless" } }]);
        assert!(matches!(
            ConnectedApplicationsExtractor.normalize(raw),
            Err(ExtractionError::Shape(_))
        ));
    }
}
