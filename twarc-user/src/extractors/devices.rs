//! Registered devices extractor (`ni-devices.js`)

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{entries, ExtractionError, FieldExtractor};
use crate::types::{DeviceRegistry, MessagingDevice, PushDevice};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeviceResponse {
    #[serde(default)]
    push_device: Option<PushDevice>,
    #[serde(default)]
    messaging_device: Option<MessagingDevice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeviceEntry {
    ni_device_response: RawDeviceResponse,
}

pub struct DevicesExtractor;

impl FieldExtractor for DevicesExtractor {
    type Output = DeviceRegistry;

    fn name(&self) -> &'static str {
        "devices"
    }

    fn category(&self) -> &'static str {
        "ni-devices.js"
    }

    fn normalize(&self, raw: Value) -> Result<DeviceRegistry, ExtractionError> {
        let mut registry = DeviceRegistry::default();

        for entry in entries::<RawDeviceEntry>(raw)? {
            let response = entry.ni_device_response;
            // Push takes priority when an entry somehow carries both
            if let Some(device) = response.push_device {
                registry.push_devices.push(device);
            } else if let Some(device) = response.messaging_device {
                registry.messaging_devices.push(device);
            } else {
                debug!("Skipping device entry with no known device kind");
            }
        }

        Ok(registry)
    }

    fn fallback(&self) -> DeviceRegistry {
        DeviceRegistry::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_splits_push_and_messaging() {
        let raw = json!([
            { "niDeviceResponse": { "pushDevice": {
                "deviceVersion": "8.0", "deviceType": "Android", "udid": "abc",
                "createdDate": "2019.01.01", "updatedDate": "2019.02.01"
            } } },
            { "niDeviceResponse": { "messagingDevice": {
                "deviceType": "AUTH", "carrier": "example-carrier", "phoneNumber": "+15550000000",
                "createdDate": "2019.01.01"
            } } },
            { "niDeviceResponse": { "somethingElse": {} } }
        ]);

        let registry = DevicesExtractor.normalize(raw).unwrap();
        assert_eq!(registry.push_devices.len(), 1);
        assert_eq!(registry.messaging_devices.len(), 1);
        assert_eq!(registry.push_devices[0].device_type.as_deref(), Some("Android"));
        assert_eq!(registry.messaging_devices[0].phone_number.as_deref(), Some("+15550000000"));
        assert!(registry.messaging_devices[0].updated_date.is_none());
    }

    #[test]
    fn test_entry_with_both_counts_as_push() {
        let raw = json!([
            { "niDeviceResponse": { "pushDevice": {}, "messagingDevice": {} } }
        ]);
        let registry = DevicesExtractor.normalize(raw).unwrap();
        assert_eq!(registry.push_devices.len(), 1);
        assert!(registry.messaging_devices.is_empty());
    }

    #[test]
    fn test_missing_wrapper_is_error() {
        assert!(DevicesExtractor.normalize(json!([{ "pushDevice": {} }])).is_err());
    }
}
