//! Presence device inventory.

use std::collections::HashMap;

use serde::Deserialize;

use super::error::HubError;

/// Device type the hub must export for a device to accept presence
/// commands.
pub const VIRTUAL_PRESENCE_TYPE: &str = "Virtual Presence";

/// Raw device entry as returned by the hub's device-list endpoint.
///
/// The hub reports ids as strings; they are parsed into integers when
/// the inventory is built.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRecord {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub device_type: String,
}

/// A virtual presence device known to the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: u32,
    pub label: String,
}

impl Device {
    /// Display form used in log lines: `'label' (id)`.
    pub fn display_name(&self) -> String {
        format!("'{}' ({})", self.label, self.id)
    }
}

/// Build the presence inventory from raw hub records.
///
/// Non-presence devices are dropped; a non-numeric id on a presence
/// device is a hard error since the configuration binds ids numerically.
pub fn build_inventory(records: Vec<DeviceRecord>) -> Result<HashMap<u32, Device>, HubError> {
    let mut inventory = HashMap::new();

    for record in records {
        if record.device_type != VIRTUAL_PRESENCE_TYPE {
            continue;
        }

        let id: u32 = record
            .id
            .parse()
            .map_err(|_| HubError::InvalidDeviceId(record.id.clone()))?;

        inventory.insert(
            id,
            Device {
                id,
                label: record.label,
            },
        );
    }

    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, label: &str, device_type: &str) -> DeviceRecord {
        DeviceRecord {
            id: id.to_string(),
            label: label.to_string(),
            device_type: device_type.to_string(),
        }
    }

    #[test]
    fn test_inventory_keeps_only_presence_devices() {
        let inventory = build_inventory(vec![
            record("34", "Keys Presence", VIRTUAL_PRESENCE_TYPE),
            record("35", "Kitchen Lamp", "Virtual Switch"),
        ])
        .unwrap();

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[&34].label, "Keys Presence");
    }

    #[test]
    fn test_non_numeric_presence_id_is_rejected() {
        let result = build_inventory(vec![record("abc", "Broken", VIRTUAL_PRESENCE_TYPE)]);
        assert!(matches!(result, Err(HubError::InvalidDeviceId(_))));
    }

    #[test]
    fn test_non_numeric_id_on_other_device_is_ignored() {
        let inventory = build_inventory(vec![record("abc", "Lamp", "Virtual Switch")]).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_display_name() {
        let device = Device {
            id: 34,
            label: "Keys Presence".to_string(),
        };
        assert_eq!(device.display_name(), "'Keys Presence' (34)");
    }
}
