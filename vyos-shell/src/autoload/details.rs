//! Flat autoload result handed back to the orchestration platform.
//!
//! The tree is flattened into a resource list and an attribute list linked
//! by relative address: `""` for the device, `"1"` for the chassis,
//! `"1/2"` for its second port.

use serde::{Deserialize, Serialize};

use super::model::{Chassis, Port, ResourceTree};
use crate::error::Result;

pub const CHASSIS_MODEL: &str = "GenericChassis";
pub const PORT_MODEL: &str = "GenericPort";

/// One sub-resource below the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoLoadResource {
    pub model: String,
    pub name: String,
    pub relative_address: String,
    pub unique_identifier: String,
}

/// One attribute value, attached to a resource by relative address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoLoadAttribute {
    pub relative_address: String,
    pub attribute_name: String,
    pub attribute_value: String,
}

/// The discovery result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoLoadDetails {
    pub resources: Vec<AutoLoadResource>,
    pub attributes: Vec<AutoLoadAttribute>,
}

impl AutoLoadDetails {
    /// Resource at a relative address.
    pub fn resource(&self, relative_address: &str) -> Option<&AutoLoadResource> {
        self.resources
            .iter()
            .find(|r| r.relative_address == relative_address)
    }

    /// Attribute value at a relative address.
    pub fn attribute(&self, relative_address: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.relative_address == relative_address && a.attribute_name == name)
            .map(|a| a.attribute_value.as_str())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn push_resource(&mut self, tree: &ResourceTree, model: &str, name: &str, relative_address: String) {
        self.resources.push(AutoLoadResource {
            model: format!("{}.{}", tree.model, model),
            name: name.replace('/', "-"),
            unique_identifier: format!("{}/{}", tree.address, relative_address),
            relative_address,
        });
    }

    fn push_attribute(&mut self, relative_address: &str, name: String, value: &str) {
        self.attributes.push(AutoLoadAttribute {
            relative_address: relative_address.to_string(),
            attribute_name: name,
            attribute_value: value.to_string(),
        });
    }

    fn add_chassis(&mut self, tree: &ResourceTree, slot: &str, chassis: &Chassis) {
        self.push_resource(tree, CHASSIS_MODEL, &chassis.name, slot.to_string());
        self.push_attribute(
            slot,
            format!("{}.{}.Serial Number", tree.model, CHASSIS_MODEL),
            &chassis.serial_number,
        );

        for (port_slot, port) in chassis.ports() {
            self.add_port(tree, &format!("{slot}/{port_slot}"), port);
        }
    }

    fn add_port(&mut self, tree: &ResourceTree, relative_address: &str, port: &Port) {
        self.push_resource(tree, PORT_MODEL, &port.name, relative_address.to_string());
        if let Some(ref description) = port.description {
            self.push_attribute(
                relative_address,
                format!("{}.{}.Port Description", tree.model, PORT_MODEL),
                description,
            );
        }
    }
}

impl From<&ResourceTree> for AutoLoadDetails {
    fn from(tree: &ResourceTree) -> Self {
        let mut details = AutoLoadDetails::default();
        details.push_attribute("", format!("{}.Vendor", tree.model), &tree.vendor);
        details.push_attribute("", format!("{}.Model", tree.model), &tree.model);

        for (slot, chassis) in tree.chassis_slots() {
            details.add_chassis(tree, slot, chassis);
        }
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoload::model::{Chassis, Device, Port};

    fn sample_tree() -> ResourceTree {
        let mut device = Device::new("vyos-dev4", "Vyos", "192.0.2.10").with_vendor("VyOS");
        let chassis = device.add_chassis(Chassis::new("Chassis 1"));
        chassis.add_port(Port::new("eth0").with_description("uplink"));
        chassis.add_port(Port::new("eth1/1"));
        device
    }

    #[test]
    fn test_relative_addresses() {
        let details = AutoLoadDetails::from(&sample_tree());
        let addresses: Vec<&str> = details
            .resources
            .iter()
            .map(|r| r.relative_address.as_str())
            .collect();
        assert_eq!(addresses, vec!["1", "1/1", "1/2"]);
    }

    #[test]
    fn test_models_and_names() {
        let details = AutoLoadDetails::from(&sample_tree());

        let chassis = details.resource("1").unwrap();
        assert_eq!(chassis.model, "Vyos.GenericChassis");
        assert_eq!(chassis.name, "Chassis 1");
        assert_eq!(chassis.unique_identifier, "192.0.2.10/1");

        let port = details.resource("1/2").unwrap();
        assert_eq!(port.model, "Vyos.GenericPort");
        assert_eq!(port.name, "eth1-1");
    }

    #[test]
    fn test_attributes() {
        let details = AutoLoadDetails::from(&sample_tree());
        assert_eq!(details.attribute("", "Vyos.Vendor"), Some("VyOS"));
        assert_eq!(details.attribute("", "Vyos.Model"), Some("Vyos"));
        assert_eq!(details.attribute("1", "Vyos.GenericChassis.Serial Number"), Some(""));
        assert_eq!(
            details.attribute("1/1", "Vyos.GenericPort.Port Description"),
            Some("uplink")
        );
        assert_eq!(details.attribute("1/2", "Vyos.GenericPort.Port Description"), None);
    }

    #[test]
    fn test_json_shape() {
        let details = AutoLoadDetails::from(&sample_tree());
        let json: serde_json::Value = serde_json::from_str(&details.to_json().unwrap()).unwrap();

        assert_eq!(json["resources"].as_array().unwrap().len(), 3);
        assert_eq!(json["resources"][1]["name"], "eth0");
        assert_eq!(json["resources"][1]["relative_address"], "1/1");
        assert_eq!(json["attributes"][0]["attribute_name"], "Vyos.Vendor");

        let back: AutoLoadDetails = serde_json::from_value(json).unwrap();
        assert_eq!(back, details);
    }
}
