//! Resource tree produced by discovery: device, chassis, ports.
//!
//! Child slots are assigned by the parent from a counter starting at 1, so
//! slot-ids are unique and follow insertion order.

use indexmap::IndexMap;

/// The discovered tree, rooted at the device.
pub type ResourceTree = Device;

/// Root node: the device itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Resource name in the orchestration platform.
    pub name: String,
    pub vendor: String,
    /// Shell model, also the namespace of every attribute and child model.
    pub model: String,
    pub address: String,
    chassis: IndexMap<String, Chassis>,
}

impl Device {
    pub fn new(name: impl Into<String>, model: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vendor: String::new(),
            model: model.into(),
            address: address.into(),
            chassis: IndexMap::new(),
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Attach a chassis under the next free slot and return it.
    pub fn add_chassis(&mut self, chassis: Chassis) -> &mut Chassis {
        let slot = next_slot(self.chassis.len());
        self.chassis.entry(slot).or_insert(chassis)
    }

    /// Chassis by slot-id.
    pub fn chassis(&self, slot: &str) -> Option<&Chassis> {
        self.chassis.get(slot)
    }

    /// All chassis with their slot-ids.
    pub fn chassis_slots(&self) -> impl Iterator<Item = (&str, &Chassis)> {
        self.chassis.iter().map(|(slot, chassis)| (slot.as_str(), chassis))
    }

    pub fn chassis_count(&self) -> usize {
        self.chassis.len()
    }

    /// Total ports across all chassis.
    pub fn port_count(&self) -> usize {
        self.chassis.values().map(Chassis::port_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chassis {
    pub name: String,
    pub serial_number: String,
    ports: IndexMap<String, Port>,
}

impl Chassis {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serial_number: String::new(),
            ports: IndexMap::new(),
        }
    }

    /// Attach a port under the next free slot and return the slot-id.
    pub fn add_port(&mut self, port: Port) -> String {
        let slot = next_slot(self.ports.len());
        self.ports.insert(slot.clone(), port);
        slot
    }

    pub fn port(&self, slot: &str) -> Option<&Port> {
        self.ports.get(slot)
    }

    /// All ports with their slot-ids, in discovery order.
    pub fn ports(&self) -> impl Iterator<Item = (&str, &Port)> {
        self.ports.iter().map(|(slot, port)| (slot.as_str(), port))
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    /// Interface name (`ifName`).
    pub name: String,
    /// Interface alias (`ifAlias`), when set.
    pub description: Option<String>,
}

impl Port {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

fn next_slot(existing: usize) -> String {
    (existing + 1).to_string()
}
