//! Command context supplied by the orchestration platform.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DriverError, Result};

/// Shell model used when the context does not name one.
pub const DEFAULT_SHELL_MODEL: &str = "Vyos";

pub const SNMP_READ_COMMUNITY: &str = "SNMP Read Community";
pub const USER: &str = "User";
pub const PASSWORD: &str = "Password";

fn default_model() -> String {
    DEFAULT_SHELL_MODEL.to_string()
}

/// The resource a command runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDetails {
    pub name: String,
    pub address: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub family: String,
    /// Attribute values keyed by their namespaced name, e.g. `Vyos.User`.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDetails {
    pub reservation_id: String,
    #[serde(default)]
    pub domain: String,
}

/// Context passed with every resource command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCommandContext {
    pub resource: ResourceDetails,
    #[serde(default)]
    pub reservation: Option<ReservationDetails>,
}

impl ResourceCommandContext {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            resource: ResourceDetails {
                name: name.into(),
                address: address.into(),
                model: default_model(),
                family: String::new(),
                attributes: HashMap::new(),
            },
            reservation: None,
        }
    }

    /// Set an attribute under the shell model's namespace.
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        let key = format!("{}.{}", self.resource.model, name);
        self.resource.attributes.insert(key, value.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Attribute value, looked up as `<model>.<name>` and then as `<name>`.
    pub fn attribute(&self, name: &str) -> Result<&str> {
        let namespaced = format!("{}.{}", self.resource.model, name);
        self.resource
            .attributes
            .get(&namespaced)
            .or_else(|| self.resource.attributes.get(name))
            .map(String::as_str)
            .ok_or_else(|| DriverError::MissingAttribute { name: namespaced }.into())
    }

    /// Short description for log lines.
    pub fn describe(&self) -> String {
        match self.reservation {
            Some(ref r) => format!(
                "{} ({}) in reservation {}",
                self.resource.name, self.resource.address, r.reservation_id
            ),
            None => format!("{} ({})", self.resource.name, self.resource.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_platform_json() {
        let json = r#"{
            "resource": {
                "name": "vyos-dev4",
                "address": "192.0.2.10",
                "model": "Vyos",
                "family": "CS_Router",
                "attributes": {
                    "Vyos.SNMP Read Community": "enc:public",
                    "Vyos.User": "vyos"
                }
            },
            "reservation": { "reservation_id": "0f1e2d3c" }
        }"#;

        let ctx = ResourceCommandContext::from_json(json).unwrap();
        assert_eq!(ctx.resource.name, "vyos-dev4");
        assert_eq!(ctx.attribute(SNMP_READ_COMMUNITY).unwrap(), "enc:public");
        assert_eq!(ctx.attribute(USER).unwrap(), "vyos");
        assert_eq!(ctx.describe(), "vyos-dev4 (192.0.2.10) in reservation 0f1e2d3c");
    }

    #[test]
    fn test_model_defaults() {
        let json = r#"{ "resource": { "name": "r1", "address": "192.0.2.1" } }"#;
        let ctx = ResourceCommandContext::from_json(json).unwrap();
        assert_eq!(ctx.resource.model, "Vyos");
        assert!(ctx.reservation.is_none());
    }

    #[test]
    fn test_bare_attribute_fallback() {
        let mut ctx = ResourceCommandContext::new("r1", "192.0.2.1");
        ctx.resource.attributes.insert("User".to_string(), "admin".to_string());
        assert_eq!(ctx.attribute(USER).unwrap(), "admin");
    }

    #[test]
    fn test_missing_attribute_names_it() {
        let ctx = ResourceCommandContext::new("r1", "192.0.2.1");
        let err = ctx.attribute(PASSWORD).unwrap_err();
        assert!(err.to_string().contains("Vyos.Password"));
    }
}
