//! MIB object resolution for the tables the shell reads.
//!
//! Only `IF-MIB::ifXTable` is known; anything else is rejected with
//! [`SnmpError::UnknownMibObject`].

use std::borrow::Cow;
use std::fmt;

use crate::error::{Result, SnmpError};

pub const IF_MIB: &str = "IF-MIB";
pub const IF_X_TABLE: &str = "ifXTable";

pub const IF_NAME: &str = "ifName";
pub const IF_ALIAS: &str = "ifAlias";

/// A named MIB object, e.g. `IF-MIB::ifXTable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MibObject {
    pub module: String,
    pub object: String,
}

impl MibObject {
    pub fn new(module: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            object: object.into(),
        }
    }

    /// `IF-MIB::ifXTable`
    pub fn if_x_table() -> Self {
        Self::new(IF_MIB, IF_X_TABLE)
    }
}

impl fmt::Display for MibObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.object)
    }
}

/// A conceptual table: its OID and the names of its columns.
#[derive(Debug)]
pub struct TableDefinition {
    pub module: &'static str,
    pub name: &'static str,
    pub oid: &'static [u64],
    columns: &'static [(u64, &'static str)],
}

impl TableDefinition {
    /// OID of the table's entry object (`<table>.1`), the parent of all columns.
    pub fn entry_oid(&self) -> Vec<u64> {
        let mut oid = self.oid.to_vec();
        oid.push(1);
        oid
    }

    /// Column name for a column number; unknown columns are named by number.
    pub fn column_name(&self, column: u64) -> Cow<'static, str> {
        self.columns
            .iter()
            .find(|(number, _)| *number == column)
            .map(|(_, name)| Cow::Borrowed(*name))
            .unwrap_or_else(|| Cow::Owned(column.to_string()))
    }
}

static TABLES: &[TableDefinition] = &[
    TableDefinition {
        module: IF_MIB,
        name: IF_X_TABLE,
        oid: &[1, 3, 6, 1, 2, 1, 31, 1, 1],
        columns: &[
            (1, IF_NAME),
            (2, "ifInMulticastPkts"),
            (3, "ifInBroadcastPkts"),
            (4, "ifOutMulticastPkts"),
            (5, "ifOutBroadcastPkts"),
            (6, "ifHCInOctets"),
            (7, "ifHCInUcastPkts"),
            (8, "ifHCInMulticastPkts"),
            (9, "ifHCInBroadcastPkts"),
            (10, "ifHCOutOctets"),
            (11, "ifHCOutUcastPkts"),
            (12, "ifHCOutMulticastPkts"),
            (13, "ifHCOutBroadcastPkts"),
            (14, "ifLinkUpDownTrapEnable"),
            (15, "ifHighSpeed"),
            (16, "ifPromiscuousMode"),
            (17, "ifConnectorPresent"),
            (18, IF_ALIAS),
            (19, "ifCounterDiscontinuityTime"),
        ],
    },
];

/// Look up the table definition for a MIB object.
pub fn resolve_table(object: &MibObject) -> Result<&'static TableDefinition> {
    TABLES
        .iter()
        .find(|table| table.module == object.module && table.name == object.object)
        .ok_or_else(|| {
            SnmpError::UnknownMibObject {
                module: object.module.clone(),
                object: object.object.clone(),
            }
            .into()
        })
}

/// Dotted form of an OID.
pub fn format_oid(oid: &[u64]) -> String {
    oid.iter().map(u64::to_string).collect::<Vec<_>>().join(".")
}
