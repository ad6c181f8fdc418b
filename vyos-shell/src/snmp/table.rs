//! Conceptual SNMP tables folded from walked varbinds.

use std::fmt;
use std::net::Ipv4Addr;

use indexmap::IndexMap;
use log::trace;

use super::mib::{TableDefinition, format_oid};
use crate::error::{Result, SnmpError};

/// Owned SNMP value.
#[derive(Debug, Clone, PartialEq)]
pub enum SnmpValue {
    OctetString(Vec<u8>),
    Integer(i64),
    /// Counter32, Gauge32/Unsigned32 and Counter64.
    Unsigned(u64),
    Timeticks(u32),
    IpAddress(Ipv4Addr),
    ObjectIdentifier(String),
    Null,
    /// Any other type, kept in debug form.
    Other(String),
}

impl SnmpValue {
    /// Text form. Octet strings are decoded lossily with trailing NULs removed.
    pub fn as_text(&self) -> String {
        match self {
            SnmpValue::OctetString(bytes) => String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .to_string(),
            SnmpValue::Integer(v) => v.to_string(),
            SnmpValue::Unsigned(v) => v.to_string(),
            SnmpValue::Timeticks(v) => v.to_string(),
            SnmpValue::IpAddress(ip) => ip.to_string(),
            SnmpValue::ObjectIdentifier(oid) => oid.clone(),
            SnmpValue::Null => String::new(),
            SnmpValue::Other(debug) => debug.clone(),
        }
    }

    /// Whether the text form is empty. Whitespace counts as content.
    pub fn is_empty(&self) -> bool {
        self.as_text().is_empty()
    }
}

impl fmt::Display for SnmpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// One table row: column name to value, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnmpRow {
    columns: IndexMap<String, SnmpValue>,
}

impl SnmpRow {
    pub fn get(&self, column: &str) -> Option<&SnmpValue> {
        self.columns.get(column)
    }

    /// Text of a column, if present and non-empty.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column)
            .filter(|value| !value.is_empty())
            .map(SnmpValue::as_text)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: SnmpValue) {
        self.columns.insert(column.into(), value);
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SnmpValue)> for SnmpRow {
    fn from_iter<I: IntoIterator<Item = (K, SnmpValue)>>(iter: I) -> Self {
        let mut row = SnmpRow::default();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// Rows keyed by instance index, in the order each index was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnmpTable {
    rows: IndexMap<String, SnmpRow>,
}

impl SnmpTable {
    /// Fold walked `(oid, value)` pairs of `table` into rows.
    ///
    /// Every OID must sit below the table entry and carry a column number
    /// followed by a non-empty instance index.
    pub fn from_varbinds<I>(table: &TableDefinition, varbinds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Vec<u64>, SnmpValue)>,
    {
        let entry = table.entry_oid();
        let mut rows: IndexMap<String, SnmpRow> = IndexMap::new();

        for (oid, value) in varbinds {
            let suffix = oid
                .strip_prefix(entry.as_slice())
                .ok_or_else(|| SnmpError::MalformedResponse {
                    oid: format_oid(&oid),
                    reason: format!("not under {}", table.name),
                })?;

            let (column, index) = match suffix {
                [column, index @ ..] if !index.is_empty() => (*column, format_oid(index)),
                _ => {
                    return Err(SnmpError::MalformedResponse {
                        oid: format_oid(&oid),
                        reason: "missing column or instance index".to_string(),
                    }
                    .into());
                }
            };

            let name = table.column_name(column);
            trace!("{}[{}].{} = {:?}", table.name, index, name, value);
            rows.entry(index).or_default().insert(name, value);
        }

        Ok(Self { rows })
    }

    /// Rows with their index, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnmpRow)> {
        self.rows.iter().map(|(index, row)| (index.as_str(), row))
    }

    /// Rows in table order.
    pub fn rows(&self) -> impl Iterator<Item = &SnmpRow> {
        self.rows.values()
    }

    pub fn get(&self, index: &str) -> Option<&SnmpRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<(String, SnmpRow)> for SnmpTable {
    fn from_iter<I: IntoIterator<Item = (String, SnmpRow)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
