//! SNMP access: sessions, MIB table resolution and table walking.
//!
//! The inventory code talks to the traits below; [`SnmpClient`] and
//! [`SnmpSession`] implement them on top of `snmp2`.

mod config;
pub mod mib;
mod session;
mod table;

pub use config::SnmpParameters;
pub use mib::MibObject;
pub use session::{SnmpClient, SnmpSession};
pub use table::{SnmpRow, SnmpTable, SnmpValue};

use std::future::Future;

use crate::error::Result;

/// An open SNMP session.
pub trait SnmpService: Send {
    /// Fetch a whole conceptual table.
    fn get_table(&mut self, object: &MibObject) -> impl Future<Output = Result<SnmpTable>> + Send;

    /// Release the session.
    fn close(self) -> impl Future<Output = ()> + Send;
}

/// Opens SNMP sessions.
pub trait SnmpConnector: Send + Sync {
    type Session: SnmpService;

    fn open(&self, params: &SnmpParameters) -> impl Future<Output = Result<Self::Session>> + Send;
}
