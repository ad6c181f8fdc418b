//! SNMP session backed by `snmp2`.

use log::{debug, info};
use secrecy::ExposeSecret;
use snmp2::{AsyncSession, Oid, Value};

use super::config::SnmpParameters;
use super::mib::{MibObject, format_oid, resolve_table};
use super::table::{SnmpTable, SnmpValue};
use super::{SnmpConnector, SnmpService};
use crate::error::{Result, SnmpError};

/// Opens UDP sessions with `snmp2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnmpClient;

impl SnmpConnector for SnmpClient {
    type Session = SnmpSession;

    async fn open(&self, params: &SnmpParameters) -> Result<SnmpSession> {
        SnmpSession::open(params).await
    }
}

/// A v2c community session to one agent.
pub struct SnmpSession {
    session: AsyncSession,
    target: String,
    max_repetitions: u32,
}

impl SnmpSession {
    pub async fn open(params: &SnmpParameters) -> Result<Self> {
        let target = params.target();
        let community = params.community.expose_secret().as_bytes();

        debug!("Opening SNMP v2c session to {}", target);
        let session = AsyncSession::new_v2c((params.host.as_str(), params.port), community, 0)
            .await
            .map_err(|source| SnmpError::SessionOpen {
                host: target.clone(),
                source,
            })?;

        Ok(Self {
            session,
            target,
            max_repetitions: params.max_repetitions,
        })
    }

    /// Walk the subtree under `root` with GETBULK, returning every varbind in OID order.
    pub async fn walk(&mut self, root: &[u64]) -> Result<Vec<(Vec<u64>, SnmpValue)>> {
        let mut walk = SubtreeWalk::new(root);

        loop {
            let cursor = build_oid(walk.next_oid())?;
            let pdu = self
                .session
                .getbulk(&[&cursor], 0, self.max_repetitions)
                .await
                .map_err(SnmpError::Request)?;
            check_error_status(pdu.error_status, pdu.error_index)?;

            if walk.fold(pdu.varbinds)? == WalkStep::Done {
                break;
            }
        }

        let varbinds = walk.finish();
        debug!("Walked {} varbinds under {} from {}", varbinds.len(), format_oid(root), self.target);
        Ok(varbinds)
    }
}

impl SnmpService for SnmpSession {
    async fn get_table(&mut self, object: &MibObject) -> Result<SnmpTable> {
        let table = resolve_table(object)?;
        info!("Fetching {} from {}", object, self.target);
        let varbinds = self.walk(&table.entry_oid()).await?;
        SnmpTable::from_varbinds(table, varbinds)
    }

    async fn close(self) {
        debug!("Closing SNMP session to {}", self.target);
        drop(self.session);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum WalkStep {
    Continue,
    Done,
}

/// Varbinds collected so far while walking one subtree.
struct SubtreeWalk {
    root: Vec<u64>,
    last: Vec<u64>,
    collected: Vec<(Vec<u64>, SnmpValue)>,
}

impl SubtreeWalk {
    fn new(root: &[u64]) -> Self {
        Self {
            root: root.to_vec(),
            last: root.to_vec(),
            collected: Vec::new(),
        }
    }

    /// OID the next request continues from.
    fn next_oid(&self) -> &[u64] {
        &self.last
    }

    /// Take the varbinds of one response.
    ///
    /// The walk is done once a varbind leaves the subtree, the agent signals
    /// end of view, or a response brings nothing new.
    fn fold<'a, I>(&mut self, varbinds: I) -> Result<WalkStep>
    where
        I: IntoIterator<Item = (Oid<'a>, Value<'a>)>,
    {
        let mut advanced = false;
        for (oid, value) in varbinds {
            let components = oid_components(&oid)?;
            if !components.starts_with(&self.root) || is_end_of_view(&value) {
                return Ok(WalkStep::Done);
            }
            if components <= self.last {
                return Err(SnmpError::MalformedResponse {
                    oid: format_oid(&components),
                    reason: "agent returned a non-increasing OID".to_string(),
                }
                .into());
            }

            self.collected.push((components.clone(), convert_value(&value)));
            self.last = components;
            advanced = true;
        }

        Ok(if advanced { WalkStep::Continue } else { WalkStep::Done })
    }

    fn finish(self) -> Vec<(Vec<u64>, SnmpValue)> {
        self.collected
    }
}

/// Fail on a non-zero `error-status` in a response PDU.
fn check_error_status(status: u32, index: u32) -> Result<()> {
    let name = match status {
        0 => return Ok(()),
        1 => "tooBig",
        2 => "noSuchName",
        3 => "badValue",
        4 => "readOnly",
        5 => "genErr",
        _ => "error",
    };
    Err(SnmpError::AgentError {
        status: format!("{name}({status})"),
        index,
    }
    .into())
}

fn build_oid(components: &[u64]) -> Result<Oid<'static>> {
    Oid::from(components)
        .map_err(|e| SnmpError::InvalidOid(format!("{}: {:?}", format_oid(components), e)).into())
}

fn oid_components(oid: &Oid<'_>) -> Result<Vec<u64>> {
    oid.iter()
        .map(|arcs| arcs.collect())
        .ok_or_else(|| SnmpError::InvalidOid(oid.to_string()).into())
}

fn is_end_of_view(value: &Value<'_>) -> bool {
    matches!(
        value,
        Value::EndOfMibView | Value::NoSuchObject | Value::NoSuchInstance
    )
}

fn convert_value(value: &Value<'_>) -> SnmpValue {
    match value {
        Value::OctetString(bytes) => SnmpValue::OctetString(bytes.to_vec()),
        Value::Integer(v) => SnmpValue::Integer(*v),
        Value::Counter32(v) | Value::Unsigned32(v) => SnmpValue::Unsigned(u64::from(*v)),
        Value::Counter64(v) => SnmpValue::Unsigned(*v),
        Value::Timeticks(v) => SnmpValue::Timeticks(*v),
        Value::IpAddress(octets) => SnmpValue::IpAddress((*octets).into()),
        Value::ObjectIdentifier(oid) => SnmpValue::ObjectIdentifier(oid.to_string()),
        Value::Null => SnmpValue::Null,
        other => SnmpValue::Other(format!("{:?}", other)),
    }
}
