//! Privacy-pool events as tree records.
//!
//! An event becomes a record in the sender's namespace. Its leaf hash is the
//! circom Poseidon hash of the six event fields.

use asp_core::base::{Element, NamespaceId, NamespaceSize};
use asp_core::schema::config::DEFAULT_NAMESPACE_SIZE;
use asp_core::schema::event::{EVENT_PAYLOAD_SIZE, PoolEvent};

use crate::NmtError;
use crate::hash::poseidon_bytes;
use crate::record::Record;

/// Encoded length of an event record: namespace, leaf hash and payload.
pub const EVENT_RECORD_SIZE: usize = 32 + 32 + EVENT_PAYLOAD_SIZE;

/// Namespace width of event records.
pub const EVENT_NAMESPACE_SIZE: NamespaceSize = NamespaceSize::new(DEFAULT_NAMESPACE_SIZE);

/// Poseidon hash of `(tx_hash, log_index, token, from, to, amount)`.
///
/// # Errors
/// Returns [`NmtError::EventHash`] if a field is not below the field modulus.
pub fn event_hash(event: &PoolEvent) -> Result<Element, NmtError> {
    poseidon_bytes(&[
        &event.tx_hash,
        &[event.log_index],
        &event.token,
        &event.from,
        &event.to,
        &event.amount,
    ])
}

/// Build the record for `event` in the namespace of its sender.
///
/// # Errors
/// Returns [`NmtError::EventHash`] if the event cannot be hashed.
pub fn event_record(event: &PoolEvent) -> Result<Record, NmtError> {
    Ok(Record::new(
        NamespaceId::from(event.from),
        event_hash(event)?,
        event.payload().to_vec(),
    ))
}

/// Decode the event carried by an event record.
///
/// # Errors
/// Returns [`NmtError::InvalidLeafLength`] if the record is not an event record.
pub fn event_from_record(record: &Record) -> Result<PoolEvent, NmtError> {
    let wrong_length = || NmtError::InvalidLeafLength {
        got: record.encoded_len(),
        want: EVENT_RECORD_SIZE,
    };
    if record.encoded_len() != EVENT_RECORD_SIZE {
        return Err(wrong_length());
    }
    PoolEvent::from_payload(record.payload()).ok_or_else(wrong_length)
}
