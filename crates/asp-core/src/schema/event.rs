//! Privacy-pool transfer events and their fixed-layout record payload.
//!
//! Payload layout (149 bytes):
//!
//! | Field      | Offset | Size |
//! |------------|--------|------|
//! | `tx_hash`  | 0      | 32   |
//! | `log_index`| 32     | 1    |
//! | `token`    | 33     | 20   |
//! | `from`     | 53     | 32   |
//! | `to`       | 85     | 32   |
//! | `amount`   | 117    | 32   |

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::base::PrefixedHex;

/// Size of an encoded event payload.
pub const EVENT_PAYLOAD_SIZE: usize = 149;

const TX_HASH: std::ops::Range<usize> = 0..32;
const LOG_INDEX: usize = 32;
const TOKEN: std::ops::Range<usize> = 33..53;
const FROM: std::ops::Range<usize> = 53..85;
const TO: std::ops::Range<usize> = 85..117;
const AMOUNT: std::ops::Range<usize> = 117..149;

/// A privacy-pool transfer event attributed to its sender.
#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoolEvent {
    /// Transaction hash.
    #[serde_as(as = "PrefixedHex")]
    pub tx_hash: [u8; 32],
    /// Log index within the transaction.
    pub log_index: u8,
    /// Token contract address.
    #[serde_as(as = "PrefixedHex")]
    pub token: [u8; 20],
    /// Sender identifier. Used as the record namespace.
    #[serde_as(as = "PrefixedHex")]
    pub from: [u8; 32],
    /// Receiver identifier.
    #[serde_as(as = "PrefixedHex")]
    pub to: [u8; 32],
    /// Transferred amount, 32-byte big-endian.
    #[serde_as(as = "PrefixedHex")]
    pub amount: [u8; 32],
}

impl PoolEvent {
    /// Encode the event fields into the fixed payload layout.
    #[must_use]
    #[allow(
        clippy::indexing_slicing,
        reason = "Field ranges are constants inside EVENT_PAYLOAD_SIZE"
    )]
    pub fn payload(&self) -> [u8; EVENT_PAYLOAD_SIZE] {
        let mut out = [0_u8; EVENT_PAYLOAD_SIZE];
        out[TX_HASH].copy_from_slice(&self.tx_hash);
        out[LOG_INDEX] = self.log_index;
        out[TOKEN].copy_from_slice(&self.token);
        out[FROM].copy_from_slice(&self.from);
        out[TO].copy_from_slice(&self.to);
        out[AMOUNT].copy_from_slice(&self.amount);
        out
    }

    /// Decode an event from its payload.
    ///
    /// Returns `None` if `payload` is not exactly [`EVENT_PAYLOAD_SIZE`] bytes.
    #[must_use]
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        if payload.len() != EVENT_PAYLOAD_SIZE {
            return None;
        }
        Some(Self {
            tx_hash: payload.get(TX_HASH)?.try_into().ok()?,
            log_index: *payload.get(LOG_INDEX)?,
            token: payload.get(TOKEN)?.try_into().ok()?,
            from: payload.get(FROM)?.try_into().ok()?,
            to: payload.get(TO)?.try_into().ok()?,
            amount: payload.get(AMOUNT)?.try_into().ok()?,
        })
    }
}
