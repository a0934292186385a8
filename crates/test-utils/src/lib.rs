//! Shared test utilities for the workspace.

use asp_core::schema::event::PoolEvent;

/// Helper macro to create a 32-byte value with a specific last byte.
///
/// Returns `[u8; 32]` which can be converted to `Element` via `.into()`.
#[macro_export]
macro_rules! el {
    ($v:expr) => {{
        let mut arr = [0_u8; 32];
        arr[31] = $v;
        arr
    }};
}

/// Helper macro to create a namespace identifier of `size` bytes ending in `last`.
///
/// Returns `Vec<u8>`.
#[macro_export]
macro_rules! ns {
    ($size:expr, $last:expr) => {{
        let mut v = vec![0_u8; $size];
        if let Some(byte) = v.last_mut() {
            *byte = $last;
        }
        v
    }};
}

/// Encode a record as `namespace ‖ hash ‖ payload`.
#[must_use]
pub fn record_bytes(namespace: &[u8], hash: [u8; 32], payload: &[u8]) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(namespace.len().saturating_add(32).saturating_add(payload.len()));
    out.extend_from_slice(namespace);
    out.extend_from_slice(&hash);
    out.extend_from_slice(payload);
    out
}

/// Build single-byte-namespace records from `(namespace, hash last byte)` pairs.
///
/// Each record's payload is its position in `pairs`, so records that share a
/// namespace and hash stay distinguishable.
#[must_use]
pub fn small_records(pairs: &[(u8, u8)]) -> Vec<Vec<u8>> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, &(namespace, hash))| {
            let position = u8::try_from(i).unwrap_or(u8::MAX);
            record_bytes(&[namespace], el!(hash), &[position])
        })
        .collect()
}

/// A deterministic transfer event sent by the sender whose id ends in `sender`.
#[must_use]
pub fn sample_event(sender: u8, nonce: u8) -> PoolEvent {
    let mut tx_hash = [0xab_u8; 32];
    tx_hash[0] = nonce;
    let mut from = [0_u8; 32];
    from[31] = sender;
    let mut to = [0_u8; 32];
    to[31] = sender.wrapping_add(1);
    let mut amount = [0_u8; 32];
    amount[31] = nonce;

    PoolEvent {
        tx_hash,
        log_index: nonce,
        token: [0x11_u8; 20],
        from,
        to,
        amount,
    }
}
