//! Conversions between elements and BN254 scalars.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use asp_core::base::{ELEMENT_SIZE, Element};

/// Read an element as a big-endian integer reduced modulo the field order.
pub(super) fn to_field(element: &Element) -> Fr {
    Fr::from_be_bytes_mod_order(element.as_bytes())
}

/// Canonical 32-byte big-endian encoding of a field element.
pub(super) fn from_field(value: Fr) -> Element {
    let bytes = value.into_bigint().to_bytes_be();
    let mut out = [0_u8; ELEMENT_SIZE];
    for (dst, src) in out.iter_mut().rev().zip(bytes.iter().rev()) {
        *dst = *src;
    }
    Element::new(out)
}
