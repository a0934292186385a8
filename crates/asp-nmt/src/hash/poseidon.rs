use std::cell::RefCell;

use ark_bn254::Fr;
use asp_core::base::Element;
use light_poseidon::{Poseidon as CircomPoseidon, PoseidonBytesHasher, PoseidonHasher};

use super::HashFunction;
use super::field::{from_field, to_field};
use crate::NmtError;

thread_local! {
    static PAIR_HASHER: RefCell<CircomPoseidon<Fr>> = RefCell::new(pair_hasher());
}

#[allow(
    clippy::expect_used,
    reason = "Circom parameters exist for every width from 1 to 12 inputs"
)]
fn pair_hasher() -> CircomPoseidon<Fr> {
    CircomPoseidon::<Fr>::new_circom(2).expect("two input circom parameters")
}

/// Circom-compatible Poseidon over BN254 with two inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Poseidon;

impl HashFunction for Poseidon {
    #[allow(
        clippy::expect_used,
        reason = "The pair hasher is built for exactly two inputs"
    )]
    fn hash(&self, left: &Element, right: &Element) -> Element {
        let digest = PAIR_HASHER.with_borrow_mut(|hasher| {
            hasher
                .hash(&[to_field(left), to_field(right)])
                .expect("two inputs for a two input hasher")
        });
        from_field(digest)
    }
}

/// Circom Poseidon over big-endian byte inputs, one field element per input.
///
/// # Errors
/// Returns [`NmtError::EventHash`] if the input count is unsupported or an
/// input does not encode a canonical field element.
pub fn poseidon_bytes(inputs: &[&[u8]]) -> Result<Element, NmtError> {
    let mut hasher = CircomPoseidon::<Fr>::new_circom(inputs.len())
        .map_err(|e| NmtError::EventHash(e.to_string()))?;
    let digest = hasher
        .hash_bytes_be(inputs)
        .map_err(|e| NmtError::EventHash(e.to_string()))?;
    Ok(Element::new(digest))
}
