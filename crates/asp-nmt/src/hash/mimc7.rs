#![allow(
    clippy::arithmetic_side_effects,
    reason = "Field arithmetic is modular and cannot overflow"
)]

use std::sync::LazyLock;

use ark_bn254::Fr;
use ark_ff::{Field, PrimeField, Zero};
use asp_core::base::Element;
use sha3::{Digest, Keccak256};

use super::HashFunction;
use super::field::{from_field, to_field};

const ROUNDS: usize = 91;
const SEED: &[u8] = b"mimc";

/// iden3 MiMC7 over BN254, keyed by the right operand.
///
/// `hash(x, k)` runs 91 rounds of `r = (r + k + c_i)^7` (the first round
/// uses `x + k`) and returns `r + k`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mimc7;

/// Round constants: `c_0 = 0`, then iterated Keccak-256 of the seed.
static CONSTANTS: LazyLock<Vec<Fr>> = LazyLock::new(|| {
    let mut constants = Vec::with_capacity(ROUNDS);
    constants.push(Fr::zero());

    let mut digest: [u8; 32] = Keccak256::digest(SEED).into();
    for _ in 1..ROUNDS {
        digest = Keccak256::digest(strip_leading_zeros(&digest)).into();
        constants.push(Fr::from_be_bytes_mod_order(&digest));
    }
    constants
});

/// Minimal big-endian encoding of the integer `bytes` represents.
fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes.get(start..).unwrap_or_default()
}

fn pow7(t: Fr) -> Fr {
    let t2 = t.square();
    t2.square() * t2 * t
}

impl HashFunction for Mimc7 {
    fn hash(&self, left: &Element, right: &Element) -> Element {
        let x = to_field(left);
        let k = to_field(right);

        let mut r = Fr::zero();
        for (round, constant) in CONSTANTS.iter().enumerate() {
            let t = if round == 0 { x + k } else { r + k + constant };
            r = pow7(t);
        }
        from_field(r + k)
    }
}
