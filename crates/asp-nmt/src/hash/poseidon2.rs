//! Poseidon2 over the BN254 scalar field.
//!
//! Instance: state width 3, 8 full rounds, 56 partial rounds, `x^5` S-box.
//! Round constants come from the Grain LFSR seeded with the instance
//! parameters. The 2-to-1 compression is `permute([left, right, 0])[0]`.

#![allow(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    reason = "Field arithmetic is modular; indices are bounded by the state and LFSR widths"
)]

use std::sync::LazyLock;

use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, PrimeField, Zero};
use asp_core::base::Element;

use super::HashFunction;
use super::field::{from_field, to_field};

const WIDTH: usize = 3;
const FULL_ROUNDS: usize = 8;
const PARTIAL_ROUNDS: usize = 56;
const FIELD_BITS: usize = 254;

/// Poseidon2 compression over BN254.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Poseidon2;

impl HashFunction for Poseidon2 {
    fn hash(&self, left: &Element, right: &Element) -> Element {
        let mut state = [to_field(left), to_field(right), Fr::zero()];
        permute(&mut state);
        from_field(state[0])
    }
}

struct RoundConstants {
    /// One row per full round; the first half run before the partial rounds.
    full: Vec<[Fr; WIDTH]>,
    /// One constant per partial round, added to the first state word.
    partial: Vec<Fr>,
}

static CONSTANTS: LazyLock<RoundConstants> = LazyLock::new(round_constants);

fn round_constants() -> RoundConstants {
    let mut grain = Grain::new();
    let half = FULL_ROUNDS / 2;
    let mut full = Vec::with_capacity(FULL_ROUNDS);
    let mut partial = Vec::with_capacity(PARTIAL_ROUNDS);

    // Full rounds draw one constant per word, partial rounds a single one.
    for round in 0..FULL_ROUNDS + PARTIAL_ROUNDS {
        if round < half || round >= half + PARTIAL_ROUNDS {
            full.push([grain.next_field(), grain.next_field(), grain.next_field()]);
        } else {
            partial.push(grain.next_field());
        }
    }

    RoundConstants { full, partial }
}

fn permute(state: &mut [Fr; WIDTH]) {
    let constants = &*CONSTANTS;
    let (first, last) = constants.full.split_at(FULL_ROUNDS / 2);

    external_linear_layer(state);
    for row in first {
        full_round(state, row);
    }
    for constant in &constants.partial {
        state[0] += constant;
        state[0] = sbox(state[0]);
        internal_linear_layer(state);
    }
    for row in last {
        full_round(state, row);
    }
}

fn full_round(state: &mut [Fr; WIDTH], row: &[Fr; WIDTH]) {
    for (word, constant) in state.iter_mut().zip(row) {
        *word = sbox(*word + constant);
    }
    external_linear_layer(state);
}

fn sbox(x: Fr) -> Fr {
    let x4 = x.square().square();
    x4 * x
}

/// Multiply by `circ(2, 1, 1)`.
fn external_linear_layer(state: &mut [Fr; WIDTH]) {
    let sum: Fr = state.iter().sum();
    for word in state.iter_mut() {
        *word += sum;
    }
}

/// Multiply by `1 + diag(1, 1, 2)`.
fn internal_linear_layer(state: &mut [Fr; WIDTH]) {
    let sum: Fr = state.iter().sum();
    state[0] += sum;
    state[1] += sum;
    state[2] = state[2].double() + sum;
}

/// The 80-bit Grain LFSR used to derive round constants.
struct Grain {
    bits: [bool; 80],
}

impl Grain {
    fn new() -> Self {
        let mut seed = Vec::with_capacity(80);
        push_bits(&mut seed, 1, 2); // prime field
        push_bits(&mut seed, 0, 4); // x^alpha S-box
        push_bits(&mut seed, FIELD_BITS, 12);
        push_bits(&mut seed, WIDTH, 12);
        push_bits(&mut seed, FULL_ROUNDS, 10);
        push_bits(&mut seed, PARTIAL_ROUNDS, 10);
        seed.resize(80, true);

        let mut bits = [false; 80];
        for (dst, src) in bits.iter_mut().zip(seed) {
            *dst = src;
        }

        let mut grain = Self { bits };
        for _ in 0..160 {
            grain.clock();
        }
        grain
    }

    fn clock(&mut self) -> bool {
        let b = &self.bits;
        let next = b[62] ^ b[51] ^ b[38] ^ b[23] ^ b[13] ^ b[0];
        self.bits.rotate_left(1);
        self.bits[79] = next;
        next
    }

    /// Self-shrinking output: a set control bit emits the bit after it.
    fn next_bit(&mut self) -> bool {
        loop {
            let control = self.clock();
            let bit = self.clock();
            if control {
                return bit;
            }
        }
    }

    /// Rejection-sample a field element from `FIELD_BITS` output bits, MSB first.
    fn next_field(&mut self) -> Fr {
        let modulus = Fr::MODULUS.to_bytes_be();
        let lead = 256 - FIELD_BITS;
        loop {
            let mut bytes = [0_u8; 32];
            for position in lead..256 {
                if self.next_bit() {
                    bytes[position / 8] |= 0x80 >> (position % 8);
                }
            }
            if bytes.as_slice() < modulus.as_slice() {
                return Fr::from_be_bytes_mod_order(&bytes);
            }
        }
    }
}

fn push_bits(out: &mut Vec<bool>, value: usize, width: usize) {
    for shift in (0..width).rev() {
        out.push((value >> shift) & 1 == 1);
    }
}

#[cfg(test)]
mod tests {
    use ark_ff::One;
    use hex_literal::hex;

    use super::*;

    #[test]
    fn permutation_matches_reference_vector() {
        let mut state = [Fr::zero(), Fr::one(), Fr::from(2_u64)];
        permute(&mut state);
        assert_eq!(
            state.map(from_field),
            [
                Element::new(hex!(
                    "0bb61d24daca55eebcb1929a82650f328134334da98ea4f847f760054f4a3033"
                )),
                Element::new(hex!(
                    "303b6f7c86d043bfcbcc80214f26a30277a15d3f74ca654992defe7ff8d03570"
                )),
                Element::new(hex!(
                    "1ed25194542b12eef8617361c3ba7c52e660b145994427cc86296242cf766ec8"
                )),
            ]
        );
    }

    #[test]
    fn constant_schedule_has_expected_shape() {
        let constants = &*CONSTANTS;
        assert_eq!(constants.full.len(), FULL_ROUNDS);
        assert_eq!(constants.partial.len(), PARTIAL_ROUNDS);
        assert!(constants.full.iter().flatten().all(|c| !c.is_zero()));
    }

    #[test]
    fn grain_seed_encodes_instance() {
        let mut seed = Vec::new();
        push_bits(&mut seed, 1, 2);
        push_bits(&mut seed, FIELD_BITS, 12);
        assert_eq!(
            seed,
            [
                false, true, false, false, false, false, true, true, true, true, true, true, true,
                false
            ]
        );
    }

    #[test]
    fn linear_layers_match_their_matrices() {
        let mut state = [Fr::one(), Fr::from(2_u64), Fr::from(3_u64)];
        external_linear_layer(&mut state);
        assert_eq!(state, [Fr::from(7_u64), Fr::from(8_u64), Fr::from(9_u64)]);

        let mut state = [Fr::one(), Fr::from(2_u64), Fr::from(3_u64)];
        internal_linear_layer(&mut state);
        assert_eq!(state, [Fr::from(7_u64), Fr::from(8_u64), Fr::from(12_u64)]);
    }

    #[test]
    fn compression_depends_on_both_inputs() {
        let zero = Element::ZERO;
        let one = Element::new(test_utils::el!(1));
        let base = Poseidon2.hash(&zero, &zero);
        assert_ne!(base, Poseidon2.hash(&one, &zero));
        assert_ne!(base, Poseidon2.hash(&zero, &one));
    }
}
