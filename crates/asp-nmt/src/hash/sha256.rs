use asp_core::base::Element;
use sha2::{Digest, Sha256};

use super::HashFunction;

/// SHA-256 over the lowercase hex text of both operands.
///
/// The digest input is the ASCII hex of `left` followed by the ASCII hex of
/// `right`. An operand whose hex is exactly two characters with a leading
/// `0` loses that character. 32-byte elements always encode to 64
/// characters, so the rule never applies to tree nodes; it is kept so digests
/// match producers that hash the same text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hex;

fn operand_text(element: &Element) -> String {
    let text = element.to_hex();
    match text.strip_prefix('0') {
        Some(rest) if text.len() == 2 => rest.to_owned(),
        _ => text,
    }
}

impl HashFunction for Sha256Hex {
    fn hash(&self, left: &Element, right: &Element) -> Element {
        let mut hasher = Sha256::new();
        hasher.update(operand_text(left).as_bytes());
        hasher.update(operand_text(right).as_bytes());
        Element::new(hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_covers_hex_text() {
        let left = Element::new(test_utils::el!(1));
        let right = Element::new(test_utils::el!(2));
        let text = format!("{}{}", left.to_hex(), right.to_hex());
        let expected: [u8; 32] = Sha256::digest(text.as_bytes()).into();

        assert_eq!(Sha256Hex.hash(&left, &right), Element::new(expected));
    }

    #[test]
    fn full_width_text_is_untouched() {
        let zero = Element::ZERO;
        assert_eq!(operand_text(&zero).len(), 64);
    }
}
