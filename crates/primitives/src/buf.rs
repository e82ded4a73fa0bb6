//! Fixed-width byte buffers and the identity types built on them.

use arbitrary::Arbitrary;

/// 32-byte buffer, used for state roots and other opaque commitments.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Arbitrary)]
pub struct Buf32([u8; 32]);
impl_buf!(Buf32, 32);

/// Opaque L2 state commitment.
pub type StateRoot = Buf32;

/// Identity of a caller, in the 20-byte account address form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Arbitrary)]
pub struct Address([u8; 20]);
impl_buf!(Address, 20);

/// Reference to a deployed proof verifier.
///
/// The all-zero value is the null reference and is never a valid verifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Arbitrary)]
pub struct VerifierId([u8; 20]);
impl_buf!(VerifierId, 20);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_display() {
        let root = Buf32::zero();
        assert!(root.is_zero());
        assert_eq!(format!("{root}"), format!("0x{}", "00".repeat(32)));

        let addr = Address::new([0xab; 20]);
        assert!(!addr.is_zero());
        assert_eq!(addr.to_string(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn test_from_hex_accepts_optional_prefix() {
        let with = VerifierId::from_hex(&format!("0x{}", "11".repeat(20))).unwrap();
        let without: VerifierId = "11".repeat(20).parse().unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Address::from_hex("0x1234").is_err());
        assert!(Buf32::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let root = Buf32::new([7; 32]);
        let json = serde_json::to_string(&root).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "07".repeat(32)));
        let back: Buf32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
    }
}
