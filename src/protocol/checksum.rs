/// 8-bit additive checksum.
///
/// Sum of all bytes, wrapping at 256. Used both when building outgoing frames
/// and when validating received ones.
pub fn checksum8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_sums_to_zero() {
        assert_eq!(checksum8(&[]), 0);
    }

    #[test]
    fn wraps_at_256() {
        assert_eq!(checksum8(&[0xFF, 0x00, 0x03, 0x41, 0x14]), 0x57);
        assert_eq!(checksum8(&[0x80, 0x80]), 0x00);
        assert_eq!(checksum8(&[0xFF; 4]), 0xFC);
    }

    proptest! {
        #[test]
        fn order_does_not_matter(mut bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let forward = checksum8(&bytes);
            bytes.reverse();
            prop_assert_eq!(forward, checksum8(&bytes));
        }

        #[test]
        fn concatenation_adds(
            a in proptest::collection::vec(any::<u8>(), 0..64),
            b in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut joined = a.clone();
            joined.extend_from_slice(&b);
            prop_assert_eq!(checksum8(&joined), checksum8(&a).wrapping_add(checksum8(&b)));
        }
    }
}
