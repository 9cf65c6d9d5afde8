//! Manifest hash helpers
//!
//! Bungie identifies every definition by an unsigned 32-bit hash, but several
//! clients (share links among them) serialize those hashes as signed 32-bit
//! integers. Lookups must reinterpret the signed form before use.

/// Mask selecting the low 32 bits of a hash.
pub const HASH_MASK: i64 = 0xFFFF_FFFF;

/// Reinterpret a (possibly signed) hash as the unsigned manifest key.
///
/// `normalize_hash(-1)` is `0xFFFF_FFFF`; applying it twice changes nothing.
#[must_use]
pub fn normalize_hash(hash: i64) -> u32 {
    (hash & HASH_MASK) as u32
}

/// Whether a raw hash is already in unsigned manifest form.
#[must_use]
pub fn is_normalized(hash: i64) -> bool {
    (0..=HASH_MASK).contains(&hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_known_values() {
        assert_eq!(normalize_hash(-1), 0xFFFF_FFFF);
        assert_eq!(normalize_hash(-1_073_741_824), 3_221_225_472);
        assert_eq!(normalize_hash(1_345_867_570), 1_345_867_570);
        assert!(is_normalized(3_221_225_472));
        assert!(!is_normalized(-5));
    }

    proptest! {
        #[test]
        fn negative_hashes_mask_to_low_bits(h in i64::from(i32::MIN)..0i64) {
            prop_assert_eq!(i64::from(normalize_hash(h)), h & 0xFFFF_FFFF);
        }

        #[test]
        fn normalization_is_idempotent(h in any::<i64>()) {
            let once = normalize_hash(h);
            prop_assert_eq!(normalize_hash(i64::from(once)), once);
        }
    }
}
