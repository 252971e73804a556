use std::io::Cursor;

use murmur3::murmur3_32;

use crate::errors::TripletError;

/// 32-bit MurmurHash3 (x86 variant) of `value`, reinterpreted as signed.
///
/// Matches the signed output of common Python bindings (`mmh3.hash`).
pub fn murmur3_str(seed: u32, value: &str) -> Result<i32, TripletError> {
    let hash = murmur3_32(&mut Cursor::new(value.as_bytes()), seed)?;
    Ok(hash as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_murmur3_vectors() {
        assert_eq!(murmur3_str(0, "").unwrap(), 0);
        assert_eq!(murmur3_str(1, "").unwrap(), 0x514E_28B7);
        assert_eq!(murmur3_str(0, "hello").unwrap(), 0x248B_FA47);
        assert_eq!(murmur3_str(42, "0704.0001").unwrap(), 157_192_104);
        assert_eq!(murmur3_str(42, "math/0601001").unwrap(), -1_924_455_762);
    }

    #[test]
    fn seeded_hash_is_seed_sensitive() {
        assert_ne!(
            murmur3_str(42, "0704.0001").unwrap(),
            murmur3_str(43, "0704.0001").unwrap()
        );
    }
}
