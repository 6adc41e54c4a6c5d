//! KeyCode: the canonical integer code a key is bucketed and compared by.
//!
//! The table never looks inside a key. It asks the key for a `u64` code,
//! reduces it modulo the bucket count to pick a chain, and treats two keys
//! as the same key exactly when their codes are equal. Implementations must
//! therefore be pure, deterministic, and injective over the keys a caller
//! actually stores. Two distinct keys with the same code are one key as far
//! as the table is concerned.

use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use std::rc::Rc;

/// Conversion from a key to its canonical integer code.
pub trait KeyCode {
    fn key_code(&self) -> u64;
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over a byte string. Stable across runs and platforms.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |acc, &b| {
        (acc ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

macro_rules! unsigned_code {
    ($($t:ty),*) => {$(
        impl KeyCode for $t {
            #[inline]
            fn key_code(&self) -> u64 {
                *self as u64
            }
        }
    )*};
}

macro_rules! signed_code {
    ($($t:ty),*) => {$(
        impl KeyCode for $t {
            // Sign-extend, then reinterpret: -1 and u64::MAX share a code.
            #[inline]
            fn key_code(&self) -> u64 {
                *self as i64 as u64
            }
        }
    )*};
}

unsigned_code!(u8, u16, u32, u64, usize);
signed_code!(i8, i16, i32, i64, isize);

// No u128/i128 impls: 128-bit values cannot map into a u64 code without
// merging distinct keys. Wrap them in `Hashed` instead.

impl KeyCode for bool {
    #[inline]
    fn key_code(&self) -> u64 {
        u64::from(*self)
    }
}

impl KeyCode for char {
    #[inline]
    fn key_code(&self) -> u64 {
        u64::from(*self)
    }
}

// Byte and string codes are FNV-1a: collisions are unlikely but possible,
// and two colliding keys merge into one entry, as with `Hashed`.
impl KeyCode for [u8] {
    fn key_code(&self) -> u64 {
        fnv1a(self)
    }
}

impl KeyCode for Vec<u8> {
    fn key_code(&self) -> u64 {
        self.as_slice().key_code()
    }
}

impl KeyCode for str {
    fn key_code(&self) -> u64 {
        fnv1a(self.as_bytes())
    }
}

// Must agree with `str` so owned keys can be queried by `&str`.
impl KeyCode for String {
    fn key_code(&self) -> u64 {
        self.as_str().key_code()
    }
}

impl<T: KeyCode + ?Sized> KeyCode for &T {
    #[inline]
    fn key_code(&self) -> u64 {
        (**self).key_code()
    }
}

impl<T: KeyCode + ?Sized> KeyCode for Box<T> {
    #[inline]
    fn key_code(&self) -> u64 {
        (**self).key_code()
    }
}

impl<T: KeyCode + ?Sized> KeyCode for Rc<T> {
    #[inline]
    fn key_code(&self) -> u64 {
        (**self).key_code()
    }
}

/// Adapter giving any `Hash` type a code via an unkeyed `DefaultHasher`.
///
/// Codes are stable within one build of the program. Unlike the integer
/// impls this is not injective, so distinct keys may merge on a 64-bit
/// collision; use it only where that risk is acceptable.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Hashed<K>(pub K);

impl<K: Hash> KeyCode for Hashed<K> {
    fn key_code(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.0.hash(&mut h);
        h.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_code_to_themselves() {
        assert_eq!(0u8.key_code(), 0);
        assert_eq!(42u32.key_code(), 42);
        assert_eq!(7usize.key_code(), 7);
        assert_eq!(u64::MAX.key_code(), u64::MAX);
    }

    #[test]
    fn negative_integers_sign_extend() {
        assert_eq!((-1i32).key_code(), u64::MAX);
        assert_eq!((-1i8).key_code(), (-1i64).key_code());
        assert_eq!(5i16.key_code(), 5);
    }

    /// 128-bit keys go through `Hashed`; values that agree in one 64-bit
    /// half or fold to the same xor still stay separate entries.
    #[test]
    fn wide_integer_keys_stay_distinct_via_hashed() {
        use crate::ChainTable;

        let mut t = ChainTable::new();
        assert_eq!(t.insert(Hashed(1u128), "low"), None);
        assert_eq!(t.insert(Hashed(1u128 << 64), "high"), None);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(&Hashed(1u128)), Some(&"low"));
        assert_eq!(t.get(&Hashed(1u128 << 64)), Some(&"high"));

        let mut s = ChainTable::new();
        assert_eq!(s.insert(Hashed(0i128), 'a'), None);
        assert_eq!(s.insert(Hashed(-1i128), 'b'), None);
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(&Hashed(-1i128)), Some(&'b'));
    }

    #[test]
    fn owned_and_borrowed_strings_agree() {
        let owned = "hello".to_string();
        assert_eq!(owned.key_code(), "hello".key_code());
        assert_eq!(Box::<str>::from("hello").key_code(), "hello".key_code());
        assert_eq!(Rc::<str>::from("hello").key_code(), "hello".key_code());
        assert_eq!((&&"hello").key_code(), "hello".key_code());
    }

    #[test]
    fn bytes_and_str_share_fnv() {
        assert_eq!(b"abc".as_slice().key_code(), "abc".key_code());
        assert_eq!(b"abc".to_vec().key_code(), "abc".key_code());
    }

    /// Published FNV-1a 64-bit test vectors.
    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn distinct_short_strings_get_distinct_codes() {
        let codes: std::collections::BTreeSet<u64> =
            ["a", "b", "ab", "ba", "", "key1", "key2"]
                .iter()
                .map(|s| s.key_code())
                .collect();
        assert_eq!(codes.len(), 7);
    }

    #[test]
    fn hashed_adapter_is_deterministic() {
        let a = Hashed((1u8, "x"));
        let b = Hashed((1u8, "x"));
        assert_eq!(a.key_code(), b.key_code());
        assert_ne!(a.key_code(), Hashed((2u8, "x")).key_code());
    }
}
