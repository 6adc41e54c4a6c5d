//! Error types for table construction and strict insertion.

use core::fmt;

/// Returned by `ChainTable::try_insert` when the key is already present.
/// The rejected key and value are handed back untouched.
pub enum InsertError<K, V> {
    DuplicateKey { key: K, value: V },
}

impl<K, V> InsertError<K, V> {
    /// Recover the rejected pair.
    pub fn into_inner(self) -> (K, V) {
        match self {
            InsertError::DuplicateKey { key, value } => (key, value),
        }
    }
}

// Manual impl so callers with non-Debug values can still unwrap results.
impl<K, V> fmt::Debug for InsertError<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey { .. } => f.write_str("DuplicateKey"),
        }
    }
}

impl<K, V> fmt::Display for InsertError<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey { .. } => f.write_str("key already present in table"),
        }
    }
}

impl<K, V> std::error::Error for InsertError<K, V> {}

/// Rejected `TableConfig`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    ZeroCapacity,
    InvalidLoadFactor(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => f.write_str("initial capacity must be at least one bucket"),
            ConfigError::InvalidLoadFactor(lf) => {
                write!(f, "max load factor must be finite and at least 0.25, got {lf}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_returns_pair() {
        let e: InsertError<&str, i32> = InsertError::DuplicateKey { key: "k", value: 3 };
        assert_eq!(format!("{e:?}"), "DuplicateKey");
        assert_eq!(e.to_string(), "key already present in table");
        assert_eq!(e.into_inner(), ("k", 3));
    }

    #[test]
    fn config_errors_render() {
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "initial capacity must be at least one bucket"
        );
        assert!(ConfigError::InvalidLoadFactor(-1.0)
            .to_string()
            .ends_with("got -1"));
    }
}
