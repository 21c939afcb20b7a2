//! Unique identifier minting for native-extension blocks.
//!
//! Native blocks scope their generated CSS by a short `uniqueID`. A
//! builder mints one only when the caller passes none; the minting source
//! travels with the dialect, so tests and caches can use a deterministic
//! source instead of randomness.

use std::cell::Cell;
use uuid::Uuid;

const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Characters after the prefix in a minted identifier.
pub const ID_LEN: usize = 6;

pub trait IdMinter {
    /// A fresh identifier shaped `_{prefix}{suffix}`.
    fn mint(&self, prefix: &str) -> String;
}

/// Random lowercase-alphanumeric suffixes drawn from a v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdMinter for RandomIds {
    fn mint(&self, prefix: &str) -> String {
        let bytes = Uuid::new_v4().into_bytes();
        let suffix: String = bytes
            .iter()
            .take(ID_LEN)
            .map(|b| ALPHABET[usize::from(*b) % ALPHABET.len()] as char)
            .collect();
        format!("_{}{}", prefix, suffix)
    }
}

/// Deterministic counter: `_h000000`, `_c000001`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: Cell<u32>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u32) -> Self {
        Self {
            next: Cell::new(first),
        }
    }
}

impl IdMinter for SequentialIds {
    fn mint(&self, prefix: &str) -> String {
        let n = self.next.get();
        self.next.set(n.wrapping_add(1));
        format!("_{}{:06}", prefix, n % 1_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_id_shape() {
        let id = RandomIds.mint("r");
        assert!(id.starts_with("_r"));
        assert_eq!(id.len(), 2 + ID_LEN);
        assert!(id[2..].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_sequential_ids_are_deterministic() {
        let a = SequentialIds::new();
        let b = SequentialIds::new();
        let first: Vec<_> = (0..3).map(|_| a.mint("c")).collect();
        let second: Vec<_> = (0..3).map(|_| b.mint("c")).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "_c000000");
        assert_eq!(first[2], "_c000002");
    }
}
