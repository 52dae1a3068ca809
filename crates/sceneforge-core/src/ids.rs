//! Resource identifier allocation
//!
//! Every record emitted into an export document carries a globally unique
//! identifier. Minting goes through one allocator per export run so the
//! number of issued identifiers is known and allocation stays at the point
//! of first use.

use uuid::Uuid;

/// Mints unique, uppercase identifier strings for emitted records.
#[derive(Debug, Default)]
pub struct IdAllocator {
    minted: u64,
}

impl IdAllocator {
    /// Create a fresh allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next identifier.
    ///
    /// Identifiers are uppercase UUID strings; once handed out they are
    /// never reused within the run.
    pub fn mint(&mut self) -> String {
        self.minted += 1;
        Uuid::new_v4().to_string().to_uppercase()
    }

    /// Number of identifiers handed out so far
    pub fn minted(&self) -> u64 {
        self.minted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mint_is_unique() {
        let mut ids = IdAllocator::new();
        let minted: HashSet<String> = (0..1000).map(|_| ids.mint()).collect();
        assert_eq!(minted.len(), 1000);
        assert_eq!(ids.minted(), 1000);
    }

    #[test]
    fn test_mint_is_uppercase_uuid() {
        let mut ids = IdAllocator::new();
        let id = ids.mint();
        assert_eq!(id.len(), 36);
        assert_eq!(id, id.to_uppercase());
        assert_eq!(id.matches('-').count(), 4);
    }
}
