//! Creator/investor role registries.
//!
//! A [`RoleRegistry`] is an enumerable set of addresses: a membership flag
//! set plus an insertion-ordered list. Removal swaps the departing entry
//! with the last one and pops, so enumeration order is NOT stable across
//! removals. Growth is unbounded; nothing is ever garbage-collected.

use std::collections::HashSet;

use tanko_types::Address;

use crate::{LedgerError, Result};

/// An enumerable role set with O(1) membership and swap-remove deletion.
#[derive(Debug)]
pub struct RoleRegistry {
    role: &'static str,
    members: Vec<Address>,
    index: HashSet<Address>,
}

impl RoleRegistry {
    /// Create an empty registry. `role` names the registry in errors and
    /// logs ("creator" or "investor").
    pub fn new(role: &'static str) -> Self {
        Self {
            role,
            members: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Add an address to the registry.
    ///
    /// Returns `true` if the address was newly added, `false` if it was
    /// already a member (no-op).
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ZeroAddress`] for the zero address
    pub fn register(&mut self, addr: Address) -> Result<bool> {
        if addr.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        if !self.index.insert(addr) {
            return Ok(false);
        }
        self.members.push(addr);
        tracing::debug!(role = self.role, address = %addr, "registered");
        Ok(true)
    }

    /// Add a batch of addresses, silently skipping zero addresses and
    /// existing members. Never fails; returns the number actually added.
    pub fn register_batch(&mut self, addrs: &[Address]) -> usize {
        let mut added = 0;
        for &addr in addrs {
            if addr.is_zero() || !self.index.insert(addr) {
                continue;
            }
            self.members.push(addr);
            added += 1;
        }
        tracing::debug!(
            role = self.role,
            requested = addrs.len(),
            added,
            "batch registered"
        );
        added
    }

    /// Remove an address from the registry via swap-with-last-and-pop.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotAMember`] if the address is not currently a member
    pub fn remove(&mut self, addr: Address) -> Result<()> {
        if !self.index.remove(&addr) {
            return Err(LedgerError::NotAMember {
                address: addr,
                role: self.role,
            });
        }
        if let Some(pos) = self.members.iter().position(|m| *m == addr) {
            self.members.swap_remove(pos);
        }
        tracing::debug!(role = self.role, address = %addr, "removed");
        Ok(())
    }

    /// Whether the address currently holds the role.
    pub fn contains(&self, addr: Address) -> bool {
        self.index.contains(&addr)
    }

    /// Number of current members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Current members in enumeration order (registration order, modulo
    /// prior swap-removals).
    pub fn members(&self) -> &[Address] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    #[test]
    fn test_register_and_contains() {
        let mut reg = RoleRegistry::new("creator");
        assert!(reg.register(addr(1)).expect("register"));
        assert!(reg.contains(addr(1)));
        assert!(!reg.contains(addr(2)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_register_idempotent() {
        let mut reg = RoleRegistry::new("creator");
        assert!(reg.register(addr(1)).expect("first"));
        assert!(!reg.register(addr(1)).expect("second"));
        assert_eq!(reg.members(), &[addr(1)]);
    }

    #[test]
    fn test_register_zero_rejected() {
        let mut reg = RoleRegistry::new("creator");
        assert!(matches!(
            reg.register(Address::ZERO),
            Err(LedgerError::ZeroAddress)
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_remove_nonmember_fails_unchanged() {
        let mut reg = RoleRegistry::new("investor");
        reg.register(addr(1)).expect("register");
        let err = reg.remove(addr(2));
        assert!(matches!(err, Err(LedgerError::NotAMember { .. })));
        assert_eq!(reg.members(), &[addr(1)]);
    }

    #[test]
    fn test_remove_then_reregister() {
        let mut reg = RoleRegistry::new("investor");
        reg.register(addr(1)).expect("register");
        reg.remove(addr(1)).expect("remove");
        assert!(!reg.contains(addr(1)));
        assert!(reg.register(addr(1)).expect("re-register"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_swaps_last_into_hole() {
        let mut reg = RoleRegistry::new("creator");
        for b in 1..=4 {
            reg.register(addr(b)).expect("register");
        }
        reg.remove(addr(2)).expect("remove");
        // Last member takes the removed slot; order is not stable.
        assert_eq!(reg.members(), &[addr(1), addr(4), addr(3)]);
    }

    #[test]
    fn test_batch_skips_zero_and_duplicates() {
        let mut reg = RoleRegistry::new("creator");
        reg.register(addr(1)).expect("register");
        let added = reg.register_batch(&[Address::ZERO, addr(1), addr(2), addr(2), addr(3)]);
        assert_eq!(added, 2);
        assert_eq!(reg.members(), &[addr(1), addr(2), addr(3)]);
    }

    #[test]
    fn test_enumeration_is_registration_order() {
        let mut reg = RoleRegistry::new("investor");
        let batch: Vec<Address> = (1..=5).map(addr).collect();
        reg.register_batch(&batch);
        assert_eq!(reg.members(), batch.as_slice());
    }
}
