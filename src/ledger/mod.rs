//! Resource ledger - the realm's treasury
//!
//! A fixed-slot store keyed by [`ResourceType`]. Unknown resource names are
//! rejected at the loading boundary, never defaulted to zero here.

use serde::{Deserialize, Serialize};

use crate::core::error::{CommandError, Result};

/// The fixed set of resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// Meta-currency gating turn advancement
    Shields,
    /// Army capacity; also the debit target of training and upkeep
    Food,
    Wood,
    Stone,
    Metal,
    Petricite,
    /// Earned from combat victories
    Valor,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Shields,
        ResourceType::Food,
        ResourceType::Wood,
        ResourceType::Stone,
        ResourceType::Metal,
        ResourceType::Petricite,
        ResourceType::Valor,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Shields => "Silver Shields",
            ResourceType::Food => "food",
            ResourceType::Wood => "wood",
            ResourceType::Stone => "stone",
            ResourceType::Metal => "metal",
            ResourceType::Petricite => "petricite",
            ResourceType::Valor => "valor",
        }
    }

    /// Parse a table key, case-insensitive
    pub fn parse(s: &str) -> Option<ResourceType> {
        match s.to_lowercase().as_str() {
            "shields" | "silver_shields" => Some(ResourceType::Shields),
            "food" => Some(ResourceType::Food),
            "wood" => Some(ResourceType::Wood),
            "stone" => Some(ResourceType::Stone),
            "metal" => Some(ResourceType::Metal),
            "petricite" => Some(ResourceType::Petricite),
            "valor" => Some(ResourceType::Valor),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A sparse cost or production vector
pub type ResourceVec = Vec<(ResourceType, i64)>;

/// Resource quantities held by the player
///
/// All slots are non-negative by intent. `Food` alone may go transiently
/// negative, which is the starvation signal; every other kind is guarded by
/// an affordability check before any debit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    amounts: [i64; ResourceType::ALL.len()],
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from explicit entries; unnamed kinds start at zero
    pub fn with_amounts(entries: &[(ResourceType, i64)]) -> Self {
        let mut ledger = Self::new();
        for &(resource, amount) in entries {
            ledger.set(resource, amount);
        }
        ledger
    }

    pub fn get(&self, resource: ResourceType) -> i64 {
        self.amounts[resource as usize]
    }

    pub fn set(&mut self, resource: ResourceType, amount: i64) {
        self.amounts[resource as usize] = amount;
    }

    pub fn credit(&mut self, resource: ResourceType, amount: i64) {
        self.amounts[resource as usize] += amount;
    }

    /// Credit up to `cap`, returning the amount actually added
    pub fn credit_clamped(&mut self, resource: ResourceType, amount: i64, cap: i64) -> i64 {
        let current = self.get(resource);
        let added = (current + amount).min(cap) - current;
        self.set(resource, current + added);
        added
    }

    pub fn credit_all(&mut self, vector: &[(ResourceType, i64)]) {
        for &(resource, amount) in vector {
            self.credit(resource, amount);
        }
    }

    /// Check every positive entry of `cost` against the current balance,
    /// reporting the first insufficient kind
    pub fn check_afford(&self, cost: &[(ResourceType, i64)]) -> Result<()> {
        for &(resource, needed) in cost {
            if needed <= 0 {
                continue;
            }
            let have = self.get(resource);
            if have < needed {
                return Err(CommandError::CannotAfford {
                    resource,
                    needed,
                    have,
                });
            }
        }
        Ok(())
    }

    pub fn can_afford(&self, cost: &[(ResourceType, i64)]) -> bool {
        self.check_afford(cost).is_ok()
    }

    /// Subtract every entry of `cost`.
    ///
    /// Callers must have validated affordability for every kind they want
    /// guarded; training deliberately leaves `Food` unguarded, so this does
    /// not assert a non-negative result.
    pub fn debit_all(&mut self, cost: &[(ResourceType, i64)]) {
        for &(resource, amount) in cost {
            self.amounts[resource as usize] -= amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_credit_and_get() {
        let mut ledger = Ledger::new();
        ledger.credit(ResourceType::Wood, 50);
        ledger.credit(ResourceType::Wood, 25);
        assert_eq!(ledger.get(ResourceType::Wood), 75);
        assert_eq!(ledger.get(ResourceType::Stone), 0);
    }

    #[test]
    fn test_check_afford_reports_first_shortfall() {
        let ledger = Ledger::with_amounts(&[(ResourceType::Wood, 40), (ResourceType::Stone, 100)]);
        let cost = vec![(ResourceType::Wood, 50), (ResourceType::Stone, 10)];

        let err = ledger.check_afford(&cost).unwrap_err();
        assert_eq!(
            err,
            CommandError::CannotAfford {
                resource: ResourceType::Wood,
                needed: 50,
                have: 40,
            }
        );
    }

    #[test]
    fn test_check_afford_ignores_zero_entries() {
        let ledger = Ledger::new();
        assert!(ledger.can_afford(&[(ResourceType::Metal, 0)]));
    }

    #[test]
    fn test_debit_all_subtracts_every_entry() {
        let mut ledger = Ledger::with_amounts(&[(ResourceType::Wood, 150), (ResourceType::Stone, 50)]);
        ledger.debit_all(&[(ResourceType::Wood, 150), (ResourceType::Stone, 50)]);
        assert_eq!(ledger.get(ResourceType::Wood), 0);
        assert_eq!(ledger.get(ResourceType::Stone), 0);
    }

    #[test]
    fn test_food_may_go_negative_on_debit() {
        let mut ledger = Ledger::with_amounts(&[(ResourceType::Food, 5)]);
        ledger.debit_all(&[(ResourceType::Food, 10)]);
        assert_eq!(ledger.get(ResourceType::Food), -5);
    }

    #[test]
    fn test_credit_clamped_caps_at_ceiling() {
        let mut ledger = Ledger::with_amounts(&[(ResourceType::Shields, 1900)]);

        let added = ledger.credit_clamped(ResourceType::Shields, 300, 2000);
        assert_eq!(added, 100);
        assert_eq!(ledger.get(ResourceType::Shields), 2000);

        // Already at cap: nothing added
        let added = ledger.credit_clamped(ResourceType::Shields, 300, 2000);
        assert_eq!(added, 0);
        assert_eq!(ledger.get(ResourceType::Shields), 2000);
    }

    #[test]
    fn test_resource_parse_case_insensitive() {
        assert_eq!(ResourceType::parse("WOOD"), Some(ResourceType::Wood));
        assert_eq!(ResourceType::parse("Petricite"), Some(ResourceType::Petricite));
        assert_eq!(ResourceType::parse("mana"), None);
    }
}
