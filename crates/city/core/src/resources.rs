//! Named-quantity ledgers.
//!
//! [`ResourcePool`] backs both the city's live stock (`i32`) and its
//! cumulative production statistics (`i64`). Stored quantities never go
//! negative or overflow: additions reject negative deltas and totals past
//! the type's maximum, and consumption checks first.

use std::collections::BTreeMap;
use std::ops::Sub;

use crate::error::{CityError, CityResult};

/// Numeric types a [`ResourcePool`] can hold.
pub trait Quantity: Copy + Default + PartialOrd + Sub<Output = Self> + core::fmt::Debug {
    /// Sum, or `None` when it does not fit.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_quantity {
    ($($ty:ty),*) => {
        $(
            impl Quantity for $ty {
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_add(self, rhs)
                }
            }
        )*
    };
}

impl_quantity!(i32, i64, u32, u64);

/// Ledger mapping resource names to non-negative quantities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool<T> {
    data: BTreeMap<String, T>,
}

impl<T> Default for ResourcePool<T> {
    fn default() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }
}

impl<T: Quantity> ResourcePool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `qty` to the stored total, starting from zero for unknown names.
    /// On error the pool is unchanged.
    pub fn add(&mut self, name: &str, qty: T) -> CityResult<()> {
        let total = self.checked_total(name, qty)?;
        self.data.insert(name.to_string(), total);
        Ok(())
    }

    /// Whether [`ResourcePool::add`] would succeed for `qty`.
    pub fn can_add(&self, name: &str, qty: T) -> bool {
        self.checked_total(name, qty).is_ok()
    }

    fn checked_total(&self, name: &str, qty: T) -> CityResult<T> {
        if qty < T::default() {
            return Err(CityError::NegativeQuantity {
                resource: name.to_string(),
            });
        }
        self.get(name)
            .checked_add(qty)
            .ok_or_else(|| CityError::overflow(name))
    }

    /// Returns the stored quantity, or zero when the name is unknown.
    pub fn get(&self, name: &str) -> T {
        self.data.get(name).copied().unwrap_or_default()
    }

    pub fn can_consume(&self, name: &str, qty: T) -> bool {
        self.get(name) >= qty
    }

    /// Removes `qty`, failing without changes when the pool holds less.
    pub fn consume(&mut self, name: &str, qty: T) -> CityResult<()> {
        if qty < T::default() {
            return Err(CityError::NegativeQuantity {
                resource: name.to_string(),
            });
        }
        let current = self.get(name);
        if current < qty {
            return Err(CityError::InsufficientResource(name.to_string()));
        }
        self.data.insert(name.to_string(), current - qty);
        Ok(())
    }

    /// Iterates entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.data.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_read_as_zero() {
        let pool: ResourcePool<i32> = ResourcePool::new();
        assert_eq!(pool.get("gold"), 0);
        assert!(pool.can_consume("gold", 0));
        assert!(!pool.can_consume("gold", 1));
    }

    #[test]
    fn add_accumulates() {
        let mut pool = ResourcePool::new();
        pool.add("wood", 4).unwrap();
        pool.add("wood", 6).unwrap();
        assert_eq!(pool.get("wood"), 10);
    }

    #[test]
    fn negative_add_is_rejected() {
        let mut pool = ResourcePool::new();
        pool.add("wood", 3).unwrap();
        let err = pool.add("wood", -1).unwrap_err();
        assert!(matches!(err, CityError::NegativeQuantity { ref resource } if resource == "wood"));
        assert_eq!(pool.get("wood"), 3);
    }

    #[test]
    fn consume_never_goes_negative() {
        let mut pool = ResourcePool::new();
        pool.add("stone", 5).unwrap();

        assert_eq!(
            pool.consume("stone", 6),
            Err(CityError::InsufficientResource("stone".into()))
        );
        assert_eq!(pool.get("stone"), 5);

        pool.consume("stone", 5).unwrap();
        assert_eq!(pool.get("stone"), 0);
        assert!(pool.consume("stone", 1).is_err());
    }

    #[test]
    fn wide_pool_tracks_lifetime_totals() {
        let mut stats: ResourcePool<i64> = ResourcePool::new();
        stats.add("wood", i32::MAX as i64).unwrap();
        stats.add("wood", i32::MAX as i64).unwrap();
        assert_eq!(stats.get("wood"), 2 * i32::MAX as i64);
    }

    #[test]
    fn iterates_in_name_order() {
        let mut pool = ResourcePool::new();
        pool.add("stone", 2).unwrap();
        pool.add("iron", 1).unwrap();
        let names: Vec<_> = pool.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["iron", "stone"]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn overflowing_add_is_rejected() {
        let mut pool = ResourcePool::new();
        pool.add("wood", i32::MAX).unwrap();

        let err = pool.add("wood", 1).unwrap_err();
        assert_eq!(
            err,
            CityError::QuantityOverflow {
                resource: "wood".into()
            }
        );
        assert_eq!(pool.get("wood"), i32::MAX);
        assert!(!pool.can_add("wood", 1));
        assert!(pool.can_add("stone", i32::MAX));
    }

    #[test]
    fn negative_consume_is_rejected() {
        let mut pool = ResourcePool::new();
        pool.add("stone", 5).unwrap();

        assert!(matches!(
            pool.consume("stone", -3),
            Err(CityError::NegativeQuantity { .. })
        ));
        assert_eq!(pool.get("stone"), 5);
    }
}
