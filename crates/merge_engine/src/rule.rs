use core::ops::RangeInclusive;

use strum::{Display, EnumIter, EnumString};

use crate::grid::Value;

/// Values a rule spawns: `common` most of the time, `rare` with probability
/// `rare_chance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnValues {
    pub common: Value,
    pub rare: Value,
    pub rare_chance: f64,
}

impl SpawnValues {
    /// Picks a value from a uniform roll in `[0, 1)`.
    pub fn pick(self, roll: f64) -> Value {
        if roll < 1.0 - self.rare_chance {
            self.common
        } else {
            self.rare
        }
    }
}

/// Decides which neighbours fuse during a slide and what they become.
pub trait MergeRule {
    fn can_merge(&self, a: Value, b: Value) -> bool;
    fn combine(&self, a: Value, b: Value) -> Value;
    fn spawn_values(&self) -> SpawnValues;
}

/// 2048: equal tiles merge into their double.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classic;

impl MergeRule for Classic {
    fn can_merge(&self, a: Value, b: Value) -> bool {
        a == b
    }

    fn combine(&self, a: Value, b: Value) -> Value {
        a + b
    }

    fn spawn_values(&self) -> SpawnValues {
        SpawnValues {
            common: 2,
            rare: 4,
            rare_chance: 0.1,
        }
    }
}

/// Entropy Grid: neighbours whose sum is a multiple of five fuse into that sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Entropy;

impl MergeRule for Entropy {
    fn can_merge(&self, a: Value, b: Value) -> bool {
        (a + b) % 5 == 0
    }

    fn combine(&self, a: Value, b: Value) -> Value {
        a + b
    }

    fn spawn_values(&self) -> SpawnValues {
        SpawnValues {
            common: 1,
            rare: 2,
            rare_chance: 0.1,
        }
    }
}

/// Named rule selection, parsed from `"classic"` / `"entropy"`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum RuleKind {
    #[default]
    Classic,
    Entropy,
}

impl RuleKind {
    pub fn strategy(self) -> &'static dyn MergeRule {
        match self {
            Self::Classic => &Classic,
            Self::Entropy => &Entropy,
        }
    }

    pub const fn default_size(self) -> usize {
        match self {
            Self::Classic => 4,
            Self::Entropy => 5,
        }
    }

    /// Grid widths a session may pick for this rule.
    pub const fn size_range(self) -> RangeInclusive<usize> {
        match self {
            Self::Classic => 4..=8,
            Self::Entropy => 5..=5,
        }
    }
}

impl MergeRule for RuleKind {
    fn can_merge(&self, a: Value, b: Value) -> bool {
        self.strategy().can_merge(a, b)
    }

    fn combine(&self, a: Value, b: Value) -> Value {
        self.strategy().combine(a, b)
    }

    fn spawn_values(&self) -> SpawnValues {
        self.strategy().spawn_values()
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;

    #[test]
    fn classic_merges_equal_values_into_their_double() {
        assert!(Classic.can_merge(8, 8), "equal values");
        assert!(!Classic.can_merge(8, 4), "different values");
        assert_eq!(Classic.combine(8, 8), 16, "doubling");
    }

    #[test]
    fn entropy_merges_sums_divisible_by_five() {
        assert!(Entropy.can_merge(1, 4), "1 + 4 = 5");
        assert!(Entropy.can_merge(2, 3), "2 + 3 = 5");
        assert!(Entropy.can_merge(5, 5), "5 + 5 = 10");
        assert!(!Entropy.can_merge(2, 2), "equal values are not enough");
        assert_eq!(Entropy.combine(7, 3), 10, "sum, not double");
    }

    #[test]
    fn spawn_values_split_at_ninety_percent() {
        let values = Classic.spawn_values();
        assert_eq!(values.pick(0.0), 2, "low roll");
        assert_eq!(values.pick(0.899), 2, "just under the split");
        assert_eq!(values.pick(0.9), 4, "at the split");
        assert_eq!(values.pick(0.999), 4, "high roll");
        assert_eq!(Entropy.spawn_values().pick(0.5), 1, "entropy common value");
        assert_eq!(Entropy.spawn_values().pick(0.95), 2, "entropy rare value");
    }

    #[test]
    fn rule_kind_parses_and_delegates() {
        assert_eq!(RuleKind::from_str("entropy"), Ok(RuleKind::Entropy), "parse");
        assert_eq!(RuleKind::Classic.to_string(), "classic", "display");
        assert!(RuleKind::Entropy.can_merge(1, 4), "delegates to Entropy");
        assert!(!RuleKind::Classic.can_merge(1, 4), "delegates to Classic");
        assert!(
            RuleKind::Classic
                .size_range()
                .contains(&RuleKind::Classic.default_size()),
            "default size is allowed"
        );
        assert_eq!(RuleKind::Entropy.size_range(), 5..=5, "entropy is fixed at 5");
    }
}
