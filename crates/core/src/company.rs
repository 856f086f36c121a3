//! Companies and the synergy income they generate together.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Company class, ordered cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Tier {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Tier {
    /// All tiers, cheapest first.
    pub const ALL: [Tier; 6] = [
        Tier::Red,
        Tier::Orange,
        Tier::Yellow,
        Tier::Green,
        Tier::Blue,
        Tier::Purple,
    ];

    /// Share prices at which a corporation may be founded from a company of
    /// this tier.
    pub fn founding_prices(self) -> RangeInclusive<i64> {
        match self {
            Tier::Red => 10..=14,
            Tier::Orange => 15..=24,
            Tier::Yellow => 26..=35,
            Tier::Green => 39..=52,
            Tier::Blue => 57..=76,
            Tier::Purple => 84..=100,
        }
    }

    /// Income added by one synergy link whose cheaper partner is of this tier.
    pub fn synergy_value(self) -> i64 {
        match self {
            Tier::Red => 1,
            Tier::Orange => 2,
            Tier::Yellow => 4,
            Tier::Green => 8,
            Tier::Blue => 16,
            Tier::Purple => 32,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Red => "red",
            Tier::Orange => "orange",
            Tier::Yellow => "yellow",
            Tier::Green => "green",
            Tier::Blue => "blue",
            Tier::Purple => "purple",
        };
        f.write_str(name)
    }
}

/// A company, owned by a player, the foreign investor, or a corporation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Short ticker; keys synergy lookups.
    pub sym: String,
    /// Full company name.
    pub name: String,
    /// Company class.
    pub tier: Tier,
    /// Intrinsic value; drives founding capitalization and book value.
    pub value: i64,
    /// Per-turn base income.
    pub income: i64,
    /// Syms of the partner companies this company has a synergy with.
    pub synergies: Vec<String>,
}

impl Company {
    /// Create a company.
    pub fn new(
        sym: impl Into<String>,
        name: impl Into<String>,
        tier: Tier,
        value: i64,
        income: i64,
        synergies: Vec<String>,
    ) -> Self {
        Self {
            sym: sym.into(),
            name: name.into(),
            tier,
            value,
            income,
            synergies,
        }
    }

    /// Income this company adds when co-owned with the given peers.
    ///
    /// `peers` is keyed by sym and may include this company itself, which
    /// never counts as its own partner. The pair value is the cheaper
    /// partner's tier value. Recomputed from scratch on every call.
    pub fn synergy_income(&self, peers: &BTreeMap<&str, &Company>) -> i64 {
        self.synergies
            .iter()
            .filter_map(|sym| peers.get(sym.as_str()))
            .filter(|partner| partner.sym != self.sym)
            .map(|partner| self.tier.min(partner.tier).synergy_value())
            .sum()
    }
}
