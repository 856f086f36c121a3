//! Stock-market price ladder and tier occupancy.

use serde::{Deserialize, Serialize};

use crate::corporation::CorporationName;

/// Prices of the initial market, lowest tier first.
const INITIAL_MARKET: [i64; 32] = [
    0, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 18, 20, 22, 24, 26, 29, 32, 35, 39, 43, 47, 52,
    57, 63, 69, 76, 84, 92, 100,
];

/// One tier of the price ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    /// 0-based position in the ladder, monotonic with price.
    pub index: usize,
    /// Share price at this tier.
    pub price: i64,
    /// Cap on the per-share dividend a corporation at this tier may declare.
    pub max_dividend: i64,
}

/// Ordered ladder of price tiers with an occupancy table.
///
/// At most one corporation occupies a tier at a time. Occupancy is a lookup
/// table from tier index to occupant; tiers never own corporations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLadder {
    tiers: Vec<PriceTier>,
    owners: Vec<Option<CorporationName>>,
}

impl PriceLadder {
    /// Build the standard 32-tier initial market with every tier unowned.
    ///
    /// The per-tier dividend cap is a third of the share price.
    pub fn initial_market() -> Self {
        let tiers = INITIAL_MARKET
            .iter()
            .enumerate()
            .map(|(index, &price)| PriceTier {
                index,
                price,
                max_dividend: price / 3,
            })
            .collect::<Vec<_>>();
        let owners = vec![None; tiers.len()];
        Self { tiers, owners }
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether the ladder has no tiers.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// The tier at `index`, if it exists.
    pub fn tier(&self, index: usize) -> Option<&PriceTier> {
        self.tiers.get(index)
    }

    /// Price at `index`. Panics if `index` is outside the ladder.
    pub fn price(&self, index: usize) -> i64 {
        self.tiers[index].price
    }

    /// Index of the tier with exactly this price, if any.
    pub fn index_of_price(&self, price: i64) -> Option<usize> {
        self.tiers.iter().position(|tier| tier.price == price)
    }

    /// Corporation currently occupying `index`, if any.
    pub fn owner(&self, index: usize) -> Option<CorporationName> {
        self.owners.get(index).copied().flatten()
    }

    /// Whether no corporation occupies `index`.
    pub fn is_unowned(&self, index: usize) -> bool {
        self.owner(index).is_none()
    }

    pub(crate) fn claim(&mut self, index: usize, corporation: CorporationName) {
        debug_assert!(self.owners[index].is_none(), "tier {index} already owned");
        self.owners[index] = Some(corporation);
    }

    pub(crate) fn release(&mut self, index: usize) {
        self.owners[index] = None;
    }

    /// First unowned tier at or above `from + interval`, scanning upward.
    ///
    /// Returns `None` when `from` is already the top tier or every tier in
    /// range is occupied; moving above the last index is impossible.
    pub fn next_unowned_above(&self, from: usize, interval: usize) -> Option<usize> {
        let top = self.tiers.len().checked_sub(1)?;
        if from >= top {
            return None;
        }
        let start = (from + interval).min(top);
        (start..self.tiers.len()).find(|&index| self.is_unowned(index))
    }

    /// First unowned tier at or below `from - interval`, scanning downward.
    ///
    /// Returns `None` when `from` is already the bottom tier or every tier
    /// in range is occupied; moving below index 0 is impossible.
    pub fn next_unowned_below(&self, from: usize, interval: usize) -> Option<usize> {
        if from == 0 {
            return None;
        }
        let start = from.saturating_sub(interval);
        (0..=start).rev().find(|&index| self.is_unowned(index))
    }
}

impl Default for PriceLadder {
    fn default() -> Self {
        Self::initial_market()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_market_shape() {
        let ladder = PriceLadder::initial_market();
        assert_eq!(ladder.len(), 32);
        assert_eq!(ladder.price(0), 0);
        assert_eq!(ladder.price(6), 10);
        assert_eq!(ladder.price(31), 100);
        assert!(ladder.tier(32).is_none());
        for window in ladder.tiers.windows(2) {
            assert!(window[0].price < window[1].price);
        }
    }

    #[test]
    fn max_dividend_is_a_third_of_price() {
        let ladder = PriceLadder::initial_market();
        assert_eq!(ladder.tier(6).map(|t| t.max_dividend), Some(3));
        assert_eq!(ladder.tier(31).map(|t| t.max_dividend), Some(33));
    }

    #[test]
    fn search_skips_occupied_tiers() {
        let mut ladder = PriceLadder::initial_market();
        ladder.claim(7, CorporationName::Android);
        ladder.claim(8, CorporationName::Bear);

        assert_eq!(ladder.next_unowned_above(6, 1), Some(9));
        assert_eq!(ladder.next_unowned_below(9, 1), Some(6));

        ladder.release(8);
        assert_eq!(ladder.next_unowned_above(6, 1), Some(8));
    }

    #[test]
    fn search_respects_ladder_boundaries() {
        let mut ladder = PriceLadder::initial_market();
        assert_eq!(ladder.next_unowned_above(31, 1), None);
        assert_eq!(ladder.next_unowned_below(0, 1), None);

        ladder.claim(0, CorporationName::Star);
        assert_eq!(ladder.next_unowned_below(1, 1), None);
        assert_eq!(ladder.next_unowned_below(2, 1), Some(1));
    }

    #[test]
    fn larger_intervals_jump_further() {
        let ladder = PriceLadder::initial_market();
        assert_eq!(ladder.next_unowned_above(6, 2), Some(8));
        assert_eq!(ladder.next_unowned_below(6, 2), Some(4));
        assert_eq!(ladder.next_unowned_above(30, 5), Some(31));
    }
}
