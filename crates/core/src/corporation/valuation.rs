//! Dividends, forced valuation adjustment, and income.

use std::collections::BTreeMap;

use tracing::debug;

use crate::company::Company;
use crate::error::GameError;
use crate::log::GameLog;
use crate::market::PriceLadder;
use crate::player::Player;

use super::Corporation;

impl Corporation {
    /// Largest per-share dividend currently declarable: the tier's cap or
    /// what the treasury can cover across all issued shares, whichever is
    /// smaller.
    pub fn max_dividend(&self, ladder: &PriceLadder) -> i64 {
        let tier_cap = ladder
            .tier(self.price_index)
            .map(|tier| tier.max_dividend)
            .unwrap_or(0);
        let issued = self.shares_issued() as i64;
        tier_cap.min(self.cash / issued.max(1))
    }

    /// Pay `amount` per share to every holder, then adjust the share price.
    ///
    /// Bank-pool shares still cost the corporation money even though the
    /// payout goes nowhere: declaring a dividend drains the treasury for
    /// every issued share, held or pooled. The valuation adjustment runs
    /// unconditionally after a successful distribution.
    pub fn pay_dividend(
        &mut self,
        amount: i64,
        players: &mut [Player],
        ladder: &mut PriceLadder,
        log: &mut GameLog,
    ) -> Result<(), GameError> {
        if amount < 0 {
            return Err(GameError::NegativeDividend { amount });
        }
        let max = self.max_dividend(ladder);
        if amount > max {
            return Err(GameError::DividendCapExceeded { amount, max });
        }

        self.cash -= amount * self.bank_shares.len() as i64;

        let mut line = format!("{} pays ${} dividends", self.name, amount);
        for player in players.iter_mut() {
            let total = amount * player.share_count(self.name) as i64;
            self.cash -= total;
            player.cash += total;
            if total > 0 {
                line.push_str(&format!(" - {} receives ${}", player.name, total));
            }
        }
        log.record(line);

        self.adjust_share_price(ladder, log);
        Ok(())
    }

    /// Move the price toward the corporation's valuation.
    ///
    /// Above valuation (book value at least market cap) the corporation
    /// steps up one unowned tier, and again when the first step moved
    /// exactly one index and it is still above; below valuation the same
    /// applies downward. At most two positions per adjustment, in either
    /// direction.
    pub(crate) fn adjust_share_price(&mut self, ladder: &mut PriceLadder, log: &mut GameLog) {
        let old_index = self.price_index;

        if self.above_valuation(ladder) {
            if let Some(index) = ladder.next_unowned_above(self.price_index, 1) {
                self.move_to(index, ladder, log);
            }
            if self.price_index - old_index == 1 && self.above_valuation(ladder) {
                if let Some(index) = ladder.next_unowned_above(self.price_index, 1) {
                    self.move_to(index, ladder, log);
                }
            }
        } else {
            if let Some(index) = ladder.next_unowned_below(self.price_index, 1) {
                self.move_to(index, ladder, log);
            }
            if old_index - self.price_index == 1 && !self.above_valuation(ladder) {
                if let Some(index) = ladder.next_unowned_below(self.price_index, 1) {
                    self.move_to(index, ladder, log);
                }
            }
        }
    }

    fn above_valuation(&self, ladder: &PriceLadder) -> bool {
        self.book_value() - self.market_cap(ladder) >= 0
    }

    /// Recompute income: base company income plus synergy income.
    ///
    /// Synergy income sums, over every owned company, that company's
    /// contribution against the set of co-owned companies keyed by sym. It
    /// is recomputed from scratch on every call so it never goes stale when
    /// the company set changes. `previous_owner` gets their own income
    /// refreshed after a company changed hands.
    pub fn set_income(&mut self, previous_owner: Option<&mut Player>) {
        let base: i64 = self.companies.iter().map(|c| c.income).sum();
        let peers: BTreeMap<&str, &Company> = self
            .companies
            .iter()
            .map(|company| (company.sym.as_str(), company))
            .collect();
        self.synergy_income = self
            .companies
            .iter()
            .map(|company| company.synergy_income(&peers))
            .sum();
        self.income = base + self.synergy_income;
        debug!(corporation = %self.name, income = self.income, "income recomputed");

        if let Some(player) = previous_owner {
            player.set_income();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::company::Tier;
    use crate::corporation::CorporationName;
    use crate::version::GameVersion;

    use super::*;

    fn red_company(sym: &str, value: i64, synergies: &[&str]) -> Company {
        Company::new(
            sym,
            sym,
            Tier::Red,
            value,
            1,
            synergies.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn formed(value: i64) -> (Corporation, Vec<Player>, PriceLadder, GameLog) {
        let mut ladder = PriceLadder::initial_market();
        let mut log = GameLog::new();
        let mut founder = Player::new(1, "Ada");
        founder.cash = 20;
        founder.companies.push(red_company("BME", value, &[]));
        let corp = Corporation::form(
            CorporationName::Android,
            "BME",
            &mut founder,
            10,
            &mut ladder,
            GameVersion::V1,
            &mut log,
        )
        .unwrap();
        (corp, vec![founder], ladder, log)
    }

    #[test]
    fn max_dividend_is_the_smaller_of_both_caps() {
        let (mut corp, _, ladder, _) = formed(62);
        // tier cap 3, cash covers 78 / 10
        assert_eq!(corp.max_dividend(&ladder), 3);

        corp.cash = 20;
        assert_eq!(corp.max_dividend(&ladder), 2);
    }

    #[test]
    fn dividends_drain_bank_shares_and_pay_players() {
        let (mut corp, mut players, mut ladder, mut log) = formed(40);
        players.push(Player::new(2, "Bo"));
        players[1].cash = 11;
        corp.buy_share(2, &mut players, &mut ladder, &mut log).unwrap();

        // holdings: Ada 4, Bo 1, bank 3, issued 8, cash 40, price 11
        corp.pay_dividend(2, &mut players, &mut ladder, &mut log).unwrap();

        assert_eq!(players[0].cash, 20 + 8);
        assert_eq!(players[1].cash, 2);
        assert_eq!(corp.cash(), 40 - 6 - 8 - 2);
        assert!(log
            .messages()
            .any(|m| m == "Android pays $2 dividends - Ada receives $8 - Bo receives $2"));
        // book 64 < cap 88: two steps down, 7 -> 6 -> 5
        assert_eq!(corp.index(), 5);
    }

    #[test]
    fn rejected_dividends_change_nothing() {
        let (mut corp, mut players, mut ladder, mut log) = formed(62);
        let before = (corp.clone(), players.clone(), ladder.clone());

        let err = corp
            .pay_dividend(-1, &mut players, &mut ladder, &mut log)
            .unwrap_err();
        assert_eq!(err, GameError::NegativeDividend { amount: -1 });

        let err = corp
            .pay_dividend(4, &mut players, &mut ladder, &mut log)
            .unwrap_err();
        assert_eq!(err, GameError::DividendCapExceeded { amount: 4, max: 3 });

        assert_eq!(before, (corp, players, ladder));
    }

    #[test]
    fn adjustment_steps_up_twice_while_above_valuation() {
        let (mut corp, mut players, mut ladder, mut log) = formed(90);

        // book 180 against cap 100: up one step, still above, up again
        corp.pay_dividend(0, &mut players, &mut ladder, &mut log).unwrap();

        assert_eq!(corp.index(), 8);
        let moves: Vec<&str> = log
            .messages()
            .filter(|m| m.contains("changes share price"))
            .collect();
        assert_eq!(
            moves,
            vec![
                "Android changes share price from $10 to $11",
                "Android changes share price from $11 to $12",
            ]
        );
    }

    #[test]
    fn adjustment_jumping_an_occupied_tier_stops_after_one_move() {
        let (mut corp, mut players, mut ladder, mut log) = formed(90);
        ladder.claim(7, CorporationName::Bear);

        corp.pay_dividend(0, &mut players, &mut ladder, &mut log).unwrap();

        // single jump past Bear counts as more than one index, no second step
        assert_eq!(corp.index(), 8);
        let moves: Vec<&str> = log
            .messages()
            .filter(|m| m.contains("changes share price"))
            .collect();
        assert_eq!(moves, vec!["Android changes share price from $10 to $12"]);
    }

    #[test]
    fn income_includes_synergies_between_owned_companies() {
        let mut ladder = PriceLadder::initial_market();
        let mut log = GameLog::new();
        let mut founder = Player::new(1, "Ada");
        founder.cash = 20;
        founder.companies.push(red_company("BME", 40, &["KME"]));
        founder.companies.push(red_company("KME", 30, &["BME"]));
        let mut corp = Corporation::form(
            CorporationName::Android,
            "BME",
            &mut founder,
            10,
            &mut ladder,
            GameVersion::V1,
            &mut log,
        )
        .unwrap();
        assert_eq!(corp.income(), 1);
        assert_eq!(corp.synergy_income(), 0);

        let kme = founder.take_company("KME").unwrap();
        corp.add_company(kme);
        corp.set_income(Some(&mut founder));

        assert_eq!(corp.synergy_income(), 2);
        assert_eq!(corp.income(), 4);
        assert_eq!(founder.income, 0);
    }
}
