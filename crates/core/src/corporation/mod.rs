//! Corporation aggregate: formation, share trading, and ownership.

mod president;
mod valuation;

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::company::Company;
use crate::error::GameError;
use crate::log::GameLog;
use crate::market::PriceLadder;
use crate::player::{Player, PlayerId};
use crate::shares::{HolderId, Share, ShareLedger};
use crate::version::GameVersion;

/// Number of share certificates a corporation has for its whole lifetime.
pub const STARTING_SHARES: usize = 10;

/// The fixed set of corporation identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum CorporationName {
    Android,
    Bear,
    Eagle,
    Horse,
    Jupiter,
    Orion,
    Saturn,
    Ship,
    Star,
    Wheel,
}

impl CorporationName {
    /// Every corporation identity, in canonical order.
    pub const ALL: [CorporationName; 10] = [
        CorporationName::Android,
        CorporationName::Bear,
        CorporationName::Eagle,
        CorporationName::Horse,
        CorporationName::Jupiter,
        CorporationName::Orion,
        CorporationName::Saturn,
        CorporationName::Ship,
        CorporationName::Star,
        CorporationName::Wheel,
    ];

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            CorporationName::Android => "Android",
            CorporationName::Bear => "Bear",
            CorporationName::Eagle => "Eagle",
            CorporationName::Horse => "Horse",
            CorporationName::Jupiter => "Jupiter",
            CorporationName::Orion => "Orion",
            CorporationName::Saturn => "Saturn",
            CorporationName::Ship => "Ship",
            CorporationName::Star => "Star",
            CorporationName::Wheel => "Wheel",
        }
    }
}

impl fmt::Display for CorporationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capitalization of a newly formed corporation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareInfo {
    /// Shares granted to the founder (and matched into the bank pool).
    pub num_shares: usize,
    /// Rounding remainder the founder pays into the treasury.
    pub seed: i64,
    /// Opening treasury cash.
    pub cash: i64,
}

/// A corporation: a price-ladder position, a share ledger, cash, and the
/// companies it owns.
///
/// Operations take the collaborators they touch (`PriceLadder`, players,
/// `GameLog`) explicitly and are not reentrant; the match controller must
/// serialize mutating calls per game. Every operation validates all of its
/// preconditions before the first mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corporation {
    name: CorporationName,
    president: Option<PlayerId>,
    companies: Vec<Company>,
    cash: i64,
    pending_cash: i64,
    income: i64,
    synergy_income: i64,
    price_index: usize,
    unissued: VecDeque<Share>,
    bank_shares: Vec<Share>,
    ledger: ShareLedger,
    version: GameVersion,
}

impl Corporation {
    /// Capitalization for founding a company of `value` at `price`:
    /// `num_shares` is the value divided by the price rounded up, `seed` the
    /// rounding remainder the founder covers, `cash` the opening treasury.
    pub fn initial_shares_info(value: i64, price: i64) -> ShareInfo {
        let num_shares = (value + price - 1) / price;
        let seed = num_shares * price - value;
        ShareInfo {
            num_shares: num_shares as usize,
            seed,
            cash: num_shares * price + seed,
        }
    }

    /// Form a corporation from one of the founder's companies at the tier
    /// with the requested price.
    ///
    /// The founder pays the seed, receives the president share plus the rest
    /// of their grant, and an equal grant (capped by what remains of the ten
    /// shares) moves into the bank pool. The company transfers from the
    /// founder to the new corporation and income is computed immediately.
    pub fn form(
        name: CorporationName,
        company_sym: &str,
        founder: &mut Player,
        tier_price: i64,
        ladder: &mut PriceLadder,
        version: GameVersion,
        log: &mut GameLog,
    ) -> Result<Self, GameError> {
        let position = founder
            .companies
            .iter()
            .position(|c| c.sym == company_sym)
            .ok_or_else(|| GameError::CompanyNotOwned {
                sym: company_sym.to_string(),
            })?;
        let company_tier = founder.companies[position].tier;
        let company_value = founder.companies[position].value;

        let tier_index = ladder
            .index_of_price(tier_price)
            .ok_or(GameError::InvalidTier {
                price: tier_price,
                tier: company_tier,
            })?;
        if let Some(occupant) = ladder.owner(tier_index) {
            return Err(GameError::TierTaken {
                price: tier_price,
                corporation: occupant,
            });
        }
        if !company_tier.founding_prices().contains(&tier_price) {
            return Err(GameError::InvalidTier {
                price: tier_price,
                tier: company_tier,
            });
        }

        let info = Self::initial_shares_info(company_value, tier_price);
        if founder.cash < info.seed {
            return Err(GameError::InsufficientFunds {
                required: info.seed,
                available: founder.cash,
            });
        }

        founder.cash -= info.seed;

        let mut unissued: VecDeque<Share> = VecDeque::with_capacity(STARTING_SHARES);
        unissued.push_back(Share::president(name));
        for _ in 1..STARTING_SHARES {
            unissued.push_back(Share::normal(name));
        }

        let mut ledger = ShareLedger::new();
        let founder_grant = info.num_shares.min(STARTING_SHARES);
        for _ in 0..founder_grant {
            if let Some(share) = unissued.pop_front() {
                founder.shares.push(share);
            }
        }
        ledger.add(HolderId::Player(founder.id), founder_grant);

        let bank_grant = info.num_shares.min(unissued.len());
        let mut bank_shares = Vec::with_capacity(bank_grant);
        for _ in 0..bank_grant {
            if let Some(share) = unissued.pop_front() {
                bank_shares.push(share);
            }
        }
        ledger.add(HolderId::Bank, bank_grant);

        ladder.claim(tier_index, name);

        let company = founder.companies.remove(position);
        let company_name = company.name.clone();
        founder.set_income();

        let mut corporation = Self {
            name,
            president: Some(founder.id),
            companies: vec![company],
            cash: info.cash,
            pending_cash: 0,
            income: 0,
            synergy_income: 0,
            price_index: tier_index,
            unissued,
            bank_shares,
            ledger,
            version,
        };
        corporation.set_income(None);

        log.record(format!(
            "{} forms corporation {} with {} at ${} - {} shares issued.",
            founder.name,
            name,
            company_name,
            tier_price,
            founder_grant + bank_grant
        ));
        info!(corporation = %name, price = tier_price, "corporation formed");
        Ok(corporation)
    }

    /// Whether the bank pool has a share left to buy.
    pub fn can_buy_share(&self) -> bool {
        !self.bank_shares.is_empty()
    }

    /// Buy one bank-pool share for `buyer`.
    ///
    /// The price rises to the nearest unowned tier strictly above before the
    /// buyer pays, so the purchase executes at the post-move price. When the
    /// ladder has no unowned tier above, the purchase executes at the
    /// current price without a move. Bank-pool shares generate no treasury
    /// cash; that was counted at formation.
    pub fn buy_share(
        &mut self,
        buyer: PlayerId,
        players: &mut [Player],
        ladder: &mut PriceLadder,
        log: &mut GameLog,
    ) -> Result<(), GameError> {
        let buyer_index = players
            .iter()
            .position(|p| p.id == buyer)
            .ok_or(GameError::UnknownPlayer { id: buyer })?;
        if !self.can_buy_share() {
            return Err(GameError::NoShareAvailable {
                corporation: self.name,
            });
        }
        let target = ladder.next_unowned_above(self.price_index, 1);
        let purchase_price = ladder.price(target.unwrap_or(self.price_index));
        if players[buyer_index].cash < purchase_price {
            return Err(GameError::InsufficientFunds {
                required: purchase_price,
                available: players[buyer_index].cash,
            });
        }

        if let Some(index) = target {
            self.move_to(index, ladder, log);
        }
        let player = &mut players[buyer_index];
        player.cash -= purchase_price;
        if let Some(share) = self.bank_shares.pop() {
            player.shares.push(share);
        }
        self.ledger.remove(HolderId::Bank, 1);
        self.ledger.add(HolderId::Player(buyer), 1);
        log.record(format!(
            "{} buys share of {} for ${}",
            players[buyer_index].name, self.name, purchase_price
        ));
        self.change_president(players, log);
        Ok(())
    }

    /// Whether `player` holds a share they are allowed to sell.
    ///
    /// The candidate is the player's last-held share of this corporation. A
    /// president share may only be relinquished when the player's holding is
    /// tied with the largest holding among the other shareholders.
    pub fn can_sell_share(&self, player: &Player) -> bool {
        let shares = player.corporation_shares(self.name);
        let Some(candidate) = shares.last() else {
            return false;
        };
        if !candidate.president {
            return true;
        }
        let own = self.ledger.count(HolderId::Player(player.id));
        match self.ledger.max_among_other_players(player.id) {
            Some(max) => own == max,
            None => false,
        }
    }

    /// Sell one of `seller`'s shares back into the bank pool.
    ///
    /// The price drops to the nearest unowned tier strictly below (no move
    /// when none exists); the seller is credited and the corporation debited
    /// at the post-move price.
    pub fn sell_share(
        &mut self,
        seller: PlayerId,
        players: &mut [Player],
        ladder: &mut PriceLadder,
        log: &mut GameLog,
    ) -> Result<(), GameError> {
        let seller_index = players
            .iter()
            .position(|p| p.id == seller)
            .ok_or(GameError::UnknownPlayer { id: seller })?;
        if !self.can_sell_share(&players[seller_index]) {
            return Err(GameError::NoSellableShare {
                corporation: self.name,
            });
        }

        if let Some(index) = ladder.next_unowned_below(self.price_index, 1) {
            self.move_to(index, ladder, log);
        }
        let sale_price = ladder.price(self.price_index);
        let player = &mut players[seller_index];
        player.cash += sale_price;
        self.cash -= sale_price;
        if let Some(mut share) = player.pop_corporation_share(self.name) {
            share.president = false;
            self.bank_shares.push(share);
        }
        self.ledger.remove(HolderId::Player(seller), 1);
        self.ledger.add(HolderId::Bank, 1);
        log.record(format!(
            "{} sells share of {} for ${}",
            players[seller_index].name, self.name, sale_price
        ));
        self.change_president(players, log);
        Ok(())
    }

    /// Whether a share remains in the unissued queue.
    pub fn can_issue_share(&self) -> bool {
        !self.unissued.is_empty()
    }

    /// Issue one share from the unissued queue into the bank pool.
    ///
    /// Issuing depresses the price like a sale: the issue price is the
    /// nearest unowned tier below current, and the corporation moves there
    /// when it differs. The treasury is credited with the issue price.
    pub fn issue_share(
        &mut self,
        ladder: &mut PriceLadder,
        log: &mut GameLog,
    ) -> Result<(), GameError> {
        if !self.can_issue_share() {
            return Err(GameError::NoShareToIssue {
                corporation: self.name,
            });
        }
        let target = ladder.next_unowned_below(self.price_index, 1);
        let issue_price = ladder.price(target.unwrap_or(self.price_index));
        log.record(format!(
            "{} issues a share and receives ${}",
            self.name, issue_price
        ));
        if let Some(index) = target {
            self.move_to(index, ladder, log);
        }
        self.cash += issue_price;
        if let Some(share) = self.unissued.pop_front() {
            self.bank_shares.push(share);
        }
        self.ledger.add(HolderId::Bank, 1);
        Ok(())
    }

    /// Move to `index`, updating ladder occupancy and logging the change.
    fn move_to(&mut self, index: usize, ladder: &mut PriceLadder, log: &mut GameLog) {
        if index == self.price_index {
            return;
        }
        log.record(format!(
            "{} changes share price from ${} to ${}",
            self.name,
            ladder.price(self.price_index),
            ladder.price(index)
        ));
        ladder.release(self.price_index);
        ladder.claim(index, self.name);
        self.price_index = index;
    }

    /// Corporation identity.
    pub fn name(&self) -> CorporationName {
        self.name
    }

    /// Current president, if shares have been distributed.
    pub fn president(&self) -> Option<PlayerId> {
        self.president
    }

    /// Companies owned by this corporation.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Treasury cash.
    pub fn cash(&self) -> i64 {
        self.cash
    }

    /// Cash committed but not yet received; counted in book value.
    pub fn pending_cash(&self) -> i64 {
        self.pending_cash
    }

    /// Record cash committed during a purchase phase.
    pub fn set_pending_cash(&mut self, amount: i64) {
        self.pending_cash = amount;
    }

    /// Per-turn income including synergies.
    pub fn income(&self) -> i64 {
        self.income
    }

    /// Synergy part of the income.
    pub fn synergy_income(&self) -> i64 {
        self.synergy_income
    }

    /// Credit this turn's income to the treasury.
    pub fn collect_income(&mut self) {
        self.cash += self.income;
    }

    /// Current ladder index.
    pub fn index(&self) -> usize {
        self.price_index
    }

    /// Current share price.
    pub fn price(&self, ladder: &PriceLadder) -> i64 {
        ladder.price(self.price_index)
    }

    /// Ruleset revision this corporation plays under.
    pub fn version(&self) -> GameVersion {
        self.version
    }

    /// Shares in the bank pool, available for players to buy.
    pub fn bank_share_count(&self) -> usize {
        self.bank_shares.len()
    }

    /// Shares never issued.
    pub fn unissued_count(&self) -> usize {
        self.unissued.len()
    }

    /// Shares issued so far out of the fixed ten.
    pub fn shares_issued(&self) -> usize {
        STARTING_SHARES - self.unissued.len()
    }

    /// Holdings ledger for this corporation.
    pub fn ledger(&self) -> &ShareLedger {
        &self.ledger
    }

    /// Treasury cash plus pending cash plus the value of owned companies.
    pub fn book_value(&self) -> i64 {
        self.cash + self.pending_cash + self.companies.iter().map(|c| c.value).sum::<i64>()
    }

    /// Issued share count times the current price.
    pub fn market_cap(&self, ladder: &PriceLadder) -> i64 {
        self.shares_issued() as i64 * self.price(ladder)
    }

    /// Fold a purchased company into the corporation and refresh income.
    pub fn add_company(&mut self, company: Company) {
        self.companies.push(company);
        self.set_income(None);
    }

    /// Remove a closed or sold company by sym and refresh income.
    pub fn remove_company(&mut self, sym: &str) -> Option<Company> {
        let position = self.companies.iter().position(|c| c.sym == sym)?;
        let company = self.companies.remove(position);
        self.set_income(None);
        Some(company)
    }

    /// Whether the corporation is insolvent: price at zero, no companies
    /// left, or negative cash. Side-effect free; the match controller
    /// decides what follows.
    pub fn is_bankrupt(&self, ladder: &PriceLadder) -> bool {
        self.price(ladder) == 0 || self.companies.is_empty() || self.cash < 0
    }
}
