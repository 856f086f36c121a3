#![allow(missing_docs)]

//! Players and the foreign investor.

use serde::{Deserialize, Serialize};

use crate::company::Company;
use crate::corporation::CorporationName;
use crate::shares::Share;

/// Stable identifier for a player within one game.
pub type PlayerId = u32;

/// A seated player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub cash: i64,
    /// Turn-order rank; only used to break presidency ties.
    pub order: u32,
    pub income: i64,
    /// Shares held, in acquisition order (president shares first).
    pub shares: Vec<Share>,
    /// Companies owned directly, not yet folded into a corporation.
    pub companies: Vec<Company>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cash: 0,
            order: id,
            income: 0,
            shares: Vec::new(),
            companies: Vec::new(),
        }
    }

    /// Shares of the given corporation, in holding order.
    pub fn corporation_shares(&self, corporation: CorporationName) -> Vec<&Share> {
        self.shares
            .iter()
            .filter(|share| share.corporation == corporation)
            .collect()
    }

    pub(crate) fn corporation_shares_mut(
        &mut self,
        corporation: CorporationName,
    ) -> Vec<&mut Share> {
        self.shares
            .iter_mut()
            .filter(|share| share.corporation == corporation)
            .collect()
    }

    /// Number of shares held in the given corporation.
    pub fn share_count(&self, corporation: CorporationName) -> usize {
        self.shares
            .iter()
            .filter(|share| share.corporation == corporation)
            .count()
    }

    /// Remove and return the last-held share of the given corporation.
    pub(crate) fn pop_corporation_share(&mut self, corporation: CorporationName) -> Option<Share> {
        let position = self
            .shares
            .iter()
            .rposition(|share| share.corporation == corporation)?;
        Some(self.shares.remove(position))
    }

    /// Remove and return the company with the given sym, if owned.
    pub fn take_company(&mut self, sym: &str) -> Option<Company> {
        let position = self.companies.iter().position(|c| c.sym == sym)?;
        Some(self.companies.remove(position))
    }

    /// Recompute per-turn income from the companies owned directly.
    pub fn set_income(&mut self) {
        self.income = self.companies.iter().map(|c| c.income).sum();
    }

    /// Credit this turn's income.
    pub fn collect_income(&mut self) {
        self.cash += self.income;
    }
}

/// Non-player holder that owns companies and may hold shares, but has no
/// turn order and never participates in presidency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignInvestor {
    pub cash: i64,
    pub income: i64,
    pub shares: Vec<Share>,
    pub companies: Vec<Company>,
}

impl ForeignInvestor {
    pub fn new(cash: i64) -> Self {
        Self {
            cash,
            ..Self::default()
        }
    }

    /// Recompute per-turn income from owned companies.
    pub fn set_income(&mut self) {
        self.income = self.companies.iter().map(|c| c.income).sum();
    }

    /// Credit this turn's income.
    pub fn collect_income(&mut self) {
        self.cash += self.income;
    }
}
