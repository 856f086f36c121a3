//! Domain errors returned by engine operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::company::Tier;
use crate::corporation::CorporationName;
use crate::player::PlayerId;

/// Rejection raised by an engine operation.
///
/// Every operation validates all of its preconditions before mutating
/// anything, so a returned error means state is unchanged. Nothing is
/// retried internally; the match controller surfaces the message to the
/// acting player and re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    /// The requested founding tier already has an occupant.
    #[error("share price {price} taken by {corporation}")]
    TierTaken {
        /// Price of the contested tier.
        price: i64,
        /// Corporation already occupying it.
        corporation: CorporationName,
    },

    /// The requested founding price is not valid for the company's tier.
    #[error("share price {price} not valid for a {tier} company")]
    InvalidTier {
        /// Requested founding price.
        price: i64,
        /// Tier of the founding company.
        tier: Tier,
    },

    /// The acting player cannot cover the required amount.
    #[error("not enough money, need ${required} but only ${available} available")]
    InsufficientFunds {
        /// Amount the operation would debit.
        required: i64,
        /// Cash the player actually has.
        available: i64,
    },

    /// The bank pool has no share to buy.
    #[error("cannot buy share of {corporation}, none available")]
    NoShareAvailable {
        /// Corporation whose pool is empty.
        corporation: CorporationName,
    },

    /// The player holds no sellable share of this corporation.
    #[error("cannot sell share of {corporation}")]
    NoSellableShare {
        /// Corporation the sale was attempted against.
        corporation: CorporationName,
    },

    /// The unissued-share queue is empty.
    #[error("cannot issue share of {corporation}, none left")]
    NoShareToIssue {
        /// Corporation that has issued all ten shares.
        corporation: CorporationName,
    },

    /// Dividends must not be negative.
    #[error("dividend must be positive, got {amount}")]
    NegativeDividend {
        /// Requested per-share amount.
        amount: i64,
    },

    /// The dividend exceeds corporation cash or the tier cap.
    #[error("dividend {amount} must be payable with corporation cash and must not exceed 1/3 share price per share (max {max})")]
    DividendCapExceeded {
        /// Requested per-share amount.
        amount: i64,
        /// Largest declarable per-share amount.
        max: i64,
    },

    /// The founding player does not own the named company.
    #[error("company {sym} is not owned by the founding player")]
    CompanyNotOwned {
        /// Sym the orchestrator asked to fold in.
        sym: String,
    },

    /// The referenced player is not part of this game.
    #[error("no player with id {id}")]
    UnknownPlayer {
        /// Offending player id.
        id: PlayerId,
    },
}
