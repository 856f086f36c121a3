#![warn(clippy::all, missing_docs)]

//! Stock-market and corporation ownership engine.
//!
//! This crate hosts the price ladder, share ledger, and corporation
//! aggregate for a Rolling Stock style trading game: forming corporations
//! from companies, buying, selling and issuing shares, resolving the
//! presidency, and paying dividends with the forced valuation adjustment.
//! Turn sequencing, action validation, persistence, and presentation belong
//! to the match controller; this crate only executes one requested
//! operation against in-memory state and returns the outcome or a typed
//! rejection.

pub mod company;
pub mod corporation;
pub mod error;
pub mod log;
pub mod market;
pub mod player;
pub mod shares;
pub mod version;

pub use company::{Company, Tier};
pub use corporation::{Corporation, CorporationName, ShareInfo, STARTING_SHARES};
pub use error::GameError;
pub use log::{GameLog, LogEntry};
pub use market::{PriceLadder, PriceTier};
pub use player::{ForeignInvestor, Player, PlayerId};
pub use shares::{HolderId, Share, ShareLedger};
pub use version::GameVersion;
