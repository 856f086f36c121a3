//! Share certificates and the per-corporation holdings ledger.

use std::collections::BTreeMap;

use serde::de;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::corporation::CorporationName;
use crate::player::PlayerId;

/// One of a corporation's ten share certificates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// Issuing corporation.
    pub corporation: CorporationName,
    /// Whether this is the corporation's single president share.
    pub president: bool,
}

impl Share {
    /// An ordinary share of `corporation`.
    pub fn normal(corporation: CorporationName) -> Self {
        Self {
            corporation,
            president: false,
        }
    }

    /// The president share of `corporation`.
    pub fn president(corporation: CorporationName) -> Self {
        Self {
            corporation,
            president: true,
        }
    }
}

/// Who holds shares: a player, the corporation's own bank pool, or the
/// foreign investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HolderId {
    /// A seated player.
    Player(PlayerId),
    /// The issuing corporation's own pool of purchasable shares.
    Bank,
    /// The foreign investor; never participates in presidency.
    Foreign,
}

/// Per-corporation share counts keyed by holder, defaulting to zero.
///
/// Mirrors the certificates held by players and the bank pool so majority
/// holders can be found without re-scanning every share.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLedger {
    #[serde(
        serialize_with = "serialize_counts",
        deserialize_with = "deserialize_counts"
    )]
    counts: BTreeMap<HolderId, usize>,
}

impl ShareLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares the holder currently has; zero when never seen.
    pub fn count(&self, holder: HolderId) -> usize {
        self.counts.get(&holder).copied().unwrap_or(0)
    }

    /// Total shares tracked across all holders.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Largest holding among players; zero when no player holds anything.
    pub fn max_player_holding(&self) -> usize {
        self.counts
            .iter()
            .filter(|(holder, _)| matches!(holder, HolderId::Player(_)))
            .map(|(_, &count)| count)
            .max()
            .unwrap_or(0)
    }

    /// Largest holding among players other than `player`.
    ///
    /// `None` when no other player has ever held a share; holders that sold
    /// back down to zero still count, with a holding of zero.
    pub fn max_among_other_players(&self, player: PlayerId) -> Option<usize> {
        self.counts
            .iter()
            .filter(|(holder, _)| matches!(holder, HolderId::Player(id) if *id != player))
            .map(|(_, &count)| count)
            .max()
    }

    pub(crate) fn add(&mut self, holder: HolderId, count: usize) {
        if count == 0 {
            return;
        }
        *self.counts.entry(holder).or_insert(0) += count;
    }

    pub(crate) fn remove(&mut self, holder: HolderId, count: usize) {
        let entry = self.counts.entry(holder).or_insert(0);
        debug_assert!(*entry >= count, "ledger underflow for {holder:?}");
        *entry = entry.saturating_sub(count);
    }
}

fn holder_key(holder: HolderId) -> String {
    match holder {
        HolderId::Player(id) => format!("player:{id}"),
        HolderId::Bank => "bank".to_string(),
        HolderId::Foreign => "foreign".to_string(),
    }
}

fn serialize_counts<S>(value: &BTreeMap<HolderId, usize>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(value.len()))?;
    for (holder, count) in value {
        map.serialize_entry(&holder_key(*holder), count)?;
    }
    map.end()
}

fn deserialize_counts<'de, D>(deserializer: D) -> Result<BTreeMap<HolderId, usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, usize> = BTreeMap::deserialize(deserializer)?;
    let mut result = BTreeMap::new();
    for (key, count) in raw {
        let holder = match key.as_str() {
            "bank" => HolderId::Bank,
            "foreign" => HolderId::Foreign,
            other => {
                let id = other
                    .strip_prefix("player:")
                    .and_then(|id| id.parse::<PlayerId>().ok())
                    .ok_or_else(|| de::Error::custom(format!("invalid holder key '{key}'")))?;
                HolderId::Player(id)
            }
        };
        result.insert(holder, count);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_defaults_to_zero() {
        let ledger = ShareLedger::new();
        assert_eq!(ledger.count(HolderId::Player(3)), 0);
        assert_eq!(ledger.count(HolderId::Bank), 0);
        assert_eq!(ledger.max_player_holding(), 0);
    }

    #[test]
    fn zero_holdings_still_count_as_other_players() {
        let mut ledger = ShareLedger::new();
        assert_eq!(ledger.max_among_other_players(1), None);

        ledger.add(HolderId::Player(2), 2);
        ledger.remove(HolderId::Player(2), 2);
        assert_eq!(ledger.max_among_other_players(1), Some(0));
    }

    #[test]
    fn bank_holdings_never_influence_player_maxima() {
        let mut ledger = ShareLedger::new();
        ledger.add(HolderId::Bank, 5);
        ledger.add(HolderId::Player(1), 2);

        assert_eq!(ledger.max_player_holding(), 2);
        assert_eq!(ledger.max_among_other_players(1), None);
        assert_eq!(ledger.total(), 7);
    }

    #[test]
    fn ledger_serializes_with_string_keys() -> anyhow::Result<()> {
        let mut ledger = ShareLedger::new();
        ledger.add(HolderId::Player(4), 3);
        ledger.add(HolderId::Bank, 2);

        let json = serde_json::to_value(&ledger)?;
        assert_eq!(json["counts"]["player:4"], 3);
        assert_eq!(json["counts"]["bank"], 2);

        let back: ShareLedger = serde_json::from_value(json)?;
        assert_eq!(back, ledger);
        Ok(())
    }
}
