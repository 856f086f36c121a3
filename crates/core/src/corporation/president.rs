//! President resolution after ownership changes.

use tracing::info;

use crate::log::GameLog;
use crate::player::{Player, PlayerId};
use crate::shares::HolderId;

use super::Corporation;

impl Corporation {
    /// Re-elect the president after an ownership change.
    ///
    /// The president is the player with the strict-majority holding. Ties
    /// keep the incumbent when they are still among the maximal holders;
    /// otherwise presidency rotates forward through turn order: the tied
    /// holder with the smallest `order` greater than the incumbent's wins,
    /// wrapping to the overall smallest when none is greater. Produces at
    /// most one transition (and one log line) per call.
    pub(crate) fn change_president(&mut self, players: &mut [Player], log: &mut GameLog) {
        let max = self.ledger.max_player_holding();
        if max == 0 {
            return;
        }

        let mut holders: Vec<(u32, PlayerId)> = players
            .iter()
            .filter(|p| self.ledger.count(HolderId::Player(p.id)) == max)
            .map(|p| (p.order, p.id))
            .collect();
        holders.sort_by_key(|&(order, _)| order);
        if holders.is_empty() {
            return;
        }
        if let Some(current) = self.president {
            if holders.iter().any(|&(_, id)| id == current) {
                return;
            }
        }

        let previous_order = self
            .president
            .and_then(|id| players.iter().find(|p| p.id == id))
            .map(|p| p.order);
        if let Some(current) = self.president {
            if let Some(player) = players.iter_mut().find(|p| p.id == current) {
                for share in player.corporation_shares_mut(self.name) {
                    share.president = false;
                }
            }
        }

        let (_, elected) = previous_order
            .and_then(|prev| holders.iter().copied().find(|&(order, _)| prev < order))
            .unwrap_or(holders[0]);
        if let Some(player) = players.iter_mut().find(|p| p.id == elected) {
            if let Some(share) = player.corporation_shares_mut(self.name).into_iter().next() {
                share.president = true;
            }
            log.record(format!("{} becomes president of {}", player.name, self.name));
        }
        self.president = Some(elected);
        info!(corporation = %self.name, player = elected, "presidency changes");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crate::corporation::{CorporationName, STARTING_SHARES};
    use crate::shares::{Share, ShareLedger};
    use crate::version::GameVersion;

    use super::*;

    const CORP: CorporationName = CorporationName::Android;

    /// Build a corporation plus players directly from (id, order, holding)
    /// triples; the first listed share of `president` carries the flag.
    fn corp_with(
        holdings: &[(PlayerId, u32, usize)],
        president: Option<PlayerId>,
    ) -> (Corporation, Vec<Player>) {
        let mut players = Vec::new();
        let mut ledger = ShareLedger::new();
        let mut handed_out = 0;
        for &(id, order, count) in holdings {
            let mut player = Player::new(id, format!("player_{id}"));
            player.order = order;
            for n in 0..count {
                let flagged = president == Some(id) && n == 0;
                player.shares.push(Share {
                    corporation: CORP,
                    president: flagged,
                });
            }
            ledger.add(HolderId::Player(id), count);
            handed_out += count;
            players.push(player);
        }

        let bank_shares: Vec<Share> = (handed_out..STARTING_SHARES)
            .map(|_| Share::normal(CORP))
            .collect();
        ledger.add(HolderId::Bank, bank_shares.len());

        let corp = Corporation {
            name: CORP,
            president,
            companies: Vec::new(),
            cash: 0,
            pending_cash: 0,
            income: 0,
            synergy_income: 0,
            price_index: 6,
            unissued: VecDeque::new(),
            bank_shares,
            ledger,
            version: GameVersion::V1,
        };
        (corp, players)
    }

    #[test]
    fn incumbent_keeps_presidency_while_tied() {
        let (mut corp, mut players) = corp_with(&[(1, 0, 3), (2, 1, 3), (3, 2, 3)], Some(3));
        let mut log = GameLog::new();

        corp.change_president(&mut players, &mut log);

        assert_eq!(corp.president(), Some(3));
        assert!(log.is_empty());
    }

    #[test]
    fn presidency_wraps_to_the_smallest_order() {
        // the outgoing president has the highest order, so rotation wraps
        let (mut corp, mut players) = corp_with(&[(1, 0, 3), (2, 1, 3), (3, 2, 2)], Some(3));
        let mut log = GameLog::new();

        corp.change_president(&mut players, &mut log);

        assert_eq!(corp.president(), Some(1));
        assert!(players[0].shares[0].president);
        assert!(players[2].shares.iter().all(|s| !s.president));
        assert_eq!(
            log.messages().collect::<Vec<_>>(),
            vec!["player_1 becomes president of Android"]
        );
    }

    #[test]
    fn presidency_rotates_forward_past_the_incumbent() {
        // tied holders bracket the incumbent's order: the higher one wins
        let (mut corp, mut players) = corp_with(&[(1, 0, 4), (2, 2, 2), (3, 3, 4)], Some(2));
        let mut log = GameLog::new();

        corp.change_president(&mut players, &mut log);

        assert_eq!(corp.president(), Some(3));
        assert!(players[2].shares[0].president);
    }

    #[test]
    fn first_holder_by_order_wins_without_an_incumbent() {
        let (mut corp, mut players) = corp_with(&[(1, 5, 2), (2, 1, 2)], None);
        let mut log = GameLog::new();

        corp.change_president(&mut players, &mut log);

        assert_eq!(corp.president(), Some(2));
    }

    #[test]
    fn rotation_is_stable_under_order_permutations() {
        // same tied set, every possible incumbent order position
        for (incumbent_order, expected) in [(0, 1), (2, 3), (4, 5), (6, 7), (8, 1)] {
            let (mut corp, mut players) = corp_with(
                &[(1, 1, 2), (3, 3, 2), (5, 5, 2), (7, 7, 2), (9, incumbent_order, 1)],
                Some(9),
            );
            let mut log = GameLog::new();

            corp.change_president(&mut players, &mut log);

            assert_eq!(corp.president(), Some(expected), "incumbent order {incumbent_order}");
        }
    }
}
