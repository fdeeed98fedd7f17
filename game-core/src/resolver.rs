use std::collections::HashMap;

use game_types::{PlayerId, Room, RoomOutcome};

pub struct ResultResolver;

impl ResultResolver {
    /// Rank a fully-resolved room. Members who hit their target compete on
    /// rounds used: a sole minimum is a Win, a shared minimum is a Tie for
    /// every member sharing it, and everyone else loses, including every
    /// member who never hit their word. A room with zero hitters is all
    /// losses.
    pub fn resolve(room: &Room) -> HashMap<PlayerId, RoomOutcome> {
        let best = room
            .results
            .values()
            .filter(|r| r.hit_target_word)
            .map(|r| r.rounds_used)
            .min();

        let winners: Vec<PlayerId> = match best {
            Some(best) => room
                .results
                .iter()
                .filter(|(_, r)| r.hit_target_word && r.rounds_used == best)
                .map(|(id, _)| *id)
                .collect(),
            None => Vec::new(),
        };

        room.results
            .keys()
            .map(|id| {
                let outcome = if winners.contains(id) {
                    if winners.len() == 1 {
                        RoomOutcome::Win
                    } else {
                        RoomOutcome::Tie
                    }
                } else {
                    RoomOutcome::Lose
                };
                (*id, outcome)
            })
            .collect()
    }
}
