/*
 * Limpet, a UCI-compatible chess engine
 * Copyright (C) 2025 the Limpet authors
 *
 * Limpet is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Limpet is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Limpet. If not, see <https://www.gnu.org/licenses/>.
 */

use std::mem::size_of;

use crate::{
    board::Key,
    evaluation::{Eval, MATE_BOUND},
    movegen::Move,
    search::Depth,
};

/// The bound of a score depending on how it was obtained.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Bound {
    /// A lower bound: `best_score >= beta`.
    Lower,
    /// An exact bound: `alpha < best_score < beta`.
    Exact,
    /// An upper bound: `best_score <= alpha`.
    Upper,
}

/// A single entry in the transposition table.
///
/// It contains the full key as a checksum and the information that lets a
/// future visit to the same position skip or narrow its search.
#[derive(Clone, Copy)]
pub struct TranspositionEntry {
    /// The key, used as a checksum.
    key: Key,
    /// The best move found in the position, if any move improved alpha.
    mv: Option<Move>,
    /// The score of the position, mate scores made root-relative.
    score: Eval,
    /// The depth at which the score was obtained.
    depth: Depth,
    /// The bound of the score.
    bound: Bound,
    /// The root search this entry was stored in.
    age: u8,
}

/// The information from a successful transposition table lookup.
#[derive(Clone, Copy)]
pub struct TranspositionHit {
    /// The score of the position, made relative to the probing node.
    score: Eval,
    /// The best move in the position.
    mv: Option<Move>,
    /// The depth at which the score was obtained.
    depth: Depth,
    /// The bound of the score.
    bound: Bound,
}

/// A transposition table: a fixed-capacity map from position fingerprints to
/// previously computed search results.
///
/// Indexing is the fingerprint modulo the capacity. Distinct positions that
/// share a slot fight it out through the replacement policy in
/// [`store()`](Self::store); distinct positions that share a full key are a
/// birthday-bound rarity the search tolerates, because a stored best move is
/// re-validated against the legal move list before it is ever played.
pub struct TranspositionTable {
    /// The entries. `None` is a never-written slot.
    entries: Vec<Option<TranspositionEntry>>,
    /// The current root-search sequence number.
    age: u8,
}

impl TranspositionHit {
    /// Returns the score.
    pub const fn score(self) -> Eval {
        self.score
    }

    /// Returns the best move.
    pub const fn mv(self) -> Option<Move> {
        self.mv
    }

    /// Returns the depth at which the score was obtained.
    pub const fn depth(self) -> Depth {
        self.depth
    }

    /// Returns the bound of the score.
    pub const fn bound(self) -> Bound {
        self.bound
    }
}

impl TranspositionTable {
    /// Creates a new, zeroed [`TranspositionTable`] with the given size in
    /// MiB.
    pub fn with_capacity(size_mib: usize) -> Self {
        let mut tt = Self {
            entries: Vec::new(),
            age: 0,
        };
        tt.resize(size_mib);
        tt
    }

    /// Resizes the table to the given size in MiB and zeroes it.
    pub fn resize(&mut self, size_mib: usize) {
        let entries = (size_mib * 1024 * 1024 / size_of::<TranspositionEntry>()).max(1);
        self.entries = vec![None; entries];
        self.age = 0;
    }

    /// Zeroes the table, forgetting every game played so far.
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.age = 0;
    }

    /// Marks the boundary of a new top-level search.
    ///
    /// Entries stored before this point become eligible for replacement
    /// regardless of their depth.
    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    /// Returns the entry with the given key, or [`None`] if it doesn't
    /// exist.
    pub fn load(&self, key: Key, height: u8) -> Option<TranspositionHit> {
        let entry = self.entries[self.index(key)]?;

        (entry.key == key).then_some(TranspositionHit {
            score: denormalise(entry.score, height),
            mv: entry.mv,
            depth: entry.depth,
            bound: entry.bound,
        })
    }

    /// Stores a search result.
    ///
    /// The slot's previous occupant survives only if it came from the
    /// current root search, is a different position and is more valuable:
    /// deeper, or an Exact entry at equal depth that the incoming result
    /// cannot better.
    pub fn store(
        &mut self,
        key: Key,
        score: Eval,
        mv: Option<Move>,
        depth: Depth,
        bound: Bound,
        height: u8,
    ) {
        let index = self.index(key);
        let age = self.age;

        if let Some(existing) = self.entries[index] {
            let keep = existing.age == age
                && existing.key != key
                && (existing.depth > depth
                    || (existing.bound == Bound::Exact
                        && existing.depth == depth
                        && bound != Bound::Exact));
            if keep {
                return;
            }
        }

        self.entries[index] = Some(TranspositionEntry {
            key,
            mv,
            score: normalise(score, height),
            depth,
            bound,
            age,
        });
    }

    /// Estimates how full the table is, per mille.
    pub fn estimate_hashfull(&self) -> usize {
        self.entries
            .iter()
            .take(1000)
            .filter(|entry| entry.is_some())
            .count()
            * 1000
            / self.entries.len().min(1000)
    }

    /// Converts a key into a valid index.
    fn index(&self, key: Key) -> usize {
        (key % self.entries.len() as Key) as usize
    }
}

/// If `score` is a mate score, assume it is relative to the current node and
/// turn it into a mate score relative to the root.
const fn normalise(score: Eval, height: u8) -> Eval {
    if score <= -MATE_BOUND {
        score - height as Eval
    } else if score >= MATE_BOUND {
        score + height as Eval
    } else {
        score
    }
}

/// If `score` is a mate score, assume it is relative to the root and turn it
/// into a mate score relative to the current node.
const fn denormalise(score: Eval, height: u8) -> Eval {
    if score <= -MATE_BOUND {
        score + height as Eval
    } else if score >= MATE_BOUND {
        score - height as Eval
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Bound, TranspositionTable};
    use crate::{
        defs::{Piece, Square},
        evaluation::MATE,
        movegen::Move,
    };

    #[test]
    fn store_and_load() {
        let mut tt = TranspositionTable::with_capacity(1);
        let mv = Move::new_quiet(Square::E2, Square::E4, Piece::WPAWN);

        tt.store(0xdead_beef, 37, Some(mv), 5, Bound::Exact, 0);

        let hit = tt.load(0xdead_beef, 0).expect("stored entry is found");
        assert_eq!(hit.score(), 37);
        assert_eq!(hit.mv(), Some(mv));
        assert_eq!(hit.depth(), 5);
        assert_eq!(hit.bound(), Bound::Exact);

        // a different key misses even if it happens to share the slot
        assert!(tt.load(0xdead_beef + 1, 0).is_none());
    }

    #[test]
    fn deeper_entries_survive_shallower_stores() {
        let mut tt = TranspositionTable::with_capacity(1);
        let key = 0x1234_5678_9abc_def0;

        tt.store(key, 100, None, 8, Bound::Exact, 0);
        // shallower result for the same position still replaces: it is newer
        // information about the same node
        tt.store(key, 50, None, 3, Bound::Upper, 0);
        let hit = tt.load(key, 0).expect("entry exists");
        assert_eq!(hit.depth(), 3);

        // a *different* position hashing to the same slot must not evict a
        // deeper entry within one root search
        tt.clear();
        tt.store(key, 100, None, 8, Bound::Exact, 0);
        let colliding = key + capacity_of(&tt) as u64;
        tt.store(colliding, 1, None, 2, Bound::Upper, 0);
        let hit = tt.load(key, 0).expect("deep entry survived");
        assert_eq!(hit.depth(), 8);

        // after a new root search the old entry is fair game
        tt.new_search();
        tt.store(colliding, 1, None, 2, Bound::Upper, 0);
        assert!(tt.load(key, 0).is_none());
        assert!(tt.load(colliding, 0).is_some());
    }

    #[test]
    fn mate_scores_are_height_adjusted() {
        let mut tt = TranspositionTable::with_capacity(1);
        let key = 0xfeed_f00d;

        // a mate found 3 plies into the search, stored from height 3
        tt.store(key, MATE - 5, None, 4, Bound::Exact, 3);
        // probed from height 1, the same mate is 2 plies closer to the root
        let hit = tt.load(key, 1).expect("entry exists");
        assert_eq!(hit.score(), MATE - 3);
    }

    /// The capacity of the table, via the only public window onto it.
    fn capacity_of(tt: &TranspositionTable) -> usize {
        tt.entries.len()
    }
}
