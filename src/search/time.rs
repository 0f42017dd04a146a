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

use std::time::Duration;

use super::Limits;

/// How many moves we budget for when the GUI doesn't say how many are left
/// until the next time control.
const DEFAULT_MOVES_TO_GO: u64 = 40;

/// The most increments worth of time the budget will bank on receiving.
const MAX_BANKED_INCREMENTS: u64 = 20;

/// The least any budget may be, in milliseconds.
const MIN_BUDGET_MS: u64 = 10;

/// The safety margin always left on the clock, in milliseconds.
const CLOCK_MARGIN_MS: u64 = 100;

/// The per-move time budget of one search.
///
/// The iterative deepening loop stops once `optimal` has elapsed; the poll
/// inside the search aborts outright at `maximum`. `minimum` is the floor
/// the other two never go below.
#[derive(Clone, Copy)]
pub struct TimeAllocation {
    /// Stop starting new iterations after this much time.
    pub optimal: Duration,
    /// Abort the search outright at this much time.
    pub maximum: Duration,
    /// The least time worth spending on any move.
    pub minimum: Duration,
}

impl Default for TimeAllocation {
    /// An unlimited budget, for searches not limited by a clock.
    fn default() -> Self {
        Self {
            optimal: Duration::MAX,
            maximum: Duration::MAX,
            minimum: Duration::ZERO,
        }
    }
}

impl TimeAllocation {
    /// Derives the budget for one move from the search limits.
    ///
    /// Only [`Limits::Timed`] produces a real budget; every other limit kind
    /// manages itself. `move_overhead` is subtracted from the remaining time
    /// first so GUI latency can never flag us.
    pub fn from_limits(limits: Limits, move_overhead: Duration) -> Self {
        let Limits::Timed {
            time,
            inc,
            moves_to_go,
        } = limits
        else {
            return Self::default();
        };

        let remaining = (time.saturating_sub(move_overhead)).as_millis() as u64;
        let increment = inc.as_millis() as u64;
        let moves_to_go = moves_to_go.map_or(DEFAULT_MOVES_TO_GO, u64::from).max(1);

        let base = if increment > 0 {
            (remaining * 9 / 10 + increment * moves_to_go.min(MAX_BANKED_INCREMENTS)) / moves_to_go
        } else {
            remaining * 9 / 10 / (moves_to_go + 5)
        };

        let ceiling = remaining.saturating_sub(CLOCK_MARGIN_MS).max(MIN_BUDGET_MS);
        let clamp = |ms: u64| ms.clamp(MIN_BUDGET_MS, ceiling);

        let optimal = clamp(base * 95 / 100);
        let maximum = clamp((optimal * 3).max(remaining * 4 / 10));
        let minimum = clamp(optimal / 2);

        Self {
            optimal: Duration::from_millis(optimal),
            maximum: Duration::from_millis(maximum),
            minimum: Duration::from_millis(minimum),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{TimeAllocation, MIN_BUDGET_MS};
    use crate::search::Limits;

    /// Builds a timed allocation from milliseconds.
    fn allocate(time: u64, inc: u64, moves_to_go: Option<u8>) -> TimeAllocation {
        TimeAllocation::from_limits(
            Limits::Timed {
                time: Duration::from_millis(time),
                inc: Duration::from_millis(inc),
                moves_to_go,
            },
            Duration::ZERO,
        )
    }

    #[test]
    fn budgets_are_ordered_and_bounded() {
        for (time, inc, mtg) in [
            (60_000, 0, None),
            (60_000, 1_000, None),
            (300_000, 2_000, Some(30)),
            (5_000, 0, Some(40)),
            (1_000, 100, None),
            (150, 0, None),
        ] {
            let allocation = allocate(time, inc, mtg);

            assert!(allocation.minimum >= Duration::from_millis(MIN_BUDGET_MS));
            assert!(allocation.minimum <= allocation.optimal);
            assert!(allocation.optimal <= allocation.maximum);

            let ceiling =
                Duration::from_millis((time.saturating_sub(100)).max(MIN_BUDGET_MS));
            assert!(
                allocation.maximum <= ceiling,
                "budget overshoots the clock with {time} ms remaining"
            );
        }
    }

    #[test]
    fn increment_grows_the_budget() {
        let without = allocate(60_000, 0, None);
        let with = allocate(60_000, 2_000, None);
        assert!(with.optimal > without.optimal);
    }

    #[test]
    fn fewer_moves_to_go_means_more_time() {
        let many = allocate(60_000, 1_000, Some(40));
        let few = allocate(60_000, 1_000, Some(5));
        assert!(few.optimal > many.optimal);
    }

    #[test]
    fn untimed_limits_are_unlimited() {
        let allocation = TimeAllocation::from_limits(Limits::Infinite, Duration::ZERO);
        assert_eq!(allocation.optimal, Duration::MAX);
        assert_eq!(allocation.maximum, Duration::MAX);
    }
}
