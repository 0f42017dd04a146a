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

use std::{ops::RangeInclusive, str::FromStr, time::Duration};

/// The name of this engine.
pub const ID_NAME: &str = "Limpet";
/// The name of the author of this engine.
pub const ID_AUTHOR: &str = "the Limpet authors";
/// The version of this engine.
pub const ID_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The UCI options this engine supports.
#[derive(Clone, Copy)]
pub struct UciOptions {
    /// The overhead of sending a move from the engine to the GUI.
    move_overhead: Duration,
    /// How large the transposition table should be, in MiB.
    hash: usize,
}

#[allow(clippy::missing_docs_in_private_items)]
impl UciOptions {
    /// The range that the move overhead can take, in milliseconds.
    pub const MOVE_OVERHEAD_RANGE: RangeInclusive<u64> = 0..=1_000;
    /// The range that the hash size can take, in MiB.
    pub const HASH_RANGE: RangeInclusive<usize> = 1..=65_536;
}

impl Default for UciOptions {
    fn default() -> Self {
        Self {
            move_overhead: Duration::from_millis(16),
            hash: 32,
        }
    }
}

impl UciOptions {
    /// Creates new [`UciOptions`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints the identification of this engine and all the UCI options it
    /// supports.
    pub fn print() {
        let defaults = Self::default();

        println!("id name {ID_NAME} {ID_VERSION}");
        println!("id author {ID_AUTHOR}");
        println!(
            "option name Move Overhead type spin default {} min {} max {}",
            defaults.move_overhead().as_millis(),
            Self::MOVE_OVERHEAD_RANGE.start(),
            Self::MOVE_OVERHEAD_RANGE.end(),
        );
        println!(
            "option name Hash type spin default {} min {} max {}",
            defaults.hash(),
            Self::HASH_RANGE.start(),
            Self::HASH_RANGE.end(),
        );
        println!("option name Clear Hash type button");
    }

    /// Sets the move overhead, in milliseconds, clamped into
    /// [`MOVE_OVERHEAD_RANGE`](Self::MOVE_OVERHEAD_RANGE).
    pub fn set_move_overhead(&mut self, milliseconds: u64) {
        self.move_overhead = Duration::from_millis(milliseconds.clamp(
            *Self::MOVE_OVERHEAD_RANGE.start(),
            *Self::MOVE_OVERHEAD_RANGE.end(),
        ));
    }

    /// Sets the hash size, clamped into [`HASH_RANGE`](Self::HASH_RANGE).
    pub fn set_hash(&mut self, hash: usize) {
        self.hash = hash.clamp(*Self::HASH_RANGE.start(), *Self::HASH_RANGE.end());
    }

    /// Returns the move overhead.
    pub const fn move_overhead(&self) -> Duration {
        self.move_overhead
    }

    /// Returns the hash size in MiB.
    pub const fn hash(&self) -> usize {
        self.hash
    }
}

/// Parses an `Option<&str>` into an `Option<T>`.
///
/// If the parse fails, it will return [`None`].
pub fn parse_option<T: FromStr>(token: Option<&str>) -> Option<T> {
    token.and_then(|t| t.parse::<T>().ok())
}

/// Parses an `Option<&str>` into an `Option<T>`.
///
/// Returns [`None`] if the result of the parse is 0 or an `Err`.
pub fn parse_into_nonzero_option<T: FromStr + PartialEq + From<u8>>(
    token: Option<&str>,
) -> Option<T> {
    parse_option(token).filter(|t| *t != T::from(0))
}

/// Parses an `Option<&str>` into an `Option<Duration>`, where the string is
/// a length of time in milliseconds.
///
/// Returns [`None`] if `token` cannot be parsed. A parseable but negative
/// time is treated as a small positive one: some GUIs keep counting below
/// zero, and a grace period beats flagging instantly.
pub fn parse_time(token: Option<&str>) -> Option<Duration> {
    parse_option::<i64>(token)
        .map(|t| if t < 0 { 1_000 } else { t as u64 })
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::{parse_into_nonzero_option, parse_option, parse_time, UciOptions};

    #[test]
    fn options_clamp_to_their_ranges() {
        let mut options = UciOptions::new();

        options.set_hash(0);
        assert_eq!(options.hash(), 1);
        options.set_hash(usize::MAX);
        assert_eq!(options.hash(), *UciOptions::HASH_RANGE.end());

        options.set_move_overhead(1_000_000);
        assert_eq!(options.move_overhead(), Duration::from_secs(1));
    }

    #[test]
    fn token_parsing() {
        assert_eq!(parse_option::<u64>(Some("42")), Some(42));
        assert_eq!(parse_option::<u64>(Some("nope")), None);
        assert_eq!(parse_option::<u64>(None), None);

        assert_eq!(parse_into_nonzero_option::<u64>(Some("0")), None);
        assert_eq!(parse_into_nonzero_option::<u64>(Some("7")), Some(7));

        assert_eq!(parse_time(Some("250")), Some(Duration::from_millis(250)));
        // a negative clock gets the grace period, not a panic
        assert_eq!(parse_time(Some("-50")), Some(Duration::from_secs(1)));
    }
}
