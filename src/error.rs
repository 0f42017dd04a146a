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

use std::num::ParseIntError;

use thiserror::Error;

/// An error that occurs when a string cannot be parsed.
///
/// Parsing never mutates engine state: a command that fails to parse is
/// reported with a single diagnostic line and otherwise ignored.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// A token was outside an expected range.
    #[error("token outside the expected range")]
    ErroneousToken,
    /// Expected a token but found nothing.
    #[error("expected a token but found nothing")]
    ExpectedToken,
    /// Expected a different token.
    #[error("unexpected token")]
    InvalidToken,
    /// A numeric field could not be parsed.
    #[error("invalid number: {0}")]
    InvalidNumber(#[from] ParseIntError),
    /// A position failed the validity checks after parsing.
    #[error("position fails the validity checks")]
    InvalidPosition,
}
