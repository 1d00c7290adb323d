/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The [`Bitboard`] type and its bit-twiddling primitives.
mod bitboard;

/// A game of chess: check/pin analysis, legal move generation, make/unmake.
mod game;

/// Attack tables, line masks, and sliding attack computation.
mod movegen;

/// The [`Move`] and [`MoveList`] types.
mod moves;

/// Perft functions, for validating and benchmarking move generation.
mod perft;

/// [`Color`], [`PieceKind`], and [`Piece`].
mod piece;

/// [`Board`] and [`Position`]: piece placement and full game state.
mod position;

/// [`Square`], [`File`], and [`Rank`].
mod square;

/// Misc constants.
mod utils;

/// Zobrist hashing of positions.
mod zobrist;

pub use bitboard::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
pub use utils::*;
pub use zobrist::*;
