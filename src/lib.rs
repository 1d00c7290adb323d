/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A bitboard-based legal chess move generator.
//!
//! The [`Game`] type is the primary entry point: it parses FEN strings,
//! enumerates legal moves with full check, pin, castling, and en passant
//! handling, and applies moves reversibly through [`Game::make_move`] and
//! [`Game::unmake_move`].
//!
//! ```
//! use newt::Game;
//!
//! let mut game = Game::default();
//! assert_eq!(game.get_legal_moves().len(), 20);
//!
//! game.make_move_uci("e2e4").unwrap();
//! assert_eq!(game.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
//!
//! game.unmake_move();
//! assert_eq!(game.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
//! ```

/// All board-related code: bitboards, squares, pieces, moves, and movegen.
mod board;

pub use board::*;
