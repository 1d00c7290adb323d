/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Bitboard, Color, Rank, Square};

/// Deltas for the movement of the Queen (and King).
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

const KNIGHT_ATTACKS: [Bitboard; Square::COUNT] = generate_leaper_mobility(&KNIGHT_DELTAS);
const KING_ATTACKS: [Bitboard; Square::COUNT] = generate_leaper_mobility(&QUEEN_DELTAS);

const WHITE_PAWN_PUSHES: [Bitboard; Square::COUNT] = generate_pawn_pushes(Color::White);
const BLACK_PAWN_PUSHES: [Bitboard; Square::COUNT] = generate_pawn_pushes(Color::Black);
const WHITE_PAWN_ATTACKS: [Bitboard; Square::COUNT] = generate_pawn_attacks(Color::White);
const BLACK_PAWN_ATTACKS: [Bitboard; Square::COUNT] = generate_pawn_attacks(Color::Black);

/// Masks for the diagonal (A1-H8 direction) line through each square, including the square.
const DIAGONAL_MASKS: [Bitboard; Square::COUNT] = generate_line_masks(1, 1);

/// Masks for the anti-diagonal (H1-A8 direction) line through each square, including the square.
const ANTI_DIAGONAL_MASKS: [Bitboard; Square::COUNT] = generate_line_masks(-1, 1);

/// A table indexed by two squares yielding the squares strictly between them,
/// or an empty board if they do not share a rank, file, or diagonal.
const RAY_BETWEEN: [[Bitboard; Square::COUNT]; Square::COUNT] = {
    let mut rays = [[Bitboard::EMPTY_BOARD; Square::COUNT]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let from = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < QUEEN_DELTAS.len() {
            let (df, dr) = QUEEN_DELTAS[j];
            let mut ray = Bitboard::EMPTY_BOARD;
            let mut to = from;

            while let Some(shifted) = to.offset(df, dr) {
                ray = ray.or(shifted.bitboard());
                to = shifted;
                // Both endpoints are excluded
                rays[from.index()][to.index()] = ray.xor(to.bitboard());
            }

            j += 1;
        }

        i += 1;
    }

    rays
};

/// A table indexed by two squares yielding the full line through both,
/// or an empty board if they do not share a rank, file, or diagonal.
const LINE_THROUGH: [[Bitboard; Square::COUNT]; Square::COUNT] = {
    let mut lines = [[Bitboard::EMPTY_BOARD; Square::COUNT]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let from = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < Square::COUNT {
            let to = Square::from_index_unchecked(j);

            lines[i][j] = if i == j {
                from.bitboard()
            } else if from.file().inner() == to.file().inner() {
                Bitboard::from_file(from.file())
            } else if from.rank().inner() == to.rank().inner() {
                Bitboard::from_rank(from.rank())
            } else if DIAGONAL_MASKS[i].and(to.bitboard()).is_nonempty() {
                DIAGONAL_MASKS[i]
            } else if ANTI_DIAGONAL_MASKS[i].and(to.bitboard()).is_nonempty() {
                ANTI_DIAGONAL_MASKS[i]
            } else {
                Bitboard::EMPTY_BOARD
            };

            j += 1;
        }
        i += 1;
    }

    lines
};

/// Fetches a [`Bitboard`] of the squares strictly between `from` and `to`.
///
/// # Example
/// ```
/// # use newt::*;
/// assert_eq!(ray_between(Square::A1, Square::A8), Bitboard::FILE_A ^ Square::A1 ^ Square::A8);
/// assert_eq!(ray_between(Square::A1, Square::B3), Bitboard::EMPTY_BOARD);
/// ```
#[inline(always)]
pub const fn ray_between(from: Square, to: Square) -> Bitboard {
    RAY_BETWEEN[from.index()][to.index()]
}

/// Fetches a [`Bitboard`] of the entire line (rank, file, or diagonal) through `from` and `to`.
///
/// # Example
/// ```
/// # use newt::*;
/// assert_eq!(line_through(Square::A3, Square::A5), Bitboard::FILE_A);
/// assert_eq!(line_through(Square::C1, Square::E4), Bitboard::EMPTY_BOARD);
/// ```
#[inline(always)]
pub const fn line_through(from: Square, to: Square) -> Bitboard {
    LINE_THROUGH[from.index()][to.index()]
}

/// Computes the attacks along a single line for a slider on `square`, given `occupancy`.
///
/// Implemented with the subtract-and-reverse trick: the masked occupancy, minus twice the
/// slider's bit, flips every bit between the slider and the first blocker in the upward
/// direction; repeating the computation on the bit-reversed board and reversing back yields
/// the downward direction, and XORing the two leaves exactly the attacked squares.
#[inline(always)]
pub const fn sliding_attacks(square: Square, occupancy: Bitboard, line: Bitboard) -> Bitboard {
    let slider = square.bitboard().inner();
    let masked = line.inner() & occupancy.inner();

    let up = masked.wrapping_sub(slider.wrapping_mul(2));
    let down = masked
        .reverse_bits()
        .wrapping_sub(slider.reverse_bits().wrapping_mul(2))
        .reverse_bits();

    Bitboard::new((up ^ down) & line.inner())
}

/// Computes the possible moves for a Bishop at a given [`Square`] with the provided blockers.
///
/// This will yield a [`Bitboard`] that allows the Bishop to capture the first blocker.
#[inline(always)]
pub const fn bishop_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    sliding_attacks(square, blockers, DIAGONAL_MASKS[square.index()]).or(sliding_attacks(
        square,
        blockers,
        ANTI_DIAGONAL_MASKS[square.index()],
    ))
}

/// Computes the possible moves for a Rook at a given [`Square`] with the provided blockers.
///
/// This will yield a [`Bitboard`] that allows the Rook to capture the first blocker.
#[inline(always)]
pub const fn rook_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    sliding_attacks(square, blockers, Bitboard::from_file(square.file())).or(sliding_attacks(
        square,
        blockers,
        Bitboard::from_rank(square.rank()),
    ))
}

/// Computes the possible moves for a Queen at a given [`Square`] with the provided blockers.
#[inline(always)]
pub const fn queen_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    rook_attacks(square, blockers).or(bishop_attacks(square, blockers))
}

/// Fetch the raw, unblocked attacks for a Knight on the provided square.
#[inline(always)]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square.index()]
}

/// Fetch the raw, unblocked attacks for a King on the provided square.
#[inline(always)]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square.index()]
}

/// Fetch the raw, unblocked pushes for a Pawn of the provided color on the provided square.
#[inline(always)]
pub const fn pawn_pushes(square: Square, color: Color) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_PUSHES[square.index()],
        Color::Black => BLACK_PAWN_PUSHES[square.index()],
    }
}

/// Fetch the raw, unblocked attacks for a Pawn of the provided color on the provided square.
#[inline(always)]
pub const fn pawn_attacks(square: Square, color: Color) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index()],
        Color::Black => BLACK_PAWN_ATTACKS[square.index()],
    }
}

/// Generates the default push mobility for Pawns.
///
/// Pawns, by default, may push forward by one, except when pushing from their starting rank
/// (rank 2 for White, rank 7 for Black), in which case they may push forward by two.
const fn generate_pawn_pushes(color: Color) -> [Bitboard; Square::COUNT] {
    let mut boards = [Bitboard::EMPTY_BOARD; Square::COUNT];
    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let bb = square.bitboard();

        if square.rank().inner() == Rank::second(color).inner() {
            boards[i] = bb.forward_by(color, 1).or(bb.forward_by(color, 2));
        } else {
            boards[i] = bb.forward_by(color, 1);
        }

        i += 1;
    }
    boards
}

/// Generates the default attack mobility for Pawns, which capture diagonally forward by one.
const fn generate_pawn_attacks(color: Color) -> [Bitboard; Square::COUNT] {
    let mut boards = [Bitboard::EMPTY_BOARD; Square::COUNT];
    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let dr = match color {
            Color::White => 1,
            Color::Black => -1,
        };

        if let Some(east) = square.offset(1, dr) {
            boards[i] = boards[i].or(east.bitboard());
        }
        if let Some(west) = square.offset(-1, dr) {
            boards[i] = boards[i].or(west.bitboard());
        }

        i += 1;
    }
    boards
}

/// Generates the moves from every location for the "leaper" pieces (King and Knight),
/// which jump to a square a fixed distance away.
const fn generate_leaper_mobility(deltas: &[(i8, i8)]) -> [Bitboard; Square::COUNT] {
    let mut mobility = [Bitboard::EMPTY_BOARD; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut movement = Bitboard::EMPTY_BOARD;

        let mut j = 0;
        while j < deltas.len() {
            let (df, dr) = deltas[j];
            // Deltas that would shift off the board are discarded
            if let Some(shifted) = square.offset(df, dr) {
                movement = movement.or(shifted.bitboard());
            }

            j += 1;
        }

        mobility[i] = movement;
        i += 1;
    }

    mobility
}

/// Generates the masks for the lines running in the `(df, dr)` direction through every square.
const fn generate_line_masks(df: i8, dr: i8) -> [Bitboard; Square::COUNT] {
    let mut masks = [Bitboard::EMPTY_BOARD; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut mask = square.bitboard();

        let mut ray = square;
        while let Some(shifted) = ray.offset(df, dr) {
            mask = mask.or(shifted.bitboard());
            ray = shifted;
        }

        ray = square;
        while let Some(shifted) = ray.offset(-df, -dr) {
            mask = mask.or(shifted.bitboard());
            ray = shifted;
        }

        masks[i] = mask;
        i += 1;
    }

    masks
}

#[cfg(test)]
mod test {
    use super::*;

    /// Checks if `moves` and `expected` contain all the same squares, ignoring order.
    fn lists_match(moves: Bitboard, expected: &[Square]) {
        assert_eq!(
            moves.population() as usize,
            expected.len(),
            "\nMoves: {:?}\nExpected: {:?}",
            moves.into_iter().collect::<Vec<_>>(),
            expected
        );

        for mv in moves {
            assert!(expected.contains(&mv), "{mv} not found in {expected:?}");
        }
    }

    #[test]
    fn rook_blockers() {
        let expected = [
            Square::D2,
            Square::D3,
            Square::D5,
            Square::D6,
            Square::A4,
            Square::B4,
            Square::C4,
            Square::E4,
            Square::F4,
            Square::G4,
            Square::H4,
        ];

        // . . . X . . . X
        // . . . . . . . .
        // . . . X . . . .
        // . . . . . . . .
        // . . . . . . . X
        // . . X . . . . .
        // . . . X . X . .
        // . . . . . . . .
        let blockers =
            Bitboard::new(0b1000100000000000000010000000000010000000000001000010100000000000);

        lists_match(rook_attacks(Square::D4, blockers), &expected);
    }

    #[test]
    fn bishop_blockers() {
        let expected = [
            Square::C3,
            Square::B2,
            Square::A1,
            Square::E5,
            Square::C5,
            Square::B6,
            Square::E3,
            Square::F2,
            Square::G1,
        ];

        let blockers = Square::E5.bitboard() | Square::B6.bitboard() | Square::D2.bitboard();

        lists_match(bishop_attacks(Square::D4, blockers), &expected);
    }

    #[test]
    fn sliders_on_empty_boards() {
        // A slider on an empty board attacks its full lines, minus its own square
        let rook = rook_attacks(Square::A1, Bitboard::EMPTY_BOARD);
        assert_eq!(rook, (Bitboard::FILE_A | Bitboard::RANK_1) ^ Square::A1);

        let bishop = bishop_attacks(Square::A1, Bitboard::EMPTY_BOARD);
        assert_eq!(bishop.population(), 7);
    }

    #[test]
    fn leaper_tables() {
        lists_match(
            knight_attacks(Square::A1),
            &[Square::B3, Square::C2],
        );
        lists_match(
            king_attacks(Square::H1),
            &[Square::G1, Square::G2, Square::H2],
        );
    }

    #[test]
    fn pawn_tables_are_color_relative() {
        lists_match(
            pawn_attacks(Square::E4, Color::White),
            &[Square::D5, Square::F5],
        );
        lists_match(
            pawn_attacks(Square::E4, Color::Black),
            &[Square::D3, Square::F3],
        );
        lists_match(pawn_attacks(Square::A2, Color::White), &[Square::B3]);

        // Double pushes only exist from the starting rank
        lists_match(
            pawn_pushes(Square::E2, Color::White),
            &[Square::E3, Square::E4],
        );
        lists_match(pawn_pushes(Square::E3, Color::White), &[Square::E4]);
        lists_match(
            pawn_pushes(Square::D7, Color::Black),
            &[Square::D6, Square::D5],
        );
    }

    #[test]
    fn rays_and_lines() {
        assert_eq!(
            ray_between(Square::C2, Square::F5),
            Square::D3.bitboard() | Square::E4.bitboard()
        );
        assert_eq!(ray_between(Square::C2, Square::D4), Bitboard::EMPTY_BOARD);
        assert_eq!(line_through(Square::B2, Square::G7), DIAGONAL_MASKS[Square::B2.index()]);
        assert_eq!(line_through(Square::A4, Square::H4), Bitboard::new(0xFF000000));
    }
}
