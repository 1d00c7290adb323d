/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref, str::FromStr};

use anyhow::Result;

use super::{
    bishop_attacks, king_attacks, knight_attacks, line_through, pawn_attacks, pawn_pushes, perft,
    ray_between, rook_attacks, Bitboard, Color, File, Move, MoveList, Piece, PieceKind, Position,
    Rank, Square,
};

/// A game of chess.
///
/// This type wraps a [`Position`] and adds everything needed for legal move
/// generation and reversible moves: the pieces checking the side-to-move's King,
/// the resolution mask for those checks, the two pin masks, and a history of
/// previous positions for [`Game::unmake_move`].
///
/// The basic methods you're probably looking for are [`Game::from_fen`],
/// [`Game::get_legal_moves`], [`Game::make_move`], and [`Game::unmake_move`].
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    /// The current [`Position`] of the game, including piece layouts, castling rights, turn counters, etc.
    position: Position,

    /// Snapshots of every position reached before the current one, in play order.
    history: Vec<Position>,

    /// All squares whose pieces are attacking the side-to-move's King.
    checkers: Bitboard,

    /// If `self.checkers` is empty, every square on the board.
    /// Otherwise, the squares a non-King move must land on to resolve the check:
    /// the checkers themselves plus the rays between them and the King.
    checkmask: Bitboard,

    /// Rays of enemy orthogonal sliders that pin a friendly piece to the King.
    pin_hv: Bitboard,

    /// Rays of enemy diagonal sliders that pin a friendly piece to the King.
    pin_d: Bitboard,

    /// The square where the side-to-move's King resides.
    king_square: Square,
}

impl Game {
    /// Creates a new [`Game`] from the provided [`Position`].
    #[inline(always)]
    pub fn new(position: Position) -> Self {
        let mut game = Self {
            position,
            history: Vec::new(),
            checkers: Bitboard::EMPTY_BOARD,
            checkmask: Bitboard::FULL_BOARD,
            pin_hv: Bitboard::EMPTY_BOARD,
            pin_d: Bitboard::EMPTY_BOARD,
            king_square: Square::default(),
        };

        game.recompute_legal_masks();
        game
    }

    /// Creates a new [`Game`] from the provided FEN string.
    #[inline(always)]
    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self::new(Position::from_fen(fen)?))
    }

    /// Fetch the internal [`Position`] of this [`Game`].
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Fetch a [`Bitboard`] of all squares currently putting the side-to-move's King in check.
    #[inline(always)]
    pub const fn checkers(&self) -> Bitboard {
        self.checkers
    }

    /// Fetch a [`Bitboard`] of all squares that a non-King piece can legally move to.
    #[inline(always)]
    pub const fn checkmask(&self) -> Bitboard {
        self.checkmask
    }

    /// Fetch a [`Bitboard`] of all orthogonal (rank/file) pin rays.
    #[inline(always)]
    pub const fn pinmask_hv(&self) -> Bitboard {
        self.pin_hv
    }

    /// Fetch a [`Bitboard`] of all diagonal pin rays.
    #[inline(always)]
    pub const fn pinmask_d(&self) -> Bitboard {
        self.pin_d
    }

    /// Returns `true` if the side-to-move is currently in check.
    #[inline(always)]
    pub const fn is_in_check(&self) -> bool {
        self.checkers.is_nonempty()
    }

    /// Returns `true` if the side-to-move is in check by more than one piece.
    ///
    /// No single move can block two checking lines at once, so only the King
    /// may move out of a double check.
    #[inline(always)]
    pub const fn is_in_double_check(&self) -> bool {
        self.checkers.population() > 1
    }

    /// Returns `true` if `color`'s King is currently attacked.
    ///
    /// # Example
    /// ```
    /// # use newt::{Color, Game};
    /// let game: Game = "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1".parse().unwrap();
    /// assert!(game.is_check(Color::White));
    /// assert!(!game.is_check(Color::Black));
    /// ```
    #[inline(always)]
    pub fn is_check(&self, color: Color) -> bool {
        if color == self.side_to_move() {
            self.is_in_check()
        } else {
            let king = self.king(color).to_square_unchecked();
            self.is_square_attacked(king, color.opponent(), self.occupied())
        }
    }

    /// Returns `true` if the side-to-move is in check with no legal moves remaining.
    #[inline(always)]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && self.get_legal_moves().is_empty()
    }

    /// Returns `true` if the side-to-move has no legal moves but is *not* in check.
    #[inline(always)]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && self.get_legal_moves().is_empty()
    }

    /// Applies the provided [`Move`], pushing a snapshot of the current position
    /// onto the history stack so the move can be unmade.
    ///
    /// Every move produced by [`Game::get_legal_moves`] is safe to apply;
    /// no legality check is performed here.
    #[inline(always)]
    pub fn make_move(&mut self, mv: Move) {
        self.history.push(self.position);
        self.position.make_move(mv);
        self.recompute_legal_masks();
    }

    /// Converts the provided string to a [`Move`], if possible, and applies it to the game.
    #[inline(always)]
    pub fn make_move_uci(&mut self, mv_str: &str) -> Result<()> {
        let mv = Move::from_uci(self, mv_str)?;
        self.make_move(mv);
        Ok(())
    }

    /// Reverts the most recent [`Game::make_move`], restoring the previous
    /// position verbatim: bitboards, mailbox, side to move, castling rights,
    /// en passant square, counters, and hash key.
    ///
    /// # Panics
    /// If called without a corresponding [`Game::make_move`]. Callers must never
    /// unmake more moves than they have made.
    #[inline(always)]
    pub fn unmake_move(&mut self) {
        self.position = self
            .history
            .pop()
            .expect("unmake_move called with no moves to unmake");
        self.recompute_legal_masks();
    }

    /// Number of moves made and not yet unmade.
    #[inline(always)]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Recursively counts all positions reachable from this one in `depth` moves.
    ///
    /// This is just a convenience wrapper. See [`perft()`] for more.
    #[inline(always)]
    pub fn perft(&mut self, depth: usize) -> u64 {
        perft(self, depth)
    }

    /// Generate all legal moves from the current position.
    ///
    /// Moves are appended piece by piece in a fixed order: Pawns, Knights,
    /// Bishops, Rooks, Queens, King. This is exhaustive enumeration order,
    /// not an ordering for search.
    ///
    /// # Example
    /// ```
    /// # use newt::Game;
    /// let game = Game::default();
    /// assert_eq!(game.get_legal_moves().len(), 20);
    /// ```
    pub fn get_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();

        // In a double check, no single move can block both lines
        if !self.is_in_double_check() {
            self.generate_pawn_moves(&mut moves);
            self.generate_normal_moves(PieceKind::Knight, &mut moves);
            self.generate_normal_moves(PieceKind::Bishop, &mut moves);
            self.generate_normal_moves(PieceKind::Rook, &mut moves);
            self.generate_normal_moves(PieceKind::Queen, &mut moves);
        }
        self.generate_king_moves(&mut moves);

        moves
    }

    /// Recomputes the check and pin metadata for the current position.
    ///
    /// Called after every mutation; everything generated afterwards reads
    /// these masks instead of re-deriving them per piece.
    fn recompute_legal_masks(&mut self) {
        let color = self.side_to_move();
        let opponent = color.opponent();
        let occupied = self.occupied();
        let friendlies = self.color(color);

        self.king_square = self.king(color).to_square_unchecked();

        // Leaper checks are just the overlap of their attacks from the King and themselves
        self.checkers = self.knights(opponent) & knight_attacks(self.king_square)
            | self.pawns(opponent) & pawn_attacks(self.king_square, color);

        // Slider checks are found by casting rays outward from the King
        self.checkers |= rook_attacks(self.king_square, occupied)
            & self.orthogonal_sliders(opponent)
            | bishop_attacks(self.king_square, occupied) & self.diagonal_sliders(opponent);

        // Each checker is counted individually, so two same-kind checkers
        // (possible after an under-promotion) still register as a double check
        self.checkmask = if self.checkers.is_empty() {
            Bitboard::FULL_BOARD
        } else {
            let mut mask = self.checkers;
            for checker in self.checkers {
                mask |= ray_between(self.king_square, checker);
            }
            mask
        };

        // Pins: cast rays from the King with friendly pieces removed, so they
        // pass through potential pinned pieces and stop at the first enemy.
        // A slider found this way pins if exactly one friendly piece sits on its ray.
        self.pin_hv = Bitboard::EMPTY_BOARD;
        self.pin_d = Bitboard::EMPTY_BOARD;

        let enemies = self.color(opponent);
        let pinners = rook_attacks(self.king_square, enemies) & self.orthogonal_sliders(opponent);
        for pinner in pinners {
            let ray = ray_between(self.king_square, pinner) | pinner;
            if (ray & friendlies).population() == 1 {
                self.pin_hv |= ray;
            }
        }

        let pinners = bishop_attacks(self.king_square, enemies) & self.diagonal_sliders(opponent);
        for pinner in pinners {
            let ray = ray_between(self.king_square, pinner) | pinner;
            if (ray & friendlies).population() == 1 {
                self.pin_d |= ray;
            }
        }
    }

    /// Returns `true` if `square` is attacked by any piece of `color`, given `occupancy`.
    ///
    /// The occupancy is a parameter so callers can probe hypothetical boards,
    /// such as the King stepping out of a slider's ray.
    fn is_square_attacked(&self, square: Square, color: Color, occupancy: Bitboard) -> bool {
        // The pawns attacking this square sit exactly where a defending pawn here would attack
        pawn_attacks(square, color.opponent()).intersects(self.pawns(color))
            || knight_attacks(square).intersects(self.knights(color))
            || king_attacks(square).intersects(self.king(color))
            || bishop_attacks(square, occupancy).intersects(self.diagonal_sliders(color))
            || rook_attacks(square, occupancy).intersects(self.orthogonal_sliders(color))
    }

    /// The ray a pinned piece on `square` is confined to, or the full board if it is not pinned.
    ///
    /// A pinned piece may only move along the line shared by its King and its
    /// pinner, which includes capturing the pinner.
    #[inline(always)]
    fn pin_line(&self, square: Square) -> Bitboard {
        if (self.pin_hv | self.pin_d).intersects(square) {
            line_through(square, self.king_square)
        } else {
            Bitboard::FULL_BOARD
        }
    }

    /// Generates and serializes all legal Pawn moves.
    fn generate_pawn_moves(&self, moves: &mut MoveList) {
        let color = self.side_to_move();
        let piece = Piece::new(color, PieceKind::Pawn);

        for from in self.pawns(color) {
            for to in self.legal_pawn_mobility(color, from) {
                let is_capture = self.has(to);

                if to.rank() == Rank::eighth(color) {
                    for kind in PieceKind::promotions() {
                        let promoted = piece.promoted(kind);
                        moves.push(if is_capture {
                            Move::promotion_capture(from, to, piece, promoted)
                        } else {
                            Move::promotion(from, to, piece, promoted)
                        });
                    }
                } else if Some(to) == self.ep_square() {
                    moves.push(Move::en_passant(from, to, piece));
                } else if from.distance_ranks(to) == 2 {
                    moves.push(Move::double_push(from, to, piece));
                } else if is_capture {
                    moves.push(Move::capture(from, to, piece));
                } else {
                    moves.push(Move::quiet(from, to, piece));
                }
            }
        }
    }

    /// Generates and serializes all legal moves for Knights, Bishops, Rooks, and Queens.
    fn generate_normal_moves(&self, kind: PieceKind, moves: &mut MoveList) {
        let color = self.side_to_move();
        let piece = Piece::new(color, kind);
        let blockers = self.occupied();

        for from in self.piece_parts(color, kind) {
            let attacks = match kind {
                PieceKind::Knight => knight_attacks(from),
                PieceKind::Bishop => bishop_attacks(from, blockers),
                PieceKind::Rook => rook_attacks(from, blockers),
                _ => rook_attacks(from, blockers) | bishop_attacks(from, blockers),
            };

            // A piece pinned along the wrong axis for its movement yields nothing here:
            // its attacks never intersect the pin line
            let mobility =
                attacks & self.enemy_or_empty(color) & self.checkmask & self.pin_line(from);

            for to in mobility {
                moves.push(if self.has(to) {
                    Move::capture(from, to, piece)
                } else {
                    Move::quiet(from, to, piece)
                });
            }
        }
    }

    /// Generates and serializes all legal King moves, including castling.
    fn generate_king_moves(&self, moves: &mut MoveList) {
        let color = self.side_to_move();
        let piece = Piece::new(color, PieceKind::King);
        let from = self.king_square;

        // The King is lifted off the occupancy so it cannot shadow a slider's
        // ray and step "away" along the line it is checked on
        let occupancy = self.occupied() ^ from;

        for to in king_attacks(from) & self.enemy_or_empty(color) {
            if self.is_square_attacked(to, color.opponent(), occupancy) {
                continue;
            }

            moves.push(if self.has(to) {
                Move::capture(from, to, piece)
            } else {
                Move::quiet(from, to, piece)
            });
        }

        if !self.is_in_check() {
            for to in self.castling_mobility(color) {
                moves.push(Move::castle(from, to, piece));
            }
        }
    }

    /// Generates a [`Bitboard`] of the King destinations reachable by castling.
    ///
    /// Castling requires the right to still be held, the Rook on its home
    /// square, every square between King and Rook empty, and neither the
    /// King's transit square nor his destination attacked. The caller has
    /// already established that the King is not currently in check.
    fn castling_mobility(&self, color: Color) -> Bitboard {
        let mut mobility = Bitboard::EMPTY_BOARD;
        let occupied = self.occupied();
        let opponent = color.opponent();
        let rank = Rank::first(color);
        let rights = self.castling_rights();

        if rights.kingside(color) {
            let (f, g) = (Square::new(File::F, rank), Square::new(File::G, rank));
            let rook = Square::new(File::H, rank);

            if self.rooks(color).intersects(rook)
                && occupied.is_disjoint(f.bitboard() | g)
                && !self.is_square_attacked(f, opponent, occupied)
                && !self.is_square_attacked(g, opponent, occupied)
            {
                mobility |= g;
            }
        }

        if rights.queenside(color) {
            let (b, c, d) = (
                Square::new(File::B, rank),
                Square::new(File::C, rank),
                Square::new(File::D, rank),
            );
            let rook = Square::new(File::A, rank);

            if self.rooks(color).intersects(rook)
                && occupied.is_disjoint(b.bitboard() | c | d)
                && !self.is_square_attacked(c, opponent, occupied)
                && !self.is_square_attacked(d, opponent, occupied)
            {
                mobility |= c;
            }
        }

        mobility
    }

    /// Generates a [`Bitboard`] of all legal moves for a Pawn at `square`.
    fn legal_pawn_mobility(&self, color: Color, square: Square) -> Bitboard {
        let blockers = self.occupied();
        let enemies = self.color(color.opponent());

        // If en passant is available, check its legality separately
        let ep_bb = self
            .ep_square()
            .map(|ep_square| self.ep_capture_bitboard(color, square, ep_square))
            .unwrap_or_default();

        // A pawn may push two ranks only if both squares ahead of it are empty
        let all_but_this_pawn = blockers ^ square;
        let double_push_blockers = all_but_this_pawn | all_but_this_pawn.forward_by(color, 1);
        let pushes = pawn_pushes(square, color) & !double_push_blockers;

        let attacks = pawn_attacks(square, color) & enemies;

        // The en passant destination is never inside the checkmask (the checker
        // is the pawn being captured, one rank behind it), so it is OR'd in
        // after its own validation
        ((pushes | attacks) & self.checkmask | ep_bb) & self.pin_line(square)
    }

    /// Generates a [`Bitboard`] for the legality of capturing en passant with the Pawn at `square`.
    ///
    /// If the capture is legal, the returned bitboard holds the single en passant
    /// destination bit; otherwise it is empty.
    ///
    /// The probe simulates the capture on a scratch occupancy: both pawns are
    /// removed, the capturer is placed on the destination, and slider rays are
    /// cast from the King. This catches the horizontal pin through two adjacent
    /// pawns that no ordinary pin mask can represent, without ever touching the
    /// live board.
    fn ep_capture_bitboard(&self, color: Color, square: Square, ep_square: Square) -> Bitboard {
        let ep_bb = ep_square.bitboard();
        if pawn_attacks(square, color).is_disjoint(ep_bb) {
            return Bitboard::EMPTY_BOARD;
        }

        // If in check, the capture must either remove the checking pawn or land
        // on the checking line
        let victim_bb = ep_bb.backward_by(color, 1);
        if (self.checkmask & (victim_bb | ep_bb)).is_empty() {
            return Bitboard::EMPTY_BOARD;
        }

        let opponent = color.opponent();
        let occupancy = (self.occupied() ^ square ^ victim_bb) | ep_bb;

        if rook_attacks(self.king_square, occupancy).intersects(self.orthogonal_sliders(opponent))
        {
            return Bitboard::EMPTY_BOARD;
        }
        if bishop_attacks(self.king_square, occupancy).intersects(self.diagonal_sliders(opponent))
        {
            return Bitboard::EMPTY_BOARD;
        }

        ep_bb
    }
}

impl Deref for Game {
    type Target = Position;
    /// A [`Game`] immutably dereferences to a [`Position`], for simplicity.
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    /// Wrapper for [`Game::from_fen`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

impl Default for Game {
    /// Standard starting position for chess.
    #[inline(always)]
    fn default() -> Self {
        Self::new(Position::default())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let squares_to_string = |bb: Bitboard| {
            bb.into_iter()
                .map(Square::to_uci)
                .collect::<Vec<_>>()
                .join(", ")
        };

        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                let square = Square::new(file, rank);
                let piece_char = self.board().piece_at(square).map(|p| p.char()).unwrap_or('.');
                write!(f, " {piece_char}")?;
            }

            match rank {
                Rank::SEVEN => write!(f, "        FEN: {}", self.position())?,
                Rank::SIX => write!(f, "        Key: {}", self.key())?,
                Rank::FIVE => write!(f, "   Checkers: {}", squares_to_string(self.checkers))?,
                Rank::FOUR => {
                    write!(
                        f,
                        "     Pinned: {}",
                        squares_to_string((self.pin_hv | self.pin_d) & self.color(self.side_to_move()))
                    )?;
                }
                _ => {}
            }
            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n  ")?;
        for file in File::iter() {
            write!(f, " {file}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position:\n{:?}\n\nCheckers:\n{}\nCheckmask:\n{}\nPins (HV):\n{}\nPins (D):\n{}",
            self.position, self.checkers, self.checkmask, self.pin_hv, self.pin_d
        )
    }
}
