/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Deref, Index, IndexMut},
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};

use super::{
    pawn_attacks, Bitboard, Color, File, Move, Piece, PieceKind, Rank, Square, ZobristKey,
    FEN_STARTPOS,
};

/// Represents the castling rights of both players as a 4-bit mask.
///
/// A right is held until the moment the relevant King or Rook first moves,
/// or the Rook is captured on its home square; it is never restored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct CastlingRights(u8);

impl CastlingRights {
    const WHITE_KINGSIDE: u8 = 1 << 0;
    const WHITE_QUEENSIDE: u8 = 1 << 1;
    const BLACK_KINGSIDE: u8 = 1 << 2;
    const BLACK_QUEENSIDE: u8 = 1 << 3;

    /// Number of possible rights combinations, for indexing into lists.
    pub const COUNT: usize = 16;

    /// Rights with no castling allowed for either player.
    pub const NONE: Self = Self(0);

    /// Rights with all four castling moves still available.
    pub const ALL: Self = Self(0b1111);

    /// For each square, the rights that survive a piece moving from or to it.
    ///
    /// Rook home squares strip the single right tied to that square; the King
    /// squares strip both of their side's rights. Applying the table to both
    /// ends of every move covers King moves, first Rook moves, Rook captures,
    /// and castling itself, and can never touch the other side's rights.
    const KEPT: [u8; Square::COUNT] = {
        let mut kept = [0b1111u8; Square::COUNT];
        kept[Square::A1.index()] = 0b1111 ^ Self::WHITE_QUEENSIDE;
        kept[Square::E1.index()] = 0b1111 ^ (Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE);
        kept[Square::H1.index()] = 0b1111 ^ Self::WHITE_KINGSIDE;
        kept[Square::A8.index()] = 0b1111 ^ Self::BLACK_QUEENSIDE;
        kept[Square::E8.index()] = 0b1111 ^ (Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE);
        kept[Square::H8.index()] = 0b1111 ^ Self::BLACK_KINGSIDE;
        kept
    };

    /// Creates a [`CastlingRights`] from the castling field of a FEN string.
    ///
    /// # Example
    /// ```
    /// # use newt::CastlingRights;
    /// assert_eq!(CastlingRights::from_uci("KQkq").unwrap(), CastlingRights::ALL);
    /// assert_eq!(CastlingRights::from_uci("-").unwrap(), CastlingRights::NONE);
    /// assert!(CastlingRights::from_uci("KX").is_err());
    /// ```
    pub fn from_uci(castling: &str) -> Result<Self> {
        if castling == "-" {
            return Ok(Self::NONE);
        }

        let mut rights = 0;
        for c in castling.chars() {
            rights |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => bail!("Castling rights must be '-' or a subset of \"KQkq\". Got {castling:?}"),
            };
        }
        Ok(Self(rights))
    }

    /// Returns `true` if `color` may still castle kingside (short).
    #[inline(always)]
    pub const fn kingside(&self, color: Color) -> bool {
        self.0 & (Self::WHITE_KINGSIDE << (2 * color.index())) != 0
    }

    /// Returns `true` if `color` may still castle queenside (long).
    #[inline(always)]
    pub const fn queenside(&self, color: Color) -> bool {
        self.0 & (Self::WHITE_QUEENSIDE << (2 * color.index())) != 0
    }

    /// Returns `true` if no player holds any castling right.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the rights that remain after a piece moves from or to `square`.
    #[inline(always)]
    pub(crate) const fn kept_after(self, square: Square) -> Self {
        Self(self.0 & Self::KEPT[square.index()])
    }

    /// Returns this rights mask as a `usize` in `0..16`, for indexing into lists.
    #[inline(always)]
    pub(crate) const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CastlingRights {
    /// Displays the rights in FEN notation: a subset of `KQkq`, or `-` if empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }

        if self.kingside(Color::White) {
            write!(f, "K")?;
        }
        if self.queenside(Color::White) {
            write!(f, "Q")?;
        }
        if self.kingside(Color::Black) {
            write!(f, "k")?;
        }
        if self.queenside(Color::Black) {
            write!(f, "q")?;
        }
        Ok(())
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({self})")
    }
}

/// Represents the current state of a game, including piece placement and counters.
///
/// This is analogous to a FEN string. It can apply moves, but holds no history;
/// if you need reversible moves and legality, use [`crate::Game`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Bitboard representation of the game board.
    board: Board,

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// Castling rights for both players.
    castling_rights: CastlingRights,

    /// Optional attack square for en passant.
    ep_square: Option<Square>,

    /// Number of halfmoves since the last capture or pawn move.
    halfmove: usize,

    /// Number of completed turns; incremented after each of Black's moves.
    fullmove: usize,

    /// Zobrist hash key of this position.
    key: ZobristKey,
}

impl Position {
    /// Creates a new, empty [`Position`]: no pieces, White to move, no castling
    /// rights, no en passant square, halfmove 0, fullmove 1.
    ///
    /// # Example
    /// ```
    /// # use newt::Position;
    /// let pos = Position::new();
    /// assert_eq!(pos.to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        let board = Board::new();
        let side_to_move = Color::White;
        let castling_rights = CastlingRights::NONE;
        let ep_square = None;

        let key = ZobristKey::from_parts(&board, ep_square, castling_rights, side_to_move);

        Self {
            board,
            side_to_move,
            castling_rights,
            ep_square,
            halfmove: 0,
            fullmove: 1,
            key,
        }
    }

    /// Creates a new [`Position`] from the provided FEN string.
    ///
    /// The four fields for piece placement, side to move, castling rights, and
    /// en passant square are mandatory; the halfmove clock and fullmove number
    /// default to `0` and `1` when absent.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut pos = Self::new();
        let mut split = fen.trim().split_ascii_whitespace();

        let placements = split
            .next()
            .ok_or(anyhow!("FEN string must have piece placements"))?;
        pos.board = Board::from_fen(placements)?;

        let side_to_move = split
            .next()
            .ok_or(anyhow!("FEN string must have a side-to-move field"))?;
        pos.side_to_move = Color::from_str(side_to_move)?;

        let castling = split
            .next()
            .ok_or(anyhow!("FEN string must have a castling rights field"))?;
        pos.castling_rights = CastlingRights::from_uci(castling)?;

        let ep = split
            .next()
            .ok_or(anyhow!("FEN string must have an en passant field"))?;
        pos.ep_square = match ep {
            "-" => None,
            square => Some(Square::from_uci(square)?),
        };

        let halfmove = split.next().unwrap_or("0");
        pos.halfmove = halfmove.parse().or(Err(anyhow!(
            "FEN string must have a valid halfmove counter. Got {halfmove:?}"
        )))?;

        let fullmove = split.next().unwrap_or("1");
        pos.fullmove = fullmove.parse().or(Err(anyhow!(
            "FEN string must have a valid fullmove counter. Got {fullmove:?}"
        )))?;

        pos.key = ZobristKey::new(&pos);

        Ok(pos)
    }

    /// Generates a FEN string from this [`Position`].
    ///
    /// # Example
    /// ```
    /// # use newt::Position;
    /// let pos = Position::default();
    /// assert_eq!(pos.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    /// ```
    #[inline(always)]
    pub fn to_fen(&self) -> String {
        format!("{self}")
    }

    /// Returns the current player as a [`Color`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// If en passant can be performed, returns the en passant [`Square`].
    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the [`CastlingRights`] of the current position.
    #[inline(always)]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Returns the halfmove counter of the current position.
    #[inline(always)]
    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    /// Returns the fullmove counter of the current position.
    #[inline(always)]
    pub const fn fullmove(&self) -> usize {
        self.fullmove
    }

    /// Fetch the Zobrist hash key of this position.
    #[inline(always)]
    pub const fn key(&self) -> ZobristKey {
        self.key
    }

    /// Fetches this position's [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Toggles the current player from White to Black (or vice versa).
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Applies the provided [`Move`]. No enforcement of legality.
    ///
    /// Every field of the position, including the Zobrist key, is updated in step:
    /// captured pieces (including the en passant victim) are removed, the paired
    /// Rook is relocated on castling, castling rights are burned for any move
    /// touching a Rook home square or a King square, and a new en passant target
    /// is recorded only when an enemy Pawn could immediately capture there.
    pub fn make_move(&mut self, mv: Move) {
        // Remove the piece from its previous location, exiting early if there is no piece there
        let Some(mut piece) = self.take(mv.from()) else {
            return;
        };

        let color = piece.color();
        let (from, to) = (mv.from(), mv.to());

        // Un-hash the side-to-move and any stale en passant target
        self.key.hash_side_to_move(self.side_to_move);
        if let Some(ep_square) = self.ep_square.take() {
            self.key.hash_ep_square(ep_square);
        }

        // Move counters; the halfmove clock resets on captures and pawn moves
        self.halfmove += 1;
        self.fullmove += self.side_to_move.index();
        if piece.is_pawn() {
            self.halfmove = 0;
        }

        if mv.is_capture() {
            // An en passant victim isn't at `to`; it sits one rank behind the target square
            let victim_square = if mv.is_en_passant() {
                // Safety: en passant targets only exist on ranks 3 and 6
                unsafe { to.backward_by(color, 1).unwrap_unchecked() }
            } else {
                to
            };

            self.take(victim_square);
            self.halfmove = 0;
        } else if mv.is_castle() {
            // The King lands on the G or C file; the paired Rook hops over him
            let rank = from.rank();
            let (rook_from, rook_to) = if to.file() > from.file() {
                (Square::new(File::H, rank), Square::new(File::F, rank))
            } else {
                (Square::new(File::A, rank), Square::new(File::D, rank))
            };

            // Safety: castling is only generated with the Rook still on its home square
            let rook = self.take(rook_from).unwrap();
            self.place(rook, rook_to);
        } else if mv.is_double_push() {
            // Record the square behind the push, but only if an enemy Pawn can capture there
            // Safety: a double push always has a square directly behind its destination
            let ep_square = unsafe { from.forward_by(color, 1).unwrap_unchecked() };
            if pawn_attacks(ep_square, color).intersects(self.board.pawns(color.opponent())) {
                self.ep_square = Some(ep_square);
                self.key.hash_ep_square(ep_square);
            }
        }

        // Any move touching a Rook home square or a King square burns the tied rights
        self.key.hash_castling_rights(self.castling_rights);
        self.castling_rights = self.castling_rights.kept_after(from).kept_after(to);
        self.key.hash_castling_rights(self.castling_rights);

        // A promoting Pawn is replaced by its promotion piece
        if let Some(promoted) = mv.promoted() {
            piece = promoted;
        }

        self.place(piece, to);

        // Next player's turn
        self.toggle_side_to_move();
        self.key.hash_side_to_move(self.side_to_move);
    }

    /// Places a piece at the provided square, updating Zobrist hash information.
    #[inline(always)]
    fn place(&mut self, piece: Piece, square: Square) {
        self.board.place(piece, square);
        self.key.hash_piece(square, piece);
    }

    /// Removes and returns a piece on the provided square, updating Zobrist hash information.
    #[inline(always)]
    fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board.take(square)?;
        self.key.hash_piece(square, piece);
        Some(piece)
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

impl Deref for Position {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.board()
    }
}

impl Default for Position {
    /// Standard starting position for chess.
    #[inline(always)]
    fn default() -> Self {
        // Safety: The FEN for startpos is always valid
        unsafe { Self::from_fen(FEN_STARTPOS).unwrap_unchecked() }
    }
}

impl fmt::Display for Position {
    /// Display this position's FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ep = self
            .ep_square
            .map(|sq| sq.to_uci())
            .unwrap_or(String::from("-"));

        write!(
            f,
            "{} {} {} {ep} {} {}",
            self.board.to_fen(),
            self.side_to_move,
            self.castling_rights,
            self.halfmove,
            self.fullmove
        )
    }
}

impl fmt::Debug for Position {
    /// Renders the board as an `8x8` grid, with state lines alongside it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                let square = Square::new(file, rank);
                let piece_char = self.board.piece_at(square).map(|p| p.char()).unwrap_or('.');
                write!(f, " {piece_char}")?;
            }

            match rank {
                Rank::SEVEN => write!(f, "           FEN: {}", self.to_fen())?,
                Rank::SIX => write!(f, "          Side: {}", self.side_to_move)?,
                Rank::FIVE => write!(f, "      Castling: {}", self.castling_rights)?,
                Rank::FOUR => {
                    let ep = self
                        .ep_square
                        .map(|sq| sq.to_uci())
                        .unwrap_or(String::from("-"));
                    write!(f, "            EP: {ep}")?;
                }
                Rank::THREE => write!(f, "     Half-move: {}", self.halfmove)?,
                Rank::TWO => write!(f, "     Full-move: {}", self.fullmove)?,
                Rank::ONE => write!(f, "           Key: {}", self.key)?,
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

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of castling rights, en passant, or move counters. If you need those, see [`Position`].
///
/// Internally keeps a [`Bitboard`] per color and per piece kind, plus a redundant
/// mailbox for square lookups. Every mutation goes through [`Board::place`] and
/// [`Board::take`], which keep the two views in lockstep.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// All squares occupied by a specific color.
    colors: [Bitboard; Color::COUNT],

    /// All squares occupied by a specific piece kind.
    pieces: [Bitboard; PieceKind::COUNT],

    /// Redundant mailbox to speed up the [`Board::piece_at`] functions.
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use newt::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            colors: [Bitboard::EMPTY_BOARD; Color::COUNT],
            pieces: [Bitboard::EMPTY_BOARD; PieceKind::COUNT],
            mailbox: [None; Square::COUNT],
        }
    }

    /// Constructs a [`Board`] from the placements field of a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();

        // If this FEN string contains more than just the initial placements, extract the placements
        let placements = if fen.contains(' ') {
            fen.split(' ').next().unwrap()
        } else {
            fen
        };

        if placements.matches('/').count() != 7 {
            bail!("FEN must have piece placements for all 8 ranks");
        }

        // Reversed so that White pieces are at the "bottom" of the board
        for (rank, placements) in placements.split('/').rev().enumerate() {
            let mut file = 0;
            let rank = rank as u8;

            for piece_char in placements.chars() {
                if let Ok(piece) = Piece::from_uci(piece_char) {
                    let square = Square::new(File(file), Rank(rank));
                    board.place(piece, square);
                    file += 1;
                } else {
                    let Some(empty) = piece_char.to_digit(10) else {
                        bail!(
                            "FEN placements must contain piece chars or digits. Got {piece_char:?}"
                        );
                    };
                    file += empty as u8;
                }
            }
        }

        Ok(board)
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Places the provided [`Piece`] at the supplied [`Square`].
    ///
    /// If another piece occupies this square, this does *not* remove that piece.
    /// Use [`Board::take`] first.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Piece, Square};
    /// let mut board = Board::new();
    /// board.place(Piece::WHITE_KNIGHT, Square::C4);
    /// assert_eq!(board.to_fen(), "8/8/8/8/2N5/8/8/8");
    /// ```
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self[piece.color()].set(square);
        self[piece.kind()].set(square);
        self.mailbox[square.index()] = Some(piece);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Piece, Square};
    /// let mut board = Board::from_fen("k7/8/8/8/2N5/8/8/7K").unwrap();
    /// let taken = board.take(Square::C4);
    /// assert_eq!(board.to_fen(), "k7/8/8/8/8/8/8/7K");
    /// assert_eq!(taken, Some(Piece::WHITE_KNIGHT));
    /// ```
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        // Take the piece from the mailbox, exiting early if there is none
        let piece = self.mailbox[square.index()].take()?;

        self.colors[piece.color().index()].clear(square);
        self.pieces[piece.kind().index()].clear(square);

        Some(piece)
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Piece, Square};
    /// let board = Board::default();
    /// assert_eq!(board.piece_at(Square::A2), Some(Piece::WHITE_PAWN));
    /// assert!(board.piece_at(Square::E4).is_none());
    /// ```
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.mailbox[square.index()].map(|piece| piece.color())
    }

    /// Fetches the [`PieceKind`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.mailbox[square.index()].map(|piece| piece.kind())
    }

    /// Fetches the [`Piece`] at the provided [`Square`], without checking that one is there.
    ///
    /// It is undefined behavior to call this function on an empty square.
    #[inline(always)]
    pub fn piece_at_unchecked(&self, square: Square) -> Piece {
        unsafe { self.piece_at(square).unwrap_unchecked() }
    }

    /// Fetches the [`Bitboard`] of all pieces matching the supplied [`PieceKind`], regardless of color.
    #[inline(always)]
    pub const fn kind(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// Fetches the [`Bitboard`] of all pieces matching the supplied [`Color`].
    ///
    /// # Example
    /// ```
    /// # use newt::{Bitboard, Board, Color};
    /// let board = Board::default();
    /// assert_eq!(board.color(Color::White), Bitboard::RANK_1 | Bitboard::RANK_2);
    /// ```
    #[inline(always)]
    pub const fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Fetches a [`Bitboard`] of all occupied squares on the board.
    #[inline(always)]
    pub const fn occupied(&self) -> Bitboard {
        self.color(Color::White).or(self.color(Color::Black))
    }

    /// Fetches a [`Bitboard`] of all non-occupied squares on the board.
    #[inline(always)]
    pub const fn empty(&self) -> Bitboard {
        self.occupied().not()
    }

    /// Fetches the [`Bitboard`] of all occurrences of the supplied [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use newt::{Bitboard, Board, Piece};
    /// let board = Board::default();
    /// assert_eq!(board.piece(Piece::WHITE_PAWN), Bitboard::RANK_2);
    /// ```
    #[inline(always)]
    pub const fn piece(&self, piece: Piece) -> Bitboard {
        self.piece_parts(piece.color(), piece.kind())
    }

    /// Analogous to [`Board::piece`] with a [`Piece`]'s individual components.
    #[inline(always)]
    pub const fn piece_parts(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.color(color).and(self.kind(kind))
    }

    /// Fetches the [`Bitboard`] for the Pawns of the provided color.
    #[inline(always)]
    pub const fn pawns(&self, color: Color) -> Bitboard {
        self.piece_parts(color, PieceKind::Pawn)
    }

    /// Fetches the [`Bitboard`] for the Knights of the provided color.
    #[inline(always)]
    pub const fn knights(&self, color: Color) -> Bitboard {
        self.piece_parts(color, PieceKind::Knight)
    }

    /// Fetches the [`Bitboard`] for the Bishops of the provided color.
    #[inline(always)]
    pub const fn bishops(&self, color: Color) -> Bitboard {
        self.piece_parts(color, PieceKind::Bishop)
    }

    /// Fetches the [`Bitboard`] for the Rooks of the provided color.
    #[inline(always)]
    pub const fn rooks(&self, color: Color) -> Bitboard {
        self.piece_parts(color, PieceKind::Rook)
    }

    /// Fetches the [`Bitboard`] for the Queen(s) of the provided color.
    #[inline(always)]
    pub const fn queens(&self, color: Color) -> Bitboard {
        self.piece_parts(color, PieceKind::Queen)
    }

    /// Fetches the [`Bitboard`] for the King of the provided color.
    #[inline(always)]
    pub const fn king(&self, color: Color) -> Bitboard {
        self.piece_parts(color, PieceKind::King)
    }

    /// Fetches a [`Bitboard`] of all orthogonal sliding pieces (Rook, Queen) of the provided color.
    #[inline(always)]
    pub fn orthogonal_sliders(&self, color: Color) -> Bitboard {
        (self.kind(PieceKind::Rook) | self.kind(PieceKind::Queen)) & self.color(color)
    }

    /// Fetches a [`Bitboard`] of all diagonal sliding pieces (Bishop, Queen) of the provided color.
    #[inline(always)]
    pub fn diagonal_sliders(&self, color: Color) -> Bitboard {
        (self.kind(PieceKind::Bishop) | self.kind(PieceKind::Queen)) & self.color(color)
    }

    /// Fetches all squares that are either empty or occupied by `color`'s enemy.
    #[inline(always)]
    pub const fn enemy_or_empty(&self, color: Color) -> Bitboard {
        self.color(color).not()
    }

    /// Creates a [`BoardIter`] over all occupied [`Square`]s in this [`Board`].
    #[inline(always)]
    pub const fn iter(&self) -> BoardIter<'_> {
        BoardIter {
            board: self,
            occupancy: self.occupied(),
        }
    }

    /// Generates the placements field of a [FEN](https://www.chess.com/terms/fen-chess) string for this [`Board`].
    pub fn to_fen(&self) -> String {
        let mut placements: [String; Rank::COUNT] = Default::default();

        for rank in Rank::iter() {
            let mut empty_spaces = 0;
            for file in File::iter() {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        placements[rank.index()] += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    placements[rank.index()].push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                placements[rank.index()] += &empty_spaces.to_string();
            }
        }
        placements.reverse();

        placements.join("/")
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        // Safety: The FEN for startpos is always valid
        unsafe { Self::from_fen(FEN_STARTPOS).unwrap_unchecked() }
    }
}

impl Index<PieceKind> for Board {
    type Output = Bitboard;
    #[inline(always)]
    fn index(&self, index: PieceKind) -> &Self::Output {
        &self.pieces[index.index()]
    }
}

impl IndexMut<PieceKind> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: PieceKind) -> &mut Self::Output {
        &mut self.pieces[index.index()]
    }
}

impl Index<Color> for Board {
    type Output = Bitboard;
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self.colors[index.index()]
    }
}

impl IndexMut<Color> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self.colors[index.index()]
    }
}

impl<'a> IntoIterator for &'a Board {
    type IntoIter = BoardIter<'a>;
    type Item = <BoardIter<'a> as Iterator>::Item;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Board {
    /// Renders this [`Board`] as an `8x8` grid of piece characters, with rank 8 on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}| ")?;

            for file in File::iter() {
                let square = Square::new(file, rank);
                let occupant = self.piece_at(square).map(|p| p.char()).unwrap_or('.');
                write!(f, "{occupant} ")?;
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

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self.to_fen())
    }
}

/// An iterator over a set of squares on a [`Board`].
///
/// Calls to [`Iterator::next`] will yield a tuple of a [`Square`] and the [`Piece`] on it.
pub struct BoardIter<'a> {
    /// The board to retrieve pieces from.
    board: &'a Board,

    /// The set of squares to iterate over.
    occupancy: Bitboard,
}

impl Iterator for BoardIter<'_> {
    type Item = (Square, Piece);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.occupancy.is_empty() {
            return None;
        }

        let square = self.occupancy.pop_lsb();
        // Safety: the occupancy only holds occupied squares
        let piece = self.board.piece_at_unchecked(square);
        Some((square, piece))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.occupancy.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BoardIter<'_> {}
