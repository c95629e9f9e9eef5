//! Skirmish: the built-in demo game.
//!
//! A compact breakthrough-style duel on a 5x5 board. Each side fields five
//! footmen and a captain. Footmen advance one rank at a time, straight onto
//! an empty square or diagonally onto an empty or enemy-held one; captains
//! step to any adjacent square. A side wins by capturing the enemy captain
//! or by landing any piece on the enemy's home rank. A side with no moves is
//! stalemated, and a game that drags past the move cap is drawn.
//!
//! The full crate runs against this engine in the demo binary and in tests;
//! real chess and xiangqi oracles plug into the same trait from outside.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

use crate::alpha_beta_searcher::{CoordinateMove, Piece, RulesEngine};
use crate::evaluate::{MaterialEvaluator, PieceValues};
use crate::side::Side;

const BOARD_SIZE: u8 = 5;
const BOARD_SQUARES: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SkirmishPiece {
    Footman,
    Captain,
}

/// Material table for skirmish. The captain carries no weight: losing it
/// ends the game, so the search handles it through terminal detection, not
/// through material.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkirmishValues;

impl PieceValues for SkirmishValues {
    type Kind = SkirmishPiece;

    fn value(&self, kind: SkirmishPiece) -> i16 {
        match kind {
            SkirmishPiece::Footman => 100,
            SkirmishPiece::Captain => 0,
        }
    }
}

pub type SkirmishEvaluator = MaterialEvaluator<SkirmishValues>;

/// A square on the 5x5 board, indexed rank-major from a1.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Coord(u8);

impl Coord {
    pub fn new(file: u8, rank: u8) -> Self {
        assert!(
            file < BOARD_SIZE && rank < BOARD_SIZE,
            "coordinate off the board: file {} rank {}",
            file,
            rank
        );
        Coord(rank * BOARD_SIZE + file)
    }

    pub fn file(&self) -> u8 {
        self.0 % BOARD_SIZE
    }

    pub fn rank(&self) -> u8 {
        self.0 / BOARD_SIZE
    }

    fn index(&self) -> usize {
        self.0 as usize
    }

    fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Coord> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..BOARD_SIZE as i8).contains(&file) && (0..BOARD_SIZE as i8).contains(&rank) {
            Some(Coord::new(file as u8, rank as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

// used for parsing board input
type ParseError = &'static str;
impl FromStr for Coord {
    type Err = ParseError;
    fn from_str(square: &str) -> Result<Self, Self::Err> {
        const MSG: ParseError = "invalid square; expected a1 through e5";
        let bytes = square.as_bytes();
        if bytes.len() != 2 {
            return Err(MSG);
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file >= BOARD_SIZE || rank >= BOARD_SIZE {
            return Err(MSG);
        }
        Ok(Coord::new(file, rank))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SkirmishMove {
    from: Coord,
    to: Coord,
}

impl SkirmishMove {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}

impl CoordinateMove for SkirmishMove {
    type Square = Coord;

    fn from_square(&self) -> Coord {
        self.from
    }

    fn to_square(&self) -> Coord {
        self.to
    }
}

impl fmt::Display for SkirmishMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

pub type SkirmishMoveList = SmallVec<[SkirmishMove; 32]>;

#[derive(Error, Debug, PartialEq)]
pub enum SkirmishError {
    #[error("illegal move")]
    IllegalMove,
    #[error("no move to undo")]
    NothingToUndo,
    #[error("square is already occupied")]
    SquareOccupied,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct HistoryEntry {
    game_move: SkirmishMove,
    captured: Option<Piece<SkirmishPiece>>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SkirmishGame {
    board: [Option<Piece<SkirmishPiece>>; BOARD_SQUARES],
    turn: Side,
    history: Vec<HistoryEntry>,
    move_count: usize,
}

impl SkirmishGame {
    /// Half-moves after which the game is scored a draw.
    pub const DRAW_MOVE_CAP: usize = 200;

    pub fn new() -> Self {
        let mut game = Self::new_empty();
        for file in 0..BOARD_SIZE {
            game.board[Coord::new(file, 1).index()] =
                Some(Piece::new(SkirmishPiece::Footman, Side::Light));
            game.board[Coord::new(file, 3).index()] =
                Some(Piece::new(SkirmishPiece::Footman, Side::Dark));
        }
        game.board[Coord::new(2, 0).index()] =
            Some(Piece::new(SkirmishPiece::Captain, Side::Light));
        game.board[Coord::new(2, 4).index()] =
            Some(Piece::new(SkirmishPiece::Captain, Side::Dark));
        game
    }

    pub fn new_empty() -> Self {
        Self {
            board: [None; BOARD_SQUARES],
            turn: Side::Light,
            history: Vec::new(),
            move_count: 0,
        }
    }

    /// Places a piece during position setup.
    pub fn put(
        &mut self,
        coord: Coord,
        kind: SkirmishPiece,
        side: Side,
    ) -> Result<(), SkirmishError> {
        if self.board[coord.index()].is_some() {
            return Err(SkirmishError::SquareOccupied);
        }
        self.board[coord.index()] = Some(Piece::new(kind, side));
        Ok(())
    }

    /// Overrides the side to move during position setup.
    pub fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    /// Overrides the half-move counter during position setup.
    pub fn set_move_count(&mut self, count: usize) {
        self.move_count = count;
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    fn forward(side: Side) -> i8 {
        match side {
            Side::Light => 1,
            Side::Dark => -1,
        }
    }

    fn home_rank(side: Side) -> u8 {
        match side {
            Side::Light => 0,
            Side::Dark => BOARD_SIZE - 1,
        }
    }

    fn has_captain(&self, side: Side) -> bool {
        self.board
            .iter()
            .flatten()
            .any(|piece| piece.kind == SkirmishPiece::Captain && piece.side == side)
    }

    fn breakthrough_against(&self, side: Side) -> bool {
        let rank = Self::home_rank(side);
        (0..BOARD_SIZE).any(|file| {
            self.board[Coord::new(file, rank).index()]
                .map_or(false, |piece| piece.side == side.opposite())
        })
    }

    fn is_beaten(&self, side: Side) -> bool {
        !self.has_captain(side) || self.breakthrough_against(side)
    }

    fn piece_moves(&self, from: Coord) -> SkirmishMoveList {
        let mut moves = SkirmishMoveList::new();
        let piece = match self.board[from.index()] {
            Some(piece) => piece,
            None => return moves,
        };

        match piece.kind {
            SkirmishPiece::Footman => {
                let rank_delta = Self::forward(piece.side);
                for file_delta in [-1i8, 0, 1] {
                    if let Some(to) = from.offset(file_delta, rank_delta) {
                        let occupant = self.board[to.index()];
                        // Straight advances never capture; diagonal steps may.
                        let allowed = if file_delta == 0 {
                            occupant.is_none()
                        } else {
                            occupant.map_or(true, |other| other.side != piece.side)
                        };
                        if allowed {
                            moves.push(SkirmishMove::new(from, to));
                        }
                    }
                }
            }
            SkirmishPiece::Captain => {
                for file_delta in [-1i8, 0, 1] {
                    for rank_delta in [-1i8, 0, 1] {
                        if file_delta == 0 && rank_delta == 0 {
                            continue;
                        }
                        if let Some(to) = from.offset(file_delta, rank_delta) {
                            let occupant = self.board[to.index()];
                            if occupant.map_or(true, |other| other.side != piece.side) {
                                moves.push(SkirmishMove::new(from, to));
                            }
                        }
                    }
                }
            }
        }
        moves
    }
}

impl Default for SkirmishGame {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for SkirmishGame {
    type PieceKind = SkirmishPiece;
    type Square = Coord;
    type Move = SkirmishMove;
    type MoveList = SkirmishMoveList;
    type MoveError = SkirmishError;

    fn turn(&self) -> Side {
        self.turn
    }

    fn piece_at(&self, square: Coord) -> Option<Piece<SkirmishPiece>> {
        self.board[square.index()]
    }

    fn pieces(&self) -> Vec<Piece<SkirmishPiece>> {
        self.board.iter().flatten().copied().collect()
    }

    fn legal_moves(&mut self) -> SkirmishMoveList {
        let mut moves = SkirmishMoveList::new();
        // A decided game offers no continuations.
        if self.is_beaten(self.turn) {
            return moves;
        }
        for index in 0..BOARD_SQUARES {
            match self.board[index] {
                Some(piece) if piece.side == self.turn => {
                    moves.extend(self.piece_moves(Coord(index as u8)));
                }
                _ => {}
            }
        }
        moves
    }

    fn moves_from(&mut self, square: Coord) -> SkirmishMoveList {
        match self.piece_at(square) {
            Some(piece) if piece.side == self.turn && !self.is_beaten(self.turn) => {
                self.piece_moves(square)
            }
            _ => SkirmishMoveList::new(),
        }
    }

    fn apply_move(&mut self, game_move: &SkirmishMove) -> Result<(), SkirmishError> {
        let piece = self
            .piece_at(game_move.from)
            .ok_or(SkirmishError::IllegalMove)?;
        if piece.side != self.turn || self.is_beaten(self.turn) {
            return Err(SkirmishError::IllegalMove);
        }
        if !self.piece_moves(game_move.from).contains(game_move) {
            return Err(SkirmishError::IllegalMove);
        }

        let captured = self.board[game_move.to.index()];
        self.board[game_move.to.index()] = Some(piece);
        self.board[game_move.from.index()] = None;
        self.history.push(HistoryEntry {
            game_move: *game_move,
            captured,
        });
        self.move_count += 1;
        self.turn = self.turn.opposite();
        Ok(())
    }

    fn undo_move(&mut self) -> Result<(), SkirmishError> {
        let entry = self.history.pop().ok_or(SkirmishError::NothingToUndo)?;
        self.board[entry.game_move.from.index()] = self.board[entry.game_move.to.index()];
        self.board[entry.game_move.to.index()] = entry.captured;
        self.move_count -= 1;
        self.turn = self.turn.opposite();
        Ok(())
    }

    fn is_game_over(&mut self) -> bool {
        self.is_checkmate() || self.is_draw() || self.is_stalemate()
    }

    fn is_checkmate(&mut self) -> bool {
        self.is_beaten(self.turn)
    }

    fn is_stalemate(&mut self) -> bool {
        !self.is_beaten(self.turn) && self.legal_moves().is_empty()
    }

    fn is_draw(&mut self) -> bool {
        !self.is_beaten(self.turn) && self.move_count >= Self::DRAW_MOVE_CAP
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

fn piece_symbol(piece: Piece<SkirmishPiece>) -> char {
    match (piece.kind, piece.side) {
        (SkirmishPiece::Footman, Side::Light) => 'F',
        (SkirmishPiece::Captain, Side::Light) => 'C',
        (SkirmishPiece::Footman, Side::Dark) => 'f',
        (SkirmishPiece::Captain, Side::Dark) => 'c',
    }
}

impl fmt::Display for SkirmishGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_SIZE).rev() {
            write!(f, "{}", rank + 1)?;
            for file in 0..BOARD_SIZE {
                let symbol = match self.board[Coord::new(file, rank).index()] {
                    Some(piece) => piece_symbol(piece),
                    None => '.',
                };
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e")
    }
}

/// Builds a skirmish position from a 5x5 character grid given from light's
/// perspective (the bottom-left square is a1). `F`/`C` are light footmen and
/// captains, `f`/`c` their dark counterparts, `.` an empty square. Light is
/// left to move; follow with `set_turn` for dark-to-move positions.
#[macro_export]
macro_rules! skirmish_position {
    ($($square:tt)*) => {{
        let mut game = SkirmishGame::new_empty();
        // Convert all input tokens to a string and filter out whitespace characters.
        let squares: Vec<_> = stringify!($($square)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(squares.len(), 25, "Invalid number of squares. Expected 25, got {}", squares.len());
        for (i, &c) in squares.iter().enumerate() {
            if c != '.' {
                let (kind, side) = match c {
                    'F' => (SkirmishPiece::Footman, Side::Light),
                    'C' => (SkirmishPiece::Captain, Side::Light),
                    'f' => (SkirmishPiece::Footman, Side::Dark),
                    'c' => (SkirmishPiece::Captain, Side::Dark),
                    _ => panic!("Invalid character in skirmish position"),
                };
                // The grid reads top-down while ranks count bottom-up, so flip
                // the row before indexing.
                let row = i / 5;
                let col = i % 5;
                let rank = 4 - row;
                game.put(Coord::new(col as u8, rank as u8), kind, side).unwrap();
            }
        }
        game
    }};
}
