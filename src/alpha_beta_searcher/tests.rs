//! Engine-agnostic tests for the search core, exercised with a token-pile
//! toy game and the built-in skirmish engine.
//!
//! Test coverage:
//! - Winning-move selection and play to completion on the pile game
//! - Score agreement between the pruned search and plain minimax
//! - Position restoration after every search
//! - Terminal handling without move enumeration
//! - Seeded shuffle determinism and strict tie-breaking
//! - Error handling (zero depth) and the no-moves contract

use super::search::update_best;
use super::*;
use std::cmp::{max, min};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::games::skirmish::{
    Coord, SkirmishEvaluator, SkirmishGame, SkirmishMove, SkirmishPiece, SkirmishValues,
};
use crate::side::Side;
use crate::skirmish_position;

/// A pile of tokens: each turn removes one to three of them, and whoever
/// takes the last token wins. The side to move at an empty pile has lost.
#[derive(Clone, Debug)]
struct PileGame {
    pile: u8,
    initial: u8,
    turn: Side,
    history: Vec<u8>,
}

impl PileGame {
    fn new(pile: u8) -> Self {
        Self {
            pile,
            initial: pile,
            turn: Side::Light,
            history: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct PileMove {
    take: u8,
}

impl RulesEngine for PileGame {
    type PieceKind = ();
    type Square = u8;
    type Move = PileMove;
    type MoveList = Vec<PileMove>;
    type MoveError = &'static str;

    fn turn(&self) -> Side {
        self.turn
    }

    fn piece_at(&self, _square: u8) -> Option<Piece<()>> {
        None
    }

    fn pieces(&self) -> Vec<Piece<()>> {
        Vec::new()
    }

    fn legal_moves(&mut self) -> Vec<PileMove> {
        (1..=min(3, self.pile)).map(|take| PileMove { take }).collect()
    }

    fn moves_from(&mut self, _square: u8) -> Vec<PileMove> {
        self.legal_moves()
    }

    fn apply_move(&mut self, game_move: &PileMove) -> Result<(), &'static str> {
        if game_move.take == 0 || game_move.take > 3 || game_move.take > self.pile {
            return Err("invalid take");
        }
        self.pile -= game_move.take;
        self.history.push(game_move.take);
        self.turn = self.turn.opposite();
        Ok(())
    }

    fn undo_move(&mut self) -> Result<(), &'static str> {
        let take = self.history.pop().ok_or("nothing to undo")?;
        self.pile += take;
        self.turn = self.turn.opposite();
        Ok(())
    }

    fn is_game_over(&mut self) -> bool {
        self.pile == 0
    }

    fn is_checkmate(&mut self) -> bool {
        self.pile == 0
    }

    fn is_stalemate(&mut self) -> bool {
        false
    }

    fn is_draw(&mut self) -> bool {
        false
    }

    fn reset(&mut self) {
        self.pile = self.initial;
        self.turn = Side::Light;
        self.history.clear();
    }
}

/// Positional evaluation for the pile game. An empty pile is a loss for the
/// side to move; otherwise a pile that is a multiple of four is the losing
/// side of the parity trap.
struct PileEvaluator;

impl Evaluator<PileGame> for PileEvaluator {
    fn evaluate(&self, rules: &PileGame) -> i16 {
        let to_move_score = if rules.pile == 0 {
            -1000
        } else if rules.pile % 4 == 0 {
            -100
        } else {
            100
        };
        match rules.turn {
            Side::Light => to_move_score,
            Side::Dark => -to_move_score,
        }
    }
}

fn skirmish_evaluator() -> SkirmishEvaluator {
    SkirmishEvaluator::new(SkirmishValues)
}

fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Exhaustive minimax with no pruning, as a reference for score agreement.
fn plain_minimax<R, E>(
    rules: &mut R,
    evaluator: &E,
    depth: u8,
    maximizing_player: bool,
    visited: &mut usize,
) -> i16
where
    R: RulesEngine,
    E: Evaluator<R>,
{
    *visited += 1;
    if depth == 0 || rules.is_game_over() {
        return evaluator.evaluate(rules);
    }
    let candidates = rules.legal_moves();
    if candidates.is_empty() {
        return evaluator.evaluate(rules);
    }

    let mut best_score = if maximizing_player { i16::MIN } else { i16::MAX };
    for game_move in candidates.as_ref() {
        rules
            .apply_move(game_move)
            .expect("legal move should apply");
        let score = plain_minimax(rules, evaluator, depth - 1, !maximizing_player, visited);
        rules.undo_move().expect("undo should succeed");
        best_score = if maximizing_player {
            max(best_score, score)
        } else {
            min(best_score, score)
        };
    }
    best_score
}

#[test]
fn test_pile_finds_winning_move_from_5() {
    let mut game = PileGame::new(5);
    let mut context = SearchContext::new(10);
    let best_move = select_best_move(&mut context, &mut game, &PileEvaluator, &mut seeded_rng(1))
        .unwrap()
        .unwrap();
    assert_eq!(
        1, best_move.take,
        "from a pile of 5, taking 1 leaves the opponent trapped on 4"
    );
}

#[test]
fn test_pile_finds_winning_move_from_6() {
    let mut game = PileGame::new(6);
    let mut context = SearchContext::new(10);
    let best_move = select_best_move(&mut context, &mut game, &PileEvaluator, &mut seeded_rng(1))
        .unwrap()
        .unwrap();
    assert_eq!(2, best_move.take);
}

#[test]
fn test_pile_finds_winning_move_from_7() {
    let mut game = PileGame::new(7);
    let mut context = SearchContext::new(10);
    let best_move = select_best_move(&mut context, &mut game, &PileEvaluator, &mut seeded_rng(1))
        .unwrap()
        .unwrap();
    assert_eq!(3, best_move.take);
}

#[test]
fn test_pile_losing_position_still_yields_a_move() {
    let mut game = PileGame::new(4);
    let mut context = SearchContext::new(10);
    let best_move = select_best_move(&mut context, &mut game, &PileEvaluator, &mut seeded_rng(1))
        .unwrap()
        .expect("a lost-but-unfinished position still offers moves");
    assert!((1..=3).contains(&best_move.take));
}

#[test]
fn test_pile_winning_take_leaves_a_multiple_of_four() {
    for pile in 1..=15u8 {
        if pile % 4 == 0 {
            continue;
        }
        let mut game = PileGame::new(pile);
        let mut context = SearchContext::new(20);
        let best_move =
            select_best_move(&mut context, &mut game, &PileEvaluator, &mut seeded_rng(11))
                .unwrap()
                .expect("a non-empty pile offers moves");
        assert_eq!(
            0,
            (pile - best_move.take) % 4,
            "from pile {} the winning take is {}",
            pile,
            pile % 4
        );
    }
}

#[test]
fn test_pile_game_plays_to_completion() {
    let mut game = PileGame::new(5);
    let mut context = SearchContext::new(10);
    let mut rng = seeded_rng(3);
    let mut plies = 0;

    while let Some(game_move) =
        select_best_move(&mut context, &mut game, &PileEvaluator, &mut rng).unwrap()
    {
        game.apply_move(&game_move).unwrap();
        plies += 1;
        assert!(plies <= 5, "the game cannot outlast the pile");
    }

    assert_eq!(0, game.pile);
    assert_eq!(
        Side::Dark,
        game.turn(),
        "light moves first and should take the last token from a pile of 5"
    );
}

#[test]
fn test_depth_zero_selection_is_an_error() {
    let mut game = PileGame::new(5);
    let mut context = SearchContext::new(0);
    let result = select_best_move(&mut context, &mut game, &PileEvaluator, &mut seeded_rng(1));
    assert!(matches!(result, Err(SearchError::DepthTooLow)));
}

#[test]
fn test_no_moves_selects_none() {
    let mut game = PileGame::new(0);
    let mut context = SearchContext::new(5);
    let selected = select_best_move(&mut context, &mut game, &PileEvaluator, &mut seeded_rng(1))
        .unwrap();
    assert_eq!(None, selected, "an empty pile offers nothing to pick");

    // The converse direction: a position with moves left must yield one.
    let mut live = skirmish_position! {
        . . c . .
        . . . . .
        . . . . .
        . . F . .
        . . C . .
    };
    live.set_turn(Side::Dark);
    let mut context = SearchContext::new(3);
    let selected = select_best_move(
        &mut context,
        &mut live,
        &skirmish_evaluator(),
        &mut seeded_rng(1),
    )
    .unwrap();
    assert!(selected.is_some(), "a live position must yield a move");
}

#[test]
fn test_decided_skirmish_game_selects_none() {
    // Dark's captain is gone, dark to move: no continuations exist.
    let mut game = skirmish_position! {
        . . . . .
        . . . . .
        . . F . .
        . . . . .
        . . C . .
    };
    game.set_turn(Side::Dark);
    let mut context = SearchContext::new(3);
    let selected = select_best_move(
        &mut context,
        &mut game,
        &skirmish_evaluator(),
        &mut seeded_rng(1),
    )
    .unwrap();
    assert_eq!(None, selected);
}

#[test]
fn test_pruned_search_scores_match_plain_minimax() {
    for depth in 1..=3 {
        let mut game = SkirmishGame::new();
        let evaluator = skirmish_evaluator();
        let mut visited = 0;
        let reference = plain_minimax(&mut game, &evaluator, depth, true, &mut visited);
        let mut context = SearchContext::new(depth);
        let pruned = search(
            &mut context,
            &mut game,
            &evaluator,
            depth,
            i16::MIN,
            i16::MAX,
            true,
        );
        assert_eq!(
            reference, pruned,
            "pruning must not change the minimax score at depth {}",
            depth
        );
    }

    for pile in 1..=10 {
        let mut game = PileGame::new(pile);
        let mut visited = 0;
        let reference = plain_minimax(&mut game, &PileEvaluator, 6, true, &mut visited);
        let mut context = SearchContext::new(6);
        let pruned = search(
            &mut context,
            &mut game,
            &PileEvaluator,
            6,
            i16::MIN,
            i16::MAX,
            true,
        );
        assert_eq!(reference, pruned, "pile {} should score identically", pile);
    }
}

#[test]
fn test_pruned_search_matches_minimax_for_the_minimizing_side() {
    let mut game = skirmish_position! {
        . . c . .
        . f f . .
        . . . . .
        . F F . .
        . . C . .
    };
    game.set_turn(Side::Dark);
    let evaluator = skirmish_evaluator();
    let mut visited = 0;
    let reference = plain_minimax(&mut game, &evaluator, 3, false, &mut visited);
    let mut context = SearchContext::new(3);
    let pruned = search(
        &mut context,
        &mut game,
        &evaluator,
        3,
        i16::MIN,
        i16::MAX,
        false,
    );
    assert_eq!(reference, pruned);
}

#[test]
fn test_pruning_never_visits_more_nodes_than_minimax() {
    let mut game = SkirmishGame::new();
    let evaluator = skirmish_evaluator();

    let mut visited = 0;
    plain_minimax(&mut game, &evaluator, 3, true, &mut visited);

    let mut context = SearchContext::new(3);
    search(
        &mut context,
        &mut game,
        &evaluator,
        3,
        i16::MIN,
        i16::MAX,
        true,
    );

    assert!(
        context.searched_position_count() <= visited,
        "pruned search visited {} nodes, plain minimax {}",
        context.searched_position_count(),
        visited
    );
    assert!(context.searched_position_count() > 0);
}

#[test]
fn test_selection_restores_the_position() {
    for depth in 1..=3 {
        let mut game = SkirmishGame::new();
        let before = game.clone();
        let mut context = SearchContext::new(depth);
        select_best_move(
            &mut context,
            &mut game,
            &skirmish_evaluator(),
            &mut seeded_rng(42),
        )
        .unwrap()
        .expect("the opening position offers moves");
        assert_eq!(
            before, game,
            "selection must hand the position back untouched at depth {}",
            depth
        );
    }
}

#[test]
fn test_ended_position_scores_without_generating_moves() {
    let mut game = skirmish_position! {
        . . . . .
        . . . . .
        . . F . .
        . . . . .
        . . C . .
    };
    game.set_turn(Side::Dark);
    let evaluator = skirmish_evaluator();
    let expected = evaluator.evaluate(&game);

    let mut context = SearchContext::new(4);
    let score = search(
        &mut context,
        &mut game,
        &evaluator,
        4,
        i16::MIN,
        i16::MAX,
        false,
    );

    assert_eq!(expected, score, "an ended game scores as it stands");
    assert_eq!(1, context.searched_position_count());
    assert_eq!(
        0,
        context.move_gen_calls(),
        "no move generation may happen at a terminal"
    );
}

#[test]
fn test_depth_zero_node_scores_without_generating_moves() {
    let mut game = SkirmishGame::new();
    let evaluator = skirmish_evaluator();
    let mut context = SearchContext::new(1);
    let score = search(
        &mut context,
        &mut game,
        &evaluator,
        0,
        i16::MIN,
        i16::MAX,
        true,
    );
    assert_eq!(evaluator.evaluate(&game), score);
    assert_eq!(0, context.move_gen_calls());
}

#[test]
fn test_seeded_selection_is_deterministic() {
    let pick = |seed: u64| {
        let mut game = SkirmishGame::new();
        let mut context = SearchContext::new(3);
        select_best_move(
            &mut context,
            &mut game,
            &skirmish_evaluator(),
            &mut seeded_rng(seed),
        )
        .unwrap()
        .expect("the opening position offers moves")
    };
    assert_eq!(pick(42), pick(42), "equal seeds must pick equal moves");
    assert_eq!(pick(7), pick(7));
}

#[test]
fn test_search_does_not_hang_material() {
    // Light's a2 footman can capture on b3; every quiet move instead lets
    // dark capture the footman.
    for depth in 1..=3 {
        let mut game = skirmish_position! {
            . . c . .
            . . . . .
            . f . . .
            F . . . .
            . . C . .
        };
        let mut context = SearchContext::new(depth);
        let best_move = select_best_move(
            &mut context,
            &mut game,
            &skirmish_evaluator(),
            &mut seeded_rng(5),
        )
        .unwrap()
        .unwrap();
        let capture = SkirmishMove::new("a2".parse().unwrap(), "b3".parse().unwrap());
        assert_eq!(
            capture, best_move,
            "depth {} search should take the free footman",
            depth
        );
    }
}

#[test]
fn test_selection_picks_the_decisive_capture() {
    // Taking the captain on c4 ends the game at level material. Every
    // quieter move loses the b3 footman: a4 and b4 are both covered, and
    // after a captain move c4 takes on b3.
    let mut game = skirmish_position! {
        . f . . .
        . . c . .
        . F . . .
        . . . . .
        . . C . .
    };
    let mut context = SearchContext::new(3);
    let best_move = select_best_move(
        &mut context,
        &mut game,
        &skirmish_evaluator(),
        &mut seeded_rng(5),
    )
    .unwrap()
    .unwrap();
    assert_eq!(
        SkirmishMove::new("b3".parse().unwrap(), "c4".parse().unwrap()),
        best_move
    );
}

/// Selects at depth 1 and asserts the pick's one-ply material outcome is the
/// best available among all root moves.
fn assert_depth_one_pick_is_greedy(game: &mut SkirmishGame, seed: u64) {
    let evaluator = skirmish_evaluator();
    let mut context = SearchContext::new(1);
    let chosen = select_best_move(&mut context, game, &evaluator, &mut seeded_rng(seed))
        .unwrap()
        .unwrap();
    let candidates = game.legal_moves();
    let mut best_outcome = i16::MIN;
    let mut chosen_outcome = None;
    for candidate in candidates.iter() {
        game.apply_move(candidate).unwrap();
        let outcome = evaluator.evaluate(game);
        game.undo_move().unwrap();
        best_outcome = max(best_outcome, outcome);
        if *candidate == chosen {
            chosen_outcome = Some(outcome);
        }
    }
    assert_eq!(
        Some(best_outcome),
        chosen_outcome,
        "seed {} picked {} worth {:?}, best on offer was {}",
        seed,
        chosen,
        chosen_outcome,
        best_outcome
    );
}

#[test]
fn test_depth_one_selection_maximizes_immediate_material() {
    // From the initial layout every move stands pat, so any pick qualifies.
    for seed in 0..4 {
        assert_depth_one_pick_is_greedy(&mut SkirmishGame::new(), seed);
    }

    // Here c3 can take on b4 or d4 while everything else leaves material
    // where it is, so the pick must be one of the tied captures, whichever
    // the shuffle visits first.
    let mut game = skirmish_position! {
        . . c . .
        . f . f .
        . . F . .
        . . . . .
        . . C . .
    };
    for seed in 0..8 {
        assert_depth_one_pick_is_greedy(&mut game, seed);
    }
}

#[test]
fn test_context_tracks_the_last_selection() {
    let mut game = SkirmishGame::new();
    let mut context = SearchContext::new(2);
    select_best_move(
        &mut context,
        &mut game,
        &skirmish_evaluator(),
        &mut seeded_rng(9),
    )
    .unwrap()
    .unwrap();

    assert!(context.searched_position_count() > 0);
    assert!(context.move_gen_calls() > 0);
    assert_eq!(
        Some(0),
        context.last_score(),
        "every opening line holds the material balance at depth 2"
    );
    assert!(context.last_search_duration().is_some());

    context.reset_stats();
    assert_eq!(0, context.searched_position_count());
    assert_eq!(0, context.cutoff_count());
    assert_eq!(0, context.move_gen_calls());
}

#[test]
fn test_update_best_comparison_is_strict() {
    let mut best_score = 10;
    let mut best_move = Some(1u8);
    assert!(
        !update_best(10, &2u8, true, &mut best_score, &mut best_move),
        "a tie must keep the incumbent"
    );
    assert_eq!(Some(1), best_move);
    assert!(update_best(11, &2u8, true, &mut best_score, &mut best_move));
    assert_eq!(Some(2), best_move);
    assert_eq!(11, best_score);

    let mut best_score = -10;
    let mut best_move = Some(1u8);
    assert!(!update_best(-10, &2u8, false, &mut best_score, &mut best_move));
    assert!(update_best(-11, &2u8, false, &mut best_score, &mut best_move));
    assert_eq!(Some(2), best_move);
    assert_eq!(-11, best_score);
}

#[test]
fn test_single_candidate_is_selected_outright() {
    let mut game = PileGame::new(1);
    let mut context = SearchContext::new(5);
    let best_move = select_best_move(&mut context, &mut game, &PileEvaluator, &mut seeded_rng(1))
        .unwrap()
        .unwrap();
    assert_eq!(1, best_move.take, "the only move must be chosen");
}
