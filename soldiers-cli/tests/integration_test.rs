//! Integration tests for the Sixteen Soldiers engine
//!
//! Tests the full stack: topology, move generation, game flow and the AI

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use soldiers_core::{
    board::is_straight_jump,
    eval::evaluate,
    game::winner_on,
    movegen::{capture_jumps, has_capture, legal_moves},
    Board, Decision, EngineError, GameResult, GameState, Heuristics, MinimaxAI, Move, Side, NODE_COUNT,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Play random moves hop by hop, sometimes stopping capture sequences early,
/// and hand every visited state to `check`
fn random_walk(seed: u64, max_steps: usize, mut check: impl FnMut(&GameState, &GameState)) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let first = if seed % 2 == 0 { Side::White } else { Side::Black };
    let mut state = GameState::new(first);

    for _ in 0..max_steps {
        if state.result() != GameResult::Ongoing {
            break;
        }
        let next = if state.is_continuing() && rand::Rng::gen_bool(&mut rng, 0.3) {
            state.end_turn().unwrap()
        } else {
            let moves = state.legal_moves();
            let mv = *moves.choose(&mut rng).unwrap();
            state.apply_move(mv).unwrap()
        };
        check(&state, &next);
        state = next;
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_opening_position() {
    let game = GameState::new(Side::White);
    let board = game.board();

    for node in 21..NODE_COUNT {
        assert_eq!(board.get(node), Some(Side::White));
    }
    for node in 0..16 {
        assert_eq!(board.get(node), Some(Side::Black));
    }
    for node in 16..21 {
        assert!(board.is_empty_at(node));
    }
    assert_eq!(game.side_to_move(), Side::White);
    assert!(game.legal_moves().iter().all(|m| !m.is_capture()));
}

#[test]
fn test_single_straight_capture() {
    let board = Board::with_pieces(&[(26, Side::White), (21, Side::Black)]);
    assert!(is_straight_jump(26, 21, 16));
    let jumps = capture_jumps(&board, 26, Side::White, None);
    assert_eq!(jumps.len(), 1);
    assert_eq!((jumps[0].landing, jumps[0].captured), (16, 21));
}

#[test]
fn test_bent_capture_is_not_offered() {
    let board = Board::with_pieces(&[(12, Side::White), (8, Side::Black)]);
    assert!(!is_straight_jump(12, 8, 4));
    let jumps = capture_jumps(&board, 12, Side::White, None);
    assert!(jumps.iter().all(|j| j.landing != 4));
    // 8's straight continuation is 5
    assert_eq!(jumps.iter().map(|j| j.landing).collect::<Vec<_>>(), vec![5]);
}

#[test]
fn test_blocked_lone_piece_loses() {
    let board: Board = format!("WBBB....B{}", ".".repeat(28)).parse().unwrap();
    let game = GameState::from_board(board, Side::White);
    assert_eq!(game.winner(), Some(Side::Black));
    assert_eq!(game.result(), GameResult::BlackWins);
    assert!(MinimaxAI::default().suggest_move(&game).is_none());
}

#[test]
fn test_no_pieces_loses_on_either_turn() {
    let board = Board::with_pieces(&[(4, Side::Black), (5, Side::Black)]);
    assert_eq!(winner_on(&board, Side::White), Some(Side::Black));
    assert_eq!(winner_on(&board, Side::Black), Some(Side::Black));
}

#[test]
fn test_illegal_request_is_harmless() {
    let game = GameState::new(Side::Black);
    let before = game;
    let result = game.apply_move(Move::Step { from: 12, to: 17 });
    assert!(matches!(result, Err(EngineError::IllegalMove(_))));
    assert_eq!(game, before);
    assert!(game.apply_move(Move::Step { from: 22, to: 17 }).is_ok());
}

// ============================================================================
// PROPERTIES OVER RANDOM PLAY
// ============================================================================

#[test]
fn test_piece_counts_never_increase() {
    for seed in 0..20 {
        random_walk(seed, 300, |before, after| {
            for side in [Side::White, Side::Black] {
                assert!(after.board().count(side) <= before.board().count(side));
            }
            let occupied = (0..NODE_COUNT).filter(|&n| after.board().get(n).is_some()).count();
            assert_eq!(
                occupied,
                after.board().count(Side::White) + after.board().count(Side::Black)
            );
        });
    }
}

#[test]
fn test_capture_priority_holds() {
    for seed in 0..20 {
        random_walk(seed, 300, |state, _| {
            if state.is_continuing() {
                return;
            }
            let side = state.side_to_move();
            let moves = legal_moves(state.board(), side);
            if has_capture(state.board(), side) {
                assert!(moves.iter().all(Move::is_capture));
            } else {
                assert!(moves.iter().all(|m| !m.is_capture()));
            }
        });
    }
}

#[test]
fn test_chain_prefixes_are_legal() {
    for seed in 0..20 {
        random_walk(seed, 300, |state, _| {
            let moves = state.legal_moves();
            for mv in moves.iter().filter(|m| m.captured().len() > 1) {
                let prefix = moves.iter().find(|p| {
                    p.from() == mv.from()
                        && p.to() == mv.last_from()
                        && p.captured().len() + 1 == mv.captured().len()
                        && p.captured().is_subset(&mv.captured())
                });
                assert!(prefix.is_some(), "no prefix for {}", mv);
            }
        });
    }
}

#[test]
fn test_continuation_never_returns_to_vacated_point() {
    let mut continuations = 0;
    for seed in 0..40 {
        random_walk(seed, 300, |_, after| {
            if let Some(c) = after.continuation() {
                continuations += 1;
                let options = after.continuation_options();
                assert!(!options.is_empty());
                assert!(options.iter().all(|m| m.to() != c.vacated));
                assert!(options.iter().all(|m| m.from() == c.piece));
            }
        });
    }
    assert!(continuations > 0, "random play never produced a multi-capture");
}

#[test]
fn test_evaluation_symmetry() {
    let heuristics = Heuristics::default();
    for seed in 0..10 {
        random_walk(seed, 120, |state, _| {
            let board = state.board();
            let score = evaluate(board, Side::White, &heuristics);
            assert_eq!(evaluate(&board.mirrored(), Side::White, &heuristics), -score);
            assert_eq!(evaluate(&board.mirrored(), Side::Black, &heuristics), score);
        });
    }
}

// ============================================================================
// ALPHA-BETA AI TESTS
// ============================================================================

#[test]
fn test_ai_suggestions_are_legal() {
    let ai = MinimaxAI::new(2, Heuristics::default());
    let mut state = GameState::new(Side::White);
    for _ in 0..30 {
        if state.result() != GameResult::Ongoing {
            break;
        }
        let mv = ai.suggest_move(&state).expect("ongoing game has a move");
        assert!(state.legal_moves().contains(&mv));
        state = state.play(mv).unwrap();
    }
}

#[test]
fn test_ai_self_play_respects_limit() {
    let ai = MinimaxAI::default();
    let (final_state, history) = ai.play_game(GameState::new(Side::Black), 40);
    assert_eq!(history.len() as u32, final_state.ply());
    assert!(final_state.ply() <= 40);
    assert!(final_state.ply() == 40 || final_state.result() != GameResult::Ongoing);
}

/// Play the AI's turn hop by hop through the engine interface and check that
/// the turn ends where the AI's first choice said it would
fn ai_turn_matches_first_choice(ai: &MinimaxAI, state: &GameState) {
    let side = state.side_to_move();
    let Some(Decision::Play(chosen)) = ai.decide(state) else {
        return;
    };

    let mut current = state.apply_move(chosen).unwrap();
    if current.side_to_move() == side {
        assert!(current.is_continuing());
        assert_eq!(ai.decide(&current), Some(Decision::EndTurn), "{} was meant to end the turn", chosen);
        current = Decision::EndTurn.apply(&current).unwrap();
    }

    assert_eq!(current.side_to_move(), side.opponent());
    assert_eq!(current.board(), state.play(chosen).unwrap().board());
}

#[test]
fn test_ai_shortened_chain_ends_turn() {
    let board = Board::with_pieces(&[
        (12, Side::White),
        (15, Side::White),
        (36, Side::White),
        (0, Side::Black),
        (4, Side::Black),
        (8, Side::Black),
        (16, Side::Black),
    ]);
    let game = GameState::from_board(board, Side::White);
    let ai = MinimaxAI::default();

    let chosen = ai.suggest_move(&game).unwrap();
    assert!(game.legal_moves().iter().any(|m| m.captured().len() > chosen.captured().len()));
    ai_turn_matches_first_choice(&ai, &game);
}

#[test]
fn test_ai_turns_through_apply_move() {
    let ai = MinimaxAI::new(2, Heuristics::default());
    for seed in 0..10 {
        random_walk(seed, 80, |state, _| {
            if !state.is_continuing() && has_capture(state.board(), state.side_to_move()) {
                ai_turn_matches_first_choice(&ai, state);
            }
        });
    }
}
