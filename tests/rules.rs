use agatha_checkers::board::{Board, Move};
use agatha_checkers::move_generator::MoveGenerator;
use agatha_checkers::types::{notation_to_position, Piece, Player, Position, Rank};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn board_from(pieces: &[(&str, Player, Rank)]) -> Board {
    let mut board = Board::empty();
    for &(square, player, rank) in pieces {
        let pos: Position = square.parse().unwrap();
        board.set_piece(pos, Piece { player, rank, position: pos }).unwrap();
    }
    board
}

fn check_move_shape(mv: &Move) {
    let dr = (mv.to.row - mv.from.row).abs();
    let dc = (mv.to.col - mv.from.col).abs();
    if mv.captures.is_empty() {
        assert_eq!((dr, dc), (1, 1), "step {mv} is not a single diagonal");
    } else {
        for (i, pos) in mv.captures.iter().enumerate() {
            assert!(!mv.captures[i + 1..].contains(pos), "{mv} captures {pos} twice");
        }
    }
}

#[test]
fn random_playouts_keep_the_board_consistent() {
    let gen = MoveGenerator::new();

    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        let mut side = Player::Human;

        for _ in 0..150 {
            let moves = gen.all_valid_moves(&board, side);
            if moves.is_empty() {
                assert!(!gen.has_valid_moves(&board, side));
                break;
            }
            assert!(gen.has_valid_moves(&board, side));

            if gen.has_captures(&board, side) {
                assert!(moves.iter().all(Move::is_capture), "capture was optional");
            } else {
                assert!(moves.iter().all(|m| !m.is_capture()));
            }
            moves.iter().for_each(check_move_shape);

            let mv = moves.choose(&mut rng).unwrap().clone();
            let opponents_before = board.count_pieces(side.opponent());
            let snapshot = board.clone();

            let next = gen.simulate_move(&board, &mv).unwrap();
            assert_eq!(board, snapshot, "simulate_move mutated its input");

            gen.execute_move(&mut board, &mv).unwrap();
            assert_eq!(board, next);
            assert!(board.validate().is_ok());
            assert_eq!(
                board.count_pieces(side.opponent()),
                opponents_before - mv.captures.len()
            );
            if mv.is_promotion {
                assert!(board.piece_at(mv.to).unwrap().is_king());
            }

            side = side.opponent();
        }
    }
}

#[test]
fn per_piece_moves_agree_with_side_moves() {
    let gen = MoveGenerator::new();
    let board = board_from(&[
        ("c3", Player::Human, Rank::Man),
        ("d4", Player::Agatha, Rank::Man),
        ("g3", Player::Human, Rank::Man),
        ("f6", Player::Agatha, Rank::King),
    ]);

    let mut per_piece: Vec<Move> = board
        .pieces(Player::Human)
        .flat_map(|p| gen.valid_moves_for_piece(&board, p.position))
        .collect();
    let mut all = gen.all_valid_moves(&board, Player::Human);
    per_piece.sort_by_key(|m| (m.from, m.to));
    all.sort_by_key(|m| (m.from, m.to));
    assert_eq!(per_piece, all);
    assert!(all.iter().all(|m| m.from == notation_to_position("c3").unwrap()));
}

#[test]
fn notation_driven_triple_jump() {
    let gen = MoveGenerator::new();
    let board = board_from(&[
        ("a1", Player::Human, Rank::Man),
        ("b2", Player::Agatha, Rank::Man),
        ("d4", Player::Agatha, Rank::Man),
        ("f6", Player::Agatha, Rank::Man),
    ]);

    let moves = gen.all_valid_moves(&board, Player::Human);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to, notation_to_position("g7").unwrap());
    assert_eq!(moves[0].to, Position::new(1, 6));
    assert_eq!(moves[0].captures.len(), 3);

    let after = gen.simulate_move(&board, &moves[0]).unwrap();
    assert_eq!(after.count_pieces(Player::Agatha), 0);
    let jumper = after.piece_at(moves[0].to).unwrap();
    assert_eq!((jumper.player, jumper.rank), (Player::Human, Rank::Man));
}

#[test]
fn off_board_requests_are_quiet_or_explicit() {
    let gen = MoveGenerator::new();
    let board = Board::new();
    assert!(gen.valid_moves_for_piece(&board, Position::new(9, 9)).is_empty());
    assert!(board.piece_at(Position::new(-1, 2)).is_none());
    assert!(board.square(Position::new(-1, 2)).is_err());
}
