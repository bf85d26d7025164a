#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use proptest::prelude::*;

    use crate::board::{Board, BoardError, Cell, Player};
    use crate::evaluator::{evaluate, histograms, Histogram};
    use crate::match_runner::{MatchConfig, MatchRunner};
    use crate::{alphabeta, expectimax, minimax, successors, ArrayBoard, GameState, Strategy};

    fn single_row() -> Result<ArrayBoard> {
        Ok(ArrayBoard::new(1, 4)?)
    }

    // plays 0-indexed columns in order, skipping full columns and stopping once the game ends
    fn board_from(columns: &[usize]) -> ArrayBoard {
        let mut board = ArrayBoard::default();
        for &column in columns {
            if board.terminal() {
                break;
            }
            if board.placeable(column) {
                let player = board.to_move();
                board.place(player, column);
            }
        }
        board
    }

    #[test]
    pub fn empty_board_histograms() -> Result<()> {
        let board = ArrayBoard::default();
        let (mine, theirs) = histograms(Player::One, &board);

        // 24 horizontal, 21 vertical and 12 of each diagonal
        assert_eq!(mine, Histogram([69, 0, 0, 0, 0]));
        assert_eq!(theirs, Histogram([69, 0, 0, 0, 0]));
        assert_eq!(evaluate(Player::One, &board), 0);
        Ok(())
    }

    #[test]
    pub fn corner_mark() -> Result<()> {
        let board = ArrayBoard::from_moves("1")?;
        let (mine, theirs) = histograms(Player::One, &board);

        assert_eq!(mine, Histogram([66, 3, 0, 0, 0]));
        assert_eq!(theirs, Histogram([66, 0, 0, 0, 0]));
        assert_eq!(evaluate(Player::One, &board), 3);
        assert_eq!(evaluate(Player::Two, &board), -3);
        Ok(())
    }

    #[test]
    pub fn mixed_segments_score_nothing() -> Result<()> {
        let board = ArrayBoard::from_moves_with_size(1, 4, "12")?;
        assert_eq!(histograms(Player::One, &board), (Histogram::default(), Histogram::default()));
        assert_eq!(evaluate(Player::One, &board), 0);
        Ok(())
    }

    #[test]
    pub fn completed_line() -> Result<()> {
        let board = ArrayBoard::from_moves("1122334")?;
        assert!(board.terminal());
        assert_eq!(board.state, GameState::PlayerOneWin);

        let (mine, _) = histograms(Player::One, &board);
        assert_eq!(mine.0[4], 1);
        assert!(evaluate(Player::One, &board) > 900);
        Ok(())
    }

    #[test]
    pub fn diagonal_segments() -> Result<()> {
        // player one holds the rising diagonal from the bottom left corner
        let board = ArrayBoard::from_moves("12234334744")?;
        assert_eq!(board.state, GameState::PlayerOneWin);
        assert_eq!(board.cell(3, 3), Cell::PlayerOne);

        let (mine, theirs) = histograms(Player::One, &board);
        assert_eq!(mine.0[4], 1);
        assert_eq!(theirs.0[4], 0);
        Ok(())
    }

    #[test]
    pub fn successor_order() -> Result<()> {
        let board = ArrayBoard::from_moves_with_size(2, 3, "11")?;
        let children = successors(Player::One, &board);

        let columns: Vec<usize> = children.iter().map(|(column, _)| *column).collect();
        assert_eq!(columns, vec![1, 2]);
        for (column, child) in children.iter() {
            assert_eq!(child.col(*column)[0], Cell::PlayerOne);
        }
        // the children are independent copies
        assert_eq!(board.row(0), vec![Cell::PlayerOne, Cell::Empty, Cell::Empty]);
        assert_eq!(board.num_moves(), 2);
        Ok(())
    }

    #[test]
    pub fn board_errors() -> Result<()> {
        assert_eq!(
            ArrayBoard::from_moves("8").unwrap_err(),
            BoardError::ColumnOutOfRange { column: 8, cols: 7 }
        );
        assert_eq!(ArrayBoard::from_moves("1111111").unwrap_err(), BoardError::ColumnFull(1));
        assert_eq!(ArrayBoard::from_moves("1x").unwrap_err(), BoardError::Unparsable('x'));
        assert_eq!(ArrayBoard::from_moves("11223344").unwrap_err(), BoardError::GameOver);
        assert_eq!(
            ArrayBoard::new(0, 4).unwrap_err(),
            BoardError::InvalidDimensions { rows: 0, cols: 4 }
        );
        Ok(())
    }

    #[test]
    pub fn single_row_depth_one() -> Result<()> {
        let board = single_row()?;
        for &strategy in Strategy::ALL.iter() {
            let outcome = strategy.search(Player::One, &board, 1);
            assert_eq!(outcome.column, Some(0), "{}", strategy);
            assert_eq!(outcome.value, 1.0, "{}", strategy);
        }
        assert_eq!(minimax(Player::One, &board, 1), Some(0));
        assert_eq!(alphabeta(Player::One, &board, 1), Some(0));
        assert_eq!(expectimax(Player::One, &board, 1), Some(0));
        Ok(())
    }

    #[test]
    pub fn single_row_depth_two_pruning() -> Result<()> {
        let board = single_row()?;
        let full = Strategy::Minimax.search(Player::One, &board, 2);
        let pruned = Strategy::AlphaBeta.search(Player::One, &board, 2);

        assert_eq!(full.column, Some(0));
        assert_eq!(pruned.column, Some(0));
        assert_eq!(full.value, pruned.value);
        assert_eq!(full.evaluations, 12);
        assert_eq!(pruned.evaluations, 6);
        assert!(pruned.node_count < full.node_count);

        assert_eq!(expectimax(Player::One, &board, 2), Some(0));
        Ok(())
    }

    #[test]
    pub fn single_legal_column() -> Result<()> {
        let board = ArrayBoard::from_moves_with_size(1, 4, "123")?;
        assert!(!board.terminal());
        for &strategy in Strategy::ALL.iter() {
            for depth in 1..=3 {
                assert_eq!(strategy.choose_move(Player::Two, &board, depth), Some(3));
            }
        }
        Ok(())
    }

    #[test]
    pub fn terminal_root() -> Result<()> {
        let won = ArrayBoard::from_moves("1122334")?;
        let drawn = ArrayBoard::from_moves_with_size(1, 4, "1234")?;
        assert_eq!(drawn.state, GameState::Draw);

        for &strategy in Strategy::ALL.iter() {
            for depth in 0..5 {
                assert_eq!(strategy.choose_move(Player::Two, &won, depth), None);
                assert_eq!(strategy.choose_move(Player::One, &drawn, depth), None);
            }
        }
        Ok(())
    }

    #[test]
    pub fn zero_depth() -> Result<()> {
        let board = ArrayBoard::from_moves("4453")?;
        for &strategy in Strategy::ALL.iter() {
            let outcome = strategy.search(Player::One, &board, 0);
            assert_eq!(outcome.column, None);
            assert_eq!(outcome.node_count, 1);
            assert_eq!(outcome.evaluations, 1);
            assert_eq!(outcome.value, evaluate(Player::One, &board) as f64);
        }
        Ok(())
    }

    #[test]
    pub fn takes_winning_move() -> Result<()> {
        // player one has three in the bottom row, player two three in the row above
        let board = ArrayBoard::from_moves("112233")?;
        for depth in 1..=3 {
            assert_eq!(minimax(Player::One, &board, depth), Some(3));
            assert_eq!(alphabeta(Player::One, &board, depth), Some(3));
        }
        // deeper, a random opponent rarely blocks and a longer line is worth more
        for depth in 1..=2 {
            assert_eq!(expectimax(Player::One, &board, depth), Some(3));
        }
        Ok(())
    }

    #[test]
    pub fn blocks_opponent_win() -> Result<()> {
        // player two threatens the bottom row, player one must block at column 4
        let board = ArrayBoard::from_moves("717263")?;
        assert_eq!(minimax(Player::One, &board, 2), Some(3));
        assert_eq!(alphabeta(Player::One, &board, 2), Some(3));
        Ok(())
    }

    #[test]
    pub fn expectimax_averages_replies() -> Result<()> {
        let board = ArrayBoard::from_moves("4435")?;
        let root = board.to_move();

        let mut expected = f64::NEG_INFINITY;
        for (_, child) in successors(root, &board) {
            let replies = successors(root.opponent(), &child);
            let mut total = 0.0;
            for (_, grandchild) in replies.iter() {
                total += evaluate(root, grandchild) as f64;
            }
            expected = expected.max(total / replies.len() as f64);
        }

        let outcome = Strategy::Expectimax.search(root, &board, 2);
        assert_eq!(outcome.value, expected);
        Ok(())
    }

    #[test]
    pub fn alphabeta_prunes_deeper_searches() -> Result<()> {
        let board = ArrayBoard::default();
        for depth in 1..=4 {
            let full = Strategy::Minimax.search(Player::One, &board, depth);
            let pruned = Strategy::AlphaBeta.search(Player::One, &board, depth);
            assert_eq!(full.column, pruned.column);
            assert_eq!(full.value, pruned.value);
            assert!(pruned.node_count <= full.node_count);
            if depth >= 3 {
                assert!(pruned.node_count < full.node_count);
                assert!(pruned.evaluations < full.evaluations);
            }
        }
        Ok(())
    }

    #[test]
    pub fn repeated_searches_agree() -> Result<()> {
        let board = ArrayBoard::from_moves("44343")?;
        for &strategy in Strategy::ALL.iter() {
            let first = strategy.search(board.to_move(), &board, 3);
            let second = strategy.search(board.to_move(), &board, 3);
            assert_eq!(first, second);
            assert_eq!(first.value.to_bits(), second.value.to_bits());
        }
        Ok(())
    }

    #[test]
    pub fn strategy_names() -> Result<()> {
        for &strategy in Strategy::ALL.iter() {
            assert_eq!(strategy.to_string().parse::<Strategy>()?, strategy);
        }
        assert_eq!("Alpha-Beta".parse::<Strategy>()?, Strategy::AlphaBeta);
        assert!("mcts".parse::<Strategy>().is_err());
        Ok(())
    }

    #[test]
    pub fn match_openings() -> Result<()> {
        let runner = MatchRunner::new(MatchConfig {
            rows: 4,
            cols: 5,
            ..MatchConfig::default()
        })?;
        assert_eq!(runner.opening(0)?.game, "11");
        assert_eq!(runner.opening(1)?.game, "12");
        assert_eq!(runner.opening(7)?.game, "23");
        // wraps around after every opening was used
        assert_eq!(runner.opening(25)?.game, "11");

        assert!(MatchRunner::new(MatchConfig {
            depth: 0,
            ..MatchConfig::default()
        })
        .is_err());
        Ok(())
    }

    #[test]
    pub fn equivalent_strategies_split_a_match() -> Result<()> {
        let runner = MatchRunner::new(MatchConfig {
            num_games: 6,
            depth: 2,
            rows: 4,
            cols: 5,
            progress: false,
            ..MatchConfig::default()
        })?;

        // alpha-beta plays exactly like minimax, so colours decide every game
        let result = runner.run_match(Strategy::Minimax, Strategy::AlphaBeta)?;
        assert_eq!(result.games(), 6);
        assert_eq!(result.wins, result.losses);

        let record = runner.play_game(Strategy::Expectimax, Strategy::Minimax, 3)?;
        assert!(record.moves.starts_with("14"));
        assert!(record.resigned.is_none());
        Ok(())
    }

    // a single row board that never reports the game as over, even once full
    #[derive(Clone, Debug)]
    struct EndlessRow {
        cells: Vec<Cell>,
    }

    impl Board for EndlessRow {
        fn rows(&self) -> usize {
            1
        }

        fn cols(&self) -> usize {
            self.cells.len()
        }

        fn placeable(&self, column: usize) -> bool {
            self.cells[column] == Cell::Empty
        }

        fn place(&mut self, player: Player, column: usize) {
            self.cells[column] = player.cell();
        }

        fn terminal(&self) -> bool {
            false
        }

        fn row(&self, _index: usize) -> Vec<Cell> {
            self.cells.clone()
        }

        fn col(&self, index: usize) -> Vec<Cell> {
            vec![self.cells[index]]
        }
    }

    #[test]
    pub fn opponent_without_moves() -> Result<()> {
        let board = EndlessRow {
            cells: vec![Cell::PlayerOne, Cell::PlayerOne, Cell::PlayerOne, Cell::Empty],
        };
        let mut full = board.clone();
        full.place(Player::One, 3);
        let expected = evaluate(Player::One, &full) as f64;
        assert_eq!(expected, 1000.0);

        for &strategy in Strategy::ALL.iter() {
            for depth in 1..=3 {
                let outcome = strategy.search(Player::One, &board, depth);
                assert_eq!(outcome.column, Some(3), "{} at depth {}", strategy, depth);
                assert!(outcome.value.is_finite(), "{} at depth {}", strategy, depth);
                assert_eq!(outcome.value, expected, "{} at depth {}", strategy, depth);
                assert_eq!(outcome.evaluations, 1, "{} at depth {}", strategy, depth);
            }
        }

        // no column is open for the root player either
        for &strategy in Strategy::ALL.iter() {
            let outcome = strategy.search(Player::Two, &full, 2);
            assert_eq!(outcome.column, None);
            assert_eq!(outcome.value, evaluate(Player::Two, &full) as f64);
        }
        Ok(())
    }

    #[test]
    pub fn cell_ownership() -> Result<()> {
        assert!(Cell::PlayerOne.is(Player::One));
        assert!(!Cell::PlayerOne.is(Player::Two));
        assert!(Cell::PlayerTwo.is(Player::Two));
        assert!(!Cell::Empty.is(Player::One));
        assert!(!Cell::Empty.is(Player::Two));
        Ok(())
    }

    #[test]
    pub fn large_histogram_scores() -> Result<()> {
        // beyond the range of an i32 once weighted
        let lines = Histogram([0, 0, 0, 0, 3_000_000]);
        assert_eq!(lines.score(), 3_000_000_000);

        let all = Histogram([u32::MAX; 5]);
        assert_eq!(all.score(), i64::from(u32::MAX) * (1 + 4 + 16 + 1000));
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn evaluation_is_antisymmetric(columns in prop::collection::vec(0usize..7, 0..30)) {
            let board = board_from(&columns);
            prop_assert_eq!(evaluate(Player::One, &board), -evaluate(Player::Two, &board));
        }

        #[test]
        fn pruning_preserves_choice(columns in prop::collection::vec(0usize..7, 0..20), depth in 1usize..4) {
            let board = board_from(&columns);
            let player = board.to_move();
            let full = Strategy::Minimax.search(player, &board, depth);
            let pruned = Strategy::AlphaBeta.search(player, &board, depth);

            prop_assert_eq!(full.column, pruned.column);
            prop_assert_eq!(full.value, pruned.value);
            prop_assert!(pruned.node_count <= full.node_count);
        }

        #[test]
        fn first_best_column_is_chosen(columns in prop::collection::vec(0usize..7, 0..20)) {
            let board = board_from(&columns);
            prop_assume!(!board.terminal());
            let player = board.to_move();

            let mut best = None;
            for (column, child) in successors(player, &board) {
                let value = evaluate(player, &child);
                match best {
                    Some((_, best_value)) if best_value >= value => {}
                    _ => best = Some((column, value)),
                }
            }
            for &strategy in Strategy::ALL.iter() {
                prop_assert_eq!(strategy.choose_move(player, &board, 1), best.map(|(column, _)| column));
            }
        }

        #[test]
        fn search_leaves_board_untouched(columns in prop::collection::vec(0usize..7, 0..20)) {
            let board = board_from(&columns);
            let before: Vec<Vec<Cell>> = (0..board.rows()).map(|r| board.row(r)).collect();
            for &strategy in Strategy::ALL.iter() {
                strategy.search(board.to_move(), &board, 2);
            }
            let after: Vec<Vec<Cell>> = (0..board.rows()).map(|r| board.row(r)).collect();
            prop_assert_eq!(before, after);
        }
    }
}
