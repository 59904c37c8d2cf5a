#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::{
        agent::{Agent, HeuristicAgent, RandomAgent},
        arena::Arena,
        board::{Board, Cell, GameState, Player},
        config::AgentConfig,
        evaluator::{center_bonus, evaluate, evaluate_window, Score},
        search::Search,
        AgentError,
    };

    // plain minimax without pruning, the reference for the pruned search
    fn brute_force(
        board: &Board,
        depth: u32,
        maximizing: bool,
        agent: Player,
        nodes: &mut usize,
    ) -> Result<Score> {
        *nodes += 1;
        if depth == 0 || board.is_terminal() {
            return Ok(evaluate(board, agent));
        }
        let side = if maximizing { agent } else { agent.opponent() };
        let mut scores = Vec::new();
        for column in board.legal_moves() {
            let next = board.with_move(side, column)?;
            scores.push(brute_force(&next, depth - 1, !maximizing, agent, nodes)?);
        }
        let best = if maximizing {
            scores.into_iter().max()
        } else {
            scores.into_iter().min()
        };
        Ok(best.unwrap_or_else(|| evaluate(board, agent)))
    }

    fn shallow_config() -> AgentConfig {
        AgentConfig {
            opening_depth: 1,
            standard_depth: 2,
            opening_plies: 2,
        }
    }

    fn sample_boards() -> Result<Vec<Board>> {
        Ok(vec![
            Board::new(),
            Board::from_moves("4")?,
            Board::from_moves("4453")?,
            Board::from_moves("334455")?,
            Board::from_rows(&[
                ".......",
                ".......",
                ".......",
                "...O...",
                "..XX...",
                "..XOO..",
            ])?,
            Board::from_rows(&[
                ".......",
                ".......",
                "..O....",
                "..XO...",
                ".OXXO..",
                "XOXXOX.",
            ])?,
        ])
    }

    #[test]
    pub fn window_table() {
        assert_eq!(evaluate_window(4, 0, 0), 50000);
        assert_eq!(evaluate_window(0, 4, 0), -80000);
        assert_eq!(evaluate_window(3, 0, 1), 5000);
        assert_eq!(evaluate_window(0, 3, 1), -8000);
        assert_eq!(evaluate_window(2, 0, 2), 500);
        assert_eq!(evaluate_window(0, 2, 2), -800);
        assert_eq!(evaluate_window(1, 0, 3), 0);
        assert_eq!(evaluate_window(0, 1, 3), 0);
        assert_eq!(evaluate_window(0, 0, 4), 0);

        // windows holding both sides never score
        for agent in 1..=3 {
            for opponent in 1..=(4 - agent) {
                assert_eq!(
                    evaluate_window(agent, opponent, 4 - agent - opponent),
                    0,
                    "{} agent / {} opponent",
                    agent,
                    opponent
                );
            }
        }
    }

    #[test]
    pub fn evaluation_values() -> Result<()> {
        let cases: [(&str, Score); 7] = [
            (".......", 0),
            ("...X...", 9),
            ("..XX...", 1515),
            ("..OO...", -2415),
            ("XXXX...", 55518),
            ("OOOO...", -88818),
            ("XO.....", -3),
        ];
        for &(bottom, expected) in cases.iter() {
            let mut rows = vec!["......."; 5];
            rows.push(bottom);
            let board = Board::from_rows(&rows)?;
            assert_eq!(evaluate(&board, Player::One), expected, "{}", bottom);
        }

        let board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            "...O...",
            "..XX...",
            "..XOO..",
        ])?;
        assert_eq!(evaluate(&board, Player::One), 1691);
        assert_eq!(evaluate(&board, Player::Two), -3491);
        Ok(())
    }

    #[test]
    pub fn evaluation_is_repeatable() -> Result<()> {
        for board in sample_boards()? {
            let before = board;
            let first = evaluate(&board, Player::One);
            let second = evaluate(&board, Player::One);
            assert_eq!(first, second);
            assert_eq!(board, before);
        }
        Ok(())
    }

    #[test]
    pub fn center_bonus_is_mirror_symmetric() -> Result<()> {
        for board in sample_boards()? {
            let mirrored = board.mirror();
            for &player in [Player::One, Player::Two].iter() {
                assert_eq!(center_bonus(&board, player), center_bonus(&mirrored, player));
                assert_eq!(evaluate(&board, player), evaluate(&mirrored, player));
            }
        }

        let board = Board::from_moves("4")?;
        assert_eq!(center_bonus(&board, Player::One), 9);
        assert_eq!(center_bonus(&board, Player::Two), -9);
        // one token each in the middle column cancels out
        assert_eq!(center_bonus(&Board::from_moves("44")?, Player::One), 0);
        Ok(())
    }

    #[test]
    pub fn search_depth_zero_is_evaluation() -> Result<()> {
        for board in sample_boards()? {
            for &agent in [Player::One, Player::Two].iter() {
                for &maximizing in [true, false].iter() {
                    let mut search = Search::new(agent);
                    assert_eq!(
                        search.search(&board, 0, maximizing),
                        evaluate(&board, agent)
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn pruning_matches_brute_force() -> Result<()> {
        for board in sample_boards()? {
            for depth in 0..=4 {
                for &maximizing in [true, false].iter() {
                    let agent = Player::One;
                    let mut search = Search::new(agent);
                    let pruned = search.search(&board, depth, maximizing);
                    let expected = brute_force(&board, depth, maximizing, agent, &mut 0)?;
                    assert_eq!(pruned, expected, "depth {}\n{}", depth, board);
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn pruning_cuts_off_siblings() -> Result<()> {
        let board = Board::from_moves("4453")?;
        for &(maximizing, pruned_nodes, full_nodes) in
            [(true, 1217, 2717), (false, 1279, 2801)].iter()
        {
            let mut search = Search::new(Player::One);
            let pruned = search.search(&board, 4, maximizing);

            let mut nodes = 0;
            let expected = brute_force(&board, 4, maximizing, Player::One, &mut nodes)?;

            assert_eq!(pruned, expected);
            assert_eq!(nodes, full_nodes);
            assert_eq!(search.node_count, pruned_nodes);
            assert!(search.node_count < nodes);
        }
        Ok(())
    }

    #[test]
    pub fn repeated_searches_agree() -> Result<()> {
        // a search must not carry bounds over from a previous call
        let board = Board::from_moves("334455")?;
        let mut search = Search::new(Player::Two);
        let first = search.search(&board, 4, true);
        let second = search.search(&board, 4, true);
        let fresh = Search::new(Player::Two).search(&board, 4, true);
        assert_eq!(first, second);
        assert_eq!(first, fresh);
        Ok(())
    }

    #[test]
    pub fn root_scores_are_independent_searches() -> Result<()> {
        let board = Board::from_moves("4453")?;
        let agent = HeuristicAgent::with_config(Player::One, shallow_config());
        let analysis = agent.analyse(&board)?;

        assert_eq!(analysis.depth, 2);
        assert_eq!(
            analysis.scores.iter().map(|&(column, _)| column).collect::<Vec<_>>(),
            (0..7).collect::<Vec<usize>>()
        );
        for &(column, score) in analysis.scores.iter() {
            let next = board.with_move(Player::One, column)?;
            assert_eq!(score, Search::new(Player::One).search(&next, 2, false));
        }

        // the first of equally scored moves wins
        let best = analysis.scores.iter().map(|&(_, score)| score).max();
        let first_best = analysis
            .scores
            .iter()
            .find(|&&(_, score)| Some(score) == best)
            .map(|&(column, _)| column);
        assert_eq!(first_best, Some(analysis.best_move));
        Ok(())
    }

    #[test]
    pub fn depth_follows_plies_on_board() -> Result<()> {
        let agent = HeuristicAgent::with_config(Player::One, shallow_config());
        assert_eq!(agent.analyse(&Board::new())?.depth, 1);
        assert_eq!(agent.analyse(&Board::from_moves("1")?)?.depth, 1);
        assert_eq!(agent.analyse(&Board::from_moves("12")?)?.depth, 2);

        // the same agent goes back to the opening depth on a new game
        assert_eq!(agent.analyse(&Board::new())?.depth, 1);
        Ok(())
    }

    #[test]
    pub fn empty_board_plays_center() -> Result<()> {
        let agent = HeuristicAgent::new(Player::One);
        let analysis = agent.analyse(&Board::new())?;
        assert_eq!(analysis.depth, 3);
        assert_eq!(analysis.best_move, 3);
        assert_eq!(agent.choose_move(&Board::new())?, 3);
        Ok(())
    }

    #[test]
    pub fn blocks_open_three() -> Result<()> {
        let board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            ".X.....",
            "XOOO...",
        ])?;
        let agent = HeuristicAgent::new(Player::One);
        let analysis = agent.analyse(&board)?;
        assert_eq!(analysis.depth, 7);
        assert_eq!(analysis.best_move, 4);
        Ok(())
    }

    #[test]
    pub fn completes_four() -> Result<()> {
        let board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            "OO.....",
            "XXX...O",
        ])?;
        let agent = HeuristicAgent::new(Player::One);
        assert_eq!(agent.choose_move(&board)?, 3);

        let won = board.with_move(Player::One, 3)?;
        assert_eq!(won.state(), GameState::PlayerOneWin);
        Ok(())
    }

    #[test]
    pub fn finished_board_has_no_move() -> Result<()> {
        let won = Board::from_moves("1213141")?;
        let drawn = Board::from_rows(&[
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
        ])?;
        assert_eq!(drawn.state(), GameState::Draw);

        for board in [won, drawn].iter() {
            assert_eq!(
                HeuristicAgent::new(Player::Two).choose_move(board),
                Err(AgentError::NoLegalMoves)
            );
            assert_eq!(
                RandomAgent::seeded(7).choose_move(board),
                Err(AgentError::NoLegalMoves)
            );
        }
        Ok(())
    }

    #[test]
    pub fn rejects_foreign_geometry() {
        let agent = HeuristicAgent::for_game(Player::Two, 6, 7, 4).unwrap();
        assert_eq!(agent.player(), Player::Two);
        assert_eq!(*agent.config(), AgentConfig::default());
        for &(rows, columns, connect) in [(7, 6, 4), (6, 7, 5), (8, 9, 4)].iter() {
            assert_eq!(
                HeuristicAgent::for_game(Player::One, rows, columns, connect).err(),
                Some(AgentError::DimensionMismatch {
                    rows,
                    columns,
                    connect
                })
            );
        }
        assert!(matches!(
            Board::from_rows(&["......."; 5]),
            Err(AgentError::DimensionMismatch { rows: 5, .. })
        ));
        assert!(matches!(
            Board::from_rows(&["........"; 6]),
            Err(AgentError::DimensionMismatch { columns: 8, .. })
        ));
    }

    #[test]
    pub fn board_rules() -> Result<()> {
        // horizontal, vertical and both diagonals
        assert_eq!(Board::from_moves("1122334")?.state(), GameState::PlayerOneWin);
        assert_eq!(Board::from_moves("1213141")?.state(), GameState::PlayerOneWin);
        assert_eq!(
            Board::from_moves("12233434474")?.state(),
            GameState::PlayerOneWin
        );
        assert_eq!(
            Board::from_moves("76655454414")?.state(),
            GameState::PlayerOneWin
        );
        assert_eq!(Board::from_moves("71122334")?.state(), GameState::PlayerTwoWin);

        let mut board = Board::from_moves("444444")?;
        assert!(!board.playable(3));
        assert_eq!(board.play(3), Err(AgentError::ColumnFull { column: 3 }));
        assert_eq!(board.play(7), Err(AgentError::ColumnOutOfRange { column: 7 }));
        assert_eq!(board.legal_moves().collect::<Vec<_>>(), vec![0, 1, 2, 4, 5, 6]);

        let mut won = Board::from_moves("1213141")?;
        assert_eq!(won.play(2), Err(AgentError::GameOver));
        assert_eq!(won.legal_moves().count(), 0);

        assert_eq!(
            Board::from_moves("12a"),
            Err(AgentError::InvalidMoveChar { ch: 'a' })
        );
        assert_eq!(
            Board::from_moves("18"),
            Err(AgentError::InvalidMoveChar { ch: '8' })
        );
        Ok(())
    }

    #[test]
    pub fn derived_positions_leave_parent_untouched() -> Result<()> {
        let board = Board::from_moves("44")?;
        let child = board.with_move(Player::One, 3)?;
        assert_eq!(board.ply_count(), 2);
        assert_eq!(child.ply_count(), 3);
        assert_eq!(board.cell(2, 3), Cell::Empty);
        assert_eq!(child.cell(2, 3), Cell::PlayerOne);
        Ok(())
    }

    #[test]
    pub fn diagrams_are_validated() -> Result<()> {
        let mut rows = vec!["......."; 5];
        rows.push("..Z....");
        assert_eq!(Board::from_rows(&rows), Err(AgentError::InvalidCell { ch: 'Z' }));

        let floating = [
            ".......",
            ".......",
            ".......",
            ".......",
            "...X...",
            ".......",
        ];
        assert_eq!(
            Board::from_rows(&floating),
            Err(AgentError::FloatingToken { row: 1, column: 3 })
        );

        let board = Board::from_rows(&[
            ".......",
            ".......",
            "X......",
            "X......",
            "X......",
            "XOOO...",
        ])?;
        assert_eq!(board.state(), GameState::PlayerOneWin);
        assert_eq!(board, Board::from_moves("1213141")?.mirror().mirror());
        Ok(())
    }

    #[test]
    pub fn random_agent_plays_legal_moves() -> Result<()> {
        let agent = RandomAgent::seeded(42);
        let board = Board::from_rows(&[
            "XOXOX.X",
            "OXOXO.O",
            "XOXOX.X",
            "XOXOX.X",
            "OXOXO.O",
            "XOXOXXX",
        ])?;
        assert_eq!(board.state(), GameState::Playing);
        for _ in 0..10 {
            assert_eq!(agent.choose_move(&board)?, 5);
        }

        let board = Board::from_moves("444444")?;
        for _ in 0..50 {
            let column = agent.choose_move(&board)?;
            assert!(board.playable(column));
        }
        Ok(())
    }

    #[test]
    pub fn arena_games_replay() -> Result<()> {
        let heuristic = HeuristicAgent::with_config(Player::One, shallow_config());
        let random = RandomAgent::seeded(3);
        let arena = Arena::new(&heuristic, &random);

        let record = arena.play_game()?;
        assert!(record.board.is_terminal());
        assert_eq!(Board::from_moves(record.move_string())?, record.board);

        let mut finished = 0;
        let mut first_wins = 0;
        let tally = arena.play_series(3, |record| {
            assert!(record.board.is_terminal());
            if record.winner() == Some(Player::One) {
                first_wins += 1;
            }
            finished += 1;
        })?;
        assert_eq!(finished, 3);
        assert_eq!(tally.games(), 3);
        assert_eq!(tally.first_wins, first_wins);
        Ok(())
    }
}
