#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::num::NonZero;

    use itertools::Itertools;
    use ndarray::Array2;
    use proptest::prelude::*;
    use strum::VariantArray;

    use crate::board::{Board, EndpointPair};
    use crate::builder::{BoardBuilder, BuilderInvalidReason};
    use crate::cell::{Flow, Matrix};
    use crate::direction::Direction;
    use crate::feasibility;
    use crate::location::Location;
    use crate::solver;
    use crate::solver::{Branch, Engine, SolveError, Strategy};

    fn dim(n: usize) -> NonZero<usize> {
        NonZero::new(n).unwrap()
    }

    // flow free classic pack level 1
    fn classic_5x5() -> Board {
        BoardBuilder::with_dims((dim(5), dim(5)))
            .add_flow('R', (Location(0, 0), Location(1, 4)))
            .add_flow('G', (Location(2, 0), Location(1, 3)))
            .add_flow('B', (Location(2, 1), Location(2, 4)))
            .add_flow('Y', (Location(4, 0), Location(3, 3)))
            .add_flow('O', (Location(4, 1), Location(3, 4)))
            .build()
            .unwrap()
    }

    fn eight_flows_8x8() -> Board {
        BoardBuilder::with_dims((dim(8), dim(8)))
            .add_flow('K', (Location(6, 0), Location(3, 5)))
            .add_flow('I', (Location(2, 0), Location(7, 4)))
            .add_flow('Y', (Location(6, 1), Location(4, 3)))
            .add_flow('O', (Location(3, 0), Location(5, 0)))
            .add_flow('C', (Location(2, 1), Location(5, 1)))
            .add_flow('R', (Location(2, 2), Location(2, 5)))
            .add_flow('P', (Location(1, 1), Location(6, 4)))
            .add_flow('B', (Location(3, 2), Location(4, 4)))
            .build()
            .unwrap()
    }

    // two flows whose paths would have to cross; no layout connects both
    fn crossing_3x3() -> Board {
        BoardBuilder::with_dims((dim(3), dim(3)))
            .add_flow('A', (Location(0, 0), Location(2, 2)))
            .add_flow('B', (Location(2, 0), Location(0, 2)))
            .build()
            .unwrap()
    }

    // breadth-first walk restricted to cells of the pair's own color; unlike
    // the solver's feasibility flood it must not cross empty cells
    fn same_color_connected(cells: &Matrix, pair: &EndpointPair) -> bool {
        let mut queue = VecDeque::from([pair.start]);
        let mut seen = Array2::from_elem(cells.raw_dim(), false);

        while let Some(location) = queue.pop_front() {
            if location == pair.end {
                return true;
            }
            let Some(slot) = cells.get(location.as_index()) else {
                continue;
            };
            if seen[location.as_index()] {
                continue;
            }
            seen[location.as_index()] = true;
            if !matches!(slot, Some(flow) if flow.color == pair.color) {
                continue;
            }
            queue.extend(
                Direction::VARIANTS
                    .iter()
                    .map(|direction| direction.attempt_from(location)),
            );
        }

        false
    }

    fn assert_valid_solution(board: &Board) {
        for pair in &board.pairs {
            assert!(
                same_color_connected(&board.cells, pair),
                "color {} endpoints not joined:\n{}",
                pair.color,
                board
            );
        }
    }

    #[test]
    fn default_board_is_empty_five_by_five() {
        let board = BoardBuilder::default().build().unwrap();

        assert_eq!(format!("{}", board), ".....
.....
.....
.....
.....
");
    }

    #[test]
    fn board_with_no_flows_is_trivially_solved() {
        assert!(BoardBuilder::default().build().unwrap().solve().is_ok());
    }

    #[test]
    fn solve_most_basic() {
        let board = classic_5x5();
        assert_eq!(format!("{}", board), "R.G.Y
..B.O
.....
.G.Y.
.RBO.
");

        let solved = board.solve().unwrap();
        assert_valid_solution(&solved);
    }

    #[test]
    fn eight_flows_terminate_and_agree_across_strategies() {
        let board = eight_flows_8x8();
        assert_eq!(format!("{}", board), "..IO.OK.
.PC..CY.
..RB....
....Y...
....B.PI
..RK....
........
........
");

        let sequential = eight_flows_8x8().solve_with(Strategy::Sequential).unwrap();
        let speculative = eight_flows_8x8().solve_with(Strategy::Speculative).unwrap();

        assert_valid_solution(&sequential);
        assert_eq!(format!("{}", sequential), format!("{}", speculative));
    }

    #[test]
    fn repeated_solves_return_the_same_layout() {
        let first = classic_5x5().solve().unwrap();
        let second = classic_5x5().solve().unwrap();

        assert_eq!(format!("{}", first), format!("{}", second));
    }

    #[test]
    fn crossing_pairs_on_tiny_board_are_unsolvable() {
        let result = BoardBuilder::with_dims((dim(2), dim(2)))
            .add_flow('A', (Location(0, 0), Location(1, 1)))
            .add_flow('B', (Location(1, 0), Location(0, 1)))
            .build()
            .unwrap()
            .solve();

        assert!(matches!(result, Err(SolveError::Unsolvable)));
    }

    #[test]
    fn crossing_pairs_are_unsolvable_under_both_strategies() {
        for strategy in [Strategy::Sequential, Strategy::Speculative] {
            let result = crossing_3x3().solve_with(strategy);
            assert!(matches!(result, Err(SolveError::Unsolvable)));
        }
    }

    #[test]
    fn duplicate_color_key_rejected() {
        let mut builder = BoardBuilder::default();
        builder
            .add_flow('A', (Location(0, 0), Location(4, 4)))
            .add_flow('A', (Location(1, 0), Location(3, 4)));

        assert_eq!(
            builder.is_valid(),
            Some(&vec![BuilderInvalidReason::DuplicateColorKey])
        );
    }

    #[test]
    fn out_of_bounds_endpoint_rejected() {
        let mut builder = BoardBuilder::default();
        builder.add_flow('A', (Location(0, 0), Location(0, 5)));

        assert!(builder.build().is_err());
        assert_eq!(
            builder.is_valid(),
            Some(&vec![BuilderInvalidReason::FeatureOutOfBounds])
        );
    }

    #[test]
    fn solve_order_is_shortest_first_and_stable() {
        let pairs = [
            EndpointPair { color: 1, start: Location(0, 0), end: Location(4, 4) },
            EndpointPair { color: 2, start: Location(0, 0), end: Location(1, 1) },
            EndpointPair { color: 3, start: Location(2, 0), end: Location(3, 1) },
        ];

        let order = solver::solve_order(&pairs);
        // colors 2 and 3 tie on span and keep their registration order
        assert_eq!(order.iter().map(|pair| pair.color).collect_vec(), vec![2, 3, 1]);
    }

    #[test]
    fn feasibility_verdict_is_idempotent() {
        let board = classic_5x5();
        let pair = board.pairs[0];

        let first = feasibility::endpoints_connected(&board.cells, &pair);
        let second = feasibility::endpoints_connected(&board.cells, &pair);

        assert!(first);
        assert_eq!(first, second);
    }

    #[test]
    fn sealed_endpoint_fails_feasibility() {
        let mut board = crossing_3x3();

        // wall the first flow's start corner in with cells of the second color
        for location in [Location(1, 0), Location(0, 1)] {
            board.cells[location.as_index()] = Some(Flow {
                location,
                color: 2,
                entry: Some(Direction::Down),
            });
        }

        assert!(feasibility::endpoint_sealed(&board.cells, 1, Location(0, 0)));
        assert!(!feasibility::puzzle_feasible(&board.cells, &board.pairs));
    }

    #[test]
    fn dead_search_unwinds_every_placement() {
        let mut board = crossing_3x3();
        let order = solver::solve_order(&board.pairs);
        let pairs = board.pairs.clone();
        let engine = Engine { order: &order, pairs: &pairs };

        let pristine = board.cells.clone();
        let head = board.cells[order[0].start.as_index()].unwrap();

        assert!(!engine.extend_in_place(&mut board.cells, head, 0));
        assert_eq!(board.cells, pristine);
    }

    #[test]
    fn speculative_branches_never_touch_the_shared_grid() {
        let board = classic_5x5();
        let order = solver::solve_order(&board.pairs);
        let engine = Engine { order: &order, pairs: &board.pairs };

        let pristine = board.cells.clone();
        let head = board.cells[order[0].start.as_index()].unwrap();

        assert!(matches!(
            engine.extend_speculative(&board.cells, head, 0),
            Branch::Solved(_)
        ));
        assert_eq!(board.cells, pristine);
    }

    #[test]
    fn solved_cells_expose_color_and_endpoints() {
        let solved = classic_5x5().solve().unwrap();

        let start = solved.cell_at(Location(0, 0)).unwrap();
        assert_eq!(start.color(), 1);
        assert_eq!(start.location(), Location(0, 0));
        assert!(start.is_endpoint());

        assert!(solved.cell_at(Location(9, 9)).is_none());
    }

    // independent breadth-first reference for the reachability oracle: a step
    // may cross empty or same-colored cells, and the destination counts as
    // reached regardless of what occupies it
    fn reference_connected(cells: &Matrix, pair: &EndpointPair) -> bool {
        let mut queue = VecDeque::from([pair.start]);
        let mut seen = Array2::from_elem(cells.raw_dim(), false);

        while let Some(location) = queue.pop_front() {
            if location == pair.end {
                return true;
            }
            let Some(slot) = cells.get(location.as_index()) else {
                continue;
            };
            if seen[location.as_index()] {
                continue;
            }
            seen[location.as_index()] = true;
            if matches!(slot, Some(flow) if flow.color != pair.color) {
                continue;
            }
            queue.extend(
                Direction::VARIANTS
                    .iter()
                    .map(|direction| direction.attempt_from(location)),
            );
        }

        false
    }

    prop_compose! {
        // a partially filled grid with two probe locations
        fn sparse_grid()(width in 1usize..8, height in 1usize..8)(
            cells in prop::collection::vec(prop::option::weighted(0.4, 1usize..4), width * height),
            start in 0usize..(width * height),
            end in 0usize..(width * height),
            width in Just(width),
            height in Just(height)
        ) -> (Matrix, Location, Location) {
            let matrix = Array2::from_shape_fn((height, width), |(y, x)| {
                cells[y * width + x].map(|color| Flow {
                    location: Location(x, y),
                    color,
                    entry: None,
                })
            });

            (
                matrix,
                Location(start % width, start / width),
                Location(end % width, end / width),
            )
        }
    }

    proptest! {
        #[test]
        fn reachability_matches_reference_flood((cells, start, end) in sparse_grid()) {
            let pair = EndpointPair { color: 1, start, end };

            prop_assert_eq!(
                feasibility::endpoints_connected(&cells, &pair),
                reference_connected(&cells, &pair)
            );
        }
    }

    prop_compose! {
        fn two_flow_board()(width in 2usize..5, height in 2usize..5)(
            corners in prop::sample::subsequence((0..width * height).collect_vec(), 4),
            width in Just(width),
            height in Just(height)
        ) -> BoardBuilder {
            let locate = |index: usize| Location(index % width, index / width);
            let mut builder = BoardBuilder::with_dims((
                NonZero::new(width).unwrap(),
                NonZero::new(height).unwrap(),
            ));
            builder
                .add_flow('A', (locate(corners[0]), locate(corners[1])))
                .add_flow('B', (locate(corners[2]), locate(corners[3])));

            builder
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]
        #[test]
        fn strategies_agree_on_small_boards(builder in two_flow_board()) {
            let sequential = builder.build().unwrap().solve_with(Strategy::Sequential);
            let speculative = builder.build().unwrap().solve_with(Strategy::Speculative);

            match (sequential, speculative) {
                (Ok(a), Ok(b)) => prop_assert_eq!(format!("{}", a), format!("{}", b)),
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                _ => prop_assert!(false, "one strategy solved, the other did not"),
            }
        }
    }
}
