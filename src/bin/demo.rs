//! Builds a few well-known Flow Free layouts, solves them under both
//! execution strategies and reports rough timings.

use std::num::NonZero;
use std::time::Instant;

use capillary::{Board, BoardBuilder, Location, Strategy};

const TIMED_ITERATIONS: u32 = 100;

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

fn six_flows_7x7() -> Board {
    BoardBuilder::with_dims((dim(7), dim(7)))
        .add_flow('B', (Location(0, 1), Location(1, 2)))
        .add_flow('Y', (Location(1, 1), Location(2, 3)))
        .add_flow('O', (Location(0, 2), Location(3, 5)))
        .add_flow('R', (Location(0, 6), Location(6, 2)))
        .add_flow('G', (Location(6, 1), Location(5, 5)))
        .add_flow('C', (Location(5, 1), Location(5, 4)))
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

fn main() {
    for (name, board) in [
        ("5x5", classic_5x5()),
        ("7x7", six_flows_7x7()),
        ("8x8", eight_flows_8x8()),
    ] {
        println!("{name} puzzle:\n{board}");
        let solved = board.solve().expect("example board should be solvable");
        println!("solution:\n{solved}");
    }

    for strategy in [Strategy::Sequential, Strategy::Speculative] {
        let start = Instant::now();
        for _ in 0..TIMED_ITERATIONS {
            eight_flows_8x8()
                .solve_with(strategy)
                .expect("example board should be solvable");
        }
        let average = start.elapsed() / TIMED_ITERATIONS;
        println!("{strategy:?}: {average:?} average over {TIMED_ITERATIONS} solves of the 8x8 board");
    }
}
