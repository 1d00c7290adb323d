/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use newt::{perft, splitperft, Game, FEN_KIWIPETE, FEN_STARTPOS};

/// A bitboard-based legal chess move generator.
#[derive(Debug, Parser)]
#[command(about, version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count all positions reachable from a position in `depth` moves.
    Perft {
        /// Number of plies to search.
        depth: usize,

        /// Position to start from, as a FEN string.
        #[arg(short, long, default_value = FEN_STARTPOS)]
        fen: String,

        /// If set, the node count below every root move is printed as well.
        #[arg(short, long, default_value = "false")]
        split: bool,
    },

    /// Run a fixed suite of perft positions and report total throughput.
    Bench {
        /// Override the default benchmark depth.
        #[arg(short, long, default_value = "5")]
        depth: usize,
    },
}

/// Runs `perft` on the provided game, printing node count and throughput.
fn report_perft(game: &mut Game, depth: usize, split: bool) -> u64 {
    let now = Instant::now();
    let nodes = if split {
        splitperft(game, depth)
    } else {
        perft(game, depth)
    };
    let elapsed = now.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64();
    println!(
        "{nodes} nodes in {:.3}s ({:.0} nodes/sec)",
        elapsed.as_secs_f64(),
        nps
    );

    nodes
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Perft { depth, fen, split } => {
            let mut game = Game::from_fen(&fen)?;
            report_perft(&mut game, depth, split);
        }

        Command::Bench { depth } => {
            let suite = [
                ("startpos", FEN_STARTPOS),
                ("kiwipete", FEN_KIWIPETE),
                ("endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
            ];

            let now = Instant::now();
            let mut nodes = 0;
            for (name, fen) in suite {
                let mut game = Game::from_fen(fen)?;
                print!("{name}: ");
                nodes += report_perft(&mut game, depth, false);
            }
            let elapsed = now.elapsed();

            println!(
                "total: {nodes} nodes in {:.3}s ({:.0} nodes/sec)",
                elapsed.as_secs_f64(),
                nodes as f64 / elapsed.as_secs_f64()
            );
        }
    }

    Ok(())
}
