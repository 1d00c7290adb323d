/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::Game;

/// Perform a perft at the specified depth, counting the number of reachable positions (nodes).
///
/// The tree is walked with [`Game::make_move`] and [`Game::unmake_move`], so the
/// game is returned to its original state when the count completes.
///
/// This performs bulk counting: at depth 1 it returns the size of the move list
/// rather than making each move and returning 1 per terminal node.
/// If you do *not* want bulk counting, use [`perft_generic`].
#[inline(always)]
pub fn perft(game: &mut Game, depth: usize) -> u64 {
    // Bulk counting; no need to recurse again just to apply a single move and return 1
    if depth == 1 {
        return game.get_legal_moves().len() as u64;
    } else
    // Recursion limit; return 1, since we're fathoming this node
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in game.get_legal_moves() {
        game.make_move(mv);
        nodes += perft(game, depth - 1);
        game.unmake_move();
    }

    nodes
}

/// Perform a splitperft at the specified depth, printing the number of nodes
/// reachable after each move available at the root.
#[inline(always)]
pub fn splitperft(game: &mut Game, depth: usize) -> u64 {
    perft_generic::<true, true>(game, depth)
}

/// Generic version of [`perft`] that allows you to toggle bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, the per-move node counts at the root are printed.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(game: &mut Game, depth: usize) -> u64 {
    if BULK && !SPLIT && depth == 1 {
        return game.get_legal_moves().len() as u64;
    } else if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in game.get_legal_moves() {
        game.make_move(mv);
        let new_nodes = perft_generic::<BULK, false>(game, depth - 1);
        game.unmake_move();

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes += new_nodes;
    }

    nodes
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn perft_restores_the_game() {
        let mut game = Game::default();
        let before = *game.position();

        assert_eq!(perft(&mut game, 3), 8902);
        assert_eq!(*game.position(), before);
        assert_eq!(game.ply(), 0);
    }

    #[test]
    fn bulk_and_plain_counting_agree() {
        let mut game = Game::default();
        assert_eq!(
            perft_generic::<true, false>(&mut game, 3),
            perft_generic::<false, false>(&mut game, 3),
        );
    }
}
