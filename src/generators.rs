use std::cmp::Reverse;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Cell, Side};
use crate::graph::CorridorGraph;
use crate::grid::RectGrid;
use crate::units::{BiasChance, ReachRatio};
use crate::utils::{self, FnvHashSet};

/// Carve a maze over `grid` with a randomized depth-first traversal whose
/// moves are reach-limited jumps rather than single steps.
///
/// A random cell on a random border becomes the start, a random cell on the
/// opposite border the end; both are flagged on the returned graph. From the
/// start the traversal repeatedly shuffles the jump-offset window, reserves a
/// corridor for every offset that lands in-bounds on an unvisited cell
/// without overlapping an existing corridor, and descends into each reserved
/// candidate that is still unvisited when its turn comes. A corridor carved
/// for a candidate that a sibling subtree reached first stays in the graph.
///
/// `bias` draws, per visited cell, the chance of reordering its candidates
/// towards already-carved regions (denser, more parallel corridor clusters).
/// Cells the overlap rule walls off stay corridor-free; that is accepted
/// maze shape, not a failure.
pub fn reach_limited_backtracker<R: Rng>(
    grid: &RectGrid,
    reach: ReachRatio,
    bias: BiasChance,
    rng: &mut R,
) -> CorridorGraph {
    debug_assert!(reach.0 > 0.0 && reach.0 <= 1.0);
    debug_assert!((0.0..=1.0).contains(&bias.0));

    let mut graph = CorridorGraph::with_capacity(grid.size());

    let start_side = Side::ALL[rng.gen_range(0..Side::ALL.len())];
    let start = grid.random_border_cell(start_side, rng);
    let end = grid.random_border_cell(start_side.opposite(), rng);
    graph.mark_start(start);
    graph.mark_end(end);

    let mut offsets = jump_offsets(grid, reach);
    let mut visited = utils::fnv_hashset(grid.size());
    visited.insert(start);

    // Worst-case depth is the cell count, so the recursion of the traversal
    // is run on an explicit frame stack instead of the call stack.
    let mut stack = vec![Frame::new(reserve_corridors(
        start,
        grid,
        &mut graph,
        &visited,
        &mut offsets,
        bias,
        rng,
    ))];
    loop {
        let candidate = {
            let frame = match stack.last_mut() {
                Some(frame) => frame,
                None => break,
            };
            frame.advance()
        };
        match candidate {
            Some(cell) => {
                if visited.contains(&cell) {
                    // claimed by a sibling subtree since it was reserved
                    continue;
                }
                visited.insert(cell);
                let candidates =
                    reserve_corridors(cell, grid, &mut graph, &visited, &mut offsets, bias, rng);
                stack.push(Frame::new(candidates));
            }
            None => {
                stack.pop();
            }
        }
    }

    graph
}

struct Frame {
    candidates: Vec<Cell>,
    next: usize,
}

impl Frame {
    fn new(candidates: Vec<Cell>) -> Frame {
        Frame {
            candidates,
            next: 0,
        }
    }

    fn advance(&mut self) -> Option<Cell> {
        let candidate = self.candidates.get(self.next).cloned();
        self.next += 1;
        candidate
    }
}

/// The window of allowed jumps: every horizontal offset in
/// `-floor(width*reach) .. floor(width*reach)` and every vertical offset in
/// the analogous range, zero excluded. Note the window is asymmetric - the
/// positive bound itself is never produced.
fn jump_offsets(grid: &RectGrid, reach: ReachRatio) -> Vec<(i32, i32)> {
    let horizontal_span = (grid.width() as f64 * reach.0).floor() as i32;
    let vertical_span = (grid.height() as f64 * reach.0).floor() as i32;

    (-horizontal_span..horizontal_span)
        .filter(|&dx| dx != 0)
        .map(|dx| (dx, 0))
        .chain(
            (-vertical_span..vertical_span)
                .filter(|&dy| dy != 0)
                .map(|dy| (0, dy)),
        )
        .collect()
}

/// Shuffle the offset window and reserve a corridor for every jump from
/// `current` that lands in-bounds on an unvisited cell and does not overlap
/// an already-carved corridor. `try_add_edge` doubles as the geometric
/// filter: a refused jump simply drops out of the candidate list.
fn reserve_corridors<R: Rng>(
    current: Cell,
    grid: &RectGrid,
    graph: &mut CorridorGraph,
    visited: &FnvHashSet<Cell>,
    offsets: &mut [(i32, i32)],
    bias: BiasChance,
    rng: &mut R,
) -> Vec<Cell> {
    offsets.shuffle(rng);

    let mut reserved = Vec::new();
    for &(dx, dy) in offsets.iter() {
        let target = Cell::new(current.x + dx, current.y + dy);
        if !grid.is_valid_coordinate(target) || visited.contains(&target) {
            continue;
        }
        if graph.try_add_edge(current, target) {
            reserved.push(target);
        }
    }

    if bias.0 > 0.0 && rng.gen_bool(bias.0) {
        // Pure reordering, never a filter: candidates crowded by visited
        // cells come first, ties keep their shuffled order (stable sort).
        reserved.sort_by_key(|&cell| Reverse(carved_unit_neighbours(cell, grid, visited)));
    }

    reserved
}

fn carved_unit_neighbours(cell: Cell, grid: &RectGrid, visited: &FnvHashSet<Cell>) -> usize {
    [(1, 0), (-1, 0), (0, 1), (0, -1)]
        .iter()
        .map(|&(dx, dy)| Cell::new(cell.x + dx, cell.y + dy))
        .filter(|step| grid.is_valid_coordinate(*step) && visited.contains(step))
        .count()
}
