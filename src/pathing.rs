use std::collections::VecDeque;

use crate::cells::Cell;
use crate::errors::*;
use crate::graph::CorridorGraph;
use crate::utils;

/// Breadth-first search for a shortest route (by corridor count) from
/// `start` to `end` over a finished corridor graph.
///
/// Fails with `MissingEndpoint` when `start` has no corridors at all, since
/// there is nothing to search from. An unreachable `end`, corridor-free or
/// not, is not an error: the frontier drains and the result is `Ok(None)`,
/// an outcome callers must handle explicitly.
///
/// The frontier carries each cell's accumulated route, is explored in
/// first-in-first-out order, and ties are broken by the graph's
/// edge-insertion order, so the same graph and endpoints always produce the
/// same route.
pub fn shortest_path(graph: &CorridorGraph, start: Cell, end: Cell) -> Result<Option<Vec<Cell>>> {
    if !graph.has_corridors(start) {
        return Err(ErrorKind::MissingEndpoint(start).into());
    }

    let mut frontier = VecDeque::new();
    frontier.push_back((start, vec![start]));
    let mut visited = utils::fnv_hashset(graph.cell_count());
    visited.insert(start);

    while let Some((current, route)) = frontier.pop_front() {
        if current == end {
            // first arrival in FIFO order is a shortest route
            return Ok(Some(route));
        }
        for neighbour in graph.neighbours_of(current) {
            if !visited.contains(&neighbour) {
                visited.insert(neighbour);
                let mut extended = route.clone();
                extended.push(neighbour);
                frontier.push_back((neighbour, extended));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::generators::reach_limited_backtracker;
    use crate::grid::RectGrid;
    use crate::units::{BiasChance, Height, ReachRatio, Width};

    fn long_jump_graph() -> CorridorGraph {
        // one long vertical jump then one long horizontal jump on a 3x3 grid
        let mut g = CorridorGraph::new();
        assert!(g.try_add_edge(Cell::new(0, 0), Cell::new(0, 2)));
        assert!(g.try_add_edge(Cell::new(0, 2), Cell::new(2, 2)));
        g
    }

    #[test]
    fn follows_long_jumps_to_the_end() {
        let g = long_jump_graph();
        let route = shortest_path(&g, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap()
            .expect("the two corridors connect start to end");
        assert_eq!(
            route,
            vec![Cell::new(0, 0), Cell::new(0, 2), Cell::new(2, 2)]
        );
    }

    #[test]
    fn corridor_free_start_is_an_error() {
        let g = long_jump_graph();

        // (1, 1) has no corridors on this graph
        match shortest_path(&g, Cell::new(1, 1), Cell::new(2, 2)) {
            Err(Error(ErrorKind::MissingEndpoint(cell), _)) => {
                assert_eq!(cell, Cell::new(1, 1));
            }
            other => panic!("expected MissingEndpoint, got {:?}", other),
        }
    }

    #[test]
    fn corridor_free_end_drains_to_no_route() {
        let g = long_jump_graph();

        // a bare end is unreachable, not an error
        let outcome = shortest_path(&g, Cell::new(0, 0), Cell::new(1, 1)).unwrap();
        assert_eq!(outcome, None);
    }

    #[test]
    fn disjoint_components_yield_no_route() {
        let mut g = long_jump_graph();
        // a corridor island nowhere near the start component
        assert!(g.try_add_edge(Cell::new(4, 0), Cell::new(4, 1)));

        let outcome = shortest_path(&g, Cell::new(0, 0), Cell::new(4, 0)).unwrap();
        assert_eq!(outcome, None);
    }

    #[test]
    fn start_equal_to_end_is_a_single_cell_route() {
        let g = long_jump_graph();
        let route = shortest_path(&g, Cell::new(0, 0), Cell::new(0, 0)).unwrap();
        assert_eq!(route, Some(vec![Cell::new(0, 0)]));
    }

    #[test]
    fn shorter_route_wins_regardless_of_insertion_order() {
        let mut g = CorridorGraph::new();
        // three-corridor detour first ...
        assert!(g.try_add_edge(Cell::new(0, 0), Cell::new(2, 0)));
        assert!(g.try_add_edge(Cell::new(2, 0), Cell::new(2, 2)));
        assert!(g.try_add_edge(Cell::new(2, 2), Cell::new(2, 4)));
        // ... then the two-corridor route
        assert!(g.try_add_edge(Cell::new(0, 0), Cell::new(0, 4)));
        assert!(g.try_add_edge(Cell::new(0, 4), Cell::new(2, 4)));

        let route = shortest_path(&g, Cell::new(0, 0), Cell::new(2, 4))
            .unwrap()
            .unwrap();
        assert_eq!(
            route,
            vec![Cell::new(0, 0), Cell::new(0, 4), Cell::new(2, 4)]
        );
    }

    #[test]
    fn equal_length_ties_break_by_insertion_order() {
        let mut g = CorridorGraph::new();
        // a ring: two routes of equal length from (0,0) to (2,2)
        assert!(g.try_add_edge(Cell::new(0, 0), Cell::new(0, 2)));
        assert!(g.try_add_edge(Cell::new(0, 2), Cell::new(2, 2)));
        assert!(g.try_add_edge(Cell::new(2, 2), Cell::new(2, 0)));
        assert!(g.try_add_edge(Cell::new(2, 0), Cell::new(0, 0)));

        let route = shortest_path(&g, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap()
            .unwrap();
        // the (0,0)-(0,2) corridor was stored first, so its branch wins
        assert_eq!(
            route,
            vec![Cell::new(0, 0), Cell::new(0, 2), Cell::new(2, 2)]
        );
    }

    #[test]
    fn solving_twice_gives_the_identical_route() {
        let grid = RectGrid::new(Width(9), Height(9)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let graph = reach_limited_backtracker(&grid, ReachRatio(0.5), BiasChance(0.2), &mut rng);
        let start = graph.start().unwrap();
        let end = graph.end().unwrap();
        if !graph.has_corridors(start) || !graph.has_corridors(end) {
            return;
        }

        let first = shortest_path(&graph, start, end).unwrap();
        let second = shortest_path(&graph, start, end).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn quickcheck_routes_walk_stored_corridors() {
        fn prop(width: u8, height: u8, seed: u64) -> TestResult {
            let width = 2 + (width % 10) as usize;
            let height = 2 + (height % 10) as usize;
            let grid = RectGrid::new(Width(width), Height(height)).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let graph =
                reach_limited_backtracker(&grid, ReachRatio(1.0), BiasChance(0.0), &mut rng);
            let start = graph.start().unwrap();
            let end = graph.end().unwrap();
            if !graph.has_corridors(start) || !graph.has_corridors(end) {
                return TestResult::discard();
            }

            match shortest_path(&graph, start, end).unwrap() {
                Some(route) => TestResult::from_bool(
                    route.first() == Some(&start)
                        && route.last() == Some(&end)
                        && route
                            .iter()
                            .tuple_windows()
                            .all(|(a, b)| graph.is_linked(*a, *b)),
                ),
                // disconnected endpoints are a legal generation outcome
                None => TestResult::passed(),
            }
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
