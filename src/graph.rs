use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use smallvec::SmallVec;

use crate::cells::{Cell, CellSmallVec};
use crate::utils::{self, FnvHashMap};

/// How a corridor should be painted. Irrelevant to reachability; carried so
/// renderers and exporters can consume it straight off the edge set.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CorridorStyle {
    Plain,
    Highlighted,
}

impl Default for CorridorStyle {
    fn default() -> CorridorStyle {
        CorridorStyle::Plain
    }
}

/// An accepted corridor segment: an unordered, axis-aligned pair of cells,
/// possibly spanning several unit steps.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Edge {
    pub a: Cell,
    pub b: Cell,
    pub style: CorridorStyle,
}

impl Edge {
    pub fn new(a: Cell, b: Cell) -> Edge {
        Edge {
            a,
            b,
            style: CorridorStyle::default(),
        }
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.a.shares_one_axis(self.b)
    }
}

/// Open-interval overlap of two coordinate ranges on the same line.
/// Ranges may be given in either direction; touching endpoints do not count.
pub fn intervals_overlap(first: (i32, i32), second: (i32, i32)) -> bool {
    let (a_lo, a_hi) = if first.0 <= first.1 {
        first
    } else {
        (first.1, first.0)
    };
    let (b_lo, b_hi) = if second.0 <= second.1 {
        second
    } else {
        (second.1, second.0)
    };
    a_lo < b_hi && b_lo < a_hi
}

/// Two corridors conflict when they lie on the same axis-aligned grid line
/// and their coordinate ranges overlap beyond a shared endpoint. Crossing
/// perpendicular corridors never conflict.
pub fn edges_conflict(first: &Edge, second: &Edge) -> bool {
    let vertical = |e: &Edge| e.a.x == e.b.x;
    let horizontal = |e: &Edge| e.a.y == e.b.y;

    if vertical(first) && vertical(second) && first.a.x == second.a.x {
        intervals_overlap((first.a.y, first.b.y), (second.a.y, second.b.y))
    } else if horizontal(first) && horizontal(second) && first.a.y == second.a.y {
        intervals_overlap((first.a.x, first.b.x), (second.a.x, second.b.x))
    } else {
        false
    }
}

/// Grow-only set of non-overlapping corridors plus the derived bidirectional
/// adjacency between their endpoint cells. One generation pass owns and
/// mutates it; afterwards it is read-only for any number of solver calls.
#[derive(Debug, Clone)]
pub struct CorridorGraph {
    graph: Graph<Cell, CorridorStyle, Undirected>,
    node_lookup: FnvHashMap<Cell, NodeIndex>,
    start: Option<Cell>,
    end: Option<Cell>,
}

impl CorridorGraph {
    pub fn new() -> CorridorGraph {
        CorridorGraph::with_capacity(0)
    }

    pub fn with_capacity(cells_hint: usize) -> CorridorGraph {
        CorridorGraph {
            graph: Graph::with_capacity(cells_hint, cells_hint),
            node_lookup: utils::fnv_hashmap(cells_hint),
            start: None,
            end: None,
        }
    }

    /// Store a corridor between `a` and `b` and connect both adjacency
    /// directions. Answers `false` without mutating anything when the pair
    /// is degenerate (`a == b`), not axis-aligned, or would overlap a stored
    /// corridor on an open interval. A refused edge is a routine outcome the
    /// generator uses to shape the maze, not an error.
    pub fn try_add_edge(&mut self, a: Cell, b: Cell) -> bool {
        if a == b || !a.shares_one_axis(b) {
            return false;
        }
        let candidate = Edge::new(a, b);
        let conflicts = self.edges().any(|stored| edges_conflict(&stored, &candidate));
        if conflicts {
            return false;
        }
        let a_index = self.intern(a);
        let b_index = self.intern(b);
        self.graph.add_edge(a_index, b_index, candidate.style);
        true
    }

    fn intern(&mut self, cell: Cell) -> NodeIndex {
        if let Some(&index) = self.node_lookup.get(&cell) {
            return index;
        }
        let index = self.graph.add_node(cell);
        self.node_lookup.insert(cell, index);
        index
    }

    /// Cells directly connected to `cell`, in edge-insertion order. The
    /// order is part of the contract: generation and solving are
    /// deterministic for a fixed seed because of it.
    pub fn neighbours_of(&self, cell: Cell) -> CellSmallVec {
        let index = match self.node_lookup.get(&cell) {
            Some(&index) => index,
            None => return CellSmallVec::new(),
        };
        // petgraph walks incident edges newest-first, split by which
        // endpoint the cell was stored as; sorting by edge index is what
        // actually recovers insertion order.
        let mut incident: SmallVec<[(EdgeIndex, Cell); 8]> = self
            .graph
            .edges(index)
            .map(|edge| {
                let neighbour = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id(), self.graph[neighbour])
            })
            .collect();
        incident.sort_by_key(|&(edge_index, _)| edge_index);
        incident
            .into_iter()
            .map(|(_, neighbour)| neighbour)
            .collect()
    }

    /// Read-only snapshot of every stored corridor, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(move |edge| Edge {
            a: self.graph[edge.source()],
            b: self.graph[edge.target()],
            style: *edge.weight(),
        })
    }

    /// Every cell touched by at least one corridor, in first-use order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.graph.node_indices().map(move |index| self.graph[index])
    }

    pub fn has_corridors(&self, cell: Cell) -> bool {
        self.node_lookup.contains_key(&cell)
    }

    pub fn is_linked(&self, a: Cell, b: Cell) -> bool {
        match (self.node_lookup.get(&a), self.node_lookup.get(&b)) {
            (Some(&a_index), Some(&b_index)) => self.graph.find_edge(a_index, b_index).is_some(),
            _ => false,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn cell_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn mark_start(&mut self, cell: Cell) {
        self.start = Some(cell);
    }

    pub fn mark_end(&mut self, cell: Cell) {
        self.end = Some(cell);
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn end(&self) -> Option<Cell> {
        self.end
    }

    pub fn is_start(&self, cell: Cell) -> bool {
        self.start == Some(cell)
    }

    pub fn is_end(&self, cell: Cell) -> bool {
        self.end == Some(cell)
    }
}

impl Default for CorridorGraph {
    fn default() -> CorridorGraph {
        CorridorGraph::new()
    }
}
