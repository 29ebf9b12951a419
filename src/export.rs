//! CSV snapshots of a corridor graph.
//!
//! The format is two sections, nodes then adjacency, so a snapshot can be
//! rehydrated without the grid that produced it:
//!
//! ```text
//! # Nodes
//! x,y,is_start,is_end
//! 0,0,true,false
//!
//! # Edges (Adjacency List)
//! source_x,source_y,neighbor_x,neighbor_y
//! 0,0,0,2
//! 0,2,0,0
//! ```
//!
//! The adjacency section lists both directions of every corridor.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::cells::Cell;
use crate::errors::*;
use crate::graph::CorridorGraph;

const NODES_HEADER: &str = "# Nodes";
const NODES_COLUMNS: &str = "x,y,is_start,is_end";
const EDGES_HEADER: &str = "# Edges (Adjacency List)";
const EDGES_COLUMNS: &str = "source_x,source_y,neighbor_x,neighbor_y";

pub fn write_graph<W: Write>(graph: &CorridorGraph, out: &mut W) -> Result<()> {
    writeln!(out, "{}", NODES_HEADER)?;
    writeln!(out, "{}", NODES_COLUMNS)?;
    for cell in graph.cells() {
        writeln!(
            out,
            "{},{},{},{}",
            cell.x,
            cell.y,
            graph.is_start(cell),
            graph.is_end(cell)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", EDGES_HEADER)?;
    writeln!(out, "{}", EDGES_COLUMNS)?;
    for cell in graph.cells() {
        for neighbour in graph.neighbours_of(cell) {
            writeln!(out, "{},{},{},{}", cell.x, cell.y, neighbour.x, neighbour.y)?;
        }
    }

    Ok(())
}

pub fn save_graph<P: AsRef<Path>>(graph: &CorridorGraph, path: P) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_graph(graph, &mut out)
}

enum Section {
    Preamble,
    Nodes,
    Edges,
}

/// Rebuild a corridor graph from a snapshot.
///
/// Every adjacency row is funnelled through `try_add_edge`, so the
/// reciprocal listing of a corridor already stored is refused as an overlap
/// and dedupes itself, and a hand-edited snapshot cannot smuggle in
/// overlapping corridors. Rows with too few fields are skipped; fields that
/// fail to parse as integers surface as errors. Start/end flags accept any
/// capitalisation of `true`.
pub fn read_graph<R: BufRead>(input: R) -> Result<CorridorGraph> {
    let mut graph = CorridorGraph::new();
    let mut section = Section::Preamble;
    let mut seen_edges_section = false;

    for line in input.lines() {
        let line = line?;
        let row = line.trim();
        if row.is_empty() || row == NODES_COLUMNS || row == EDGES_COLUMNS {
            continue;
        }
        if row.starts_with(NODES_HEADER) {
            section = Section::Nodes;
            continue;
        }
        if row.starts_with(EDGES_HEADER) {
            section = Section::Edges;
            seen_edges_section = true;
            continue;
        }
        if row.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() < 4 {
            continue;
        }

        match section {
            Section::Preamble => {
                return Err(ErrorKind::MalformedExport(format!(
                    "data row before the \"{}\" section: {}",
                    NODES_HEADER, row
                ))
                .into());
            }
            Section::Nodes => {
                let cell = Cell::new(fields[0].parse()?, fields[1].parse()?);
                if fields[2].eq_ignore_ascii_case("true") {
                    graph.mark_start(cell);
                }
                if fields[3].eq_ignore_ascii_case("true") {
                    graph.mark_end(cell);
                }
            }
            Section::Edges => {
                let source = Cell::new(fields[0].parse()?, fields[1].parse()?);
                let neighbour = Cell::new(fields[2].parse()?, fields[3].parse()?);
                graph.try_add_edge(source, neighbour);
            }
        }
    }

    if !seen_edges_section {
        return Err(
            ErrorKind::MalformedExport(format!("missing \"{}\" section", EDGES_HEADER)).into(),
        );
    }

    Ok(graph)
}

pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<CorridorGraph> {
    read_graph(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {

    use std::io::Cursor;

    use itertools::Itertools;

    use super::*;
    use crate::graph::Edge;
    use crate::pathing::shortest_path;

    fn sample_graph() -> CorridorGraph {
        let mut g = CorridorGraph::new();
        assert!(g.try_add_edge(Cell::new(0, 0), Cell::new(0, 2)));
        assert!(g.try_add_edge(Cell::new(0, 2), Cell::new(2, 2)));
        assert!(g.try_add_edge(Cell::new(2, 2), Cell::new(2, 0)));
        g.mark_start(Cell::new(0, 0));
        g.mark_end(Cell::new(2, 0));
        g
    }

    fn unordered_edges(graph: &CorridorGraph) -> Vec<((i32, i32), (i32, i32))> {
        graph
            .edges()
            .map(|Edge { a, b, .. }| {
                let a = (a.x, a.y);
                let b = (b.x, b.y);
                if a <= b {
                    (a, b)
                } else {
                    (b, a)
                }
            })
            .sorted()
            .collect()
    }

    #[test]
    fn written_snapshot_has_both_sections() {
        let mut out = Vec::new();
        write_graph(&sample_graph(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# Nodes\nx,y,is_start,is_end\n"));
        assert!(text.contains("\n# Edges (Adjacency List)\nsource_x,source_y,neighbor_x,neighbor_y\n"));
        assert!(text.contains("0,0,true,false"));
        assert!(text.contains("2,0,false,true"));
        // adjacency is written in both directions
        assert!(text.contains("0,0,0,2"));
        assert!(text.contains("0,2,0,0"));
    }

    #[test]
    fn round_trip_preserves_corridors_flags_and_routes() {
        let original = sample_graph();
        let mut out = Vec::new();
        write_graph(&original, &mut out).unwrap();

        let rehydrated = read_graph(Cursor::new(out)).unwrap();

        assert_eq!(unordered_edges(&rehydrated), unordered_edges(&original));
        assert_eq!(rehydrated.edge_count(), original.edge_count());
        assert_eq!(rehydrated.start(), original.start());
        assert_eq!(rehydrated.end(), original.end());

        let route = |graph: &CorridorGraph| {
            shortest_path(graph, graph.start().unwrap(), graph.end().unwrap()).unwrap()
        };
        let original_route = route(&original).expect("sample graph is connected");
        let rehydrated_route = route(&rehydrated).expect("rehydrated graph is connected");
        assert_eq!(original_route.len(), rehydrated_route.len());
    }

    #[test]
    fn reciprocal_adjacency_rows_dedupe() {
        let snapshot = "\
# Nodes
x,y,is_start,is_end
0,0,True,False
0,2,False,True

# Edges (Adjacency List)
source_x,source_y,neighbor_x,neighbor_y
0,0,0,2
0,2,0,0
";
        let graph = read_graph(Cursor::new(snapshot)).unwrap();
        assert_eq!(graph.edge_count(), 1);
        // capitalised flags, as written by other tools, still parse
        assert_eq!(graph.start(), Some(Cell::new(0, 0)));
        assert_eq!(graph.end(), Some(Cell::new(0, 2)));
    }

    #[test]
    fn short_rows_are_skipped() {
        let snapshot = "\
# Nodes
x,y,is_start,is_end
0,0,true,false
garbage

# Edges (Adjacency List)
source_x,source_y,neighbor_x,neighbor_y
0,0,0,2
1,1
";
        let graph = read_graph(Cursor::new(snapshot)).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn data_before_the_nodes_section_is_malformed() {
        let snapshot = "0,0,true,false\n# Nodes\n";
        match read_graph(Cursor::new(snapshot)) {
            Err(Error(ErrorKind::MalformedExport(_), _)) => {}
            other => panic!("expected MalformedExport, got {:?}", other),
        }
    }

    #[test]
    fn missing_edges_section_is_malformed() {
        let snapshot = "# Nodes\nx,y,is_start,is_end\n0,0,true,false\n";
        match read_graph(Cursor::new(snapshot)) {
            Err(Error(ErrorKind::MalformedExport(_), _)) => {}
            other => panic!("expected MalformedExport, got {:?}", other),
        }
    }

    #[test]
    fn unparsable_coordinates_are_an_error() {
        let snapshot = "\
# Nodes
x,y,is_start,is_end
zero,0,true,false

# Edges (Adjacency List)
source_x,source_y,neighbor_x,neighbor_y
";
        assert!(read_graph(Cursor::new(snapshot)).is_err());
    }
}
