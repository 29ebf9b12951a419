use itertools::Itertools;

use crate::cells::Cell;
use crate::graph::CorridorGraph;
use crate::grid::RectGrid;

/// Paint a corridor graph as one glyph per grid cell:
///
/// - `S` / `E` - the start and end cells,
/// - `*` - cells on the supplied solution route,
/// - `o` - cells covered by a corridor, including the interior cells of a
///   long jump,
/// - `.` - untouched cells.
///
/// Cells outside the grid (possible with a hand-edited snapshot) are simply
/// not painted.
pub fn render_text(grid: &RectGrid, graph: &CorridorGraph, route: Option<&[Cell]>) -> String {
    let mut glyphs = vec![vec!['.'; grid.width()]; grid.height()];

    for edge in graph.edges() {
        for cell in cells_along(edge.a, edge.b) {
            paint(&mut glyphs, grid, cell, 'o');
        }
    }

    if let Some(route) = route {
        for &cell in route {
            paint(&mut glyphs, grid, cell, '*');
        }
        for (from, to) in route.iter().tuple_windows() {
            for cell in cells_along(*from, *to) {
                paint(&mut glyphs, grid, cell, '*');
            }
        }
    }

    if let Some(start) = graph.start() {
        paint(&mut glyphs, grid, start, 'S');
    }
    if let Some(end) = graph.end() {
        paint(&mut glyphs, grid, end, 'E');
    }

    let mut output = String::with_capacity(grid.height() * (grid.width() * 2 + 1));
    for row in &glyphs {
        output.push_str(&row.iter().join(" "));
        output.push('\n');
    }
    output
}

fn paint(glyphs: &mut [Vec<char>], grid: &RectGrid, cell: Cell, glyph: char) {
    if grid.is_valid_coordinate(cell) {
        glyphs[cell.y as usize][cell.x as usize] = glyph;
    }
}

/// Every cell a straight corridor passes through, endpoints included.
fn cells_along(from: Cell, to: Cell) -> Vec<Cell> {
    if !from.shares_one_axis(to) {
        // nothing sensible to interpolate for a non-corridor pair
        return vec![from, to];
    }
    let step_x = (to.x - from.x).signum();
    let step_y = (to.y - from.y).signum();
    let mut cells = vec![from];
    let mut current = from;
    while current != to {
        current = Cell::new(current.x + step_x, current.y + step_y);
        cells.push(current);
    }
    cells
}
