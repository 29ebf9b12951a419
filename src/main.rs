use docopt::Docopt;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_derive::Deserialize;
use spaghetti::{
    cells::Cell,
    export, generators,
    graph::CorridorGraph,
    grid::RectGrid,
    pathing, renderers,
    units::{BiasChance, Height, ReachRatio, Width},
};

const USAGE: &str = "Spaghetti

Usage:
    spaghetti_driver -h | --help
    spaghetti_driver generate [--grid-width=<w>] [--grid-height=<h>] [--reach=<r>] [--bias=<p>] [--seed=<n>] [--save-csv=<path>] [--solve] [--text]
    spaghetti_driver solve <csv-path> [--text]

Options:
    -h --help           Show this screen.
    --grid-width=<w>    Grid width in cells [default: 10].
    --grid-height=<h>   Grid height in cells [default: 10].
    --reach=<r>         Fraction of a grid dimension one carving jump may span, in (0, 1] [default: 0.5].
    --bias=<p>          Chance of biasing candidate order towards already-carved regions, in [0, 1] [default: 0.0].
    --seed=<n>          Seed the random generator for a reproducible maze.
    --save-csv=<path>   Write the generated maze graph to a CSV snapshot.
    --solve             Run the breadth-first solver on the generated maze.
    --text              Print a text rendering of the maze (with the route if solved).
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    cmd_generate: bool,
    cmd_solve: bool,
    arg_csv_path: String,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_reach: f64,
    flag_bias: f64,
    flag_seed: Option<u64>,
    flag_save_csv: String,
    flag_solve: bool,
    flag_text: bool,
}

mod errors {
    use error_chain::error_chain;

    error_chain! {
        links {
            Maze(::spaghetti::errors::Error, ::spaghetti::errors::ErrorKind);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    let args: DriverArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if args.cmd_solve {
        run_solve(&args)
    } else {
        run_generate(&args)
    }
}

fn run_generate(args: &DriverArgs) -> Result<()> {
    if !(args.flag_reach > 0.0 && args.flag_reach <= 1.0) {
        return Err("--reach must lie in (0, 1]".into());
    }
    if !(0.0..=1.0).contains(&args.flag_bias) {
        return Err("--bias must lie in [0, 1]".into());
    }

    let grid = RectGrid::new(Width(args.flag_grid_width), Height(args.flag_grid_height))?;
    let mut rng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let graph = generators::reach_limited_backtracker(
        &grid,
        ReachRatio(args.flag_reach),
        BiasChance(args.flag_bias),
        &mut rng,
    );
    println!(
        "Carved {} corridors over {} cells.",
        graph.edge_count(),
        graph.cell_count()
    );

    if !args.flag_save_csv.is_empty() {
        export::save_graph(&graph, &args.flag_save_csv)?;
        println!("Snapshot written to {}.", args.flag_save_csv);
    }

    let route = if args.flag_solve {
        solve_graph(&graph)?
    } else {
        None
    };
    if args.flag_text {
        println!("{}", renderers::render_text(&grid, &graph, route.as_deref()));
    }

    Ok(())
}

fn run_solve(args: &DriverArgs) -> Result<()> {
    let graph = export::load_graph(&args.arg_csv_path)?;
    println!(
        "Loaded {} cells and {} corridors from {}.",
        graph.cell_count(),
        graph.edge_count(),
        args.arg_csv_path
    );

    let route = solve_graph(&graph)?;
    if args.flag_text {
        let grid = bounding_grid(&graph)?;
        println!("{}", renderers::render_text(&grid, &graph, route.as_deref()));
    }

    Ok(())
}

fn solve_graph(graph: &CorridorGraph) -> Result<Option<Vec<Cell>>> {
    let (start, end) = match (graph.start(), graph.end()) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err("maze has no start/end cells marked".into()),
    };

    match pathing::shortest_path(graph, start, end)? {
        Some(route) => {
            println!(
                "Route ({} cells): {}",
                route.len(),
                route.iter().join(" -> ")
            );
            Ok(Some(route))
        }
        None => {
            println!("No route from {} to {}.", start, end);
            Ok(None)
        }
    }
}

/// Smallest grid that contains every carved cell, for rendering a snapshot
/// that arrived without its grid dimensions.
fn bounding_grid(graph: &CorridorGraph) -> Result<RectGrid> {
    let max_x = graph.cells().map(|cell| cell.x).max().unwrap_or(0).max(0);
    let max_y = graph.cells().map(|cell| cell.y).max().unwrap_or(0).max(0);
    Ok(RectGrid::new(
        Width(max_x as usize + 1),
        Height(max_y as usize + 1),
    )?)
}
