//! **spaghetti** carves corridor mazes with reach-limited jumps and finds
//! shortest routes through them with breadth-first search.

pub mod cells;
pub mod errors;
pub mod export;
pub mod generators;
pub mod graph;
pub mod grid;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;
