use error_chain::error_chain;

use crate::cells::Cell;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        ParseInt(::std::num::ParseIntError);
    }

    errors {
        InvalidDimension(width: usize, height: usize) {
            description("grid dimensions must be positive")
            display("invalid grid dimensions {}x{}", width, height)
        }
        MissingEndpoint(cell: Cell) {
            description("route start has no corridors")
            display("cell {} has no corridors attached", cell)
        }
        MalformedExport(reason: String) {
            description("maze snapshot is malformed")
            display("malformed maze snapshot: {}", reason)
        }
    }
}
