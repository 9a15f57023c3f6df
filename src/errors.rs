// Create the Error, ErrorKind, ResultExt, and Result types.
// Result is a typedef of std `Result` with the error type our own `Error`.
use error_chain::*;

use crate::cells::Cell;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }

    errors {
        InvalidDimension(rows: usize, columns: usize) {
            description("invalid maze dimension")
            display("invalid maze dimension {}x{}: rows and columns must both be at least 1", rows, columns)
        }
        InvalidEndpoint(coord: Cell) {
            description("invalid path endpoint")
            display("invalid path endpoint {}: outside the grid or on a wall", coord)
        }
        MalformedGrid(reason: String) {
            description("malformed maze grid")
            display("malformed maze grid: {}", reason)
        }
        BackendUnavailable(reason: String) {
            description("maze backend unavailable")
            display("maze backend unavailable: {}", reason)
        }
        StepsUnsupported {
            description("step by step solving is not supported")
            display("step by step solving is not supported by this maze service")
        }
    }
}
