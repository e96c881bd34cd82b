/*!
# IO

Reading route networks from text files.

## Input Format

The only supported input format is the **route list**: a header line `N M` (number of hubs and
number of routes) followed by `M` lines `origin destination weight capacity`. Hubs are numbered
`1..=N`; they become the vertex values of the loaded graph. See [`RouteListReader`].

## Traits

[`GraphReader`] is implemented by readers for a specific format and provides a convenience
wrapper to read directly from files.
*/

pub mod route_list;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::prelude::*;

pub use route_list::*;

/// Trait for types that can read graphs in a specific format.
pub trait GraphReader<G> {
    /// Reads a graph from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid representation
    /// of a graph in the expected format.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Reads a graph from a file according to the settings in `self`.
    ///
    /// Internally wraps the file in a buffered reader.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if its contents
    /// are not a valid representation of a graph in the expected format.
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning an IO-error early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info).into());
        }
    };
}

/// Tries to parse the next token of an iterator and returns early if it fails
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr, $line : expr) => {{
        let Some(token) = $iterator.next() else {
            return Err(io_error!(
                std::io::ErrorKind::InvalidData,
                format!("line {}: premature end of line when parsing {}", $line, $name)
            )
            .into());
        };

        match token.parse() {
            Ok(value) => value,
            Err(_) => {
                return Err(io_error!(
                    std::io::ErrorKind::InvalidData,
                    format!("line {}: cannot parse {} from `{}`", $line, $name, token)
                )
                .into());
            }
        }
    }};
}

use io_error;
use parse_next_value;
use raise_error_unless;
