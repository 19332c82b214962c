use std::num::ParseIntError;

use snafu::prelude::*;

#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    //
    // Invalid parameter errors.
    //
    #[snafu(display("unable to cast {value} of type {type_name} to {target}: {source}"))]
    ParseInt {
        value: String,
        type_name: &'static str,
        target: &'static str,
        source: ParseIntError,
    },
    // We render the number rather than storing `serde_json::Number` so that `Error` stays `Eq`.
    #[snafu(display("int failed for json number ({number}): {source}"))]
    Number {
        number: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },
    #[snafu(display("unable to cast {value} of type {type_name} to {target}"))]
    Unsupported {
        value: String,
        type_name: &'static str,
        target: &'static str,
    },

    //
    // `IntHolder` errors.
    //
    #[snafu(display("int[{type_name}] failed: {source}"))]
    Set {
        type_name: &'static str,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },
}

impl Error {
    /// True if the input could not be interpreted as an integer.
    ///
    /// `Set` errors only ever wrap such an error, and so they are classified by their source.
    pub fn is_invalid_param(&self) -> bool {
        match self {
            Error::ParseInt { .. } | Error::Number { .. } | Error::Unsupported { .. } => true,
            Error::Set { source, .. } => source.is_invalid_param(),
        }
    }
}
