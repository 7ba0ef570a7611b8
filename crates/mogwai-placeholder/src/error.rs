//! Errors
use snafu::Snafu;

use crate::time::TimerKind;

#[derive(Debug, Snafu)]
#[snafu(visibility = "pub(crate)")]
pub enum Error {
    #[snafu(display("There is no global `window`"))]
    MissingWindow,

    #[snafu(display("The window does not have a `document`"))]
    MissingDocument,

    #[snafu(display("Could not schedule the {:?} timer: {}", kind, msg))]
    Schedule { kind: TimerKind, msg: String },

    #[snafu(display("Could not query '{}': {}", selector, msg))]
    Query { selector: String, msg: String },

    #[snafu(display("Could not observe removed inputs: {}", msg))]
    Observe { msg: String },

    #[snafu(display("A placeholder can only be bound to an <input>, found <{}>", tag))]
    NotAnInput { tag: String },

    #[snafu(display("Invalid placeholder configuration: {}", source))]
    Config { source: serde_json::Error },
}
