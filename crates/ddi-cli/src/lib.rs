//! Library components of the `ddi` command-line tool.

pub mod logging;
pub mod request;
