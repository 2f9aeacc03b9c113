//! One module per subcommand.  Each exposes an `execute` function taking the
//! parsed arguments and returning a [`crate::error::CliResult`].

pub mod check;
pub mod completions;
pub mod config;
pub mod lookup;
pub mod presets;
