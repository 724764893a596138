mod args;
mod fetch;
mod params;
mod resolved_command;
mod serve;

pub use args::{Args, Command, parse_args};
pub use fetch::{run_fetch, run_fetch_with};
pub use params::{FetchParams, ServeParams};
pub use resolved_command::{ResolvedCommand, resolve_command};
pub use serve::run_serve;
