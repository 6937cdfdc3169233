mod parser;
mod registry;

pub use parser::{parse_command, BoothCommand};
pub use registry::BOOTH_HELP_COMMANDS;
