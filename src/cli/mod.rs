pub mod commands;
pub mod output;

pub use commands::{CliArgs, Commands, LocalArgs, ProfileArgs, RepoArgs, SignaturesArgs};
pub use output::{OutputFormat, OutputFormatter, StackOutput, StackStatus};
