use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Technology stack detection for hosted repositories and accounts
#[derive(Parser, Debug)]
#[command(
    name = "gitstack",
    about = "Detect the technology stack of a repository or account",
    version,
    author,
    long_about = "gitstack matches a repository's file tree and dependency manifests against \
                  a table of technology signatures. Results are cached per repository and \
                  per account; a token in GITSTACK_GITHUB_TOKEN or GITHUB_TOKEN raises the \
                  request quota."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect the stack of a hosted repository",
        long_about = "Scans one repository. A fresh cached result is shown at once; otherwise \
                      the full tree is fetched, falling back to --visible names when it is \
                      unavailable.\n\n\
                      Examples:\n  \
                      gitstack repo rust-lang/cargo\n  \
                      gitstack repo octo/app --visible Dockerfile --visible package.json\n  \
                      gitstack repo octo/app --refresh --format json"
    )]
    Repo(RepoArgs),

    #[command(
        about = "Aggregate the stack of an account",
        long_about = "Unions cached repository results with quick scans of a sample of the \
                      account's remaining repositories.\n\n\
                      Examples:\n  \
                      gitstack profile octo\n  \
                      gitstack profile octo --more"
    )]
    Profile(ProfileArgs),

    #[command(
        about = "Detect the stack of a local checkout",
        long_about = "Runs the same detection against a directory on disk, honouring \
                      .gitignore.\n\n\
                      Examples:\n  \
                      gitstack local\n  \
                      gitstack local ../service --format yaml"
    )]
    Local(LocalArgs),

    #[command(about = "List known technology signatures")]
    Signatures(SignaturesArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RepoArgs {
    #[arg(value_name = "OWNER/REPO", help = "Repository to scan")]
    pub repository: String,

    #[arg(
        long = "visible",
        value_name = "NAME",
        help = "File name visible in the repository listing, used when the tree is unavailable"
    )]
    pub visible: Vec<String>,

    #[arg(long, help = "Ignore any cached result and scan now")]
    pub refresh: bool,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,

    #[arg(long, help = "Disable the persistent result cache")]
    pub no_cache: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(value_name = "USER", help = "Account name")]
    pub user: String,

    #[arg(long, help = "Also scan the next batch of uncached repositories")]
    pub more: bool,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,

    #[arg(long, help = "Disable the persistent result cache")]
    pub no_cache: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LocalArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct SignaturesArgs {
    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
