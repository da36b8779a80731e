use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "weft",
    about = "weft — reconstruct agent session transcripts from their object stores",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List sessions under a chats root directory
    Sessions(SessionsArgs),
    /// Reconstruct and print one session's transcript
    Show(ShowArgs),
}

#[derive(Args)]
pub struct SessionsArgs {
    /// Directory whose children are session directories
    pub root: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Directory whose children are session directories
    pub root: String,
    /// Session directory name
    pub session: String,
    /// Print at most this many messages (0 = all)
    #[arg(short = 'n', long, default_value = "0")]
    pub limit: usize,
}
