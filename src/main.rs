mod cli;
mod config;
mod error;
mod faq;

use std::io;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use eyre::{Result, WrapErr};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::ChatContext;
use crate::config::KnowledgeBaseSource;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    chat: ChatArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a customer-service chat session
    Chat(ChatArgs),
}

#[derive(Args, Clone, Default)]
struct ChatArgs {
    /// Ask a single question and exit
    #[arg(short, long)]
    input: Option<String>,

    /// Knowledge base JSON file (falls back to $AGRI_FAQ_KB, then the config directory)
    #[arg(short, long, value_name = "PATH")]
    knowledge_base: Option<String>,

    /// Print the transcript as JSON (with --input)
    #[arg(long, requires = "input")]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let args = match cli.command {
        Some(Commands::Chat(args)) => args,
        None => cli.chat,
    };

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("Failed to set tracing subscriber")?;

    info!("Starting agri FAQ chat");

    let source = KnowledgeBaseSource::resolve(args.knowledge_base.as_deref());
    let interactive = args.input.is_none();

    let mut chat_context = ChatContext::new(
        Box::new(io::stdout()),
        args.input,
        interactive,
        args.json,
        source,
    );
    chat_context.run()
}
