mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{frames, import, resolve, tokens, FramesArgs, ImportArgs, ResolveArgs, TokensArgs};

/// Screenspec CLI - design import and token tooling
#[derive(Parser, Debug)]
#[command(name = "screenspec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import an external design source into a Screen Spec
    Import(ImportArgs),

    /// List the top-level frames of a design file
    Frames(FramesArgs),

    /// Dump the tokens available for a style category
    Tokens(TokensArgs),

    /// Print resolved effective styles for every node of a spec
    Resolve(ResolveArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Import(args) => import(args),
        Command::Frames(args) => frames(args),
        Command::Tokens(args) => tokens(args),
        Command::Resolve(args) => resolve(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
