use anyhow::Context;
use clap::Args;
use colored::Colorize;
use screenspec_tokens::{tokens_for_category, TokenTable};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TokensArgs {
    /// Token table JSON file
    pub table: PathBuf,

    /// Style category ("color", "spacing", "typography.fontSize", ...)
    #[arg(short, long)]
    pub category: String,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn tokens(args: TokensArgs) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.table)
        .with_context(|| format!("cannot read {}", args.table.display()))?;
    let table = TokenTable::from_json_str(&source)?;

    let entries = tokens_for_category(&args.category, &table);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No tokens under '{}'", args.category);
        return Ok(());
    }

    for entry in entries {
        println!("{}  {}  {}", entry.reference.cyan(), entry.value, entry.name.dimmed());
    }

    Ok(())
}
