use anyhow::Context;
use clap::Args;
use colored::Colorize;
use screenspec_schema::{Node, ScreenSpec};
use screenspec_tokens::{effective_style, resolve_style, TokenTable};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Screen Spec JSON file
    pub spec: PathBuf,

    /// Token table JSON file
    pub table: PathBuf,

    /// Breakpoint to resolve under
    #[arg(short, long, default_value = "base")]
    pub breakpoint: String,
}

/// Walk the tree and print the fully resolved style of every styled node,
/// the way the renderer would see it under the chosen breakpoint.
pub fn resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let spec_source = std::fs::read_to_string(&args.spec)
        .with_context(|| format!("cannot read {}", args.spec.display()))?;
    let spec = ScreenSpec::from_json_str(&spec_source)?;

    let table_source = std::fs::read_to_string(&args.table)
        .with_context(|| format!("cannot read {}", args.table.display()))?;
    let table = TokenTable::from_json_str(&table_source)?;

    println!(
        "{} (breakpoint: {})",
        spec.route.bold(),
        args.breakpoint.cyan()
    );

    print_node(&spec.tree, &table, &args.breakpoint, 0);
    Ok(())
}

fn print_node(node: &Node, table: &TokenTable, breakpoint: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{} {}", node.kind.as_str().bold(), node.id.dimmed());

    let style = effective_style(node, breakpoint);
    if !style.is_empty() {
        for (name, value) in resolve_style(&style, table) {
            println!("{indent}  {name}: {value}");
        }
    }

    for child in &node.children {
        print_node(child, table, breakpoint, depth + 1);
    }
}
