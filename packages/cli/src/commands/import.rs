use crate::commands::emit_spec;
use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use colored::Colorize;
use screenspec_importer_figma::{handle_request, FigmaAction, FigmaImportRequest, FigmaOutcome};
use screenspec_importer_html::import_markup;
use screenspec_importer_jsx::import_script;
use screenspec_schema::ScreenSpec;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(subcommand)]
    pub source: ImportSource,
}

#[derive(Subcommand, Debug)]
pub enum ImportSource {
    /// Import raw markup
    Html {
        /// Input file
        input: PathBuf,

        /// Output spec file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Import component-script source
    Jsx {
        /// Input file
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },

    /// Import a design file from its share URL
    Figma {
        /// File or design share URL
        #[arg(long)]
        url: String,

        /// Access token (falls back to $FIGMA_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Import a single frame by node id
        #[arg(long)]
        node_id: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },
}

pub fn import(args: ImportArgs) -> anyhow::Result<()> {
    match args.source {
        ImportSource::Html { input, output, pretty } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("cannot read {}", input.display()))?;
            let spec = import_markup(&source)?;
            report(&spec);
            emit_spec(&spec, output.as_deref(), pretty)
        }
        ImportSource::Jsx { input, output, pretty } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("cannot read {}", input.display()))?;
            let spec = import_script(&source)?;
            report(&spec);
            emit_spec(&spec, output.as_deref(), pretty)
        }
        ImportSource::Figma { url, token, node_id, output, pretty } => {
            let token = resolve_token(token)?;
            let request = FigmaImportRequest {
                file_url: url,
                access_token: token,
                node_id,
                action: FigmaAction::Import,
            };
            match handle_request(&request)? {
                FigmaOutcome::Spec(spec) => {
                    report(&spec);
                    emit_spec(&spec, output.as_deref(), pretty)
                }
                FigmaOutcome::Frames(_) => unreachable!("import action yields a spec"),
            }
        }
    }
}

pub(crate) fn resolve_token(token: Option<String>) -> anyhow::Result<String> {
    if let Some(token) = token {
        return Ok(token);
    }
    match std::env::var("FIGMA_TOKEN") {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => bail!("no access token: pass --token or set FIGMA_TOKEN"),
    }
}

fn report(spec: &ScreenSpec) {
    let mut count = 0usize;
    spec.tree.walk(&mut |_| count += 1);
    eprintln!(
        "{} imported {} nodes (route {})",
        "✓".green(),
        count,
        spec.route
    );

    for diagnostic in spec.validate() {
        eprintln!("  {} {}", "!".yellow(), diagnostic.message);
    }
}
