use crate::commands::import::resolve_token;
use clap::Args;
use colored::Colorize;
use screenspec_importer_figma::{handle_request, FigmaAction, FigmaImportRequest, FigmaOutcome};

#[derive(Args, Debug)]
pub struct FramesArgs {
    /// File or design share URL
    #[arg(long)]
    pub url: String,

    /// Access token (falls back to $FIGMA_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn frames(args: FramesArgs) -> anyhow::Result<()> {
    let token = resolve_token(args.token)?;
    let request = FigmaImportRequest {
        file_url: args.url,
        access_token: token,
        node_id: None,
        action: FigmaAction::ListFrames,
    };

    let frames = match handle_request(&request)? {
        FigmaOutcome::Frames(frames) => frames,
        FigmaOutcome::Spec(_) => unreachable!("list-frames action yields frames"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&frames)?);
        return Ok(());
    }

    if frames.is_empty() {
        println!("No top-level frames found");
        return Ok(());
    }

    for frame in frames {
        println!("{}  {}  {}", frame.id.cyan(), frame.name.bold(), frame.page.dimmed());
    }

    Ok(())
}
