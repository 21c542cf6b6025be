mod frames;
mod import;
mod resolve;
mod tokens;

pub use frames::{frames, FramesArgs};
pub use import::{import, ImportArgs};
pub use resolve::{resolve, ResolveArgs};
pub use tokens::{tokens, TokensArgs};

use anyhow::Context;
use screenspec_schema::ScreenSpec;
use std::path::Path;

/// Write a spec to a file or stdout.
pub(crate) fn emit_spec(spec: &ScreenSpec, output: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        spec.to_json_string_pretty()
    } else {
        spec.to_json_string()
    };

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
