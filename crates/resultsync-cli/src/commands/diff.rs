//! Diff command
//!
//! Usage: resultsync diff <OLD> <NEW> [--format human|json] [--verify]

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use resultsync_core::{
    compute_edit_script, render_human_summary, verify_replay, ComparatorChain, SnapshotBuilder,
};

use crate::commands::load_config;
use crate::store::read_records;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown summary
    Human,
    /// Edit script as JSON
    Json,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Record file with the previous result set
    pub old: PathBuf,

    /// Record file with the current result set
    pub new: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Replay the script over OLD and check it reproduces NEW
    #[arg(long)]
    pub verify: bool,

    /// Order sections by name instead of first appearance
    #[arg(long)]
    pub sort_sections: bool,

    /// Controller configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    load_config(args.config.as_deref())?;

    let section_order = args.sort_sections.then(ComparatorChain::<String>::natural);
    let build = |path: &PathBuf| -> Result<_, Box<dyn std::error::Error>> {
        let mut builder = SnapshotBuilder::new();
        if let Some(chain) = &section_order {
            builder = builder.with_section_order(chain.clone());
        }
        builder.extend(read_records(path)?);
        let build = builder.finish();
        if !build.dropped.is_empty() {
            eprintln!(
                "warning: {} dropped {} duplicate record(s)",
                path.display(),
                build.dropped.len()
            );
        }
        Ok(build)
    };
    let old = build(&args.old)?;
    let new = build(&args.new)?;

    let script = compute_edit_script(&old.snapshot, &new.snapshot, &new.changed);

    if args.verify {
        verify_replay(&old.snapshot, &script, &new.snapshot)?;
        eprintln!("✓ Replay verified ({} edits)", script.len());
    }

    let rendered = match args.format {
        OutputFormat::Human => render_human_summary(&script),
        OutputFormat::Json => serde_json::to_string_pretty(&script)? + "\n",
    };

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)?;
        println!("✓ Written to {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}
