//! Sync command
//!
//! Usage: resultsync sync <FILE>... [--json]
//!
//! Feeds each record file to a controller as one fetch and prints the
//! delegate callbacks of every cycle.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use resultsync_core::{
    ChangeType, CycleReport, DelegateEvent, RecordingDelegate, ResultsController,
};

use crate::commands::load_config;
use crate::store::JsonFileStore;

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Record files, one per cycle, oldest first
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print cycles as JSON
    #[arg(long)]
    pub json: bool,

    /// Controller configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CycleOutput {
    report: CycleReport,
    events: Vec<DelegateEvent<String, String>>,
}

/// Execute sync command
pub fn execute(args: SyncArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;

    let recorder: RecordingDelegate<String, String> = RecordingDelegate::new();
    let store = JsonFileStore::new(args.files);
    let mut controller = ResultsController::new(store, recorder.clone(), config);

    let mut cycles = Vec::new();
    while controller.store().remaining() > 0 {
        for report in controller.perform_fetch()? {
            cycles.push(CycleOutput {
                report,
                events: recorder.take(),
            });
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cycles)?);
        return Ok(());
    }

    for (n, cycle) in cycles.iter().enumerate() {
        println!(
            "cycle {}: {} section(s), {} object(s), {} edit(s)",
            n + 1,
            cycle.report.sections,
            cycle.report.objects,
            cycle.report.counts.section_edits() + cycle.report.counts.object_edits()
        );
        for event in &cycle.events {
            match event {
                DelegateEvent::Section { section, change } => {
                    println!("  section {} {}", section, describe(change));
                }
                DelegateEvent::Object { object, change } => {
                    println!("  object {} {}", object, describe(change));
                }
                DelegateEvent::WillChangeContent | DelegateEvent::DidChangeContent => {}
            }
        }
    }

    Ok(())
}

fn describe(change: &ChangeType) -> String {
    match change {
        ChangeType::Delete { at } => format!("delete {}", at),
        ChangeType::Insert { at } => format!("insert {}", at),
        ChangeType::Move {
            from,
            to,
            content_changed,
        } => {
            if *content_changed {
                format!("move {} -> {} (changed)", from, to)
            } else {
                format!("move {} -> {}", from, to)
            }
        }
        ChangeType::Update { at, .. } => format!("update {}", at),
    }
}
