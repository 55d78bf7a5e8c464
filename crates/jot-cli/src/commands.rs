use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use jot_annotate::{Annotator, DocumentNode};
use jot_diff::{DiffKind, DiffStrategy, LineDiff};
use jot_history::{HistoryReader, HistoryWriter, InMemoryHistory};
use serde_json::json;

use crate::cli::*;
use crate::config::JotConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = JotConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &config, &cli.format),
        Command::Annotate(args) => cmd_annotate(args, &config, &cli.format),
        Command::History(args) => cmd_history(args, &config, &cli.format),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn strategy_for(arg: Option<StrategyArg>, config: &JotConfig) -> DiffStrategy {
    arg.map(DiffStrategy::from).unwrap_or(config.diff.strategy)
}

fn cmd_diff(args: DiffArgs, config: &JotConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let old = read_text(&args.old)?;
    let new = read_text(&args.new)?;
    let diff = LineDiff::between(&old, &new, strategy_for(args.strategy, config));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => {
            println!("{} {}", "---".red(), args.old.display());
            println!("{} {}", "+++".green(), args.new.display());
            for line in render_diff(&diff, args.all || config.diff.show_unchanged) {
                println!("{line}");
            }
            println!("{}", summary(&diff).dimmed());
        }
    }
    Ok(())
}

fn cmd_annotate(args: AnnotateArgs, config: &JotConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let raw = read_text(&args.tree)?;
    let tree: DocumentNode = serde_json::from_str(&raw)
        .with_context(|| format!("parsing document tree {}", args.tree.display()))?;
    let annotated = Annotator::new(&config.annotate).annotate(tree);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&annotated)?),
        OutputFormat::Text => {
            for line in render_outline(&annotated) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn cmd_history(args: HistoryArgs, config: &JotConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let history = InMemoryHistory::new();
    for path in &args.revisions {
        history.append(&args.name, &read_text(path)?)?;
    }
    let strategy = strategy_for(args.strategy, config);

    let revisions = history.revisions(&args.name)?;
    let deltas = history.deltas_with(&args.name, strategy)?;

    let mut entries = Vec::new();
    for (revision, delta) in revisions.into_iter().zip(deltas) {
        match format {
            OutputFormat::Json => entries.push(json!({
                "index": revision.index,
                "saved_at": revision.saved_at,
                "additions": delta.additions(),
                "deletions": delta.deletions(),
                "ops": delta.ops,
            })),
            OutputFormat::Text => {
                println!(
                    "{} {}  {}",
                    format!("r{}", revision.index).yellow().bold(),
                    args.name.bold(),
                    summary(&delta).dimmed()
                );
                for line in render_diff(&delta, config.diff.show_unchanged) {
                    println!("  {line}");
                }
            }
        }
    }

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }
    Ok(())
}

/// One printable line per op; unchanged ops only when `show_unchanged`.
fn render_diff(diff: &LineDiff, show_unchanged: bool) -> Vec<String> {
    diff.ops
        .iter()
        .filter(|op| show_unchanged || op.kind != DiffKind::Unchanged)
        .map(|op| {
            let line = op.to_string();
            match op.kind {
                DiffKind::Added => line.green().to_string(),
                DiffKind::Removed => line.red().to_string(),
                DiffKind::Unchanged => line.dimmed().to_string(),
            }
        })
        .collect()
}

fn summary(diff: &LineDiff) -> String {
    format!("{} additions, {} deletions", diff.additions(), diff.deletions())
}

/// Indented outline of a document tree.
fn render_outline(node: &DocumentNode) -> Vec<String> {
    fn walk(node: &DocumentNode, depth: usize, out: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match node {
            DocumentNode::Text { value } => out.push(format!("{indent}{value:?}")),
            DocumentNode::Element { tag, children } => {
                let tag = match tag.as_str() {
                    "mark" | "sup" | "sub" => tag.cyan().to_string(),
                    _ => tag.to_string(),
                };
                out.push(format!("{indent}<{tag}>"));
                for child in children {
                    walk(child, depth + 1, out);
                }
            }
        }
    }

    let mut out = Vec::new();
    walk(node, 0, &mut out);
    out
}
