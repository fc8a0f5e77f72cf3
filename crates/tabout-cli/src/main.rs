use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tabout_core::{
    MathDetector, MathRegion, Navigator, Selection, StringBuffer, TaboutConfig, TextBuffer,
};

#[derive(Parser)]
#[command(name = "tabout")]
#[command(about = "Delimiter-aware cursor navigation in LaTeX math", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Jump past the next closing delimiter, or out of the math region
    Forward(Target),
    /// Jump before the previous opening delimiter, or out of the math region
    Reverse(Target),
    /// Simulate typing a closing bracket at the cursor
    Trigger {
        #[command(flatten)]
        target: Target,
        /// The typed character
        #[arg(long)]
        key: char,
    },
}

#[derive(Args)]
struct Target {
    /// Path to the Markdown/LaTeX document
    #[arg(value_name = "FILE")]
    path: PathBuf,
    /// Cursor byte offset
    #[arg(long)]
    offset: usize,
    /// Selection anchor, if the selection is not empty
    #[arg(long)]
    anchor: Option<usize>,
    /// JSON file overriding the token lists
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write the edited document back to FILE
    #[arg(long)]
    write: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Report {
    handled: bool,
    cursor: usize,
    text_changed: bool,
    region: Option<MathRegion>,
}

enum Action {
    Forward,
    Reverse,
    Trigger(char),
}

fn load_navigator(config: Option<&Path>) -> anyhow::Result<Navigator> {
    match config {
        Some(path) => {
            let config = TaboutConfig::from_path(path)?;
            Ok(Navigator::from_config(&config)?)
        }
        None => Ok(Navigator::default()),
    }
}

fn run(target: &Target, action: Action) -> anyhow::Result<Report> {
    let text = fs::read_to_string(&target.path)
        .with_context(|| format!("failed to read {}", target.path.display()))?;
    if target.offset > text.len() {
        bail!(
            "offset {} is past the end of {} ({} bytes)",
            target.offset,
            target.path.display(),
            text.len()
        );
    }

    let navigator = load_navigator(target.config.as_deref())?;
    let selection = Selection {
        anchor: target.anchor.unwrap_or(target.offset),
        head: target.offset,
    };
    let mut buffer = StringBuffer::with_selection(text.clone(), selection);
    let context = MathDetector::new(buffer.text(), buffer.cursor());

    let handled = match action {
        Action::Forward => navigator.tabout(&mut buffer, &context),
        Action::Reverse => navigator.reverse_tabout(&mut buffer, &context),
        Action::Trigger(key) => navigator.close_bracket(&mut buffer, &context, key),
    };
    log::info!("handled: {}, cursor: {}", handled, buffer.cursor());

    let text_changed = buffer.text() != text;
    if target.write && text_changed {
        fs::write(&target.path, buffer.text())
            .with_context(|| format!("failed to write {}", target.path.display()))?;
    }

    Ok(Report {
        handled,
        cursor: buffer.cursor(),
        text_changed,
        region: context.region(),
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let report = match &cli.command {
        Commands::Forward(target) => run(target, Action::Forward)?,
        Commands::Reverse(target) => run(target, Action::Reverse)?,
        Commands::Trigger { target, key } => run(target, Action::Trigger(*key))?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(path: &Path, offset: usize) -> Target {
        Target {
            path: path.to_path_buf(),
            offset,
            anchor: None,
            config: None,
            write: false,
        }
    }

    #[test]
    fn test_forward_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "$(a) + b$").unwrap();

        let report = run(&target(&path, 2), Action::Forward).unwrap();
        assert_eq!(
            report,
            Report {
                handled: true,
                cursor: 4,
                text_changed: false,
                region: Some(MathRegion::inline(1, 8)),
            }
        );
    }

    #[test]
    fn test_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "x $y$").unwrap();

        let inside = run(&target(&path, 4), Action::Forward).unwrap();
        assert_eq!(
            serde_json::to_value(&inside).unwrap(),
            serde_json::json!({
                "handled": true,
                "cursor": 5,
                "text_changed": false,
                "region": { "start": 3, "end": 4, "inline": true, "code_fenced": false }
            })
        );

        let outside = run(&target(&path, 0), Action::Forward).unwrap();
        assert_eq!(serde_json::to_value(&outside).unwrap()["region"], serde_json::Value::Null);
    }

    #[test]
    fn test_block_exit_writes_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "$$\nx  \n$$").unwrap();

        let mut target = target(&path, 4);
        target.write = true;
        let report = run(&target, Action::Forward).unwrap();
        assert!(report.handled);
        assert!(report.text_changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "$$\nx\n$$\n");
    }

    #[test]
    fn test_trigger_with_selection_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "$(a)$").unwrap();

        let mut target = target(&path, 3);
        target.anchor = Some(2);
        let report = run(&target, Action::Trigger(')')).unwrap();
        assert!(!report.handled);
        assert_eq!(report.cursor, 3);
    }

    #[test]
    fn test_offset_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "$x$").unwrap();

        let err = run(&target(&path, 10), Action::Reverse).unwrap_err();
        assert!(err.to_string().contains("past the end"));
    }

    #[test]
    fn test_bad_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        let config = dir.path().join("tabout.json");
        fs::write(&path, "$x$").unwrap();
        fs::write(&config, r#"{ "delimiters": 3 }"#).unwrap();

        let mut target = target(&path, 1);
        target.config = Some(config);
        assert!(run(&target, Action::Forward).is_err());
    }
}
