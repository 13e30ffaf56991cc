mod args;

pub use args::{Args, LogLevel};

use std::path::PathBuf;

use anyhow::Context;
use console::style;

use crate::aggregate::{aggregate_tree, AggregateConfig};
use crate::filelist::is_markdown;
use crate::report::{Level, Reporter};

/// Execute one aggregation run from parsed arguments. Returns the process
/// exit code: 0 on success, 1 on any handled failure.
pub fn run(args: Args) -> i32 {
    let config = config_from_args(&args);
    let mut reporter = Reporter::new();
    let result = aggregate_tree(&config, &mut reporter)
        .with_context(|| format!("failed to aggregate {}", config.root.display()));

    let min_level: Level = args.log_level.into();
    for event in reporter.events_at_least(min_level) {
        let tag = match event.level {
            Level::Error => style(event.level.to_string()).red().bold(),
            Level::Warn => style(event.level.to_string()).yellow(),
            _ => style(event.level.to_string()).dim(),
        };
        eprintln!("{} {}", tag, event.message);
    }

    match result {
        Ok(merged) => {
            if args.output.is_none() {
                print!("{}", merged);
            }
            0
        }
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            1
        }
    }
}

fn config_from_args(args: &Args) -> AggregateConfig {
    let mut config = AggregateConfig::new(&args.root);

    // A .md file as root aggregates just that file, rooted at its parent.
    if args.root.is_file() && is_markdown(&args.root) {
        config.direct_files = vec![args.root.clone()];
        config.root = match args.root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
    }

    config.manifest = args.manifest.clone();
    config.ignore = args.ignore.clone();
    config.hybrid_mode = args.hybrid_mode;
    config.output = args.output.clone();

    config.options.strip_frontmatter = args.strip_frontmatter;
    config.options.process_includes = args.process_includes;
    config.options.include_toc = args.toc;
    config.options.auto_file_title = !args.no_auto_file_title;
    config.options.separator = if args.no_separator {
        String::new()
    } else {
        args.separator.clone()
    };

    config
}
