// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs::File;
use std::io::Write;
use std::result::Result as StdResult;

use pico_args::Arguments;

use sankey_engine::io::load_records;
use sankey_engine::{
    AggregationMode, LayoutConfig, Palette, Taxonomy, build_diagram, coverage_summary,
};

const VERSION: &str = "1.0";
const EXIT_FAILURE: i32 = 1;

macro_rules! die(
    ($($arg:tt)*) => { {
        eprintln!($($arg)*);
        std::process::exit(EXIT_FAILURE)
    } }
);

fn usage() -> ! {
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| "sankey".to_string());
    die!(
        concat!(
            "sankey {}: build category flow diagrams from tabular data.\n\
         \n\
         USAGE:\n",
            "    {} [SUBCOMMAND] [OPTION...] PATH\n",
            "\n\
         OPTIONS:\n",
            "    -h, --help            show this message\n",
            "    --proportional        split each row's weight across its active topics\n",
            "    --exclude CATEGORY    drop a primary category (may be repeated)\n",
            "    --primary-column NAME primary-category column name (default: category)\n",
            "    --output FILE         path to write the graph JSON\n",
            "\n\
         SUBCOMMANDS:\n",
            "    build            Build the flow graph and print it as JSON\n",
            "    summary          Print per-broad-category coverage counts\n",
        ),
        VERSION,
        argv0
    );
}

#[derive(Clone, Default, Debug)]
struct Args {
    path: Option<String>,
    output: Option<String>,
    primary_column: String,
    exclude: Vec<String>,
    is_proportional: bool,
    is_summary: bool,
}

fn parse_args() -> StdResult<Args, Box<dyn std::error::Error>> {
    let mut parsed = Arguments::from_env();
    if parsed.contains(["-h", "--help"]) {
        usage();
    }

    let subcommand = parsed.subcommand()?;
    if subcommand.is_none() {
        eprintln!("error: subcommand required");
        usage();
    }

    let mut args = Args {
        primary_column: "category".to_string(),
        ..Args::default()
    };

    let subcommand = subcommand.unwrap();
    if subcommand == "build" {
    } else if subcommand == "summary" {
        args.is_summary = true;
    } else {
        eprintln!("error: unknown subcommand {}", subcommand);
        usage();
    }

    args.is_proportional = parsed.contains("--proportional");
    args.exclude = parsed.values_from_str("--exclude")?;
    if let Ok(column) = parsed.value_from_str("--primary-column") {
        args.primary_column = column;
    }
    args.output = parsed.value_from_str("--output").ok();

    let free_arguments = parsed.finish();
    if free_arguments.is_empty() {
        eprintln!("error: input path required");
        usage();
    }
    args.path = free_arguments[0].to_str().map(|s| s.to_owned());

    Ok(args)
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            usage();
        }
    };

    let path = match &args.path {
        Some(path) => path.clone(),
        None => {
            eprintln!("error: a dataset PATH is required");
            usage();
        }
    };

    let taxonomy = Taxonomy::standard();
    let records = match load_records(&path, &args.primary_column, taxonomy) {
        Ok(records) => records,
        Err(err) => die!("error loading {}: {}", path, err),
    };

    let excluded = args.exclude.clone();
    let exclude = |category: &str| excluded.iter().any(|c| c == category);
    let exclusion = if excluded.is_empty() {
        None
    } else {
        Some(&exclude as &dyn Fn(&str) -> bool)
    };

    if args.is_summary {
        let summary = coverage_summary(&records, taxonomy, exclusion);
        for (broad, count) in &summary.by_broad {
            println!("Entities with {broad} content: {count}");
        }
        println!("Entities with at least one topic: {}", summary.with_any);
        let pct = if summary.total > 0 {
            100.0 * summary.with_none as f64 / summary.total as f64
        } else {
            0.0
        };
        println!(
            "Entities with no topic: {} ({:.1}%)",
            summary.with_none, pct
        );
        println!("Total entities: {}", summary.total);
        return;
    }

    let mode = if args.is_proportional {
        AggregationMode::Proportional
    } else {
        AggregationMode::Binary
    };
    let graph = build_diagram(
        &records,
        taxonomy,
        Palette::standard(),
        &LayoutConfig::default(),
        mode,
        exclusion,
    );

    let json = match graph.to_json() {
        Ok(json) => json,
        Err(err) => die!("error serializing graph: {}", err),
    };

    match &args.output {
        Some(output) => {
            let mut file = match File::create(output) {
                Ok(file) => file,
                Err(err) => die!("error creating {}: {}", output, err),
            };
            if let Err(err) = file.write_all(json.as_bytes()) {
                die!("error writing {}: {}", output, err);
            }
        }
        None => println!("{json}"),
    }
}
