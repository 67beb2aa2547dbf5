// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sector-Tess CLI - triangulate every sector of a JSON map.
//!
//! Loads a map, triangulates its sectors in parallel, assigns things to
//! sectors and prints a summary. Failed sectors are reported but never make
//! the tool fail; only unreadable input or output does.
//!
//! ```text
//! sector-tess e1m1.json --output e1m1.report.json --timings
//! ```

use std::fs;

use anyhow::{Context, Result};
use sector_tess_core::MapData;
use sector_tess_geometry::TriangulationConfig;
use sector_tess_processing::{
    assign_things, load_map, process_map, MapTriangulation, ProcessingConfig, ThingPlacement,
};
use serde::Serialize;

mod args;
mod config;

use args::{Args, Command, USAGE};
use config::Config;

/// JSON report: triangulation results plus thing placement.
#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    triangulation: &'a MapTriangulation,
    things: &'a ThingPlacement,
}

fn main() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .with_target(false)
        .init();

    let args = match args::parse(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(e) => {
            eprintln!("error: {e:#}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    run(&args, &config)
}

fn run(args: &Args, config: &Config) -> Result<()> {
    if !args.sequential {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .build_global()
            .context("failed to start worker pool")?;
    }

    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let map = load_map(&json)
        .with_context(|| format!("failed to load map {}", args.input.display()))?;

    let mut triangulation = TriangulationConfig::default();
    if args.strict || config.strict_clip {
        triangulation = triangulation.strict();
    }
    let mut processing = ProcessingConfig::default()
        .with_triangulation(triangulation)
        .with_timings(args.timings || config.timings);
    if args.sequential {
        processing = processing.sequential();
    }

    tracing::info!(
        input = %args.input.display(),
        worker_threads = config.worker_threads,
        strict = args.strict || config.strict_clip,
        "Loaded map"
    );

    let result = process_map(&map, &processing);
    let placement = assign_things(&map, &result);

    print_summary(&map, &result, &placement);

    if let Some(output) = &args.output {
        let report = Report {
            triangulation: &result,
            things: &placement,
        };
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        fs::write(output, json).with_context(|| format!("failed to write {}", output.display()))?;
        tracing::info!(output = %output.display(), "Wrote report");
    }

    Ok(())
}

fn print_summary(map: &MapData, result: &MapTriangulation, placement: &ThingPlacement) {
    let stats = &result.stats;
    let bounds = map.bounds();
    println!("Map: {}", if result.map.is_empty() { "<unnamed>" } else { &result.map });
    if !bounds.is_empty() {
        println!("  Extent:       {:.0} x {:.0}", bounds.width(), bounds.height());
    }
    println!("  Sectors:      {}", stats.sectors);
    println!("  Triangulated: {}", stats.triangulated);
    println!("  Empty:        {}", stats.empty);
    println!("  Failed:       {}", stats.failed);
    println!("  Partial:      {}", stats.partial);
    println!("  Polygons:     {}", stats.polygons);
    println!("  Triangles:    {}", stats.triangles);
    println!(
        "  Things:       {} placed, {} unclaimed",
        placement.claimed_count(),
        placement.unclaimed.len()
    );
    println!("  Time:         {} ms", stats.elapsed_ms);

    for failure in &result.failures {
        let kind = if failure.overrun { "limit" } else { "data" };
        println!("  ! sector {} ({kind}): {}", failure.sector, failure.error);
    }

    if let Some(timings) = &stats.timings {
        println!("  Stage timings (ms, summed over threads):");
        println!("    trace     {:>10.3}", timings.trace_ms);
        println!("    simplify  {:>10.3}", timings.simplify_ms);
        println!("    islands   {:>10.3}", timings.islands_ms);
        println!("    cut       {:>10.3}", timings.cut_ms);
        println!("    clip      {:>10.3}", timings.clip_ms);
    }
}
