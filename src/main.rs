use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use niche_parser::{dataset, parse_dataset, OutputDocument};

const USAGE: &str = "usage: niche_parser <niche.json> <output.json>";

#[derive(Parser)]
#[command(name = "niche_parser", about = "Normalize scraped Niche data into ranking records")]
struct Cli {
    /// Scraper export (`schools`, optionally `pages`)
    input: PathBuf,
    /// Where to write the normalized JSON
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let Ok(cli) = Cli::try_parse() else {
        println!("{USAGE}");
        return ExitCode::from(1);
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let t0 = Instant::now();

    let raw = dataset::load(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;

    let pb = ProgressBar::new(raw.schools.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );
    let document = parse_dataset(&raw, |n| pb.inc(n as u64));
    pb.finish_and_clear();
    let document = document.context("Failed to parse schools")?;

    dataset::write(&cli.output, &document)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    match &document {
        OutputDocument::Full {
            schools,
            majors,
            rankings,
            major_rankings,
        } => println!(
            "Wrote {} schools, {} rankings, {} major rankings, {} majors in {:.1}s",
            schools.len(),
            rankings.len(),
            major_rankings.len(),
            majors.len(),
            t0.elapsed().as_secs_f64()
        ),
        OutputDocument::Reduced(schools) => println!(
            "Wrote {} schools in {:.1}s",
            schools.len(),
            t0.elapsed().as_secs_f64()
        ),
    }
    Ok(())
}
