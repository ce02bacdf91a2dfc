use anyhow::{Context, Result};
use clap::Parser;
use solicitation_splitter::config::Config;
use solicitation_splitter::{OutputStore, Pipeline, ReopenPolicy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "solicitation_splitter")]
#[command(about = "Split solicitation PDFs into per-section fillable documents")]
#[command(version)]
struct Cli {
    /// PDF files, or directories searched for PDF files
    #[arg(required_unless_present = "locate")]
    inputs: Vec<PathBuf>,

    /// Directory processed documents are written to [default: ./processed]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Write a JSON manifest of every processed input
    #[arg(short, long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Keep collecting pages when a section header appears again
    #[arg(long = "append-reopened")]
    append_reopened: bool,

    /// Print the path of a previously written output and exit
    #[arg(long, value_name = "NAME")]
    locate: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = Config::new()?;
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    config.manifest_path = cli.manifest;
    if cli.append_reopened {
        config.reopen_policy = ReopenPolicy::Append;
    }

    let pipeline = Pipeline::new(OutputStore::new(&config.output_dir))
        .with_reopen_policy(config.reopen_policy);

    if let Some(name) = cli.locate {
        match pipeline.store().locate(&name) {
            Ok(path) => {
                println!("{}", path.display());
                return Ok(());
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }

    let inputs = config.collect_input_paths(&cli.inputs)?;
    let mut reports = Vec::with_capacity(inputs.len());
    let mut failed = 0usize;

    for input in &inputs {
        match pipeline.run(input) {
            Ok(report) if !report.outputs.is_empty() => {
                for name in report.file_names() {
                    println!("{}", name);
                }
                reports.push(report);
            }
            Ok(_) => {
                log::error!("{} produced no output documents", input.display());
                failed += 1;
            }
            Err(e) => {
                log::error!("Processing {} failed: {}", input.display(), e);
                failed += 1;
            }
        }
    }

    if let Some(manifest_path) = &config.manifest_path {
        std::fs::write(manifest_path, serde_json::to_string_pretty(&reports)?)
            .with_context(|| format!("Failed to write manifest to {}", manifest_path.display()))?;
    }

    if failed > 0 {
        eprintln!("{} of {} input(s) produced no output", failed, inputs.len());
        std::process::exit(1);
    }
    Ok(())
}
