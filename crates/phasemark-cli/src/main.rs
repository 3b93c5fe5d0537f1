//! Command-line driver for Phasemark.
//!
//! Wires the CSV loader, the fingerprint pipeline, and the export/plot
//! sinks into the workflows used during measurement campaigns.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use plotters::style::RGBColor;

use phasemark_core::{Error, PhaseInput, Result};
use phasemark_fingerprint::pipeline::{normalize_to_first, FingerprintPipeline};
use phasemark_fingerprint::stats;
use phasemark_io::{
    format_means, load_phase_csv, plot_summaries, plot_summary, write_mean_csv, SummarySeries,
    DEFAULT_COLORS,
};

#[derive(Parser)]
#[command(
    name = "phasemark",
    about = "Extract device phase fingerprints from CSI phase captures",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a capture into a mean/std fingerprint
    Summary {
        /// Comma-delimited phase capture (rows = frames)
        #[arg(short, long)]
        input: PathBuf,

        /// Extract over the STF subcarrier subset instead of the full
        /// waveform
        #[arg(long)]
        stf: bool,

        /// Write the mean vector to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render an error-bar plot to this PNG
        #[arg(short, long)]
        plot: Option<PathBuf>,

        /// Legend label for the plot
        #[arg(short, long, default_value = "fingerprint")]
        label: String,

        /// Plot color as R,G,B (0-255 each)
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Mean fingerprint per consecutive window of measurements
    Windowed {
        #[arg(short, long)]
        input: PathBuf,

        /// Measurements per window
        #[arg(short, long, default_value_t = 100)]
        window: usize,

        /// Number of windows to emit
        #[arg(short = 'n', long, default_value_t = 1)]
        iterations: usize,

        /// Write window means here, one line per window (stdout if absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split a mixed two-device capture and summarize each group
    TwoDevice {
        #[arg(short, long)]
        input: PathBuf,

        /// Render both group fingerprints onto this PNG
        #[arg(short, long)]
        plot: Option<PathBuf>,
    },

    /// Mean absolute error between two exported fingerprints
    Compare {
        /// Reference fingerprint (single-line CSV)
        #[arg(short, long)]
        reference: PathBuf,

        /// Candidate fingerprint (single-line CSV)
        #[arg(short, long)]
        candidate: PathBuf,
    },

    /// Normalize a single phase vector against its first sample
    Normalize {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let pipeline = FingerprintPipeline::new();

    match cli.command {
        Command::Summary {
            input,
            stf,
            output,
            plot,
            label,
            color,
        } => {
            let batch = load_phase_csv(&input)?.into_batch();
            let summary = if stf {
                pipeline.extract_summary_stf(batch)?
            } else {
                pipeline.extract_summary(batch)?
            };
            println!("{}", format_means(&summary.mean));

            if let Some(path) = output {
                write_mean_csv(path, &summary.mean)?;
            }
            if let Some(path) = plot {
                let color = color.as_deref().map(parse_color).transpose()?;
                plot_summary(path, &summary, &label, color)?;
            }
        }

        Command::Windowed {
            input,
            window,
            iterations,
            output,
        } => {
            let batch = load_phase_csv(&input)?.into_batch();
            let means = pipeline.extract_windowed(batch, window, iterations)?;
            let lines: Vec<String> = means.iter().map(format_means).collect();
            match output {
                Some(path) => std::fs::write(path, lines.join("\n"))?,
                None => {
                    for line in lines {
                        println!("{}", line);
                    }
                }
            }
        }

        Command::TwoDevice { input, plot } => {
            let batch = load_phase_csv(&input)?.into_batch();
            let (summary1, summary2) = pipeline.extract_two_device(batch)?;
            println!("group 1: {}", format_means(&summary1.mean));
            println!("group 2: {}", format_means(&summary2.mean));

            if let Some(path) = plot {
                let series = [
                    SummarySeries {
                        label: "group 1",
                        summary: &summary1,
                        color: DEFAULT_COLORS[0],
                    },
                    SummarySeries {
                        label: "group 2",
                        summary: &summary2,
                        color: DEFAULT_COLORS[1],
                    },
                ];
                plot_summaries(path, &series)?;
            }
        }

        Command::Compare {
            reference,
            candidate,
        } => {
            let reference = load_single(&reference)?;
            let candidate = load_single(&candidate)?;
            let mae = stats::mean_absolute_error(reference.view(), candidate.view())?;
            println!("{:.4}", mae);
        }

        Command::Normalize { input, output } => {
            let vector = load_single(&input)?;
            write_mean_csv(output, &normalize_to_first(&vector))?;
        }
    }

    Ok(())
}

fn load_single(path: &Path) -> Result<phasemark_core::PhaseVector> {
    match load_phase_csv(path)? {
        PhaseInput::Single(v) => Ok(v),
        PhaseInput::Batch(_) => Err(Error::InvalidInput(format!(
            "{}: expected a single-line phase file",
            path.display()
        ))),
    }
}

fn parse_color(raw: &str) -> Result<RGBColor> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 3 {
        return Err(Error::InvalidInput(format!(
            "color must be R,G,B with three components, got '{}'",
            raw
        )));
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(parts.iter()) {
        *slot = part.trim().parse().map_err(|_| {
            Error::InvalidInput(format!("invalid color component '{}'", part.trim()))
        })?;
    }
    Ok(RGBColor(rgb[0], rgb[1], rgb[2]))
}
