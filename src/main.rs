use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use clipsift::clipper::FfmpegEncoder;
use clipsift::config::{self, HighlightConfig};
use clipsift::pipeline;

#[derive(Parser)]
#[command(name = "clipsift")]
#[command(about = "Keyword highlight clip extractor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract highlight clips from a video
    Run {
        /// Input video file
        input: PathBuf,

        /// Configuration profile or file path
        #[arg(short, long)]
        profile: Option<String>,

        /// Transcript JSON path (overrides the profile)
        #[arg(short, long)]
        transcript: Option<PathBuf>,

        /// Output directory for clips (overrides the profile)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the active keyword list
    Keywords {
        /// Configuration profile or file path
        #[arg(short, long)]
        profile: Option<String>,
    },
}

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

fn load_config(profile: Option<&str>) -> anyhow::Result<HighlightConfig> {
    match profile {
        Some(p) => {
            let conf_path = config::resolve_profile_path(p)?;
            config::load_profile(&conf_path).context("Failed to load profile")
        }
        None => Ok(HighlightConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            profile,
            transcript,
            output,
        } => {
            let mut config = load_config(profile.as_deref())?;
            if let Some(t) = transcript {
                config.transcript_path = t;
            }
            if let Some(o) = output {
                config.output_dir = o;
            }

            let input_path = input.canonicalize().context("Failed to find input file")?;

            println!("Extracting highlights...");

            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(PROGRESS_TEMPLATE)
                    .unwrap()
                    .progress_chars("#>-"),
            );

            let report = pipeline::run_extraction(&input_path, &config, &FfmpegEncoder, &pb)
                .context("Extraction failed")?;
            pb.finish_with_message("Extraction complete");

            for clip in &report.clips {
                println!("Saved clip to {:?}", clip);
            }
            println!(
                "Created {} smart clip(s) from {} match(es).",
                report.clips.len(),
                report.matched
            );
        }
        Commands::Keywords { profile } => {
            let config = load_config(profile.as_deref())?;
            for keyword in &config.keywords {
                println!("{keyword}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::PROGRESS_TEMPLATE;
    use indicatif::ProgressStyle;

    #[test]
    fn progress_template_renders_the_finish_message() {
        assert!(PROGRESS_TEMPLATE.contains("{msg}"));
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap();
    }
}
