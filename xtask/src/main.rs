use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;
use std::process::Command;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Parse the integration fixtures and report their fragment counts
    Fixtures {
        /// Directory holding the fixture sprites
        #[arg(long, default_value = "crates/svgsmith/tests/fixtures")]
        dir: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::Fixtures { dir } => audit_fixtures(Path::new(&dir))?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn audit_fixtures(dir: &Path) -> Result<()> {
    let mut seen = 0usize;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if !file_name.ends_with(".svg") {
            continue;
        }
        let markup = fs::read_to_string(entry.path())?;
        match svgsmith::app::extract::extract(file_name, &markup) {
            Ok(extraction) => {
                seen += 1;
                println!(
                    "{file_name}: {} fragment(s), {}",
                    extraction.fragments.len(),
                    if extraction.multi_fragment {
                        "sprite"
                    } else {
                        "single icon"
                    }
                );
            }
            Err(err) => anyhow::bail!("fixture {file_name} failed to parse: {err}"),
        }
    }
    if seen == 0 {
        anyhow::bail!("no fixtures found under {}", dir.display());
    }
    Ok(())
}
