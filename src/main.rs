use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{warn, Level};
use trussview::{process_lines, JsonSceneSink, PipelineOutput, Scene, SceneConfig, TrussModel};

#[derive(Parser)]
#[command(name = "trussview")]
#[command(about = "Import a truss description, derive link geometry and print a design report", long_about = None)]
struct Cli {
    /// Path to the truss description file
    input: PathBuf,
    /// TOML file with scene layout settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the scene description as JSON to this file
    #[arg(long)]
    scene_json: Option<PathBuf>,
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    let text = fs::read_to_string(&cli.input)?;
    let mut model = TrussModel::new();

    let output = match &cli.scene_json {
        Some(path) => {
            let mut sink = JsonSceneSink::new(BufWriter::new(File::create(path)?));
            let output = process_lines(text.lines(), &mut model, &config, &mut sink)?;
            sink.into_inner().flush()?;
            output
        }
        None => {
            let mut scenes: Vec<Scene> = Vec::new();
            process_lines(text.lines(), &mut model, &config, &mut scenes)?
        }
    };

    print_output(&output);

    let groups = model.connected_groups();
    if groups > 1 {
        warn!(
            groups,
            "truss is not connected; some nodes are unreachable from others"
        );
    }

    Ok(())
}

/// Print the report followed by the longest-link record.
fn print_output(output: &PipelineOutput) {
    print!("{}", output.report.text);
    match &output.report.longest {
        Some(longest) => println!("Longest link: {longest}"),
        None => println!("Longest link: none"),
    }
    if !output.import.is_clean() {
        eprintln!(
            "{} malformed line(s) skipped:",
            output.import.malformed.len()
        );
        for diagnostic in &output.import.malformed {
            eprintln!(
                "  line {} ({:?}): {}",
                diagnostic.line, diagnostic.kind, diagnostic.error
            );
        }
    }
}
