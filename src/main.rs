use clap::Parser;
use clap::error::ErrorKind;
use noteink::{PipelineBuilder, PipelineError};
use std::env;
use std::path::PathBuf;
use std::process;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Converts a handwritten note into an HTML page holding an SVG drawing.
///
/// The output is written next to the note with an `.html` extension.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the note archive, e.g. example.note
    note: PathBuf,
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "noteink=info");
        }
    }
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), PipelineError> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(_) => return Err(PipelineError::Usage("noteink [example.note]".to_string())),
    };

    let pipeline = PipelineBuilder::new().build()?;
    let output = pipeline.generate_to_file(&args.note)?;
    println!("Converted {} to {}", args.note.display(), output.display());
    Ok(())
}
