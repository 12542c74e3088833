use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf};
use swatchgrid::{ExtractionMode, GridSpec, Session, DEFAULT_MAX_SAMPLE_DIMENSION};

/// Extract a color palette from an image and save it as a swatch grid PNG.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image path
    input: PathBuf,

    /// Keep only the N most frequent colors instead of all of them
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Bound on the larger image side while sampling; 0 samples at native resolution
    #[arg(long, default_value_t = DEFAULT_MAX_SAMPLE_DIMENSION)]
    max_dimension: u32,

    /// Output path for the rendered grid
    #[arg(short, long, default_value = "palette.png")]
    out: PathBuf,

    /// Side length of each swatch box in pixels
    #[arg(long, default_value_t = 120)]
    box_size: u32,

    /// Space between boxes in pixels
    #[arg(long, default_value_t = 20)]
    padding: u32,

    /// Swatches per row
    #[arg(long, default_value_t = 5)]
    columns: u32,

    /// Print the extracted codes and their pixel counts
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let bytes = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let bound = (args.max_dimension > 0).then_some(args.max_dimension);
    let mut session = Session::new();
    let found = session
        .load_image_with_bound(&bytes, bound)
        .context("failed to sample the input image")?;
    println!("{found} colors found in this image");

    let mode = match args.count {
        Some(n) => ExtractionMode::Partial(n),
        None => ExtractionMode::All,
    };
    session.extract(mode).context("color extraction failed")?;

    if args.list {
        let selected = session.palette().len();
        for swatch in session.inventory().iter().take(selected) {
            println!("{}  {} px", swatch.code(), swatch.population());
        }
    }

    let spec = GridSpec {
        box_size: args.box_size,
        padding: args.padding,
        columns: args.columns,
    };
    let png = session
        .export_palette(&spec)
        .context("failed to render the palette grid")?;

    fs::write(&args.out, png)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    println!("Saved → {}", args.out.display());

    Ok(())
}
