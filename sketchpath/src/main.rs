use anyhow::{Context, Result};
use clap::Parser;
use sketchpath::{export_all, trace_image, OutputFormat, PipelineConfig};
use std::path::{Path, PathBuf};

/// Turn a photo of a black-on-white sketch into plotter toolpaths
#[derive(Parser, Debug)]
#[command(name = "sketchpath")]
#[command(about = "Trace a sketch photo into XML, SVG and G-code toolpaths", long_about = None)]
struct Args {
    /// Input image file path
    #[arg(short, long)]
    input: PathBuf,

    /// Output file path (without extension)
    #[arg(short, long, default_value = "coordinates")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "all")]
    format: FormatArg,

    /// JSON file with pipeline parameters; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gaussian blur kernel size (odd, >= 3)
    #[arg(long)]
    blur_kernel: Option<u32>,

    /// Adaptive threshold block size (odd, >= 3)
    #[arg(long)]
    block_size: Option<u32>,

    /// Constant subtracted from the local mean before thresholding
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<f32>,

    /// G-code feed rate for drawing moves
    #[arg(long)]
    feed_rate: Option<u32>,

    /// G-code scale from pixels to machine units
    #[arg(long)]
    scale: Option<f64>,

    /// Enable debug mode (save the cleaned mask)
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Xml,
    Svg,
    Gcode,
    All,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xml => OutputFormat::Xml,
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Gcode => OutputFormat::Gcode,
            FormatArg::All => OutputFormat::All,
        }
    }
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config: PipelineConfig = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };

    if let Some(k) = args.blur_kernel {
        config.binarize.blur_kernel = k;
    }
    if let Some(b) = args.block_size {
        config.binarize.block_size = b;
    }
    if let Some(c) = args.offset {
        config.binarize.offset = c;
    }
    if let Some(f) = args.feed_rate {
        config.gcode.feed_rate = f;
    }
    if let Some(s) = args.scale {
        config.gcode.scale = s;
    }

    Ok(config)
}

fn mask_path(stem: &Path) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push("_mask.png");
    PathBuf::from(name)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let format = OutputFormat::from(args.format);

    println!("SketchPath - Sketch to Toolpath");
    println!("===============================");
    println!("Input: {}", args.input.display());
    println!("Output: {}", args.output.display());
    println!("Format: {}", format);
    println!("Debug mode: {}", args.debug);
    println!();

    let config = load_config(&args)?;

    // Step 1: Load the frame
    println!("Step 1: Loading image...");
    let image = image::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    println!("  {}x{} pixels", image.width(), image.height());

    // Step 2: Binarize, clean and trace
    println!("\nStep 2: Tracing contours...");
    let traced = trace_image(&image, &config)?;
    println!(
        "Traced {} segment(s), {} vertices",
        traced.path.segment_count(),
        traced.path.point_count()
    );
    if traced.path.is_empty() {
        println!("  No ink found; writing empty documents");
    }

    if args.debug {
        let path = mask_path(&args.output);
        traced
            .mask
            .save(&path)
            .with_context(|| format!("failed to save mask {}", path.display()))?;
        println!("Saved cleaned mask to: {}", path.display());
    }

    // Step 3: Export
    println!("\nStep 3: Exporting...");
    let written = export_all(&traced.path, &config, &args.output, format)?;
    for path in &written {
        println!("  - {}", path.display());
    }

    Ok(())
}
