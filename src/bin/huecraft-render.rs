//! Build one palette from command-line flags and write it out.
//!
//! ```text
//! huecraft-render --left ff0000 --right 0000ff --levels 9 --method oklch --format svg -o out.svg
//! ```

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use huecraft::color::with_hash;
use huecraft::diagnostics::{CountingSink, DiagnosticsSink, FanoutSink, TracingSink};
use huecraft::export::{pdf_layout, render_png, render_svg, ExportConfig};
use huecraft::logging::{
    init_tracing, log_operation_end, log_operation_start, log_palette_stats, log_timed_operation,
};
use huecraft::{Capabilities, Capability, InterpolationMethod, PaletteSettings, Registry};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Svg,
    Png,
    PdfLayout,
}

#[derive(Parser, Debug)]
#[command(name = "huecraft-render")]
#[command(author, version, about = "Render a palette grid to a file", long_about = None)]
struct Args {
    #[arg(long)]
    left: Option<String>,

    #[arg(long)]
    right: Option<String>,

    #[arg(long)]
    top: Option<String>,

    #[arg(long)]
    bottom: Option<String>,

    /// Colors per row
    #[arg(short, long)]
    levels: Option<usize>,

    /// Rows on each side of the base row (vertical mode)
    #[arg(short, long)]
    steps: Option<usize>,

    /// Enable vertical mode
    #[arg(long)]
    vertical: bool,

    /// Interpolation method
    #[arg(short, long)]
    method: Option<String>,

    /// Switch off a capability (color_space, perceptual, curve)
    #[arg(long = "disable", value_delimiter = ',')]
    disable: Vec<String>,

    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, env = "HUECRAFT_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn settings_from(args: &Args) -> anyhow::Result<PaletteSettings> {
    let mut settings = PaletteSettings::default();
    if let Some(left) = &args.left {
        settings.left = with_hash(left);
    }
    if let Some(right) = &args.right {
        settings.right = with_hash(right);
    }
    if let Some(top) = &args.top {
        settings.top = Some(with_hash(top));
    }
    if let Some(bottom) = &args.bottom {
        settings.bottom = Some(with_hash(bottom));
    }
    if let Some(levels) = args.levels {
        settings.horizontal_levels = levels;
    }
    if let Some(steps) = args.steps {
        settings.vertical_steps = steps;
    }
    if let Some(method) = &args.method {
        settings.method = method.parse::<InterpolationMethod>()?;
    }
    settings.vertical_enabled = args.vertical;
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let settings = settings_from(&args)?;
    let mut capabilities = Capabilities::all();
    for name in &args.disable {
        capabilities = capabilities.without(name.parse::<Capability>()?);
    }

    let counts = Arc::new(CountingSink::new());
    let sink = FanoutSink::new(vec![
        Arc::new(TracingSink) as Arc<dyn DiagnosticsSink>,
        counts.clone(),
    ]);
    let registry = Registry::new(capabilities, Arc::new(sink));

    let start = std::time::Instant::now();
    let grid = huecraft::build(&registry, &settings);
    log_palette_stats(
        settings.method,
        registry.effective_method(settings.method),
        grid.row_count(),
        grid.column_count(),
        settings.vertical_enabled,
        start.elapsed(),
    );

    if grid.is_empty() {
        if let Err(e) = settings.validate() {
            bail!("palette settings rejected: {}", e);
        }
        bail!("palette is empty");
    }

    let export = ExportConfig::default();
    let bytes = log_timed_operation("render", || -> anyhow::Result<Vec<u8>> {
        Ok(match args.format {
            Format::Json => serde_json::to_vec_pretty(&grid)?,
            Format::Svg => render_svg(&grid, &export)?.into_bytes(),
            Format::Png => render_png(&grid, &export)?,
            Format::PdfLayout => serde_json::to_vec_pretty(&pdf_layout(&grid, &export)?)?,
        })
    })?;

    let write_start = std::time::Instant::now();
    let target = args
        .output
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    log_operation_start("write", Some(&target));
    match &args.output {
        Some(path) => std::fs::write(path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(&bytes)
            .context("Failed to write to stdout")?,
    }
    log_operation_end("write", write_start, true);

    let degraded = counts.snapshot();
    if degraded.total() > 0 {
        eprintln!(
            "warning: {} degraded result(s): {}",
            degraded.total(),
            serde_json::to_string(&degraded)?
        );
    }

    Ok(())
}
