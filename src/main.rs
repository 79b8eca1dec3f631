use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use futures::executor::block_on;
use log::{debug, error, info, warn, LevelFilter};

use std::path::PathBuf;
use std::time::Duration;

use taylor_line::canvas::Canvas;
use taylor_line::constants::{
    BACKGROUND_COLOR, CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_STEP, DEFAULT_TERMS, LINE_COLOR,
    SWEEP_DELAY_MS, SWEEP_FROM, SWEEP_MAX_TERMS, SWEEP_OUTPUT, SWEEP_TO, TRACE_COLOR,
};
use taylor_line::error_log::{self, ErrorLog};
use taylor_line::raster;
use taylor_line::shapes::{Color, Segment};
use taylor_line::sweep::{self, SweepConfig};
use taylor_line::taylor::ApproximationRequest;
use taylor_line::tracer::SteppedTracer;

#[derive(Parser)]
#[command(name = "taylor-line")]
#[command(about = "Draws lines with Taylor series sines and cosines and measures how far they miss", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the series sine and cosine of an angle against the real ones
    Approx(ApproxArgs),

    /// Trace a segment in steps along its approximated direction
    #[command(alias = "t")]
    Trace(TraceArgs),

    /// Draw a segment from its line equation
    Line(LineArgs),

    /// Trace the same segment with 1 to N terms and log the residuals
    #[command(alias = "s")]
    Sweep(SweepArgs),

    /// Summarize an error log written by `sweep`
    Report(ReportArgs),
}

#[derive(Args)]
struct ApproxArgs {
    /// Angle in radians
    #[arg(long, allow_negative_numbers = true)]
    angle: f64,

    /// Highest amount of series terms to show
    #[arg(long, default_value_t = DEFAULT_TERMS)]
    terms: u32,
}

/// Endpoints in any order, they are swapped if the first one is to the right.
#[derive(Args)]
struct SegmentArgs {
    #[arg(allow_negative_numbers = true)]
    x1: i64,
    #[arg(allow_negative_numbers = true)]
    y1: i64,
    #[arg(allow_negative_numbers = true)]
    x2: i64,
    #[arg(allow_negative_numbers = true)]
    y2: i64,
}

impl SegmentArgs {
    fn segment(&self) -> Segment {
        Segment::new(self.x1, self.y1, self.x2, self.y2).ordered()
    }
}

#[derive(Args)]
struct TraceArgs {
    #[command(flatten)]
    segment: SegmentArgs,

    /// Series terms for the sine and cosine
    #[arg(short = 'n', long, default_value_t = DEFAULT_TERMS)]
    terms: u32,

    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: i64,

    /// Also draw the line equation version underneath
    #[arg(long)]
    reference: bool,

    /// Save the canvas as an SVG
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,
}

#[derive(Args)]
struct LineArgs {
    #[command(flatten)]
    segment: SegmentArgs,

    /// Save the canvas as an SVG
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,
}

#[derive(Args)]
struct SweepArgs {
    #[arg(long, allow_negative_numbers = true, default_value_t = SWEEP_FROM.0)]
    x1: i64,
    #[arg(long, allow_negative_numbers = true, default_value_t = SWEEP_FROM.1)]
    y1: i64,
    #[arg(long, allow_negative_numbers = true, default_value_t = SWEEP_TO.0)]
    x2: i64,
    #[arg(long, allow_negative_numbers = true, default_value_t = SWEEP_TO.1)]
    y2: i64,

    /// Highest term count, the sweep starts at one
    #[arg(long, default_value_t = SWEEP_MAX_TERMS)]
    max_terms: u32,

    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: i64,

    /// Pause between iterations
    #[arg(long, value_name = "MS", default_value_t = SWEEP_DELAY_MS)]
    delay_ms: u64,

    /// Where the error log is written
    #[arg(short, long, value_name = "PATH", default_value = SWEEP_OUTPUT)]
    output: PathBuf,

    /// Save every trace of the sweep as an SVG
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,
}

#[derive(Args)]
struct ReportArgs {
    /// Error log to read
    #[arg(default_value = SWEEP_OUTPUT)]
    path: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli.command) {
        error!("{}", e);
        for cause in e.chain().skip(1) {
            error!("  {}", cause);
        }
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Approx(args) => approx(args),
        Commands::Trace(args) => trace(args),
        Commands::Line(args) => line(args),
        Commands::Sweep(args) => run_sweep(args),
        Commands::Report(args) => report(args),
    }
}

fn color(hex: &str) -> Result<Color> {
    Color::from_hex(hex).with_context(|| format!("Invalid color constant '{}'", hex))
}

fn new_canvas() -> Result<Canvas> {
    Ok(Canvas::new(
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        color(BACKGROUND_COLOR)?,
    ))
}

fn save_canvas(canvas: &Canvas, path: Option<PathBuf>) -> Result<()> {
    if let Some(path) = path {
        canvas.save_svg(&path)?;
        info!(
            "Saved {}x{} canvas with {} pixels to '{}' ({} fell outside)",
            canvas.width(),
            canvas.height(),
            canvas.painted(),
            path.display(),
            canvas.discarded()
        );
    }
    Ok(())
}

fn approx(args: ApproxArgs) -> Result<()> {
    let (real_sin, real_cos) = args.angle.sin_cos();
    println!("terms\tsin\tcos\tsin error\tcos error");
    for terms in 1..=args.terms {
        let request = ApproximationRequest::new(args.angle, terms)?;
        println!(
            "{}\t{}\t{}\t{:e}\t{:e}",
            request.terms(),
            request.sin(),
            request.cos(),
            (request.sin() - real_sin).abs(),
            (request.cos() - real_cos).abs()
        );
    }
    Ok(())
}

fn trace(args: TraceArgs) -> Result<()> {
    let segment = args.segment.segment();
    let mut canvas = new_canvas()?;

    if args.reference {
        raster::slope_line(&mut canvas, segment, color(LINE_COLOR)?)
            .context("Couldn't draw the reference line")?;
    }
    let tracer = SteppedTracer::new(args.terms, args.step, color(TRACE_COLOR)?)?;
    let result = tracer
        .trace(&mut canvas, segment)
        .with_context(|| format!("Couldn't trace {:?}", segment))?;

    let end = result.final_position();
    debug!(
        "First pixel {:?}, last pixel {:?}",
        result.pixels().first(),
        result.pixels().last()
    );
    info!(
        "{} steps with {} terms, stopped at ({}, {})",
        result.steps(),
        tracer.terms(),
        end.x(),
        end.y()
    );
    println!("residual {}", result.residual());
    println!("final residual {}", result.final_residual());

    save_canvas(&canvas, args.svg)
}

fn line(args: LineArgs) -> Result<()> {
    let segment = args.segment.segment();
    let mut canvas = new_canvas()?;
    let pixels = raster::slope_line(&mut canvas, segment, color(LINE_COLOR)?)
        .with_context(|| format!("Couldn't draw {:?}", segment))?;
    println!("{} pixels", pixels.len());
    save_canvas(&canvas, args.svg)
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let config = SweepConfig {
        segment: Segment::new(args.x1, args.y1, args.x2, args.y2).ordered(),
        max_terms: args.max_terms,
        step: args.step,
        delay: Duration::from_millis(args.delay_ms),
        color: color(TRACE_COLOR)?,
    };
    info!(
        "Sweeping {:?} with 1 to {} terms, step {}",
        config.segment, config.max_terms, config.step
    );

    let mut log = ErrorLog::create(&args.output)?;
    let mut handle = sweep::spawn(config, new_canvas()?);
    let mut samples = Vec::new();

    let written: Result<()> = block_on(async {
        while let Some(sample) = handle.next().await {
            log.record(sample)?;
            info!("terms = {}\tresidual = {}", sample.terms, sample.residual);
            samples.push(sample);
        }
        Ok::<(), anyhow::Error>(())
    });
    if let Err(e) = &written {
        error!("Stopped writing the error log: {:#}", e);
    }
    let canvas = handle.join();
    if let Err(e) = &canvas {
        error!("The sweep didn't finish: {:#}", e);
    }
    info!(
        "{} samples written to '{}'",
        log.written(),
        args.output.display()
    );

    match error_log::best(&samples) {
        Some(best) => info!(
            "Smallest residual: {} with {} terms",
            best.residual, best.terms
        ),
        None => warn!("The sweep produced no samples"),
    }

    written?;
    save_canvas(&canvas?, args.svg)
}

fn report(args: ReportArgs) -> Result<()> {
    let samples = error_log::read_log(&args.path)?;
    for sample in &samples {
        println!("n = {}\terr = {:.3e}", sample.terms, sample.residual);
    }
    match error_log::best(&samples) {
        Some(best) => println!(
            "Best: n = {} with err = {:.3e}",
            best.terms, best.residual
        ),
        None => warn!("'{}' has no samples", args.path.display()),
    }
    Ok(())
}
