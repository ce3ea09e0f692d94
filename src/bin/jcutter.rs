use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use jcutter::{JcutOptions, Rate, SequenceBuilder, SourceMedia};

#[derive(Parser, Debug)]
#[command(name = "jcutter", version)]
struct Cli {
    /// Log debug output (per-pair slides).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a J-cut to an xmeml timeline.
    Jcut(JcutArgs),
    /// Build a silence-cut timeline from loud ranges of one media file.
    Cut(CutArgs),
    /// Print the tracks and clips of an xmeml timeline.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct JcutArgs {
    /// Input xmeml file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path (defaults to `<input>_result.xml`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Minimum video clip length, in frames, for a pair to be slid.
    #[arg(long)]
    min_frames: Option<i64>,

    /// Frames added to the running slide per slid pair.
    #[arg(long)]
    cut: Option<i64>,

    /// JSON file with `JcutOptions`; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CutArgs {
    /// JSON array of `[start, end]` source frame ranges.
    #[arg(long)]
    ranges: PathBuf,

    /// Source media path.
    #[arg(long)]
    media: PathBuf,

    /// Media timebase (frames per second).
    #[arg(long)]
    fps: u32,

    /// Media uses NTSC pull-down.
    #[arg(long, default_value_t = false)]
    ntsc: bool,

    /// Frame width in pixels.
    #[arg(long)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long)]
    height: u32,

    /// Media duration in frames.
    #[arg(long)]
    duration: i64,

    /// Audio channel count.
    #[arg(long, default_value_t = 2)]
    channels: u32,

    /// Output xmeml path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input xmeml file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print the typed model as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match cli.cmd {
        Command::Jcut(args) => cmd_jcut(args),
        Command::Cut(args) => cmd_cut(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    let raw = input.to_string_lossy();
    let stem = raw.strip_suffix(".xml").unwrap_or(&*raw);
    PathBuf::from(format!("{stem}_result.xml"))
}

fn cmd_jcut(args: JcutArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => serde_json::from_str::<JcutOptions>(&read_text(path)?)
            .with_context(|| format!("parse options '{}'", path.display()))?,
        None => JcutOptions::default(),
    };
    if let Some(min_frames) = args.min_frames {
        opts.min_frames = min_frames;
    }
    if let Some(cut) = args.cut {
        opts.cut = cut;
    }

    let source = read_text(&args.in_path)?;
    let (out, report) = jcutter::jcut_markup(&source, &opts)
        .with_context(|| format!("j-cut '{}'", args.in_path.display()))?;

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    let out_path = args.out.unwrap_or_else(|| default_output(&args.in_path));
    write_text(&out_path, &out)?;
    eprintln!(
        "{} pairs, {} slid, total slide {} frames",
        report.pairs, report.slid, report.total_slide
    );
    Ok(())
}

fn cmd_cut(args: CutArgs) -> anyhow::Result<()> {
    let ranges: Vec<(i64, i64)> = serde_json::from_str(&read_text(&args.ranges)?)
        .with_context(|| format!("parse ranges '{}'", args.ranges.display()))?;

    let media = SourceMedia {
        path: args.media.to_string_lossy().into_owned(),
        width: args.width,
        height: args.height,
        rate: Rate {
            timebase: args.fps,
            ntsc: args.ntsc,
        },
        duration: args.duration,
        audio_channels: args.channels,
    };
    let builder = SequenceBuilder::new(media).ranges(ranges)?;
    let out = jcutter::cut_markup(builder)?;
    write_text(&args.out, &out)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let source = read_text(&args.in_path)?;
    let seq = jcutter::read_sequence(&source)
        .with_context(|| format!("parse '{}'", args.in_path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&seq)?);
        return Ok(());
    }

    println!(
        "{}: {} frames ({:.2}s) at {:.3} fps",
        seq.name,
        seq.duration,
        seq.rate.frames_to_secs(seq.duration),
        seq.rate.fps()
    );
    let tracks = seq
        .video_tracks
        .iter()
        .map(|t| ("video", t))
        .chain(seq.audio_tracks.iter().map(|t| ("audio", t)));
    for (i, (kind, track)) in tracks.enumerate() {
        println!("{kind} track {i}: {} clips", track.clips.len());
        for c in &track.clips {
            println!(
                "  {:<24} {:>6}..{:<6} in {:>6} out {:>6}",
                c.id, c.start, c.end, c.in_point, c.out_point
            );
        }
    }
    Ok(())
}
