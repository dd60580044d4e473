//! Overlay Placement CLI
//!
//! Usage:
//!   overlay-placement [OPTIONS] [SCENE]
//!
//! Options:
//!       --rtl                Right-to-left writing direction
//!   -l, --location <ANCHOR>  Override the preferred anchor, e.g. "top end"
//!   -o, --origin <ORIGIN>    Override the origin ("auto", "overlap" or an anchor)
//!       --offset <OFFSET>    Override the offset, e.g. "8" or "8 -4"
//!   -f, --frames <N>         Frames to advance after mounting [default: 3]
//!       --format <FORMAT>    Output format: css or toml [default: css]
//!   -v, --verbose            Log placement decisions to stderr
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use overlay_placement::{place, render_css, Scene, DEFAULT_FRAMES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Css,
    Toml,
}

#[derive(Parser)]
#[command(name = "overlay-placement")]
#[command(about = "Collision-aware placement of floating content")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    scene: Option<PathBuf>,

    /// Right-to-left writing direction
    #[arg(long)]
    rtl: bool,

    /// Preferred anchor on the target, e.g. "bottom start"
    #[arg(short, long)]
    location: Option<String>,

    /// Origin on the content: "auto", "overlap" or an anchor
    #[arg(short, long)]
    origin: Option<String>,

    /// Offset as "main" or "main cross"
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// Frames to advance after mounting, so settle passes can run
    #[arg(short, long, default_value_t = DEFAULT_FRAMES)]
    frames: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Css)]
    format: Format,

    /// Log placement decisions (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Read input
    let source = match &cli.scene {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut scene = match Scene::from_str(&source) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Command line overrides
    if cli.rtl {
        scene.props.is_rtl = true;
    }
    if let Some(location) = cli.location {
        scene.props.location = location;
    }
    if let Some(origin) = cli.origin {
        scene.props.origin = origin;
    }
    if let Some(offset) = cli.offset {
        scene.props.offset = Some(offset.as_str().into());
    }

    // Malformed descriptors fall back to defaults; say so
    for error in scene.props.descriptor_errors() {
        eprint!("{}", error.report());
    }

    let directive = place(&scene, cli.frames);
    match cli.format {
        Format::Css => println!("{}", render_css(&directive, &scene.css)),
        Format::Toml => match toml::to_string(&directive) {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}
