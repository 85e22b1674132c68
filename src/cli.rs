// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "image-anchor")]
#[command(about = "Anchor content to a tracked reference image (scripted demo)", long_about = None)]
pub struct Cli {
    /// JSON configuration file; built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 240)]
    pub frames: u64,

    /// Frame at which the reference image starts tracking
    #[arg(long, default_value_t = 10)]
    pub trigger_frame: u64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Artificial asset-load latency in milliseconds
    #[arg(long, default_value_t = 150)]
    pub load_latency_ms: u64,

    /// Request a layout that does not exist, to exercise the failure path
    #[arg(long = "fail-load", default_value = "false")]
    pub fail_load: bool,

    /// Log at debug level
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}
