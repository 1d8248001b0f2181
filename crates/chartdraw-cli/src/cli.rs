// this_file: crates/chartdraw-cli/src/cli.rs

//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// chartdraw - Render demo charts through any drawing backend
#[derive(Parser, Debug)]
#[command(name = "chartdraw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the backends and scenes this build knows about
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Draw a scene and write it to a file
    #[command(alias = "r")]
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Only list backends
    #[arg(long)]
    pub backends: bool,

    /// Only list scenes
    #[arg(long)]
    pub scenes: bool,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Which scene to draw
    #[arg(long, value_enum, default_value_t = Scene::All)]
    pub scene: Scene,

    /// Output backend; also decides the file format
    #[arg(short, long, value_enum, default_value_t = BackendKind::Skia)]
    pub backend: BackendKind,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Surface width in pixels (or SVG user units)
    #[arg(short = 'W', long, default_value_t = 400)]
    pub width: u32,

    /// Surface height in pixels (or SVG user units)
    #[arg(short = 'H', long, default_value_t = 300)]
    pub height: u32,

    /// Extra font files to make available (repeatable)
    #[arg(short = 'f', long = "font-file")]
    pub font_files: Vec<PathBuf>,

    /// Font family for labels
    #[arg(long, default_value = "sans-serif")]
    pub font: String,

    /// Skip loading system fonts
    #[arg(long)]
    pub no_system_fonts: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scene {
    /// A stroked right triangle
    Triangle,
    /// A filled circle
    Circle,
    /// One of each point marker shape
    Markers,
    /// Anchored and rotated labels
    Text,
    /// All of the above in a grid
    All,
}

impl Scene {
    pub fn needs_fonts(self) -> bool {
        matches!(self, Scene::Text | Scene::All)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// PNG via tiny-skia
    Skia,
    /// SVG document
    Svg,
    /// JSON recording of every draw command
    Json,
}
