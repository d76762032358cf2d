use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Jonathan M. Skelton",
    version,
    about = "phonanim - Generates phonon-mode animations of molecular crystals from Phonopy output, for rendering with external tools such as VMD.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate per-mode XYZ animations from a Phonopy mesh.yaml file.
    Animate(AnimateArgs),
    /// Assemble externally rendered frame images into per-mode animated GIFs.
    Gif(GifArgs),
}

/// Arguments for the `animate` subcommand.
#[derive(Args, Debug)]
pub struct AnimateArgs {
    /// Path to the Phonopy mesh.yaml file with Gamma-point eigenvectors.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to write the output files into. Defaults to the current directory.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Override the prefix for the output file names.
    #[arg(short, long, value_name = "NAME")]
    pub prefix: Option<String>,

    /// Override the maximum amplitude (A when scaling is on, amu^1/2 A otherwise).
    #[arg(short = 'a', long, value_name = "FLOAT")]
    pub max_amplitude: Option<f64>,

    /// Override the number of animation frames per loop.
    #[arg(short = 'n', long, value_name = "INT")]
    pub steps: Option<usize>,

    /// Override the supercell padding, as three comma-separated integers (e.g. 1,1,1).
    #[arg(long, value_name = "NA,NB,NC")]
    pub supercell: Option<String>,

    /// Animate only a subset of modes.
    /// Format: 'index:MIN:MAX', 'thz:MIN:MAX' or 'invcm:MIN:MAX'; use '-' to leave an end open.
    #[arg(short = 'm', long = "modes", value_name = "SELECTOR")]
    pub mode_selection: Option<String>,

    /// Override `scale-displacements` from the config file.
    #[command(flatten)]
    pub scale: ScaleDisplacements,
}

/// A group to handle mutually exclusive boolean flags for displacement scaling.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct ScaleDisplacements {
    /// Force amplitude scaling so max-amplitude is a Cartesian displacement in A.
    #[arg(long)]
    pub scale_displacements: bool,
    /// Force raw normal-mode amplitudes (amu^1/2 A) without scaling.
    #[arg(long)]
    pub no_scale_displacements: bool,
}

/// Arguments for the `gif` subcommand.
#[derive(Args, Debug)]
pub struct GifArgs {
    /// Path to the merged animation XYZ file produced by `animate`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub merged: PathBuf,

    /// Directory containing the rendered frame images.
    #[arg(short = 'd', long, required = true, value_name = "DIR")]
    pub frame_dir: PathBuf,

    /// File-name prefix of the frame images (`<PREFIX>.<N><EXT>`).
    #[arg(long, value_name = "NAME", default_value = "Crystal")]
    pub frame_prefix: String,

    /// File extension of the frame images.
    #[arg(long, value_name = "EXT", default_value = ".ppm")]
    pub frame_ext: String,

    /// Directory to write the GIF files into. Defaults to the current directory.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Prefix for the GIF file names. Defaults to the frame prefix.
    #[arg(short, long, value_name = "NAME")]
    pub prefix: Option<String>,

    /// Inter-frame delay in centiseconds.
    #[arg(long, value_name = "INT", default_value_t = 10)]
    pub delay: u32,

    /// Overwrite GIF files that already exist.
    #[arg(long)]
    pub overwrite: bool,

    /// ImageMagick convert binary to invoke.
    #[arg(long, value_name = "BIN", default_value = "convert")]
    pub convert: String,
}
