//! `molsnap` command line front end.
//!
//! Loads one structure document, applies options from an optional TOML
//! preset plus command line overrides, and renders the requested targets
//! into an output directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use molsnap::engine::SplatEngine;
use molsnap::options::{FramingMode, ImageFormat, Options, PlddtMode};
use molsnap::render::{AllRequest, ChainListRequest, FileImageWriter, Orchestrator};
use molsnap::structure::{JsonSource, StructureSource, Trajectory};

#[derive(Parser)]
#[command(
    name = "molsnap",
    about = "Render deterministic snapshots of macromolecular structures",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Render one model by 1-based index
    Model {
        #[command(flatten)]
        io: IoArgs,
        /// Model index
        index: usize,
    },
    /// Render one assembly of the first model by 1-based index
    Assembly {
        #[command(flatten)]
        io: IoArgs,
        /// Assembly index
        index: usize,
    },
    /// Render one chain of the first model
    Chain {
        #[command(flatten)]
        io: IoArgs,
        /// Chain identifier
        name: String,
    },
    /// Render every model overlaid
    Models {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Render a chain-list selection, e.g. `chain A operator-list 1 chain B`
    ChainList {
        #[command(flatten)]
        io: IoArgs,
        /// 1-based assembly index the list refers to
        assembly: usize,
        /// Chain-list tokens
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Render every model, assembly and polymer chain
    All {
        #[command(flatten)]
        io: IoArgs,
        /// Also render every model overlaid
        #[arg(long)]
        ensemble: bool,
        /// Assembly index for --chain-list
        #[arg(long, default_value_t = 1)]
        chain_list_assembly: usize,
        /// Also render this chain-list selection (quoted, space separated)
        #[arg(long, value_name = "TOKENS")]
        chain_list: Option<String>,
    },
}

impl Command {
    fn io(&self) -> &IoArgs {
        match self {
            Self::Model { io, .. }
            | Self::Assembly { io, .. }
            | Self::Chain { io, .. }
            | Self::Models { io }
            | Self::ChainList { io, .. }
            | Self::All { io, .. } => io,
        }
    }
}

/// Input document and output directory.
#[derive(Args)]
struct IoArgs {
    /// Structure document (JSON)
    #[arg(value_name = "IN")]
    input: PathBuf,

    /// Output directory, created if missing
    #[arg(value_name = "OUT")]
    output: PathBuf,
}

/// Option overrides shared by every command.
#[derive(Args)]
struct CommonArgs {
    /// TOML options preset
    #[arg(long, value_name = "FILE", global = true)]
    options: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Image format
    #[arg(long, global = true)]
    format: Option<FormatArg>,

    /// Confidence coloring policy
    #[arg(long, global = true)]
    plddt: Option<PlddtArg>,

    /// Camera framing mode
    #[arg(long, global = true)]
    framing: Option<FramingArg>,

    /// Write a JSON state sidecar next to every image
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    save_state: Option<bool>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Jpeg,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlddtArg {
    On,
    SingleChain,
    Off,
}

#[derive(Clone, Copy, ValueEnum)]
enum FramingArg {
    PrincipalAxes,
    FirstResidue,
}

impl CommonArgs {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.options {
            Some(path) => Options::load(path)
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => Options::default(),
        };
        if let Some(width) = self.width {
            options.output.width = width;
        }
        if let Some(height) = self.height {
            options.output.height = height;
        }
        if let Some(format) = self.format {
            options.output.format = match format {
                FormatArg::Png => ImageFormat::Png,
                FormatArg::Jpeg => ImageFormat::Jpeg,
            };
        }
        if let Some(plddt) = self.plddt {
            options.colors.plddt = match plddt {
                PlddtArg::On => PlddtMode::On,
                PlddtArg::SingleChain => PlddtMode::SingleChain,
                PlddtArg::Off => PlddtMode::Off,
            };
        }
        if let Some(framing) = self.framing {
            options.camera.framing = match framing {
                FramingArg::PrincipalAxes => FramingMode::PrincipalAxes,
                FramingArg::FirstResidue => FramingMode::FirstResidue,
            };
        }
        if let Some(save_state) = self.save_state {
            options.output.save_state = save_state;
        }
        Ok(options)
    }
}

fn stem_of(path: &Path) -> Result<String> {
    match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) if !stem.is_empty() => Ok(stem.to_owned()),
        _ => bail!("cannot derive an output name from {}", path.display()),
    }
}

fn load(path: &Path) -> Result<Trajectory> {
    JsonSource
        .load(path)
        .with_context(|| format!("loading structure {}", path.display()))
}

fn run(cli: Cli) -> Result<()> {
    let options = cli.common.options()?;
    let io = cli.command.io();
    let trajectory = load(&io.input)?;
    let stem = stem_of(&io.input)?;
    let sink = FileImageWriter::create(&io.output)
        .with_context(|| format!("preparing output directory {}", io.output.display()))?;
    let engine = SplatEngine::new(&options);
    let mut orchestrator = Orchestrator::new(&trajectory, stem, options, engine, sink);

    let written = match cli.command {
        Command::Model { index, .. } => vec![orchestrator.render_model(index)?],
        Command::Assembly { index, .. } => vec![orchestrator.render_assembly(index)?],
        Command::Chain { name, .. } => vec![orchestrator.render_chain(&name)?],
        Command::Models { .. } => vec![orchestrator.render_ensemble()?],
        Command::ChainList {
            assembly, tokens, ..
        } => vec![orchestrator.render_chain_list(assembly, &tokens)?],
        Command::All {
            ensemble,
            chain_list_assembly,
            chain_list,
            ..
        } => orchestrator.render_all(&AllRequest {
            ensemble,
            chain_list: chain_list.map(|text| ChainListRequest {
                assembly: chain_list_assembly,
                tokens: text.split_whitespace().map(str::to_owned).collect(),
            }),
        })?,
    };

    log::info!(
        "wrote {} image(s) to {}",
        written.len(),
        orchestrator.sink().dir().display()
    );
    Ok(())
}

/// The error and its causes on one line, skipping causes the message
/// already ends with.
fn describe(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    for cause in error.chain().skip(1) {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message = format!("{message}: {text}");
        }
    }
    message
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", describe(&e));
            ExitCode::FAILURE
        }
    }
}
