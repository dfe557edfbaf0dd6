//! pxd-export - PXD animation export tool
//!
//! Converts baked scene documents (.json) to compressed skeletal animation
//! containers (.anm.pxd)

use anyhow::Result;
use clap::{Parser, Subcommand};
use pxd_common::ANIMATION_EXT;
use std::path::PathBuf;

use pxd_export::scene::{export_scene, ClipOverrides};
use pxd_export::{inspect, manifest, CompressorKind, ExportOptions};

#[derive(Parser)]
#[command(name = "pxd-export")]
#[command(about = "PXD animation export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one armature from a scene document
    Export {
        /// Input scene document (.json)
        input: PathBuf,

        /// Output .anm.pxd file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Armature to export (default: the scene's active object)
        #[arg(long)]
        object: Option<String>,

        /// First frame (default: scene start)
        #[arg(long)]
        start: Option<u32>,

        /// Last frame (default: scene end)
        #[arg(long)]
        end: Option<u32>,

        /// Frame rate (default: scene fps / fps_base)
        #[arg(short, long)]
        frame_rate: Option<f32>,

        /// Write records in native (X, Y, Z) axis order
        #[arg(long)]
        native_axes: bool,

        /// Skip the root motion track
        #[arg(long)]
        no_root_motion: bool,

        /// Mark the clip as additive
        #[arg(long)]
        additive: bool,

        /// Step the scene from frame 0 before recording
        #[arg(long)]
        from_frame_zero: bool,

        /// Track compressor
        #[arg(short, long, value_enum, default_value_t = CompressorKind::Lz4)]
        compressor: CompressorKind,
    },

    /// Export every clip listed in a manifest
    Build {
        /// Path to pxd.toml manifest
        #[arg(default_value = "pxd.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without exporting
    Check {
        /// Path to pxd.toml manifest
        #[arg(default_value = "pxd.toml")]
        manifest: PathBuf,
    },

    /// Print the headers of an exported container
    Info {
        /// Input .anm.pxd file
        input: PathBuf,

        /// Decode uncompressed tracks record by record
        #[arg(long)]
        tracks: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            object,
            start,
            end,
            frame_rate,
            native_axes,
            no_root_motion,
            additive,
            from_frame_zero,
            compressor,
        } => {
            let options = ExportOptions {
                alternate_axis_convention: !native_axes,
                export_root_motion: !no_root_motion,
                additive,
                compress: true,
                sample_from_frame_zero: from_frame_zero,
            };
            let overrides = ClipOverrides {
                object,
                start,
                end,
                frame_rate,
            };
            let written = export_scene(
                &input,
                |_| output.unwrap_or_else(|| input.with_extension(ANIMATION_EXT)),
                &overrides,
                &options,
                compressor.compressor().as_ref(),
            )?;
            tracing::info!("Done! Wrote {:?}", written);
        }

        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building clips from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            manifest::build_all(&config, output.as_deref(), verbose)?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Info { input, tracks } => {
            print!("{}", inspect::describe_file(&input, tracks)?);
        }
    }

    Ok(())
}
