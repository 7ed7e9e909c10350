// crates/otio-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use otio_core::{AffineTransform, ContinuousInterval, Ordinate};
use otio_mapping::Mapping;
use otio_project::{build_projection, build_topological_map};
use otio_topology::Topology;
use otio_tree::{CompositionTree, MediaReference, NodeId, SpaceLabel, SpaceRef};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "otio-cli",
    about = "Temporal coordinate engine reference CLI",
    long_about = "Builds a synthetic composition tree in memory and walks a projection across it, printing the resulting segment table.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Build a track of `clips` sequential clips, each `clip_seconds`
    /// long, and print the segment table projecting the track's
    /// presentation space onto every clip's media space.
    Track {
        /// Number of clips in the track.
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
        clips: u32,

        /// Duration of each clip, in whole seconds.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        clip_seconds: u32,
    },

    /// Build a single clip wrapped in an affine warp (`post_warp ->
    /// pre_warp`, `scale * x + offset`) and print the projection from
    /// the warp's presentation onto its pre-warp space.
    Warp {
        /// Pre-warp (child) duration, in whole seconds.
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
        pre_warp_seconds: u32,

        /// Warp scale numerator over denominator 1 (e.g. `2` doubles
        /// pre-warp duration relative to post-warp).
        #[arg(long, default_value_t = 2, allow_hyphen_values = true)]
        scale: i64,
    },

    /// Build a stack of `children` clips, all covering the same
    /// duration, and print the fan-out segment table.
    Stack {
        /// Number of overlaid clips.
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
        children: u32,

        /// Shared duration, in whole seconds.
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
        seconds: u32,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Track { clips, clip_seconds } => run_track(clips, clip_seconds),
        Cmd::Warp { pre_warp_seconds, scale } => run_warp(pre_warp_seconds, scale),
        Cmd::Stack { children, seconds } => run_stack(children, seconds),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry().with(fmt_layer).with(filter).try_init();
}

fn run_track(clips: u32, clip_seconds: u32) -> Result<()> {
    let mut tree = CompositionTree::new();
    let mut clip_ids = Vec::with_capacity(clips as usize);
    for i in 0..clips {
        let bounds = ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_int(i64::from(clip_seconds)));
        let id = tree.push_clip(bounds, MediaReference { name: format!("clip-{i}") }, None);
        clip_ids.push(id);
    }
    let track = tree
        .push_track(clip_ids.clone())
        .context("building the track")?;

    info!(clips, clip_seconds, "built track");
    let map = build_topological_map(&tree, track).context("building topological map")?;
    let src = SpaceRef {
        node: track,
        space: SpaceLabel::Presentation,
    };
    let builder = build_projection(&tree, &map, src).context("building projection")?;
    print_rows(&builder);

    for &clip in &clip_ids {
        let dst = SpaceRef {
            node: clip,
            space: SpaceLabel::Media,
        };
        if let Ok(topology) = builder.projection_to(dst) {
            println!("  -> clip media range under track presentation: {}", topology.input_bounds());
        }
    }
    Ok(())
}

fn run_warp(pre_warp_seconds: u32, scale: i64) -> Result<()> {
    let mut tree = CompositionTree::new();
    let child = tree.push_clip(
        ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_int(i64::from(pre_warp_seconds))),
        MediaReference { name: "retimed".to_string() },
        None,
    );
    let post_warp_seconds = i64::from(pre_warp_seconds) / scale.max(1);
    let warp_topology = Topology::new(vec![Mapping::affine(
        AffineTransform {
            offset: Ordinate::ZERO,
            scale: Ordinate::from_int(scale),
        },
        ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_int(post_warp_seconds.max(1))),
    )])
    .context("building warp topology")?;
    let warp = tree.push_warp(child, warp_topology).context("building warp node")?;

    info!(pre_warp_seconds, scale, "built warp");
    let map = build_topological_map(&tree, warp).context("building topological map")?;
    let src = SpaceRef {
        node: warp,
        space: SpaceLabel::Presentation,
    };
    let builder = build_projection(&tree, &map, src).context("building projection")?;
    print_rows(&builder);

    let dst = SpaceRef {
        node: warp,
        space: SpaceLabel::PreWarp,
    };
    let topology = builder.projection_to(dst).context("no row reaches the pre-warp space")?;
    println!("post_warp -> pre_warp range: {}", topology.input_bounds());
    Ok(())
}

fn run_stack(children: u32, seconds: u32) -> Result<()> {
    let mut tree = CompositionTree::new();
    let bounds = ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_int(i64::from(seconds)));
    let mut child_ids: Vec<NodeId> = Vec::with_capacity(children as usize);
    for i in 0..children {
        child_ids.push(tree.push_clip(bounds, MediaReference { name: format!("layer-{i}") }, None));
    }
    let stack = tree
        .push_stack(child_ids.clone(), bounds)
        .context("building the stack")?;

    info!(children, seconds, "built stack");
    let map = build_topological_map(&tree, stack).context("building topological map")?;
    let src = SpaceRef {
        node: stack,
        space: SpaceLabel::Presentation,
    };
    let builder = build_projection(&tree, &map, src).context("building projection")?;
    print_rows(&builder);
    println!("{} children share every fan-out row", child_ids.len());
    Ok(())
}

fn print_rows(builder: &otio_project::ProjectionBuilder) {
    println!("segment table for source {:?}:", builder.source());
    for row in builder.rows() {
        let destinations: Vec<String> = row
            .mapping_indices
            .iter()
            .map(|&i| format!("{:?}", builder.pool()[i].destination))
            .collect();
        println!("  {} -> [{}]", row.bounds, destinations.join(", "));
    }
}
