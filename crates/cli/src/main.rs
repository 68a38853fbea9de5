use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use quadedit::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod script;

use provenance::{ensure_parent, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "quadedit-cli")]
#[command(about = "Headless driver for the constrained quadrilateral editor")]
struct Cmd {
    /// Viewport width in pixels
    #[arg(long, global = true, default_value_t = 700.0)]
    width: f64,
    /// Viewport height in pixels
    #[arg(long, global = true, default_value_t = 500.0)]
    height: f64,

    #[command(subcommand)]
    action: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a shape in its default position to SVG
    Render {
        #[arg(long, default_value = "parallelogram")]
        shape: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Replay a JSON event script and write the final scene plus a summary
    Replay {
        #[arg(long)]
        script: PathBuf,
        #[arg(long, default_value = "parallelogram")]
        shape: String,
        /// Final SVG; the summary lands next to it as `<stem>.json`
        #[arg(long)]
        out: PathBuf,
        /// Coalesce consecutive pointer moves like a frame-driven host
        #[arg(long, default_value_t = false)]
        batch: bool,
    },
    /// Sample a random triangle and print its angles as JSON
    Triangle {
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Command::Render { shape, out } => render_cmd(&shape, &out, cmd.width, cmd.height),
        Command::Replay {
            script,
            shape,
            out,
            batch,
        } => replay(&script, &shape, &out, batch, cmd.width, cmd.height),
        Command::Triangle { seed } => triangle(seed),
        Command::Report => report(),
    }
}

fn parse_shape(shape: &str) -> Result<ShapeVariant> {
    ShapeVariant::parse(shape).ok_or_else(|| {
        anyhow!("unknown shape {shape:?} (expected parallelogram, rhombus or trapezium)")
    })
}

fn render_cmd(shape: &str, out: &Path, width: f64, height: f64) -> Result<()> {
    let variant = parse_shape(shape)?;
    let editor = Editor::with_viewport(variant, width, height, EditorCfg::default());
    tracing::info!(shape = variant.name(), width, height, out = %out.display(), "render");
    let scene = render(editor.quad(), editor.bounds(), None);
    ensure_parent(out)?;
    fs::write(out, scene.to_string()).with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(
        out,
        Payload::new(
            "render",
            json!({ "shape": variant.name(), "width": width, "height": height }),
        ),
    )?;
    Ok(())
}

fn replay(
    script_path: &Path,
    shape: &str,
    out: &Path,
    batch: bool,
    width: f64,
    height: f64,
) -> Result<()> {
    let variant = parse_shape(shape)?;
    let text = fs::read_to_string(script_path)
        .with_context(|| format!("reading {}", script_path.display()))?;
    let events = script::parse_script(&text)
        .with_context(|| format!("parsing {}", script_path.display()))?;
    tracing::info!(
        script = %script_path.display(),
        events = events.len(),
        batch,
        "replay"
    );

    let mut editor = Editor::with_viewport(variant, width, height, EditorCfg::default());
    let outputs = if batch {
        editor.handle_batch(events.iter().copied())
    } else {
        events.iter().flat_map(|&ev| editor.handle(ev)).collect()
    };
    let clamped = outputs
        .iter()
        .filter(|o| matches!(o, OutputEvent::Clamped))
        .count();
    tracing::info!(outputs = outputs.len(), clamped, "replay_done");

    let anchored = editor.solver().session().map(|s| s.anchored());
    let scene = render(editor.quad(), editor.bounds(), anchored);
    ensure_parent(out)?;
    fs::write(out, scene.to_string()).with_context(|| format!("writing {}", out.display()))?;

    let quad = editor.quad();
    let summary = json!({
        "shape": quad.variant().name(),
        "vertices": quad.vertices().iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
        "angles": quad.angles(),
        "equations": scene.equations,
        "outputs": outputs.iter().map(script::output_json).collect::<Vec<_>>(),
    });
    let summary_path = out.with_extension("json");
    fs::write(&summary_path, serde_json::to_vec_pretty(&summary)?)
        .with_context(|| format!("writing {}", summary_path.display()))?;

    write_sidecar(
        out,
        Payload::new(
            "replay",
            json!({
                "script": script_path.to_string_lossy(),
                "shape": variant.name(),
                "batch": batch,
                "width": width,
                "height": height,
                "events": events.len(),
            }),
        )
        .with_output(&summary_path),
    )?;
    Ok(())
}

fn triangle(seed: u64) -> Result<()> {
    let mut tri = Triangle::default();
    tri.randomize(&mut StdRng::seed_from_u64(seed));
    tracing::info!(seed, "triangle");
    let obj = json!({
        "seed": seed,
        "vertices": tri.v.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
        "angles": tri.angles(),
        "summary": tri.summary(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "quadedit_version": quadedit::VERSION,
        "shapes": ShapeVariant::ALL.iter().map(|v| v.name()).collect::<Vec<_>>(),
        "cfg": format!("{:?}", EditorCfg::default()),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
