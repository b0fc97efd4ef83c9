//! Offline replay of recorded `/get_controls` request bodies.
//!
//! Usage: replay <requests.json> [--csv <out.csv>]
//!
//! The input file holds a JSON array of request bodies, fed in order through a
//! single fresh controller.

use anyhow::{bail, Context};
use serde_json::Value;

use drone_pilot::gnc::{DroneStatus, SweepPhase};
use drone_pilot::io::csv::write_ticks_file;
use drone_pilot::io::json::parse_request;
use drone_pilot::sim;
use drone_pilot::types::TickInput;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, csv_out) = match args.as_slice() {
        [path] => (path.clone(), None),
        [path, flag, out] if flag == "--csv" => (path.clone(), Some(out.clone())),
        _ => bail!("usage: replay <requests.json> [--csv <out.csv>]"),
    };

    let raw = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
    let bodies: Vec<Value> =
        serde_json::from_slice(&raw).with_context(|| format!("{path} is not a JSON array"))?;

    let frames = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| -> anyhow::Result<TickInput> {
            let bytes = serde_json::to_vec(body)?;
            let req = parse_request(&bytes).with_context(|| format!("request #{i}"))?;
            Ok(req.to_tick_input())
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let (outputs, fault) = sim::replay(&frames);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("  Replay: {} ({} ticks)", path, frames.len());
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>5}  {:>9}  {:>7}  {:>8}  {:>7}  {:>8}  {:>7}",
        "tick", "status", "yaw", "throttle", "pitch", "heading", "phase"
    );
    println!("  {}", "─".repeat(64));

    let sample_interval = (outputs.len() / 40).max(1);
    for (i, out) in outputs.iter().enumerate() {
        let changed = i > 0 && outputs[i - 1].status != out.status;
        if i % sample_interval != 0 && !changed && i != outputs.len() - 1 {
            continue;
        }
        let status = match out.status {
            DroneStatus::Hunting => "HUNTING",
            DroneStatus::Searching => "SEARCHING",
        };
        let phase = match out.search.phase {
            SweepPhase::Hold => "hold",
            SweepPhase::Transit => "transit",
        };
        println!(
            "  {:>5}  {:>9}  {:>7.3}  {:>8.3}  {:>7.3}  {:>7.1}°  {:>7}",
            i,
            status,
            out.command.yaw,
            out.command.throttle,
            out.command.pitch,
            out.desired_dir.y.atan2(out.desired_dir.x).to_degrees(),
            phase,
        );
    }
    println!();

    if let Some(csv) = csv_out {
        write_ticks_file(&csv, &outputs).with_context(|| format!("writing {csv}"))?;
        println!("  Tick log written to {csv}");
    }

    if let Some((tick, err)) = fault {
        bail!("replay stopped at tick {tick}: {err}");
    }
    Ok(())
}
