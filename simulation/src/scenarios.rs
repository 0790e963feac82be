//! Pre-defined simulation scenarios
//!
//! Scenarios write their narrative to any [`Write`] so the CLI can hand them
//! stdout and tests can hand them a buffer.

use std::io::Write;

use tracing::info;

use diffusion_core::{NodeId, NullSink};
use diffusion_routing::{FirstNeighbor, ProtocolConfig};

use crate::config::{GridConfig, SimConfig, TraceFormat};
use crate::error::SimulationResult;
use crate::render::{render_grid, render_table};
use crate::simulation::{Simulation, SimulationReport};
use crate::sinks::{ConsoleSink, JsonlSink};

/// Deterministic walkthrough on a 4x4 grid with TTL 3
///
/// ```text
/// 0---1---2---3
/// |   |   |   |
/// 4---5---6---7
/// |   |   |   |
/// 8---9---10--11
/// |   |   |   |
/// 12--13--14--15
/// ```
///
/// Every node forwards to its first neighbor. Node 5 senses event 0 and the
/// agent message walks 5 -> 1 -> 0 -> 4. A search from node 4 finds the event
/// in its own table and the route back to the sink is just `[4]`.
pub fn run_walkthrough_scenario<W: Write>(out: &mut W) -> SimulationResult<SimulationReport> {
    info!("=== Running Walkthrough Scenario ===");

    let config = SimConfig {
        seed: Some(0),
        grid: GridConfig {
            length: 4,
            width: 4,
        },
        protocol: ProtocolConfig::with_ttl(3),
        ..Default::default()
    };
    let mut sim = Simulation::new(config)?;

    writeln!(out, "{}\n", render_grid(sim.grid()))?;
    writeln!(out, "node 5 senses event 0 and emits the agent message")?;
    writeln!(out, "sink is node 4\n")?;

    let mut sink = ConsoleSink::new(&mut *out).without_tables();
    let report = sim.run_from(NodeId(5), NodeId(4), &mut FirstNeighbor, &mut sink)?;
    sink.finish()?;

    writeln!(out, "\n=== Event Tables ===")?;
    for node in report.agent.visited() {
        if let Some(table) = sim.engine().table(node) {
            writeln!(out, "{}", render_table(node, &table.snapshot()))?;
        }
    }

    writeln!(out, "\n{}", report.summary())?;
    Ok(report)
}

/// Config-driven run with random placement
pub fn run_random_scenario<W: Write>(
    config: SimConfig,
    out: &mut W,
) -> SimulationResult<SimulationReport> {
    info!("=== Running Random Scenario ===");

    let trace_format = config.trace;
    let mut sim = Simulation::new(config)?;

    let report = match trace_format {
        TraceFormat::Console => {
            writeln!(out, "{}\n", render_grid(sim.grid()))?;
            let mut sink = ConsoleSink::new(&mut *out);
            let report = sim.run(&mut sink)?;
            sink.finish()?;
            write_placement(out, &report)?;
            writeln!(out, "\n{}", report.summary())?;
            report
        }
        TraceFormat::Jsonl => {
            let mut sink = JsonlSink::new(&mut *out);
            let report = sim.run(&mut sink)?;
            sink.finish()?;
            report
        }
        TraceFormat::None => {
            let report = sim.run(&mut NullSink)?;
            write_placement(out, &report)?;
            writeln!(out, "{}", report.summary())?;
            report
        }
    };

    Ok(report)
}

fn write_placement<W: Write>(out: &mut W, report: &SimulationReport) -> SimulationResult<()> {
    if let Some(sensing) = &report.sensing {
        let area: Vec<_> = sensing.area.iter().map(NodeId::to_string).collect();
        writeln!(
            out,
            "nodes {} sensed the event, node {} emitted the agent message",
            area.join(", "),
            sensing.origin
        )?;
    }
    writeln!(out, "sink is node {}", report.sink)?;
    Ok(())
}
