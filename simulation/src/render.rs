//! Text rendering of grids, event tables and routes

use std::fmt::Write as _;

use diffusion_core::{
    EventRecord, GridTopology, HopTrace, NodeId, Phase, SearchOutcome, format_next,
};

/// Draw the grid with its node ids
///
/// ```text
/// 0---1---2---3
/// |   |   |   |
/// 4---5---6---7
/// |   |   |   |
/// 8---9---10--11
/// ```
pub fn render_grid(grid: &GridTopology) -> String {
    let width = grid.width();
    let connector = "|   ".repeat(width).trim_end().to_string();
    let mut rows = Vec::with_capacity(grid.length() * 2);

    for row in 0..grid.length() {
        let mut line = String::new();
        for col in 0..width {
            let id = row * width + col;
            let _ = write!(line, "{id}");
            if col + 1 < width {
                line.push_str(if id < 10 { "---" } else { "--" });
            }
        }
        rows.push(line);
        if row + 1 < grid.length() {
            rows.push(connector.clone());
        }
    }

    rows.join("\n")
}

/// Draw one node's event table
pub fn render_table(node: NodeId, table: &[EventRecord]) -> String {
    let mut out = format!("----------- event table of node {node} -----------\n");
    if table.is_empty() {
        out.push_str("(empty)\n");
    }
    for record in table {
        let _ = writeln!(
            out,
            "event {}, jumps {}, next {}",
            record.event_id,
            record.jumps_to_event,
            format_next(record.next_toward_event)
        );
    }
    out.push_str("--------------------------------------------------");
    out
}

/// Draw a route as `a -> b -> c`
pub fn render_route(route: &[NodeId]) -> String {
    route
        .iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// One line describing a forwarded message
pub fn render_hop(hop: &HopTrace) -> String {
    match hop.phase {
        Phase::Agent => format!(
            "node {} forwarded the agent message: event {}, jumps {}, next {}, ttl {}",
            hop.node,
            hop.event_id,
            hop.jumps,
            format_next(hop.next),
            hop.ttl
        ),
        Phase::Search => format!(
            "node {} forwarded the search for event {}: jumps {}, next {}, ttl {}",
            hop.node,
            hop.event_id,
            hop.jumps,
            format_next(hop.next),
            hop.ttl
        ),
    }
}

/// Lines announcing the end of a search
pub fn render_outcome(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Found { route } => {
            let intersection = route.first().map(NodeId::to_string).unwrap_or_default();
            format!(
                "intersection found at node {intersection}\n\
                 routing the event back to the sink along the reversed search path\n\
                 route: {}",
                render_route(route)
            )
        }
        SearchOutcome::NotFound { .. } => "no intersection found".to_string(),
    }
}
