//! Propagation benchmarks
//!
//! Benchmarks for the hot paths of the protocol:
//! - Event table upserts
//! - Agent walks
//! - Search walks against a populated grid
//!
//! Run with: cargo bench -p diffusion-routing

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use diffusion_core::{EventId, EventRecord, GridBuilder, NodeId, NullSink};
use diffusion_routing::{DiffusionEngine, EventTable, ProtocolConfig, RandomSelector};

fn bench_event_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_table");

    group.bench_function("upsert_improving", |b| {
        b.iter(|| {
            let mut table = EventTable::new();
            for jumps in (0..64).rev() {
                table.upsert(black_box(EventRecord::new(EventId(0), jumps, None)));
            }
            table
        })
    });

    group.bench_function("upsert_many_events", |b| {
        b.iter(|| {
            let mut table = EventTable::new();
            for event in 0..64 {
                table.upsert(EventRecord::new(EventId(event), 3, Some(NodeId(1))));
            }
            black_box(table.contains(EventId(63)))
        })
    });

    group.finish();
}

fn bench_walks(c: &mut Criterion) {
    let mut group = c.benchmark_group("walks");

    group.bench_function("agent_walk_10x10_ttl15", |b| {
        let grid = GridBuilder::new(10, 10).build().unwrap();
        let mut engine = DiffusionEngine::new(grid, ProtocolConfig::default()).unwrap();
        let mut selector = RandomSelector::seeded(1);
        b.iter(|| {
            engine
                .propagate_agent(NodeId(55), EventId(0), &mut selector, &mut NullSink)
                .unwrap()
        })
    });

    group.bench_function("search_walk_10x10_ttl15", |b| {
        let grid = GridBuilder::new(10, 10).build().unwrap();
        let mut engine = DiffusionEngine::new(grid, ProtocolConfig::default()).unwrap();
        let mut selector = RandomSelector::seeded(2);
        engine
            .propagate_agent(NodeId(55), EventId(0), &mut selector, &mut NullSink)
            .unwrap();
        b.iter(|| {
            engine
                .propagate_search(NodeId(0), EventId(0), &mut selector, &mut NullSink)
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_event_table, bench_walks);

criterion_main!(benches);
