//! `corridor` — a hand chases a wandering target through a small corridor
//! graph, grabs it, and drags it back to the door.
//!
//! Run with:
//!   cargo run -p corridor [-- path/to/scene.json]
//!
//! Without an argument the built-in `scene.json` is used.  Set
//! `RUST_LOG=debug` to see every hop.

mod scene;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use pursuit_chase::{ChaseEvent, ChaseObserver, HopKind, IdleReason, TracingObserver};
use pursuit_core::{NodeId, SimTime};
use pursuit_sim::{ChaseSimBuilder, HopLog, SharedTarget, TickOutcome, WanderingTarget};

use scene::Scene;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs through `tracing` and, when the scene asks for it, records CSV.
struct DemoObserver {
    log:  TracingObserver,
    hops: Option<HopLog<File>>,
}

impl ChaseObserver for DemoObserver {
    fn on_chase_started(&mut self, now: SimTime, home: NodeId) {
        self.log.on_chase_started(now, home);
        if let Some(h) = &mut self.hops { h.on_chase_started(now, home) }
    }

    fn on_replanned(&mut self, now: SimTime, path: &[NodeId]) {
        self.log.on_replanned(now, path);
        if let Some(h) = &mut self.hops { h.on_replanned(now, path) }
    }

    fn on_hop_committed(&mut self, now: SimTime, from: NodeId, to: NodeId, duration: f64, kind: HopKind) {
        self.log.on_hop_committed(now, from, to, duration, kind);
        if let Some(h) = &mut self.hops { h.on_hop_committed(now, from, to, duration, kind) }
    }

    fn on_arrived(&mut self, now: SimTime, node: NodeId, kind: HopKind) {
        self.log.on_arrived(now, node, kind);
        if let Some(h) = &mut self.hops { h.on_arrived(now, node, kind) }
    }

    fn on_attack(&mut self, now: SimTime, distance: f32) {
        self.log.on_attack(now, distance);
        if let Some(h) = &mut self.hops { h.on_attack(now, distance) }
    }

    fn on_idle(&mut self, now: SimTime, reason: IdleReason) {
        self.log.on_idle(now, reason);
        if let Some(h) = &mut self.hops { h.on_idle(now, reason) }
    }

    fn on_captured(&mut self, now: SimTime) {
        self.log.on_captured(now);
        if let Some(h) = &mut self.hops { h.on_captured(now) }
    }

    fn on_delivered(&mut self, now: SimTime, home: NodeId) {
        self.log.on_delivered(now, home);
        if let Some(h) = &mut self.hops { h.on_delivered(now, home) }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let scene = match std::env::args().nth(1) {
        Some(path) => Scene::from_path(Path::new(&path))?,
        None => Scene::builtin()?,
    };

    let graph = scene.graph.build().context("building navigation graph")?;
    let home = graph
        .node_by_name(&scene.home)
        .with_context(|| format!("home node {:?} is not in the graph", scene.home))?;
    let start = graph
        .node_by_name(&scene.target.start)
        .with_context(|| format!("target start {:?} is not in the graph", scene.target.start))?;

    tracing::info!(
        nodes = graph.node_count(),
        links = graph.edge_count(),
        home = %scene.home,
        target = %scene.target.start,
        "scene loaded"
    );

    let mut wanderer = WanderingTarget::new(&graph, start, scene.target.speed, scene.target.seed)?;
    let target = SharedTarget::new(wanderer.position());

    let mut builder = ChaseSimBuilder::new(
        scene.config.clone(),
        &graph,
        &graph,
        target.clone(),
        Vec::<ChaseEvent>::new(),
    )
    .home(home);
    if let Some(step) = scene.step_secs {
        builder = builder.fixed_step(step);
    }
    if let Some(limit) = scene.stall_timeout_secs {
        builder = builder.stall_timeout(limit);
    }
    let mut sim = builder.build()?;

    let hops = match &scene.hop_log {
        Some(path) => Some(
            HopLog::from_path(path).with_context(|| format!("creating hop log {}", path.display()))?,
        ),
        None => None,
    };
    let mut obs = DemoObserver { log: TracingObserver, hops };

    // ── Run ───────────────────────────────────────────────────────────────
    sim.start(&mut obs)?;
    let dt = sim.clock.step_secs;
    let mut outcome = TickOutcome::Running;
    for _ in 0..sim.clock.steps_for_secs(scene.duration_secs) {
        // A captured target is dragged along with the hand.
        if sim.pursuer.state().captured {
            target.set(sim.pursuer.hand_position());
        } else {
            target.set(wanderer.advance(dt, &graph));
        }

        outcome = sim.tick(&mut obs);
        match outcome {
            TickOutcome::Running => {}
            TickOutcome::Delivered => break,
            TickOutcome::Stalled { idle_secs } => {
                tracing::warn!(idle_secs, phase = %sim.pursuer.phase(), "giving up on a stalled chase");
                break;
            }
        }
    }

    if let Some(log) = obs.hops.as_mut() {
        log.finish().context("writing hop log")?;
    }

    // ── Summary ───────────────────────────────────────────────────────────
    let state = sim.pursuer.state();
    let name = |n: NodeId| graph.node_name(n).unwrap_or("?");
    let traveled: Vec<&str> = state.path_traveled.iter().map(|&n| name(n)).collect();
    let events: Vec<&str> = sim.pursuer.sink().iter().map(|e| e.name()).collect();

    println!("outcome:   {outcome:?}");
    println!("time:      {}", sim.now());
    println!("phase:     {}", state.phase);
    println!("hand:      {}", sim.pursuer.hand_position());
    println!("traveled:  {}", traveled.join(" -> "));
    println!("events:    {}", events.join(", "));
    Ok(())
}
