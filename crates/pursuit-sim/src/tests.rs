//! Unit tests for pursuit-sim.

#[cfg(test)]
mod helpers {
    use pursuit_core::{ChaseConfig, NodeId, Vec3};
    use pursuit_nav::{NavGraph, NavGraphBuilder};

    pub const WAYPOINT: &str = "AmbientWaypoint";

    /// ```text
    ///   door(0) ── hall(4) ── lab(10)        closet(40, unlinked)
    /// ```
    pub fn line() -> (NavGraph, [NodeId; 4]) {
        let mut b = NavGraphBuilder::new();
        let door   = b.add_node("door", Vec3::ZERO);
        let hall   = b.add_waypoint("hall", Vec3::new(4.0, 0.0, 0.0), WAYPOINT, 0);
        let lab    = b.add_waypoint("lab", Vec3::new(10.0, 0.0, 0.0), WAYPOINT, 0);
        let closet = b.add_node("closet", Vec3::new(40.0, 0.0, 0.0));
        b.add_link(door, hall);
        b.add_link(hall, lab);
        (b.build().unwrap(), [door, hall, lab, closet])
    }

    pub fn grabbing() -> ChaseConfig {
        ChaseConfig { attack_range: 0.5, grab_on_attack: true, ..ChaseConfig::default() }
    }

    pub fn near_lab() -> Vec3 {
        Vec3::new(10.0, 0.0, 0.2)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use pursuit_chase::{ChaseError, ChaseEvent, FixedTarget, NullSink};
    use pursuit_core::{ChaseConfig, NodeId};

    use super::helpers::*;
    use crate::{ChaseSimBuilder, SimError};

    #[test]
    fn home_is_required() {
        let (g, _) = line();
        let err = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), NullSink)
            .build()
            .err();
        assert!(matches!(err, Some(SimError::Config(_))));
    }

    #[test]
    fn non_positive_step_rejected() {
        let (g, [door, ..]) = line();
        let err = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), NullSink)
            .home(door)
            .fixed_step(0.0)
            .build()
            .err();
        assert!(matches!(err, Some(SimError::Config(_))));
    }

    #[test]
    fn non_positive_stall_timeout_rejected() {
        let (g, [door, ..]) = line();
        let err = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), NullSink)
            .home(door)
            .stall_timeout(-1.0)
            .build()
            .err();
        assert!(matches!(err, Some(SimError::Config(_))));
    }

    #[test]
    fn unknown_home_rejected() {
        let (g, _) = line();
        let err = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), NullSink)
            .home(NodeId(42))
            .build()
            .err();
        assert!(matches!(err, Some(SimError::Chase(ChaseError::UnknownHome(NodeId(42))))));
    }

    #[test]
    fn invalid_chase_config_rejected() {
        let (g, [door, ..]) = line();
        let cfg = ChaseConfig { arrival_epsilon: 0.0, ..ChaseConfig::default() };
        let err = ChaseSimBuilder::new(cfg, &g, &g, FixedTarget(near_lab()), NullSink)
            .home(door)
            .build()
            .err();
        assert!(matches!(err, Some(SimError::Chase(ChaseError::Config(_)))));
    }

    #[test]
    fn defaults() {
        let (g, [door, ..]) = line();
        let sim = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), Vec::<ChaseEvent>::new())
            .home(door)
            .build()
            .unwrap();
        assert_eq!(sim.clock.step_secs, 0.02);
        assert_eq!(sim.clock.steps, 0);
        assert_eq!(sim.home(), door);
        assert_eq!(sim.stall_timeout(), None);
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver {
    use pursuit_chase::{ChaseEvent, ChasePhase, FixedTarget, NoopObserver};
    use pursuit_core::{SimTime, Vec3};

    use super::helpers::*;
    use crate::{ChaseSimBuilder, SharedTarget, TickOutcome};

    #[test]
    fn chase_grab_and_deliver() {
        let (g, [door, _, lab, _]) = line();
        let mut sim = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), Vec::<ChaseEvent>::new())
            .home(door)
            .build()
            .unwrap();
        sim.start(&mut NoopObserver).unwrap();

        // 4s + 6s out, 6s + 4s back.
        let outcome = sim.run_for(60.0, &mut NoopObserver);
        assert_eq!(outcome, TickOutcome::Delivered);
        assert!((sim.now().0 - 20.0).abs() < 0.1, "delivered at {}", sim.now());
        assert_eq!(sim.pursuer.phase(), ChasePhase::Delivered);
        assert_eq!(sim.pursuer.hand_position(), Vec3::ZERO);
        assert_eq!(
            sim.pursuer.sink(),
            &vec![ChaseEvent::Attack, ChaseEvent::Captured, ChaseEvent::Delivered]
        );
        assert_eq!(sim.pursuer.state().last_known_target_node, Some(lab));

        // Terminal: later ticks keep reporting delivery.
        assert_eq!(sim.tick(&mut NoopObserver), TickOutcome::Delivered);
    }

    #[test]
    fn run_for_stops_at_the_time_limit() {
        let (g, [door, ..]) = line();
        let mut sim = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), Vec::<ChaseEvent>::new())
            .home(door)
            .fixed_step(0.25)
            .build()
            .unwrap();
        sim.start(&mut NoopObserver).unwrap();

        assert_eq!(sim.run_for(2.0, &mut NoopObserver), TickOutcome::Running);
        assert_eq!(sim.clock.steps, 8);
        assert!(sim.pursuer.is_moving());
    }

    #[test]
    fn stall_reported_when_target_is_lost() {
        let (g, [door, ..]) = line();
        // No waypoint within the search radius of the target.
        let target = FixedTarget(Vec3::new(0.0, 0.0, 900.0));
        let mut sim = ChaseSimBuilder::new(grabbing(), &g, &g, target, Vec::<ChaseEvent>::new())
            .home(door)
            .stall_timeout(1.0)
            .build()
            .unwrap();
        sim.start(&mut NoopObserver).unwrap();

        match sim.run_for(10.0, &mut NoopObserver) {
            TickOutcome::Stalled { idle_secs } => assert!(idle_secs >= 1.0),
            other => panic!("expected a stall, got {other:?}"),
        }
        assert!(sim.now().0 < 1.1);
        assert!(sim.pursuer.state().path_traveled == vec![door]);
    }

    #[test]
    fn progress_resets_the_stall_clock() {
        let (g, [door, ..]) = line();
        let mut sim = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), Vec::<ChaseEvent>::new())
            .home(door)
            .stall_timeout(5.0)
            .build()
            .unwrap();
        sim.start(&mut NoopObserver).unwrap();

        // The longest hop is 6s, but arrival at hall at t=4 resets the clock.
        assert_eq!(sim.run_for(8.0, &mut NoopObserver), TickOutcome::Running);
        assert!(sim.stalled_for() < 5.0);
    }

    #[test]
    fn start_time_offsets_the_clock() {
        let (g, [door, ..]) = line();
        let mut sim = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), Vec::<ChaseEvent>::new())
            .home(door)
            .start_at(SimTime::from_secs(100.0))
            .build()
            .unwrap();
        sim.start(&mut NoopObserver).unwrap();
        assert_eq!(sim.pursuer.state().last_progress, SimTime::from_secs(100.0));
        assert_eq!(sim.pursuer.motion().segment().map(|s| s.start), Some(SimTime::from_secs(100.0)));
    }

    #[test]
    fn shared_target_is_seen_by_the_pursuer() {
        let (g, [door, hall, ..]) = line();
        let target = SharedTarget::new(Vec3::new(0.0, 0.0, 900.0));
        let mut sim = ChaseSimBuilder::new(grabbing(), &g, &g, target.clone(), Vec::<ChaseEvent>::new())
            .home(door)
            .build()
            .unwrap();
        sim.start(&mut NoopObserver).unwrap();
        assert!(!sim.pursuer.is_moving());

        target.set(Vec3::new(4.0, 0.0, 1.0));
        sim.tick(&mut NoopObserver);
        assert_eq!(sim.pursuer.state().last_known_target_node, Some(hall));
        assert!(sim.pursuer.is_moving());
    }
}

// ── HopLog ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod hop_log {
    use std::io::{self, Write};

    use pursuit_chase::{ChaseObserver, FixedTarget, HopKind, IdleReason, NullSink};
    use pursuit_core::{NodeId, SimTime};
    use tempfile::TempDir;

    use super::helpers::*;
    use crate::{ChaseSimBuilder, HopLog, SimError, TickOutcome};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn header_and_rows() {
        let mut log = HopLog::from_writer(Vec::new()).unwrap();
        log.on_chase_started(SimTime::ZERO, NodeId(0));
        log.on_hop_committed(SimTime::ZERO, NodeId(0), NodeId(1), 4.0, HopKind::Advance);
        log.on_idle(SimTime::from_secs(1.5), IdleReason::NoPath);
        assert_eq!(log.rows(), 3);

        let text = String::from_utf8(log.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time_secs,event,from,to,node,value");
        assert_eq!(lines[1], "0.000,started,,,0,");
        assert_eq!(lines[2], "0.000,hop_advance,0,1,,4.000");
        assert_eq!(lines[3], "1.500,idle,,,,no_path");
    }

    #[test]
    fn hop_faults_have_their_own_reasons() {
        let mut log = HopLog::from_writer(Vec::new()).unwrap();
        log.on_idle(SimTime::ZERO, IdleReason::UnplacedNode);
        log.on_idle(SimTime::ZERO, IdleReason::InvalidHop);

        let text = String::from_utf8(log.into_inner().unwrap()).unwrap();
        let reasons: Vec<&str> = text.lines().skip(1).filter_map(|l| l.rsplit(',').next()).collect();
        assert_eq!(reasons, vec!["unplaced_node", "invalid_hop"]);
    }

    #[test]
    fn full_run_to_file() {
        let dir = tmp();
        let path = dir.path().join("hops.csv");
        let (g, [door, ..]) = line();

        let mut log = HopLog::from_path(&path).unwrap();
        let mut sim = ChaseSimBuilder::new(grabbing(), &g, &g, FixedTarget(near_lab()), NullSink)
            .home(door)
            .build()
            .unwrap();
        sim.start(&mut log).unwrap();
        assert_eq!(sim.run_for(60.0, &mut log), TickOutcome::Delivered);
        log.finish().unwrap();
        log.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let events: Vec<&str> = text
            .lines()
            .skip(1)
            .filter_map(|l| l.split(',').nth(1))
            .collect();
        assert_eq!(events.first(), Some(&"started"));
        assert_eq!(events.last(), Some(&"delivered"));
        assert_eq!(events.iter().filter(|e| **e == "hop_advance").count(), 2);
        assert_eq!(events.iter().filter(|e| **e == "hop_retreat").count(), 2);
        assert_eq!(events.iter().filter(|e| **e == "attack").count(), 1);
        assert_eq!(events.iter().filter(|e| **e == "captured").count(), 1);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk gone"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("disk gone"))
        }
    }

    #[test]
    fn flush_failure_surfaces_on_finish() {
        let mut log = HopLog::from_writer(Broken).unwrap();
        log.on_captured(SimTime::ZERO);
        assert!(matches!(log.finish(), Err(SimError::Io(_))));
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod targets {
    use pursuit_chase::TargetSource;
    use pursuit_core::{NodeId, Vec3};
    use pursuit_nav::NavError;

    use super::helpers::*;
    use crate::{SharedTarget, SimError, WanderingTarget};

    #[test]
    fn shared_target_clones_share_state() {
        let a = SharedTarget::new(Vec3::ZERO);
        let b = a.clone();
        b.set(Vec3::X);
        assert_eq!(a.position(), Vec3::X);
    }

    #[test]
    fn walker_follows_the_only_link() {
        let (g, [door, hall, ..]) = line();
        let mut w = WanderingTarget::new(&g, door, 1.0, 7).unwrap();
        assert_eq!(w.advance(1.0, &g), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(w.advance(3.0, &g), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(w.node(), hall);
    }

    #[test]
    fn walker_stays_on_the_graph() {
        let (g, [_, hall, ..]) = line();
        let mut w = WanderingTarget::new(&g, hall, 2.5, 99).unwrap();
        for _ in 0..200 {
            let p = w.advance(0.3, &g);
            assert_eq!(p.y, 0.0);
            assert_eq!(p.z, 0.0);
            assert!((0.0..=10.0).contains(&p.x), "off the corridor at {p}");
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let (g, [_, hall, ..]) = line();
        let mut a = WanderingTarget::new(&g, hall, 3.0, 1234).unwrap();
        let mut b = WanderingTarget::new(&g, hall, 3.0, 1234).unwrap();
        for _ in 0..100 {
            assert_eq!(a.advance(0.25, &g), b.advance(0.25, &g));
        }
    }

    #[test]
    fn unlinked_node_stays_put() {
        let (g, [.., closet]) = line();
        let mut w = WanderingTarget::new(&g, closet, 5.0, 0).unwrap();
        assert_eq!(w.advance(10.0, &g), Vec3::new(40.0, 0.0, 0.0));
    }

    #[test]
    fn unknown_start_rejected() {
        let (g, _) = line();
        assert!(matches!(
            WanderingTarget::new(&g, NodeId(77), 1.0, 0),
            Err(SimError::Nav(NavError::NodeNotFound(NodeId(77))))
        ));
    }
}
