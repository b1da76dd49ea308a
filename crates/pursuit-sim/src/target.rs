//! Target sources for simulations and demos.

use std::cell::Cell;
use std::rc::Rc;

use pursuit_chase::TargetSource;
use pursuit_core::{NodeId, Vec3};
use pursuit_nav::{NavError, NavGraph};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::SimResult;

// ── SharedTarget ──────────────────────────────────────────────────────────────

/// A target position shared between the pursuer and whatever moves it.
///
/// Clones share one cell; the pursuer reads through its clone while the
/// driver writes through another.
#[derive(Debug, Clone, Default)]
pub struct SharedTarget(Rc<Cell<Vec3>>);

impl SharedTarget {
    pub fn new(position: Vec3) -> Self {
        Self(Rc::new(Cell::new(position)))
    }

    #[inline]
    pub fn set(&self, position: Vec3) {
        self.0.set(position);
    }

    #[inline]
    pub fn get(&self) -> Vec3 {
        self.0.get()
    }
}

impl TargetSource for SharedTarget {
    fn position(&self) -> Vec3 {
        self.get()
    }
}

// ── WanderingTarget ───────────────────────────────────────────────────────────

/// Upper bound on links crossed in one `advance`, so coincident nodes cannot
/// spin forever.
const MAX_LINKS_PER_ADVANCE: usize = 64;

/// A target that walks the navigation graph at constant speed, choosing a
/// random outgoing link at every node.
///
/// Seeded, so a run with the same graph, seed, and step sequence always
/// takes the same walk.
pub struct WanderingTarget {
    rng:      SmallRng,
    speed:    f32,
    at:       NodeId,
    heading:  NodeId,
    /// Distance already covered from `at` toward `heading`.
    covered:  f32,
    position: Vec3,
}

impl WanderingTarget {
    /// Place the walker on `start`.
    ///
    /// # Errors
    ///
    /// [`NavError::NodeNotFound`] if `start` is not in `graph`.
    pub fn new(graph: &NavGraph, start: NodeId, speed: f32, seed: u64) -> SimResult<Self> {
        let position = graph
            .node_position(start)
            .ok_or(NavError::NodeNotFound(start))?;
        Ok(Self {
            rng: SmallRng::seed_from_u64(seed),
            speed: speed.max(0.0),
            at: start,
            heading: start,
            covered: 0.0,
            position,
        })
    }

    /// Walk for `dt` seconds and return the new position.
    ///
    /// A walker on a node without outgoing links stays put.
    pub fn advance(&mut self, dt: f64, graph: &NavGraph) -> Vec3 {
        let mut budget = self.speed * dt.max(0.0) as f32;

        for _ in 0..MAX_LINKS_PER_ADVANCE {
            if self.heading == self.at && !self.pick_heading(graph) {
                break;
            }
            let (Some(from), Some(to)) = (graph.node_position(self.at), graph.node_position(self.heading))
            else {
                break;
            };

            let left = from.distance(to) - self.covered;
            if budget < left {
                self.covered += budget;
                let len = from.distance(to);
                self.position = from.lerp(to, self.covered / len);
                return self.position;
            }

            budget -= left.max(0.0);
            self.at = self.heading;
            self.covered = 0.0;
            self.position = to;
        }
        self.position
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Node the walker last passed.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.at
    }

    fn pick_heading(&mut self, graph: &NavGraph) -> bool {
        let n = graph.out_degree(self.at);
        if n == 0 {
            return false;
        }
        let k = self.rng.gen_range(0..n);
        match graph.neighbors(self.at).nth(k) {
            Some(next) => {
                self.heading = next;
                true
            }
            None => false,
        }
    }
}

impl TargetSource for WanderingTarget {
    fn position(&self) -> Vec3 {
        self.position
    }
}
