//! `HopLog<W>`: writes every planner decision as a CSV row.
//!
//! Columns: `time_secs, event, from, to, node, value`.  Cells that do not
//! apply to an event are left empty; `value` carries the hop duration, the
//! attack distance, the idle reason, or the replanned hop count.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use pursuit_chase::{ChaseObserver, HopKind, IdleReason};
use pursuit_core::{NodeId, SimTime};

use crate::{SimError, SimResult};

const HEADER: [&str; 6] = ["time_secs", "event", "from", "to", "node", "value"];

/// A [`ChaseObserver`] that records the chase to CSV.
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value.  After the run, call [`finish`][Self::finish] to flush
/// and surface the first stored error.
pub struct HopLog<W: Write> {
    writer:     Writer<W>,
    rows:       u64,
    finished:   bool,
    last_error: Option<SimError>,
}

impl HopLog<File> {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn from_path(path: &Path) -> SimResult<Self> {
        Self::new(Writer::from_path(path)?)
    }
}

impl<W: Write> HopLog<W> {
    /// Write the header row to `inner`.
    pub fn from_writer(inner: W) -> SimResult<Self> {
        Self::new(Writer::from_writer(inner))
    }

    fn new(mut writer: Writer<W>) -> SimResult<Self> {
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0, finished: false, last_error: None })
    }

    /// Data rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<SimError> {
        self.last_error.take()
    }

    /// Flush buffered rows.  Returns the first error seen during the run, or
    /// the flush error.  Idempotent.
    pub fn finish(&mut self) -> SimResult<()> {
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the inner writer (e.g. a `Vec<u8>` in tests).
    pub fn into_inner(mut self) -> SimResult<W> {
        self.finish()?;
        self.writer
            .into_inner()
            .map_err(|e| SimError::Io(e.into_error()))
    }

    fn row(
        &mut self,
        now:   SimTime,
        event: &str,
        from:  Option<NodeId>,
        to:    Option<NodeId>,
        node:  Option<NodeId>,
        value: String,
    ) {
        let id = |n: Option<NodeId>| n.map(|n| n.0.to_string()).unwrap_or_default();
        let result = self.writer.write_record([
            format!("{:.3}", now.0),
            event.to_owned(),
            id(from),
            id(to),
            id(node),
            value,
        ]);
        match result {
            Ok(()) => self.rows += 1,
            Err(e) => self.store_err(e.into()),
        }
    }

    fn store_err(&mut self, err: SimError) {
        // Keep only the first error.
        if self.last_error.is_none() {
            tracing::warn!(error = %err, "hop log write failed");
            self.last_error = Some(err);
        }
    }
}

fn kind_name(kind: HopKind) -> &'static str {
    match kind {
        HopKind::Advance => "advance",
        HopKind::Retreat => "retreat",
    }
}

fn reason_name(reason: IdleReason) -> &'static str {
    match reason {
        IdleReason::NoTargetNode       => "no_target_node",
        IdleReason::NoPath             => "no_path",
        IdleReason::HopBudgetExhausted => "hop_budget_exhausted",
        IdleReason::UnplacedNode       => "unplaced_node",
        IdleReason::InvalidHop         => "invalid_hop",
    }
}

impl<W: Write> ChaseObserver for HopLog<W> {
    fn on_chase_started(&mut self, now: SimTime, home: NodeId) {
        self.row(now, "started", None, None, Some(home), String::new());
    }

    fn on_replanned(&mut self, now: SimTime, path: &[NodeId]) {
        let from = path.first().copied();
        let to   = path.last().copied();
        self.row(now, "replanned", from, to, None, path.len().saturating_sub(1).to_string());
    }

    fn on_hop_committed(
        &mut self,
        now:      SimTime,
        from:     NodeId,
        to:       NodeId,
        duration: f64,
        kind:     HopKind,
    ) {
        let event = match kind {
            HopKind::Advance => "hop_advance",
            HopKind::Retreat => "hop_retreat",
        };
        self.row(now, event, Some(from), Some(to), None, format!("{duration:.3}"));
    }

    fn on_arrived(&mut self, now: SimTime, node: NodeId, kind: HopKind) {
        self.row(now, "arrived", None, None, Some(node), kind_name(kind).to_owned());
    }

    fn on_attack(&mut self, now: SimTime, distance: f32) {
        self.row(now, "attack", None, None, None, format!("{distance:.3}"));
    }

    fn on_idle(&mut self, now: SimTime, reason: IdleReason) {
        self.row(now, "idle", None, None, None, reason_name(reason).to_owned());
    }

    fn on_captured(&mut self, now: SimTime) {
        self.row(now, "captured", None, None, None, String::new());
    }

    fn on_delivered(&mut self, now: SimTime, home: NodeId) {
        self.row(now, "delivered", None, None, Some(home), String::new());
    }
}
