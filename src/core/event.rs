use crate::error::{Error, Result};
use ordered_float::NotNan;
use std::cmp::Ordering;

/// Kinds of candidate events in the event-driven engine.
///
/// Tie-breaking for deterministic selection prefers `Wall` < `Pair` when
/// times are equal, matching the order in which candidates are enumerated
/// (wall candidates first, each group in fixed index order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Particle `particle` reaching the near or far wall on `axis`.
    Wall { particle: u32, axis: u8 },
    /// Disks `i` and `j` touching (`i < j`).
    Pair { i: u32, j: u32 },
}

impl EventKind {
    #[inline]
    fn order_key(&self) -> (u8, u32, u32) {
        match *self {
            EventKind::Wall { particle, axis } => (0, particle, u32::from(axis)),
            EventKind::Pair { i, j } => (1, i, j),
        }
    }
}

/// A candidate event with its time-to-occurrence.
///
/// Candidates are ephemeral: the selector recomputes the full set every
/// iteration and keeps only the minimum, so nothing here is ever stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateEvent {
    /// Time from the current simulation time until the event (finite, non-NaN).
    pub time: NotNan<f64>,
    /// Event kind and participants.
    pub kind: EventKind,
}

impl CandidateEvent {
    /// Create a new candidate, validating that time is finite and non-negative.
    pub fn new(time: f64, kind: EventKind) -> Result<Self> {
        if !time.is_finite() {
            return Err(Error::InvalidParam(
                "event time must be finite and non-NaN".into(),
            ));
        }
        if time < 0.0 {
            return Err(Error::MathError(format!(
                "negative event time {time}; initial state violates preconditions"
            )));
        }
        let time = NotNan::new(time)
            .map_err(|_| Error::InvalidParam("event time cannot be NaN".into()))?;
        Ok(Self { time, kind })
    }

    /// Returns the raw f64 time-to-event.
    #[inline]
    pub fn time_f64(&self) -> f64 {
        self.time.into_inner()
    }
}

impl Ord for CandidateEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.time.cmp(&other.time) {
            Ordering::Equal => self.kind.order_key().cmp(&other.kind.order_key()),
            o => o,
        }
    }
}

impl PartialOrd for CandidateEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
