//! Core data structures and the event-driven engine for hard disks.
//!
//! Leaf-to-root: 2-D vector helpers, the particle type, candidate events
//! with deterministic ordering, and the simulation itself (event time
//! solving, selection, state advancement, collision response, driver).

pub mod event;
pub mod particle;
pub mod sim;
pub mod vec2;

pub use event::{CandidateEvent, EventKind};
pub use particle::Particle;
pub use sim::{pair_time, wall_time, Observable, Sample, SampleSequence, Simulation};
