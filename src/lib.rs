//! Event-driven molecular dynamics of hard disks in the unit square.
//!
//! N rigid disks of shared radius sigma move ballistically until the next
//! wall bounce or pair collision; time jumps exactly to each event rather
//! than through fixed steps. The engine records a configurable observable
//! at every integer time mark crossed and hands the resulting sample
//! sequence to the caller. It performs no I/O of its own: plotting,
//! histogramming and argument parsing belong to external collaborators.
//!
//! ```
//! use diskmd::{Observable, Simulation};
//!
//! // The reference four-disk configuration at packing density eta = 0.18
//! let positions = [[0.25, 0.25], [0.75, 0.25], [0.25, 0.75], [0.75, 0.75]];
//! let velocities = [[0.21, 0.12], [0.71, 0.18], [-0.23, -0.79], [0.78, 0.1177]];
//! let mut sim = Simulation::new(&positions, &velocities, 0.1197, Observable::default())?;
//! let samples = sim.run(1_000)?;
//! assert_eq!(samples.len(), sim.time().floor() as usize);
//! # Ok::<(), diskmd::Error>(())
//! ```
//!
//! The [`markov`] module holds an independent Metropolis disk-placement
//! sampler over the same geometry; it shares no state with the engine.

pub mod core;
pub mod error;
pub mod markov;

pub use crate::core::{
    pair_time, wall_time, CandidateEvent, EventKind, Observable, Particle, Sample,
    SampleSequence, Simulation,
};
pub use crate::error::{Error, Result};
pub use crate::markov::MarkovDisks;
