use crate::core::event::{CandidateEvent, EventKind};
use crate::core::particle::Particle;
use crate::core::vec2::{diff, dot, sq_dist, Vec2, DIM};
use crate::error::{Error, Result};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Small numeric tolerance for geometric degeneracy checks.
const EPS_DIST: f64 = 1e-12;

/// How often the driver emits a progress log line, in events.
const LOG_EVERY: usize = 100_000;

/// Which observable is recorded at each integer time mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observable {
    /// A single coordinate of a single particle.
    Coordinate { particle: usize, axis: usize },
    /// The full set of disk positions.
    Positions,
}

impl Default for Observable {
    /// The reference observable: particle 0's x-coordinate.
    fn default() -> Self {
        Observable::Coordinate {
            particle: 0,
            axis: 0,
        }
    }
}

/// One recorded sample.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    Scalar(f64),
    Positions(Vec<Vec2>),
}

/// Ordered sequence of samples, one per integer time unit elapsed.
pub type SampleSequence = Vec<Sample>;

/// Time until a coordinate reaches its near wall (at `sigma`) or far wall
/// (at `1 - sigma`), given its velocity component on that axis.
///
/// Returns `None` when the velocity is zero: no wall event on this axis.
/// Precondition: the coordinate lies in `[sigma, 1 - sigma]`, so the
/// returned time is non-negative.
#[inline]
pub fn wall_time(pos: f64, vel: f64, sigma: f64) -> Option<f64> {
    if vel > 0.0 {
        Some((1.0 - sigma - pos) / vel)
    } else if vel < 0.0 {
        Some((pos - sigma) / -vel)
    } else {
        None
    }
}

/// Earliest time two disks of radius `sigma` first touch along their
/// relative straight-line trajectory, or `None` if they never do.
///
/// With dx = pos_b - pos_a, dv = vel_b - vel_a and b = dv . dx, the contact
/// condition |dx + dv t| = 2 sigma has discriminant
/// upsilon = b^2 - |dv|^2 (|dx|^2 - 4 sigma^2). A physically valid collision
/// requires upsilon > 0 strictly and b < 0 strictly (disks approaching).
/// The guard also excludes |dv|^2 = 0, so the division is well-defined.
pub fn pair_time(pos_a: &Vec2, vel_a: &Vec2, pos_b: &Vec2, vel_b: &Vec2, sigma: f64) -> Option<f64> {
    let dx = diff(pos_a, pos_b);
    let dv = diff(vel_a, vel_b);
    let dv_sq = dot(&dv, &dv);
    let b = dot(&dv, &dx);
    let upsilon = b * b - dv_sq * (dot(&dx, &dx) - 4.0 * sigma * sigma);
    if upsilon > 0.0 && b < 0.0 {
        Some(-(b + upsilon.sqrt()) / dv_sq)
    } else {
        None
    }
}

/// Event-driven hard-disk simulation in the unit square.
///
/// All N disks share the same radius `sigma` and unit mass. Time advances
/// exactly to each wall or pair event; between events every disk moves in a
/// straight line. Samples of the configured observable are recorded at each
/// integer time mark crossed.
#[derive(Debug, Clone)]
pub struct Simulation {
    time_now: f64,
    sigma: f64,
    observable: Observable,
    pub particles: Vec<Particle>,
}

impl Simulation {
    /// Create a simulation from explicit initial positions and velocities.
    ///
    /// Fails fast on malformed configuration: fewer than two disks, sigma
    /// outside (0, 0.5), mismatched input lengths, non-finite components,
    /// a center outside `[sigma, 1 - sigma]` on either axis, or two centers
    /// closer than the contact distance `2 sigma`.
    pub fn new(
        positions: &[Vec2],
        velocities: &[Vec2],
        sigma: f64,
        observable: Observable,
    ) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 || sigma >= 0.5 {
            return Err(Error::InvalidParam(
                "sigma must be finite and in (0, 0.5)".into(),
            ));
        }
        if positions.len() < 2 {
            return Err(Error::InvalidParam(
                "at least 2 particles are required".into(),
            ));
        }
        if positions.len() != velocities.len() {
            return Err(Error::InvalidParam(format!(
                "got {} positions but {} velocities",
                positions.len(),
                velocities.len()
            )));
        }

        let mut particles = Vec::with_capacity(positions.len());
        for (id, (&r, &v)) in positions.iter().zip(velocities).enumerate() {
            particles.push(Particle::new(id as u32, r, v)?);
        }

        check_layout(&particles, sigma)?;

        let sim = Self {
            time_now: 0.0,
            sigma,
            observable,
            particles,
        };
        sim.check_observable()?;
        Ok(sim)
    }

    /// Create a simulation with rejection-sampled non-overlapping positions
    /// in `[sigma, 1 - sigma]^2` and velocities uniform in [-1, 1]^2.
    ///
    /// Deterministic for a given `seed`; `None` seeds from the OS.
    pub fn random(
        num_particles: usize,
        sigma: f64,
        observable: Observable,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 || sigma >= 0.5 {
            return Err(Error::InvalidParam(
                "sigma must be finite and in (0, 0.5)".into(),
            ));
        }
        if num_particles < 2 {
            return Err(Error::InvalidParam(
                "at least 2 particles are required".into(),
            ));
        }

        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rand::rng().random()),
        };

        let lo = sigma;
        let hi = 1.0 - sigma;
        let min_sq = 4.0 * sigma * sigma;
        let max_attempts = 1_000_000usize;

        let mut positions: Vec<Vec2> = Vec::with_capacity(num_particles);
        for id in 0..num_particles {
            let mut attempts = 0usize;
            let r = loop {
                if attempts >= max_attempts {
                    return Err(Error::InvalidParam(format!(
                        "failed to place disk {id} without overlap; try fewer disks or smaller sigma"
                    )));
                }
                attempts += 1;
                let r = [rng.random_range(lo..=hi), rng.random_range(lo..=hi)];
                if positions.iter().all(|p| sq_dist(p, &r) >= min_sq) {
                    break r;
                }
            };
            positions.push(r);
        }

        let velocities: Vec<Vec2> = (0..num_particles)
            .map(|_| [rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0)])
            .collect();

        Self::new(&positions, &velocities, sigma, observable)
    }

    /// Returns current simulation time.
    pub fn time(&self) -> f64 {
        self.time_now
    }

    /// Shared disk radius.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Number of disks.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Positions as a Vec of fixed-size arrays.
    pub fn positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.r).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.v).collect()
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Total momentum, componentwise (diagnostic).
    pub fn momentum(&self) -> Vec2 {
        let mut m = [0.0; DIM];
        for p in &self.particles {
            for k in 0..DIM {
                m[k] += p.v[k];
            }
        }
        m
    }

    /// Run `event_budget` event iterations, returning the samples recorded
    /// at every integer time mark crossed.
    ///
    /// Each iteration selects the globally earliest wall or pair event,
    /// advances all disks exactly to it (emitting samples at the integer
    /// marks passed on the way), and applies the elastic response. The state
    /// is consistent at the end of every iteration, so `run` may be called
    /// repeatedly to continue the same trajectory.
    pub fn run(&mut self, event_budget: usize) -> Result<SampleSequence> {
        if event_budget == 0 {
            return Err(Error::InvalidParam("event_budget must be > 0".into()));
        }

        let mut samples = SampleSequence::new();
        for event in 0..event_budget {
            if event % LOG_EVERY == 0 {
                debug!(
                    "event {event}/{event_budget}: t = {:.4}, {} samples",
                    self.time_now,
                    samples.len()
                );
            }

            let Some(ev) = self.next_event()? else {
                return Err(Error::Stalled);
            };

            self.advance_with_samples(ev.time_f64(), &mut samples);

            match ev.kind {
                EventKind::Wall { particle, axis } => {
                    self.resolve_wall(particle as usize, axis as usize);
                }
                EventKind::Pair { i, j } => {
                    self.resolve_pair(i as usize, j as usize)?;
                }
            }
        }
        Ok(samples)
    }

    // ============ Internal helpers ============

    /// Scan all 2N wall candidates and N(N-1)/2 pair candidates and return
    /// the earliest, or `None` when no candidate exists (all velocities
    /// zero). Ties at equal time go to the first-enumerated candidate:
    /// walls before pairs, each group in fixed index order.
    fn next_event(&self) -> Result<Option<CandidateEvent>> {
        let mut best: Option<CandidateEvent> = None;

        for p in &self.particles {
            for axis in 0..DIM {
                if let Some(t) = wall_time(p.r[axis], p.v[axis], self.sigma) {
                    if t < 0.0 {
                        continue;
                    }
                    let ev = CandidateEvent::new(
                        t,
                        EventKind::Wall {
                            particle: p.id,
                            axis: axis as u8,
                        },
                    )?;
                    if best.map_or(true, |b| ev < b) {
                        best = Some(ev);
                    }
                }
            }
        }

        let n = self.particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (pi, pj) = (&self.particles[i], &self.particles[j]);
                if let Some(t) = pair_time(&pi.r, &pi.v, &pj.r, &pj.v, self.sigma) {
                    if t < 0.0 {
                        continue;
                    }
                    let ev = CandidateEvent::new(t, EventKind::Pair { i: pi.id, j: pj.id })?;
                    if best.map_or(true, |b| ev < b) {
                        best = Some(ev);
                    }
                }
            }
        }

        Ok(best)
    }

    /// Advance all disks by `dt`, sub-stepping at every integer time mark
    /// strictly after the current time and at or before the event time.
    /// One sample is recorded per mark, so an event spanning several marks
    /// still emits one sample per unit of simulated time, and an event that
    /// lands exactly on a mark samples it once.
    fn advance_with_samples(&mut self, dt: f64, samples: &mut SampleSequence) {
        let t_end = self.time_now + dt;
        let first_mark = self.time_now.floor() as i64 + 1;
        let last_mark = t_end.floor() as i64;

        let mut t_prev = self.time_now;
        for mark in first_mark..=last_mark {
            let mark_t = mark as f64;
            self.drift_all(mark_t - t_prev);
            t_prev = mark_t;
            samples.push(self.record_sample());
        }
        self.drift_all(t_end - t_prev);
        self.time_now = t_end;
    }

    /// Straight-line motion of every disk over `dt`.
    fn drift_all(&mut self, dt: f64) {
        for p in &mut self.particles {
            p.drift(dt);
        }
    }

    /// Snapshot the configured observable.
    fn record_sample(&self) -> Sample {
        match self.observable {
            Observable::Coordinate { particle, axis } => {
                Sample::Scalar(self.particles[particle].r[axis])
            }
            Observable::Positions => Sample::Positions(self.positions()),
        }
    }

    /// Specular wall reflection: flip the velocity component on the hit axis.
    fn resolve_wall(&mut self, i: usize, axis: usize) {
        self.particles[i].v[axis] = -self.particles[i].v[axis];
    }

    /// Elastic equal-mass collision between disks `i` and `j`: exchange the
    /// velocity components along the line of centers, leave the tangential
    /// components untouched. Conserves momentum and kinetic energy exactly.
    fn resolve_pair(&mut self, i: usize, j: usize) -> Result<()> {
        let dx = diff(&self.particles[i].r, &self.particles[j].r);
        let dist = dot(&dx, &dx).sqrt();
        if dist <= EPS_DIST {
            // Nearly coincident centers - numerical pathology
            return Err(Error::MathError(
                "degenerate contact normal in pair collision".into(),
            ));
        }
        let e_perp = [dx[0] / dist, dx[1] / dist];

        let dv = diff(&self.particles[i].v, &self.particles[j].v);
        let scal = dot(&dv, &e_perp);
        for k in 0..DIM {
            self.particles[i].v[k] += e_perp[k] * scal;
            self.particles[j].v[k] -= e_perp[k] * scal;
        }
        Ok(())
    }

    fn check_observable(&self) -> Result<()> {
        if let Observable::Coordinate { particle, axis } = self.observable {
            if particle >= self.particles.len() {
                return Err(Error::InvalidParam(format!(
                    "observable particle {particle} out of range (N = {})",
                    self.particles.len()
                )));
            }
            if axis >= DIM {
                return Err(Error::InvalidParam(format!(
                    "observable axis {axis} out of range (DIM = {DIM})"
                )));
            }
        }
        Ok(())
    }
}

/// Validate that every center lies in `[sigma, 1 - sigma]^2` and that no
/// two centers are closer than the contact distance `2 sigma`.
fn check_layout(particles: &[Particle], sigma: f64) -> Result<()> {
    let lo = sigma;
    let hi = 1.0 - sigma;
    for p in particles {
        for k in 0..DIM {
            if p.r[k] < lo || p.r[k] > hi {
                return Err(Error::InvalidParam(format!(
                    "disk {} center {:?} outside [{lo}, {hi}] on axis {k}",
                    p.id, p.r
                )));
            }
        }
    }
    let min_sq = 4.0 * sigma * sigma;
    for (i, pi) in particles.iter().enumerate() {
        for pj in &particles[i + 1..] {
            if sq_dist(&pi.r, &pj.r) < min_sq {
                return Err(Error::InvalidParam(format!(
                    "disks {} and {} overlap at the initial configuration",
                    pi.id, pj.id
                )));
            }
        }
    }
    Ok(())
}
