//! Metropolis-style Markov-chain placement sampler for hard disks.
//!
//! A much simpler relative of the event-driven engine: each step picks one
//! disk at random, proposes a uniform displacement, and rejects the move if
//! it would leave the box or overlap another disk. It shares no state with
//! [`crate::core::Simulation`].

use crate::core::vec2::{sq_dist, Vec2};
use crate::error::{Error, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Markov chain over non-overlapping hard-disk configurations in the unit
/// square. The stationary distribution is uniform over legal configurations.
#[derive(Debug)]
pub struct MarkovDisks {
    positions: Vec<Vec2>,
    sigma: f64,
    delta: f64,
    rng: StdRng,
}

impl MarkovDisks {
    /// Create a sampler from an initial legal configuration.
    ///
    /// `delta` is the half-width of the uniform displacement proposal.
    /// Validation mirrors the simulation constructor: sigma in (0, 0.5),
    /// at least two disks, centers inside `[sigma, 1 - sigma]^2` and no
    /// pair closer than `2 sigma`.
    pub fn new(initial: &[Vec2], sigma: f64, delta: f64, seed: Option<u64>) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 || sigma >= 0.5 {
            return Err(Error::InvalidParam(
                "sigma must be finite and in (0, 0.5)".into(),
            ));
        }
        if !delta.is_finite() || delta <= 0.0 {
            return Err(Error::InvalidParam(
                "delta must be finite and > 0".into(),
            ));
        }
        if initial.len() < 2 {
            return Err(Error::InvalidParam(
                "at least 2 disks are required".into(),
            ));
        }
        let lo = sigma;
        let hi = 1.0 - sigma;
        for (i, r) in initial.iter().enumerate() {
            if !r.iter().all(|x| x.is_finite()) {
                return Err(Error::InvalidParam("position must be finite".into()));
            }
            if r.iter().any(|&x| x < lo || x > hi) {
                return Err(Error::InvalidParam(format!(
                    "disk {i} center {r:?} outside [{lo}, {hi}]"
                )));
            }
        }
        let min_sq = 4.0 * sigma * sigma;
        for i in 0..initial.len() {
            for j in (i + 1)..initial.len() {
                if sq_dist(&initial[i], &initial[j]) < min_sq {
                    return Err(Error::InvalidParam(format!(
                        "disks {i} and {j} overlap at the initial configuration"
                    )));
                }
            }
        }

        let rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rand::rng().random()),
        };
        Ok(Self {
            positions: initial.to_vec(),
            sigma,
            delta,
            rng,
        })
    }

    /// Current configuration.
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// One Metropolis step: displace one random disk by a uniform offset in
    /// `[-delta, delta]^2`, rejecting moves that leave the box or bring two
    /// centers closer than `2 sigma`. Returns whether the move was accepted.
    pub fn step(&mut self) -> bool {
        let a = self.rng.random_range(0..self.positions.len());
        let mut b = self.positions[a];
        for b_k in &mut b {
            *b_k += self.rng.random_range(-self.delta..=self.delta);
        }

        let lo = self.sigma;
        let hi = 1.0 - self.sigma;
        if b.iter().any(|&x| x < lo || x > hi) {
            return false;
        }
        let min_sq = 4.0 * self.sigma * self.sigma;
        for (c, r) in self.positions.iter().enumerate() {
            if c != a && sq_dist(r, &b) < min_sq {
                return false;
            }
        }

        self.positions[a] = b;
        true
    }

    /// Run `n_steps` steps, returning the number of accepted moves.
    pub fn run(&mut self, n_steps: usize) -> usize {
        (0..n_steps).filter(|_| self.step()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT: [Vec2; 4] = [[0.25, 0.25], [0.75, 0.25], [0.25, 0.75], [0.75, 0.75]];

    fn is_legal(positions: &[Vec2], sigma: f64) -> bool {
        let min_sq = 4.0 * sigma * sigma;
        let in_box = positions
            .iter()
            .all(|r| r.iter().all(|&x| x >= sigma && x <= 1.0 - sigma));
        let separated = (0..positions.len()).all(|i| {
            ((i + 1)..positions.len()).all(|j| sq_dist(&positions[i], &positions[j]) >= min_sq)
        });
        in_box && separated
    }

    #[test]
    fn chain_preserves_legality() -> Result<()> {
        let mut mc = MarkovDisks::new(&INIT, 0.15, 0.1, Some(2024))?;
        for _ in 0..5_000 {
            mc.step();
            assert!(is_legal(mc.positions(), 0.15));
        }
        Ok(())
    }

    #[test]
    fn chain_accepts_some_moves() -> Result<()> {
        let mut mc = MarkovDisks::new(&INIT, 0.15, 0.1, Some(7))?;
        let accepted = mc.run(10_000);
        assert!(accepted > 0, "a non-jammed chain must move eventually");
        assert!(accepted < 10_000, "some proposals must be rejected at this density");
        Ok(())
    }

    #[test]
    fn seeded_chains_agree() -> Result<()> {
        let mut a = MarkovDisks::new(&INIT, 0.15, 0.1, Some(99))?;
        let mut b = MarkovDisks::new(&INIT, 0.15, 0.1, Some(99))?;
        a.run(1_000);
        b.run(1_000);
        assert_eq!(a.positions(), b.positions());
        Ok(())
    }

    #[test]
    fn overlapping_initial_configuration_rejected() {
        let bad = [[0.40, 0.5], [0.55, 0.5]];
        let err = MarkovDisks::new(&bad, 0.15, 0.1, Some(0)).unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn invalid_delta_rejected() {
        let err = MarkovDisks::new(&INIT, 0.15, 0.0, Some(0)).unwrap_err();
        assert!(err.to_string().contains("delta"));
    }
}
