use diskmd::error::Result;
use diskmd::{pair_time, Observable, Simulation};

/// Head-on equal-speed collision: the disks exchange velocities exactly.
#[test]
fn head_on_collision_exchanges_velocities() -> Result<()> {
    let sigma = 0.1197;
    let positions = [[0.25, 0.5], [0.75, 0.5]];
    let velocities = [[0.5, 0.0], [-0.5, 0.0]];

    // Centers 0.5 apart closing at relative speed 1: contact once the gap
    // shrinks to 2 sigma, so t = 0.5 - 2 sigma.
    let t = pair_time(
        &positions[0],
        &velocities[0],
        &positions[1],
        &velocities[1],
        sigma,
    )
    .expect("head-on disks must collide");
    assert!(t > 0.0);
    assert!((t - (0.5 - 2.0 * sigma)).abs() < 1e-12);

    let mut sim = Simulation::new(&positions, &velocities, sigma, Observable::default())?;
    sim.run(1)?;

    let v = sim.velocities();
    assert!((v[0][0] + 0.5).abs() < 1e-12 && v[0][1].abs() < 1e-12);
    assert!((v[1][0] - 0.5).abs() < 1e-12 && v[1][1].abs() < 1e-12);
    Ok(())
}

/// Disks sharing a velocity never collide with each other; the run is pure
/// wall bounces and stays elastic.
#[test]
fn parallel_disks_only_bounce_off_walls() -> Result<()> {
    assert!(pair_time(&[0.3, 0.5], &[0.4, -0.2], &[0.7, 0.5], &[0.4, -0.2], 0.1).is_none());

    let mut sim = Simulation::new(
        &[[0.3, 0.5], [0.7, 0.5]],
        &[[0.4, -0.2], [0.4, -0.2]],
        0.1,
        Observable::default(),
    )?;
    let e0 = sim.kinetic_energy();
    sim.run(50)?;
    assert!(((sim.kinetic_energy() - e0) / e0).abs() < 1e-12);

    // Specular reflections preserve the relative velocity only up to sign
    // flips, so the pair can start approaching; they still can never touch
    // while their velocities agree, which holds between any two events.
    Ok(())
}

/// A long reference run: the trajectory stays physical from start to finish.
#[test]
fn reference_run_stays_physical() -> Result<()> {
    let positions = [[0.25, 0.25], [0.75, 0.25], [0.25, 0.75], [0.75, 0.75]];
    let velocities = [[0.21, 0.12], [0.71, 0.18], [-0.23, -0.79], [0.78, 0.1177]];
    let sigma = 0.1197;

    let mut sim = Simulation::new(&positions, &velocities, sigma, Observable::default())?;
    let samples = sim.run(50_000)?;

    assert_eq!(samples.len(), sim.time().floor() as usize);

    // Post-event positions sit inside the accessible square
    let tol = 1e-9;
    for r in sim.positions() {
        for x in r {
            assert!(x >= sigma - tol && x <= 1.0 - sigma + tol, "disk escaped: {r:?}");
        }
    }
    Ok(())
}
