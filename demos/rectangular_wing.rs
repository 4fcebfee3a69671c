//! Lift distribution of a rectangular wing of aspect ratio 8,
//! compared against the classical lifting-line lift-curve slope.
//!
//! Prints the spanwise section lift coefficient at 5 degrees
//! and the linear lift curve of the wing.

use blackwell::{sweep, LatticeConfig, PlanformGeometry, Solver};
use std::f64::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let aspect_ratio = 8.;
    let chord = 1.5;
    let semispan = aspect_ratio * chord / 2.;

    let wing = PlanformGeometry::trapezoidal(semispan, chord, chord, 0.)?;
    let config = LatticeConfig {
        mach: 0.2,
        altitude: 1_000.,
        ..LatticeConfig::with_panels(24)
    };
    let solver = Solver::new(wing, config)?;

    let alpha = 5f64.to_radians();
    let (solution, induced) = solver.vertical_velocity(alpha)?;
    println!(
        "alpha = {:.1} deg, TAS = {:.1} m/s, CL = {:.4}",
        alpha.to_degrees(),
        solver.true_airspeed(),
        solution.cl_overall
    );

    println!("\n{:>8} {:>10} {:>10} {:>10}", "y", "cl", "ccl", "gamma");
    let loading = &solution.loading;
    for i in 0..loading.len() {
        println!(
            "{:>8.3} {:>10.4} {:>10.4} {:>10.3}",
            loading.stations[i], loading.cl[i], loading.ccl[i], loading.gamma[i]
        );
    }

    println!("\n{:>8} {:>10} {:>12}", "y", "w", "eps (deg)");
    for (y, (w, eps)) in induced
        .control_stations
        .iter()
        .zip(induced.vertical_velocity.iter().zip(&induced.induced_angle))
    {
        println!("{y:>8.3} {w:>10.4} {:>12.4}", eps.to_degrees());
    }

    let slope = sweep::lift_slope(&solver, alpha)?;
    let lifting_line = 2. * PI * aspect_ratio / (aspect_ratio + 2.);
    println!(
        "\nCL_alpha = {:.4} /rad (lifting line, incompressible: {lifting_line:.4}), alpha_0L = {:.3} deg",
        slope.cl_alpha,
        slope.alpha_zero_lift.to_degrees()
    );

    let alphas: Vec<f64> = (-4..=12).map(|deg| f64::from(deg).to_radians()).collect();
    let curve = sweep::lift_curve(&solver, &alphas)?;
    println!("\n{:>8} {:>8}", "alpha", "CL");
    for (alpha, cl) in curve.iter() {
        println!("{:>8.1} {cl:>8.4}", alpha.to_degrees());
    }

    Ok(())
}
