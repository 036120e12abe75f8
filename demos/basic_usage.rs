//! Example usage of the Chebyshev spectral crate

use chebyshev_spectral::{global, FilterConfig, GridConfig, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Chebyshev Spectral Examples ===\n");

    // Example 1: derivative of sin(x) over one full period
    let session = Session::init(16, 0.0, std::f64::consts::TAU)?;
    let v: Vec<f64> = session.points().iter().map(|x| x.sin()).collect();
    let mut dv = vec![0.0; session.n()];
    session.der(&v, &mut dv)?;

    println!("1. d/dx sin(x) on [0, 2π] with n = {}:", session.n());
    for (x, d) in session.points().iter().zip(&dv) {
        println!("  x = {:8.5}  der = {:9.6}  cos(x) = {:9.6}", x, d, x.cos());
    }

    // Example 2: second derivative, with a filter pass in between
    println!("\n2. Second derivative of exp(-x²) on [-3, 3], filtered:");
    let config = GridConfig::new(32, -3.0, 3.0)?.with_filter(FilterConfig::new(36.0, 8.0)?);
    let session = Session::new(config)?;
    let v: Vec<f64> = session.points().iter().map(|x| (-x * x).exp()).collect();
    let mut first = session.derivative(&v)?;
    session.filter(&mut first)?;
    let second = session.derivative(&first)?;
    let worst = session
        .points()
        .iter()
        .zip(&second)
        .map(|(x, d)| (d - (4.0 * x * x - 2.0) * (-x * x).exp()).abs())
        .fold(0.0, f64::max);
    println!("  max error: {:.3e}", worst);

    // Example 3: off-grid evaluation
    println!("\n3. Interpolant of exp(-x²) at x = 0.25: {:.12}", session.interpolate(&v, 0.25)?);

    // Example 4: process-wide session as used by language bindings
    println!("\n4. Global session:");
    global::init(8, -1.0, 1.0)?;
    let v: Vec<f64> = (0..global::n()?).map(global::pt).collect::<Result<_, _>>()?;
    let mut dv = vec![0.0; v.len()];
    global::der(&v, &mut dv)?;
    println!("  d/dx x = {:?}", dv);
    global::cleanup()?;

    Ok(())
}
