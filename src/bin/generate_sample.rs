use std::path::Path;

use anyhow::{Context, Result};
use rusty_fit::regression::RegressionCalculator;

/// Curve the sample points are drawn around: y = 0.5x³ − 2x² + x + 4.
fn cubic(x: f64) -> f64 {
    0.5 * x.powi(3) - 2.0 * x.powi(2) + x + 4.0
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // x: -2.0 → 5.0, step 0.25
    let mut calc = RegressionCalculator::new();
    for i in 0..=28 {
        let x = -2.0 + i as f64 * 0.25;
        let y = cubic(x) + rng.gauss(0.0, 0.4);
        // Two decimals keep the file readable.
        calc.push(x, (y * 100.0).round() / 100.0);
    }

    let output_path = Path::new("sample_data.ini");
    calc.save(output_path)
        .with_context(|| format!("writing {}", output_path.display()))?;

    let fit = calc.compute_polynomial(3).context("fitting the generated points")?;
    println!(
        "Wrote {} points to {}; cubic fit: {fit}",
        calc.points().len(),
        output_path.display()
    );
    Ok(())
}
