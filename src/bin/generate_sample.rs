use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// Same shape as the files written by the IVF-flat index builder.
#[derive(Serialize)]
struct IndexFile {
    centroids: Vec<Vec<f64>>,
    clusters: Vec<Vec<usize>>,
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

const CLUSTER_COUNT: usize = 1000;
const POINT_COUNT: usize = 50_000;
const DIMENSIONS: usize = 50;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_index.json"));

    let centroids: Vec<Vec<f64>> = (0..CLUSTER_COUNT)
        .map(|_| (0..DIMENSIONS).map(|_| rng.gauss(0.0, 1.0)).collect())
        .collect();

    // Log-normal cluster weights give the long right tail real indexes show.
    let weights: Vec<f64> = (0..CLUSTER_COUNT)
        .map(|_| rng.gauss(0.0, 0.8).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    let mut cumulative = Vec::with_capacity(CLUSTER_COUNT);
    let mut acc = 0.0;
    for w in &weights {
        acc += w / total;
        cumulative.push(acc);
    }

    let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); CLUSTER_COUNT];
    for point in 0..POINT_COUNT {
        let u = rng.next_f64();
        let cluster = cumulative
            .partition_point(|&c| c < u)
            .min(CLUSTER_COUNT - 1);
        clusters[cluster].push(point);
    }

    let file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &IndexFile { centroids, clusters })
        .context("writing index JSON")?;
    writer.flush().context("flushing index JSON")?;

    println!(
        "Wrote {CLUSTER_COUNT} clusters ({POINT_COUNT} points, {DIMENSIONS}-d centroids) to {}",
        output_path.display()
    );
    Ok(())
}
