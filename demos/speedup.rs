//! Speedup driver: times the sequential and parallel hull entry points over
//! repeated runs and reports the median speedup per input size.
//!
//! Usage: `cargo run --release --example speedup -- [-w] [-p] <n> [seed]`
//!
//! * `<n>` is the number of points to generate; `-1` sweeps a built-in size
//!   ladder with several runs per size.
//! * `-w` writes the hull points of each run to `hull_points_<n>.txt`.
//! * `-p` prints the resulting hull indices.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use planar_hull::{IndexList, PointSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LADDER: &[usize] = &[1_000, 10_000, 100_000, 1_000_000];
const RUNS_PER_SIZE: usize = 15;

struct Config {
    write_to_file: bool,
    print_hull: bool,
    sizes: Vec<usize>,
    runs: usize,
    seed: u64,
}

/// Per-size wall-clock samples, owned by the driver and threaded through
/// every run explicitly.
#[derive(Default)]
struct SpeedupAccumulator {
    entries: Vec<SizeSamples>,
}

#[derive(Default)]
struct SizeSamples {
    n: usize,
    sequential_ms: Vec<f64>,
    parallel_ms: Vec<f64>,
}

impl SpeedupAccumulator {
    fn samples_for(&mut self, n: usize) -> &mut SizeSamples {
        if let Some(i) = self.entries.iter().position(|e| e.n == n) {
            &mut self.entries[i]
        } else {
            self.entries.push(SizeSamples {
                n,
                ..SizeSamples::default()
            });
            self.entries.last_mut().expect("just pushed")
        }
    }

    fn record_sequential(&mut self, n: usize, ms: f64) {
        self.samples_for(n).sequential_ms.push(ms);
    }

    fn record_parallel(&mut self, n: usize, ms: f64) {
        self.samples_for(n).parallel_ms.push(ms);
    }

    /// Median of the per-run speedups `sequential / parallel`, per size.
    fn median_speedups(&self) -> Vec<(usize, f64)> {
        self.entries
            .iter()
            .map(|e| {
                let mut speedups: Vec<f64> = e
                    .sequential_ms
                    .iter()
                    .zip(&e.parallel_ms)
                    .map(|(s, p)| s / p)
                    .collect();
                speedups.sort_by(f64::total_cmp);
                let median = speedups.get(speedups.len() / 2).copied().unwrap_or(f64::NAN);
                (e.n, median)
            })
            .collect()
    }
}

fn main() {
    let Some(config) = parse_args() else {
        eprintln!(
            "Usage: speedup [-w] [-p] <n> [seed]\n\
             \x20* <n> is the number of points to generate; -1 sweeps \
             {LADDER:?} with {RUNS_PER_SIZE} runs each.\n\
             \x20* -w writes each hull to hull_points_<n>.txt.\n\
             \x20* -p prints the hull indices."
        );
        std::process::exit(2);
    };

    if config.sizes.len() > 1 {
        println!("Running for n values: {:?}", config.sizes);
    }

    let mut accumulator = SpeedupAccumulator::default();
    for &n in &config.sizes {
        println!("\nRunning with n = {n}:");
        println!("  ...generating data...");
        let set = random_set(n, config.seed);
        println!("  ...data done!\n");

        for _ in 0..config.runs {
            run_sequential(&set, &mut accumulator, &config);
        }
        for _ in 0..config.runs {
            run_parallel(&set, &mut accumulator, &config);
        }
    }

    println!("\n\nAll median speedups:");
    for (n, speedup) in accumulator.median_speedups() {
        println!(" * n: {n}, speedup: {speedup:.3}");
    }
}

fn parse_args() -> Option<Config> {
    let mut write_to_file = false;
    let mut print_hull = false;
    let mut positional = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-w" => write_to_file = true,
            "-p" => print_hull = true,
            _ => positional.push(arg),
        }
    }

    let n: i64 = positional.first()?.parse().ok()?;
    let seed = match positional.get(1) {
        Some(raw) => raw.parse().ok()?,
        None => 0,
    };

    let (sizes, runs) = if n == -1 {
        (LADDER.to_vec(), RUNS_PER_SIZE)
    } else {
        (vec![usize::try_from(n).ok()?], 1)
    };

    Some(Config {
        write_to_file,
        print_hull,
        sizes,
        runs,
        seed,
    })
}

fn random_set(n: usize, seed: u64) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let range = -1_000_000_000_i64..=1_000_000_000_i64;
    let x = (0..n).map(|_| rng.gen_range(range.clone())).collect();
    let y = (0..n).map(|_| rng.gen_range(range.clone())).collect();
    PointSet::new(x, y)
}

fn run_sequential(set: &PointSet, accumulator: &mut SpeedupAccumulator, config: &Config) {
    let start = Instant::now();
    let hull = set.hull_sequential();
    let elapsed = start.elapsed().as_secs_f64() * 1_000.0;

    println!(" * time: {elapsed:.2} ms (sequential version)");
    accumulator.record_sequential(set.len(), elapsed);
    finish_run(set, &hull, config);
}

fn run_parallel(set: &PointSet, accumulator: &mut SpeedupAccumulator, config: &Config) {
    let start = Instant::now();
    let hull = match set.hull_parallel() {
        Ok(hull) => hull,
        Err(err) => {
            eprintln!("parallel hull failed: {err}");
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed().as_secs_f64() * 1_000.0;

    println!(" * time: {elapsed:.2} ms (parallel version)");
    accumulator.record_parallel(set.len(), elapsed);
    finish_run(set, &hull, config);
}

fn finish_run(set: &PointSet, hull: &IndexList, config: &Config) {
    if config.write_to_file {
        if let Err(err) = write_hull_points(set, hull) {
            eprintln!("could not write hull points: {err}");
        }
    }
    if config.print_hull {
        print_hull(hull);
    }
}

/// One `index: (x, y)` line per hull point, in boundary order.
fn write_hull_points(set: &PointSet, hull: &IndexList) -> std::io::Result<()> {
    let path = format!("hull_points_{}.txt", set.len());
    let mut out = BufWriter::new(File::create(&path)?);
    for p in hull {
        writeln!(out, "{}: ({}, {})", p.0, set.x(p), set.y(p))?;
    }
    out.flush()
}

fn print_hull(hull: &IndexList) {
    for (i, p) in hull.iter().enumerate() {
        if i % 15 == 0 {
            println!();
        }
        print!("{}\t", p.0);
    }
    println!();
}
