//! Synthetic student performance data
//!
//! Used for demonstration when the dataset file is not available. Column names
//! and value ranges follow the UCI student performance (mathematics) dataset.

use anyhow::Result;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Rows in the real mathematics dataset
pub const DEFAULT_SAMPLES: usize = 395;

/// Seed used when none is supplied
pub const DEFAULT_SEED: u64 = 42;

/// Condition attributes considered by the analysis, in evaluation order
pub const STUDENT_FEATURES: [&str; 11] = [
    "studytime",
    "failures",
    "G2",
    "absences",
    "famsup",
    "age",
    "Medu",
    "Fedu",
    "traveltime",
    "health",
    "internet",
];

/// Generate `n` synthetic students.
///
/// `G3` is derived from `G2`, `studytime` and `failures` plus uniform noise
/// in `[-3, 3]`, clipped to the 0-20 grade scale. `famsup` and `internet`
/// are text columns (`yes`/`no`) as in the real data.
pub fn generate_student_dataset(n: usize, seed: u64) -> Result<DataFrame> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut ints = |lo: i64, hi: i64| -> Vec<i64> { (0..n).map(|_| rng.gen_range(lo..hi)).collect() };
    let studytime = ints(1, 5);
    let failures = ints(0, 4);
    let g2 = ints(0, 21);
    let absences = ints(0, 93);
    let age = ints(15, 23);
    let medu = ints(0, 5);
    let fedu = ints(0, 5);
    let traveltime = ints(1, 5);
    let health = ints(1, 6);
    let noise = ints(-3, 4);

    let mut yes_no = || -> Vec<&'static str> {
        (0..n)
            .map(|_| if rng.gen_bool(0.5) { "yes" } else { "no" })
            .collect()
    };
    let famsup = yes_no();
    let internet = yes_no();

    let g3: Vec<i64> = (0..n)
        .map(|i| {
            let grade = g2[i] + noise[i] + (studytime[i] - 2) * 2 - failures[i] * 2;
            grade.clamp(0, 20)
        })
        .collect();

    let df = DataFrame::new(vec![
        Column::new("studytime".into(), studytime),
        Column::new("failures".into(), failures),
        Column::new("G2".into(), g2),
        Column::new("absences".into(), absences),
        Column::new("famsup".into(), famsup),
        Column::new("age".into(), age),
        Column::new("Medu".into(), medu),
        Column::new("Fedu".into(), fedu),
        Column::new("traveltime".into(), traveltime),
        Column::new("health".into(), health),
        Column::new("internet".into(), internet),
        Column::new("G3".into(), g3),
    ])?;

    Ok(df)
}
