//! Common test utilities and data generators.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Treatment, outcome and covariate columns of a synthetic dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub treatment: Vec<f64>,
    pub outcome: Vec<f64>,
    pub covariate: Vec<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.outcome.len()
    }
}

/// Generate `outcome = β₀ + β₁·treatment + β₂·covariate + N(0, noise_std²)`.
///
/// Treatment is a fair 0/1 assignment, the covariate is uniform on [0, 10).
pub fn generate_treatment_data(
    n_samples: usize,
    coefficients: [f64; 3],
    noise_std: f64,
    seed: u64,
) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, noise_std).expect("valid noise standard deviation");

    let mut data = Dataset {
        treatment: Vec::with_capacity(n_samples),
        outcome: Vec::with_capacity(n_samples),
        covariate: Vec::with_capacity(n_samples),
    };

    for _ in 0..n_samples {
        let t = if rng.gen_bool(0.5) { 1.0 } else { 0.0 };
        let c = rng.gen_range(0.0..10.0);
        let y = coefficients[0]
            + coefficients[1] * t
            + coefficients[2] * c
            + noise.sample(&mut rng);

        data.treatment.push(t);
        data.covariate.push(c);
        data.outcome.push(y);
    }

    data
}

/// Dataset whose covariate is exactly twice the treatment.
pub fn generate_collinear_data(n_samples: usize) -> Dataset {
    let treatment: Vec<f64> = (0..n_samples).map(|i| (i % 3) as f64).collect();
    let covariate = treatment.iter().map(|t| 2.0 * t).collect();
    let outcome = (0..n_samples).map(|i| 1.0 + 0.5 * i as f64).collect();

    Dataset {
        treatment,
        outcome,
        covariate,
    }
}

/// Five-row dataset with a closed-form reference solution.
///
/// Exact least squares gives β = [1.33, 3.63, 0.71] and residuals
/// [0.06, -0.08, -0.06, 0.10, -0.02]. With n - 3 = 2 residual degrees of
/// freedom both the t and F tails have closed forms.
pub fn reference_data() -> Dataset {
    Dataset {
        treatment: vec![0.0, 1.0, 0.0, 1.0, 1.0],
        outcome: vec![2.1, 6.3, 3.4, 7.9, 9.2],
        covariate: vec![1.0, 2.0, 3.0, 4.0, 6.0],
    }
}
