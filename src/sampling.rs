use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    #[error("categorical distribution needs at least one category")]
    Empty,

    #[error("weight {weight} at position {index} is not a finite non-negative number")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("weights sum to {0}, expected 1")]
    BadTotal(f64),

    #[error("weights rejected by sampler: {0}")]
    Weights(#[from] WeightedError),
}

/// Discrete distribution over a fixed set of categories.
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    items: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Clone> Categorical<T> {
    pub fn new(weighted: Vec<(T, f64)>) -> Result<Self, DistributionError> {
        if weighted.is_empty() {
            return Err(DistributionError::Empty);
        }

        let mut items = Vec::with_capacity(weighted.len());
        let mut weights = Vec::with_capacity(weighted.len());

        for (index, (item, weight)) in weighted.into_iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(DistributionError::InvalidWeight { index, weight });
            }
            items.push(item);
            weights.push(weight);
        }

        let total: f64 = weights.iter().fold(0.0, |acc, w| acc + w);
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(DistributionError::BadTotal(total));
        }

        let index = WeightedIndex::new(&weights)?;
        Ok(Self { items, index })
    }

    pub fn uniform(items: &[T]) -> Result<Self, DistributionError> {
        let weight = 1.0 / items.len().max(1) as f64;
        Self::new(items.iter().cloned().map(|item| (item, weight)).collect())
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.items[self.index.sample(rng)].clone()
    }
}

/// Knuth's multiplication method; fine for the small rates the dashboard uses.
pub fn poisson<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> u32 {
    if lambda <= 0.0 || !lambda.is_finite() {
        return 0;
    }

    let limit = (-lambda).exp();
    let mut product: f64 = rng.gen();
    let mut count = 0u32;

    while product > limit {
        count += 1;
        product *= rng.gen::<f64>();
    }

    count
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
