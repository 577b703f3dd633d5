//! The seeded in-memory catalog and its latency-injecting bulk reads.

use std::sync::Arc;

use rand::Rng;

use crate::latency::{DelaySampler, LatencyProfile};
use crate::product::{Category, IdSequence, Product};

/// Number of products created at seed time.
pub const SEED_SIZE: u64 = 200;

const MIN_PRICE: f64 = 10.0;
const MAX_PRICE: f64 = 100.0;

/// In-memory catalog.
///
/// Seeded exactly once on construction and never mutated afterwards, so a
/// single instance can be shared (`Arc<CatalogStore>`) across concurrent
/// requests without locking. Bulk reads are delayed per call; point reads are
/// not.
#[derive(Debug)]
pub struct CatalogStore {
    products: Arc<[Product]>,
    sampler: DelaySampler,
}

impl CatalogStore {
    /// Seed a store with a fresh id sequence and thread-local randomness.
    pub fn seeded(sampler: DelaySampler) -> Self {
        let mut ids = IdSequence::new();
        Self::seed(&mut ids, &mut rand::rng(), sampler)
    }

    /// Seed a store, drawing ids from `ids` and prices from `rng`.
    ///
    /// Product `i` (1-based) is named `"Product {i}"`, is in `Category A` when
    /// `i` is even and `Category B` otherwise, and is priced uniformly in
    /// `[10, 100)` rounded to cents.
    pub fn seed<R>(ids: &mut IdSequence, rng: &mut R, sampler: DelaySampler) -> Self
    where
        R: Rng,
    {
        let products = (1..=SEED_SIZE)
            .map(|i| {
                let raw: f64 = rng.random_range(MIN_PRICE..MAX_PRICE);
                Product::new(
                    ids.next_id(),
                    format!("Product {i}"),
                    Category::for_position(i),
                    round_cents(raw),
                )
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = products.len(), "catalog seeded");

        Self {
            products: products.into(),
            sampler,
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Full catalog after a 100–400 ms delay.
    pub async fn get_all(&self) -> Arc<[Product]> {
        self.read_all(LatencyProfile::Normal).await
    }

    /// Full catalog after a 5–15 s delay.
    pub async fn get_all_delayed(&self) -> Arc<[Product]> {
        self.read_all(LatencyProfile::Degraded).await
    }

    /// First product with the given id, if any. Never delayed.
    pub fn get_by_id(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    // Cancel-safe: nothing is written before or after the sleep.
    async fn read_all(&self, profile: LatencyProfile) -> Arc<[Product]> {
        let delay = self.sampler.sample(profile);
        tracing::debug!(
            profile = profile.as_str(),
            delay_ms = delay.as_millis() as u64,
            "injecting catalog read latency"
        );
        tokio::time::sleep(delay).await;
        Arc::clone(&self.products)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
