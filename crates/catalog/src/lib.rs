//! Local product catalog.
//!
//! An in-memory, seed-once collection of products with injected read latency
//! (no IO, no HTTP). The HTTP layer in `shopfront-api` owns a single
//! [`CatalogStore`] and shares it across requests.

pub mod latency;
pub mod product;
pub mod store;

pub use latency::{DelaySampler, LatencyProfile};
pub use product::{Category, IdSequence, Product};
pub use store::{CatalogStore, SEED_SIZE};
