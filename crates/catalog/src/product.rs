//! Catalog product records.

use serde::Serialize;

/// Fixed category labels used by the seeded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Category A")]
    A,
    #[serde(rename = "Category B")]
    B,
}

impl Category {
    /// Category for the i-th seeded product: even positions are `A`.
    pub fn for_position(i: u64) -> Self {
        if i % 2 == 0 { Self::A } else { Self::B }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "Category A",
            Self::B => "Category B",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: u64,
    name: String,
    category: Category,
    price: f64,
}

impl Product {
    pub(crate) fn new(id: u64, name: String, category: Category, price: f64) -> Self {
        Self {
            id,
            name,
            category,
            price,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Monotonic id generator.
///
/// Hands out strictly increasing ids starting at 1. One sequence is meant to
/// be shared by every insertion into a store, so ids are never reused.
#[derive(Debug)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Return the current value and advance.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to [`IdSequence::next_id`] will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
