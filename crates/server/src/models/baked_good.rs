//! Baked good domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bakehouse_core::{BakedGoodId, BakeryId};

use super::bakery::BakerySummary;

/// A baked good (domain type).
///
/// Belongs to exactly one bakery; `bakery_id` is enforced by a foreign-key
/// constraint in the store.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BakedGood {
    /// Unique baked good ID.
    pub id: BakedGoodId,
    /// Display name (e.g., "Croissant").
    pub name: String,
    /// Price in the store's currency unit.
    pub price: f64,
    /// Owning bakery.
    pub bakery_id: BakeryId,
    /// When the baked good was created.
    pub created_at: DateTime<Utc>,
}

/// A baked good as returned by the API: scalar fields plus a bakery summary.
#[derive(Debug, Clone, Serialize)]
pub struct BakedGoodResponse {
    pub id: BakedGoodId,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    /// The owning bakery, reduced to scalar fields (no goods list).
    pub bakery: BakerySummary,
}

impl BakedGoodResponse {
    /// Combine a baked good with its owning bakery into the response shape.
    #[must_use]
    pub fn new(good: BakedGood, bakery: BakerySummary) -> Self {
        Self {
            id: good.id,
            name: good.name,
            price: good.price,
            created_at: good.created_at,
            bakery,
        }
    }
}

/// Scalar view of a baked good, embedded in a bakery response.
#[derive(Debug, Clone, Serialize)]
pub struct BakedGoodSummary {
    pub id: BakedGoodId,
    pub name: String,
    pub price: f64,
    pub bakery_id: BakeryId,
    pub created_at: DateTime<Utc>,
}

impl From<BakedGood> for BakedGoodSummary {
    fn from(good: BakedGood) -> Self {
        Self {
            id: good.id,
            name: good.name,
            price: good.price,
            bakery_id: good.bakery_id,
            created_at: good.created_at,
        }
    }
}
