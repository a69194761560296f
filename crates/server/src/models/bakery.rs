//! Bakery domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bakehouse_core::BakeryId;

use super::baked_good::{BakedGood, BakedGoodSummary};

/// A bakery (domain type).
///
/// Bakeries are read-only through the API except for name updates; they own
/// zero or more baked goods via `baked_goods.bakery_id`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Bakery {
    /// Unique bakery ID.
    pub id: BakeryId,
    /// Bakery name.
    pub name: String,
    /// When the bakery was created.
    pub created_at: DateTime<Utc>,
}

/// A bakery as returned by the API: scalar fields plus its baked goods.
#[derive(Debug, Clone, Serialize)]
pub struct BakeryResponse {
    pub id: BakeryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// The bakery's goods, reduced to scalar fields (no nested bakery).
    pub baked_goods: Vec<BakedGoodSummary>,
}

impl BakeryResponse {
    /// Combine a bakery with its baked goods into the response shape.
    #[must_use]
    pub fn new(bakery: Bakery, goods: Vec<BakedGood>) -> Self {
        Self {
            id: bakery.id,
            name: bakery.name,
            created_at: bakery.created_at,
            baked_goods: goods.into_iter().map(BakedGoodSummary::from).collect(),
        }
    }
}

/// Scalar view of a bakery, embedded in a baked good response.
///
/// Carries no goods list, so a good's response never recurses into the
/// bakery's collection.
#[derive(Debug, Clone, Serialize)]
pub struct BakerySummary {
    pub id: BakeryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Bakery> for BakerySummary {
    fn from(bakery: Bakery) -> Self {
        Self {
            id: bakery.id,
            name: bakery.name,
            created_at: bakery.created_at,
        }
    }
}
