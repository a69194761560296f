//! Domain types for bakeries and baked goods.
//!
//! Row-shaped domain types live here, separate from the response types that
//! implement the API's serialization contract (a bakery embeds its goods as
//! scalar summaries; a good embeds its bakery as a scalar summary; neither
//! side ever nests the other's collection, so serialization cannot cycle).

pub mod baked_good;
pub mod bakery;

pub use baked_good::{BakedGood, BakedGoodResponse, BakedGoodSummary};
pub use bakery::{Bakery, BakeryResponse, BakerySummary};
