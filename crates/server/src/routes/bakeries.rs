//! Bakery route handlers.
//!
//! Bakeries are read-only through the API apart from renaming; there is no
//! create or delete endpoint.

use std::collections::HashMap;

use axum::{
    Form, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use bakehouse_core::BakeryId;

use crate::db::{BakedGoodRepository, BakeryRepository};
use crate::error::{AppError, Result};
use crate::models::{BakedGood, BakeryResponse};
use crate::state::AppState;

/// Form body for renaming a bakery.
#[derive(Debug, Deserialize)]
pub struct UpdateBakeryForm {
    pub name: Option<String>,
}

impl UpdateBakeryForm {
    /// Validate the form, producing the new name.
    ///
    /// A blank name is treated the same as an absent one.
    fn validate(self) -> std::result::Result<String, String> {
        match self.name.map(|name| name.trim().to_string()) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err("name is required to update".to_string()),
        }
    }
}

/// List all bakeries with their baked goods embedded.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<BakeryResponse>>> {
    let bakeries = BakeryRepository::new(state.pool()).list().await?;
    let goods = BakedGoodRepository::new(state.pool()).list().await?;

    let mut by_bakery: HashMap<BakeryId, Vec<BakedGood>> = HashMap::new();
    for good in goods {
        by_bakery.entry(good.bakery_id).or_default().push(good);
    }

    let responses = bakeries
        .into_iter()
        .map(|bakery| {
            let goods = by_bakery.remove(&bakery.id).unwrap_or_default();
            BakeryResponse::new(bakery, goods)
        })
        .collect();

    Ok(Json(responses))
}

/// Get one bakery by ID with its baked goods embedded.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BakeryResponse>> {
    let id = BakeryId::new(id);
    let bakery = BakeryRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("bakery {id} not found")))?;
    let goods = BakedGoodRepository::new(state.pool())
        .list_for_bakery(id)
        .await?;

    Ok(Json(BakeryResponse::new(bakery, goods)))
}

/// Rename a bakery.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<UpdateBakeryForm>,
) -> Result<Json<BakeryResponse>> {
    let name = form.validate().map_err(AppError::Validation)?;

    let id = BakeryId::new(id);
    let bakery = BakeryRepository::new(state.pool())
        .update_name(id, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("bakery {id} not found")))?;
    let goods = BakedGoodRepository::new(state.pool())
        .list_for_bakery(id)
        .await?;

    tracing::info!(bakery_id = %id, "Bakery renamed");
    Ok(Json(BakeryResponse::new(bakery, goods)))
}
