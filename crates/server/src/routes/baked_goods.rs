//! Baked good route handlers.
//!
//! Mutating endpoints take form-encoded bodies. Each raw form is run through
//! a single validation pass that yields either a validated struct or the
//! complete list of field errors, joined into one 400 message.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use bakehouse_core::{BakedGoodId, BakeryId};

use crate::db::{BakedGoodPatch, BakedGoodRepository, BakeryRepository, NewBakedGood};
use crate::error::{AppError, Result};
use crate::models::{BakedGood, BakedGoodResponse, BakerySummary};
use crate::state::AppState;

/// Form body for creating a baked good. All fields are required.
#[derive(Debug, Deserialize)]
pub struct CreateBakedGoodForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub bakery_id: Option<String>,
}

impl CreateBakedGoodForm {
    /// Validate the form in a single pass, collecting every field error.
    fn validate(self) -> std::result::Result<NewBakedGood, Vec<String>> {
        let mut errors = Vec::new();

        let name = match present(self.name) {
            Some(name) => Some(name),
            None => {
                errors.push("name is required".to_string());
                None
            }
        };

        let price = match present(self.price) {
            Some(raw) => match raw.parse::<f64>() {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.push("price must be a number".to_string());
                    None
                }
            },
            None => {
                errors.push("price is required".to_string());
                None
            }
        };

        let bakery_id = match present(self.bakery_id) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(BakeryId::new(id)),
                Err(_) => {
                    errors.push("bakery_id must be an integer".to_string());
                    None
                }
            },
            None => {
                errors.push("bakery_id is required".to_string());
                None
            }
        };

        match (name, price, bakery_id) {
            (Some(name), Some(price), Some(bakery_id)) if errors.is_empty() => Ok(NewBakedGood {
                name,
                price,
                bakery_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Form body for partially updating a baked good. All fields are optional;
/// absent (or blank) fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateBakedGoodForm {
    pub name: Option<String>,
    pub price: Option<String>,
}

impl UpdateBakedGoodForm {
    /// Validate the form in a single pass.
    fn validate(self) -> std::result::Result<BakedGoodPatch, Vec<String>> {
        let mut errors = Vec::new();

        let price = match present(self.price) {
            Some(raw) => match raw.parse::<f64>() {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.push("price must be a number".to_string());
                    None
                }
            },
            None => None,
        };

        if errors.is_empty() {
            Ok(BakedGoodPatch {
                name: present(self.name),
                price,
            })
        } else {
            Err(errors)
        }
    }
}

/// Normalize an optional form field: trim, and treat blank as absent.
fn present(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Look up the owning bakery for a baked good's response.
///
/// The foreign-key constraint guarantees the bakery row exists; a miss here
/// means the store itself is inconsistent.
async fn owning_bakery(state: &AppState, good: &BakedGood) -> Result<BakerySummary> {
    let bakery = BakeryRepository::new(state.pool())
        .get(good.bakery_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!("bakery {} missing for baked good", good.bakery_id))
        })?;

    Ok(BakerySummary::from(bakery))
}

/// List all baked goods ordered by price descending.
pub async fn by_price(State(state): State<AppState>) -> Result<Json<Vec<BakedGoodResponse>>> {
    let goods = BakedGoodRepository::new(state.pool())
        .list_by_price_desc()
        .await?;
    let bakeries = BakeryRepository::new(state.pool()).list().await?;

    let summaries: std::collections::HashMap<BakeryId, BakerySummary> = bakeries
        .into_iter()
        .map(|bakery| (bakery.id, BakerySummary::from(bakery)))
        .collect();

    let responses = goods
        .into_iter()
        .map(|good| {
            let bakery = summaries.get(&good.bakery_id).cloned().ok_or_else(|| {
                AppError::Internal(format!("bakery {} missing for baked good", good.bakery_id))
            })?;
            Ok(BakedGoodResponse::new(good, bakery))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(responses))
}

/// Get the single most expensive baked good.
///
/// Returns 404 when no baked goods exist (the table being empty is treated
/// as the resource being absent, not as a server fault).
pub async fn most_expensive(State(state): State<AppState>) -> Result<Json<BakedGoodResponse>> {
    let good = BakedGoodRepository::new(state.pool())
        .most_expensive()
        .await?
        .ok_or_else(|| AppError::NotFound("no baked goods exist".to_string()))?;
    let bakery = owning_bakery(&state, &good).await?;

    Ok(Json(BakedGoodResponse::new(good, bakery)))
}

/// Get one baked good by ID.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BakedGoodResponse>> {
    let id = BakedGoodId::new(id);
    let good = BakedGoodRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("baked good {id} not found")))?;
    let bakery = owning_bakery(&state, &good).await?;

    Ok(Json(BakedGoodResponse::new(good, bakery)))
}

/// Create a baked good.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CreateBakedGoodForm>,
) -> Result<(StatusCode, Json<BakedGoodResponse>)> {
    let new = form
        .validate()
        .map_err(|errors| AppError::Validation(errors.join(", ")))?;

    // Check the reference up front so the client gets a field error rather
    // than a constraint fault.
    let bakery = BakeryRepository::new(state.pool())
        .get(new.bakery_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation("bakery_id does not reference an existing bakery".to_string())
        })?;

    let good = BakedGoodRepository::new(state.pool()).create(&new).await?;

    tracing::info!(baked_good_id = %good.id, bakery_id = %good.bakery_id, "Baked good created");
    Ok((
        StatusCode::CREATED,
        Json(BakedGoodResponse::new(good, BakerySummary::from(bakery))),
    ))
}

/// Partially update a baked good's name and/or price.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<UpdateBakedGoodForm>,
) -> Result<Json<BakedGoodResponse>> {
    let patch = form
        .validate()
        .map_err(|errors| AppError::Validation(errors.join(", ")))?;

    let id = BakedGoodId::new(id);
    let good = BakedGoodRepository::new(state.pool())
        .update(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("baked good {id} not found")))?;
    let bakery = owning_bakery(&state, &good).await?;

    Ok(Json(BakedGoodResponse::new(good, bakery)))
}

/// Delete a baked good.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Value>> {
    let id = BakedGoodId::new(id);
    let deleted = BakedGoodRepository::new(state.pool()).delete(id).await?;

    if !deleted {
        return Err(AppError::NotFound(format!("baked good {id} not found")));
    }

    tracing::info!(baked_good_id = %id, "Baked good deleted");
    Ok(Json(json!({ "message": format!("baked good {id} deleted") })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn create_form(
        name: Option<&str>,
        price: Option<&str>,
        bakery_id: Option<&str>,
    ) -> CreateBakedGoodForm {
        CreateBakedGoodForm {
            name: name.map(String::from),
            price: price.map(String::from),
            bakery_id: bakery_id.map(String::from),
        }
    }

    #[test]
    fn test_create_form_valid() {
        let new = create_form(Some("Croissant"), Some("3.50"), Some("1"))
            .validate()
            .expect("valid form");
        assert_eq!(new.name, "Croissant");
        assert_eq!(new.price, 3.5);
        assert_eq!(new.bakery_id, BakeryId::new(1));
    }

    #[test]
    fn test_create_form_collects_all_missing_fields() {
        let errors = create_form(None, None, None).validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "name is required".to_string(),
                "price is required".to_string(),
                "bakery_id is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_create_form_missing_price_only() {
        let errors = create_form(Some("Croissant"), None, Some("1"))
            .validate()
            .unwrap_err();
        assert_eq!(errors, vec!["price is required".to_string()]);
    }

    #[test]
    fn test_create_form_rejects_malformed_numbers() {
        let errors = create_form(Some("Croissant"), Some("cheap"), Some("first"))
            .validate()
            .unwrap_err();
        assert_eq!(
            errors,
            vec![
                "price must be a number".to_string(),
                "bakery_id must be an integer".to_string(),
            ]
        );
    }

    #[test]
    fn test_update_form_absent_fields_mean_unchanged() {
        let patch = UpdateBakedGoodForm {
            name: None,
            price: None,
        }
        .validate()
        .expect("valid form");
        assert!(patch.name.is_none());
        assert!(patch.price.is_none());
    }

    #[test]
    fn test_update_form_blank_name_treated_as_absent() {
        let patch = UpdateBakedGoodForm {
            name: Some("  ".to_string()),
            price: Some("4.25".to_string()),
        }
        .validate()
        .expect("valid form");
        assert!(patch.name.is_none());
        assert_eq!(patch.price, Some(4.25));
    }

    #[test]
    fn test_update_form_rejects_malformed_price() {
        let errors = UpdateBakedGoodForm {
            name: Some("Croissant".to_string()),
            price: Some("expensive".to_string()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors, vec!["price must be a number".to_string()]);
    }
}
