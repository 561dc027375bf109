//! Patient record CRUD endpoints.
//!
//! Every handler works wholesale against the store: load the full map,
//! mutate, save. Mutating handlers hold the context's store guard across
//! that sequence so concurrent writes cannot drop each other.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{NewPatient, PatientProfile, PatientUpdate, SortField, SortOrder};
use crate::validate;

const PATIENT_NOT_FOUND: &str = "Patient not found";

#[derive(Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub patient: PatientProfile,
}

#[derive(Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

/// Query parameters for `GET /sort`. A missing `sort_by` is reported the
/// same way as an unknown one.
#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// `GET /view` — every record, id-keyed, with derived fields.
pub async fn view(
    State(ctx): State<ApiContext>,
) -> Result<Json<BTreeMap<String, PatientProfile>>, ApiError> {
    let records = ctx.store.load_all()?;
    let profiles = records
        .iter()
        .map(|(id, record)| (id.clone(), PatientProfile::from(record)))
        .collect();
    Ok(Json(profiles))
}

/// `GET /patient/{patient_id}` — one record with derived fields.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientProfile>, ApiError> {
    let records = ctx.store.load_all()?;
    let record = records
        .get(&patient_id)
        .ok_or_else(|| ApiError::NotFound(PATIENT_NOT_FOUND.to_string()))?;
    Ok(Json(PatientProfile::from(record)))
}

/// `GET /sort?sort_by=&order=` — records as a list ordered by one field.
///
/// `order` defaults to ascending. `bmi` sorts by the derived value.
pub async fn sorted(
    State(ctx): State<ApiContext>,
    Query(query): Query<SortQuery>,
) -> Result<Json<Vec<PatientProfile>>, ApiError> {
    let field: SortField = query.sort_by.as_deref().unwrap_or("").parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "Invalid sort field, select from {:?}",
            SortField::ALL
        ))
    })?;
    let order = match &query.order {
        Some(raw) => raw.parse::<SortOrder>().map_err(|_| {
            ApiError::BadRequest(format!(
                "Invalid sort order, select from {:?}",
                SortOrder::ALL
            ))
        })?,
        None => SortOrder::Ascending,
    };

    let records = ctx.store.load_all()?;
    let mut profiles: Vec<PatientProfile> =
        records.values().map(PatientProfile::from).collect();

    let key = |profile: &PatientProfile| match field {
        SortField::Height => profile.height,
        SortField::Weight => profile.weight,
        SortField::Bmi => profile.bmi,
    };
    profiles.sort_by(|a, b| key(a).total_cmp(&key(b)));
    if order == SortOrder::Descending {
        profiles.reverse();
    }

    Ok(Json(profiles))
}

/// `POST /create` — validate and insert a new record.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<NewPatient>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let (id, record) = validate::new_patient(&input)?;

    let _guard = ctx.lock_store().await;
    let mut records = ctx.store.load_all()?;
    if records.contains_key(&id) {
        return Err(ApiError::BadRequest(
            "Patient with this ID already exists".to_string(),
        ));
    }

    let profile = PatientProfile::from(&record);
    records.insert(id.clone(), record);
    ctx.store.save_all(&records)?;
    tracing::info!(%id, "patient created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Patient created successfully",
            patient: profile,
        }),
    ))
}

/// `PUT /edit/{patient_id}` — merge provided fields into a record.
///
/// The update body is checked before the lookup, so bad fields are a 422
/// even for an unknown id. The merged record is then revalidated as a
/// whole and saved; derived values follow automatically on the next read.
pub async fn edit(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
    Json(update): Json<PatientUpdate>,
) -> Result<Json<StatusMessage>, ApiError> {
    validate::update_fields(&update)?;

    let _guard = ctx.lock_store().await;
    let mut records = ctx.store.load_all()?;
    let existing = records
        .get(&patient_id)
        .ok_or_else(|| ApiError::NotFound(PATIENT_NOT_FOUND.to_string()))?;

    let merged = validate::merged_record(existing, &update)?;
    records.insert(patient_id.clone(), merged);
    ctx.store.save_all(&records)?;
    tracing::info!(id = %patient_id, "patient updated");

    Ok(Json(StatusMessage {
        message: "Patient updated successfully",
    }))
}

/// `DELETE /delete/{patient_id}` — remove a record.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<StatusMessage>, ApiError> {
    let _guard = ctx.lock_store().await;
    let mut records = ctx.store.load_all()?;
    if records.remove(&patient_id).is_none() {
        return Err(ApiError::NotFound(PATIENT_NOT_FOUND.to_string()));
    }
    ctx.store.save_all(&records)?;
    tracing::info!(id = %patient_id, "patient deleted");

    Ok(Json(StatusMessage {
        message: "Patient deleted successfully",
    }))
}
