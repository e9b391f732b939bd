//! String analysis API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use strand_core::{
    content_hash, evaluate, translate, FilterCriteria, StringProperties, StringRecord,
};

use crate::metrics::{NLQ_TRANSLATIONS_TOTAL, STRINGS_ANALYZED_TOTAL};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a single stored string
#[derive(Debug, Serialize)]
pub struct StringRecordResponse {
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: String,
}

impl From<StringRecord> for StringRecordResponse {
    fn from(record: StringRecord) -> Self {
        Self {
            id: record.id,
            value: record.value,
            properties: record.properties,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Response for list endpoints
#[derive(Debug, Serialize)]
pub struct ListStringsResponse {
    pub data: Vec<StringRecordResponse>,
    pub count: usize,
    pub filters_applied: FilterCriteria,
}

/// Query parameters for the natural-language filter endpoint
#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
    pub query: Option<String>,
}

/// How a natural-language query was interpreted
#[derive(Debug, Serialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterCriteria,
}

/// Response for the natural-language filter endpoint
#[derive(Debug, Serialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<StringRecordResponse>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            id: None,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(e: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Analyze a string and store the resulting record.
///
/// The body is taken as raw JSON so a missing body (400) stays
/// distinguishable from a present-but-non-string `value` field (422).
pub async fn create_string(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<StringRecordResponse>), ApiError> {
    let Some(Json(body)) = body else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Request body is required.")),
        ));
    };

    let Some(value) = body.get("value").and_then(Value::as_str) else {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new("\"value\" field must be a string.")),
        ));
    };

    let record = StringRecord::new(value);
    let inserted = state
        .store()
        .insert_if_absent(&record)
        .map_err(internal_error)?;

    if !inserted {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "String already exists.".to_string(),
                id: Some(record.id),
            }),
        ));
    }

    debug!(id = %record.id, length = record.properties.length, "analyzed and stored string");
    STRINGS_ANALYZED_TOTAL.inc();

    Ok((StatusCode::CREATED, Json(StringRecordResponse::from(record))))
}

/// Fetch a record by its literal value (re-hashed for lookup).
pub async fn get_string_by_value(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<Json<StringRecordResponse>, ApiError> {
    let id = content_hash(&value);

    match state.store().get(&id).map_err(internal_error)? {
        Some(record) => Ok(Json(StringRecordResponse::from(record))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("String not found.")),
        )),
    }
}

/// List stored strings, filtered by structured criteria.
pub async fn list_strings(
    State(state): State<Arc<AppState>>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<Json<ListStringsResponse>, ApiError> {
    if let Err(e) = criteria.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))));
    }

    let all = state.store().get_all().map_err(internal_error)?;
    let filtered = evaluate(all, &criteria);

    Ok(Json(ListStringsResponse {
        count: filtered.len(),
        data: filtered.into_iter().map(StringRecordResponse::from).collect(),
        filters_applied: criteria,
    }))
}

/// List stored strings, filtered by a natural-language query.
pub async fn natural_language_filter(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NaturalLanguageParams>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let query = match params.query {
        Some(ref q) if !q.trim().is_empty() => q.clone(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("query parameter is required.")),
            ));
        }
    };

    let translation = translate(&query);

    if !translation.success {
        NLQ_TRANSLATIONS_TOTAL.with_label_values(&["unparsed"]).inc();
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Unable to parse natural language query.")),
        ));
    }
    NLQ_TRANSLATIONS_TOTAL.with_label_values(&["parsed"]).inc();

    // Reserved: no rule combination is conflicting today.
    if translation.conflicting {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(
                "Parsed query resulted in conflicting filters.",
            )),
        ));
    }

    debug!(query = %query, criteria = ?translation.criteria, "translated natural-language query");

    let all = state.store().get_all().map_err(internal_error)?;
    let filtered = evaluate(all, &translation.criteria);

    Ok(Json(NaturalLanguageResponse {
        count: filtered.len(),
        data: filtered.into_iter().map(StringRecordResponse::from).collect(),
        interpreted_query: InterpretedQuery {
            original: query,
            parsed_filters: translation.criteria,
        },
    }))
}

/// Delete a record by its literal value (re-hashed for lookup).
pub async fn delete_string(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = content_hash(&value);

    if !state.store().exists(&id).map_err(internal_error)? {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("String not found.")),
        ));
    }

    state.store().delete(&id).map_err(internal_error)?;
    debug!(id = %id, "deleted string record");

    Ok(StatusCode::NO_CONTENT)
}
