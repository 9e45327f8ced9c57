//! HTTP handlers for the contact book.
//!
//! Handlers are thin: they decode the request, call the [`ContactService`] and
//! shape the JSON response. Route paths match the calls made by the bundled front end.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{ApiError, StatusBody};
use crate::models::Contact;
use crate::observability::{MetricsSnapshot, MetricsTracker};
use crate::services::{AddOutcome, ContactFilter, ContactService, ContactStats};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactService>,
    pub metrics: MetricsTracker,
}

impl AppState {
    pub fn new(contacts: Arc<dyn ContactService>, metrics: MetricsTracker) -> Self {
        Self { contacts, metrics }
    }
}

/// `GET /search` parameters. A missing `q` is the empty query.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub metrics: MetricsSnapshot,
}

pub async fn list_contacts(
    State(state): State<AppState>,
    filter: Result<Query<ContactFilter>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let Query(filter) = filter?;
    Ok(Json(state.contacts.list(&filter).await?))
}

pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.get(&id).await?))
}

/// `POST /add`: 200 `{"status":"added"}` or 409 `{"status":"duplicate", ...}`.
pub async fn add_contact(
    State(state): State<AppState>,
    payload: Result<Json<Contact>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusBody>), ApiError> {
    let Json(contact) = payload?;
    match state.contacts.add(contact).await? {
        AddOutcome::Added => Ok((StatusCode::OK, Json(StatusBody::new("added")))),
        AddOutcome::Duplicate => Ok((
            StatusCode::CONFLICT,
            Json(StatusBody::with_message(
                "duplicate",
                "Contact already exists.",
            )),
        )),
    }
}

/// `PUT /update/{id}`: 409 `{"status":"duplicate", ...}` when the new email or
/// phone belongs to another contact.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Contact>, JsonRejection>,
) -> Result<Json<StatusBody>, ApiError> {
    let Json(contact) = payload?;
    state.contacts.update(&id, contact).await?;
    Ok(Json(StatusBody::new("updated")))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.toggle_favorite(&id).await?))
}

/// `DELETE /delete/{id}`. Deleting an unknown id still reports success.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusBody>, ApiError> {
    state.contacts.delete(&id).await?;
    Ok(Json(StatusBody::new("deleted")))
}

pub async fn search_contacts(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let Query(params) = params?;
    Ok(Json(state.contacts.search(&params.q).await?))
}

pub async fn export_contacts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let csv = state.contacts.export_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"contacts.csv\"",
            ),
        ],
        csv,
    ))
}

/// Contacts whose birthday is today in the server's local time zone.
pub async fn birthdays_today(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let today = chrono::Local::now().date_naive();
    Ok(Json(
        state
            .contacts
            .birthdays_on(today.month(), today.day())
            .await?,
    ))
}

pub async fn contact_stats(State(state): State<AppState>) -> Result<Json<ContactStats>, ApiError> {
    Ok(Json(state.contacts.stats().await?))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        metrics: state.metrics.snapshot(),
    })
}
