//! Customer handlers
//!
//! CRUD over the record store. Every handler answers in JSON when the caller
//! accepts it and with a rendered page or a redirect otherwise.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};

use crate::api::negotiate::CustomerPayload;
use crate::api::AppState;
use crate::error::{AppError, Negotiated, ResponseFormat};
use crate::models::DeleteResponse;
use crate::render::{INDEX, VIEW};
use crate::validation::validate_customer;

const LIST_PATH: &str = "/customers";

type HandlerResult = Negotiated<Response>;

/// Handler for GET /customers
pub async fn list_customers(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> HandlerResult {
    let store = state.store.read().await;
    match format {
        ResponseFormat::Json => Ok(Json(store.list()).into_response()),
        ResponseFormat::Html => state
            .templates
            .render(INDEX, "customers", &store.list())
            .map(|page| Html(page).into_response())
            .map_err(|err| err.negotiated(format)),
    }
}

/// Handler for GET /customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: ResponseFormat,
) -> HandlerResult {
    let store = state.store.read().await;
    let customer = store
        .find_by_id(&id)
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()).negotiated(format))?;

    match format {
        ResponseFormat::Json => Ok(Json(customer).into_response()),
        ResponseFormat::Html => state
            .templates
            .render(VIEW, "customer", customer)
            .map(|page| Html(page).into_response())
            .map_err(|err| err.negotiated(format)),
    }
}

/// Handler for POST /customers/add
///
/// Responds 201 with the stored record, or redirects browsers back to the
/// list.
pub async fn create_customer(
    State(state): State<AppState>,
    format: ResponseFormat,
    CustomerPayload(input): CustomerPayload,
) -> HandlerResult {
    validate_customer(&input).map_err(|err| err.negotiated(format))?;

    let customer = state
        .mutate(move |store| store.create(input))
        .await
        .map_err(|err| err.negotiated(format))?;

    Ok(match format {
        ResponseFormat::Json => (StatusCode::CREATED, Json(customer)).into_response(),
        ResponseFormat::Html => Redirect::to(LIST_PATH).into_response(),
    })
}

/// Handler for PUT/POST /customers/update/:id
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: ResponseFormat,
    CustomerPayload(input): CustomerPayload,
) -> HandlerResult {
    validate_customer(&input).map_err(|err| err.negotiated(format))?;

    let customer = state
        .mutate(move |store| store.update(&id, input))
        .await
        .map_err(|err| err.negotiated(format))?;

    Ok(match format {
        ResponseFormat::Json => Json(customer).into_response(),
        ResponseFormat::Html => Redirect::to(LIST_PATH).into_response(),
    })
}

/// Handler for DELETE/POST /customers/delete/:id
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: ResponseFormat,
) -> HandlerResult {
    let removed = state
        .mutate(move |store| store.delete(&id))
        .await
        .map_err(|err| err.negotiated(format))?;

    Ok(match format {
        ResponseFormat::Json => Json(DeleteResponse::new(removed.id)).into_response(),
        ResponseFormat::Html => Redirect::to(LIST_PATH).into_response(),
    })
}
