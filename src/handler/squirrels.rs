//! Squirrel resource handlers
//!
//! The five CRUD operations against the record store. Every handler
//! delegates persistence to the store held by the shared state and
//! maps its outcome onto an HTTP response.

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::routing::Operation;
use crate::store::StoreError;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};

/// Dispatch a matched route to its operation
pub async fn dispatch<B>(
    operation: Operation,
    id: Option<String>,
    req: Request<B>,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: hyper::body::Body,
{
    // Routes with an {id} pattern always capture one; default is never
    // reached for them
    let id = id.unwrap_or_default();

    match operation {
        Operation::List => list(state),
        Operation::Retrieve => retrieve(state, &id),
        Operation::Create => create(state, req).await,
        Operation::Update => update(state, &id, req).await,
        Operation::Delete => delete(state, &id).await,
    }
}

/// GET /squirrels — full collection as a JSON array
fn list(state: &AppState) -> Response<Full<Bytes>> {
    match state.store.squirrels() {
        Ok(squirrels) => http::build_json_response(&squirrels),
        Err(e) => store_failure(&e),
    }
}

/// GET /squirrels/{id} — single record or 404
fn retrieve(state: &AppState, id: &str) -> Response<Full<Bytes>> {
    match state.store.squirrel(id) {
        Ok(Some(squirrel)) => http::build_json_response(&squirrel),
        Ok(None) => http::build_404_response(),
        Err(e) => store_failure(&e),
    }
}

/// POST /squirrels — create from form body, 201 with empty body
async fn create<B>(state: &AppState, req: Request<B>) -> Response<Full<Bytes>>
where
    B: hyper::body::Body,
{
    let form = match read_form(req, state).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    match state.store.create(&form.name, &form.size).await {
        Ok(_) => http::build_created_response(),
        Err(e) => store_failure(&e),
    }
}

/// PUT /squirrels/{id} — 404 when the target is absent, else update
/// from form body and respond 204
async fn update<B>(state: &AppState, id: &str, req: Request<B>) -> Response<Full<Bytes>>
where
    B: hyper::body::Body,
{
    // The target is checked before the body is considered, so a PUT to
    // a missing id is 404 even with a malformed body
    match state.store.squirrel(id) {
        Ok(Some(_)) => {}
        Ok(None) => return http::build_404_response(),
        Err(e) => return store_failure(&e),
    }

    let form = match read_form(req, state).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    match state.store.update(id, &form.name, &form.size).await {
        Ok(true) => http::build_no_content_response(),
        Ok(false) => http::build_404_response(),
        Err(e) => store_failure(&e),
    }
}

/// DELETE /squirrels/{id} — 204 when removed, 404 when absent
async fn delete(state: &AppState, id: &str) -> Response<Full<Bytes>> {
    match state.store.delete(id).await {
        Ok(true) => http::build_no_content_response(),
        Ok(false) => http::build_404_response(),
        Err(e) => store_failure(&e),
    }
}

/// Collect the request body and decode the squirrel form per the
/// configured missing-field policy
async fn read_form<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<http::SquirrelForm, Response<Full<Bytes>>>
where
    B: hyper::body::Body,
{
    let Ok(collected) = req.collect().await else {
        return Err(http::build_400_response("failed to read request body"));
    };

    http::parse_squirrel_form(&collected.to_bytes(), state.config.http.on_missing_field)
        .map_err(|e| http::build_400_response(&e))
}

/// A store failure is fatal for the request, not for the process
fn store_failure(err: &StoreError) -> Response<Full<Bytes>> {
    logger::log_error(&format!("Store operation failed: {err}"));
    http::build_500_response()
}
