use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::AppError;

use super::boq::BoqItem;
use super::catalog::sample_catalog;
use super::domain::{InvalidTender, TenderId, TenderQuery, TenderRecord, TenderSubmission};
use super::repository::TenderRepository;
use super::service::{TenderIntelService, TenderServiceError};

/// Router builder exposing the tender catalog and competitor analytics.
pub fn tender_router<R>(service: Arc<TenderIntelService<R>>) -> Router
where
    R: TenderRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/tenders",
            post(register_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/tenders/import", post(import_handler::<R>))
        .route("/api/v1/tenders/:tender_id", get(tender_handler::<R>))
        .route(
            "/api/v1/tenders/:tender_id/competitors-ml",
            post(analyze_handler::<R>).get(latest_analysis_handler::<R>),
        )
        .route("/api/v1/tenders/:tender_id/boq", post(boq_handler::<R>))
        .route("/api/v1/competitors/score", post(score_handler::<R>))
        .with_state(service)
}

fn error_response(error: impl Into<TenderServiceError>) -> Response {
    AppError::from(error.into()).into_response()
}

/// Unwrap an extracted body, reporting rejections with the JSON error envelope.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| error_response(InvalidTender::Body(rejection.body_text())))
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<TenderIntelService<R>>>,
    payload: Result<Json<TenderSubmission>, JsonRejection>,
) -> Response
where
    R: TenderRepository + 'static,
{
    let submission = match body(payload) {
        Ok(submission) => submission,
        Err(response) => return response,
    };

    match service.register(submission) {
        Ok(tender) => (StatusCode::CREATED, Json(tender)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<TenderIntelService<R>>>,
    Query(query): Query<TenderQuery>,
) -> Response
where
    R: TenderRepository + 'static,
{
    match service.list(&query) {
        Ok(tenders) => (StatusCode::OK, Json(tenders)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn import_handler<R>(
    State(service): State<Arc<TenderIntelService<R>>>,
) -> Response
where
    R: TenderRepository + 'static,
{
    match service.import(sample_catalog(Utc::now())) {
        Ok(count) => {
            let payload = json!({
                "message": format!("Imported {count} tenders successfully"),
                "count": count,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn tender_handler<R>(
    State(service): State<Arc<TenderIntelService<R>>>,
    Path(tender_id): Path<String>,
) -> Response
where
    R: TenderRepository + 'static,
{
    match service.get(&TenderId(tender_id)) {
        Ok(tender) => (StatusCode::OK, Json(tender)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analyze_handler<R>(
    State(service): State<Arc<TenderIntelService<R>>>,
    Path(tender_id): Path<String>,
) -> Response
where
    R: TenderRepository + 'static,
{
    match service.analyze_competitors(&TenderId(tender_id)) {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn latest_analysis_handler<R>(
    State(service): State<Arc<TenderIntelService<R>>>,
    Path(tender_id): Path<String>,
) -> Response
where
    R: TenderRepository + 'static,
{
    match service.latest_analysis(&TenderId(tender_id)) {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn boq_handler<R>(
    State(service): State<Arc<TenderIntelService<R>>>,
    Path(tender_id): Path<String>,
    payload: Result<Json<Vec<BoqItem>>, JsonRejection>,
) -> Response
where
    R: TenderRepository + 'static,
{
    let items = match body(payload) {
        Ok(items) => items,
        Err(response) => return response,
    };

    match service.price_boq(&TenderId(tender_id), items) {
        Ok(bill) => (StatusCode::OK, Json(bill)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<TenderIntelService<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    R: TenderRepository + 'static,
{
    let record = match body(payload).and_then(|value| {
        TenderRecord::from_json(value).map_err(error_response)
    }) {
        Ok(record) => record,
        Err(response) => return response,
    };

    match service.score_record(&record) {
        Ok((competitors, market_analysis)) => {
            let payload = json!({
                "competitors": competitors,
                "market_analysis": market_analysis,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
