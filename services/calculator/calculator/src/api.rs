use std::sync::Arc;

use rocket::http::{Method, Status};
use rocket::route::{Handler, Outcome};
use rocket::serde::json::{json, Json, Value};
use rocket::{Data, Request, Route, State};

use calculator_client::{CalcRequest, CalcResponse, Calculation};
use telemetry::Measure;

use crate::dao::{HistoryConfig, HistoryDao};
use crate::error::ApiError;
use crate::expression::{eval, parse};

lazy_static! {
    static ref COMPUTE_MEASURE: Measure = Measure::new("controller", "compute");
    static ref HISTORY_MEASURE: Measure = Measure::new("controller", "history");
}

#[get("/status")]
fn status() -> Value {
    json!({ "status": "ok" })
}

#[get("/metrics")]
fn metrics() -> Result<String, Status> {
    telemetry::encode().map_err(|_| Status::InternalServerError)
}

#[post("/api/calc", data = "<request>")]
async fn calc(
    request: Json<CalcRequest>,
    dao: &State<Arc<dyn HistoryDao>>,
) -> Result<Json<CalcResponse>, ApiError> {
    COMPUTE_MEASURE
        .stats(async move {
            let CalcRequest { expression } = request.into_inner();

            let expr = parse(&expression)?;
            let result = eval(&expr)?;
            if !result.is_finite() {
                return Err(ApiError::InvalidExpression(
                    "Result is not a finite number".to_string(),
                ));
            }

            dao.record(&Calculation::new(expression, result)).await?;
            Ok(Json(CalcResponse { result }))
        })
        .await
}

fn parse_count(count: &str) -> Result<usize, ApiError> {
    match count.parse::<usize>() {
        Ok(c) if c > 0 => Ok(c),
        _ => Err(ApiError::InvalidRequest(format!(
            "History length must be a positive integer, got \"{}\"",
            count
        ))),
    }
}

#[get("/api/history")]
async fn history(
    dao: &State<Arc<dyn HistoryDao>>,
    config: &State<HistoryConfig>,
) -> Result<Json<Vec<Calculation>>, ApiError> {
    let count = config.default_lines;
    HISTORY_MEASURE
        .stats(async move { Ok(Json(dao.recent(count).await?)) })
        .await
}

#[get("/api/history/<count>")]
async fn history_count(
    count: &str,
    dao: &State<Arc<dyn HistoryDao>>,
) -> Result<Json<Vec<Calculation>>, ApiError> {
    HISTORY_MEASURE
        .stats(async move {
            let count = parse_count(count)?;
            Ok(Json(dao.recent(count).await?))
        })
        .await
}

/// Answers every request it is mounted for with a fixed status
#[derive(Clone)]
struct StatusHandler(Status);

#[rocket::async_trait]
impl Handler for StatusHandler {
    async fn handle<'r>(&self, request: &'r Request<'_>, _: Data<'r>) -> Outcome<'r> {
        Outcome::from(request, self.0)
    }
}

fn status_routes(status: Status, uri: &str, methods: &[Method]) -> Vec<Route> {
    methods
        .iter()
        .map(|method| Route::new(*method, uri, StatusHandler(status)))
        .collect()
}

pub fn routes() -> Vec<Route> {
    use Method::*;

    let mut routes = routes![status, metrics, calc, history, history_count];

    let not_allowed = Status::MethodNotAllowed;
    routes.append(&mut status_routes(
        not_allowed,
        "/api/calc",
        &[Get, Put, Delete, Patch, Options],
    ));
    for uri in ["/api/history", "/api/history/<_>"].iter() {
        routes.append(&mut status_routes(
            not_allowed,
            uri,
            &[Post, Put, Delete, Patch, Options],
        ));
    }
    routes.append(&mut status_routes(
        Status::ImATeapot,
        "/api/coffee",
        &[Get, Post, Put, Delete, Patch, Options],
    ));
    routes
}
