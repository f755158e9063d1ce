use std::borrow::Cow;

use log::{error, info};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{response, Request};
use serde::Serialize;

use telemetry::IsErr;

use crate::dao::DaoError;
use crate::expression::{EvalError, ParseError};

#[derive(Debug)]
pub enum ApiError {
    InternalError(String),
    InvalidExpression(String),
    InvalidRequest(String),
}

impl From<ParseError> for ApiError {
    fn from(e: ParseError) -> Self {
        ApiError::InvalidExpression(e.0)
    }
}

impl From<EvalError> for ApiError {
    fn from(e: EvalError) -> Self {
        ApiError::InvalidExpression(e.to_string())
    }
}

impl From<DaoError> for ApiError {
    fn from(e: DaoError) -> Self {
        match e {
            DaoError::InvalidRecord(e) => ApiError::InvalidExpression(e),
            e => ApiError::InternalError(format!("DaoError: {}", e)),
        }
    }
}

impl IsErr for ApiError {
    fn is_err(&self) -> bool {
        matches!(self, ApiError::InternalError(_))
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: Cow<'a, str>,
}

impl<'r> response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (message, status) = match self {
            ApiError::InternalError(e) => {
                error!("Internal Error: {}", e);
                (
                    Cow::Borrowed("Internal Server Error"),
                    Status::InternalServerError,
                )
            }
            ApiError::InvalidExpression(e) | ApiError::InvalidRequest(e) => {
                info!("Bad Request: {}", e);
                (Cow::Owned(e), Status::BadRequest)
            }
        };
        response::status::Custom(status, Json(ErrorResponse { message })).respond_to(req)
    }
}
