//! Call API DTOs and request validation
//!
//! Bodies are taken as raw JSON so every rejection can name the offending
//! field before the store is touched.

use crate::domain::call::{CallField, CallRecord};
use crate::domain::shared::{CallTimestamp, DomainError};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

/// Call record response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallResponse {
    pub id: i64,
    pub current_floor: i64,
    pub demand_floor: i64,
    pub destination_floor: i64,
    pub call_datetime: String,
}

impl From<CallRecord> for CallResponse {
    fn from(call: CallRecord) -> Self {
        CallResponse {
            id: call.id,
            current_floor: call.current_floor,
            demand_floor: call.demand_floor,
            destination_floor: call.destination_floor,
            call_datetime: call.call_datetime.to_string(),
        }
    }
}

/// Acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Register call request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCallRequest {
    pub demand_floor: i64,
    pub destination_floor: i64,
}

impl RegisterCallRequest {
    pub fn from_json(body: &Value) -> Result<Self, DomainError> {
        let body = as_object(body)?;

        let (Some(demand), Some(destination)) =
            (body.get("demand_floor"), body.get("destination_floor"))
        else {
            return Err(DomainError::validation(
                "Both 'demand_floor' and 'destination_floor' are required.",
            ));
        };

        match (demand.as_i64(), destination.as_i64()) {
            (Some(demand_floor), Some(destination_floor)) => Ok(Self {
                demand_floor,
                destination_floor,
            }),
            _ => Err(DomainError::validation(
                "'demand_floor' and 'destination_floor' must be of type int.",
            )),
        }
    }
}

/// Update row request: an id plus at least one field assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRowRequest {
    pub id: i64,
    pub fields: Vec<CallField>,
}

impl UpdateRowRequest {
    pub fn from_json(body: &Value) -> Result<Self, DomainError> {
        let body = as_object(body)?;

        let id = body
            .get("id")
            .ok_or_else(|| DomainError::validation("Missing parameter 'id'"))?
            .as_i64()
            .ok_or_else(|| DomainError::validation("'id' must be of type int."))?;

        if let Some(unknown) = body
            .keys()
            .find(|key| key.as_str() != "id" && !CallField::is_known(key))
        {
            return Err(DomainError::validation(format!(
                "Unknown field '{}'",
                unknown
            )));
        }

        let fields = CallField::NAMES
            .iter()
            .filter_map(|name| body.get(*name).map(|value| parse_field(name, value)))
            .collect::<Result<Vec<_>, _>>()?;

        if fields.is_empty() {
            return Err(DomainError::validation("No valid column provided"));
        }

        Ok(Self { id, fields })
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, DomainError> {
    body.as_object()
        .ok_or_else(|| DomainError::validation("Request body must be a JSON object"))
}

fn parse_field(name: &str, value: &Value) -> Result<CallField, DomainError> {
    if name == "call_datetime" {
        let raw = value.as_str().unwrap_or_default();
        return CallTimestamp::parse(raw).map(CallField::CallDatetime);
    }

    let floor = value
        .as_i64()
        .ok_or_else(|| DomainError::validation(format!("'{}' must be of type int.", name)))?;

    Ok(match name {
        "current_floor" => CallField::CurrentFloor(floor),
        "demand_floor" => CallField::DemandFloor(floor),
        _ => CallField::DestinationFloor(floor),
    })
}

/// Domain error rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DomainError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Storage(_) => {
                error!("API: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}
