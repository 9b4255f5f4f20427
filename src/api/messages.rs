// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Message endpoints.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{AuthError, Claims};

/// Scope required by the scoped endpoint.
const READ_MESSAGES_SCOPE: &str = "read:messages";

/// Response body shared by all message endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Public endpoint, no authentication required.
#[utoipa::path(
    get,
    path = "/api/public",
    tag = "Messages",
    responses(
        (status = 200, description = "Public message", body = MessageResponse),
    )
)]
pub async fn public() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Hello from a public endpoint! You don't need to be authenticated to see this.",
    ))
}

/// Private endpoint, requires a valid bearer token.
#[utoipa::path(
    get,
    path = "/api/private",
    tag = "Messages",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Private message", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token"),
    )
)]
pub async fn private(Claims(_claims): Claims) -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Hello from a private endpoint! You need to be authenticated to see this.",
    ))
}

/// Scoped endpoint, requires a valid token granting `read:messages`.
///
/// The scope check runs after token validation: a valid token without the
/// scope gets 403, not 401.
#[utoipa::path(
    get,
    path = "/api/private-scoped",
    tag = "Messages",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Scoped message", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Token lacks the read:messages scope"),
    )
)]
pub async fn private_scoped(
    Claims(claims): Claims,
) -> Result<Json<MessageResponse>, AuthError> {
    if !claims.has_scope(READ_MESSAGES_SCOPE) {
        return Err(AuthError::InsufficientScope);
    }

    Ok(Json(MessageResponse::new(
        "Hello from a private endpoint! You need to be authenticated and have a scope of read:messages to see this.",
    )))
}
