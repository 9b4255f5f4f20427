// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenValidator;

/// Shared application state.
///
/// The validator (and the JWKS cache it owns) is created once at startup and
/// shared across request tasks. It is never reached through a global.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    pub fn new(validator: TokenValidator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}
