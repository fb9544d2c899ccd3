//! `GET /api/hello`

use axum::{extract::State, Json};

use hello_core::GreetingResponse;

use crate::app_state::AppState;

pub async fn hello(State(state): State<AppState>) -> Json<GreetingResponse> {
    Json(state.greeting().greet())
}
