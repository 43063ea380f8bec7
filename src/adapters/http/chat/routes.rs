//! Route definitions for the chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{chat, index, ChatAppState};

/// Create the chat router.
///
/// # Endpoints
///
/// - `POST /chat` - Process one chat turn
/// - `GET /` - Serve the static chat page
pub fn routes() -> Router<ChatAppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_creates_valid_router() {
        // Ensures the route configuration compiles and creates a valid router
        let _routes = routes();
    }
}
