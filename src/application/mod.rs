//! Application layer - orchestrates domain logic behind the HTTP adapters.

pub mod handlers;
