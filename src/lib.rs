//! Wellspring - Supportive Well-Being Chat Service
//!
//! This crate implements a stateless chat endpoint that forwards user
//! messages to an external completion API with a fixed therapeutic persona
//! and a conversation-phase hint, validates the structured JSON reply, and
//! short-circuits crisis messages with a fixed escalation response.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
