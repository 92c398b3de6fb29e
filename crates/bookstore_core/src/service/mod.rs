//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into caller-facing entry points.
//! - Keep embedding applications decoupled from storage details.

pub mod book_service;
