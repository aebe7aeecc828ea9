//! Core use-case services.
//!
//! # Responsibility
//! - Apply input defaults and validation before repository calls.
//! - Keep UI layers decoupled from storage details.

pub mod notebook_service;
