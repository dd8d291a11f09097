//! HTTP layer for the Sesame credential and session service.
//!
//! Thin by design: handlers parse and validate the request, call one
//! `AccountService` operation, and translate the result into the JSON
//! envelope and cookies the web client expects. All business rules live
//! in `sesame_core`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
