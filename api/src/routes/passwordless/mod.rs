//! Routes under `/api/login` (passwordless magic link flow)

pub mod magic_login;
pub mod magic_request;
