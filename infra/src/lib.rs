//! # Sesame Infrastructure
//!
//! Concrete implementations of the core crate's persistence and email
//! contracts: MySQL via SQLx and the Resend HTTP API via reqwest, plus
//! an in-process mock mailer for tests and local development.

pub mod database;
pub mod email;

pub use database::mysql::MySqlAccountRepository;
pub use email::{MockEmailService, ResendEmailService};
