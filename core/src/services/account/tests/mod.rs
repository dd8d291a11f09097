//! Tests for the account lifecycle service.

mod service_tests;
