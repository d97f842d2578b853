//! Utilities shared by the API test suites under `tests/`.

pub mod inventory;
