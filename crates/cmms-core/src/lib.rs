//! Core domain for the CMMS login page.
//!
//! - `validation`: static per-field rules and their results
//! - `login`: the login form controller and its attempt state machine
//! - `auth`: the injectable authentication capability
//! - `surface`: notification, field-error and redirect collaborators
//! - `config` / `logging`: ambient setup shared by the front ends

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod login;
pub mod surface;
pub mod validation;

pub use error::LoginError;
pub use validation::Field;
