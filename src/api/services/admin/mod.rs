//! Admin API endpoints: authentication, lure CRUD and account management.

pub mod accounts;
pub mod auth;
mod helpers;
mod lure_crud;
pub mod routes;
mod types;

pub use helpers::{error_from_pagespy, error_response, success_response};
pub use types::*;

pub use accounts::{create_account, delete_account, list_accounts};
pub use auth::{login, verify};
pub use lure_crud::{create_lure, delete_lure, get_lure, list_lures, update_lure};
