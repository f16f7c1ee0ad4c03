//! PageSpy - a covert page-tracking service
//!
//! Serves disguised decoy pages on registered paths ("lures"). Every page
//! load records a view with the visitor's IP and user agent, and the
//! embedded client script posts back one camera frame and one geolocation
//! fix, each tagged with the view's correlation id. A Bearer-token admin
//! API manages lures and accounts and reviews captured data.
//!
//! # Architecture
//! - `storage`: SeaORM backend and domain models
//! - `services`: lure registry, view ledger, admin accounts, IP info
//! - `render`: decoy page + review table HTML, capture script asset
//! - `api`: HTTP handlers, JWT, auth middleware
//! - `runtime`: server startup and lifecycle
//! - `config` / `system`: configuration and logging

pub mod api;
pub mod config;
pub mod errors;
pub mod render;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
