// SPDX-License-Identifier: MIT

//! MeetSync API: account lifecycle and event management backend.
//!
//! This crate is a thin application layer over an external managed
//! identity/storage/database service. Every operation is a direct
//! pass-through call; there is no scheduler, cache, or queue here.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SupabaseDb;
use services::StorageService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SupabaseDb,
    pub storage: StorageService,
}
