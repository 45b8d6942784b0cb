// SPDX-License-Identifier: MIT

//! Services module - workflows over the external service.

pub mod export;
pub mod storage;

pub use storage::StorageService;
