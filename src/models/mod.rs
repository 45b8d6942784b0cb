// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod event;
pub mod export;
pub mod participation;
pub mod profile;
pub mod user;

pub use event::{EventPricing, EventRecord};
pub use export::{ExportDocument, ExportProfile};
pub use participation::Participation;
pub use profile::{AccountTier, Profile, RenewInterval};
pub use user::AuthUserRecord;
