//! Database layer (external Supabase project).

pub mod supabase;

pub use supabase::SupabaseDb;

/// Table names as constants.
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const EVENTS: &str = "events";
    /// Join table linking users to events they attend
    pub const EVENT_PARTICIPANTS: &str = "event_participants";
}
