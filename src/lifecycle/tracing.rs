//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden; store events carry an
//! `entity_type` field instead.
//!
//! ## Usage
//!
//! ```bash
//! # Store lifecycle and HTTP failures
//! RUST_LOG=info cargo run
//!
//! # Every dispatched command with its payload, token acquisition steps
//! RUST_LOG=debug cargo run
//!
//! # Only the HTTP layer
//! RUST_LOG=crm_client::http=debug cargo run
//! ```
//!
//! ## What Gets Logged
//!
//! - **Store lifecycle**: `Actor started`, `Mailbox closed`, `Shutdown`
//! - **Settlements**: `Fetch fulfilled` / `Fetch rejected`, `Created`, `Updated`,
//!   `Deleted` and their `... rejected` counterparts, with `entity_type` and ids
//! - **Races**: `Discarding stale fetch` (or `Older fetch settled last, applying`) at debug
//! - **HTTP**: one span per request with `method` and `path`; non-2xx responses
//!   are logged at warn with the status and the derived message
//! - **Auth**: silent acquisition failures and the interactive fallback
//!
//! With `RUST_LOG=info` a fetch looks like:
//!
//! ```text
//! INFO Actor started entity_type="LeadDto" policy=LastSettledWins
//! INFO Fetch fulfilled entity_type="LeadDto" seq=0 size=12
//! ```
//!
//! Access tokens are never recorded.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the store instead
        .compact()
        .init();
}
