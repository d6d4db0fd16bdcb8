//! # Observability & Tracing
//!
//! Structured logging for the whole console, configured in one place.
//!
//! Log levels come from the `RUST_LOG` environment variable; the compact
//! format keeps lines short and hides module paths, since the interesting
//! context (sequence numbers, pages, ids) is carried as structured fields.
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Show dispatch/settlement detail, including dropped stale responses
//! RUST_LOG=debug cargo run
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
