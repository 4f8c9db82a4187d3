//! # LandGrid Test Suite
//!
//! Unified test crate for flows that cross crate boundaries:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs      # seed → query → reconcile → envelope
//!     └── commands.rs   # orchestrator command lifecycles and races
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p land-tests
//! cargo test -p land-tests integration::
//! ```

pub mod integration;
