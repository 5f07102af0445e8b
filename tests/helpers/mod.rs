//! Shared fixture builders for the integration tests.
//!
//! Documents are populated programmatically, the way an external parser
//! would, so every test spells out exactly the tree shape it depends on.

pub mod fixtures;
