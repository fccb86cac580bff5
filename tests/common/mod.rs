//! Shared utilities for repo-toolbar integration tests
//!
//! Every test gets its own project tree and its own config and cache homes, so
//! tests never see each other's persisted lists or the developer's real config.

pub mod assertions;
pub mod project;
