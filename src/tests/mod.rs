//! Consolidated test modules.
//!
//! End-to-end tests that drive the rule against a mock GitHub API.
