//! Shared helpers for the integration tests
//!
//! Tests drive the real binary against throwaway git repositories and a
//! sandboxed environment (home, config file and cache all live in temp dirs).

pub mod assertions;
pub mod repository;
