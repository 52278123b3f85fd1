//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256 checksums, constant-time comparison)
//! - Bearer token extraction from request headers
//! - Environment value parsing for configuration
//! - SQLite pool setup and embedded migrations

pub mod bearer;
pub mod config;
pub mod crypto;
pub mod database;
