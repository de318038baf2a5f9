//! SQLite storage implementation for MyFolio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `myfolio-core` and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - Repository implementations for positions, snapshots and rebalancing targets
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//! The engine in `core` is database-agnostic and works with traits.
//!
//! ```text
//!        core (engine, traits)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool; every write is serialized through the
//! single writer actor in [`db::write_actor`].

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod portfolio;
pub mod positions;
pub mod rebalancing;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use portfolio::snapshot::SnapshotRepository;
pub use positions::PositionRepository;
pub use rebalancing::RebalancingTargetRepository;

// Re-export from myfolio-core for convenience
pub use myfolio_core::errors::{DatabaseError, Error, Result};
