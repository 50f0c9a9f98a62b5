//! # scpl CLI
//!
//! Seeding and account administration for the signage backend.
//!
//! The server calls [`seeder::seed_all`] at startup; the `scpl-cli` binary
//! exposes the same seeder plus interactive user creation.
//!
//! ## Usage
//!
//! ```ignore
//! use scpl_cli::seeder::seed_all;
//! use scpl_config::SeedConfig;
//! use scpl_db::Stores;
//!
//! let stores = Stores::postgres(pool);
//! let summary = seed_all(&stores, &SeedConfig::from_env(), 12).await?;
//! ```

pub mod seeder;
