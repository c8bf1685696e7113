//! # Haven Shared
//! This crate defines shared data structures and types used across the Authors Haven
//! workspace. It includes actors, articles, comments, vote targets, and every
//! interaction record kept by the ledger.
pub mod types;
