//! Core business logic for Bursary.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `proposal` - Budget proposals and line-item arithmetic
//! - `review` - The proposal decision state machine
//! - `access` - Role to capability mapping
//! - `auth` - Password hashing

pub mod access;
pub mod auth;
pub mod proposal;
pub mod review;
