//! Membership Registry - tiered, time-bounded membership credentials
//!
//! This crate implements a registry that issues, supersedes, expires,
//! revokes and transfers memberships while guaranteeing that each owner
//! holds at most one active membership at a time.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
