//! Tradeline - draft pick ownership and trade lineage for dynasty leagues.
//!
//! This crate provides both a CLI application and a library that answers
//! three questions about a league's draft picks:
//!
//! - who holds each pick after every trade ([`ownership`])
//! - which player a pick was used on ([`became`])
//! - how picks, players and trades connect ([`lineage`])
//!
//! League data arrives through the collaborator traits in [`providers`].

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod became;
pub mod domain;
pub mod error;
pub mod lineage;
pub mod ownership;
pub mod providers;
pub mod teams;

// Application wiring used by the binary
pub mod app;
pub mod cli;
pub mod config;
pub mod output;
