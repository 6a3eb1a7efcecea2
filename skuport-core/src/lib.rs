//! Skuport Core
//!
//! Core types for the skuport catalog-import client.
//!
//! This crate contains:
//! - Domain types: the tracked import job, its lifecycle states and events
//! - DTOs: wire payloads exchanged with the importer API

pub mod domain;
pub mod dto;
