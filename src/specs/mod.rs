// src/specs/mod.rs
//! # Page specs
//!
//! Where the ground truth lives in a page's HTML and how to pull it out.
//!
//! ## What lives here
//! - **Pure HTML parsing** of a fetched page into typed records
//!   (`release_notes`: version sections → `Release`).
//! - **Boundary choice**: which headings open a section, and what ends it.
//! - **Tolerant extraction**: whitespace-only text, repeated fragments and
//!   version text leaking into bodies are all absorbed here.
//!
//! ## What does **not** live here
//! - Fetching (`core::net`), persistence (`store`), change detection
//!   (`detect`), notification text (`notify::format`).
//!
//! ## Typical call chain
//! ```text
//! runner::Monitor::run → core::net::Fetch → specs::release_notes::extract
//!                      ↘ detect → store → notify
//! ```
//!
//! ## Conventions & invariants
//! - Output order is document order.
//! - A spec never fails on bad markup; it returns nothing and the caller
//!   decides what "nothing" means.
//! - Specs are testable **offline** against inline fixtures.
pub mod release_notes;
