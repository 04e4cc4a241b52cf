//! # tally-core
//!
//! Core types shared across all Tally crates.
//!
//! This crate provides the foundational types for the bookkeeping document and
//! its change history:
//! - Record structs for every collection (customers, invoices, expenses, ...)
//! - The [`Record`](entities::Record) trait with explicit per-field setters
//! - Entity type tags, audit event kinds, and status enums
//! - ID prefix constants and generators
//! - The persisted [`AuditEvent`](entities::AuditEvent)
//! - The snapshot codec used to serialize a single record
//! - [`CompanyDocument`](document::CompanyDocument), the owning document
//! - Cross-cutting error types

pub mod document;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod snapshot;
