//! Storage layer for the case tracker
//!
//! Every record kind (inmates and their attempt/confirm history) lives in a
//! single shared `DynamoDB` table and is told apart by key prefix. This crate
//! owns the domain model, the key builder, the item mapping and the
//! [`inmate::InmateStorage`] service that is the only caller of the store.

pub mod inmate;
pub mod item_store;
pub mod key;
pub mod mapping;
pub mod metrics;
pub mod model;
