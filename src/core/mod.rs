//! Core modules for Facefeed

pub mod client;
pub mod decoder;
pub mod store;

pub use client::{ClientConfig, ClientError, Connection, DetectionClient, start_ingest};
pub use decoder::{DecodeError, EventDecoder};
pub use store::SubjectStore;
