//! mindscreen-core
//!
//! Pure domain types shared by every Mindscreen crate: severity bands,
//! scores, patient intake and the stored outcome of a screening.

pub mod error;
pub mod models;
