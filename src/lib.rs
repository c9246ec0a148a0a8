// src/lib.rs

pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod learning;

pub use crate::core::engine::AutocompleteProvider;
pub use crate::core::types::{Candidate, Confidence};
pub use crate::error::{Error, Result};
