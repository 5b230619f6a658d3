#![recursion_limit = "256"]

//! Tabular MLP surrogate models: load a CSV, min-max normalize it,
//! train a small dense network with burn and store everything needed
//! to reuse it in one self-describing model file.

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ml;

pub use error::{Result, SurrogateError};
