// src/lib.rs - Library root for mvgen

pub mod backend;
pub mod cli;
pub mod generation;
pub mod infra;
pub mod session;
