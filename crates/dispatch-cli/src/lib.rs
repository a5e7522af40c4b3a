//! Dispatch CLI library.
//!
//! This crate provides the command-line driver that feeds records into a
//! `DispatchQueue` and prints the order in which they are dispatched.

pub mod cli;
pub mod commands;
