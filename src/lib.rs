//! # text2bin
//!
//! Command line frontend for the [`bitpattern`] crate.

pub mod cli;
