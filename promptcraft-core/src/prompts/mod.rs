//! Prompt document assembly and input cleanup

pub mod composer;
pub mod sanitize;

pub use composer::{Section, compose, sections};
pub use sanitize::{Sanitized, sanitize};
