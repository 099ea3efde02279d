//! Parser for flattened, hierarchically numbered outlines.
//!
//! Lines such as `一、`, `（一）` and `1.` are classified into heading levels
//! and assembled into a tree. Every heading gets a full number key
//! (`一、/（一）`) and a content key (`Intro-Background`); sections can be
//! looked up and extracted by content key, and a report's numbering can be
//! reconciled against a template with the same wording.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
