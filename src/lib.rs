//! Run code snippets in almost any language through a remote execution API.

pub mod catalog;
pub mod cli;
pub mod composer;
pub mod config;
pub mod error;
pub mod exec;
pub mod interrupt;
pub mod jargon;
pub mod logging;
pub mod printer;
pub mod session;
pub mod store;
