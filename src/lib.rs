//! git-changelog: settings resolution and output dispatch for a changelog generator
//!
//! Turns command-line flags and an optional settings file into one validated
//! [`config::Settings`], then drives a [`engine::ChangelogEngine`] for each
//! selected output sink.

pub mod config;
pub mod dispatch;
pub mod engine;
