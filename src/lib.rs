//! Compile branching-narrative stories into questionnaire forms.
//!
//! A story ([`story::Story`]) is a finite world-state space plus scenes that
//! render one page per state. Page ids are allocated up front, every page is
//! generated and cross-checked, and the result is published through a form
//! service that only understands "page N jumps to page M" ([`publish`]).

pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod publish;
pub mod story;

pub use error::AuthoringError;
