//! Page content model for generated questionnaires.
//!
//! # Core Concepts
//!
//! - [`Item`]: One entry on a page. The set of variants is closed: single-choice
//!   questions, static text blocks, free-text questions and page breaks.
//! - [`Section`]: One rendered page. It always starts with exactly one
//!   [`PageBreak`] carrying the page's [`PageId`], followed by its content items.
//! - [`Form`]: A title plus every section, in assembly order.
//!
//! Navigation between pages goes through [`ChoiceTarget`]: a choice either jumps
//! to another page or submits the form. "Submit" is its own case and never
//! collides with page `0`.
//!
//! Every item renders to the publishing service's record shape through
//! [`Item::to_record`] (see the [`record`] module).

mod form;
mod item;
pub mod record;
mod section;

pub use form::*;
pub use item::*;
pub use section::*;
