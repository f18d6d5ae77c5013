// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Batch renderer for macromolecular structure snapshots.
//!
//! Molsnap turns a parsed structure (one or more models, their chains and
//! their symmetry assemblies) into a deterministic set of still images:
//! one per model, per assembly, per polymer chain, optionally one of all
//! models overlaid and one of an explicit chain-list selection.
//!
//! # Key entry points
//!
//! - [`plan::classify`] and [`plan::plan`] - size classification and the
//!   representation recipe for a target
//! - [`camera::frame`] - deterministic principal-axes camera framing
//! - [`chain_list::parse`] and [`chain_list::resolve`] - the chain-list
//!   selection language
//! - [`render::Orchestrator`] - drives a [`engine::RenderEngine`] and an
//!   [`render::ImageSink`] over every target
//! - [`options::Options`] - TOML-backed rendering configuration
//!
//! # Pipeline
//!
//! For each target the orchestrator builds the target structure, classifies
//! it, plans its layers, clears the engine, adds the layers, frames the
//! camera on the focus, rasterizes, clears the engine again and hands the
//! pixels to the sink. Every file name is derived from the input stem and
//! the target, so re-running on the same input reproduces the same files.

pub mod camera;
pub mod chain_list;
pub mod color;
pub mod engine;
pub mod error;
pub mod options;
pub mod plan;
pub mod render;
pub mod structure;
#[cfg(test)]
mod testing;

pub use error::MolsnapError;
