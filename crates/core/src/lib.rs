//! Core library for diagprep
//!
//! This crate implements the **Functional Core** of the diagprep application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`diagprep_core`** (this crate): Pure transformation functions with zero I/O
//! - **`diagprep`**: Reading payloads, rendering output, logging (the Imperative Shell)
//!
//! Every function here takes a value and returns a derived value. Nothing
//! reads the filesystem, the environment or any mutable global, so the
//! functions are safe to call from any number of threads at once.
//!
//! # Module Organization
//!
//! - [`information`]: Semantic version parsing and release type classification
//! - [`flatten`]: Flattening nested payloads into "Start Case" keyed objects
//! - [`redact`]: Replacing absolute filesystem paths with their basename
//!
//! # Example Usage
//!
//! ```rust
//! use diagprep_core::flatten::make_flat_start_case_object;
//! use diagprep_core::information::{get_release_type, ReleaseType};
//! use diagprep_core::redact::{hide_absolute_paths_in_object, PathConvention};
//! use serde_json::json;
//!
//! assert_eq!(get_release_type("1.0.0+6374412"), ReleaseType::Snapshot);
//!
//! let payload = json!({ "image": { "sourcePath": "/home/john/rpi.img" } });
//! let redacted = hide_absolute_paths_in_object(Some(&payload), PathConvention::Posix);
//! let flat = make_flat_start_case_object(redacted.as_ref());
//!
//! assert_eq!(flat, Some(json!({ "Image Source Path": "rpi.img" })));
//! ```

pub mod flatten;
pub mod information;
pub mod redact;
