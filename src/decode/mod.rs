//! Response normalizer module
//!
//! List endpoints do not agree on a response shape: some return a bare
//! array, some wrap the list under `items`, `data`, `seats` or
//! `applications`, and some return a single object. The normalizer turns
//! any of these into a flat list of records.
//!
//! # Overview
//!
//! Rules are tried in order:
//!
//! 1. A bare array is returned as is
//! 2. The first candidate key whose value is an array
//! 3. A non-array object becomes a one-element list
//! 4. Anything else is an empty list

mod normalizer;

pub use normalizer::ResponseNormalizer;
