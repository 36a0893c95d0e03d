//! Name matching used to propose replacements for unresolved identifiers.
//!
//! Matching is ASCII case-insensitive: bean ids, property names and Java
//! member names are compared byte-wise and only `A-Z`/`a-z` fold.
//!
//! [`fuzzy_match`] ranks candidates for a query typed by a user (prefix first,
//! then camel-case aware subsequences). [`similarity`] answers the question a
//! quick fix asks: "is this declared name plausibly what the author meant?".

#![forbid(unsafe_code)]

mod scoring;
mod similarity;

pub use scoring::{fuzzy_match, MatchKind, MatchScore};
pub use similarity::{edit_distance, is_similar_name, similarity, Similarity};
