//! Distance matrix between genome assemblies from rMLST marker gene identity.
//!
//! For each pair of assemblies the marker genes found in both are globally aligned, alignment
//! counts are pooled over genes and the distance is 1 minus the pooled identity.
//! The symmetric matrix is written in phylip like format.

pub mod dist;
pub mod errors;
pub mod genes;
pub mod matrix;
pub mod utils;

pub use errors::DistError;
pub use genes::{Assembly, GeneMap, GeneSeq};
