//! Errors returned by the distance engine and its file boundary.
//!
//! Input-integrity errors (missing gene file, duplicate gene, bad compression) are fatal and
//! raised before any distance computation. Computation errors are attached to an assembly pair
//! via [`DistError::PairFailed`] so the scheduler can decide to abort or to record a missing entry.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum DistError {
    /// the gene file expected next to an assembly does not exist
    #[error("gene file {0:?} is missing")]
    MissingGeneFile(PathBuf),
    /// bzip2 and zip are detected from magic bytes and refused
    #[error("cannot use {format} format for {path:?} - use gzip instead")]
    UnsupportedCompression { path: PathBuf, format: String },
    #[error("duplicate gene name {gene} in {path:?}")]
    DuplicateGene { path: PathBuf, gene: String },
    #[error("fasta parsing failed for {path:?} : {msg}")]
    Fasta { path: PathBuf, msg: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// alignment was asked with an empty sequence, a caller error
    #[error("cannot align empty sequence for gene {0}")]
    EmptySequence(String),
    /// dynamic programming matrix of the alignment would exceed the allowed number of cells
    #[error("alignment of sequences of length {len_a} and {len_b} exceeds {max_cells} cells")]
    SequenceTooLong { len_a: usize, len_b: usize, max_cells: usize },
    /// a non empty alignment produced an edit script of null length
    #[error("alignment of gene {0} gave a null aligned length")]
    AlignmentInvariant(String),
    #[error("malformed edit script : {0}")]
    MalformedEditScript(String),
    /// any failure while computing the distance between two assemblies
    #[error("distance computation failed between {first} and {second}")]
    PairFailed {
        first: String,
        second: String,
        #[source]
        source: Box<DistError>,
    },
    #[error("distance table misses entry ({0}, {1})")]
    IncompleteTable(String, String),
    #[error("invalid parameter : {0}")]
    InvalidParameter(String),
    #[error("malformed distance matrix at line {line} : {msg}")]
    MalformedMatrix { line: usize, msg: String },
}

impl DistError {
    /// wraps an error with the pair of assemblies it happened in
    pub fn for_pair(self, first: &str, second: &str) -> Self {
        DistError::PairFailed {
            first: first.to_string(),
            second: second.to_string(),
            source: Box::new(self),
        }
    }

    /// message of error followed by messages of its sources, separated by ": "
    pub fn chain(&self) -> String {
        let mut msg = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(e) = source {
            msg.push_str(": ");
            msg.push_str(&e.to_string());
            source = e.source();
        }
        msg
    }
} // end of impl DistError

//=======================================================================

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_chain_display() {
        let e = DistError::MalformedEditScript("bad run".to_string()).for_pair("a.fasta", "b.fasta");
        assert_eq!(
            e.chain(),
            "distance computation failed between a.fasta and b.fasta: malformed edit script : bad run"
        );
        assert_eq!(DistError::AlignmentInvariant("g1".to_string()).chain(), "alignment of gene g1 gave a null aligned length");
    }
} // end of mod tests
