//! identity of one marker gene between two assemblies

use crate::dist::aligner::GlobalAligner;
use crate::dist::editscript::AlignCounts;
use crate::errors::DistError;

/// Alignment summary of one shared gene
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeneIdentity {
    counts: AlignCounts,
}

impl GeneIdentity {
    /// fails if aligned length is null, identity would be undefined
    pub fn new(gene: &str, counts: AlignCounts) -> Result<Self, DistError> {
        if counts.aligned_length == 0 {
            return Err(DistError::AlignmentInvariant(gene.to_string()));
        }
        if counts.match_count > counts.aligned_length {
            return Err(DistError::MalformedEditScript(format!(
                "gene {} : match count {} over aligned length {}",
                gene, counts.match_count, counts.aligned_length
            )));
        }
        Ok(GeneIdentity { counts })
    }

    pub fn get_counts(&self) -> &AlignCounts {
        &self.counts
    }

    pub fn get_match_count(&self) -> usize {
        self.counts.match_count
    }

    pub fn get_aligned_length(&self) -> usize {
        self.counts.aligned_length
    }

    /// fraction of aligned columns that are exact matches, in [0,1]
    pub fn identity(&self) -> f64 {
        self.counts.match_count as f64 / self.counts.aligned_length as f64
    }
} // end of impl GeneIdentity

/// Aligns the two copies of a gene and summarizes the edit script.
pub fn gene_identity(gene: &str, seq_a: &[u8], seq_b: &[u8], aligner: &dyn GlobalAligner) -> Result<GeneIdentity, DistError> {
    if seq_a.is_empty() || seq_b.is_empty() {
        return Err(DistError::EmptySequence(gene.to_string()));
    }
    let script = aligner.align(seq_a, seq_b)?;
    let identity = GeneIdentity::new(gene, script.counts())?;
    log::trace!(
        "gene {} : matches {} aligned length {} identity {:.4}",
        gene,
        identity.get_match_count(),
        identity.get_aligned_length(),
        identity.identity()
    );
    Ok(identity)
} // end of gene_identity

//=======================================================================

// end of mod tests
