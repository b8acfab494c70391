//! Global alignment capability.
//!
//! The distance computation only needs an edit script from a global (end to end) alignment,
//! so aligners are hidden behind [`GlobalAligner`]. [`EditDistanceAligner`] is the default :
//! the rust-bio pairwise aligner in global mode with unit costs (match 0, mismatch -1,
//! gap open 0, gap extend -1), that is a minimal edit distance alignment.

use bio::alignment::pairwise::Aligner;
use bio::alignment::AlignmentOperation;

use crate::dist::editscript::{EditOp, EditScript};
use crate::errors::DistError;

/// Something able to globally align two non empty sequences.
/// Must be deterministic for fixed inputs and shareable between threads.
pub trait GlobalAligner: Sync {
    fn align(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<EditScript, DistError>;
}

/// Default bound on the dynamic programming matrix size, in cells.
/// Marker genes are a few kb, so this is far above real inputs.
pub const MAX_ALIGN_CELLS: usize = 1 << 26;

/// Unit cost global aligner backed by rust-bio.
#[derive(Copy, Clone, Debug)]
pub struct EditDistanceAligner {
    /// alignments needing more cells are refused
    max_cells: usize,
}

impl Default for EditDistanceAligner {
    fn default() -> Self {
        EditDistanceAligner { max_cells: MAX_ALIGN_CELLS }
    }
}

impl EditDistanceAligner {
    pub fn new() -> Self {
        EditDistanceAligner::default()
    }

    /// aligner refusing sequence pairs with len_a * len_b over max_cells
    pub fn with_max_cells(max_cells: usize) -> Self {
        EditDistanceAligner { max_cells }
    }
} // end of impl EditDistanceAligner

impl GlobalAligner for EditDistanceAligner {
    fn align(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<EditScript, DistError> {
        if seq_a.is_empty() || seq_b.is_empty() {
            return Err(DistError::EmptySequence(String::from("<aligner>")));
        }
        let n = seq_a.len();
        let m = seq_b.len();
        match n.checked_mul(m) {
            Some(cells) if cells <= self.max_cells => {}
            _ => return Err(DistError::SequenceTooLong { len_a: n, len_b: m, max_cells: self.max_cells }),
        }
        let score = |a: u8, b: u8| if a == b { 0i32 } else { -1i32 };
        let mut aligner = Aligner::with_capacity(n, m, 0, -1, score);
        let alignment = aligner.global(seq_a, seq_b);
        log::trace!("EditDistanceAligner : lengths ({}, {}), score {}", n, m, alignment.score);
        // rust-bio Ins consumes a base of first sequence only, Del a base of second only
        let mut script = EditScript::new();
        for op in &alignment.operations {
            match op {
                AlignmentOperation::Match => script.push(1, EditOp::Match),
                AlignmentOperation::Subst => script.push(1, EditOp::Mismatch),
                AlignmentOperation::Ins => script.push(1, EditOp::Deletion),
                AlignmentOperation::Del => script.push(1, EditOp::Insertion),
                AlignmentOperation::Xclip(_) | AlignmentOperation::Yclip(_) => {
                    return Err(DistError::MalformedEditScript(format!("clipping in global alignment : {:?}", op)));
                }
            }
        }
        Ok(script)
    } // end of align
} // end of impl GlobalAligner for EditDistanceAligner

//=======================================================================

// end of mod tests
