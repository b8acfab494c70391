//! Run length encoded alignment operations and their summary counts.
//!
//! Text form is the extended CIGAR used by edit distance aligners : `12=1X3=2I5=1D`.
//! Plain CIGAR `M` is refused, it does not tell matches from mismatches.

use std::fmt;

use crate::errors::DistError;

/// One alignment operation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOp {
    Match,
    Mismatch,
    /// base present in second sequence only
    Insertion,
    /// base present in first sequence only
    Deletion,
}

impl EditOp {
    pub fn to_char(self) -> char {
        match self {
            EditOp::Match => '=',
            EditOp::Mismatch => 'X',
            EditOp::Insertion => 'I',
            EditOp::Deletion => 'D',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(EditOp::Match),
            'X' => Some(EditOp::Mismatch),
            'I' => Some(EditOp::Insertion),
            'D' => Some(EditOp::Deletion),
            _ => None,
        }
    }
} // end of impl EditOp

/// Aggregate counts of an edit script
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct AlignCounts {
    pub match_count: usize,
    pub aligned_length: usize,
}

impl AlignCounts {
    pub fn new(match_count: usize, aligned_length: usize) -> Self {
        AlignCounts { match_count, aligned_length }
    }

    /// accumulate counts of another gene
    pub fn add(&mut self, other: &AlignCounts) {
        self.match_count += other.match_count;
        self.aligned_length += other.aligned_length;
    }
}

/// An ordered list of (run length, operation).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EditScript {
    runs: Vec<(usize, EditOp)>,
}

impl EditScript {
    pub fn new() -> Self {
        EditScript { runs: Vec::new() }
    }

    /// appends a run, merging with last run if the operation is the same
    pub fn push(&mut self, len: usize, op: EditOp) {
        if len == 0 {
            return;
        }
        match self.runs.last_mut() {
            Some((last_len, last_op)) if *last_op == op => *last_len += len,
            _ => self.runs.push((len, op)),
        }
    }

    pub fn runs(&self) -> &[(usize, EditOp)] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Sums run lengths : all of them give the aligned length, match runs give the match count.
    pub fn counts(&self) -> AlignCounts {
        let mut counts = AlignCounts::default();
        for &(len, op) in &self.runs {
            counts.aligned_length += len;
            if op == EditOp::Match {
                counts.match_count += len;
            }
        }
        counts
    }

    /// parse extended cigar text
    pub fn from_cigar(cigar: &str) -> Result<Self, DistError> {
        let mut script = EditScript::new();
        let mut len: Option<usize> = None;
        for c in cigar.chars() {
            if let Some(d) = c.to_digit(10) {
                let cur = len.unwrap_or(0);
                len = Some(
                    cur.checked_mul(10)
                        .and_then(|v| v.checked_add(d as usize))
                        .ok_or_else(|| DistError::MalformedEditScript(format!("run length overflow in {}", cigar)))?,
                );
                continue;
            }
            let op = EditOp::from_char(c)
                .ok_or_else(|| DistError::MalformedEditScript(format!("unknown operation '{}' in {}", c, cigar)))?;
            match len.take() {
                Some(l) => script.push(l, op),
                None => {
                    return Err(DistError::MalformedEditScript(format!(
                        "operation '{}' without run length in {}",
                        c, cigar
                    )))
                }
            }
        }
        if len.is_some() {
            return Err(DistError::MalformedEditScript(format!("trailing run length in {}", cigar)));
        }
        Ok(script)
    } // end of from_cigar
} // end of impl EditScript

impl fmt::Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(len, op) in &self.runs {
            write!(f, "{}{}", len, op.to_char())?;
        }
        Ok(())
    }
}

//=======================================================================

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_counts() {
        let script = EditScript::from_cigar("10=2X3I5=1D").unwrap();
        let counts = script.counts();
        assert_eq!(counts.match_count, 15);
        assert_eq!(counts.aligned_length, 21);
    }

    #[test]
    fn test_plain_cigar_m_refused() {
        let res = EditScript::from_cigar("4M1X");
        assert!(matches!(res, Err(DistError::MalformedEditScript(_))));
        let script = EditScript::from_cigar("4=1X").unwrap();
        assert_eq!(script.counts(), AlignCounts::new(4, 5));
        assert_eq!(script.to_string(), "4=1X");
    }

    #[test]
    fn test_push_merges() {
        let mut script = EditScript::new();
        script.push(3, EditOp::Match);
        script.push(2, EditOp::Match);
        script.push(0, EditOp::Mismatch);
        script.push(1, EditOp::Deletion);
        assert_eq!(script.runs(), &[(5, EditOp::Match), (1, EditOp::Deletion)]);
    }

    #[test]
    fn test_malformed() {
        assert!(EditScript::from_cigar("=3").is_err());
        assert!(EditScript::from_cigar("3=4").is_err());
        assert!(EditScript::from_cigar("3S").is_err());
        assert!(EditScript::from_cigar("").unwrap().is_empty());
    }
} // end of mod tests
