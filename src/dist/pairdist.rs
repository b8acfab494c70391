//! Distance between two assemblies from the marker genes they share.
//!
//! Per gene alignment counts are pooled before dividing, so a gene contributes in proportion
//! to its aligned length : `distance = 1 - sum(matches) / sum(aligned lengths)`.
//! Genes present in only one of the assemblies are ignored, and with no shared gene the distance is 1.
//!
//! Possible extension : discarding a fraction of best and worst aligning genes before pooling.
//! Nothing is discarded at the moment.

use crate::dist::aligner::GlobalAligner;
use crate::dist::editscript::AlignCounts;
use crate::dist::identity::{gene_identity, GeneIdentity};
use crate::errors::DistError;
use crate::genes::Assembly;

/// Result of the comparison of two assemblies
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PairDistance {
    distance: f64,
    /// number of genes aligned
    nb_shared: usize,
    /// pooled counts over shared genes
    counts: AlignCounts,
}

impl PairDistance {
    /// distance of an assembly to itself
    pub fn same() -> Self {
        PairDistance { distance: 0.0, nb_shared: 0, counts: AlignCounts::default() }
    }

    /// no comparable signal
    pub fn no_shared_genes() -> Self {
        PairDistance { distance: 1.0, nb_shared: 0, counts: AlignCounts::default() }
    }

    pub fn get_distance(&self) -> f64 {
        self.distance
    }

    pub fn get_nb_shared(&self) -> usize {
        self.nb_shared
    }

    pub fn get_counts(&self) -> &AlignCounts {
        &self.counts
    }
} // end of impl PairDistance

/// Length weighted pooling of gene identities.
/// Returns None if the slice is empty.
pub fn pooled_identity(identities: &[GeneIdentity]) -> Option<(f64, AlignCounts)> {
    if identities.is_empty() {
        return None;
    }
    let mut total = AlignCounts::default();
    for id in identities {
        total.add(id.get_counts());
    }
    Some((total.match_count as f64 / total.aligned_length as f64, total))
}

/// Computes the distance between two assemblies.
/// Errors are labelled with the pair names.
pub fn assembly_distance(first: &Assembly, second: &Assembly, aligner: &dyn GlobalAligner) -> Result<PairDistance, DistError> {
    if first.get_name() == second.get_name() {
        return Ok(PairDistance::same());
    }
    let genes_a = first.get_genes();
    let genes_b = second.get_genes();
    let shared = genes_a.shared_genes(genes_b);
    if shared.is_empty() {
        log::debug!("no shared genes between {} and {}, distance set to 1", first.get_name(), second.get_name());
        return Ok(PairDistance::no_shared_genes());
    }
    let mut identities = Vec::<GeneIdentity>::with_capacity(shared.len());
    for gene in &shared {
        // both present by construction of shared
        let (seq_a, seq_b) = match (genes_a.present_seq(gene), genes_b.present_seq(gene)) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        let identity = gene_identity(gene, seq_a, seq_b, aligner).map_err(|e| e.for_pair(first.get_name(), second.get_name()))?;
        identities.push(identity);
    }
    let (total_identity, counts) = match pooled_identity(&identities) {
        Some(pooled) => pooled,
        None => return Ok(PairDistance::no_shared_genes()),
    };
    let distance = 1.0 - total_identity;
    log::trace!(
        "{} / {} : {} shared genes, identity {:.6}, distance {:.6}",
        first.get_name(),
        second.get_name(),
        identities.len(),
        total_identity,
        distance
    );
    Ok(PairDistance { distance, nb_shared: identities.len(), counts })
} // end of assembly_distance

//=======================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::dist::aligner::EditDistanceAligner;
    use crate::genes::{GeneMap, GeneSeq};

    fn assembly(name: &str, genes: &[(&str, Option<&str>)]) -> Assembly {
        let map: GeneMap = genes
            .iter()
            .map(|(g, s)| {
                let seq = match s {
                    Some(s) => GeneSeq::Present(s.as_bytes().to_vec()),
                    None => GeneSeq::Absent,
                };
                (g.to_string(), seq)
            })
            .collect();
        Assembly::new(name.to_string(), map)
    }

    #[test]
    fn test_weighted_not_mean() {
        let ids = vec![
            GeneIdentity::new("g1", AlignCounts::new(5, 10)).unwrap(),
            GeneIdentity::new("g2", AlignCounts::new(18, 20)).unwrap(),
        ];
        let (identity, counts) = pooled_identity(&ids).unwrap();
        assert_eq!(counts, AlignCounts::new(23, 30));
        assert!((identity - 23.0 / 30.0).abs() < 1.0e-12);
        let mean = ids.iter().map(|i| i.identity()).sum::<f64>() / 2.0;
        assert!((identity - mean).abs() > 0.05);
        //
        let ids = vec![
            GeneIdentity::new("g1", AlignCounts::new(9, 10)).unwrap(),
            GeneIdentity::new("g2", AlignCounts::new(18, 20)).unwrap(),
        ];
        let (identity, _) = pooled_identity(&ids).unwrap();
        assert!((1.0 - identity - 0.1).abs() < 1.0e-12);
        assert!(pooled_identity(&[]).is_none());
    }

    #[test]
    fn test_self_is_zero_without_alignment() {
        let a = assembly("a.fasta", &[("g1", Some("ACGT"))]);
        let d = assembly_distance(&a, &a, &EditDistanceAligner::new()).unwrap();
        assert_eq!(d.get_distance(), 0.0);
        assert_eq!(d.get_nb_shared(), 0);
    }

    #[test]
    fn test_no_shared_is_one() {
        let a = assembly("a.fasta", &[("g1", Some("ACGT")), ("g2", None)]);
        let b = assembly("b.fasta", &[("g2", Some("ACGT")), ("g3", Some("ACGT"))]);
        let d = assembly_distance(&a, &b, &EditDistanceAligner::new()).unwrap();
        assert_eq!(d.get_distance(), 1.0);
    }

    #[test]
    fn test_genes_in_one_assembly_ignored() {
        let a = assembly("a.fasta", &[("g1", Some("ACGTACGTAC")), ("g2", Some("TTTTTTTTTT"))]);
        let b = assembly("b.fasta", &[("g1", Some("ACGTACGTAC")), ("g3", Some("GGGGGGGGGG"))]);
        let d = assembly_distance(&a, &b, &EditDistanceAligner::new()).unwrap();
        assert_eq!(d.get_distance(), 0.0);
        assert_eq!(d.get_nb_shared(), 1);
    }

    #[test]
    fn test_two_genes_pooled() {
        // g1 : 9 matches over 10, g2 : 20 over 20
        let a = assembly("a.fasta", &[("g1", Some("ACGTACGTAC")), ("g2", Some("ACGTACGTACGTACGTACGT"))]);
        let b = assembly("b.fasta", &[("g1", Some("ACGTACGTAA")), ("g2", Some("ACGTACGTACGTACGTACGT"))]);
        let aligner = EditDistanceAligner::new();
        let d = assembly_distance(&a, &b, &aligner).unwrap();
        assert_eq!(*d.get_counts(), AlignCounts::new(29, 30));
        assert!((d.get_distance() - 1.0 / 30.0).abs() < 1.0e-12);
        // symmetric
        let r = assembly_distance(&b, &a, &aligner).unwrap();
        assert_eq!(d.get_distance(), r.get_distance());
    }

    #[test]
    fn test_error_labelled_with_pair() {
        let a = assembly("a.fasta", &[("g1", Some("ACGT"))]);
        let b = assembly("b.fasta", &[("g1", Some("ACGT"))]);
        struct Broken;
        impl GlobalAligner for Broken {
            fn align(&self, _: &[u8], _: &[u8]) -> Result<crate::dist::editscript::EditScript, DistError> {
                Ok(crate::dist::editscript::EditScript::new())
            }
        }
        let res = assembly_distance(&a, &b, &Broken);
        match res {
            Err(DistError::PairFailed { first, second, source }) => {
                assert_eq!(first, "a.fasta");
                assert_eq!(second, "b.fasta");
                assert!(matches!(*source, DistError::AlignmentInvariant(_)));
            }
            _ => panic!("expected a pair failure"),
        }
    }
} // end of mod tests
