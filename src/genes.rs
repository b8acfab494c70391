//! Per assembly marker gene sequences.
//!
//! A [`GeneMap`] associates a gene name to a [`GeneSeq`]. A gene the search step did not find
//! is either tagged [`GeneSeq::Absent`] or simply not in the map, both cases are handled the same
//! way when computing the set of genes shared by two assemblies.

use std::collections::BTreeMap;

/// Sequence of one marker gene in one assembly
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneSeq {
    /// nucleotide sequence as found in the assembly
    Present(Vec<u8>),
    /// the gene search found no qualifying hit
    Absent,
}

impl GeneSeq {
    /// returns the sequence if gene was found
    pub fn as_present(&self) -> Option<&[u8]> {
        match self {
            GeneSeq::Present(seq) => Some(seq.as_slice()),
            GeneSeq::Absent => None,
        }
    }
} // end of impl GeneSeq

/// Gene name to sequence mapping of one assembly.
/// A BTreeMap so that iteration over genes, and so floating sums, come in a fixed order.
#[derive(Clone, Debug, Default)]
pub struct GeneMap {
    genes: BTreeMap<String, GeneSeq>,
}

impl GeneMap {
    pub fn new() -> Self {
        GeneMap { genes: BTreeMap::new() }
    }

    /// inserts a gene, returns previous value if the name was already there
    pub fn insert(&mut self, name: String, seq: GeneSeq) -> Option<GeneSeq> {
        self.genes.insert(name, seq)
    }

    pub fn get(&self, name: &str) -> Option<&GeneSeq> {
        self.genes.get(name)
    }

    /// sequence of gene if present and not tagged absent
    pub fn present_seq(&self, name: &str) -> Option<&[u8]> {
        self.genes.get(name).and_then(|g| g.as_present())
    }

    /// iterates over genes with a sequence, in name order
    pub fn present(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.genes
            .iter()
            .filter_map(|(name, g)| g.as_present().map(|s| (name.as_str(), s)))
    }

    pub fn nb_present(&self) -> usize {
        self.present().count()
    }

    /// number of genes stored, absent ones included
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// names of genes having a sequence in both maps, sorted
    pub fn shared_genes<'a>(&'a self, other: &GeneMap) -> Vec<&'a str> {
        self.present()
            .filter(|(name, _)| other.present_seq(name).is_some())
            .map(|(name, _)| name)
            .collect()
    }
} // end of impl GeneMap

impl FromIterator<(String, GeneSeq)> for GeneMap {
    fn from_iter<I: IntoIterator<Item = (String, GeneSeq)>>(iter: I) -> Self {
        GeneMap { genes: iter.into_iter().collect() }
    }
}

/// An assembly identified by its file basename, with its marker genes
#[derive(Clone, Debug)]
pub struct Assembly {
    name: String,
    genes: GeneMap,
}

impl Assembly {
    pub fn new(name: String, genes: GeneMap) -> Self {
        Assembly { name, genes }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_genes(&self) -> &GeneMap {
        &self.genes
    }
} // end of impl Assembly

//=======================================================================

// end of mod tests
