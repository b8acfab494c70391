//! This file contains directory exploration, assembly selection and gene file loading.
//!
//! Each assembly file `X.fasta` (possibly gzipped) must have a gene file `X.fasta.rmlst` beside it,
//! a fasta file in which each record id is a marker gene name. A record with an empty sequence
//! marks a gene that was searched for and not found.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use needletail::errors::ParseErrorKind;

use crate::errors::DistError;
use crate::genes::{Assembly, GeneMap, GeneSeq};

/// suffixes of files recognized as assemblies
const ASSEMBLY_SUFFIXES: [&str; 8] = [".fna.gz", ".fa.gz", ".fas.gz", ".fasta.gz", ".fna", ".fa", ".fas", ".fasta"];

/// suffix appended to an assembly file name to get its gene file
pub const GENE_FILE_SUFFIX: &str = ".rmlst";

// returns true if file name has an assembly suffix
pub fn is_assembly_file(path: &Path) -> bool {
    match path.file_name().and_then(|f| f.to_str()) {
        Some(name) => ASSEMBLY_SUFFIXES.iter().any(|s| name.ends_with(s)),
        None => false,
    }
} // end of is_assembly_file

/// assembly name is its file basename
pub fn assembly_name(path: &Path) -> String {
    path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default()
}

pub fn gene_file_path(assembly: &Path) -> PathBuf {
    let mut name = assembly.as_os_str().to_os_string();
    name.push(GENE_FILE_SUFFIX);
    PathBuf::from(name)
}

/// assembly files of directory (not recursive), sorted
pub fn find_assemblies(dir: &Path) -> Result<Vec<PathBuf>, DistError> {
    let mut assemblies = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_assembly_file(&path) {
            assemblies.push(path);
        }
    }
    assemblies.sort();
    log::info!("found {} assemblies in {:?}", assemblies.len(), dir);
    Ok(assemblies)
} // end of find_assemblies

/// Compression detected from the first bytes of a file
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compression {
    Plain,
    Gzip,
    Bzip2,
    Zip,
}

pub fn get_compression_type(path: &Path) -> Result<Compression, DistError> {
    let mut start = Vec::with_capacity(4);
    File::open(path)?.take(4).read_to_end(&mut start)?;
    let compression = if start.starts_with(&[0x1f, 0x8b, 0x08]) {
        Compression::Gzip
    } else if start.starts_with(&[0x42, 0x5a, 0x68]) {
        Compression::Bzip2
    } else if start.starts_with(&[0x50, 0x4b, 0x03, 0x04]) {
        Compression::Zip
    } else {
        Compression::Plain
    };
    log::trace!("file {:?} compression {:?}", path, compression);
    Ok(compression)
} // end of get_compression_type

/// Loads a gene file into a GeneMap. Gene name is the record id up to first whitespace.
pub fn load_gene_file(path: &Path) -> Result<GeneMap, DistError> {
    match get_compression_type(path)? {
        Compression::Bzip2 => {
            return Err(DistError::UnsupportedCompression { path: path.to_path_buf(), format: "bzip2".to_string() })
        }
        Compression::Zip => {
            return Err(DistError::UnsupportedCompression { path: path.to_path_buf(), format: "zip".to_string() })
        }
        _ => {}
    }
    let mut genes = GeneMap::new();
    // needletail refuses empty files, an empty gene file just means no gene
    if fs::metadata(path)?.len() == 0 {
        log::debug!("gene file {:?} is empty", path);
        return Ok(genes);
    }
    let fasta_err = |msg: String| DistError::Fasta { path: path.to_path_buf(), msg };
    let mut reader = match needletail::parse_fastx_file(path) {
        Ok(reader) => reader,
        // a gzipped file with empty content
        Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => {
            log::debug!("gene file {:?} has no content", path);
            return Ok(genes);
        }
        Err(e) => return Err(fasta_err(e.to_string())),
    };
    while let Some(record) = reader.next() {
        let seqrec = match record {
            Ok(seqrec) => seqrec,
            Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => break,
            Err(e) => return Err(fasta_err(e.to_string())),
        };
        let id = String::from_utf8_lossy(seqrec.id()).to_string();
        let gene = id.split_whitespace().next().unwrap_or("").to_string();
        let seq = seqrec.seq();
        let gene_seq = if seq.is_empty() { GeneSeq::Absent } else { GeneSeq::Present(seq.to_vec()) };
        if genes.insert(gene.clone(), gene_seq).is_some() {
            return Err(DistError::DuplicateGene { path: path.to_path_buf(), gene });
        }
    }
    log::debug!("gene file {:?} : {} genes, {} present", path, genes.len(), genes.nb_present());
    Ok(genes)
} // end of load_gene_file

/// Loads gene files of all assemblies in dir.
/// All gene files are checked before any loading so a missing one fails fast.
pub fn load_assemblies(dir: &Path) -> Result<Vec<Assembly>, DistError> {
    let paths = find_assemblies(dir)?;
    for path in &paths {
        let gene_file = gene_file_path(path);
        if !gene_file.is_file() {
            log::error!("gene file {:?} is missing", gene_file);
            return Err(DistError::MissingGeneFile(gene_file));
        }
    }
    let mut assemblies = Vec::with_capacity(paths.len());
    for path in &paths {
        let gene_file = gene_file_path(path);
        log::info!("loading rMLST genes : {:?}", gene_file);
        let genes = load_gene_file(&gene_file)?;
        assemblies.push(Assembly::new(assembly_name(path), genes));
    }
    Ok(assemblies)
} // end of load_assemblies

//=======================================================================

// end of mod tests
