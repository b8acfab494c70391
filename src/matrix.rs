//! Phylip like square distance matrix output.
//!
//! First line is the number of assemblies, then one line per assembly : its name followed by
//! tab separated distances, with 6 decimals, to every assembly in the same order.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::dist::scheduler::DistanceTable;
use crate::errors::DistError;

/// distance written for a pair missing in the table
pub const MISSING_DISTANCE: f64 = 1.0;

/// Writes the table. A missing pair is written as [`MISSING_DISTANCE`] with a warning.
/// Returns the number of substituted cells.
pub fn write_matrix<W: Write>(table: &DistanceTable, out: &mut W) -> Result<usize, DistError> {
    let names = table.get_names();
    let mut nb_substituted = 0;
    writeln!(out, "{}", names.len())?;
    for (i, name) in names.iter().enumerate() {
        write!(out, "{}", name)?;
        for (j, other) in names.iter().enumerate() {
            let distance = match table.get(i, j) {
                Some(d) => d,
                None => {
                    log::warn!("no distance for ({}, {}), writing {:.6}", name, other, MISSING_DISTANCE);
                    nb_substituted += 1;
                    MISSING_DISTANCE
                }
            };
            write!(out, "\t{:.6}", distance)?;
        }
        writeln!(out)?;
    }
    Ok(nb_substituted)
} // end of write_matrix

/// writes the matrix in file at path, truncating it
pub fn write_matrix_file(table: &DistanceTable, path: &Path) -> Result<usize, DistError> {
    log::info!("writing distance matrix to file {:?}", path);
    let mut writer = BufWriter::new(File::create(path)?);
    let nb_substituted = write_matrix(table, &mut writer)?;
    writer.flush()?;
    if nb_substituted > 0 {
        log::warn!("{} missing distances written as {:.6}", nb_substituted, MISSING_DISTANCE);
    }
    Ok(nb_substituted)
}

/// Parses a matrix as written by [`write_matrix`].
/// Returns names and rows of distances.
pub fn read_matrix<R: BufRead>(reader: R) -> Result<(Vec<String>, Vec<Vec<f64>>), DistError> {
    let mut lines = reader.lines();
    let first = lines.next().ok_or(DistError::MalformedMatrix { line: 1, msg: "empty input".to_string() })??;
    let n = first.trim().parse::<usize>().map_err(|e| DistError::MalformedMatrix { line: 1, msg: e.to_string() })?;
    let mut names = Vec::with_capacity(n);
    let mut rows = Vec::with_capacity(n);
    for rank in 0..n {
        let line_num = rank + 2;
        let line = lines
            .next()
            .ok_or_else(|| DistError::MalformedMatrix { line: line_num, msg: format!("expected {} rows", n) })??;
        let mut fields = line.split('\t');
        let name = fields.next().unwrap_or("").to_string();
        let row = fields
            .map(|f| f.parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|e| DistError::MalformedMatrix { line: line_num, msg: e.to_string() })?;
        if row.len() != n {
            return Err(DistError::MalformedMatrix { line: line_num, msg: format!("{} fields, expected {}", row.len(), n) });
        }
        names.push(name);
        rows.push(row);
    }
    Ok((names, rows))
} // end of read_matrix

pub fn read_matrix_file(path: &Path) -> Result<(Vec<String>, Vec<Vec<f64>>), DistError> {
    read_matrix(BufReader::new(File::open(path)?))
}

//=======================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn table3() -> DistanceTable {
        let mut table = DistanceTable::new(vec!["X.fasta".to_string(), "Y.fasta".to_string(), "Z.fasta".to_string()]);
        for i in 0..3 {
            table.set(i, i, 0.0);
        }
        table.set(0, 1, 0.0123456789);
        table.set(0, 2, 1.0);
        table
    }

    #[test]
    fn test_format() {
        let mut table = table3();
        table.set(1, 2, 1.0);
        let mut out = Vec::<u8>::new();
        let nb = write_matrix(&table, &mut out).unwrap();
        assert_eq!(nb, 0);
        let text = String::from_utf8(out).unwrap();
        let expected = "3\n\
                        X.fasta\t0.000000\t0.012346\t1.000000\n\
                        Y.fasta\t0.012346\t0.000000\t1.000000\n\
                        Z.fasta\t1.000000\t1.000000\t0.000000\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_missing_substituted() {
        let table = table3();
        let mut out = Vec::<u8>::new();
        let nb = write_matrix(&table, &mut out).unwrap();
        assert_eq!(nb, 2);
        let (_, rows) = read_matrix(out.as_slice()).unwrap();
        assert_eq!(rows[1][2], 1.0);
        assert_eq!(rows[2][1], 1.0);
    }

    #[test]
    fn test_round_trip_file() {
        let mut table = table3();
        table.set(1, 2, 0.5);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist.phylip");
        write_matrix_file(&table, &path).unwrap();
        let (names, rows) = read_matrix_file(&path).unwrap();
        assert_eq!(names, table.get_names());
        assert_eq!(rows.len(), 3);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 3);
            assert_eq!(row[i], 0.0);
            for d in row {
                assert!((0.0..=1.0).contains(d));
            }
        }
        assert_eq!(rows[1][2], 0.5);
    }

    #[test]
    fn test_read_malformed() {
        assert!(read_matrix("2\na\t0.0\t1.0\n".as_bytes()).is_err());
        assert!(read_matrix("1\na\t0.0\t1.0\n".as_bytes()).is_err());
        assert!(read_matrix("x\n".as_bytes()).is_err());
        assert!(read_matrix("1\na\tzero\n".as_bytes()).is_err());
    }
} // end of mod tests
