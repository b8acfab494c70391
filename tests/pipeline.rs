//! load gene files from a directory, compute distances and check the written matrix

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rmlstdist::dist::{compute_distances, EditDistanceAligner};
use rmlstdist::matrix::{read_matrix_file, write_matrix_file};
use rmlstdist::utils::{load_assemblies, DistanceParams, FailureMode};

fn write_file(path: &Path, content: &str) {
    let mut f = File::create(path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
}

#[test]
fn test_directory_to_matrix() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    for name in ["X.fasta", "Y.fasta", "Z.fasta"] {
        write_file(&dir.path().join(name), ">contig_1\nACGTACGTACGT\n");
    }
    write_file(&dir.path().join("X.fasta.rmlst"), ">BACT000001\nATGACCGTTAAAGCG\n>BACT000002\n");
    write_file(&dir.path().join("Y.fasta.rmlst"), ">BACT000001\nATGACCGTTAAAGCG\n>BACT000003\nGGCATTAC\n");
    write_file(&dir.path().join("Z.fasta.rmlst"), ">BACT000002\nATGACCGTTAAAGCG\n");
    //
    let assemblies = load_assemblies(dir.path()).unwrap();
    let mut texts = Vec::new();
    for nb_threads in [1usize, 2, 8] {
        let params = DistanceParams::new(nb_threads, FailureMode::Strict, 95.0, 90.0);
        let table = compute_distances(&assemblies, &EditDistanceAligner::new(), &params).unwrap();
        let out = dir.path().join(format!("dist_{}.phylip", nb_threads));
        assert_eq!(write_matrix_file(&table, &out).unwrap(), 0);
        texts.push(std::fs::read_to_string(&out).unwrap());
    }
    assert_eq!(texts[0], texts[1]);
    assert_eq!(texts[0], texts[2]);
    let expected = "3\n\
                    X.fasta\t0.000000\t0.000000\t1.000000\n\
                    Y.fasta\t0.000000\t0.000000\t1.000000\n\
                    Z.fasta\t1.000000\t1.000000\t0.000000\n";
    assert_eq!(texts[0], expected);
    //
    let (names, rows) = read_matrix_file(&dir.path().join("dist_1.phylip")).unwrap();
    assert_eq!(names, vec!["X.fasta", "Y.fasta", "Z.fasta"]);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), 3);
        assert_eq!(row[i], 0.0);
    }
}
