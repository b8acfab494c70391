//! rmlstdist assembly_dir out_file \[--threads n\] \[--min_cov f\] \[--min_id f\] \[--lenient\] \[--dump_params\]
//!
//! - assembly_dir : directory containing assembly fasta files and, beside each, its rMLST gene file
//!   (assembly file name with suffix .rmlst).
//! - out_file : file where the distance matrix is written.
//!
//! --threads : number of threads used for pairwise distances, default to 8.
//!
//! --min_cov --min_id : coverage and identity percentages used by the gene search that produced
//!   the gene files. Recorded in parameters dump.
//!
//! --lenient : a pair whose distance cannot be computed is written with distance 1 instead of aborting.
//!
//! --dump_params : dumps parameters in out_file.params.json

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Arg, ArgAction, Command};

// for logging (debug mostly, switched at compile time in cargo.toml)
use env_logger::Builder;

use rmlstdist::dist::{compute_distances, EditDistanceAligner};
use rmlstdist::matrix::write_matrix_file;
use rmlstdist::utils::*;

// install a logger facility
pub fn init_log() -> u64 {
    Builder::from_default_env().init();
    println!("\n ************** initializing logger *****************\n");
    1
}

fn main() -> anyhow::Result<()> {
    let _ = init_log();
    let start_t = chrono::Local::now();
    log::info!("\n rmlstdist begins at time:{:#?} \n ", start_t);
    //
    let matches = Command::new("rmlstdist")
        .version("0.1.0")
        .about("Distance matrix from rMLST gene identity")
        .arg(
            Arg::new("assembly_dir")
                .help("Directory containing assembly fasta files and rMLST files")
                .required(true)
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            Arg::new("out_file")
                .help("Filename for distance matrix output")
                .required(true)
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("THREADS")
                .help("Number of CPU threads to use")
                .default_value("8")
                .value_parser(clap::value_parser!(usize))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("min_cov")
                .long("min_cov")
                .value_name("MIN_COV")
                .help("Minimum coverage used in gene search")
                .default_value("95.0")
                .value_parser(clap::value_parser!(f64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("min_id")
                .long("min_id")
                .value_name("MIN_ID")
                .help("Minimum identity used in gene search")
                .default_value("90.0")
                .value_parser(clap::value_parser!(f64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Write distance 1 for pairs that fail instead of aborting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dump_params")
                .long("dump_params")
                .help("Dump parameters in json file beside output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();
    //
    let assembly_dir = matches.get_one::<String>("assembly_dir").context("assembly_dir is mandatory")?;
    let out_file = matches.get_one::<String>("out_file").context("out_file is mandatory")?;
    let nb_threads = *matches.get_one::<usize>("threads").unwrap_or(&8);
    let min_cov = *matches.get_one::<f64>("min_cov").unwrap_or(&95.0);
    let min_id = *matches.get_one::<f64>("min_id").unwrap_or(&90.0);
    let failure_mode = if matches.get_flag("lenient") { FailureMode::Lenient } else { FailureMode::Strict };
    //
    let params = DistanceParams::new(nb_threads, failure_mode, min_cov, min_id);
    params.check()?;
    let dirpath = Path::new(assembly_dir);
    if !dirpath.is_dir() {
        anyhow::bail!("error not a directory : {:?}", assembly_dir);
    }
    if matches.get_flag("dump_params") {
        let params_path = PathBuf::from(format!("{}.params.json", out_file));
        params.dump_json(&params_path).with_context(|| format!("cannot dump parameters in {:?}", params_path))?;
    }
    //
    let assemblies = load_assemblies(dirpath).with_context(|| format!("loading rMLST genes from {:?}", dirpath))?;
    log::info!("loaded {} assemblies", assemblies.len());
    //
    let aligner = EditDistanceAligner::new();
    let table = compute_distances(&assemblies, &aligner, &params).context("computing pairwise distances")?;
    //
    let nb_substituted = write_matrix_file(&table, Path::new(out_file)).with_context(|| format!("writing {}", out_file))?;
    if nb_substituted > 0 {
        println!("{} missing distances were written as 1.0", nb_substituted);
    }
    //
    let end_t = chrono::Local::now();
    log::info!("\n rmlstdist ends at time:{:#?} \n ", end_t);
    Ok(())
} // end of main
