//! Dispatch of all assembly pairs on a thread pool and collection in a distance table.
//!
//! Only pairs (i,j) with i <= j are computed. Each pair is an independent rayon task, results are
//! collected in pair order and then written in a fixed n x n grid, each computed value going to
//! cell (i,j) and its mirror (j,i). As collection order does not depend on the number of threads,
//! the table is identical whatever the pool size.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use cpu_time::ProcessTime;
use rayon::prelude::*;

use crate::dist::aligner::GlobalAligner;
use crate::dist::pairdist::{assembly_distance, PairDistance};
use crate::errors::DistError;
use crate::genes::Assembly;
use crate::utils::parameters::{DistanceParams, FailureMode};

/// Square table of distances indexed by assembly rank.
/// A cell is None until its pair has been computed.
#[derive(Clone, Debug)]
pub struct DistanceTable {
    names: Vec<String>,
    cells: Vec<Option<f64>>,
}

impl DistanceTable {
    pub fn new(names: Vec<String>) -> Self {
        let n = names.len();
        DistanceTable { names, cells: vec![None; n * n] }
    }

    pub fn get_names(&self) -> &[String] {
        &self.names
    }

    pub fn nb_assemblies(&self) -> usize {
        self.names.len()
    }

    /// stores distance in (i,j) and (j,i)
    pub(crate) fn set(&mut self, i: usize, j: usize, distance: f64) {
        let n = self.names.len();
        debug_assert!(self.cells[i * n + j].is_none(), "cell ({},{}) written twice", i, j);
        self.cells[i * n + j] = Some(distance);
        self.cells[j * n + i] = Some(distance);
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.names.len();
        if i >= n || j >= n {
            return None;
        }
        self.cells[i * n + j]
    }

    /// lookup by assembly names
    pub fn get_by_name(&self, first: &str, second: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == first)?;
        let j = self.names.iter().position(|n| n == second)?;
        self.get(i, j)
    }

    /// true if all distances of row i are present
    pub fn row_complete(&self, i: usize) -> bool {
        let n = self.names.len();
        i < n && self.cells[i * n..(i + 1) * n].iter().all(|c| c.is_some())
    }

    pub fn nb_missing(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// returns an error naming the first missing pair, in row order
    pub fn check_complete(&self) -> Result<(), DistError> {
        let n = self.names.len();
        match self.cells.iter().position(|c| c.is_none()) {
            Some(rank) => Err(DistError::IncompleteTable(self.names[rank / n].clone(), self.names[rank % n].clone())),
            None => Ok(()),
        }
    }
} // end of impl DistanceTable

/// all pairs (i,j) with i <= j, in row order
fn upper_pairs(n: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(n * (n + 1) / 2);
    for i in 0..n {
        for j in i..n {
            pairs.push((i, j));
        }
    }
    pairs
}

/// Computes the distance table of assemblies, in the order given.
///
/// In [`FailureMode::Strict`] no new pair is started after a failure, and the first failed pair
/// (in row order) among those computed is returned as error.
/// In [`FailureMode::Lenient`] failed pairs are logged and left missing in the table.
pub fn compute_distances(assemblies: &[Assembly], aligner: &dyn GlobalAligner, params: &DistanceParams) -> Result<DistanceTable, DistError> {
    params.check()?;
    let start_t = SystemTime::now();
    let cpu_start = ProcessTime::now();
    //
    let n = assemblies.len();
    let names: Vec<String> = assemblies.iter().map(|a| a.get_name().to_string()).collect();
    let mut table = DistanceTable::new(names);
    let pairs = upper_pairs(n);
    log::info!("computing {} pairs for {} assemblies, nb threads : {}", pairs.len(), n, params.get_nb_threads());
    //
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.get_nb_threads())
        .build()
        .map_err(|e| DistError::InvalidParameter(format!("cannot build thread pool : {}", e)))?;
    // set on first failure in strict mode, pairs not yet started are then skipped (None)
    let stop = AtomicBool::new(false);
    let strict = params.get_failure_mode() == FailureMode::Strict;
    let results: Vec<((usize, usize), Option<Result<PairDistance, DistError>>)> = pool.install(|| {
        pairs
            .par_iter()
            .map(|&(i, j)| {
                if strict && stop.load(Ordering::Relaxed) {
                    return ((i, j), None);
                }
                let res = assembly_distance(&assemblies[i], &assemblies[j], aligner);
                if strict && res.is_err() {
                    stop.store(true, Ordering::Relaxed);
                }
                ((i, j), Some(res))
            })
            .collect()
    });
    //
    let mut nb_failed = 0;
    let mut nb_no_shared = 0;
    let mut nb_skipped = 0;
    // in strict mode, first failure in row order among computed pairs
    let mut first_error: Option<DistError> = None;
    for ((i, j), res) in results {
        match res {
            None => nb_skipped += 1,
            Some(Ok(d)) => {
                if i != j && d.get_nb_shared() == 0 {
                    nb_no_shared += 1;
                }
                table.set(i, j, d.get_distance());
            }
            Some(Err(e)) => {
                let e = if matches!(e, DistError::PairFailed { .. }) {
                    e
                } else {
                    e.for_pair(assemblies[i].get_name(), assemblies[j].get_name())
                };
                nb_failed += 1;
                if strict {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                } else {
                    log::warn!("{}, pair left missing", e.chain());
                }
            }
        }
        if j + 1 == n && table.row_complete(i) {
            log::debug!("row {} ({}) complete", i, assemblies[i].get_name());
        }
    }
    if let Some(e) = first_error {
        log::error!("{} (nb failed pairs : {}, nb pairs skipped : {})", e.chain(), nb_failed, nb_skipped);
        return Err(e);
    }
    //
    let cpu_time = cpu_start.elapsed();
    let sys_t = start_t.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.);
    log::info!(
        "distances done, nb pairs without shared genes : {}, nb failed pairs : {}, sys time(s) {:.2e} cpu time(s) {:.2e}",
        nb_no_shared,
        nb_failed,
        sys_t,
        cpu_time.as_secs_f64()
    );
    Ok(table)
} // end of compute_distances

//=======================================================================

// end of mod tests
