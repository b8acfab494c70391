//! structures related to processing parameters

use std::fs::OpenOptions;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::to_writer;

use crate::errors::DistError;

/// What to do when the distance of one pair cannot be computed
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureMode {
    /// the run is aborted
    Strict,
    /// the pair is logged and left missing, the writer substitutes the maximal distance
    Lenient,
}

/// Parameters of a distance run.
/// min_cov and min_id are thresholds used by the gene extraction step, they are only recorded here.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceParams {
    /// number of threads in pool
    nb_threads: usize,
    failure_mode: FailureMode,
    /// minimum coverage percentage of gene search
    min_cov: f64,
    /// minimum identity percentage of gene search
    min_id: f64,
}

impl Default for DistanceParams {
    fn default() -> Self {
        DistanceParams { nb_threads: 8, failure_mode: FailureMode::Strict, min_cov: 95.0, min_id: 90.0 }
    }
} // end of default for DistanceParams

impl DistanceParams {
    pub fn new(nb_threads: usize, failure_mode: FailureMode, min_cov: f64, min_id: f64) -> Self {
        DistanceParams { nb_threads, failure_mode, min_cov, min_id }
    }

    pub fn get_nb_threads(&self) -> usize {
        self.nb_threads
    }

    pub fn get_failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    pub fn get_min_cov(&self) -> f64 {
        self.min_cov
    }

    pub fn get_min_id(&self) -> f64 {
        self.min_id
    }

    /// checks thread number is positive and thresholds are percentages
    pub fn check(&self) -> Result<(), DistError> {
        if self.nb_threads == 0 {
            return Err(DistError::InvalidParameter("number of threads must be at least 1".to_string()));
        }
        for (name, value) in [("min_cov", self.min_cov), ("min_id", self.min_id)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(DistError::InvalidParameter(format!("{} must be in [0, 100], got {}", name, value)));
            }
        }
        if self.nb_threads > num_cpus::get() {
            log::info!("nb threads asked {} exceeds nb cpus {}", self.nb_threads, num_cpus::get());
        }
        Ok(())
    } // end of check

    pub fn dump_json(&self, filepath: &Path) -> Result<(), DistError> {
        //
        log::info!("dumping DistanceParams in json file : {:?}", filepath);
        //
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(filepath)?;
        let mut writer = BufWriter::new(file);
        to_writer(&mut writer, &self).map_err(std::io::Error::from)?;
        writer.flush()?;
        Ok(())
    } // end of dump_json

    /// reload from a json dump
    pub fn reload_json(filepath: &Path) -> Result<Self, DistError> {
        log::info!("in reload_json {:?}", filepath);
        //
        let file = OpenOptions::new().read(true).open(filepath)?;
        let reader = BufReader::new(file);
        let params: Self = serde_json::from_reader(reader).map_err(std::io::Error::from)?;
        params.check()?;
        Ok(params)
    } // end of reload_json
} // end of impl DistanceParams

//=======================================================================

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_check() {
        assert!(DistanceParams::default().check().is_ok());
        assert!(DistanceParams::new(0, FailureMode::Strict, 95.0, 90.0).check().is_err());
        assert!(DistanceParams::new(1, FailureMode::Strict, 101.0, 90.0).check().is_err());
        assert!(DistanceParams::new(1, FailureMode::Lenient, 95.0, -1.0).check().is_err());
    }

    #[test]
    fn test_json_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let params = DistanceParams::new(3, FailureMode::Lenient, 80.0, 70.5);
        params.dump_json(&path).unwrap();
        let reloaded = DistanceParams::reload_json(&path).unwrap();
        assert_eq!(params, reloaded);
    }
} // end of mod tests
