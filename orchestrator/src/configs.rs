use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::OrchestratorErr;

/// A convolution run, as described by a JSON config file.
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    /// Input file holding the grid and kernel.
    pub input: PathBuf,
    /// Worker count for the parallel pass.
    pub workers: NonZeroUsize,
    /// Where the single-worker pass writes its result.
    pub sequential_output: PathBuf,
    /// Where the multi-worker pass writes its result.
    pub parallel_output: PathBuf,
    /// Diff both outputs after the runs.
    #[serde(default = "default_verify")]
    pub verify: bool,
}

fn default_verify() -> bool {
    true
}

impl RunConfig {
    /// Loads a run config from a JSON file.
    ///
    /// # Returns
    /// `OrchestratorErr::InvalidConfig` when the file doesn't deserialize.
    pub fn load(path: &Path) -> Result<Self, OrchestratorErr> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| OrchestratorErr::InvalidConfig(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_a_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "input": "in.txt",
                "workers": 4,
                "sequential_output": "seq.txt",
                "parallel_output": "par.txt",
                "verify": false
            }}"#
        )
        .unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.workers.get(), 4);
        assert!(!config.verify);
    }

    #[test]
    fn verify_defaults_to_true() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "input": "in.txt",
                "workers": 2,
                "sequential_output": "seq.txt",
                "parallel_output": "par.txt"
            }}"#
        )
        .unwrap();

        assert!(RunConfig::load(file.path()).unwrap().verify);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "input": "in.txt",
                "workers": 0,
                "sequential_output": "seq.txt",
                "parallel_output": "par.txt"
            }}"#
        )
        .unwrap();

        assert!(matches!(
            RunConfig::load(file.path()),
            Err(OrchestratorErr::InvalidConfig(_))
        ));
    }
}
