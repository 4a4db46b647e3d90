use std::{fmt, io, path::PathBuf};

use stencil::StencilErr;

use crate::diff::Mismatch;

/// All errors that can occur while driving a convolution run.
#[derive(Debug)]
pub enum OrchestratorErr {
    /// Bad command line or run config — caught before anything runs.
    InvalidConfig(String),
    /// An input file broke the `N M` / grid / kernel text format.
    Parse {
        path: PathBuf,
        line: usize,
        msg: String,
    },
    /// The parsed grid or kernel failed core validation, or a pass failed.
    Stencil(StencilErr),
    /// The sequential and parallel outputs disagree.
    OutputMismatch(Mismatch),
    /// An underlying I/O error not covered by the above variants.
    Io(io::Error),
}

impl fmt::Display for OrchestratorErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Parse { path, line, msg } => {
                write!(f, "{}:{line}: {msg}", path.display())
            }
            Self::Stencil(e) => write!(f, "stencil error: {e}"),
            Self::OutputMismatch(m) => write!(f, "outputs differ: {m}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for OrchestratorErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stencil(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OrchestratorErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<StencilErr> for OrchestratorErr {
    fn from(e: StencilErr) -> Self {
        Self::Stencil(e)
    }
}
