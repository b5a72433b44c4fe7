//! Parallel for-each options
//!
//! `EXTKIT_MAX_DEGREE_OF_PARALLELISM` sets the bound from the environment;
//! `0` or an unparsable value means unbounded.

use extkit_common::settings::env_or;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParallelOptions {
    /// Most work items running at once; `None` (or `Some(0)`) is unbounded
    #[serde(default)]
    pub max_degree_of_parallelism: Option<usize>,
}

impl ParallelOptions {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(max_degree_of_parallelism: usize) -> Self {
        Self {
            max_degree_of_parallelism: Some(max_degree_of_parallelism),
        }
    }

    /// Load options from environment variables, falling back to unbounded.
    pub fn from_env() -> Self {
        let max = env_or("EXTKIT_MAX_DEGREE_OF_PARALLELISM", 0usize);
        Self {
            max_degree_of_parallelism: (max > 0).then_some(max),
        }
    }

    /// The effective bound.
    pub fn limit(&self) -> Option<usize> {
        self.max_degree_of_parallelism.filter(|max| *max > 0)
    }
}
