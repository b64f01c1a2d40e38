//! Layout configuration
//!
//! Force constants and pacing can be supplied as YAML; missing keys fall back
//! to the defaults:
//!
//! ```yaml
//! simulation:
//!   gravity: 0.1
//!   repulsion: 0.001
//!   attraction: 0.1
//!   time_step: 0.05
//! steps_per_frame: 10
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::{self, IoError, IoResult};
use crate::session::DEFAULT_STEPS_PER_FRAME;
use crate::simulation::SimulationConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    /// Simulation steps per displayed frame
    pub steps_per_frame: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            steps_per_frame: DEFAULT_STEPS_PER_FRAME,
        }
    }
}

impl Config {
    pub fn from_yaml_str(content: &str) -> IoResult<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| IoError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> IoResult<Self> {
        let content = io::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Reject constants that would make the layout diverge or stand still
    pub fn validate(&self) -> IoResult<()> {
        let sim = &self.simulation;
        let constants = [
            ("gravity", sim.gravity),
            ("repulsion", sim.repulsion),
            ("attraction", sim.attraction),
        ];
        if let Some((name, value)) = constants
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(IoError::Config(format!(
                "{name} must be a finite non-negative number, got {value}"
            )));
        }
        if !sim.time_step.is_finite() || sim.time_step <= 0.0 {
            return Err(IoError::Config(format!(
                "time_step must be positive, got {}",
                sim.time_step
            )));
        }
        Ok(())
    }
}
