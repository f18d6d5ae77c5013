//! Loading trajectories from disk.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::model::Trajectory;
use crate::error::MolsnapError;

/// Produces a parsed [`Trajectory`] from an input path.
pub trait StructureSource {
    /// Load and validate the trajectory stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `MolsnapError::Io` if the file cannot be opened and
    /// `MolsnapError::StructureLoad` if its content is malformed.
    fn load(&self, path: &Path) -> Result<Trajectory, MolsnapError>;
}

/// Reads the JSON interchange document (`{"models": [...]}`).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSource;

impl JsonSource {
    /// Parse a document held in memory.
    pub fn parse(content: &str) -> Result<Trajectory, MolsnapError> {
        let trajectory: Trajectory = serde_json::from_str(content)
            .map_err(|e| MolsnapError::StructureLoad(e.to_string()))?;
        trajectory.validate()?;
        Ok(trajectory)
    }
}

impl StructureSource for JsonSource {
    fn load(&self, path: &Path) -> Result<Trajectory, MolsnapError> {
        let file = File::open(path).map_err(MolsnapError::Io)?;
        let trajectory: Trajectory =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                MolsnapError::StructureLoad(format!("{}: {e}", path.display()))
            })?;
        trajectory.validate()?;
        log::debug!(
            "loaded {} with {} model(s)",
            path.display(),
            trajectory.frame_count()
        );
        Ok(trajectory)
    }
}
