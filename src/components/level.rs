use std::path::PathBuf;

use serde::Deserialize;

use super::{LoadComponent, decode};

/// Request to switch to another scene file. `ResourceSystem` consumes the
/// owning entity and queues a load for `file`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Level {
    pub file: PathBuf,
}

impl LoadComponent for Level {
    const NAME: &'static str = "Level";

    fn load(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error> {
        *self = decode(data)?;
        Ok(())
    }
}
