use std::{fs::File, io::BufReader, path::Path};

use serde_derive::{Deserialize, Serialize};

use crate::{error::Result, graphs::Weight};

/// Tunables of [`super::remaining_weight::ReverseSearchHeuristic`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Estimates are 0 while the accumulated path weight is below this.
    /// The default corresponds to ten minutes of generalized cost.
    pub disable_below: Weight,
    /// Keep a table for the next query when it has the same target and no
    /// larger budget.
    pub reuse_tables: bool,
    /// Stop the search of a superseded table instead of letting it finish.
    pub cancel_superseded: bool,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        HeuristicConfig {
            disable_below: 10.0 * 60.0,
            reuse_tables: true,
            cancel_superseded: true,
        }
    }
}

impl HeuristicConfig {
    pub fn from_json_file(path: &Path) -> Result<HeuristicConfig> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: HeuristicConfig = serde_json::from_str(r#"{"reuse_tables": false}"#).unwrap();

        assert_eq!(config.disable_below, 600.0);
        assert!(!config.reuse_tables);
        assert!(config.cancel_superseded);
    }
}
