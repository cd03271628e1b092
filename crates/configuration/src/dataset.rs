use core_types::EntitySeries;
use serde::Deserialize;

/// A collection of entity series to analyse together, deserialized from a
/// TOML or JSON file holding an `entities` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub entities: Vec<EntitySeries>,
}
