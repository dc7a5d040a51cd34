//! Runner configuration and per-map option resolution
//!
//! Options for a target map are layered, later layers winning:
//! 1. `[defaults]` from the runner config
//! 2. `<KEY:VALUE>` tags in the target map's `note`
//! 3. `[maps.<id>]` from the runner config

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use semiauto_map_core::{GenerationOptions, TileGrid};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::RuntimeError;

/// Runner settings, usually loaded from `semiauto_map.toml`
///
/// ```toml
/// palette_ids = [1, 2]
/// data_dir = "game/data"
///
/// [defaults]
/// ADD_SHADOW = true
///
/// [maps.12]
/// FIELD_TYPE = "terrace"
/// SEED = 99
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Palette map ids. Every map whose parent is one of these is generated.
    pub palette_ids: Vec<u32>,
    /// Directory holding `MapInfos.json` and the `MapNNN.json` files
    pub data_dir: PathBuf,
    /// Output file name; `{id}` becomes the three-digit map id
    pub output_pattern: String,
    /// Log finished maps instead of writing them, waiting for an advance after each
    pub diagnostic: bool,
    /// Option keys applied to every map
    pub defaults: Map<String, Value>,
    /// Option keys for single maps, keyed by map id
    pub maps: BTreeMap<String, Map<String, Value>>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            palette_ids: vec![1, 2, 3],
            data_dir: PathBuf::from("data"),
            output_pattern: "_Map{id}.json".to_string(),
            diagnostic: false,
            defaults: Map::new(),
            maps: BTreeMap::new(),
        }
    }
}

impl RunnerConfig {
    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, RuntimeError> {
        let config: Self = toml::from_str(text)?;
        if config.palette_ids.contains(&0) {
            return Err(RuntimeError::InvalidFormat("palette id 0 is reserved".to_string()));
        }
        Ok(config)
    }

    /// Check if a map id is one of the palette maps
    pub fn is_palette(&self, map_id: u32) -> bool {
        self.palette_ids.contains(&map_id)
    }

    /// Output file name for a generated map
    pub fn output_name(&self, map_id: u32) -> String {
        output_name(&self.output_pattern, map_id)
    }

    /// Resolve the options for one target map
    pub fn options_for(&self, map_id: u32, target: &TileGrid) -> Result<GenerationOptions, RuntimeError> {
        let mut merged = self.defaults.clone();
        if let Some(Value::String(note)) = target.extra.get("note") {
            merged.extend(parse_note_tags(note));
        }
        if let Some(keys) = self.maps.get(&map_id.to_string()) {
            merged.extend(keys.clone());
        }
        Ok(serde_json::from_value(Value::Object(merged))?)
    }
}

/// Expand `{id}` in an output pattern to the zero-padded map id
pub fn output_name(pattern: &str, map_id: u32) -> String {
    pattern.replace("{id}", &format!("{map_id:03}"))
}

/// Collect `<KEY:VALUE>` and `<KEY>` tags from a map note
///
/// Keys are upper-cased. Values parse as booleans, then integers, and
/// otherwise stay lower-cased strings (`<FIELD_TYPE:Terrace>`). A bare
/// `<KEY>` means `true`.
pub fn parse_note_tags(note: &str) -> Map<String, Value> {
    let mut tags = Map::new();
    let mut rest = note;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(end) = after.find(|c: char| c == '<' || c == '>') else {
            break;
        };
        if after[end..].starts_with('<') {
            rest = &after[end..];
            continue;
        }
        let body = &after[..end];
        rest = &after[end + 1..];

        let (key, value) = match body.split_once(':') {
            Some((key, raw)) => (key.trim(), tag_value(raw.trim())),
            None => (body.trim(), Value::Bool(true)),
        };
        if key.is_empty() || key.contains(char::is_whitespace) {
            continue;
        }
        tags.insert(key.to_ascii_uppercase(), value);
    }
    tags
}

fn tag_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else if let Ok(n) = raw.parse::<i64>() {
        Value::from(n)
    } else {
        Value::String(raw.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semiauto_map_core::FieldType;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert!(config.is_palette(2));
        assert!(!config.is_palette(4));
        assert_eq!(config.output_name(7), "_Map007.json");
        assert_eq!(config.output_name(1234), "_Map1234.json");
    }

    #[test]
    fn test_parse_toml() {
        let config = RunnerConfig::from_toml_str(
            r#"
palette_ids = [5]
data_dir = "game/data"
diagnostic = true

[defaults]
ADD_SHADOW = false

[maps.12]
FIELD_TYPE = "terrace"
SEED = 99
"#,
        )
        .unwrap();

        assert_eq!(config.palette_ids, vec![5]);
        assert_eq!(config.data_dir, PathBuf::from("game/data"));
        assert_eq!(config.output_pattern, "_Map{id}.json", "unset keys keep their default");
        assert!(config.diagnostic);

        let options = config.options_for(12, &TileGrid::new(1, 1)).unwrap();
        assert!(!options.add_shadow);
        assert_eq!(options.field_type, Some(FieldType::Terrace));
        assert_eq!(options.seed_for(12), 99);

        let other = config.options_for(13, &TileGrid::new(1, 1)).unwrap();
        assert!(!other.add_shadow);
        assert!(!other.is_field());
        assert_eq!(other.seed_for(13), 13);
    }

    #[test]
    fn test_palette_zero_is_rejected() {
        let result = RunnerConfig::from_toml_str("palette_ids = [0, 1]");
        assert!(matches!(result, Err(RuntimeError::InvalidFormat(_))));
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        let result = RunnerConfig::from_toml_str("palette_ids = [");
        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }

    #[test]
    fn test_note_tags() {
        let tags = parse_note_tags("Cave <seed:42> <FIELD_TYPE: Mix> <ADD_GRASS:false>\n<DUNGEON_SYMMETRY>");

        assert_eq!(tags.get("SEED"), Some(&Value::from(42)));
        assert_eq!(tags.get("FIELD_TYPE"), Some(&Value::from("mix")));
        assert_eq!(tags.get("ADD_GRASS"), Some(&Value::Bool(false)));
        assert_eq!(tags.get("DUNGEON_SYMMETRY"), Some(&Value::Bool(true)));
        assert_eq!(tags.len(), 4);
    }

    #[test]
    fn test_note_tags_skip_stray_brackets() {
        let tags = parse_note_tags("a < b <SEED:3> c > d <not a tag> <LIMIT_TREE:2");

        assert_eq!(tags.get("SEED"), Some(&Value::from(3)));
        assert_eq!(tags.len(), 1, "{tags:?}");
    }

    #[test]
    fn test_layer_order() {
        let mut config = RunnerConfig::default();
        config.defaults.insert("TREE_SIZE".to_string(), Value::from(10));
        config.defaults.insert("BLOCK_OBJECT_X".to_string(), Value::from(4));
        let mut keys = Map::new();
        keys.insert("TREE_SIZE".to_string(), Value::from(30));
        config.maps.insert("8".to_string(), keys);

        let mut target = TileGrid::new(1, 1);
        target.extra.insert("note".to_string(), Value::from("<TREE_SIZE:20> <BLOCK_OBJECT_X:9>"));

        let options = config.options_for(8, &target).unwrap();
        assert_eq!(options.tree_size, 30, "config map table wins over the note");
        assert_eq!(options.block_object_x, 9, "note wins over the defaults");
    }

    #[test]
    fn test_bad_option_value_is_a_json_error() {
        let mut target = TileGrid::new(1, 1);
        target.extra.insert("note".to_string(), Value::from("<FIELD_TYPE:volcano>"));

        let result = RunnerConfig::default().options_for(1, &target);
        assert!(matches!(result, Err(RuntimeError::Json(_))));
    }
}
