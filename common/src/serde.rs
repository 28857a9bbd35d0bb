use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::file_format::SerdeFormat;

pub type Result<T> = anyhow::Result<T>;

pub fn serialize<T: Serialize>(value: &T, format: SerdeFormat) -> Result<String> {
    let text = match format {
        SerdeFormat::Yaml => serde_yml::to_string(value)?,
        SerdeFormat::Json => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

pub fn deserialize<T: DeserializeOwned + 'static>(serialized: &str, format: SerdeFormat) -> Result<T> {
    let value = match format {
        SerdeFormat::Yaml => serde_yml::from_str(serialized)?,
        SerdeFormat::Json => serde_json::from_str(serialized)?,
    };
    Ok(value)
}

/// Reads and deserializes a file, picking the format from its extension.
pub fn load_from_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T> {
    let format = SerdeFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    deserialize(&text, format).with_context(|| format!("Failed to parse '{}'", path.display()))
}

pub fn save_to_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let format = SerdeFormat::from_path(path)?;
    let text = serialize(value, format)?;
    std::fs::write(path, text).with_context(|| format!("Failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
        bounds: (f64, f64),
    }

    fn sample() -> Sample {
        Sample {
            name: "Gen Array".to_string(),
            count: 2,
            bounds: (-50.0, -10.0),
        }
    }

    #[test]
    fn test_file_round_trip_for_each_format() {
        let dir = tempfile::tempdir().unwrap();
        for file_name in ["sample.yaml", "sample.json"] {
            let path = dir.path().join(file_name);
            save_to_file(&sample(), &path).unwrap();
            let loaded: Sample = load_from_file(&path).unwrap();
            assert_eq!(loaded, sample(), "format of {}", file_name);
        }
    }

    #[test]
    fn test_load_reports_path_on_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_from_file::<Sample>(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }
}
