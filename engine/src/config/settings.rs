// Engine settings, loaded from a JSON file or falling back to defaults
use crate::error::EngineError;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    /// Assumed cost of equity as a fraction (0.10 = 10%).
    pub cost_of_equity: f64,
    /// After-tax multiplier applied to the debt term of the WACC
    /// (1 - tax rate; 0.78 implies a 22% tax rate).
    pub debt_tax_shield: f64,
    /// Field delimiter of the snapshot CSV. Must be an ASCII character.
    pub csv_delimiter: char,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            cost_of_equity: 0.10,
            debt_tax_shield: 0.78,
            csv_delimiter: ',',
        }
    }
}

impl EngineSettings {
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        let settings: EngineSettings = serde_json::from_str(&text)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.cost_of_equity, 0.10);
        assert_eq!(settings.debt_tax_shield, 0.78);
        assert_eq!(settings.csv_delimiter, ',');
    }

    #[test]
    fn test_from_file_partial_override() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cost_of_equity": 0.08 }}"#).unwrap();
        let settings = EngineSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.cost_of_equity, 0.08);
        // Unset fields keep their defaults
        assert_eq!(settings.debt_tax_shield, 0.78);
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(EngineSettings::from_file(file.path()).is_err());
    }
}
