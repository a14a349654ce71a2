use crate::domain::model::ProjectData;
use crate::utils::error::{BepError, Result};
use crate::utils::validation::validate_file_extensions;
use std::path::Path;

pub const PROJECT_FILE_EXTENSIONS: [&str; 2] = ["toml", "json"];

/// Loads saved form input from a `.toml` or `.json` project file.
pub fn load_project_file<P: AsRef<Path>>(path: P) -> Result<ProjectData> {
    let path = path.as_ref();
    let display = path.display().to_string();
    validate_file_extensions("project_file", &[display.clone()], &PROJECT_FILE_EXTENSIONS)?;

    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        toml::from_str(&content).map_err(|e| BepError::ConfigValidationError {
            field: display,
            message: format!("TOML parsing error: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Discipline, Software, Standard};
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_toml_project() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(
            br#"
project_name = "North Campus"
project_type = "educational"
disciplines = ["architecture", "Electrical"]
software = ["revit", "Solibri"]
standards = "uk"
additional_notes = "Existing survey available"
"#,
        )
        .unwrap();

        let data = load_project_file(file.path()).unwrap();
        assert_eq!(data.project_name, "North Campus");
        assert!(data.disciplines.contains(&Discipline::Electrical));
        assert!(data.software.contains(&Software::Solibri));
        assert_eq!(data.standards, Standard::UkBimFramework);
    }

    #[test]
    fn test_load_json_project() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"project_name": "Depot", "disciplines": ["civil"]}"#)
            .unwrap();

        let data = load_project_file(file.path()).unwrap();
        assert!(data.disciplines.contains(&Discipline::Civil));
    }

    #[test]
    fn test_rejects_unknown_catalog_value_and_extension() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"project_name = \"X\"\nlod = \"LOD 900\"\n").unwrap();
        assert!(load_project_file(file.path()).is_err());

        let file = Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            load_project_file(file.path()),
            Err(BepError::InvalidConfigValueError { .. })
        ));
    }
}
