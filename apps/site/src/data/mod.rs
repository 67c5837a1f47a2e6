//! CV content loading.
//!
//! The default document is compiled into the binary; `CV_DATA_PATH` swaps in
//! a JSON file with the same shape. Either source is validated before use.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::cv::{ContentError, CvProfile};

const EMBEDDED_CV: &str = include_str!("cv.json");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content is not a valid CV document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("content failed validation: {0}")]
    Invalid(#[from] ContentError),
}

/// Parses and validates a CV document.
pub fn parse_profile(raw: &str) -> Result<CvProfile, LoadError> {
    let profile: CvProfile = serde_json::from_str(raw)?;
    profile.validate()?;
    Ok(profile)
}

/// Loads the CV from `path`, or the embedded document when `path` is `None`.
pub fn load_profile(path: Option<&Path>) -> Result<CvProfile, LoadError> {
    let profile = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let profile = parse_profile(&raw)?;
            info!("Loaded CV content from {}", path.display());
            profile
        }
        None => parse_profile(EMBEDDED_CV)?,
    };

    info!(
        "CV content: {} skills, {} companies, {} recommendations",
        profile.skills.len(),
        profile.companies.len(),
        profile.recommendations.len()
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_profile_is_valid() {
        let profile = load_profile(None).expect("embedded CV must load");
        assert_eq!(profile.contact.name, "Chechu Castro");
        assert!(profile.skills.len() > crate::behavior::show_more::TOP_SKILLS_COUNT);
        assert!(profile.companies.len() > crate::behavior::show_more::EMPLOYMENT_INITIAL_COUNT);
        let initial = crate::behavior::show_more::RECOMMENDATIONS_INITIAL_COUNT;
        assert!(profile.recommendations.len() > initial);
    }

    #[test]
    fn test_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EMBEDDED_CV.as_bytes()).unwrap();

        let profile = load_profile(Some(file.path())).unwrap();
        assert_eq!(profile.languages.len(), 5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_profile(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_skill() {
        let mut doc: serde_json::Value = serde_json::from_str(EMBEDDED_CV).unwrap();
        doc["skills"][0]["level"] = serde_json::json!(150);

        let err = parse_profile(&doc.to_string()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(ContentError::SkillLevelOutOfRange { level: 150, .. })
        ));
    }

    #[test]
    fn test_rejects_negative_skill_at_parse() {
        let mut doc: serde_json::Value = serde_json::from_str(EMBEDDED_CV).unwrap();
        doc["skills"][0]["level"] = serde_json::json!(-1);
        assert!(matches!(
            parse_profile(&doc.to_string()).unwrap_err(),
            LoadError::Parse(_)
        ));
    }

    #[test]
    fn test_rejects_company_without_positions() {
        let mut doc: serde_json::Value = serde_json::from_str(EMBEDDED_CV).unwrap();
        doc["companies"][0]["positions"] = serde_json::json!([]);
        assert!(matches!(
            parse_profile(&doc.to_string()).unwrap_err(),
            LoadError::Invalid(ContentError::EmptyCompany(_))
        ));
    }
}
