use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{DatasetError, Result};
use crate::food_record::FoodRecord;

fn artifact_err(path: &Path) -> impl FnOnce(std::io::Error) -> DatasetError + '_ {
    move |source| DatasetError::Artifact {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes the records as a pretty-printed JSON array, replacing any previous
/// artifact.
///
/// The data is staged in a uniquely named temporary file next to the target
/// and persisted over it only once fully flushed. On any failure the staging
/// file is removed when it drops.
pub fn write_artifact(records: &[FoodRecord], path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(artifact_err(dir))?;

    let mut staged = NamedTempFile::new_in(dir).map_err(artifact_err(dir))?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n").map_err(artifact_err(path))?;
        writer.flush().map_err(artifact_err(path))?;
    }

    staged.persist(path).map_err(|err| DatasetError::Artifact {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    info!(path = %path.display(), records = records.len(), "wrote dataset artifact");
    Ok(())
}

pub fn parse_artifact(json: &str) -> Result<Vec<FoodRecord>> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_artifact(path: &Path) -> Result<Vec<FoodRecord>> {
    let json = fs::read_to_string(path).map_err(artifact_err(path))?;
    parse_artifact(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<FoodRecord> {
        vec![FoodRecord {
            food_code: "07148".to_string(),
            name_primary: "りんご".to_string(),
            name_phonetic: Some("リンゴ".to_string()),
            category: "果実類".to_string(),
            energy_kcal: 53.0,
            protein_g: 0.1,
            fat_g: 0.2,
            carbohydrate_g: 15.5,
            water_g: 84.1,
        }]
    }

    #[test]
    fn test_write_overwrites_and_leaves_no_staging_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out").join("foods.json");
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(&path, "stale")?;

        write_artifact(&sample(), &path)?;

        assert_eq!(read_artifact(&path)?, sample());
        assert_eq!(fs::read_dir(path.parent().unwrap())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_failed_persist_leaves_no_staging_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        // A directory sitting at the target path makes the final rename fail.
        let path = dir.path().join("foods.json");
        fs::create_dir(&path)?;

        let err = write_artifact(&sample(), &path).unwrap_err();
        assert!(matches!(err, DatasetError::Artifact { .. }));

        let entries: Vec<_> = fs::read_dir(dir.path())?.collect::<std::io::Result<_>>()?;
        assert_eq!(entries.len(), 1);
        assert!(entries[0].path().is_dir());
        Ok(())
    }

    #[test]
    fn test_write_creates_parent_directories() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("deeper").join("foods.json");
        write_artifact(&[], &path)?;
        assert_eq!(fs::read_to_string(&path)?.trim(), "[]");
        Ok(())
    }

    #[test]
    fn test_read_missing_artifact() {
        let err = read_artifact(Path::new("missing_foods.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Artifact { .. }));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(parse_artifact("[{\"food_code\": 1}]"), Err(DatasetError::Json(_))));
    }
}
