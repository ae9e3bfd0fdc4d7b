//! JSON configuration and report helpers.

use crate::{CrosswalkError, CrosswalkParams, FrameVerdict};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum CrosswalkIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration for a crosswalk replay run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrosswalkConfig {
    #[serde(default)]
    pub params: CrosswalkParams,
    /// Directory with per-frame crosswalk masks.
    #[serde(default)]
    pub crosswalk_dir: Option<String>,
    /// Directory with per-frame vehicle masks.
    #[serde(default)]
    pub vehicle_dir: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Where to save the final stable crosswalk mask as a 0/255 PNG.
    #[serde(default)]
    pub stable_mask_path: Option<String>,
    /// Optional override for `params.count_th_crosswalk`.
    #[serde(default)]
    pub count_th_crosswalk: Option<u32>,
}

impl CrosswalkConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CrosswalkIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CrosswalkIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("crosswalk_report.json"))
    }

    /// Accumulator parameters with overrides applied.
    pub fn build_params(&self) -> CrosswalkParams {
        let mut params = self.params;
        if let Some(th) = self.count_th_crosswalk {
            params.count_th_crosswalk = th;
        }
        params
    }
}

/// Per-run report: parameters plus one verdict per processed frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrosswalkReport {
    pub params: CrosswalkParams,
    #[serde(default)]
    pub frames: Vec<FrameVerdict>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CrosswalkReport {
    pub fn new(params: CrosswalkParams) -> Self {
        Self {
            params,
            frames: Vec::new(),
            error: None,
        }
    }

    pub fn push(&mut self, verdict: FrameVerdict) {
        self.frames.push(verdict);
    }

    /// Record a processing error; frames seen so far stay in the report.
    pub fn set_error(&mut self, err: CrosswalkError) {
        self.error = Some(err.to_string());
    }

    /// Indices of frames where a vehicle overlapped the stable crosswalk.
    pub fn overlap_frames(&self) -> Vec<u64> {
        self.frames
            .iter()
            .filter(|v| v.overlap)
            .map(|v| v.index)
            .collect()
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CrosswalkIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CrosswalkIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_override_wins() {
        let cfg: CrosswalkConfig = serde_json::from_str(
            r#"{ "params": { "count_th_crosswalk": 4 }, "count_th_crosswalk": 7 }"#,
        )
        .expect("config");
        assert_eq!(cfg.build_params().count_th_crosswalk, 7);
        assert_eq!(cfg.output_path(), PathBuf::from("crosswalk_report.json"));
    }

    #[test]
    fn report_survives_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");

        let mut report = CrosswalkReport::new(CrosswalkParams {
            count_th_crosswalk: 2,
        });
        report.push(FrameVerdict {
            index: 0,
            crosswalk_detected: true,
            stable_pixels: 0,
            vehicle_pixels: 3,
            overlap_pixels: 0,
            overlap: false,
        });
        report.push(FrameVerdict {
            index: 1,
            crosswalk_detected: true,
            stable_pixels: 9,
            vehicle_pixels: 3,
            overlap_pixels: 3,
            overlap: true,
        });
        report.set_error(CrosswalkError::Uninitialized);
        report.write_json(&path).expect("write");

        let loaded = CrosswalkReport::load_json(&path).expect("load");
        assert_eq!(loaded.params.count_th_crosswalk, 2);
        assert_eq!(loaded.frames, report.frames);
        assert_eq!(loaded.overlap_frames(), vec![1]);
        assert_eq!(
            loaded.error.as_deref(),
            Some("cumulative count is not initialized")
        );
    }

    #[test]
    fn missing_config_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = CrosswalkConfig::load_json(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CrosswalkIoError::Io(_)));
    }
}
