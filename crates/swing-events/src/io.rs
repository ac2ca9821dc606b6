//! JSON configuration and report helpers.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use swing_events_core::{ClipInfo, DetectError, PoseFrames, SkeletonModel};

use crate::{AnalyzeParams, ClipReport};

#[derive(thiserror::Error, Debug)]
pub enum AnalyzeIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Detect(#[from] DetectError),
}

fn default_skeleton() -> String {
    SkeletonModel::default().name().to_string()
}

/// Configuration for one analysis run, loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    /// Path to the pose store JSON (frame index to list of bodies).
    pub frames_path: String,
    pub fps: f32,
    #[serde(default = "default_skeleton")]
    pub skeleton: String,
    #[serde(default)]
    pub primary_body: usize,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: AnalyzeParams,
}

impl AnalyzeConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AnalyzeIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnalyzeIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("swing_events_report.json"))
    }

    /// Clip constants with the skeleton name parsed strictly.
    pub fn build_clip_info(&self) -> Result<ClipInfo, DetectError> {
        let skeleton: SkeletonModel = self.skeleton.parse()?;
        Ok(ClipInfo::new(self.fps, skeleton).with_primary_body(self.primary_body))
    }

    /// Load the pose store named by `frames_path`.
    pub fn load_frames(&self) -> Result<PoseFrames, AnalyzeIoError> {
        load_frames(&self.frames_path)
    }
}

/// Load a pose store from JSON.
pub fn load_frames(path: impl AsRef<Path>) -> Result<PoseFrames, AnalyzeIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl ClipReport {
    /// Load a JSON report from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AnalyzeIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnalyzeIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_and_strict_skeleton() {
        let cfg: AnalyzeConfig =
            serde_json::from_str(r#"{"frames_path": "poses.json", "fps": 60.0}"#).unwrap();
        assert_eq!(cfg.skeleton, "blazepose33");
        assert_eq!(cfg.output_path(), PathBuf::from("swing_events_report.json"));
        let clip = cfg.build_clip_info().unwrap();
        assert_eq!(clip.skeleton, SkeletonModel::BlazePose33);
        assert_eq!(clip.primary_body, 0);

        let bad = AnalyzeConfig {
            skeleton: "openpose".to_string(),
            ..cfg
        };
        assert_eq!(
            bad.build_clip_info(),
            Err(DetectError::UnknownSkeletonModel("openpose".to_string()))
        );
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cfg = AnalyzeConfig {
            frames_path: "poses.json".to_string(),
            fps: 30.0,
            skeleton: "coco17".to_string(),
            primary_body: 1,
            output_path: Some("out.json".to_string()),
            params: AnalyzeParams::default(),
        };
        cfg.write_json(&path).unwrap();
        assert_eq!(AnalyzeConfig::load_json(&path).unwrap(), cfg);
    }

    #[test]
    fn missing_frames_file_is_an_io_error() {
        let err = load_frames("/nonexistent/poses.json").unwrap_err();
        assert!(matches!(err, AnalyzeIoError::Io(_)));
    }
}
