use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use swing_events_core::{ClipInfo, DetectError, PoseFrames};
use swing_events_impact::{
    SwingDetectionResult, SwingV1Detector, SwingV1Params, SwingV2Detector, SwingV2Params,
};
use swing_events_jump::{LandingDetectionResult, LandingDetector, LandingParams};
use swing_events_serve::{
    ContactDetectionResult, ContactDetector, ContactParams, TrophyDetectionResult,
    TrophyDetector, TrophyParams,
};

/// Which detectors [`analyze_clip`] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSelection {
    pub trophy: bool,
    pub contact: bool,
    pub landing: bool,
    pub swing_v1: bool,
    pub swing_v2: bool,
}

impl Default for DetectorSelection {
    fn default() -> Self {
        Self {
            trophy: true,
            contact: true,
            landing: true,
            swing_v1: true,
            swing_v2: true,
        }
    }
}

/// Per-detector parameters for one analysis run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeParams {
    pub detectors: DetectorSelection,
    pub trophy: TrophyParams,
    pub contact: ContactParams,
    pub landing: LandingParams,
    pub swing_v1: SwingV1Params,
    pub swing_v2: SwingV2Params,
}

/// Results of every selected detector over one clip.
///
/// A detector that fails leaves its field `None` and records the error
/// message under its name in `errors`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipReport {
    pub clip: ClipInfo,
    pub frame_count: usize,
    pub trophy: Option<TrophyDetectionResult>,
    pub contact: Option<ContactDetectionResult>,
    pub landing: Option<LandingDetectionResult>,
    pub swing_v1: Option<SwingDetectionResult>,
    pub swing_v2: Option<SwingDetectionResult>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl ClipReport {
    /// One-line human summary.
    pub fn summary(&self) -> String {
        let frame = |f: Option<u32>| f.map_or_else(|| "-".to_string(), |f| f.to_string());
        let swings = |r: &Option<SwingDetectionResult>| {
            r.as_ref()
                .map_or_else(|| "-".to_string(), |r| r.swings.len().to_string())
        };
        format!(
            "frames {}: trophy {}, contact {}, landing {}, swings v1 {} / v2 {}, {} failed",
            self.frame_count,
            frame(self.trophy.as_ref().map(|r| r.trophy_frame)),
            frame(self.contact.as_ref().map(|r| r.contact_frame)),
            frame(self.landing.as_ref().map(|r| r.landing.frame)),
            swings(&self.swing_v1),
            swings(&self.swing_v2),
            self.errors.len()
        )
    }
}

fn record<T>(
    name: &str,
    enabled: bool,
    outcome: impl FnOnce() -> Result<T, DetectError>,
    errors: &mut BTreeMap<String, String>,
) -> Option<T> {
    if !enabled {
        return None;
    }
    match outcome() {
        Ok(result) => {
            debug!("{name}: ok");
            Some(result)
        }
        Err(e) => {
            warn!("{name}: {e}");
            errors.insert(name.to_string(), e.to_string());
            None
        }
    }
}

/// Run every selected detector over one clip.
///
/// The detectors only read `frames`; a failure in one does not stop the
/// others.
pub fn analyze_clip(frames: &PoseFrames, clip: &ClipInfo, params: &AnalyzeParams) -> ClipReport {
    let sel = params.detectors;
    let mut errors = BTreeMap::new();

    let trophy = record(
        "trophy",
        sel.trophy,
        || TrophyDetector::new(params.trophy.clone()).detect(frames, clip),
        &mut errors,
    );
    let contact = record(
        "contact",
        sel.contact,
        || ContactDetector::new(params.contact.clone()).detect(frames, clip),
        &mut errors,
    );
    let landing = record(
        "landing",
        sel.landing,
        || LandingDetector::new(params.landing.clone()).detect(frames, clip),
        &mut errors,
    );
    let swing_v1 = record(
        "swing_v1",
        sel.swing_v1,
        || SwingV1Detector::new(params.swing_v1.clone()).detect(frames, clip),
        &mut errors,
    );
    let swing_v2 = record(
        "swing_v2",
        sel.swing_v2,
        || SwingV2Detector::new(params.swing_v2.clone()).detect(frames, clip),
        &mut errors,
    );

    ClipReport {
        clip: *clip,
        frame_count: frames.len(),
        trophy,
        contact,
        landing,
        swing_v1,
        swing_v2,
        errors,
    }
}
