use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{DetectError, Joint, KeypointLayout, Side, SkeletonModel};

/// One skeletal landmark in image pixel space (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub position: Point2<f32>,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            confidence,
        }
    }

    /// Position if the keypoint clears `min_confidence` (strictly) and is finite.
    #[inline]
    pub fn valid_position(&self, min_confidence: f32) -> Option<Point2<f32>> {
        let finite = self.position.x.is_finite() && self.position.y.is_finite();
        (finite && self.confidence > min_confidence).then_some(self.position)
    }
}

/// One detected person in one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub keypoints: Vec<Keypoint>,
}

impl Body {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Body for `model` with every keypoint at zero confidence.
    pub fn empty(model: SkeletonModel) -> Self {
        Self::new(vec![Keypoint::new(0.0, 0.0, 0.0); model.keypoint_count()])
    }

    /// Set a semantic joint, growing the keypoint list if needed.
    pub fn set_joint(
        &mut self,
        layout: &KeypointLayout,
        joint: Joint,
        side: Side,
        keypoint: Keypoint,
    ) -> &mut Self {
        let index = layout.joint(joint, side);
        if self.keypoints.len() <= index {
            self.keypoints
                .resize(index + 1, Keypoint::new(0.0, 0.0, 0.0));
        }
        self.keypoints[index] = keypoint;
        self
    }

    /// Position of keypoint `index`, or `None` if absent or below `min_confidence`.
    #[inline]
    pub fn point(&self, index: usize, min_confidence: f32) -> Option<Point2<f32>> {
        self.keypoints
            .get(index)
            .and_then(|k| k.valid_position(min_confidence))
    }

    /// Semantic joint lookup through a layout.
    #[inline]
    pub fn joint(
        &self,
        layout: &KeypointLayout,
        joint: Joint,
        side: Side,
        min_confidence: f32,
    ) -> Option<Point2<f32>> {
        self.point(layout.joint(joint, side), min_confidence)
    }
}

/// Sparse, frame-index-keyed pose store.
///
/// Frames missing from the map are occluded or were never estimated; they
/// are not the same thing as a frame with zero bodies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseFrames {
    frames: BTreeMap<u32, Vec<Body>>,
}

impl PoseFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, frame: u32, bodies: Vec<Body>) -> Option<Vec<Body>> {
        self.frames.insert(frame, bodies)
    }

    pub fn get(&self, frame: u32) -> Option<&[Body]> {
        self.frames.get(&frame).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Body])> + '_ {
        self.frames.iter().map(|(&f, b)| (f, b.as_slice()))
    }
}

impl FromIterator<(u32, Vec<Body>)> for PoseFrames {
    fn from_iter<I: IntoIterator<Item = (u32, Vec<Body>)>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<u32, Vec<Body>>> for PoseFrames {
    fn from(frames: BTreeMap<u32, Vec<Body>>) -> Self {
        Self { frames }
    }
}

/// Per-clip constants shared by every detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipInfo {
    pub fps: f32,
    pub skeleton: SkeletonModel,
    /// Index of the tracked subject within each frame's body list.
    #[serde(default)]
    pub primary_body: usize,
}

impl ClipInfo {
    pub fn new(fps: f32, skeleton: SkeletonModel) -> Self {
        Self {
            fps,
            skeleton,
            primary_body: 0,
        }
    }

    pub fn with_primary_body(mut self, primary_body: usize) -> Self {
        self.primary_body = primary_body;
        self
    }
}

/// One stored frame as seen by signal extraction.
#[derive(Clone, Copy, Debug)]
pub struct FrameSample<'a> {
    pub frame: u32,
    pub timestamp: f32,
    /// Primary subject, if the frame has a body at that index.
    pub body: Option<&'a Body>,
}

/// Validated view of a clip: a non-empty store plus a usable frame rate.
#[derive(Clone, Copy, Debug)]
pub struct PoseClip<'a> {
    frames: &'a PoseFrames,
    info: ClipInfo,
    layout: KeypointLayout,
}

impl<'a> PoseClip<'a> {
    /// Reject malformed input before any extraction runs.
    pub fn new(frames: &'a PoseFrames, info: &ClipInfo) -> Result<Self, DetectError> {
        if frames.is_empty() {
            return Err(DetectError::EmptyClip);
        }
        if !info.fps.is_finite() || info.fps <= 0.0 {
            return Err(DetectError::InvalidFps { fps: info.fps });
        }
        Ok(Self {
            frames,
            info: *info,
            layout: info.skeleton.layout(),
        })
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.info.fps
    }

    #[inline]
    pub fn layout(&self) -> &KeypointLayout {
        &self.layout
    }

    pub fn info(&self) -> &ClipInfo {
        &self.info
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn timestamp(&self, frame: u32) -> f32 {
        frame as f32 / self.info.fps
    }

    /// Stored frames in ascending order with the primary body resolved.
    pub fn samples(&self) -> impl Iterator<Item = FrameSample<'a>> + '_ {
        let primary = self.info.primary_body;
        let fps = self.info.fps;
        self.frames.iter().map(move |(frame, bodies)| FrameSample {
            frame,
            timestamp: frame as f32 / fps,
            body: bodies.get(primary),
        })
    }
}
