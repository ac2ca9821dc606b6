//! Skeleton layouts and joint index lookup.
//!
//! Two keypoint topologies are supported: the 17-point COCO layout produced
//! by YOLO-style pose models and the 33-point BlazePose layout produced by
//! MediaPipe. The layout is an explicit input to every detector.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::DetectError;

/// Body side. Also used to name the racket hand.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Semantic joints the detectors read.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Joint {
    Wrist,
    Elbow,
    Shoulder,
    Hip,
    Knee,
    Ankle,
}

/// Supported pose estimator skeletons.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkeletonModel {
    Coco17,
    #[default]
    BlazePose33,
}

impl SkeletonModel {
    /// Permissive name lookup.
    ///
    /// Unrecognized names resolve to [`SkeletonModel::BlazePose33`], the
    /// default layout, and a warning is logged. Use [`str::parse`] to reject
    /// unknown names instead.
    pub fn from_name_or_default(name: &str) -> SkeletonModel {
        match name.parse() {
            Ok(model) => model,
            Err(_) => {
                warn!("unknown skeleton model `{name}`, falling back to blazepose33");
                SkeletonModel::default()
            }
        }
    }

    pub fn layout(self) -> KeypointLayout {
        match self {
            SkeletonModel::Coco17 => KeypointLayout::COCO17,
            SkeletonModel::BlazePose33 => KeypointLayout::BLAZEPOSE33,
        }
    }

    /// Number of keypoints a body carries in this skeleton.
    pub fn keypoint_count(self) -> usize {
        match self {
            SkeletonModel::Coco17 => 17,
            SkeletonModel::BlazePose33 => 33,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SkeletonModel::Coco17 => "coco17",
            SkeletonModel::BlazePose33 => "blazepose33",
        }
    }
}

impl FromStr for SkeletonModel {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coco17" | "coco" | "yolo" => Ok(SkeletonModel::Coco17),
            "blazepose33" | "blazepose" | "mediapipe" => Ok(SkeletonModel::BlazePose33),
            _ => Err(DetectError::UnknownSkeletonModel(s.to_string())),
        }
    }
}

impl fmt::Display for SkeletonModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Left/right index pair for one joint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct JointPair {
    pub left: usize,
    pub right: usize,
}

impl JointPair {
    const fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    #[inline]
    pub fn get(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Joint-to-keypoint-index table for one skeleton.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeypointLayout {
    pub wrist: JointPair,
    pub elbow: JointPair,
    pub shoulder: JointPair,
    pub hip: JointPair,
    pub knee: JointPair,
    pub ankle: JointPair,
}

impl KeypointLayout {
    pub const COCO17: KeypointLayout = KeypointLayout {
        shoulder: JointPair::new(5, 6),
        elbow: JointPair::new(7, 8),
        wrist: JointPair::new(9, 10),
        hip: JointPair::new(11, 12),
        knee: JointPair::new(13, 14),
        ankle: JointPair::new(15, 16),
    };

    pub const BLAZEPOSE33: KeypointLayout = KeypointLayout {
        shoulder: JointPair::new(11, 12),
        elbow: JointPair::new(13, 14),
        wrist: JointPair::new(15, 16),
        hip: JointPair::new(23, 24),
        knee: JointPair::new(25, 26),
        ankle: JointPair::new(27, 28),
    };

    /// Keypoint index of `joint` on `side`.
    #[inline]
    pub fn joint(&self, joint: Joint, side: Side) -> usize {
        let pair = match joint {
            Joint::Wrist => self.wrist,
            Joint::Elbow => self.elbow,
            Joint::Shoulder => self.shoulder,
            Joint::Hip => self.hip,
            Joint::Knee => self.knee,
            Joint::Ankle => self.ankle,
        };
        pair.get(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_parse_accepts_aliases() {
        assert_eq!("YOLO".parse::<SkeletonModel>(), Ok(SkeletonModel::Coco17));
        assert_eq!(
            " mediapipe ".parse::<SkeletonModel>(),
            Ok(SkeletonModel::BlazePose33)
        );
        assert_eq!(
            "openpose".parse::<SkeletonModel>(),
            Err(DetectError::UnknownSkeletonModel("openpose".to_string()))
        );
    }

    #[test]
    fn permissive_lookup_falls_back_to_blazepose() {
        assert_eq!(
            SkeletonModel::from_name_or_default("openpose"),
            SkeletonModel::BlazePose33
        );
        assert_eq!(
            SkeletonModel::from_name_or_default("coco17"),
            SkeletonModel::Coco17
        );
    }

    #[test]
    fn layouts_resolve_expected_indices() {
        let coco = SkeletonModel::Coco17.layout();
        assert_eq!(coco.joint(Joint::Wrist, Side::Right), 10);
        assert_eq!(coco.joint(Joint::Ankle, Side::Left), 15);

        let blaze = SkeletonModel::BlazePose33.layout();
        assert_eq!(blaze.joint(Joint::Wrist, Side::Left), 15);
        assert_eq!(blaze.joint(Joint::Hip, Side::Right), 24);
        assert_eq!(blaze.joint(Joint::Knee, Side::Left), 25);
    }

    #[test]
    fn opposite_side() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }
}
