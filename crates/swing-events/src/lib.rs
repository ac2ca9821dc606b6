//! High-level facade crate for the `swing-events-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the detector crates
//! - [`analyze_clip`], which runs every detector over one pose store
//! - JSON config and report helpers used by the `swing-events` binary
//!
//! ## Quickstart
//!
//! ```no_run
//! use swing_events::core::{ClipInfo, PoseFrames, SkeletonModel};
//! use swing_events::{analyze_clip, AnalyzeParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frames = swing_events::load_frames("poses.json")?;
//! let clip = ClipInfo::new(30.0, SkeletonModel::Coco17);
//! let report = analyze_clip(&frames, &clip, &AnalyzeParams::default());
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `swing_events::core`: pose store, layouts, geometry, smoothing, peaks.
//! - `swing_events::serve`: trophy position and ball contact.
//! - `swing_events::jump`: takeoff, peak, landing and knee phases.
//! - `swing_events::impact`: swing impacts, velocity and acceleration variants.

pub use swing_events_core as core;
pub use swing_events_impact as impact;
pub use swing_events_jump as jump;
pub use swing_events_serve as serve;

pub use swing_events_core::{ClipInfo, DetectError, PoseFrames, SkeletonModel};

mod analyze;
mod io;

pub use analyze::{analyze_clip, AnalyzeParams, ClipReport, DetectorSelection};
pub use io::{load_frames, AnalyzeConfig, AnalyzeIoError};
