//! Jump phase detection.
//!
//! The clip is reduced to one "primary Y" per frame, the lower of the two
//! ankles or, without confident ankles, the lower hip. The jump peak is the
//! highest point of that track; takeoff and landing are the nearest frames
//! on either side that are back near ground level. Knee angle and vertical
//! velocity then locate the loading, extension and absorption phases and the
//! fastest rise and fall.
//!
//! ```no_run
//! use swing_events_core::{ClipInfo, PoseFrames, SkeletonModel};
//! use swing_events_jump::LandingDetector;
//!
//! let frames = PoseFrames::new();
//! let info = ClipInfo::new(30.0, SkeletonModel::BlazePose33);
//! match LandingDetector::default().detect(&frames, &info) {
//!     Ok(jump) => println!("landed at frame {}", jump.landing.frame),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod detector;
mod params;
mod phases;
mod result;
mod signal;

pub use detector::LandingDetector;
pub use params::LandingParams;
pub use result::{LandingDetectionResult, PhaseEvent};
pub use signal::{FootContact, LandingFrameSignal, PrimarySource};
