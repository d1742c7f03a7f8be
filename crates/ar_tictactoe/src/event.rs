//! Events delivered by the tracking collaborator.
//!
//! Tracking callbacks are flattened into one [`TrackingEvent`] type so a
//! controller has a single entry point and handles them strictly in order.

use crate::Seat;
use crate::mapper::{BoardRect, CameraView};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Milliseconds on the caller's clock.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("{}ms", _0)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Milliseconds since the clock's origin.
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if the clock went backwards.
    pub fn millis_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This timestamp moved forward by `ms`.
    pub fn plus_millis(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

/// Pose of a tracked marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct MarkerPose {
    /// Marker-to-world transform.
    transform: Mat4,
}

impl MarkerPose {
    /// A pose with no rotation, placed at `position`.
    pub fn at(position: Vec3) -> Self {
        Self::new(Mat4::from_translation(position))
    }

    /// Marker-to-world transform.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// World-space position of the marker origin.
    pub fn position(&self) -> Vec3 {
        self.transform.transform_point3(Vec3::ZERO)
    }
}

/// Input to a [`Controller`](crate::Controller).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackingEvent {
    /// A seat's marker is visible at `pose`. Repeats while tracked.
    MarkerFound {
        /// Owner of the marker.
        seat: Seat,
        /// Current pose.
        pose: MarkerPose,
    },
    /// A seat's marker dropped out of view.
    MarkerLost {
        /// Owner of the marker.
        seat: Seat,
    },
    /// The active camera moved or the viewport resized.
    CameraUpdated {
        /// New camera state.
        camera: CameraView,
    },
    /// The board overlay was laid out on screen.
    BoardLayout {
        /// Overlay bounds in screen pixels.
        rect: BoardRect,
    },
    /// User asked for a new game.
    Reset,
}

/// An event stamped with the time it was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Observation time.
    pub at_ms: Timestamp,
    /// The event.
    #[serde(flatten)]
    pub event: TrackingEvent,
}
