//! Augmented-reality tic-tac-toe core.
//!
//! Printed markers seen through a camera are mapped onto a 3x3 board
//! overlay. This crate holds the parts that do not depend on a browser
//! or a tracking library:
//!
//! - **Engine**: board state, turn order, win and draw detection, and the
//!   debounce gate that stops one held marker from placing twice
//! - **Mapper**: projects a marker's world position through the camera
//!   and finds the board cell under it
//! - **Controller**: consumes [`TrackingEvent`]s and drives a
//!   [`BoardDisplay`]
//!
//! # Example
//!
//! ```
//! use ar_tictactoe::{
//!     BoardRect, CameraView, CommandLog, Controller, MarkerPose, Position, Seat, Settings,
//!     Timestamp, TrackingEvent,
//! };
//! use glam::{Mat4, Vec2, Vec3};
//!
//! let mut controller = Controller::new(CommandLog::new(), Settings::default());
//! let camera = CameraView::new(Mat4::IDENTITY, Vec2::new(300.0, 300.0));
//! let rect = BoardRect::new(0.0, 0.0, 300.0, 300.0);
//! let t0 = Timestamp::from_millis(0);
//! controller.handle(TrackingEvent::CameraUpdated { camera }, t0).unwrap();
//! controller.handle(TrackingEvent::BoardLayout { rect }, t0).unwrap();
//!
//! let pose = MarkerPose::at(Vec3::ZERO);
//! controller
//!     .handle(TrackingEvent::MarkerFound { seat: Seat::One, pose }, t0)
//!     .unwrap();
//! assert_eq!(controller.engine().history(), &[Position::Center]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod controller;
mod display;
mod engine;
mod error;
mod event;
mod mapper;
mod position;
pub mod rules;
mod settings;
mod types;

pub use controller::{Controller, Handled};
pub use display::{BoardDisplay, CommandLog, DisplayCommand};
pub use engine::GameEngine;
pub use error::{ConfigError, Rejection};
pub use event::{MarkerPose, TimedEvent, Timestamp, TrackingEvent};
pub use mapper::{BoardRect, CameraView, CellMapper, map_to_cell, ndc_to_screen};
pub use position::Position;
pub use rules::{WIN_PATTERNS, WinLine};
pub use settings::Settings;
pub use types::{Board, GameStatus, Outcome, Player, Seat, Square};
