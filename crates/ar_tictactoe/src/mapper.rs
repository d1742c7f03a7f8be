//! Classifies a tracked marker's world position into a board cell.
//!
//! The marker is projected to screen pixels with the camera's
//! view-projection matrix, then located inside the board overlay's
//! on-screen rectangle. Anything that cannot be resolved is off-board.

use crate::Position;
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Camera state needed to project world points to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct CameraView {
    /// Combined projection * view matrix.
    pub view_projection: Mat4,
    /// Viewport size in pixels (width, height).
    pub viewport: Vec2,
}

impl CameraView {
    /// Projects a world point to normalized device coordinates.
    ///
    /// `None` if the point is at or behind the camera plane.
    pub fn to_ndc(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection * world.extend(1.0);
        if clip.w.is_nan() || clip.w <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        ndc.is_finite().then_some(ndc)
    }

    /// Projects a world point to screen pixels, origin top-left, y down.
    pub fn to_screen(&self, world: Vec3) -> Option<Vec2> {
        if self.viewport.cmple(Vec2::ZERO).any() || !self.viewport.is_finite() {
            return None;
        }
        self.to_ndc(world).map(|ndc| ndc_to_screen(ndc, self.viewport))
    }
}

/// Maps normalized device coordinates to pixel coordinates.
///
/// NDC y grows upward while screen y grows downward, hence the flip.
pub fn ndc_to_screen(ndc: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) / 2.0 * viewport.x,
        (1.0 - ndc.y) / 2.0 * viewport.y,
    )
}

/// Screen-space bounds of the rendered board overlay, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct BoardRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl BoardRect {
    /// Right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Cell under a screen point, or `None` outside the rectangle.
    ///
    /// Points on the right or bottom edge belong to the last column or row.
    pub fn cell_at(&self, point: Vec2) -> Option<Position> {
        let usable = [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0;
        if !usable || !point.is_finite() || !self.contains(point) {
            return None;
        }

        let rel_x = (point.x - self.left) / self.width;
        let rel_y = (point.y - self.top) / self.height;
        let col = third(rel_x);
        let row = third(rel_y);
        Position::from_row_col(row, col)
    }
}

/// Which third of [0, 1] a fraction falls in, clamped to 0-2.
fn third(fraction: f32) -> usize {
    (fraction * 3.0).floor().clamp(0.0, 2.0) as usize
}

/// Maps a marker's world position to a board cell.
///
/// Returns `None` (off-board) when the camera or layout is unknown, when
/// the point does not project in front of the camera, or when it lands
/// outside the overlay.
#[instrument(level = "trace", skip(camera, rect))]
pub fn map_to_cell(
    world: Vec3,
    camera: Option<&CameraView>,
    rect: Option<&BoardRect>,
) -> Option<Position> {
    let (camera, rect) = (camera?, rect?);
    let screen = camera.to_screen(world)?;
    let cell = rect.cell_at(screen);
    trace!(x = screen.x, y = screen.y, ?cell, "Projected marker");
    cell
}

/// Mapping context built from the most recent camera and layout events.
#[derive(Debug, Clone, Default)]
pub struct CellMapper {
    camera: Option<CameraView>,
    rect: Option<BoardRect>,
}

impl CellMapper {
    /// Records the active camera.
    pub fn set_camera(&mut self, camera: CameraView) {
        self.camera = Some(camera);
    }

    /// Records the board overlay bounds.
    pub fn set_board_rect(&mut self, rect: BoardRect) {
        self.rect = Some(rect);
    }

    /// Active camera, if one has been reported.
    pub fn camera(&self) -> Option<&CameraView> {
        self.camera.as_ref()
    }

    /// Board bounds, if laid out.
    pub fn board_rect(&self) -> Option<&BoardRect> {
        self.rect.as_ref()
    }

    /// Maps a world position using the recorded camera and layout.
    pub fn cell_for(&self, world: Vec3) -> Option<Position> {
        map_to_cell(world, self.camera.as_ref(), self.rect.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_camera() -> CameraView {
        CameraView::new(Mat4::IDENTITY, Vec2::new(300.0, 300.0))
    }

    fn full_rect() -> BoardRect {
        BoardRect::new(0.0, 0.0, 300.0, 300.0)
    }

    #[test]
    fn test_ndc_to_screen_flips_y() {
        let vp = Vec2::new(640.0, 480.0);
        assert_eq!(ndc_to_screen(Vec2::new(-1.0, 1.0), vp), Vec2::new(0.0, 0.0));
        assert_eq!(ndc_to_screen(Vec2::new(1.0, -1.0), vp), Vec2::new(640.0, 480.0));
        assert_eq!(ndc_to_screen(Vec2::ZERO, vp), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_center_maps_to_center_cell() {
        let cam = identity_camera();
        let cell = map_to_cell(Vec3::ZERO, Some(&cam), Some(&full_rect()));
        assert_eq!(cell, Some(Position::Center));
    }

    #[test]
    fn test_corners_map_to_corner_cells() {
        let cam = identity_camera();
        let rect = full_rect();
        let cases = [
            (Vec3::new(-1.0, 1.0, 0.0), Position::TopLeft),
            (Vec3::new(1.0, 1.0, 0.0), Position::TopRight),
            (Vec3::new(-1.0, -1.0, 0.0), Position::BottomLeft),
            (Vec3::new(1.0, -1.0, 0.0), Position::BottomRight),
        ];
        for (world, expected) in cases {
            assert_eq!(map_to_cell(world, Some(&cam), Some(&rect)), Some(expected));
        }
    }

    #[test]
    fn test_outside_each_side_is_off_board() {
        let cam = identity_camera();
        // Board occupies the middle third of the viewport.
        let rect = BoardRect::new(100.0, 100.0, 100.0, 100.0);
        for world in [
            Vec3::new(-0.5, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(0.0, -0.5, 0.0),
        ] {
            assert_eq!(map_to_cell(world, Some(&cam), Some(&rect)), None);
        }
    }

    #[test]
    fn test_missing_inputs_are_off_board() {
        let cam = identity_camera();
        let rect = full_rect();
        assert_eq!(map_to_cell(Vec3::ZERO, None, Some(&rect)), None);
        assert_eq!(map_to_cell(Vec3::ZERO, Some(&cam), None), None);
    }

    #[test]
    fn test_degenerate_rect_is_off_board() {
        let cam = identity_camera();
        let rect = BoardRect::new(150.0, 150.0, 0.0, 0.0);
        assert_eq!(map_to_cell(Vec3::ZERO, Some(&cam), Some(&rect)), None);
    }

    #[test]
    fn test_perspective_camera() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh_gl(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let cam = CameraView::new(proj * view, Vec2::new(600.0, 600.0));
        let rect = BoardRect::new(150.0, 150.0, 300.0, 300.0);

        assert_eq!(
            map_to_cell(Vec3::ZERO, Some(&cam), Some(&rect)),
            Some(Position::Center)
        );
        // Up and to the left in world space is up and to the left on screen.
        assert_eq!(
            map_to_cell(Vec3::new(-1.0, 1.0, 0.0), Some(&cam), Some(&rect)),
            Some(Position::TopLeft)
        );
        // Behind the camera never maps.
        assert_eq!(
            map_to_cell(Vec3::new(0.0, 0.0, 10.0), Some(&cam), Some(&rect)),
            None
        );
    }

    #[test]
    fn test_cell_mapper_remembers_context() {
        let mut mapper = CellMapper::default();
        assert_eq!(mapper.cell_for(Vec3::ZERO), None);
        mapper.set_camera(identity_camera());
        assert_eq!(mapper.cell_for(Vec3::ZERO), None);
        mapper.set_board_rect(full_rect());
        assert_eq!(mapper.cell_for(Vec3::ZERO), Some(Position::Center));
    }
}
