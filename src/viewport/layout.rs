// layout.rs - Responsive placement
//
// Maps viewport size to cube placement. Motion code never sees `Role`;
// only the resize path does.

use glam::Vec3;

use super::Viewport;
use crate::config::LayoutConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Which cubes survive on narrow screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Outer,
    Middle,
}

/// Construction parameters of one decorative cube.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeSpec {
    pub side: Side,
    pub index: f32,
    pub y_offset: f32,
    pub size: f32,
    pub role: Role,
}

impl CubeSpec {
    pub const fn new(side: Side, index: f32, y_offset: f32, size: f32, role: Role) -> Self {
        Self { side, index, y_offset, size, role }
    }

    /// Horizontal resting column on desktop.
    pub fn home_x(&self, cfg: &LayoutConfig) -> f32 {
        self.side.sign() * cfg.side_offset + self.index * cfg.index_spread
    }
}

/// Height the cube rests at with the page scrolled to the top.
pub fn rest_y(viewport_h: f32, y_offset: f32, cfg: &LayoutConfig) -> f32 {
    viewport_h * cfg.rest_fraction / cfg.pixels_per_unit + y_offset
}

/// Height the cube drifts to with the page scrolled to the bottom.
pub fn bottom_of_screen(viewport_h: f32, y_offset: f32, cfg: &LayoutConfig) -> f32 {
    let final_y = viewport_h * cfg.bottom_fraction / cfg.pixels_per_unit + 2.0 * y_offset;
    rest_y(viewport_h, y_offset, cfg) - final_y
}

#[inline]
pub fn is_mobile(viewport: Viewport, cfg: &LayoutConfig) -> bool {
    viewport.width <= cfg.mobile_breakpoint
}

/// Visibility and optional one-off move for a cube after a resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub visible: bool,
    /// New (x, z); y always stays with the motion controller.
    pub moved_to: Option<(f32, f32)>,
}

pub fn place(spec: &CubeSpec, viewport: Viewport, cfg: &LayoutConfig) -> Placement {
    let mobile = is_mobile(viewport, cfg);
    match (spec.role, mobile) {
        (Role::Middle, true) => Placement {
            visible: true,
            moved_to: Some((viewport.width / cfg.pixels_per_unit, cfg.mobile_depth)),
        },
        (Role::Middle, false) => Placement {
            visible: true,
            moved_to: Some((spec.home_x(cfg), 0.0)),
        },
        (Role::Outer, mobile) => Placement { visible: !mobile, moved_to: None },
    }
}

/// Where a cube is created, above the top of the screen.
pub fn spawn_position(spec: &CubeSpec, start_height: f32, cfg: &LayoutConfig) -> Vec3 {
    Vec3::new(spec.home_x(cfg), start_height, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIDDLE: CubeSpec = CubeSpec::new(Side::Right, 0.0, -1.0, 3.2, Role::Middle);
    const OUTER: CubeSpec = CubeSpec::new(Side::Left, -1.5, -1.0, 3.0, Role::Outer);

    #[test]
    fn home_column_follows_side_and_index() {
        let cfg = LayoutConfig::default();
        assert_eq!(MIDDLE.home_x(&cfg), 30.0);
        assert_eq!(OUTER.home_x(&cfg), -45.0);
    }

    #[test]
    fn rest_and_bottom_scale_with_viewport() {
        let cfg = LayoutConfig::default();
        assert!((rest_y(140.0, 0.0, &cfg) - 0.875).abs() < 1e-6);
        // 800 * 0.25 / 40 = 5, 800 * 0.85 / 40 = 17
        assert!((bottom_of_screen(800.0, 0.0, &cfg) + 12.0).abs() < 1e-5);
        assert!((bottom_of_screen(800.0, 2.0, &cfg) + 14.0).abs() < 1e-5);
    }

    #[test]
    fn mobile_keeps_only_middle() {
        let cfg = LayoutConfig::default();
        let phone = Viewport::new(390.0, 844.0);
        assert_eq!(place(&OUTER, phone, &cfg), Placement { visible: false, moved_to: None });
        let p = place(&MIDDLE, phone, &cfg);
        assert!(p.visible);
        assert_eq!(p.moved_to, Some((390.0 / 40.0, 0.5)));
    }

    #[test]
    fn desktop_restores_middle_column() {
        let cfg = LayoutConfig::default();
        let desk = Viewport::new(1440.0, 900.0);
        assert!(place(&OUTER, desk, &cfg).visible);
        assert_eq!(place(&MIDDLE, desk, &cfg).moved_to, Some((30.0, 0.0)));
    }

    #[test]
    fn breakpoint_is_inclusive() {
        let cfg = LayoutConfig::default();
        assert!(is_mobile(Viewport::new(768.0, 1024.0), &cfg));
        assert!(!is_mobile(Viewport::new(769.0, 1024.0), &cfg));
    }
}
