//! Placement Policy
//!
//! Each movable component gets a pose pair: the exploded starting pose
//! and the assembled target pose, both derived from the dimension table
//! by fixed offset arithmetic. Evaluated once at startup and re-applied
//! unchanged on reset; no randomness, no iteration.

use glam::Vec3;

use crate::dims::Dimensions;
use crate::scene::ComponentId;

/// An (initial, target) position pair for one movable component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosePair {
    pub initial: Vec3,
    pub target: Vec3,
}

/// Pose pairs for every movable component, plus the static seats.
#[derive(Debug, Clone, Copy)]
pub struct PoseTable {
    pub slider_right: PosePair,
    pub slider_left: PosePair,
    pub cap: PosePair,
    /// Static seat of the chip (and glass lid) on the platform.
    pub chip_seat: Vec3,
}

impl PoseTable {
    /// Derive all poses from the dimension set.
    ///
    /// Assembled target: the cradle front face flush with the chip end
    /// face. Exploded initial: the needle tip clear of the chip face by
    /// the configured clearance.
    pub fn derive(dims: &Dimensions) -> Self {
        let chip_edge_x = dims.chip_edge_x();

        let target_slider_x = chip_edge_x - dims.cradle_front_face_local_x();
        let initial_slider_x =
            chip_edge_x - dims.needle_tip_local_x() + dims.needle_clearance;

        let slider_right = PosePair {
            initial: Vec3::new(initial_slider_x as f32, 0.0, 0.0),
            target: Vec3::new(target_slider_x as f32, 0.0, 0.0),
        };
        // The left cart is the mirrored build, so its poses mirror too.
        let slider_left = PosePair {
            initial: Vec3::new(-initial_slider_x as f32, 0.0, 0.0),
            target: Vec3::new(-target_slider_x as f32, 0.0, 0.0),
        };

        let cap = PosePair {
            initial: Vec3::new(0.0, dims.cap_raised_y as f32, 0.0),
            target: Vec3::new(0.0, (dims.base_wall_height + 1.0) as f32, 0.0),
        };

        Self {
            slider_right,
            slider_left,
            cap,
            chip_seat: Vec3::new(0.0, dims.chip_center_y() as f32, 0.0),
        }
    }

    /// The pose pair for a movable component; `None` for static ones.
    pub fn pair(&self, id: ComponentId) -> Option<PosePair> {
        match id {
            ComponentId::SliderRight => Some(self.slider_right),
            ComponentId::SliderLeft => Some(self.slider_left),
            ComponentId::Cap => Some(self.cap),
            ComponentId::Base | ComponentId::Chip | ComponentId::GlassLid => None,
        }
    }

    /// Initial placement for every component, movable or not.
    pub fn initial_position(&self, id: ComponentId) -> Vec3 {
        match id {
            ComponentId::Base => Vec3::ZERO,
            ComponentId::Chip | ComponentId::GlassLid => self.chip_seat,
            ComponentId::SliderRight => self.slider_right.initial,
            ComponentId::SliderLeft => self.slider_left.initial,
            ComponentId::Cap => self.cap.initial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_slider_poses() {
        let poses = PoseTable::derive(&Dimensions::default());
        assert!((poses.slider_right.target.x - 13.75).abs() < 1e-5);
        assert!((poses.slider_right.initial.x - 18.25).abs() < 1e-5);
        assert!((poses.slider_left.target.x + 13.75).abs() < 1e-5);
        assert!((poses.slider_left.initial.x + 18.25).abs() < 1e-5);
    }

    #[test]
    fn test_cap_descends_to_wall_height() {
        let dims = Dimensions::default();
        let poses = PoseTable::derive(&dims);
        assert!((poses.cap.target.y - 5.1).abs() < 1e-5);
        assert!(poses.cap.initial.y > poses.cap.target.y);
    }

    #[test]
    fn test_static_components_have_no_pair() {
        let poses = PoseTable::derive(&Dimensions::default());
        assert!(poses.pair(ComponentId::Base).is_none());
        assert!(poses.pair(ComponentId::Chip).is_none());
        assert!(poses.pair(ComponentId::GlassLid).is_none());
        assert!(poses.pair(ComponentId::Cap).is_some());
    }
}
