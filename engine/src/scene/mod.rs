//! Scene Session Object
//!
//! [`CassetteScene`] owns everything mutable: the component groups,
//! their visibility flags, the pose table and the animation table.
//! There are no module-level globals; the viewer and the exporters each
//! borrow the one session the application created.
//!
//! Components are identified by [`ComponentId`], a stable enum; the
//! display strings shown in the UI and written into exports are derived
//! from it, never used as keys.

pub mod poses;

use glam::Vec3;

use crate::anim::AnimationTable;
use crate::dims::Dimensions;
use crate::mesh::TriMesh;
use crate::parts::{self, MaterialId};
use poses::PoseTable;

/// Stable identifier for each named component group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentId {
    Base,
    Chip,
    GlassLid,
    SliderRight,
    SliderLeft,
    Cap,
}

impl ComponentId {
    /// Every component, in build/display order.
    pub const ALL: [ComponentId; 6] = [
        ComponentId::Base,
        ComponentId::Chip,
        ComponentId::GlassLid,
        ComponentId::SliderRight,
        ComponentId::SliderLeft,
        ComponentId::Cap,
    ];

    /// Display label for UI and export node names.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentId::Base => "Cassette Base",
            ComponentId::Chip => "Microchip",
            ComponentId::GlassLid => "Glass Lid",
            ComponentId::SliderRight => "Slider Cart (R)",
            ComponentId::SliderLeft => "Slider Cart (L)",
            ComponentId::Cap => "Top Cap",
        }
    }
}

/// One flat-colored mesh with its material assignment.
#[derive(Debug, Clone)]
pub struct Solid {
    pub mesh: TriMesh,
    pub material: MaterialId,
}

impl Solid {
    pub fn new(mesh: TriMesh, material: MaterialId) -> Self {
        Self { mesh, material }
    }
}

/// A named group of solids that moves and toggles as a unit.
///
/// Solids are in group-local object space; `position` places the group
/// in the world. Groups are created once at startup and never destroyed
/// during a session.
#[derive(Debug, Clone)]
pub struct ComponentGroup {
    pub id: ComponentId,
    pub solids: Vec<Solid>,
    pub position: Vec3,
    pub visible: bool,
}

impl ComponentGroup {
    pub fn new(id: ComponentId, solids: Vec<Solid>) -> Self {
        Self {
            id,
            solids,
            position: Vec3::ZERO,
            visible: true,
        }
    }

    /// All solids merged into one mesh, still in group-local space.
    pub fn merged_mesh(&self) -> TriMesh {
        let mut mesh = TriMesh::new();
        for solid in &self.solids {
            mesh.merge(&solid.mesh);
        }
        mesh
    }

    /// Merged mesh translated to the group's world position.
    pub fn world_mesh(&self) -> TriMesh {
        let mut mesh = self.merged_mesh();
        mesh.translate(self.position);
        mesh
    }
}

/// The scene session: all components, poses and animation state.
pub struct CassetteScene {
    pub dims: Dimensions,
    pub poses: PoseTable,
    groups: Vec<ComponentGroup>,
    animations: AnimationTable,
}

impl CassetteScene {
    /// Build the full model and seat every component at its initial
    /// pose. This is the only place geometry is constructed.
    pub fn new(dims: &Dimensions) -> Self {
        let poses = PoseTable::derive(dims);

        let groups = vec![
            parts::base::build(dims),
            parts::chip::build(dims),
            parts::chip::build_glass_lid(dims),
            parts::slider::build(dims, false),
            parts::slider::build(dims, true),
            parts::cap::build(dims),
        ];

        let mut scene = Self {
            dims: *dims,
            poses,
            groups,
            animations: AnimationTable::new(),
        };
        for id in ComponentId::ALL {
            let position = scene.poses.initial_position(id);
            scene.group_mut(id).position = position;
        }
        scene
    }

    pub fn group(&self, id: ComponentId) -> &ComponentGroup {
        // ALL and the build list share one order.
        &self.groups[id as usize]
    }

    pub fn group_mut(&mut self, id: ComponentId) -> &mut ComponentGroup {
        &mut self.groups[id as usize]
    }

    /// Iterate all groups in display order.
    pub fn groups(&self) -> impl Iterator<Item = &ComponentGroup> {
        self.groups.iter()
    }

    /// Iterate only the currently visible groups.
    pub fn visible_groups(&self) -> impl Iterator<Item = &ComponentGroup> {
        self.groups.iter().filter(|g| g.visible)
    }

    // ========================================================================
    // INTERACTION COMMANDS
    // ========================================================================

    /// Number of animations currently in flight.
    pub fn in_flight(&self) -> usize {
        self.animations.in_flight()
    }

    /// Whether the trigger controls are enabled (nothing in flight).
    pub fn controls_enabled(&self) -> bool {
        self.in_flight() == 0
    }

    /// Snap every movable component back to its initial pose and force
    /// the cap visible. Ignored while any animation is in flight.
    pub fn reset(&mut self) {
        if self.in_flight() > 0 {
            return;
        }
        for id in ComponentId::ALL {
            let position = self.poses.initial_position(id);
            self.group_mut(id).position = position;
        }
        self.group_mut(ComponentId::Cap).visible = true;
    }

    /// Slide both needle carts to their assembled targets, starting at
    /// time `now`. Both run concurrently; each captures its current
    /// position as the glide start.
    pub fn lock_sliders(&mut self, now: f64) {
        if !self.controls_enabled() {
            return;
        }
        for id in [ComponentId::SliderRight, ComponentId::SliderLeft] {
            let start = self.group(id).position;
            if let Some(pair) = self.poses.pair(id) {
                self.animations.start(id, start, pair.target, now);
            }
        }
    }

    /// Lower the cap onto the base, starting at time `now`.
    pub fn assemble_cap(&mut self, now: f64) {
        if !self.controls_enabled() {
            return;
        }
        let start = self.group(ComponentId::Cap).position;
        if let Some(pair) = self.poses.pair(ComponentId::Cap) {
            self.animations
                .start(ComponentId::Cap, start, pair.target, now);
        }
    }

    /// Advance in-flight animations to time `now`, writing the sampled
    /// positions into the groups. Call once per frame.
    pub fn tick(&mut self, now: f64) {
        let groups = &mut self.groups;
        self.animations.tick(now, |id, position| {
            groups[id as usize].position = position;
        });
    }

    /// Toggle or set a component's visibility. Orthogonal to position
    /// state and allowed mid-animation.
    pub fn set_visible(&mut self, id: ComponentId, visible: bool) {
        self.group_mut(id).visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_indexed_by_id() {
        let scene = CassetteScene::new(&Dimensions::default());
        for id in ComponentId::ALL {
            assert_eq!(scene.group(id).id, id);
        }
    }

    #[test]
    fn test_initial_positions_applied() {
        let scene = CassetteScene::new(&Dimensions::default());
        assert!((scene.group(ComponentId::SliderRight).position.x - 18.25).abs() < 1e-5);
        assert!((scene.group(ComponentId::Cap).position.y - 20.0).abs() < 1e-5);
        assert_eq!(scene.group(ComponentId::Base).position, Vec3::ZERO);
    }

    #[test]
    fn test_visibility_toggle_is_independent() {
        let mut scene = CassetteScene::new(&Dimensions::default());
        scene.set_visible(ComponentId::Cap, false);
        assert!(!scene.group(ComponentId::Cap).visible);
        assert!(scene.group(ComponentId::Base).visible);
        assert_eq!(scene.visible_groups().count(), 5);
    }

    #[test]
    fn test_reset_restores_cap_visibility() {
        let mut scene = CassetteScene::new(&Dimensions::default());
        scene.set_visible(ComponentId::Cap, false);
        scene.reset();
        assert!(scene.group(ComponentId::Cap).visible);
    }

    #[test]
    fn test_labels_are_stable_display_strings() {
        assert_eq!(ComponentId::Cap.label(), "Top Cap");
        assert_eq!(ComponentId::SliderLeft.label(), "Slider Cart (L)");
    }
}
