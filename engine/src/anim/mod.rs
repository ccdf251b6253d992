//! Assembly Animation
//!
//! Position animations are explicit interpolation tasks: a [`Glide`]
//! records start, target, start time and duration; the
//! [`AnimationTable`] holds at most one task per component. Issuing a
//! new task for a component that is already animating replaces the
//! table entry, with the new start captured from wherever the component
//! currently is. That overwrite is the contract, not a race: there is
//! no cancellation primitive.
//!
//! Time is plain seconds passed in by the caller, so the driver is the
//! frame loop in the viewer and a bare counter in tests. Progress is
//! computed from elapsed wall-clock time, never frame counts, so the
//! duration holds at any frame rate.

use std::collections::HashMap;

use glam::Vec3;

use crate::scene::ComponentId;

/// Fixed duration of every assembly animation, in seconds.
pub const GLIDE_DURATION: f64 = 1.0;

/// Ease-out quartic: fast start, long settle.
///
/// `t` is clamped to 0..1; returns `1 - (1 - t)^4`.
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// One in-flight position animation.
#[derive(Debug, Clone, Copy)]
pub struct Glide {
    pub start: Vec3,
    pub target: Vec3,
    pub started_at: f64,
    pub duration: f64,
}

impl Glide {
    /// Linear progress 0..1 at time `now`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    /// Eased position at time `now`.
    pub fn sample(&self, now: f64) -> Vec3 {
        let eased = ease_out_quart(self.progress(now)) as f32;
        self.start.lerp(self.target, eased)
    }

    pub fn is_done(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

/// The per-component animation task table.
///
/// Occupancy is the in-flight count: trigger controls are disabled
/// while it is nonzero and re-enabled when it drains back to zero.
#[derive(Debug, Default)]
pub struct AnimationTable {
    tasks: HashMap<ComponentId, Glide>,
}

impl AnimationTable {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Number of animations currently in flight.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Start (or replace) an animation for `id`, gliding from `start`
    /// to `target` over [`GLIDE_DURATION`].
    pub fn start(&mut self, id: ComponentId, start: Vec3, target: Vec3, now: f64) {
        self.tasks.insert(
            id,
            Glide {
                start,
                target,
                started_at: now,
                duration: GLIDE_DURATION,
            },
        );
    }

    /// Advance every task to time `now`.
    ///
    /// Calls `apply(id, position)` for each task with its sampled
    /// position; completed tasks are applied at exactly their target
    /// and removed.
    pub fn tick(&mut self, now: f64, mut apply: impl FnMut(ComponentId, Vec3)) {
        let mut done = Vec::new();
        for (&id, glide) in &self.tasks {
            apply(id, glide.sample(now));
            if glide.is_done(now) {
                done.push(id);
            }
        }
        for id in done {
            self.tasks.remove(&id);
        }
    }

    /// The task for `id`, if one is in flight.
    pub fn get(&self, id: ComponentId) -> Option<&Glide> {
        self.tasks.get(&id)
    }
}
