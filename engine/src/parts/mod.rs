//! Compound Part Builders
//!
//! One builder per cassette component. Each returns a
//! [`crate::scene::ComponentGroup`] of flat-colored solids in the
//! component's own object space; the scene seats the groups with the
//! placement policy.

pub mod base;
pub mod cap;
pub mod chip;
pub mod materials;
pub mod slider;

pub use materials::MaterialId;
