//! Cassette Engine Library
//!
//! Core library for the cassette assembly visualizer. Builds a parametric
//! solid model of a microfluidic cassette (base, microchip, slider carts,
//! top cap) from a fixed dimension table, composes it with boolean solid
//! geometry, and drives the assembly animation and scene export.
//!
//! # Modules
//!
//! - [`dims`] - The dimension table parametrizing every shape
//! - [`mesh`] - Triangle mesh core (vertices, transforms, triangulation)
//! - [`solid`] - Primitive solid builders (boxes, cylinders, extrusions)
//! - [`csg`] - BSP-tree boolean evaluator (union / subtract)
//! - [`parts`] - Compound part builders for each cassette component
//! - [`scene`] - Component groups, poses, and the scene session object
//! - [`anim`] - Eased interpolation tasks for the assembly sequence
//! - [`camera`] - Orbit camera with inertial damping
//! - [`view_state`] - Persisted camera state (JSON on disk)
//! - [`export`] - PLY / GLB / HTML snapshot export of the visible scene
//!
//! # Example
//!
//! ```no_run
//! use cassette_engine::dims::Dimensions;
//! use cassette_engine::scene::CassetteScene;
//!
//! let mut scene = CassetteScene::new(&Dimensions::default());
//!
//! // Slide both needle carts home, then drop the cap.
//! scene.lock_sliders(0.0);
//! scene.tick(1.0);
//! scene.assemble_cap(1.0);
//! scene.tick(2.0);
//!
//! // Export whatever is currently visible.
//! let ply = cassette_engine::export::ply::to_ply_string(&scene);
//! ```

pub mod anim;
pub mod camera;
pub mod csg;
pub mod dims;
pub mod export;
pub mod mesh;
pub mod parts;
pub mod scene;
pub mod solid;
pub mod view_state;

// Re-export the types most callers need at crate level for convenience
pub use dims::Dimensions;
pub use mesh::{MeshVertex, TriMesh};
pub use scene::{CassetteScene, ComponentGroup, ComponentId};
