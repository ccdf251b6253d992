//! Shader Tests - WGSL Validation
//!
//! Parses and validates the shipped shader with naga so a bad edit
//! fails in `cargo test` instead of at pipeline creation.

use naga::valid::{Capabilities, ValidationFlags, Validator};

const CASSETTE_SHADER: &str = include_str!("../../shaders/cassette.wgsl");

#[test]
fn test_cassette_shader_parses_and_validates() {
    let module = naga::front::wgsl::parse_str(CASSETTE_SHADER)
        .expect("cassette.wgsl should parse as WGSL");

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .expect("cassette.wgsl should pass validation");
}

#[test]
fn test_cassette_shader_entry_points() {
    let module = naga::front::wgsl::parse_str(CASSETTE_SHADER).unwrap();
    let names: Vec<&str> = module
        .entry_points
        .iter()
        .map(|ep| ep.name.as_str())
        .collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}
