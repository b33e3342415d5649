//! Shader Source & Uniform Layout Tests
//!
//! Tests for:
//! - Embedded provider lookup by identifier and stage
//! - The source contract: entry points, attribute locations, uniform
//!   field names
//! - Uniform block layout matching the WGSL struct

use std::mem;

use gyre::renderer::pipeline::{MODEL_VIEW_OFFSET, SceneUniforms};
use gyre::renderer::sources::{
    EmbeddedShaders, SCENE_SHADER_ID, ShaderSources, ShaderStage,
};

// ============================================================================
// Embedded Provider
// ============================================================================

#[test]
fn vertex_source_honours_the_contract() {
    let source = EmbeddedShaders
        .source(SCENE_SHADER_ID, ShaderStage::Vertex)
        .expect("vertex source is embedded");

    assert!(source.contains("vs_main"));
    assert!(source.contains("projection"));
    assert!(source.contains("model_view"));
    assert!(source.contains("@location(0) position"));
    assert!(source.contains("@location(1) color"));
}

#[test]
fn fragment_source_honours_the_contract() {
    let source = EmbeddedShaders
        .source(SCENE_SHADER_ID, ShaderStage::Fragment)
        .expect("fragment source is embedded");

    assert!(source.contains("fs_main"));
    assert!(source.contains("@location(0) color"));
}

#[test]
fn unknown_identifier_has_no_source() {
    assert!(EmbeddedShaders.source("skybox", ShaderStage::Vertex).is_none());
    assert!(EmbeddedShaders.source("", ShaderStage::Fragment).is_none());
}

// ============================================================================
// Stage Naming
// ============================================================================

#[test]
fn stage_display_names() {
    assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
    assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
}

#[test]
fn stage_file_suffixes() {
    assert_eq!(ShaderStage::Vertex.suffix(), "vert");
    assert_eq!(ShaderStage::Fragment.suffix(), "frag");
}

// ============================================================================
// Uniform Layout
// ============================================================================

#[test]
fn uniform_block_is_two_matrices() {
    assert_eq!(mem::size_of::<SceneUniforms>(), 128);
}

#[test]
fn model_view_sits_after_the_projection() {
    assert_eq!(MODEL_VIEW_OFFSET, 64);
}

#[test]
fn uniform_block_casts_to_bytes() {
    let uniforms = SceneUniforms {
        projection: glam::Mat4::IDENTITY.to_cols_array_2d(),
        model_view: glam::Mat4::IDENTITY.to_cols_array_2d(),
    };
    assert_eq!(bytemuck::bytes_of(&uniforms).len(), 128);
}
