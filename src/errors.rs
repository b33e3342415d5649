//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`GyreError`] covers all failure modes including:
//! - GPU context acquisition failures
//! - Shader compilation and pipeline linking errors
//! - Surface and event loop errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, GyreError>`.

use thiserror::Error;

use crate::renderer::sources::ShaderStage;

/// The main error type for the Gyre renderer.
///
/// Each variant provides specific context about what went wrong.
/// Startup errors abort the initialization sequence at the point of
/// occurrence; no later component is initialized.
#[derive(Error, Debug)]
pub enum GyreError {
    // ========================================================================
    // GPU Context Errors
    // ========================================================================
    /// Every backend alias in the priority list failed to yield a
    /// usable rendering context.
    #[error("no usable GPU context: all backend aliases exhausted")]
    NoGpuContext,

    /// Failed to create the GPU device after an adapter was selected.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Window system error.
    #[error("Window system error: {0}")]
    WindowError(#[from] raw_window_handle::HandleError),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    // ========================================================================
    // Shader & Pipeline Errors
    // ========================================================================
    /// The shader source provider had no source for the requested
    /// identifier and stage.
    #[error("shader source not found: '{id}' ({stage})")]
    ShaderSourceMissing {
        /// Identifier the source was requested under
        id: String,
        /// Requested shader stage
        stage: ShaderStage,
    },

    /// A shader stage failed validation during module creation.
    #[error("{stage} shader '{id}' failed to compile: {message}")]
    ShaderCompileFailed {
        /// Identifier of the failed shader
        id: String,
        /// Stage that failed
        stage: ShaderStage,
        /// Compiler diagnostic
        message: String,
    },

    /// The compiled stages could not be linked into a render pipeline.
    #[error("could not initialise shader pipeline: {0}")]
    PipelineLinkFailed(String),

    // ========================================================================
    // Frame Errors
    // ========================================================================
    /// The surface could not deliver a frame and cannot recover.
    #[error("surface frame acquisition failed: {0}")]
    FrameAcquireFailed(String),
}

/// Alias for `Result<T, GyreError>`.
pub type Result<T> = std::result::Result<T, GyreError>;
