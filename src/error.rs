//! Error types for wisp.
//!
//! The simulation itself never fails at runtime: bad geometry just skips a
//! frame. Errors only come from building a field with invalid tunables and
//! from bringing up the window and GPU.

use thiserror::Error;

/// Invalid [`FieldConfig`](crate::FieldConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The field needs at least one particle.
    #[error("base_count must be at least 1")]
    EmptyField,
    /// Caps must be ordered `base_count <= soft_cap <= hard_cap`.
    #[error("caps out of order: base_count {base}, soft_cap {soft}, hard_cap {hard}")]
    CapsOutOfOrder {
        /// Configured base count.
        base: usize,
        /// Configured soft cap.
        soft: usize,
        /// Configured hard cap.
        hard: usize,
    },
    /// A value that must be strictly positive was zero, negative or NaN.
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A value that must lie in a range fell outside it.
    #[error("{name} must be within {min}..={max}, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },
    /// The particle radius range is empty.
    #[error("radius_range {min}..{max} is empty")]
    EmptyRadiusRange {
        /// Range start.
        min: f32,
        /// Range end.
        max: f32,
    },
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a WebGPU/Vulkan/Metal/DX12 capable GPU is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture format.
    #[error("surface supports no texture formats on this adapter")]
    NoSurfaceFormat,
}

/// Errors that can occur when running the viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The field configuration was rejected.
    #[error("invalid field configuration: {0}")]
    Config(#[from] ConfigError),
}
