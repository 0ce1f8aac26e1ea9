//! Image processing, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Target size** | [`calculate_target_dimensions`] (integer math, no I/O) |
//! | **Resize → JPEG/PNG** | Lanczos3 + `image` encoders |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{Dimensions, PolicyError, SizingPolicy, calculate_target_dimensions};
pub use operations::{ResizeSettings, get_dimensions, plan_resize};
pub use params::{Quality, ResampleFilter, ResizeParams};
pub use rust_backend::RustBackend;
