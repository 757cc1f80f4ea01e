//! Image probing in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` (header only) |
//! | **Probe album** | `rayon` parallel map over photos |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Probe**: [`probe_images`], which records each photo's size or marks it
//!   unavailable so layout can reserve a placeholder

pub mod backend;
mod probe;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use probe::{ProbeSummary, probe_images, resolve_image_path};
pub use rust_backend::RustBackend;
