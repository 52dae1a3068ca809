//! SceneForge Export Pipeline
//!
//! Converts an in-memory scene description into the versioned,
//! cross-referenced JSON document consumed by a web-oriented 3D runtime:
//! - recursive scene-graph walk with inclusion filters and progress
//! - content-addressed deduplication of shared geometries and materials
//! - capability-driven face-array encoding (eight layouts)
//! - left-handed to right-handed coordinate conversion
//! - texture asset materialization (copy or PNG re-encode)

pub mod convert;
pub mod textures;
pub mod three;
pub mod traits;

pub use textures::FileMaterializer;
pub use three::exporter::{ExportError, ExportOptions, Exporter};
pub use three::Document;
pub use traits::{AssetMaterializer, FsTextSink, LogProgress, NullProgress, ProgressSink, TextSink};
