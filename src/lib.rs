#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod config;
mod derive;
mod errors;
mod geometry;
mod import;
mod model;
mod pipeline;
mod report;
mod scene;

pub use config::SceneConfig;
pub use derive::{derive_link_geometry, DerivationSummary};
pub use errors::{ConfigError, ModelEditError, ParseError};
pub use geometry::{point, Vector2D};
pub use import::{ImportOutcome, Importer, LineDiagnostic, LineKind};
pub use model::{Link, Material, Node, TrussModel};
pub use pipeline::{process_lines, PipelineOutput};
pub use report::{render_report, LongestLink, ReportFormatter, TrussReport};
pub use scene::{JsonSceneSink, LinkSegment, NodeMarker, Rect, Scene, SceneSink, Segment};
