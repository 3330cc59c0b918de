//! Geometry ingestion and view transforms for plotting free-form vertex
//! text: parse text into vertex sets, aggregate them into plot data, and
//! map world coordinates into a 2D viewport or an orthographic 3D view.

pub mod camera;
pub mod error;
pub mod geom;
pub mod model;
pub mod notation;
pub mod parser;
pub mod report;
pub mod viewport;

pub use camera::OrthoCamera;
pub use error::{GeometryError, Result};
pub use geom::{BBox2, BBox3, Vec2, Vec3};
pub use model::{Face, PlotData, Segment, SetId, VertexRef, VertexSet};
pub use parser::{parse, parse_with, ParseError, ParseErrorKind, ParseOptions, ParseOutput};
pub use viewport::{ScreenTransform, ViewOptions, ViewSize, Viewport};
