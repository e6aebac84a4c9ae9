//! # Diagram Overlay
//!
//! Reads SVG diagrams whose entity groups are tagged with an identifying
//! attribute, and draws decorated hulls and labels back over them.
//!
//! - [`Diagram`] indexes entity groups and their document-space bounding boxes
//! - [`render`] turns a hull path into jittered translucent layers and labels
//! - [`compose`] places the rendered groups into a base document or emits fragments
//!
//! ```rust
//! use overlay::Diagram;
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
//!   <g data-entity="Luca">
//!     <rect x="0" y="0" width="10" height="10"/>
//!     <rect x="50" y="0" width="10" height="10"/>
//!     <rect x="20" y="40" width="10" height="10"/>
//!   </g>
//! </svg>"#;
//!
//! let diagram = Diagram::parse(svg, overlay::DEFAULT_ID_ATTRIBUTE)?;
//! let points = diagram.groups_by_names(&["Luca"]);
//! assert_eq!(points.len(), 3);
//! # Ok::<(), overlay::OverlayError>(())
//! ```

pub mod compose;
pub mod diagram;
pub mod document;
pub mod error;
pub mod render;

pub use compose::{RenderResult, compose};
pub use diagram::{DEFAULT_ID_ATTRIBUTE, Diagram, ElementKind, ElementRecord, EntityGroup, name_matches};
pub use document::{Element, Node, SvgDocument};
pub use error::{OverlayError, Result};
pub use render::{LabelPlacer, LabelStyle, Layer, RenderStyle, Rgb, label_element, render_layers};
