//! Pure math/data shared by the Floatmode panel: points, sizes, visual layer
//! values, and the geometry snapshot the layout host feeds to the panel.

mod geometry;

pub use geometry::{GraphicsLayer, PanelGeometry, Point, Size};
