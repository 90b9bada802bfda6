//! Geometric primitives: Point, Size, GraphicsLayer, PanelGeometry

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

/// Visual transform values the rendering layer applies to the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicsLayer {
    pub alpha: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub translation_x: f32,
    pub translation_y: f32,
}

impl Default for GraphicsLayer {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            translation_x: 0.0,
            translation_y: 0.0,
        }
    }
}

impl GraphicsLayer {
    /// Uniform scale, as used by the minimize/maximize poses.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale_x = scale;
        self.scale_y = scale;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_translation_x(mut self, x: f32) -> Self {
        self.translation_x = x;
        self
    }

    pub fn with_translation_y(mut self, y: f32) -> Self {
        self.translation_y = y;
        self
    }
}

/// Laid-out position of the panel inside its container, as last reported by
/// the layout host. All values are in container coordinates.
///
/// `container_height` is `None` while the panel is not attached to a parent;
/// hide-target math degrades gracefully in that case.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PanelGeometry {
    pub top: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
    pub container_height: Option<f32>,
}

impl PanelGeometry {
    pub fn new(top: f32, bottom: f32, width: f32, container_height: f32) -> Self {
        Self {
            top,
            bottom,
            width,
            height: bottom - top,
            container_height: Some(container_height),
        }
    }

    /// Geometry for a panel with no parent container.
    pub fn detached(width: f32, height: f32) -> Self {
        Self {
            top: 0.0,
            bottom: height,
            width,
            height,
            container_height: None,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Shift the laid-out position vertically, keeping the height.
    pub fn offset_vertically(&mut self, dy: f32) {
        self.top += dy;
        self.bottom += dy;
    }
}
