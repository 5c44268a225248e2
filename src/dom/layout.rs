use crate::foundation::core::{Rect, Size, Vec2};

/// Auto-placement mode for the children of a container.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub enum LayoutMode {
    /// Children keep the origin of the container.
    #[default]
    Absolute,
    /// Horizontal stack from left to right.
    HStack,
    /// Vertical stack from top to bottom.
    VStack,
    /// Uniform grid.
    Grid,
    /// Center each child in the container.
    Center,
}

/// Padding edges in pixels.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Edges {
    /// Left padding.
    #[serde(default)]
    pub left: f64,
    /// Right padding.
    #[serde(default)]
    pub right: f64,
    /// Top padding.
    #[serde(default)]
    pub top: f64,
    /// Bottom padding.
    #[serde(default)]
    pub bottom: f64,
}

impl Edges {
    /// Same padding on every side.
    pub fn all(px: f64) -> Self {
        Self {
            left: px,
            right: px,
            top: px,
            bottom: px,
        }
    }
}

/// Alignment of content inside its available box.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub enum Align {
    /// Left or top.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Right or bottom.
    End,
}

/// Container layout rules.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct BoxLayout {
    /// Placement mode.
    #[serde(default)]
    pub mode: LayoutMode,
    /// Gap between items in stack/grid layouts.
    #[serde(default)]
    pub gap_px: f64,
    /// Padding inside the container.
    #[serde(default)]
    pub padding: Edges,
    /// Horizontal alignment.
    #[serde(default)]
    pub align_x: Align,
    /// Vertical alignment.
    #[serde(default)]
    pub align_y: Align,
    /// Column count for grid layout.
    #[serde(default = "default_grid_columns")]
    pub grid_columns: u32,
}

fn default_grid_columns() -> u32 {
    2
}

impl BoxLayout {
    /// Layout with `mode` and otherwise default rules.
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            gap_px: 0.0,
            padding: Edges::default(),
            align_x: Align::Start,
            align_y: Align::Start,
            grid_columns: default_grid_columns(),
        }
    }

    /// Set the gap.
    pub fn gap(mut self, px: f64) -> Self {
        self.gap_px = px;
        self
    }

    /// Set the padding.
    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Set both alignments.
    pub fn align(mut self, x: Align, y: Align) -> Self {
        self.align_x = x;
        self.align_y = y;
        self
    }

    /// Set grid column count.
    pub fn columns(mut self, columns: u32) -> Self {
        self.grid_columns = columns;
        self
    }
}

/// Place children of the given sizes inside `container`.
pub fn resolve_child_rects(container: Rect, sizes: &[Size], layout: &BoxLayout) -> Vec<Rect> {
    let origin = Vec2::new(container.x0, container.y0);
    let mut offsets = vec![Vec2::new(0.0, 0.0); sizes.len()];
    if layout.mode == LayoutMode::Absolute || sizes.is_empty() {
        return place(origin, &offsets, sizes);
    }

    let x0 = layout.padding.left;
    let y0 = layout.padding.top;
    let avail_w = (container.width() - layout.padding.left - layout.padding.right).max(0.0);
    let avail_h = (container.height() - layout.padding.top - layout.padding.bottom).max(0.0);

    match layout.mode {
        LayoutMode::Absolute => {}
        LayoutMode::Center => {
            for (idx, s) in sizes.iter().enumerate() {
                offsets[idx] = Vec2::new(
                    x0 + align_offset(avail_w, s.width, Align::Center),
                    y0 + align_offset(avail_h, s.height, Align::Center),
                );
            }
        }
        LayoutMode::HStack => {
            let total_w = sizes.iter().map(|s| s.width).sum::<f64>()
                + (sizes.len().saturating_sub(1) as f64) * layout.gap_px;
            let mut x = x0 + align_offset(avail_w, total_w, layout.align_x);
            for (idx, s) in sizes.iter().enumerate() {
                let y = y0 + align_offset(avail_h, s.height, layout.align_y);
                offsets[idx] = Vec2::new(x, y);
                x += s.width + layout.gap_px;
            }
        }
        LayoutMode::VStack => {
            let total_h = sizes.iter().map(|s| s.height).sum::<f64>()
                + (sizes.len().saturating_sub(1) as f64) * layout.gap_px;
            let mut y = y0 + align_offset(avail_h, total_h, layout.align_y);
            for (idx, s) in sizes.iter().enumerate() {
                let x = x0 + align_offset(avail_w, s.width, layout.align_x);
                offsets[idx] = Vec2::new(x, y);
                y += s.height + layout.gap_px;
            }
        }
        LayoutMode::Grid => {
            let cols = usize::try_from(layout.grid_columns.max(1)).unwrap_or(1);
            let cell_w = sizes.iter().map(|s| s.width).fold(0.0, f64::max);
            let cell_h = sizes.iter().map(|s| s.height).fold(0.0, f64::max);
            for (idx, s) in sizes.iter().enumerate() {
                let row = idx / cols;
                let col = idx % cols;
                let base_x = x0 + (col as f64) * (cell_w + layout.gap_px);
                let base_y = y0 + (row as f64) * (cell_h + layout.gap_px);
                offsets[idx] = Vec2::new(
                    base_x + align_offset(cell_w, s.width, layout.align_x),
                    base_y + align_offset(cell_h, s.height, layout.align_y),
                );
            }
        }
    }
    place(origin, &offsets, sizes)
}

fn place(origin: Vec2, offsets: &[Vec2], sizes: &[Size]) -> Vec<Rect> {
    offsets
        .iter()
        .zip(sizes)
        .map(|(off, size)| {
            let p = (origin + *off).to_point();
            Rect::from_origin_size(p, *size)
        })
        .collect()
}

fn align_offset(container: f64, content: f64, align: Align) -> f64 {
    let rem = (container - content).max(0.0);
    match align {
        Align::Start => 0.0,
        Align::Center => rem * 0.5,
        Align::End => rem,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/layout.rs"]
mod tests;
