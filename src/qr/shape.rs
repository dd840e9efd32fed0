//! Module and finder-pattern geometry shared by the SVG and PNG writers.

use std::fmt::Write;

use super::config::{DotStyle, EyeStyle};

/// Side of a finder pattern in modules.
pub const EYE_MODULES: usize = 7;

/// Axis-aligned rectangle with an independent radius per corner,
/// clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub radii: [f64; 4],
}

impl RoundedRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64, radii: [f64; 4]) -> Self {
        let limit = w.min(h) / 2.0;
        Self {
            x,
            y,
            w,
            h,
            radii: radii.map(|r| r.clamp(0.0, limit)),
        }
    }

    pub fn uniform(x: f64, y: f64, side: f64, radius: f64) -> Self {
        Self::new(x, y, side, side, [radius; 4])
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (x0, y0, x1, y1) = (self.x, self.y, self.x + self.w, self.y + self.h);
        if px < x0 || px > x1 || py < y0 || py > y1 {
            return false;
        }

        let [tl, tr, br, bl] = self.radii;
        let corners = [
            (tl, px < x0 + tl && py < y0 + tl, x0 + tl, y0 + tl),
            (tr, px > x1 - tr && py < y0 + tr, x1 - tr, y0 + tr),
            (br, px > x1 - br && py > y1 - br, x1 - br, y1 - br),
            (bl, px < x0 + bl && py > y1 - bl, x0 + bl, y1 - bl),
        ];
        for (r, in_corner, cx, cy) in corners {
            if r > 0.0 && in_corner {
                let (dx, dy) = (px - cx, py - cy);
                return dx * dx + dy * dy <= r * r;
            }
        }
        true
    }

    /// Appends this shape as a closed SVG subpath.
    pub fn write_path(&self, d: &mut String) {
        let (x0, y0, x1, y1) = (self.x, self.y, self.x + self.w, self.y + self.h);
        let [tl, tr, br, bl] = self.radii;
        // Writing into a String cannot fail.
        let _ = write!(
            d,
            "M{:.2} {:.2}H{:.2}A{:.2} {:.2} 0 0 1 {:.2} {:.2}V{:.2}A{:.2} {:.2} 0 0 1 {:.2} {:.2}H{:.2}A{:.2} {:.2} 0 0 1 {:.2} {:.2}V{:.2}A{:.2} {:.2} 0 0 1 {:.2} {:.2}Z",
            x0 + tl, y0,
            x1 - tr,
            tr, tr, x1, y0 + tr,
            y1 - br,
            br, br, x1 - br, y1,
            x0 + bl,
            bl, bl, x0, y1 - bl,
            y0 + tl,
            tl, tl, x0 + tl, y0,
        );
    }
}

/// Shape of one data module drawn in the cell at `(x, y)`.
pub fn dot_shape(style: DotStyle, x: f64, y: f64, cell: f64) -> RoundedRect {
    match style {
        DotStyle::Square => RoundedRect::uniform(x, y, cell, 0.0),
        DotStyle::Rounded => RoundedRect::uniform(x, y, cell, cell * 0.25),
        DotStyle::ExtraRounded => RoundedRect::uniform(x, y, cell, cell * 0.4),
        DotStyle::Dots => {
            let inset = cell * 0.05;
            let side = cell - 2.0 * inset;
            RoundedRect::uniform(x + inset, y + inset, side, side / 2.0)
        }
        DotStyle::Classy => RoundedRect::new(x, y, cell, cell, [cell * 0.5, 0.0, cell * 0.5, 0.0]),
        DotStyle::ClassyRounded => RoundedRect::new(
            x,
            y,
            cell,
            cell,
            [cell * 0.5, cell * 0.15, cell * 0.5, cell * 0.15],
        ),
    }
}

/// A finder pattern: outer ring with a hole, plus a center square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eye {
    pub outer: RoundedRect,
    pub hole: RoundedRect,
    pub center: RoundedRect,
}

impl Eye {
    /// Builds the eye whose top-left corner is at `(x, y)`.
    pub fn new(style: EyeStyle, x: f64, y: f64, cell: f64) -> Self {
        let (outer_r, hole_r, center_r) = match style {
            EyeStyle::Square => (0.0, 0.0, 0.0),
            EyeStyle::ExtraRounded => (cell * 2.5, cell * 1.5, 0.0),
            EyeStyle::Dot => (cell * 3.5, cell * 2.5, cell * 1.5),
        };
        Self {
            outer: RoundedRect::uniform(x, y, cell * 7.0, outer_r),
            hole: RoundedRect::uniform(x + cell, y + cell, cell * 5.0, hole_r),
            center: RoundedRect::uniform(x + cell * 2.0, y + cell * 2.0, cell * 3.0, center_r),
        }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        (self.outer.contains(px, py) && !self.hole.contains(px, py)) || self.center.contains(px, py)
    }

    /// SVG path data for the ring; draw with `fill-rule="evenodd"`.
    pub fn ring_path(&self) -> String {
        let mut d = String::new();
        self.outer.write_path(&mut d);
        self.hole.write_path(&mut d);
        d
    }

    pub fn center_path(&self) -> String {
        let mut d = String::new();
        self.center.write_path(&mut d);
        d
    }
}

/// Top-left module coordinates of the three finder patterns.
pub fn eye_origins(width: usize) -> [(usize, usize); 3] {
    let far = width.saturating_sub(EYE_MODULES);
    [(0, 0), (far, 0), (0, far)]
}

/// Whether module `(mx, my)` belongs to a finder pattern.
pub fn is_eye_module(width: usize, mx: usize, my: usize) -> bool {
    eye_origins(width)
        .iter()
        .any(|&(ex, ey)| mx >= ex && mx < ex + EYE_MODULES && my >= ey && my < ey + EYE_MODULES)
}
