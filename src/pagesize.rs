//! Page sizes used by the renderer.
//!
//! Sizes are given in portrait orientation as `(width, height)`.

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

/// ISO A4, rounded to the two decimals printed exam papers have always used
pub const A4: PageSize = (Pt(595.28), Pt(841.89));
