use crate::units::Pt;

/// Margins are used when laying out objects on a page. Nothing prevents a
/// draw operation from landing outside them (footers and watermarks do); the
/// margins give the page flow its top line and its bottom limit, and define
/// the `ArtBox` of each page in the generated PDF
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// The margins every exam page is laid out with: text starts at 800pt
    /// from the bottom, runs from x = 50 to x = 560, and stays clear of the
    /// footer band below 60pt
    pub fn exam_paper() -> Margins {
        Margins::trbl(Pt(41.89), Pt(35.28), Pt(60.0), Pt(50.0))
    }
}
