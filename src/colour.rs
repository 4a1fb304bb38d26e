/// A colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub const fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub const fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }
}

/// The palette used across exam documents
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    /// Borders, section headers and the cover badge text
    pub const NAVY: Colour = Colour::new_rgb(0.2, 0.2, 0.6);
    /// Report and instruction headings
    pub const DEEP_BLUE: Colour = Colour::new_rgb(0.0, 0.0, 0.5);
    /// Question metadata lines
    pub const SLATE: Colour = Colour::new_grey(0.3);
    /// Footers and secondary cover text
    pub const MUTED: Colour = Colour::new_grey(0.4);
    /// Watermarks and placeholder boxes
    pub const FAINT: Colour = Colour::new_grey(0.8);
    /// Ruled answer lines on student papers
    pub const RULE: Colour = Colour::new_grey(0.75);
    /// Translated text under the primary language
    pub const TRANSLATION: Colour = Colour::new_grey(0.25);
    pub const SOLUTION_GREEN: Colour = Colour::new_rgb(0.0, 0.5, 0.0);
    pub const ANSWER_KEY_GREEN: Colour = Colour::new_rgb(0.0, 0.4, 0.0);
    pub const ANSWER_RED: Colour = Colour::new_rgb(0.6, 0.0, 0.0);
    pub const TEACHER_BADGE: Colour = Colour::new_rgb(0.9, 0.95, 1.0);
    pub const STUDENT_BADGE: Colour = Colour::new_rgb(0.95, 0.9, 0.95);
    pub const BADGE_BORDER: Colour = Colour::new_rgb(0.6, 0.6, 0.8);
    pub const BAR_FILL: Colour = Colour::new_rgb(0.55, 0.65, 0.9);
}
