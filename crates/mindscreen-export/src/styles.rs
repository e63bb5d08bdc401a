use printpdf::BuiltinFont;
use serde::{Deserialize, Serialize};

/// PDF base-14 font families usable without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    pub fn regular(self) -> BuiltinFont {
        match self {
            FontFamily::Helvetica => BuiltinFont::Helvetica,
            FontFamily::Times => BuiltinFont::TimesRoman,
            FontFamily::Courier => BuiltinFont::Courier,
        }
    }

    pub fn bold(self) -> BuiltinFont {
        match self {
            FontFamily::Helvetica => BuiltinFont::HelveticaBold,
            FontFamily::Times => BuiltinFont::TimesBold,
            FontFamily::Courier => BuiltinFont::CourierBold,
        }
    }
}

/// Document styling configuration for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text.
    pub body_font: FontFamily,

    /// Font for headings, always set bold.
    pub heading_font: FontFamily,

    /// Body text font size in points.
    pub body_size: f32,

    /// Heading 1 font size in points.
    pub heading1_size: f32,

    /// Heading 2 font size in points.
    pub heading2_size: f32,

    /// Footer (disclaimer) font size in points.
    pub footer_size: f32,

    /// Page margin in millimetres (applied uniformly).
    pub margin_mm: f32,

    /// Page width in millimetres.
    pub page_width_mm: f32,

    /// Page height in millimetres.
    pub page_height_mm: f32,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        // A4
        Self {
            body_font: FontFamily::Helvetica,
            heading_font: FontFamily::Helvetica,
            body_size: 11.0,
            heading1_size: 16.0,
            heading2_size: 13.0,
            footer_size: 9.0,
            margin_mm: 20.0,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
        }
    }
}
