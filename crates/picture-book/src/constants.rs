//! Shared constants for book generation
//!
//! Page geometry fractions, font sizes and artifact names used while
//! building the book live here.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Output
// =============================================================================

/// Base name of the assembled book; prefixed with the paper size
pub const OUTPUT_BASE_NAME: &str = "Chronological picture selection.pdf";

/// JPEG quality used when re-encoding resized images
pub const JPEG_QUALITY: u8 = 75;

// =============================================================================
// Front Matter
// =============================================================================

/// Artifact names; the numeric prefixes sort ahead of every content page
pub const TITLE_ARTIFACT: &str = "0000_title.pdf";
pub const COPYRIGHT_ARTIFACT: &str = "0001_copyright.pdf";
pub const PREFACE_ARTIFACT: &str = "0002_preface.pdf";

/// Unscaled font sizes (points) for A4
pub const SMALL_FONT_SIZE: f32 = 16.0;
pub const MEDIUM_FONT_SIZE: f32 = 24.0;
pub const LARGE_FONT_SIZE: f32 = 40.0;

/// Unscaled distance between subtitle baselines (points)
pub const SUBTITLE_LINE_SPACING: f32 = 25.0;

/// Leading as a multiple of font size for paragraph text
pub const PARAGRAPH_LEADING: f32 = 1.2;

/// Left margin of paragraph text as a fraction of page width
pub const LEFT_MARGIN_RATIO: f32 = 0.15;

/// Baselines as fractions of page height, measured from the bottom
pub const TITLE_BASELINE_RATIO: f32 = 0.9;
pub const SUBTITLE_BASELINE_RATIO: f32 = 0.15;
pub const COPYRIGHT_BASELINE_RATIO: f32 = 0.9;
pub const PREFACE_BASELINE_RATIO: f32 = 0.75;

/// Title image size as a fraction of the page, and its bottom edge
pub const TITLE_IMAGE_SCALE: f32 = 0.6;
pub const TITLE_IMAGE_BOTTOM_RATIO: f32 = 0.2;

/// Blank lines between the two blocks of a paragraph page
pub const BLOCK_SEPARATOR: &str = "\n\n\n";

// =============================================================================
// Text Metrics
// =============================================================================

/// Approximate character width ratios for the built-in fonts
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;
pub const TIMES_CHAR_WIDTH_RATIO: f32 = 0.45;
pub const COURIER_CHAR_WIDTH_RATIO: f32 = 0.6;
