use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to assemble")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, BookError>;

/// Supported paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    A6,
}

impl PaperSize {
    pub const ALL: [PaperSize; 3] = [PaperSize::A4, PaperSize::A5, PaperSize::A6];

    /// Parse a paper-size choice. Anything unrecognized resolves to A4.
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim().to_ascii_uppercase().as_str() {
            "A5" => PaperSize::A5,
            "A6" => PaperSize::A6,
            _ => PaperSize::A4,
        }
    }

    /// Portrait dimensions in millimeters
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::A6 => (105.0, 148.0),
        }
    }

    /// Divisor applied to every font size so text shrinks with the page
    pub fn font_scaling(self) -> f32 {
        match self {
            PaperSize::A4 => 1.0,
            PaperSize::A5 => 1.5,
            PaperSize::A6 => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::A6 => "A6",
        }
    }
}

impl From<String> for PaperSize {
    fn from(value: String) -> Self {
        Self::from_choice(&value)
    }
}

impl From<PaperSize> for String {
    fn from(value: PaperSize) -> Self {
        value.name().to_string()
    }
}

/// Output image quality (300, 150 and 75 dpi)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Quality {
    #[default]
    High,
    Medium,
    Low,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::High, Quality::Medium, Quality::Low];

    /// Parse a quality choice. Anything unrecognized resolves to `High`.
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim().to_ascii_uppercase().as_str() {
            "M" => Quality::Medium,
            "L" => Quality::Low,
            _ => Quality::High,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Quality::High => "H",
            Quality::Medium => "M",
            Quality::Low => "L",
        }
    }

    pub fn dpi(self) -> u32 {
        match self {
            Quality::High => 300,
            Quality::Medium => 150,
            Quality::Low => 75,
        }
    }
}

impl From<String> for Quality {
    fn from(value: String) -> Self {
        Self::from_choice(&value)
    }
}

impl From<Quality> for String {
    fn from(value: Quality) -> Self {
        value.code().to_string()
    }
}

/// Built-in PDF fonts usable for the front matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum FontChoice {
    #[default]
    Helvetica,
    TimesRoman,
    Courier,
}

impl FontChoice {
    /// Parse a font name. Unknown names fall back to Helvetica with a warning.
    pub fn from_choice(name: &str) -> Self {
        match name.trim() {
            "Helvetica" => FontChoice::Helvetica,
            "Times-Roman" => FontChoice::TimesRoman,
            "Courier" => FontChoice::Courier,
            other => {
                log::warn!("{other} is not a valid font, defaulting to Helvetica");
                FontChoice::Helvetica
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FontChoice::Helvetica => "Helvetica",
            FontChoice::TimesRoman => "Times-Roman",
            FontChoice::Courier => "Courier",
        }
    }

    pub fn builtin(self) -> printpdf::BuiltinFont {
        match self {
            FontChoice::Helvetica => printpdf::BuiltinFont::Helvetica,
            FontChoice::TimesRoman => printpdf::BuiltinFont::TimesRoman,
            FontChoice::Courier => printpdf::BuiltinFont::Courier,
        }
    }

    /// Average glyph advance as a fraction of the font size
    pub fn char_width_ratio(self) -> f32 {
        match self {
            FontChoice::Helvetica => crate::constants::HELVETICA_CHAR_WIDTH_RATIO,
            FontChoice::TimesRoman => crate::constants::TIMES_CHAR_WIDTH_RATIO,
            FontChoice::Courier => crate::constants::COURIER_CHAR_WIDTH_RATIO,
        }
    }
}

impl From<String> for FontChoice {
    fn from(value: String) -> Self {
        Self::from_choice(&value)
    }
}

impl From<FontChoice> for String {
    fn from(value: FontChoice) -> Self {
        value.name().to_string()
    }
}

/// How content pages are ordered in the finished book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ContentOrder {
    /// Matched files sorted by file name
    #[default]
    FileName,
    /// Matched files in the order of the selection list
    Selection,
}

/// Summary of a finished build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub output_path: std::path::PathBuf,
    pub content_pages: usize,
    pub front_matter_pages: usize,
    pub total_pages: usize,
}
