//! Paper profile resolution
//!
//! Maps a paper size and quality to the physical page size, the target
//! pixel resolution of every content image, and the font-scaling divisor.

use crate::constants::{OUTPUT_BASE_NAME, mm_to_pt};
use crate::types::*;

/// Recommended pixel sizes for each paper size at 300, 150 and 75 dpi
const PIXEL_TABLE: [(PaperSize, Quality, (u32, u32)); 9] = [
    (PaperSize::A6, Quality::High, (1240, 1748)),
    (PaperSize::A6, Quality::Medium, (620, 874)),
    (PaperSize::A6, Quality::Low, (310, 437)),
    (PaperSize::A5, Quality::High, (1748, 2480)),
    (PaperSize::A5, Quality::Medium, (874, 1240)),
    (PaperSize::A5, Quality::Low, (437, 620)),
    (PaperSize::A4, Quality::High, (2480, 3508)),
    (PaperSize::A4, Quality::Medium, (1240, 1754)),
    (PaperSize::A4, Quality::Low, (620, 877)),
];

/// Look up the target pixel resolution for a paper size and quality
pub fn pixel_resolution(paper: PaperSize, quality: Quality) -> Result<(u32, u32)> {
    PIXEL_TABLE
        .iter()
        .find(|(p, q, _)| *p == paper && *q == quality)
        .map(|(_, _, pixels)| *pixels)
        .ok_or_else(|| {
            BookError::Config(format!(
                "No pixel resolution for {}{}",
                paper.name(),
                quality.code()
            ))
        })
}

/// Name of the finished book for a paper size
pub fn output_file_name(paper: PaperSize) -> String {
    format!("{}_{}", paper.name(), OUTPUT_BASE_NAME)
}

/// Resolved page geometry shared by every page of the book
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperProfile {
    pub paper: PaperSize,
    pub quality: Quality,
    pub width_pt: f32,
    pub height_pt: f32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub font_scaling: f32,
}

impl PaperProfile {
    pub fn resolve(paper: PaperSize, quality: Quality) -> Result<Self> {
        let (width_mm, height_mm) = paper.dimensions_mm();
        let (pixel_width, pixel_height) = pixel_resolution(paper, quality)?;

        Ok(Self {
            paper,
            quality,
            width_pt: mm_to_pt(width_mm),
            height_pt: mm_to_pt(height_mm),
            pixel_width,
            pixel_height,
            font_scaling: paper.font_scaling(),
        })
    }

    pub fn dimensions_mm(&self) -> (f32, f32) {
        self.paper.dimensions_mm()
    }

    pub fn output_file_name(&self) -> String {
        output_file_name(self.paper)
    }
}
