//! Front matter generation
//!
//! Builds the title, copyright and preface pages. Each page is saved as
//! its own single-page PDF whose name sorts ahead of every content page.

mod text;

pub use text::{
    FontSizes, centered_line_ops, encode_win_ansi, line_ops, paragraph_ops, text_width,
    win_ansi_byte,
};

use crate::constants::*;
use crate::normalize::stretch_to_fit;
use crate::options::FrontMatterText;
use crate::profile::PaperProfile;
use crate::types::{FontChoice, Result};
use image::DynamicImage;
use lopdf::{Document, Object, ObjectId, StringFormat};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, RawImageData, RawImageFormat,
    XObjectTransform,
};
use std::path::{Path, PathBuf};

/// Ops for the title page: title, subtitle and the centered title image
pub fn title_page_ops(
    doc: &mut PdfDocument,
    title: &str,
    subtitle: &str,
    title_image: &DynamicImage,
    profile: &PaperProfile,
    font: FontChoice,
) -> Vec<Op> {
    let sizes = FontSizes::for_scaling(profile.font_scaling);
    let center_x = profile.width_pt / 2.0;
    let mut ops = Vec::new();

    ops.extend(centered_line_ops(
        title,
        center_x,
        profile.height_pt * TITLE_BASELINE_RATIO,
        font,
        sizes.large,
    ));

    let line_spacing = SUBTITLE_LINE_SPACING / profile.font_scaling;
    for (i, line) in subtitle.lines().enumerate() {
        let y = profile.height_pt * SUBTITLE_BASELINE_RATIO - i as f32 * line_spacing;
        ops.extend(centered_line_ops(line, center_x, y, font, sizes.medium));
    }

    // One image pixel per point
    let image_width = (profile.width_pt * TITLE_IMAGE_SCALE) as u32;
    let image_height = (profile.height_pt * TITLE_IMAGE_SCALE) as u32;
    let resized = stretch_to_fit(title_image, image_width, image_height).to_rgb8();

    let raw = RawImage {
        pixels: RawImageData::U8(resized.into_raw()),
        width: image_width as usize,
        height: image_height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    let image_id = doc.add_image(&raw);

    ops.push(Op::UseXobject {
        id: image_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(center_x - image_width as f32 / 2.0)),
            translate_y: Some(Pt(profile.height_pt * TITLE_IMAGE_BOTTOM_RATIO)),
            dpi: Some(72.0),
            ..Default::default()
        },
    });

    ops
}

/// Ops for the copyright page: notice, three blank lines, then the address
pub fn copyright_page_ops(
    copyright: &str,
    address: &str,
    profile: &PaperProfile,
    font: FontChoice,
) -> Vec<Op> {
    let body = format!("{}{}{}", copyright, BLOCK_SEPARATOR, address);
    paragraph_page_ops(&body, COPYRIGHT_BASELINE_RATIO, profile, font)
}

/// Ops for the preface page: both prefaces separated by three blank lines
pub fn preface_page_ops(
    preface: &str,
    secondary_preface: &str,
    profile: &PaperProfile,
    font: FontChoice,
) -> Vec<Op> {
    let body = format!("{}{}{}", preface, BLOCK_SEPARATOR, secondary_preface);
    paragraph_page_ops(&body, PREFACE_BASELINE_RATIO, profile, font)
}

fn paragraph_page_ops(
    body: &str,
    baseline_ratio: f32,
    profile: &PaperProfile,
    font: FontChoice,
) -> Vec<Op> {
    let sizes = FontSizes::for_scaling(profile.font_scaling);
    paragraph_ops(
        body,
        profile.width_pt * LEFT_MARGIN_RATIO,
        profile.height_pt * baseline_ratio,
        font,
        sizes.small,
    )
}

/// Wrap page ops into a single-page PDF
fn single_page_pdf(
    mut doc: PdfDocument,
    ops: Vec<Op>,
    profile: &PaperProfile,
) -> Result<Vec<u8>> {
    let (width_mm, height_mm) = profile.dimensions_mm();
    doc.pages = vec![PdfPage::new(Mm(width_mm), Mm(height_mm), ops)];

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    finish_page(&bytes, profile)
}

/// Set the page boxes to the profile's exact size and store text strings in
/// WinAnsiEncoding, the encoding the built-in fonts are declared with.
///
/// printpdf rounds page boxes to whole points and writes text as UTF-8.
fn finish_page(bytes: &[u8], profile: &PaperProfile) -> Result<Vec<u8>> {
    let mut doc = Document::load_mem(bytes)?;
    let page_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(profile.width_pt),
        Object::Real(profile.height_pt),
    ];

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for page_id in page_ids {
        let mut content = doc.get_and_decode_page_content(page_id)?;
        for operation in content.operations.iter_mut() {
            if matches!(operation.operator.as_str(), "Tj" | "TJ" | "'" | "\"") {
                operation.operands.iter_mut().for_each(reencode_text);
            }
        }
        doc.change_page_content(page_id, content.encode()?)?;

        let page = doc.get_dictionary_mut(page_id)?;
        for key in ["MediaBox", "CropBox", "TrimBox"] {
            page.set(key, Object::Array(page_box.clone()));
        }
    }

    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

fn reencode_text(operand: &mut Object) {
    match operand {
        Object::String(bytes, format) => {
            // Strings that are not UTF-8 are already single-byte
            if let Ok(text) = std::str::from_utf8(bytes) {
                let encoded = encode_win_ansi(text);
                *bytes = encoded;
                *format = StringFormat::Hexadecimal;
            }
        }
        Object::Array(items) => items.iter_mut().for_each(reencode_text),
        _ => {}
    }
}

/// Generate the three front-matter pages as PDF bytes, in book order
pub fn generate_front_matter_bytes(
    text: &FrontMatterText,
    selection_len: usize,
    title_image: &DynamicImage,
    profile: &PaperProfile,
    font: FontChoice,
) -> Result<Vec<(&'static str, Vec<u8>)>> {
    let mut title_doc = PdfDocument::new("Title");
    let title_ops = title_page_ops(
        &mut title_doc,
        &text.title,
        &text.subtitle_for(selection_len),
        title_image,
        profile,
        font,
    );
    let title = single_page_pdf(title_doc, title_ops, profile)?;

    let copyright = single_page_pdf(
        PdfDocument::new("Copyright"),
        copyright_page_ops(&text.copyright, &text.address, profile, font),
        profile,
    )?;

    let preface = single_page_pdf(
        PdfDocument::new("Preface"),
        preface_page_ops(&text.preface, &text.secondary_preface, profile, font),
        profile,
    )?;

    Ok(vec![
        (TITLE_ARTIFACT, title),
        (COPYRIGHT_ARTIFACT, copyright),
        (PREFACE_ARTIFACT, preface),
    ])
}

/// Write the front matter into `dir` and return the artifact paths in order.
///
/// The title image is read from `input_dir`.
pub async fn write_front_matter(
    text: &FrontMatterText,
    selection_len: usize,
    profile: &PaperProfile,
    font: FontChoice,
    input_dir: impl AsRef<Path>,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let image_bytes = tokio::fs::read(input_dir.as_ref().join(&text.title_image)).await?;
    let text = text.clone();
    let profile = *profile;

    let pages = tokio::task::spawn_blocking(move || {
        let title_image = image::load_from_memory(&image_bytes)?;
        generate_front_matter_bytes(&text, selection_len, &title_image, &profile, font)
    })
    .await??;

    let mut paths = Vec::with_capacity(pages.len());
    for (name, bytes) in pages {
        let path = dir.as_ref().join(name);
        tokio::fs::write(&path, bytes).await?;
        paths.push(path);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaperSize, Quality};
    use image::RgbImage;

    fn a5() -> PaperProfile {
        PaperProfile::resolve(PaperSize::A5, Quality::Low).unwrap()
    }

    #[test]
    fn test_title_page_places_image() {
        let profile = a5();
        let mut doc = PdfDocument::new("Title");
        let image = DynamicImage::ImageRgb8(RgbImage::new(20, 30));

        let ops = title_page_ops(
            &mut doc,
            "Title",
            "\nsub\ntitle\n",
            &image,
            &profile,
            FontChoice::Helvetica,
        );

        let images: Vec<&Op> = ops
            .iter()
            .filter(|op| matches!(op, Op::UseXobject { .. }))
            .collect();
        assert_eq!(images.len(), 1);

        // Title, plus three subtitle lines (the first one blank)
        let text_sections = ops
            .iter()
            .filter(|op| matches!(op, Op::StartTextSection))
            .count();
        assert_eq!(text_sections, 4);
    }

    #[test]
    fn test_front_matter_is_three_pdfs() {
        let profile = a5();
        let image = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        let pages = generate_front_matter_bytes(
            &FrontMatterText::default(),
            84,
            &image,
            &profile,
            FontChoice::Courier,
        )
        .unwrap();

        let names: Vec<&str> = pages.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![TITLE_ARTIFACT, COPYRIGHT_ARTIFACT, PREFACE_ARTIFACT]);
        for (_, bytes) in &pages {
            assert!(bytes.starts_with(b"%PDF"));
        }
    }

    #[test]
    fn test_pages_use_exact_profile_size() {
        for paper in PaperSize::ALL {
            let profile = PaperProfile::resolve(paper, Quality::Low).unwrap();
            let ops =
                copyright_page_ops("Copyright", "Address", &profile, FontChoice::Helvetica);
            let bytes = single_page_pdf(PdfDocument::new("Copyright"), ops, &profile).unwrap();

            let doc = Document::load_mem(&bytes).unwrap();
            let page_id = *doc.get_pages().values().next().unwrap();
            let page = doc.get_dictionary(page_id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            assert!((media_box[2].as_float().unwrap() - profile.width_pt).abs() < 0.001);
            assert!((media_box[3].as_float().unwrap() - profile.height_pt).abs() < 0.001);
        }
    }

    #[test]
    fn test_text_is_written_in_win_ansi() {
        let profile = a5();
        let ops = copyright_page_ops("\u{a9} 2021", "", &profile, FontChoice::Helvetica);
        let bytes = single_page_pdf(PdfDocument::new("Copyright"), ops, &profile).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = doc.get_and_decode_page_content(page_id).unwrap();
        let shown: Vec<&[u8]> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|operand| operand.as_str().ok())
            .collect();
        assert_eq!(shown, vec![&[0xA9, b' ', b'2', b'0', b'2', b'1'][..]]);
    }
}
