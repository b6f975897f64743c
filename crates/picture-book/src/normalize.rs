//! Image normalization
//!
//! Every content image is stretched to the profile's pixel resolution,
//! re-encoded as JPEG and wrapped in a single-page PDF:
//! 1. Decode the source image
//! 2. Resize to the exact target pixels (aspect ratio is not preserved)
//! 3. Encode to JPEG in memory
//! 4. Embed the JPEG as a DCT image XObject scaled to fit the page

use crate::constants::JPEG_QUALITY;
use crate::profile::PaperProfile;
use crate::types::*;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use lopdf::{Dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

/// Where an image lands on its page, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ImagePlacement {
    /// Scale an image of the given pixel size to fit inside the page,
    /// centered on both axes
    pub fn fit_centered(
        image_width: u32,
        image_height: u32,
        page_width: f32,
        page_height: f32,
    ) -> Self {
        let scale = (page_width / image_width as f32).min(page_height / image_height as f32);
        let width = image_width as f32 * scale;
        let height = image_height as f32 * scale;

        Self {
            x: (page_width - width) / 2.0,
            y: (page_height - height) / 2.0,
            width,
            height,
        }
    }
}

/// Stretch an image to exactly `width` x `height` pixels.
///
/// The source aspect ratio is ignored on purpose: every page of the book
/// has the same pixel size, whatever shape the source picture had.
pub fn stretch_to_fit(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    image.resize_exact(width, height, FilterType::CatmullRom)
}

/// Encode an image as baseline RGB JPEG
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&rgb)?;
    Ok(bytes)
}

/// Name of the temporary artifact for a source image.
///
/// The source extension is kept so `012 Ark.jpg` and `012 Ark.png` get
/// separate artifacts.
pub fn image_artifact_name(path: impl AsRef<Path>) -> String {
    let name = path
        .as_ref()
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.pdf", name)
}

/// Load, resize and convert one image into single-page PDF bytes
pub async fn normalize_image(path: impl AsRef<Path>, profile: &PaperProfile) -> Result<Vec<u8>> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    let profile = *profile;

    tokio::task::spawn_blocking(move || {
        let source = image::load_from_memory(&bytes)?;
        let resized = stretch_to_fit(&source, profile.pixel_width, profile.pixel_height);
        let jpeg = encode_jpeg(&resized)?;
        let mut doc = image_page_document(
            jpeg,
            profile.pixel_width,
            profile.pixel_height,
            profile.width_pt,
            profile.height_pt,
        );

        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, BookError>(writer)
    })
    .await?
}

/// Normalize an image and write the result into `dir`
pub async fn write_image_page(
    path: impl AsRef<Path>,
    profile: &PaperProfile,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let bytes = normalize_image(path, profile).await?;
    let artifact = dir.as_ref().join(image_artifact_name(path));
    tokio::fs::write(&artifact, bytes).await?;
    Ok(artifact)
}

/// Build a one-page document showing a JPEG scaled to fit the page
pub fn image_page_document(
    jpeg: Vec<u8>,
    pixel_width: u32,
    pixel_height: u32,
    page_width_pt: f32,
    page_height_pt: f32,
) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(pixel_width as i64)),
        ("Height", Object::Integer(pixel_height as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"DCTDecode".to_vec())),
    ]);
    // Already compressed, must not be deflated again
    let image_id = doc.add_object(Stream::new(image_dict, jpeg).with_compression(false));

    let placement =
        ImagePlacement::fit_centered(pixel_width, pixel_height, page_width_pt, page_height_pt);
    let content = format!(
        "q\n{:.4} 0 0 {:.4} {:.4} {:.4} cm\n/Im0 Do\nQ\n",
        placement.width, placement.height, placement.x, placement.y
    );
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let resources = Dictionary::from_iter(vec![(
        "XObject",
        Object::Dictionary(Dictionary::from_iter(vec![(
            "Im0",
            Object::Reference(image_id),
        )])),
    )]);

    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_width_pt),
                Object::Real(page_height_pt),
            ]),
        ),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]));

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}
