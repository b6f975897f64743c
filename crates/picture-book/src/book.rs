//! Book building - the whole pipeline
//!
//! 1. Resolve the paper profile and font
//! 2. Match the selection against the input directory
//! 3. Normalize every matched image into a page artifact
//! 4. Generate the front matter (optional)
//! 5. Merge the artifacts and write the book
//!
//! Artifacts live in a temporary directory that is removed when the build
//! returns, whether it succeeded or not.

use crate::assemble::{collect_artifacts, merge_files, save_pdf};
use crate::front_matter::write_front_matter;
use crate::normalize::write_image_page;
use crate::options::BookOptions;
use crate::profile::PaperProfile;
use crate::select::find_images;
use crate::types::*;
use std::path::{Path, PathBuf};

/// What a build would do, without doing it
#[derive(Debug, Clone, PartialEq)]
pub struct BookPlan {
    pub profile: PaperProfile,
    pub images: Vec<PathBuf>,
    pub front_matter: bool,
    pub output_path: PathBuf,
}

/// Resolve the profile and the matched images for a set of options
pub async fn plan_book(options: &BookOptions) -> Result<BookPlan> {
    options.validate().await?;

    let profile = PaperProfile::resolve(options.paper_size, options.quality)?;
    let images = find_images(&options.input_dir, &options.selection, options.content_order).await?;

    Ok(BookPlan {
        profile,
        images,
        front_matter: options.front_matter,
        output_path: options.output_dir().join(profile.output_file_name()),
    })
}

/// Build the book described by `options`
pub async fn build_book(options: &BookOptions) -> Result<BuildReport> {
    build_book_in(options, std::env::temp_dir()).await
}

/// Build the book, keeping intermediate artifacts under `scratch_root`
pub async fn build_book_in(
    options: &BookOptions,
    scratch_root: impl AsRef<Path>,
) -> Result<BuildReport> {
    let plan = plan_book(options).await?;
    let profile = plan.profile;

    log::info!(
        "Set to create {} book at {} quality",
        profile.paper.name(),
        profile.quality.code()
    );

    let temp_dir = tempfile::TempDir::new_in(scratch_root)?;

    log::info!("Resizing images...");
    let total = options.selection.len();
    let mut content = Vec::with_capacity(plan.images.len());
    for (i, image) in plan.images.iter().enumerate() {
        log::info!(" {} of {}", i + 1, total);
        content.push(write_image_page(image, &profile, temp_dir.path()).await?);
    }

    let mut front = Vec::new();
    if options.front_matter {
        log::info!("Creating front matter...");
        front = write_front_matter(
            &options.text,
            total,
            &profile,
            options.font,
            &options.input_dir,
            temp_dir.path(),
        )
        .await?;
    }

    log::info!("Merging pdf pages...");
    let artifacts = match options.content_order {
        ContentOrder::FileName => collect_artifacts(temp_dir.path()).await?,
        ContentOrder::Selection => front.iter().chain(content.iter()).cloned().collect(),
    };
    let merged = merge_files(&artifacts).await?;
    let total_pages = merged.get_pages().len();

    save_pdf(merged, &plan.output_path).await?;
    temp_dir.close()?;

    Ok(BuildReport {
        output_path: plan.output_path,
        content_pages: total_pages - front.len(),
        front_matter_pages: front.len(),
        total_pages,
    })
}
