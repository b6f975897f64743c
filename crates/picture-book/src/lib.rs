pub mod assemble;
mod book;
mod constants;
pub mod front_matter;
pub mod normalize;
mod options;
mod profile;
pub mod select;
mod types;

pub use assemble::{collect_artifacts, load_pdf, merge_documents, merge_files, save_pdf};
pub use book::{BookPlan, build_book, build_book_in, plan_book};
pub use constants::{OUTPUT_BASE_NAME, mm_to_pt};
pub use front_matter::write_front_matter;
pub use normalize::{normalize_image, write_image_page};
pub use options::*;
pub use profile::*;
pub use select::{find_images, match_selection};
pub use types::*;
