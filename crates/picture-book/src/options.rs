use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The curated picture selection shipped with the tool
pub const DEFAULT_SELECTION: [&str; 84] = [
    "001", "004", "008", "011", "012", "015", "019", "020", "029", "033", "036", "039", "043",
    "046", "049", "053", "055", "059", "060", "063", "066", "069", "079", "080", "084", "089",
    "090", "092", "095", "097", "098", "104", "109", "107", "111", "112", "113", "114", "117",
    "118", "119", "120", "121", "122", "123", "124", "125", "126", "129", "128", "130", "133",
    "134", "136", "138", "140", "144", "147", "148", "151", "154", "156", "158", "159", "160",
    "162", "164", "166", "169", "165", "170", "171", "174", "176", "178", "179", "180", "181",
    "183", "184", "186", "190", "194", "195",
];

/// Placeholder in the subtitle replaced by the number of selected pictures
pub const SELECTION_COUNT_PLACEHOLDER: &str = "{n}";

/// Literal text blocks of the front matter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrontMatterText {
    pub title: String,
    /// May contain `{n}`, replaced by the selection length
    pub subtitle: String,
    /// File name of the title image, relative to the input directory
    pub title_image: String,
    pub copyright: String,
    pub address: String,
    pub preface: String,
    pub secondary_preface: String,
}

impl Default for FrontMatterText {
    fn default() -> Self {
        Self {
            title: "Baibel piksa long kos 1".to_string(),
            subtitle: "\n{n} piksa long strongim wok \nbilong autim Tok bilong God\n".to_string(),
            title_image: "186 Crucifixion.jpg".to_string(),
            copyright: "\nThis book was written and published by New Tribes Mission.\n\
                Please do not copy or reproduce in part or in whole\n\
                without written consent.\n\n\
                Copyright \u{a9} 2021 New Tribes Mission"
                .to_string(),
            address: "\nNew Tribes Mission\n\
                P.O. Box 1079, Goroka E.H.P 441\n\
                Papua New Guinea\n"
                .to_string(),
            preface: "\nPreface\n\
                This picture book is designed to support the teaching of\n\
                the 'God I Wokim Strongpela Haus' Bible curriculum with a\n\
                selection of the materials produced by Foundation Matters.\n\
                Pictures are used by permission and are intended to be\n\
                used with the Kos 1 and Kos 2 book series with more\n\
                information being available by contacting New Tribes\n\
                Mission's printing department: central-trc@ntmpng.org.\n"
                .to_string(),
            secondary_preface: "\nTok i go pas\n\
                As bilong dispela buk em strongim ol tisa i yusim 'God i\n\
                wokim strongpela haus' Baibel kos. Mipela i makim sampela\n\
                piksa ol lain long Foundation Matters i wokim. Dispela\n\
                lain i givim tok orait long mipela yusim ol piksa olsem.\n\
                Ol piksa long dispela buk em inap long strongim ol tisa i\n\
                skul long Kos 1 na Kos 2. Sapos yu laikim save moa long ol\n\
                dispela samting yu mas salim pas long New Tribes Mission:\n\
                central-trc@ntmpng.org\n"
                .to_string(),
        }
    }
}

impl FrontMatterText {
    /// Subtitle with the selection count filled in
    pub fn subtitle_for(&self, selection_len: usize) -> String {
        self.subtitle
            .replace(SELECTION_COUNT_PLACEHOLDER, &selection_len.to_string())
    }
}

/// Complete book configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookOptions {
    // Input and output
    pub input_dir: PathBuf,
    /// Defaults to `input_dir` when unset
    pub output_dir: Option<PathBuf>,

    // Page setup
    pub paper_size: PaperSize,
    pub quality: Quality,
    pub font: FontChoice,

    // Content
    pub front_matter: bool,
    pub content_order: ContentOrder,
    pub selection: Vec<String>,
    pub text: FrontMatterText,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: None,
            paper_size: PaperSize::A4,
            quality: Quality::High,
            font: FontChoice::Helvetica,
            front_matter: true,
            content_order: ContentOrder::FileName,
            selection: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
            text: FrontMatterText::default(),
        }
    }
}

impl BookOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Directory the finished book is written to
    pub fn output_dir(&self) -> &std::path::Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }

    /// Validate the options
    pub async fn validate(&self) -> Result<()> {
        if self.selection.is_empty() {
            return Err(BookError::Config("Selection list is empty".to_string()));
        }

        if let Some(id) = self.selection.iter().find(|id| id.trim().is_empty()) {
            return Err(BookError::Config(format!(
                "Selection contains a blank identifier: {:?}",
                id
            )));
        }

        let is_dir = tokio::fs::metadata(&self.input_dir)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(BookError::Config(format!(
                "Input directory does not exist: {}",
                self.input_dir.display()
            )));
        }

        if self.front_matter && self.text.title_image.trim().is_empty() {
            return Err(BookError::Config(
                "Front matter needs a title image".to_string(),
            ));
        }

        Ok(())
    }
}
