//! Matching selection identifiers to image files

use crate::types::*;
use std::path::{Path, PathBuf};

/// List the names of the regular files in a directory
pub async fn list_directory(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => log::debug!("Skipping non UTF-8 file name {:?}", name),
        }
    }

    Ok(names)
}

/// Pick the file names containing any selection identifier.
///
/// An identifier may match several files, and a file may match several
/// identifiers. Identifiers without a match are skipped silently.
pub fn match_selection(
    selection: &[String],
    file_names: &[String],
    order: ContentOrder,
) -> Vec<String> {
    let mut sorted: Vec<&String> = file_names.iter().collect();
    sorted.sort();

    match order {
        ContentOrder::FileName => {
            let mut matched: Vec<String> = sorted
                .into_iter()
                .filter(|name| selection.iter().any(|id| name.contains(id.as_str())))
                .cloned()
                .collect();
            matched.dedup();
            log_unmatched(selection, &matched);
            matched
        }
        ContentOrder::Selection => {
            let mut matched = Vec::new();
            for id in selection {
                matched.extend(
                    sorted
                        .iter()
                        .filter(|name| name.contains(id.as_str()))
                        .map(|name| (*name).clone()),
                );
            }
            log_unmatched(selection, &matched);
            matched
        }
    }
}

fn log_unmatched(selection: &[String], matched: &[String]) {
    for id in selection {
        if !matched.iter().any(|name| name.contains(id.as_str())) {
            log::debug!("No image matches selection {}", id);
        }
    }
}

/// Resolve the selection against the files of `dir`
pub async fn find_images(
    dir: impl AsRef<Path>,
    selection: &[String],
    order: ContentOrder,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let names = list_directory(dir).await?;

    Ok(match_selection(selection, &names, order)
        .into_iter()
        .map(|name| dir.join(name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_file_name_order_ignores_selection_order() {
        let selection = strings(&["109", "107"]);
        let files = strings(&["109 Paul.jpg", "107 Stephen.jpg", "notes.txt"]);

        let matched = match_selection(&selection, &files, ContentOrder::FileName);
        assert_eq!(matched, strings(&["107 Stephen.jpg", "109 Paul.jpg"]));
    }

    #[test]
    fn test_selection_order_follows_list() {
        let selection = strings(&["109", "107"]);
        let files = strings(&["107 Stephen.jpg", "109 Paul.jpg"]);

        let matched = match_selection(&selection, &files, ContentOrder::Selection);
        assert_eq!(matched, strings(&["109 Paul.jpg", "107 Stephen.jpg"]));
    }

    #[test]
    fn test_unmatched_identifier_is_skipped() {
        let selection = strings(&["001", "002", "004"]);
        let files = strings(&["001 Prophet.jpg", "004 Temple.jpg"]);

        let matched = match_selection(&selection, &files, ContentOrder::FileName);
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_substring_matches_everywhere() {
        // "012" is also contained in "1012 Map.jpg" and "012b Flood.jpg"
        let selection = strings(&["012"]);
        let files = strings(&["012 Ark.jpg", "012b Flood.jpg", "1012 Map.jpg"]);

        let matched = match_selection(&selection, &files, ContentOrder::FileName);
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn test_file_matching_two_identifiers_appears_once() {
        let selection = strings(&["001", "Prophet"]);
        let files = strings(&["001 Prophet.jpg"]);

        let matched = match_selection(&selection, &files, ContentOrder::FileName);
        assert_eq!(matched, strings(&["001 Prophet.jpg"]));
    }
}
