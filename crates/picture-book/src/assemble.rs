//! Assembling page artifacts into the finished book

use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::{Path, PathBuf};

/// Page attributes a page may inherit from its parent page-tree node
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// List the PDF artifacts of a directory, sorted by file name
pub async fn collect_artifacts(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;
    let mut paths = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "pdf") {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Load multiple PDF documents
pub async fn load_multiple_pdfs(paths: &[impl AsRef<Path>]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in paths {
        documents.push(load_pdf(path).await?);
    }
    Ok(documents)
}

/// Load the given artifacts and merge them in order
pub async fn merge_files(paths: &[impl AsRef<Path>]) -> Result<Document> {
    let documents = load_multiple_pdfs(paths).await?;
    tokio::task::spawn_blocking(move || merge_documents(documents)).await?
}

/// Save the book.
///
/// The bytes go to a temporary sibling first and are renamed into place,
/// so a failed write never leaves a partial book behind.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
            _ => PathBuf::from("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        doc.save_to(&mut file)?;
        file.persist(&path).map_err(|e| BookError::Io(e.error))?;
        Ok::<_, BookError>(())
    })
    .await??;
    Ok(())
}

/// Concatenate every page of every document, in order, into a new document
pub fn merge_documents(documents: Vec<Document>) -> Result<Document> {
    let mut output = Document::with_version("1.5");
    let pages_id = output.new_object_id();
    let mut kids = Vec::new();

    for mut doc in documents {
        doc.renumber_objects_with(output.max_id + 1);

        let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
        for &page_id in &page_ids {
            let inherited = inherited_attributes(&doc, page_id)?;
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            for (key, value) in inherited {
                page.set(key, value);
            }
            page.set("Parent", Object::Reference(pages_id));
            kids.push(Object::Reference(page_id));
        }

        for (id, object) in doc.objects {
            if is_structural(&object) {
                continue;
            }
            output.max_id = output.max_id.max(id.0);
            output.objects.insert(id, object);
        }
    }

    if kids.is_empty() {
        return Err(BookError::NoPages);
    }

    let count = kids.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// Attributes missing on the page but set on one of its ancestors
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Result<Vec<(Vec<u8>, Object)>> {
    let page = doc.get_dictionary(page_id)?;
    let mut found: Vec<(Vec<u8>, Object)> = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(parent_id) = parent {
        let node = doc.get_dictionary(parent_id)?;
        for key in INHERITABLE_KEYS {
            let already = page.has(key) || found.iter().any(|(k, _)| k.as_slice() == key);
            if !already {
                if let Ok(value) = node.get(key) {
                    found.push((key.to_vec(), value.clone()));
                }
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(found)
}

/// Catalog and page-tree nodes are rebuilt, never copied
fn is_structural(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => matches!(
            dict.get(b"Type").and_then(Object::as_name),
            Ok(b"Catalog") | Ok(b"Pages")
        ),
        _ => false,
    }
}
