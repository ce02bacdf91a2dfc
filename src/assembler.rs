//! Builds standalone documents from a subset of source pages.

use crate::error::{Result, SplitError};
use crate::pdf_processor::SourceDocument;
use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;

/// Page attributes a page may take from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Catalog entries that can point at pages we drop.
const PAGE_BOUND_CATALOG_KEYS: [&[u8]; 8] = [
    b"Outlines",
    b"AcroForm",
    b"PageLabels",
    b"StructTreeRoot",
    b"MarkInfo",
    b"OpenAction",
    b"Names",
    b"Dests",
];

const MAX_TREE_DEPTH: usize = 64;

pub fn assemble(source: &SourceDocument, pages: &[usize]) -> Result<Document> {
    assemble_pages(source.document(), pages)
}

/// Copy `pages` (0-based) out of `source` into a new document, in the order
/// given. Page content streams and resources are shared by object id, so
/// rendering is unchanged.
pub fn assemble_pages(source: &Document, pages: &[usize]) -> Result<Document> {
    if pages.is_empty() {
        return Err(SplitError::EmptySelection);
    }

    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
    let mut seen = HashSet::with_capacity(pages.len());
    let selected = pages
        .iter()
        .map(|&index| {
            if !seen.insert(index) {
                return Err(SplitError::DuplicatePage(index));
            }
            page_ids.get(index).copied().ok_or(SplitError::PageOutOfRange {
                index,
                page_count: page_ids.len(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut doc = source.clone();
    let root_id = page_tree_root(&doc)?;

    for &page_id in &selected {
        // looked up in the untouched source, before any page is re-parented
        let inherited: Vec<(&[u8], Object)> = INHERITABLE_KEYS
            .iter()
            .filter_map(|&key| {
                inherited_attribute(source, page_id, key).map(|value| (key, value.clone()))
            })
            .collect();

        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            if !page.has(key) {
                page.set(key, value);
            }
        }
        page.set("Parent", root_id);
    }

    let kids: Vec<Object> = selected.iter().map(|&id| Object::Reference(id)).collect();
    let root = doc.get_dictionary_mut(root_id)?;
    root.set("Kids", kids);
    root.set("Count", selected.len() as i64);
    for key in INHERITABLE_KEYS {
        root.remove(key);
    }

    let catalog_id = catalog_id(&doc)?;
    let catalog = doc.get_dictionary_mut(catalog_id)?;
    for key in PAGE_BOUND_CATALOG_KEYS {
        catalog.remove(key);
    }

    let pruned = doc.prune_objects();
    log::debug!(
        "Assembled {} pages from {}, pruned {} objects",
        selected.len(),
        page_ids.len(),
        pruned.len()
    );
    Ok(doc)
}

fn catalog_id(doc: &Document) -> Result<ObjectId> {
    doc.trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| SplitError::MissingPageTree)
}

fn page_tree_root(doc: &Document) -> Result<ObjectId> {
    let catalog = catalog_id(doc)?;
    doc.get_dictionary(catalog)
        .and_then(|dict| dict.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|_| SplitError::MissingPageTree)
}

/// Look up `key` on the page, then up the /Parent chain.
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}
