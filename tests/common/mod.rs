//! Synthetic solicitation PDFs for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::path::{Path, PathBuf};

/// One Letter-size page per entry, each showing its text in Helvetica.
///
/// Font and media box live on the page tree root so pages rely on
/// inheritance, like most producer output.
pub fn build_pdf(pages: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|text| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            page_id.into()
        })
        .collect();

    let page_tree = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(page_tree));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);
    build_pdf(pages).save(&path).unwrap();
    path
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Plain text of every page, whitespace-collapsed.
pub fn page_texts(doc: &Document) -> Vec<String> {
    (1..=doc.get_pages().len() as u32)
        .map(|n| {
            let text = doc.extract_text(&[n]).unwrap();
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .collect()
}

/// Widget annotation dictionaries on a page, in /Annots order.
pub fn annotations(doc: &Document, page_id: ObjectId) -> Vec<lopdf::Dictionary> {
    let page = doc.get_dictionary(page_id).unwrap();
    let annots = match page.get(b"Annots") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => doc.get_object(*id).unwrap().as_array().unwrap().clone(),
        _ => return Vec::new(),
    };
    annots
        .iter()
        .map(|obj| match obj {
            Object::Reference(id) => doc.get_dictionary(*id).unwrap().clone(),
            Object::Dictionary(dict) => dict.clone(),
            other => panic!("unexpected annotation entry {:?}", other),
        })
        .collect()
}

pub fn field_name(annot: &lopdf::Dictionary) -> String {
    match annot.get(b"T").unwrap() {
        Object::String(bytes, _) => String::from_utf8(bytes.clone()).unwrap(),
        other => panic!("field name is not a string: {:?}", other),
    }
}
