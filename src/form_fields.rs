//! Fillable text fields for the sections that need them.
//!
//! Every page of a decorated document receives the same widget layout and
//! the same field names. Viewers merge same-named fields, so a multi-page
//! section ends up with one logical field shown on each page.

use crate::error::{Result, SplitError};
use crate::models::{FieldKind, FieldRect, FieldSpec, SectionKind};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

/// Default appearance: Helvetica, auto size, black.
const DEFAULT_APPEARANCE: &str = "/Helv 0 Tf 0 g";

/// Text field flag bit 13 (ISO 32000-1 Table 228)
const FF_MULTILINE: i64 = 1 << 12;

/// Annotation flag "Print"
const ANNOT_PRINT: i64 = 4;

const REFERENCE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        section: SectionKind::References,
        name: "reference_name",
        kind: FieldKind::Text,
        rect: FieldRect::new(72.0, 640.0, 300.0, 660.0),
    },
    FieldSpec {
        section: SectionKind::References,
        name: "reference_contact",
        kind: FieldKind::Text,
        rect: FieldRect::new(320.0, 640.0, 540.0, 660.0),
    },
];

const QUALIFICATION_FIELDS: &[FieldSpec] = &[FieldSpec {
    section: SectionKind::Qualifications,
    name: "qualifications_summary",
    kind: FieldKind::MultilineText,
    rect: FieldRect::new(72.0, 420.0, 540.0, 600.0),
}];

const ACKNOWLEDGMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        section: SectionKind::Acknowledgment,
        name: "signature",
        kind: FieldKind::Text,
        rect: FieldRect::new(72.0, 150.0, 300.0, 172.0),
    },
    FieldSpec {
        section: SectionKind::Acknowledgment,
        name: "date",
        kind: FieldKind::Text,
        rect: FieldRect::new(360.0, 150.0, 540.0, 172.0),
    },
];

pub fn field_specs_for(section: SectionKind) -> &'static [FieldSpec] {
    match section {
        SectionKind::Static => &[],
        SectionKind::References => REFERENCE_FIELDS,
        SectionKind::Qualifications => QUALIFICATION_FIELDS,
        SectionKind::Acknowledgment => ACKNOWLEDGMENT_FIELDS,
    }
}

pub fn is_fillable(section: SectionKind) -> bool {
    !field_specs_for(section).is_empty()
}

/// Fully qualified name of the `index`-th field of a section.
pub fn field_name(spec: &FieldSpec, index: usize) -> String {
    format!("{}_{}_{}", spec.section.key(), spec.name, index)
}

/// Add the section's widgets to every page of `doc`.
///
/// Returns the number of fields placed on each page; zero for sections
/// without a field layout.
pub fn inject_fields(doc: &mut Document, section: SectionKind) -> Result<usize> {
    let specs = field_specs_for(section);
    if specs.is_empty() {
        log::debug!("Section {} has no form fields", section);
        return Ok(0);
    }

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let mut field_ids = Vec::with_capacity(page_ids.len() * specs.len());

    for page_id in page_ids {
        let widgets: Vec<ObjectId> = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| doc.add_object(widget_dictionary(spec, index, page_id)))
            .collect();

        let annots: Vec<Object> = existing_annotations(doc, page_id)?
            .into_iter()
            .chain(widgets.iter().map(|&id| Object::Reference(id)))
            .collect();
        doc.get_dictionary_mut(page_id)?.set("Annots", annots);

        field_ids.extend(widgets);
    }

    register_fields(doc, &field_ids)?;
    log::info!(
        "Injected {} {} field(s) per page, {} in total",
        specs.len(),
        section.key(),
        field_ids.len()
    );
    Ok(specs.len())
}

fn widget_dictionary(spec: &FieldSpec, index: usize, page_id: ObjectId) -> Dictionary {
    let FieldRect {
        left,
        bottom,
        right,
        top,
    } = spec.rect;
    let flags = match spec.kind {
        FieldKind::Text => 0,
        FieldKind::MultilineText => FF_MULTILINE,
    };

    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Tx",
        "T" => Object::string_literal(field_name(spec, index)),
        "V" => Object::string_literal(""),
        "DV" => Object::string_literal(""),
        "Ff" => flags,
        "F" => ANNOT_PRINT,
        "Rect" => vec![left.into(), bottom.into(), right.into(), top.into()],
        "P" => page_id,
        "DA" => Object::string_literal(DEFAULT_APPEARANCE),
        "MK" => dictionary! {
            "BC" => vec![0.into(), 0.into(), 0.into()],
            "BG" => vec![1.into(), 1.into(), 1.into()],
        },
    }
}

/// Current /Annots of a page as a fresh list; empty when the page has none.
fn existing_annotations(doc: &Document, page_id: ObjectId) -> Result<Vec<Object>> {
    let page = doc.get_dictionary(page_id)?;
    let annots = match page.get(b"Annots") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => doc.get_object(*id).and_then(Object::as_array)?.clone(),
        Ok(_) => {
            log::warn!("Ignoring malformed /Annots on page object {:?}", page_id);
            Vec::new()
        }
        Err(_) => Vec::new(),
    };
    Ok(annots)
}

/// Create or extend the catalog's AcroForm with `fields`.
fn register_fields(doc: &mut Document, fields: &[ObjectId]) -> Result<()> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| SplitError::MissingPageTree)?;

    let (form_id, mut acroform) = match doc.get_dictionary(catalog_id)?.get(b"AcroForm") {
        Ok(Object::Reference(id)) => (Some(*id), doc.get_dictionary(*id)?.clone()),
        Ok(Object::Dictionary(dict)) => (None, dict.clone()),
        _ => (None, Dictionary::new()),
    };

    let mut all_fields = match acroform.get(b"Fields") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => doc.get_object(*id).and_then(Object::as_array)?.clone(),
        _ => Vec::new(),
    };
    all_fields.extend(fields.iter().map(|&id| Object::Reference(id)));

    acroform.set("Fields", all_fields);
    acroform.set("NeedAppearances", true);
    if !acroform.has(b"DA") {
        acroform.set("DA", Object::string_literal(DEFAULT_APPEARANCE));
    }
    if !acroform.has(b"DR") {
        let helvetica = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        acroform.set("DR", dictionary! { "Font" => dictionary! { "Helv" => helvetica } });
    }

    let form_id = match form_id {
        Some(id) => {
            doc.objects.insert(id, Object::Dictionary(acroform));
            id
        }
        None => doc.add_object(acroform),
    };
    doc.get_dictionary_mut(catalog_id)?.set("AcroForm", form_id);
    Ok(())
}
