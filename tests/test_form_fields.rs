//! Integration tests for fillable field injection.

mod common;

use common::{annotations, build_pdf, field_name, page_ids};
use lopdf::{dictionary, Object};
use solicitation_splitter::form_fields::inject_fields;
use solicitation_splitter::SectionKind;

fn acroform_field_count(doc: &lopdf::Document) -> usize {
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    let catalog = doc.get_dictionary(catalog_id).unwrap();
    let form_id = catalog.get(b"AcroForm").unwrap().as_reference().unwrap();
    let form = doc.get_dictionary(form_id).unwrap();
    form.get(b"Fields").unwrap().as_array().unwrap().len()
}

fn rect_of(annot: &lopdf::Dictionary) -> Vec<f32> {
    annot
        .get(b"Rect")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

#[test]
fn test_acknowledgment_adds_signature_and_date_to_every_page() {
    let mut doc = build_pdf(&["Acknowledgment of Receipt", "continued"]);
    let per_page = inject_fields(&mut doc, SectionKind::Acknowledgment).unwrap();
    assert_eq!(per_page, 2);

    for page_id in page_ids(&doc) {
        let annots = annotations(&doc, page_id);
        assert_eq!(annots.len(), 2);
        let names: Vec<String> = annots.iter().map(field_name).collect();
        assert_eq!(names, vec!["acknowledgment_signature_0", "acknowledgment_date_1"]);

        assert_eq!(rect_of(&annots[0]), vec![72.0, 150.0, 300.0, 172.0]);
        assert_eq!(rect_of(&annots[1]), vec![360.0, 150.0, 540.0, 172.0]);
        for annot in &annots {
            assert_eq!(annot.get(b"Subtype").unwrap().as_name().unwrap(), b"Widget");
            assert_eq!(annot.get(b"FT").unwrap().as_name().unwrap(), b"Tx");
        }
    }
    assert_eq!(acroform_field_count(&doc), 4);
}

#[test]
fn test_static_section_gets_no_fields() {
    let mut doc = build_pdf(&["cover", "instructions"]);
    let per_page = inject_fields(&mut doc, SectionKind::Static).unwrap();
    assert_eq!(per_page, 0);

    for page_id in page_ids(&doc) {
        assert!(annotations(&doc, page_id).is_empty());
    }
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    assert!(!doc.get_dictionary(catalog_id).unwrap().has(b"AcroForm"));
}

#[test]
fn test_existing_direct_annotations_are_kept() {
    let mut doc = build_pdf(&["Candidate References"]);
    let page_id = page_ids(&doc)[0];
    let link = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
    });
    doc.get_dictionary_mut(page_id)
        .unwrap()
        .set("Annots", vec![Object::Reference(link)]);

    inject_fields(&mut doc, SectionKind::References).unwrap();

    let annots = annotations(&doc, page_id);
    assert_eq!(annots.len(), 3);
    assert_eq!(annots[0].get(b"Subtype").unwrap().as_name().unwrap(), b"Link");
    assert_eq!(field_name(&annots[1]), "references_reference_name_0");
    assert_eq!(field_name(&annots[2]), "references_reference_contact_1");
}

#[test]
fn test_indirect_annotation_array_is_extended() {
    let mut doc = build_pdf(&["Candidate Qualifications"]);
    let page_id = page_ids(&doc)[0];
    let link = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
    });
    let array_id = doc.add_object(vec![Object::Reference(link)]);
    doc.get_dictionary_mut(page_id).unwrap().set("Annots", array_id);

    let per_page = inject_fields(&mut doc, SectionKind::Qualifications).unwrap();
    assert_eq!(per_page, 1);

    let annots = annotations(&doc, page_id);
    assert_eq!(annots.len(), 2);
    assert_eq!(field_name(&annots[1]), "qualifications_qualifications_summary_0");
}

#[test]
fn test_injecting_twice_extends_the_form() {
    let mut doc = build_pdf(&["Acknowledgment of Receipt"]);
    inject_fields(&mut doc, SectionKind::Acknowledgment).unwrap();
    inject_fields(&mut doc, SectionKind::Acknowledgment).unwrap();

    assert_eq!(annotations(&doc, page_ids(&doc)[0]).len(), 4);
    assert_eq!(acroform_field_count(&doc), 4);
}

#[test]
fn test_decorated_document_survives_save_and_reload() {
    let mut doc = build_pdf(&["Acknowledgment of Receipt"]);
    inject_fields(&mut doc, SectionKind::Acknowledgment).unwrap();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    let reloaded = lopdf::Document::load_mem(&bytes).unwrap();

    let page_id = page_ids(&reloaded)[0];
    assert_eq!(annotations(&reloaded, page_id).len(), 2);
    assert_eq!(acroform_field_count(&reloaded), 2);
}
