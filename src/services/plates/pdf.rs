//! Box and label PDF rendering.
//!
//! Minimal single-page documents carrying the order's identifying numbers;
//! the plant-facing barcode artwork itself comes from the automation
//! engine's artifact, which must exist before these are generated.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::{AppError, AppResult};
use crate::models::PlateOrder;

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;

/// Production box PDF: style, plant, case color, and the full number set.
pub fn render_box_pdf(order: &PlateOrder) -> AppResult<Vec<u8>> {
    let lines = vec![
        format!("GOLD Corrugated Box - {}", order.box_style),
        format!("Plant: {}", order.plant),
        format!("Case color: {}", order.case_color),
        format!("Six digit: {}", order.six_digit),
        format!("Nine digit: {}", order.nine_digit),
        format!("Fourteen digit: {}", order.fourteen_digit),
    ];
    render_document(&lines)
}

/// Label PDF: just the case identification block.
pub fn render_label_pdf(order: &PlateOrder) -> AppResult<Vec<u8>> {
    let lines = vec![
        format!("GOLD Case Label {}", order.id),
        format!("Nine digit: {}", order.nine_digit),
        format!("Fourteen digit: {}", order.fourteen_digit),
    ];
    render_document(&lines)
}

fn render_document(lines: &[String]) -> AppResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 14.into()]),
        Operation::new("Td", vec![72.into(), (PAGE_HEIGHT - 90).into()]),
        Operation::new("TL", vec![20.into()]),
    ];
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.as_str())],
        ));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let encoded = content.encode().map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to encode PDF content: {}", e),
    })?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to serialize PDF: {}", e),
    })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plate::test_plate_order;

    #[test]
    fn box_pdf_is_a_parsable_single_page() {
        let bytes = render_box_pdf(&test_plate_order(42)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn label_pdf_renders() {
        let bytes = render_label_pdf(&test_plate_order(7)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
