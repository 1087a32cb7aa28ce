//! PDF text extraction using lopdf

use crate::ContentError;
use lopdf::{Document, Encoding, Object, ObjectId};
use std::collections::BTreeMap;
use tracing::debug;

/// Extract the text of every page, in page order
///
/// Each page's text items are joined with a single space and every page is
/// followed by a blank line.
///
/// # Errors
///
/// Returns [`ContentError::Pdf`] if the document cannot be parsed.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ContentError> {
    let doc = Document::load_mem(bytes)?;
    let pages = doc.get_pages();
    debug!(pages = pages.len(), "Parsed PDF document");

    let mut page_items = Vec::with_capacity(pages.len());
    for page_id in pages.values() {
        page_items.push(text_items(&doc, *page_id)?);
    }

    Ok(join_pages(page_items))
}

/// Text items of one page: one per text-showing operation, blank ones dropped
fn text_items(doc: &Document, page_id: ObjectId) -> Result<Vec<String>, ContentError> {
    let encodings = doc
        .get_page_fonts(page_id)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(doc).map(|encoding| (name, encoding)))
        .collect::<lopdf::Result<BTreeMap<Vec<u8>, Encoding>>>()?;
    let content = doc.get_and_decode_page_content(page_id)?;

    let mut items = Vec::new();
    let mut encoding = None;
    for operation in &content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                encoding = operation
                    .operands
                    .first()
                    .and_then(|font| font.as_name().ok())
                    .and_then(|font| encodings.get(font));
            }
            "Tj" | "TJ" | "'" | "\"" => {
                let Some(encoding) = encoding else {
                    debug!(operator = %operation.operator, "Text shown without a known font");
                    continue;
                };
                let mut item = String::new();
                collect_text(&mut item, encoding, &operation.operands)?;
                let item = item.trim();
                if !item.is_empty() {
                    items.push(item.to_string());
                }
            }
            _ => {}
        }
    }

    Ok(items)
}

/// Decode the string operands of a text-showing operation into `text`
///
/// Kerning offsets below -100 in a `TJ` array read as a word gap.
fn collect_text(text: &mut String, encoding: &Encoding, operands: &[Object]) -> Result<(), ContentError> {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)?),
            Object::Array(parts) => collect_text(text, encoding, parts)?,
            Object::Integer(offset) if *offset < -100 => text.push(' '),
            _ => {}
        }
    }
    Ok(())
}

/// Join items with a space per page, each page followed by a blank line
fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    pages.into_iter().fold(String::new(), |mut text, items| {
        text.push_str(&items.join(" "));
        text.push_str("\n\n");
        text
    })
}
