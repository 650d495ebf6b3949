//! Thin wrapper over the PDF codec.
//!
//! All `lopdf` calls the merger needs live here: creating an empty
//! document, decoding input bytes, moving pages between documents, and
//! serializing the result. The merger itself only sees crate errors.

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::error::{PdfBindError, Result};

const OUTPUT_PDF_VERSION: &str = "1.5";

/// A fresh document holding an empty page tree.
///
/// The catalog and `Pages` node are wired up so that decoded pages can be
/// appended with [`append_pages`].
pub fn new_document() -> Document {
    let mut document = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_id = document.new_object_id();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(vec![]),
            "Count" => 0,
        }),
    );
    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);
    document
}

/// Decode `bytes` into a document.
///
/// `name` labels the error when the bytes are not parseable PDF;
/// password-protected documents get their own variant.
pub fn decode(name: &str, bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|err| {
        let details = err.to_string();
        let lowered = details.to_lowercase();
        if lowered.contains("encrypt") || lowered.contains("password") {
            PdfBindError::EncryptedDocument {
                name: name.to_string(),
            }
        } else {
            PdfBindError::DecodeFailure {
                name: name.to_string(),
                details,
            }
        }
    })
}

/// Object ids of the document's pages, in page order.
pub fn page_refs(document: &Document) -> Vec<ObjectId> {
    document.get_pages().into_values().collect()
}

/// Move every object of `source` into `target` and return the ids of the
/// source's pages, renumbered into the target's id space.
///
/// The pages are not yet reachable from the target's page tree; pass the
/// returned ids to [`append_pages`] to attach them.
pub fn copy_pages(target: &mut Document, mut source: Document) -> Vec<ObjectId> {
    source.renumber_objects_with(target.max_id + 1);
    target.max_id = source.max_id;
    let pages = page_refs(&source);
    target.objects.extend(source.objects);
    pages
}

/// Attach already-copied pages to the target's page tree.
pub fn append_pages(target: &mut Document, pages: &[ObjectId]) -> Result<()> {
    let pages_id = target
        .catalog_mut()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|err| PdfBindError::merge_failed(format!("missing page tree: {err}")))?;
    let pages_dict = target
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .map_err(|err| PdfBindError::merge_failed(format!("invalid page tree: {err}")))?;

    let kids = pages_dict
        .get_mut(b"Kids")
        .and_then(Object::as_array_mut)
        .map_err(|err| PdfBindError::merge_failed(format!("invalid Kids array: {err}")))?;
    for &page_id in pages {
        kids.push(Object::Reference(page_id));
    }

    let count = pages_dict
        .get(b"Count")
        .and_then(Object::as_i64)
        .map_err(|err| PdfBindError::merge_failed(format!("invalid page count: {err}")))?;
    pages_dict.set("Count", count + pages.len() as i64);

    for &page_id in pages {
        let page = target
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|err| PdfBindError::merge_failed(format!("invalid page object: {err}")))?;
        page.set("Parent", Object::Reference(pages_id));
    }
    Ok(())
}

/// Serialize the document to bytes, renumbering and compressing first.
pub fn encode(document: &mut Document) -> Result<Vec<u8>> {
    document.renumber_objects();
    document.compress();
    let mut bytes = Vec::new();
    document
        .save_to(&mut bytes)
        .map_err(|err| PdfBindError::serialization(err.to_string()))?;
    Ok(bytes)
}
