//! Shared helpers for integration tests.
//!
//! Test inputs are generated in place with `lopdf` rather than shipped as
//! fixture files. Each generated page carries a distinctive MediaBox
//! width so page ordering can be asserted after a merge.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, Stream, dictionary};

/// Build a minimal valid PDF with `pages` pages.
///
/// Page `i` (0-based) gets a MediaBox width of `width_base + i`, which
/// lets assertions recover both the source document and the intra-document
/// position of every page in a merged output.
pub fn sample_pdf(pages: u32, width_base: f32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let mut kids = Vec::new();

    let resources_id = doc.add_object(dictionary! {
        "ProcSet" => Object::Array(vec![
            Object::Name(b"PDF".to_vec()),
            Object::Name(b"Text".to_vec()),
        ]),
    });

    for index in 0..pages {
        let content_id = doc.add_object(Object::Stream(Stream::new(dictionary! {}, vec![])));
        let width = width_base + index as f32;
        let page_id = doc.add_object(dictionary! {
            "Type" => Object::Name(b"Page".to_vec()),
            "MediaBox" => Object::Array(vec![0.into(), 0.into(), width.into(), 842.0.into()]),
            "Resources" => Object::Reference(resources_id),
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let pages_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Pages".to_vec()),
        "Kids" => Object::Array(kids),
        "Count" => Object::Integer(pages as i64),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Catalog".to_vec()),
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    for (_, page_id) in doc.get_pages() {
        if let Some(Object::Dictionary(page_dict)) = doc.objects.get_mut(&page_id) {
            page_dict.set("Parent", Object::Reference(pages_id));
        }
    }

    doc.compress();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize test PDF");
    bytes
}

/// Write a generated PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, pages: u32, width_base: f32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, sample_pdf(pages, width_base)).expect("Failed to write test PDF");
    path
}

/// Write a file that is not parseable as a PDF and return its path.
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not a pdf document").expect("Failed to write corrupt file");
    path
}

/// Number of pages in a serialized PDF.
pub fn page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes)
        .expect("Output is not a valid PDF")
        .get_pages()
        .len()
}

/// MediaBox widths of a serialized PDF's pages, in page order.
pub fn page_widths(bytes: &[u8]) -> Vec<f32> {
    let doc = Document::load_mem(bytes).expect("Output is not a valid PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let page = doc
                .get_object(page_id)
                .and_then(|o| o.as_dict())
                .expect("Page is not a dictionary");
            let media_box = page
                .get(b"MediaBox")
                .and_then(|o| o.as_array())
                .expect("Page has no MediaBox");
            media_box[2].as_float().expect("MediaBox width is not numeric")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_pdf_round_trips() {
        let bytes = sample_pdf(3, 100.0);
        assert_eq!(page_count(&bytes), 3);
        assert_eq!(page_widths(&bytes), vec![100.0, 101.0, 102.0]);
    }

    #[test]
    fn test_corrupt_bytes_do_not_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_corrupt(dir.path(), "bad.pdf");
        let bytes = std::fs::read(path).unwrap();
        assert!(Document::load_mem(&bytes).is_err());
    }
}
