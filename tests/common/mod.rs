#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};

/// A valid PDF with `pages` blank A4 pages
pub fn sample_pdf(pages: usize) -> Vec<u8> {
    build_pdf(pages, false)
}

/// Blank US Letter pages whose MediaBox and Rotate live on the page tree
/// root, as many generators write them
pub fn inherited_box_pdf(pages: usize) -> Vec<u8> {
    build_pdf(pages, true)
}

fn build_pdf(pages: usize, inherited: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids = (0..pages)
        .map(|_| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, b"BT ET".to_vec()));
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            };
            if !inherited {
                page.set("MediaBox", vec![0.into(), 0.into(), 595.into(), 842.into()]);
            }
            doc.add_object(page).into()
        })
        .collect::<Vec<Object>>();

    let mut pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
    };
    if inherited {
        pages_dict.set("MediaBox", vec![0.into(), 0.into(), 612.into(), 792.into()]);
        pages_dict.set("Rotate", 90_i64);
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

pub fn page_count(path: &std::path::Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

/// Page dictionaries of the document at `path`, in page order
pub fn page_dicts(path: &std::path::Path) -> Vec<lopdf::Dictionary> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| doc.get_dictionary(id).unwrap().clone())
        .collect()
}

pub fn media_box(page: &lopdf::Dictionary) -> Vec<i64> {
    page.get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n.as_i64().unwrap())
        .collect()
}
