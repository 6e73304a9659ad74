use crate::error::CrawlError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::{Path, PathBuf};

/// Page attributes a page may inherit from its page tree ancestors
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Guards against cyclic `Parent` chains in malformed files
const MAX_TREE_DEPTH: usize = 64;

/// Concatenates the pages of `inputs`, in order, into a new PDF at `output`.
///
/// The same file may appear more than once. The catalog and page tree root of
/// the first input are reused for the combined document; outlines are dropped.
/// Attributes pages inherit from their page tree are copied onto the pages.
pub fn merge_pdfs<P: AsRef<Path>>(inputs: &[P], output: &Path) -> Result<PathBuf, CrawlError> {
    let mut merged = Document::with_version("1.5");
    let mut next_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut catalog: Option<(ObjectId, Dictionary)> = None;
    let mut page_tree: Option<(ObjectId, Dictionary)> = None;

    for input in inputs {
        let path = input.as_ref();
        let mut doc = Document::load(path)?;
        doc.renumber_objects_with(next_id);
        next_id = doc.max_id + 1;

        let pages = doc.get_pages().into_values().collect::<Vec<_>>();
        if pages.is_empty() {
            ::log::warn!("Skipping {} while merging: no pages", path.display());
            continue;
        }
        // page tree nodes are dropped below, so pages must carry their own attributes
        push_down_inherited(&mut doc, &pages);
        page_ids.extend(pages);

        for (id, object) in doc.objects {
            let kind = type_name(&object).map(<[u8]>::to_vec);
            match (kind.as_deref(), object) {
                (Some(b"Catalog"), Object::Dictionary(dict)) => {
                    catalog.get_or_insert((id, dict));
                }
                // intermediate page tree nodes are replaced by a single root
                (Some(b"Pages"), Object::Dictionary(dict)) => {
                    page_tree.get_or_insert((id, dict));
                }
                (_, object) => {
                    merged.objects.insert(id, object);
                }
            }
        }
    }

    let (Some((catalog_id, mut catalog)), Some((pages_id, mut pages))) = (catalog, page_tree)
    else {
        return Err(CrawlError::NothingToMerge(output.to_path_buf()));
    };
    if page_ids.is_empty() {
        return Err(CrawlError::NothingToMerge(output.to_path_buf()));
    }

    for id in &page_ids {
        if let Ok(Object::Dictionary(page)) = merged.get_object_mut(*id) {
            page.set("Parent", pages_id);
        }
    }

    pages.remove(b"Parent");
    pages.set("Count", page_ids.len() as i64);
    pages.set(
        "Kids",
        page_ids
            .iter()
            .map(|id| Object::Reference(*id))
            .collect::<Vec<Object>>(),
    );
    merged.objects.insert(pages_id, Object::Dictionary(pages));

    catalog.set("Pages", pages_id);
    catalog.remove(b"Outlines");
    merged.objects.insert(catalog_id, Object::Dictionary(catalog));

    merged.trailer.set("Root", catalog_id);
    merged.max_id = merged.objects.keys().map(|(n, _)| *n).max().unwrap_or(0);
    merged.renumber_objects();
    merged.compress();

    merged
        .save(output)
        .map_err(|e| CrawlError::io(output, std::io::Error::other(e.to_string())))?;

    ::log::info!(
        "Combined {} pages from {} files into {}",
        page_ids.len(),
        inputs.len(),
        output.display()
    );
    Ok(output.to_path_buf())
}

fn type_name(object: &Object) -> Option<&[u8]> {
    object
        .as_dict()
        .ok()
        .and_then(|dict| dict.get(b"Type").ok())
        .and_then(|name| name.as_name().ok())
}

fn push_down_inherited(doc: &mut Document, page_ids: &[ObjectId]) {
    for &page_id in page_ids {
        let inherited = inherited_attributes(doc, page_id);
        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            for (key, value) in inherited {
                page.set(key, value);
            }
        }
    }
}

/// Inheritable attributes the page lacks, taken from the nearest ancestor
/// defining each
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(Vec<u8>, Object)> {
    let Ok(page) = doc.get_object(page_id).and_then(Object::as_dict) else {
        return Vec::new();
    };

    let mut missing = INHERITABLE
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect::<Vec<&[u8]>>();
    let mut found = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let Some(node_id) = parent else { break };
        if missing.is_empty() {
            break;
        }
        let Ok(node) = doc.get_object(node_id).and_then(Object::as_dict) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    found
}
