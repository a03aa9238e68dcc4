//! Chunk-to-document assembly.
//!
//! Attaches provenance metadata to every chunk produced from a page. All
//! chunks from one page share the same source/title/image list; only the
//! chunk index varies.

use sitecorpus_shared::{Document, DocumentMeta, MAX_IMAGE_URLS};

/// Build one [`Document`] per chunk, carrying the page's provenance.
///
/// The image list is truncated to the first [`MAX_IMAGE_URLS`] entries and
/// comma-joined.
pub fn assemble(chunks: &[String], title: &str, url: &str, image_urls: &[String]) -> Vec<Document> {
    let image_list = image_urls
        .iter()
        .take(MAX_IMAGE_URLS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",");

    chunks
        .iter()
        .enumerate()
        .map(|(chunk_index, chunk)| Document {
            content: chunk.clone(),
            metadata: DocumentMeta {
                source: url.to_string(),
                title: title.to_string(),
                chunk_index,
                image_urls: image_list.clone(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("https://example.com/img{i}.png"))
            .collect()
    }

    #[test]
    fn one_document_per_chunk_with_indices() {
        let chunks = vec!["first".to_string(), "second".to_string(), "third".to_string()];
        let docs = assemble(&chunks, "Title", "https://example.com/p", &[]);

        assert_eq!(docs.len(), 3);
        for (i, doc) in docs.iter().enumerate() {
            assert_eq!(doc.metadata.chunk_index, i);
            assert_eq!(doc.metadata.source, "https://example.com/p");
            assert_eq!(doc.metadata.title, "Title");
        }
        assert_eq!(docs[1].content, "second");
    }

    #[test]
    fn image_list_capped_at_ten() {
        let chunks = vec!["chunk".to_string()];
        let docs = assemble(&chunks, "T", "https://example.com/", &urls(15));

        let joined = &docs[0].metadata.image_urls;
        assert_eq!(joined.split(',').count(), MAX_IMAGE_URLS);
        assert!(joined.starts_with("https://example.com/img0.png"));
        assert!(joined.ends_with("img9.png"));
    }

    #[test]
    fn no_images_gives_empty_string() {
        let docs = assemble(&["c".to_string()], "T", "https://example.com/", &[]);
        assert_eq!(docs[0].metadata.image_urls, "");
    }

    #[test]
    fn no_chunks_gives_no_documents() {
        let docs = assemble(&[], "T", "https://example.com/", &urls(2));
        assert!(docs.is_empty());
    }
}
