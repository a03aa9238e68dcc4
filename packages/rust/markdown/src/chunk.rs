//! Heading-aware Markdown chunker.
//!
//! Splits converted Markdown into segments of at most [`MAX_CHUNK_CHARS`]
//! characters with a [`CHUNK_OVERLAP_CHARS`] overlap carried between
//! consecutive segments. Splitting prefers heading and paragraph boundaries;
//! an oversized atomic block is hard-split at the nearest newline or space.
//!
//! Chunk order is the document's reading order. Whitespace-only segments
//! are discarded, so an empty document yields zero chunks.

/// Maximum chunk size in characters.
pub const MAX_CHUNK_CHARS: usize = 1000;

/// Overlap carried from the tail of one chunk into the head of the next.
pub const CHUNK_OVERLAP_CHARS: usize = 100;

/// Split Markdown into bounded, overlapping chunks using the default limits.
pub fn chunk_markdown(md: &str) -> Vec<String> {
    chunk_with_limits(md, MAX_CHUNK_CHARS, CHUNK_OVERLAP_CHARS)
}

/// Split Markdown into chunks of at most `max_chars` with `overlap`
/// characters shared between consecutive chunks.
///
/// `overlap` must be smaller than `max_chars`. The overlap is best-effort:
/// it is trimmed from the front when a following block would not otherwise
/// fit within `max_chars`.
pub fn chunk_with_limits(md: &str, max_chars: usize, overlap: usize) -> Vec<String> {
    debug_assert!(overlap < max_chars);

    let mut chunks: Vec<String> = Vec::new();
    let mut buf = String::new();
    // Length of the overlap prefix currently at the head of `buf`.
    let mut carry = 0usize;

    for block in split_blocks(md) {
        for piece in split_oversized(&block, max_chars) {
            let sep = if buf.is_empty() { 0 } else { 2 };
            if buf.len() + sep + piece.len() > max_chars && buf.len() > carry {
                let tail = overlap_tail(&buf, overlap);
                chunks.push(std::mem::take(&mut buf));
                carry = tail.len();
                buf = tail;
            }

            // An overlap prefix that still leaves no room is trimmed from the front.
            let sep = if buf.is_empty() { 0 } else { 2 };
            if buf.len() + sep + piece.len() > max_chars && carry > 0 {
                let excess = (buf.len() + sep + piece.len()).saturating_sub(max_chars);
                let cut = snap_forward(&buf, excess.min(buf.len()));
                buf.drain(..cut);
                carry = buf.len();
            }

            if !buf.is_empty() {
                buf.push_str("\n\n");
            }
            buf.push_str(piece);
        }
    }

    // A leftover buffer that is overlap-only would duplicate content already
    // emitted, so it is dropped.
    if buf.len() > carry && !buf.trim().is_empty() {
        chunks.push(buf);
    }

    chunks.retain(|c| !c.trim().is_empty());
    chunks
}

/// Split Markdown into blocks at paragraph breaks and ATX heading lines.
fn split_blocks(md: &str) -> Vec<String> {
    let mut blocks = Vec::new();

    for para in md.split("\n\n") {
        if para.trim().is_empty() {
            continue;
        }

        let mut current = String::new();
        for line in para.lines() {
            if is_atx_heading(line) && !current.trim().is_empty() {
                blocks.push(std::mem::take(&mut current).trim().to_string());
            }
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }

        let trimmed = current.trim();
        if !trimmed.is_empty() {
            blocks.push(trimmed.to_string());
        }
    }

    blocks
}

/// `#`–`######` followed by a space.
fn is_atx_heading(line: &str) -> bool {
    let trimmed = line.trim_start();
    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    (1..=6).contains(&hashes) && trimmed.as_bytes().get(hashes) == Some(&b' ')
}

/// Hard-split a block that exceeds `max_chars`, preferring newline then
/// space boundaries, snapped to valid UTF-8 char boundaries.
fn split_oversized(block: &str, max_chars: usize) -> Vec<&str> {
    if block.len() <= max_chars {
        return vec![block];
    }

    let mut pieces = Vec::new();
    let mut remaining = block;

    while remaining.len() > max_chars {
        let hard = snap_back(remaining, max_chars);
        let mut cut = remaining[..hard]
            .rfind('\n')
            .or_else(|| remaining[..hard].rfind(' '))
            .map(|pos| pos + 1)
            .unwrap_or(hard);
        cut = snap_back(remaining, cut);
        if cut == 0 {
            // Force progress past at least one char.
            cut = snap_forward(remaining, 1);
        }

        let piece = remaining[..cut].trim_end();
        if !piece.is_empty() {
            pieces.push(piece);
        }
        remaining = &remaining[cut..];
    }

    let rest = remaining.trim();
    if !rest.is_empty() {
        pieces.push(rest);
    }

    pieces
}

/// The last `overlap` characters of a chunk, starting at a char boundary.
fn overlap_tail(chunk: &str, overlap: usize) -> String {
    if overlap == 0 {
        return String::new();
    }
    if chunk.len() <= overlap {
        return chunk.to_string();
    }
    let start = snap_forward(chunk, chunk.len() - overlap);
    chunk[start..].to_string()
}

/// Snap a byte index forward to the nearest valid UTF-8 char boundary.
fn snap_forward(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Snap a byte index back to the nearest valid UTF-8 char boundary.
fn snap_back(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_single_chunk() {
        let chunks = chunk_markdown("# Title\n\nA short paragraph.");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("# Title"));
        assert!(chunks[0].contains("A short paragraph."));
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk_markdown("").is_empty());
        assert!(chunk_markdown("   \n\n  \n").is_empty());
    }

    #[test]
    fn chunks_respect_max_size() {
        let md = (0..40)
            .map(|i| format!("Paragraph number {i} with some filler words to give it length."))
            .collect::<Vec<_>>()
            .join("\n\n");

        let chunks = chunk_markdown(&md);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(
                chunk.len() <= MAX_CHUNK_CHARS,
                "chunk of {} chars exceeds limit",
                chunk.len()
            );
        }
    }

    #[test]
    fn adjacent_chunks_share_overlap() {
        let md = (0..30)
            .map(|i| format!("Sentence {i} repeated enough times to fill out a paragraph nicely."))
            .collect::<Vec<_>>()
            .join("\n\n");

        let chunks = chunk_markdown(&md);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail = overlap_tail(&pair[0], CHUNK_OVERLAP_CHARS);
            assert!(
                pair[1].starts_with(&tail),
                "next chunk does not begin with the previous chunk's tail"
            );
        }
    }

    #[test]
    fn splits_prefer_heading_boundaries() {
        let md = "## First\n\ncontent one\n\n## Second\n\ncontent two\n\n## Third\n\ncontent three";
        let chunks = chunk_with_limits(md, 30, 0);

        assert!(chunks.len() >= 3);
        for chunk in &chunks {
            assert!(chunk.starts_with("## "), "chunk split mid-section: {chunk:?}");
        }
    }

    #[test]
    fn heading_line_inside_paragraph_starts_new_block() {
        let md = "intro text\n# Heading\nbody text";
        let blocks = split_blocks(md);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "intro text");
        assert!(blocks[1].starts_with("# Heading"));
    }

    #[test]
    fn oversized_block_hard_split() {
        let word = "lorem ";
        let big = word.repeat(500); // 3000 chars, no paragraph breaks
        let chunks = chunk_markdown(&big);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= MAX_CHUNK_CHARS);
        }
    }

    #[test]
    fn chunk_order_is_reading_order() {
        let md = "# Alpha\n\nfirst body\n\n# Beta\n\nsecond body\n\n# Gamma\n\nthird body";
        let chunks = chunk_with_limits(md, 20, 0);

        let alpha = chunks.iter().position(|c| c.contains("Alpha")).unwrap();
        let beta = chunks.iter().position(|c| c.contains("Beta")).unwrap();
        let gamma = chunks.iter().position(|c| c.contains("Gamma")).unwrap();
        assert!(alpha < beta && beta < gamma);
    }

    #[test]
    fn multibyte_content_never_splits_a_char() {
        let md = "héllo wörld ünïcode ".repeat(100);
        let chunks = chunk_with_limits(&md, 64, 16);
        for chunk in &chunks {
            // Would panic on an invalid boundary; also sanity-check content.
            assert!(chunk.chars().count() > 0);
        }
    }

    #[test]
    fn is_atx_heading_cases() {
        assert!(is_atx_heading("# Title"));
        assert!(is_atx_heading("###### Deep"));
        assert!(!is_atx_heading("####### Too deep"));
        assert!(!is_atx_heading("#NoSpace"));
        assert!(!is_atx_heading("plain text"));
    }
}
