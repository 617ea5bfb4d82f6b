//! Boundary-aware text chunking
//!
//! Splits a document into overlapping segments sized for ingestion into a
//! retrieval index. Splits prefer sentence ends, then paragraph breaks, and
//! fall back to a hard cut when neither occurs before the size limit.
//! Positions are character positions, not bytes; the corpus is largely CJK.

/// Default maximum characters per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Default characters of overlap between adjacent chunks
pub const DEFAULT_OVERLAP: usize = 100;

/// Splits `text` into overlapping, boundary-aware chunks
///
/// Each chunk holds at most `chunk_size` characters unless no sentence or
/// paragraph boundary exists before the limit. Adjacent chunks share up to
/// `overlap` characters. The cursor must strictly advance on every
/// iteration; when the overlap would swallow an entire short chunk, the
/// overlap is skipped for that boundary.
///
/// # Arguments
///
/// * `text` - The text to split
/// * `chunk_size` - Maximum characters per chunk
/// * `overlap` - Characters shared between adjacent chunks
///
/// # Returns
///
/// Chunks in document order; empty input yields an empty vector.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < len {
        let mut end = (start + chunk_size).min(len);

        // Not the final chunk: snap backward to a natural boundary.
        if end < len {
            if let Some(p) = rfind_sentence_end(&chars, start, end) {
                end = p + 1; // one past the terminator character
            } else if let Some(p) = rfind_paragraph_break(&chars, start, end) {
                end = p + 2; // two past the first newline
            }
        }

        chunks.push(chars[start..end].iter().collect());

        if end >= len {
            break;
        }

        let next = end.saturating_sub(overlap);
        start = if next > start { next } else { end };
    }

    chunks
}

/// Sentence terminators recognized by the chunker (ASCII and the full-width
/// ideographic full stop)
fn is_sentence_terminator(c: char) -> bool {
    matches!(c, '.' | '?' | '!' | '。')
}

/// Finds the rightmost sentence terminator in `[start, end)` that is
/// immediately followed by a space or newline, strictly after `start`.
fn rfind_sentence_end(chars: &[char], start: usize, end: usize) -> Option<usize> {
    if end < start + 2 {
        return None;
    }
    (start + 1..=end - 2)
        .rev()
        .find(|&p| is_sentence_terminator(chars[p]) && matches!(chars[p + 1], ' ' | '\n'))
}

/// Finds the rightmost paragraph break (double newline) in `[start, end)`,
/// strictly after `start`. Returns the position of the first newline.
fn rfind_paragraph_break(chars: &[char], start: usize, end: usize) -> Option<usize> {
    if end < start + 2 {
        return None;
    }
    (start + 1..=end - 2)
        .rev()
        .find(|&p| chars[p] == '\n' && chars[p + 1] == '\n')
}
