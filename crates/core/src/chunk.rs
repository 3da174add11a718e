//! Sentence-boundary chunking for oversized transcripts.
//!
//! Only the first chunk is returned; anything after it is dropped.

/// Split `text` into sentences ending in `.`, `!` or `?` followed by whitespace.
///
/// Terminal punctuation stays with its sentence; the separating whitespace is dropped.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(_, next)) = chars.peek() else {
            continue;
        };
        if next.is_whitespace() {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Greedily pack sentences into a buffer of at most `max_size` characters and
/// return the first closed chunk.
pub fn chunk(text: &str, max_size: usize) -> String {
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in sentences(text) {
        let len = sentence.chars().count();
        let joined = if current.is_empty() {
            len
        } else {
            current_len + 1 + len
        };

        if joined > max_size && !current.is_empty() {
            break;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence);
        current_len = joined;
    }

    truncate_chars(current, max_size)
}

fn truncate_chars(mut s: String, max_chars: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max_chars) {
        s.truncate(idx);
    }
    s
}
