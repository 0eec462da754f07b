//! Hashtag extraction.

/// Hashtags in `text`, in order of appearance.
///
/// A hashtag is `#` followed by one or more word characters (letters,
/// digits, `_`) and must start the text or follow a non-word character.
/// Tokens keep their `#` and their casing; duplicates are kept.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        prev = if c == '#' && !prev.is_some_and(is_word) {
            let mut end = start + c.len_utf8();
            let mut last = c;
            while let Some(&(i, next)) = chars.peek() {
                if !is_word(next) {
                    break;
                }
                end = i + next.len_utf8();
                last = next;
                chars.next();
            }
            if last != '#' {
                tags.push(text[start..end].to_string());
            }
            Some(last)
        } else {
            Some(c)
        };
    }

    tags
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
