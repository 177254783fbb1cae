use std::path::Path;

// Characters marking the end of an enumeration prefix, such as `a)` or `1.`.
// They are tried in this order, and only the first match is removed.
const QUESTION_START_CHARS: [char; 4] = [')', '.', ']', '&'];

const TEX_CHARS_ESCAPE: [char; 7] = ['%', '&', '#', '_', '$', '{', '}'];

pub fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "poll".to_string())
}

/// Removes an enumeration prefix (`a) `, `3. `, `[b] `...) found within the
/// first `max_len` characters of `s`, along with the spaces that follow it.
pub fn remove_question_start(s: &str, max_len: usize) -> String {
    for marker in QUESTION_START_CHARS {
        if let Some((idx, (byte_idx, _))) = s
            .char_indices()
            .enumerate()
            .find(|(_, (_, c))| *c == marker)
        {
            if idx <= max_len {
                return s[byte_idx + marker.len_utf8()..]
                    .trim_start_matches(' ')
                    .to_string();
            }
        }
    }
    s.to_string()
}

pub fn escape_tex(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => res.push_str("\\textbackslash{}"),
            '~' => res.push_str("\\textasciitilde{}"),
            '^' => res.push_str("\\textasciicircum{}"),
            _ if TEX_CHARS_ESCAPE.contains(&c) => {
                res.push('\\');
                res.push(c);
            }
            _ => res.push(c),
        }
    }
    res
}
