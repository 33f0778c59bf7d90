//! Script-injection scrubbing for free text echoed back to clients.
//!
//! Only tags ammonia knows about are treated as markup. Any other `<` or `>`
//! is escaped and stays visible as text, and a bare `&` comes back unchanged.

use ammonia::Builder;
use std::collections::HashSet;

fn builder() -> Builder<'static> {
    let mut b = Builder::default();
    b.clean_content_tags(["script", "style"].into_iter().collect())
        .strip_comments(true);
    b
}

/// Strip scripts, event-handler attributes and unsafe URLs; keep harmless markup and plain text.
pub fn clean(text: &str) -> String {
    let b = builder();
    let mut markup = b.clone_tags();
    markup.extend(b.clone_clean_content_tags());
    let escaped = escape_stray_angles(text, &markup);
    b.clean(&escaped).to_string().replace("&amp;", "&")
}

pub fn clean_opt(text: Option<&str>) -> Option<String> {
    text.map(clean)
}

/// Escape every `<` and `>` that is not part of a tag named in `markup`.
fn escape_stray_angles(text: &str, markup: &HashSet<&str>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = rest.find(['<', '>']) {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        if tail.starts_with('<') {
            if let Some(end) = tag_len(tail, markup) {
                out.push_str(&tail[..end]);
                rest = &tail[end..];
                continue;
            }
            out.push_str("&lt;");
        } else {
            out.push_str("&gt;");
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

/// Byte length of the tag opening `s`, if `s` starts with an open or close tag from `markup`.
fn tag_len(s: &str, markup: &HashSet<&str>) -> Option<usize> {
    let body = s.strip_prefix('<')?;
    let body = body.strip_prefix('/').unwrap_or(body);
    let name_end = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_end].to_ascii_lowercase();
    if name.is_empty() || !markup.contains(name.as_str()) {
        return None;
    }
    match body[name_end..].chars().next() {
        Some(c) if c.is_whitespace() || c == '/' || c == '>' => {}
        _ => return None,
    }
    let mut quote = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(i + 1),
            None => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_removed_with_their_content() {
        let out = clean(r#"Naughty naughty very naughty <script>alert("xss");</script>"#);
        assert!(!out.contains("<script"));
        assert!(!out.contains("alert"));
        assert!(out.starts_with("Naughty naughty very naughty"));
    }

    #[test]
    fn event_handlers_are_dropped() {
        let out = clean(
            r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#,
        );
        assert!(!out.contains("onerror"));
        assert!(out.contains("<strong>all</strong>"));
        assert!(out.ends_with(". But not <strong>all</strong> bad."));
    }

    #[test]
    fn javascript_urls_and_styles_are_dropped() {
        let out = clean(r#"<a href="javascript:alert(1)">x</a><style>body{}</style>y"#);
        assert!(!out.contains("javascript"));
        assert!(!out.contains("body{}"));
        assert!(out.ends_with("x</a>y"));
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(clean("Just a title"), "Just a title");
        assert_eq!(clean("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(clean_opt(None), None);
    }

    #[test]
    fn angle_brackets_outside_markup_stay_as_text() {
        assert_eq!(clean("x<y and y>z"), "x&lt;y and y&gt;z");
        assert_eq!(clean("1 < 2"), "1 &lt; 2");
        assert_eq!(clean("Q&A: 1 < 2"), "Q&A: 1 &lt; 2");
        assert_eq!(clean("<b-side>"), "&lt;b-side&gt;");
    }

    #[test]
    fn quoted_angle_inside_allowed_tag_does_not_end_it() {
        let out = clean(r#"<abbr title="a > b">ab</abbr>"#);
        assert!(out.starts_with("<abbr"));
        assert!(out.ends_with(">ab</abbr>"));
    }
}
