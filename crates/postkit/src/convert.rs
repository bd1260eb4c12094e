//! Visible-text extraction from HTML
//!
//! Used by the plain-HTTP page fetcher to approximate what a browser would
//! report as the body's inner text.

/// Elements whose content is never visible
const HIDDEN_TAGS: &[&str] = &["head", "script", "style", "noscript", "iframe", "svg", "template"];

/// Elements that start a new line of visible text
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "section", "article",
    "header", "footer", "nav", "main", "ul", "ol", "table", "blockquote", "hr",
];

/// Convert HTML to the text a reader would see
pub fn html_to_text(html: &str) -> String {
    let mut output = String::new();
    let mut hidden: Vec<String> = Vec::new();

    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' {
            let mut tag = String::new();
            while let Some(next) = chars.next() {
                if next == '>' {
                    break;
                }
                tag.push(next);
            }

            // Comments and doctype
            if tag.starts_with('!') || tag.starts_with('?') {
                continue;
            }

            let tag_lower = tag.to_lowercase();
            let is_closing = tag_lower.starts_with('/');
            let tag_name = tag_lower
                .trim_start_matches('/')
                .split(|ch: char| ch.is_whitespace() || ch == '/')
                .next()
                .unwrap_or("");

            if HIDDEN_TAGS.contains(&tag_name) {
                if is_closing {
                    if let Some(pos) = hidden.iter().rposition(|t| t == tag_name) {
                        hidden.truncate(pos);
                    }
                } else if !tag.ends_with('/') {
                    hidden.push(tag_name.to_string());
                }
                continue;
            }

            if !hidden.is_empty() {
                continue;
            }

            if BLOCK_TAGS.contains(&tag_name) {
                output.push('\n');
            } else if matches!(tag_name, "td" | "th") && !is_closing {
                output.push(' ');
            }
        } else if hidden.is_empty() {
            output.push(decode_entity(c, &mut chars));
        }
    }

    clean_whitespace(&output)
}

/// Decode HTML entity starting from ampersand
fn decode_entity(c: char, chars: &mut std::iter::Peekable<std::str::Chars>) -> char {
    if c != '&' {
        return c;
    }

    // Look ahead without consuming text that is not an entity
    let lookahead: String = chars.clone().take(12).collect();
    let Some(end) = lookahead.find(';') else {
        return '&';
    };
    let entity = &lookahead[..end];
    if entity.is_empty() || entity.chars().any(char::is_whitespace) {
        return '&';
    }

    let decoded = match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        "mdash" => Some('—'),
        "ndash" => Some('–'),
        "copy" => Some('©'),
        "reg" => Some('®'),
        "trade" => Some('™'),
        "hellip" => Some('…'),
        _ => entity.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };

    match decoded {
        Some(ch) => {
            // Consume entity body and the semicolon
            for _ in 0..=entity.chars().count() {
                chars.next();
            }
            ch
        }
        None => '&',
    }
}

/// Collapse whitespace runs, trim lines, keep at most one blank line
pub fn clean_whitespace(s: &str) -> String {
    let mut result = String::new();
    let mut last_was_space = false;
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            if result.ends_with(' ') {
                result.pop();
            }
            newline_count += 1;
            last_was_space = true;
            if newline_count <= 2 {
                result.push(c);
            }
        } else if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            newline_count = 0;
            last_was_space = false;
            result.push(c);
        }
    }

    result.trim().to_string()
}

/// Truncate to at most `max_chars` characters
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
