//! Batch file parsing
//!
//! One tool per line as `name, url`. The separator may be `|`, `,` or plain
//! whitespace (the URL is then the last word). Blank lines and lines
//! starting with `#` are skipped.

use crate::error::PostError;
use crate::fetchers::parse_http_url;
use crate::types::ToolRequest;
use tracing::warn;

/// Parse a batch file into requests, in input order
///
/// Lines that cannot be understood are logged and skipped.
pub fn parse_batch(contents: &str, contributor: &str, category: &str) -> Vec<ToolRequest> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match parse_line(line) {
            Ok(Some((name, url))) => Some(ToolRequest::new(name, url, contributor, category)),
            Ok(None) => None,
            Err(reason) => {
                let err = PostError::InvalidBatchLine {
                    line: i + 1,
                    reason,
                };
                warn!(error = %err, "Skipping batch line");
                None
            }
        })
        .collect()
}

/// Split one line into name and URL; `Ok(None)` for blank and comment lines
fn parse_line(line: &str) -> Result<Option<(String, String)>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, url) = if let Some((name, url)) = line.split_once('|') {
        (name, url)
    } else if let Some((name, url)) = line.rsplit_once(',') {
        (name, url)
    } else if let Some((name, url)) = line.rsplit_once(char::is_whitespace) {
        (name, url)
    } else {
        return Err("expected a name and a URL".to_string());
    };

    let name = name.trim();
    let url = url.trim();
    if name.is_empty() {
        return Err("missing tool name".to_string());
    }
    if parse_http_url(url).is_err() {
        return Err(format!("not an http(s) URL: {}", url));
    }

    Ok(Some((name.to_string(), url.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiters() {
        let contents = "Canva, https://www.canva.com\n\
                        Notion | https://www.notion.so\n\
                        Google Gemini https://gemini.google.com\n";
        let requests = parse_batch(contents, "AIC Community", "AI");

        let pairs: Vec<(&str, &str)> = requests.iter().map(|r| (r.name(), r.url())).collect();
        assert_eq!(
            pairs,
            vec![
                ("Canva", "https://www.canva.com"),
                ("Notion", "https://www.notion.so"),
                ("Google Gemini", "https://gemini.google.com"),
            ]
        );
        assert!(requests
            .iter()
            .all(|r| r.contributor() == "AIC Community" && r.category() == "AI"));
    }

    #[test]
    fn test_skips_comments_and_blanks_in_order() {
        let contents = "# tools for August\n\
                        A, https://a.example\n\
                        \n\
                        B, https://b.example\n\
                        \t  \n\
                        C, https://c.example\n";
        let names: Vec<String> = parse_batch(contents, "x", "y")
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_invalid_lines_skipped() {
        let contents = "JustAName\n, https://no-name.example\nBad, ftp://x.example\nGood, https://ok.example";
        let requests = parse_batch(contents, "x", "y");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name(), "Good");
    }

    #[test]
    fn test_name_with_comma_uses_last_comma() {
        let requests = parse_batch("Acme, Inc., https://acme.example", "x", "y");
        assert_eq!(requests[0].name(), "Acme, Inc.");
        assert_eq!(requests[0].url(), "https://acme.example");
    }
}
