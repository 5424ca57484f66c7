//! HTML rendering for the browse pages

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use bucketview_core::keys;
use bucketview_s3::Listing;

/// Characters percent-encoded inside href paths. `/` stays literal so
/// multi-segment paths keep their structure.
const HREF_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%');

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn encode_path(s: &str) -> String {
    utf8_percent_encode(s, HREF_PATH).to_string()
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{}</title>
</head>
<body>
{}
</body>
</html>"#,
        html_escape(title),
        body
    )
}

/// Render the bucket index page.
pub fn render_index(buckets: &[String]) -> String {
    let items: String = buckets
        .iter()
        .map(|name| {
            format!(
                r#"    <li><a href="/browse/{}">{}</a></li>"#,
                encode_path(name),
                html_escape(name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"  <h1>Buckets</h1>
  <ul>
{}
  </ul>"#,
        items
    );
    page("Buckets", &body)
}

/// Render the object browser for `bucket`/`path`.
pub fn render_browser(bucket: &str, path: &str, listing: &Listing) -> String {
    let title = if path.is_empty() {
        bucket.to_string()
    } else {
        format!("{bucket}/{path}")
    };

    let up_href = if path.is_empty() {
        "/".to_string()
    } else {
        let parent = keys::parent_path(path);
        if parent.is_empty() {
            format!("/browse/{}", encode_path(bucket))
        } else {
            format!("/browse/{}/{}", encode_path(bucket), encode_path(parent))
        }
    };

    let prefix_items: String = listing
        .prefixes
        .iter()
        .map(|prefix| {
            let target = prefix.trim_end_matches('/');
            format!(
                r#"    <li><a href="/browse/{}/{}">{}/</a></li>"#,
                encode_path(bucket),
                encode_path(target),
                html_escape(keys::file_name(target))
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let key_items: String = listing
        .keys
        .iter()
        .map(|key| {
            format!(
                r#"    <li><a href="/download/{}/{}">{}</a></li>"#,
                encode_path(bucket),
                encode_path(&keys::sanitize_key(key)),
                html_escape(keys::file_name(key))
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"  <h1>{}</h1>
  <p><a href="{}">Up</a></p>
  <h2>Folders</h2>
  <ul>
{}
  </ul>
  <h2>Objects</h2>
  <ul>
{}
  </ul>"#,
        html_escape(&title),
        up_href,
        prefix_items,
        key_items
    );
    page(&title, &body)
}

/// Render a plain error page.
pub fn render_error(message: &str) -> String {
    let body = format!(
        r#"  <h1>Request failed</h1>
  <p>{}</p>
  <p><a href="/">Back to buckets</a></p>"#,
        html_escape(message)
    );
    page("Request failed", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(
            html_escape(r#"<b>&"x'"#),
            "&lt;b&gt;&amp;&quot;x&#39;"
        );
    }

    #[test]
    fn test_index_links_to_browse() {
        let html = render_index(&["docs".to_string(), "logs".to_string()]);
        assert!(html.contains(r#"<a href="/browse/docs">docs</a>"#));
        assert!(html.contains(r#"<a href="/browse/logs">logs</a>"#));
    }

    #[test]
    fn test_browser_links_use_display_keys() {
        let listing = Listing {
            keys: vec!["a/b.txt".to_string()],
            prefixes: vec!["a/deep/".to_string()],
        };
        let html = render_browser("docs", "a", &listing);
        assert!(html.contains(r#"<a href="/download/docs/a-b.txt">b.txt</a>"#));
        assert!(html.contains(r#"<a href="/browse/docs/a/deep">deep/</a>"#));
        assert!(html.contains(r#"<a href="/browse/docs">Up</a>"#));
    }

    #[test]
    fn test_root_browser_up_link_is_index() {
        let listing = Listing::default();
        let html = render_browser("docs", "", &listing);
        assert!(html.contains(r#"<a href="/">Up</a>"#));
    }

    #[test]
    fn test_interpolated_text_is_escaped() {
        let html = render_index(&["<script>".to_string()]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_href_segments_percent_encoded() {
        let listing = Listing {
            keys: vec!["my file.txt".to_string()],
            prefixes: vec![],
        };
        let html = render_browser("docs", "", &listing);
        assert!(html.contains("/download/docs/my%20file.txt"));
    }
}
