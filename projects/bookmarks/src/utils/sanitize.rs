//! Output filter for user-supplied strings echoed in responses.
//!
//! Tags on the whitelist below (the `xss` package's defaults) are kept and
//! rebuilt in canonical form with only their whitelisted attributes;
//! everything else that looks like markup has its angle brackets escaped.
//! Ampersands are left alone, so entities produced by an earlier pass
//! survive unchanged and the filter is idempotent.

const ALIGN: &[&str] = &["align", "valign"];
const CELL: &[&str] = &["width", "rowspan", "colspan", "align", "valign"];
const COLUMN: &[&str] = &["align", "valign", "span", "width"];
const MEDIA: &[&str] = &["autoplay", "controls", "crossorigin", "loop", "muted", "preload", "src"];

/// Attributes allowed per tag, or `None` when the tag is not whitelisted.
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["target", "href", "title"],
        "abbr" => &["title"],
        "area" => &["shape", "coords", "href", "alt"],
        "audio" => MEDIA,
        "bdi" | "bdo" => &["dir"],
        "blockquote" => &["cite"],
        "col" | "colgroup" => COLUMN,
        "del" | "ins" => &["datetime"],
        "details" => &["open"],
        "font" => &["color", "size", "face"],
        "img" => &["src", "alt", "title", "width", "height", "loading"],
        "table" => &["width", "border", "align", "valign"],
        "tbody" | "tfoot" | "thead" => ALIGN,
        "td" | "th" => CELL,
        "tr" => &["rowspan", "align", "valign"],
        "video" => &[
            "autoplay", "controls", "crossorigin", "loop", "muted", "playsinline", "poster",
            "preload", "src", "height", "width",
        ],
        "address" | "article" | "aside" | "b" | "big" | "br" | "caption" | "center" | "cite"
        | "code" | "dd" | "div" | "dl" | "dt" | "em" | "figcaption" | "figure" | "footer"
        | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hr" | "i" | "kbd" | "li"
        | "mark" | "nav" | "ol" | "p" | "pre" | "s" | "section" | "small" | "span" | "sub"
        | "summary" | "sup" | "strong" | "strike" | "tt" | "u" | "ul" => &[],
        _ => return None,
    };
    Some(attrs)
}

/// Link-valued attributes are kept only with one of these prefixes.
const SAFE_LINK_PREFIXES: &[&str] = &[
    "http://", "https://", "mailto:", "tel:", "data:image/", "ftp://", "./", "../", "#", "/",
];

/// Sanitizes `input`. `None` is treated as an empty string.
pub fn sanitize_opt(input: Option<&str>) -> String {
    input.map(sanitize).unwrap_or_default()
}

pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(['<', '>']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with('>') {
            out.push_str("&gt;");
            rest = &tail[1..];
            continue;
        }

        // `tail` starts with '<'. A tag runs to the next '>' as long as no
        // other '<' comes first.
        let body = &tail[1..];
        match body.find(['<', '>']) {
            Some(end) if body[end..].starts_with('>') => match rebuild_tag(&body[..end]) {
                Some(tag) => {
                    out.push_str(&tag);
                    rest = &body[end + 1..];
                }
                None => {
                    out.push_str("&lt;");
                    rest = body;
                }
            },
            _ => {
                out.push_str("&lt;");
                rest = body;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Rebuilds the text between `<` and `>` when it names an allowed tag.
fn rebuild_tag(inner: &str) -> Option<String> {
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(stripped) => (true, stripped),
        None => (false, inner),
    };

    let name_len = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    let (name, attrs) = inner.split_at(name_len);
    if name.is_empty() || !(attrs.is_empty() || attrs.starts_with(|c: char| c.is_whitespace() || c == '/')) {
        return None;
    }

    let name = name.to_ascii_lowercase();
    let allowed = allowed_attributes(&name)?;

    if closing {
        return Some(format!("</{name}>"));
    }

    let mut tag = format!("<{name}");
    for (attr, value) in parse_attributes(attrs) {
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        let value = if is_link_attribute(&attr) && !is_safe_link(&value) {
            String::new()
        } else {
            escape_attribute(&value)
        };
        tag.push(' ');
        tag.push_str(&attr);
        // An emptied or empty value is written as a bare attribute.
        if !value.is_empty() {
            tag.push_str("=\"");
            tag.push_str(&value);
            tag.push('"');
        }
    }
    tag.push('>');
    Some(tag)
}

fn parse_attributes(mut input: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();

    loop {
        input = input.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if input.is_empty() {
            return attrs;
        }

        let name_end = input
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(input.len());
        let name = input[..name_end].to_ascii_lowercase();
        input = input[name_end..].trim_start();

        let Some(after_eq) = input.strip_prefix('=') else {
            attrs.push((name, String::new()));
            continue;
        };
        let after_eq = after_eq.trim_start();

        let (value, remaining) = match after_eq.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let quoted = &after_eq[1..];
                match quoted.find(quote) {
                    Some(end) => (&quoted[..end], &quoted[end + 1..]),
                    None => (quoted, ""),
                }
            }
            _ => {
                let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                after_eq.split_at(end)
            }
        };

        attrs.push((name, value.to_owned()));
        input = remaining;
    }
}

fn is_link_attribute(attr: &str) -> bool {
    matches!(attr, "href" | "src")
}

fn is_safe_link(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    SAFE_LINK_PREFIXES.iter().any(|prefix| value.starts_with(prefix))
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(sanitize("Rust & friends"), "Rust & friends");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn script_tags_are_escaped() {
        assert_eq!(
            sanitize(r#"<script>alert("xss");</script>"#),
            r#"&lt;script&gt;alert("xss");&lt;/script&gt;"#
        );
    }

    #[test]
    fn stray_brackets_are_escaped() {
        assert_eq!(sanitize("1 < 2 > 0"), "1 &lt; 2 &gt; 0");
        assert_eq!(sanitize("<>"), "&lt;&gt;");
        assert_eq!(sanitize("<<b>>"), "&lt;<b>&gt;");
    }

    #[test]
    fn allowed_tags_are_kept_without_event_handlers() {
        assert_eq!(
            sanitize(r#"<B onclick="steal()">bold</B>"#),
            "<b>bold</b>"
        );
        assert_eq!(sanitize("line<br/>break"), "line<br>break");
    }

    #[test]
    fn image_keeps_src_and_loses_onerror() {
        assert_eq!(
            sanitize(r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#),
            r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#
        );
    }

    #[test]
    fn default_whitelist_covers_layout_tags() {
        assert_eq!(
            sanitize(r#"<div class="x"><span>a</span><h2>b</h2><hr><sub>1</sub><sup>2</sup></div>"#),
            "<div><span>a</span><h2>b</h2><hr><sub>1</sub><sup>2</sup></div>"
        );
        assert_eq!(
            sanitize(r#"<table border="1" style="x"><tr><td colspan=2 onclick="y">c</td></tr></table>"#),
            r#"<table border="1"><tr><td colspan="2">c</td></tr></table>"#
        );
    }

    #[test]
    fn unsafe_links_keep_a_bare_attribute() {
        assert_eq!(
            sanitize(r#"<a href="javascript:alert(1)" title='t'>x</a>"#),
            r#"<a href title="t">x</a>"#
        );
        assert_eq!(sanitize("<img src=x onerror=alert(1)>"), "<img src>");
        assert_eq!(
            sanitize(r#"<img src="./pic.png" alt="">"#),
            r#"<img src="./pic.png" alt>"#
        );
        assert_eq!(
            sanitize("<a href=https://example.com target=_blank>x</a>"),
            r#"<a href="https://example.com" target="_blank">x</a>"#
        );
    }

    #[test]
    fn attribute_quotes_are_escaped() {
        assert_eq!(
            sanitize(r#"<a title='say "hi"'>x</a>"#),
            r#"<a title="say &quot;hi&quot;">x</a>"#
        );
    }

    #[test]
    fn missing_input_becomes_empty() {
        assert_eq!(sanitize_opt(None), "");
        assert_eq!(sanitize_opt(Some("<i>hi</i>")), "<i>hi</i>");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(input in r#"[a-zA-Z0-9 <>/="'&#:.]{0,64}"#) {
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn output_never_contains_disallowed_tags(body in "[a-z ]{0,16}") {
            let input = format!("<script>{body}</script><iframe src=x>");
            let out = sanitize(&input);
            prop_assert!(!out.contains("<script"));
            prop_assert!(!out.contains("<iframe"));
        }
    }
}
