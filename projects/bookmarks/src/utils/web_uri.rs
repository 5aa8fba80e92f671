use url::Url;

const RESERVED: &str = ":/?#[]@!$&'()*+,;=";
const UNRESERVED_PUNCT: &str = "-._~";

/// Returns `true` for an absolute `http`/`https` URL with a host.
///
/// The raw string must already be RFC 3986 syntax: `http://` or `https://`
/// followed by a non-empty authority, only unreserved, reserved or `%`
/// characters, and every `%` starting a two-digit hex escape. `Url::parse`
/// alone would percent-encode or normalize anything else into shape.
pub fn is_web_uri(candidate: &str) -> bool {
    let Some(after_scheme) = strip_web_scheme(candidate) else {
        return false;
    };

    let authority_end = after_scheme.find(['/', '?', '#']).unwrap_or(after_scheme.len());
    if authority_end == 0 || !has_uri_syntax(candidate) {
        return false;
    }

    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

fn strip_web_scheme(candidate: &str) -> Option<&str> {
    ["http://", "https://"].iter().find_map(|prefix| {
        candidate
            .get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map(|_| &candidate[prefix.len()..])
    })
}

fn has_uri_syntax(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let escape_ok = bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
            if !escape_ok {
                return false;
            }
            i += 3;
            continue;
        }
        let allowed = b.is_ascii_alphanumeric()
            || UNRESERVED_PUNCT.as_bytes().contains(&b)
            || RESERVED.as_bytes().contains(&b);
        if !allowed {
            return false;
        }
        i += 1;
    }
    true
}
