use url::Url;

/// Parse `candidate` if it is an absolute URL with a scheme and a non-empty host.
pub fn parse_valid(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate).ok()?;
    if url.scheme().is_empty() { return None; }
    match url.host_str() {
        Some(h) if !h.is_empty() => Some(url),
        _ => None,
    }
}

/// The single URL policy used for the seed and for every discovered link.
pub fn is_valid(candidate: &str) -> bool {
    parse_valid(candidate).is_some()
}

/// Dedup key: the parsed form with the fragment dropped.
pub fn norm(u: &Url) -> String { let mut s = u.clone(); s.set_fragment(None); s.to_string() }
