use plover_core::Result;
use url::Url;

/// Listing URL for one page of a subcategory
pub fn paginated_url(link: &str, page: usize) -> Result<String> {
    let mut url = Url::parse(link)?;
    url.query_pairs_mut().append_pair("page", &page.to_string());
    Ok(url.into())
}

/// Resolve an anchor's `href` against the site, leaving absolute URLs alone
pub fn resolve_href(base: &Url, href: &str) -> Result<String> {
    Ok(base.join(href.trim())?.into())
}

/// Strip a `mailto:` scheme from an email link target
pub fn email_from_href(href: &str) -> Option<String> {
    let href = href.trim();
    let address = match href.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("mailto:") => &href[7..],
        _ => href,
    };
    let address = address.trim();
    (!address.is_empty()).then(|| address.to_string())
}
