use url::Url;

/// Resolves an href or src attribute against the shop origin
///
/// Surrounding whitespace is trimmed first. Returns `None` for empty values,
/// values that cannot be joined, and anything that does not resolve to an
/// http(s) URL.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use shop_sweep::url::resolve_link;
///
/// let base = Url::parse("https://shop.example/").unwrap();
/// assert_eq!(
///     resolve_link(&base, " /goods/12/ ").as_deref(),
///     Some("https://shop.example/goods/12/")
/// );
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let absolute = base.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute.to_string()),
        _ => None,
    }
}

/// Returns the address of page `page` (1-based) of a category listing
///
/// Page 1 is the category URL verbatim. Later pages append `page/<n>/`,
/// inserting the separating slash when the category URL lacks one.
///
/// # Examples
///
/// ```
/// use shop_sweep::url::catalog_page_url;
///
/// let base = "https://shop.example/shop/furminatori/";
/// assert_eq!(catalog_page_url(base, 1), base);
/// assert_eq!(
///     catalog_page_url(base, 3),
///     "https://shop.example/shop/furminatori/page/3/"
/// );
/// ```
pub fn catalog_page_url(category_url: &str, page: u32) -> String {
    if page <= 1 {
        return category_url.to_string();
    }

    if category_url.ends_with('/') {
        format!("{}page/{}/", category_url, page)
    } else {
        format!("{}/page/{}/", category_url, page)
    }
}
