use url::Url;

/// Derives a display name from a category URL
///
/// Takes the last non-empty path segment, turns underscores into spaces and
/// title-cases the result. Falls back to the host, then to the raw input,
/// when there is no usable segment.
///
/// # Examples
///
/// ```
/// use shop_sweep::url::category_name_from_url;
///
/// assert_eq!(
///     category_name_from_url("https://www.zveromir.ru/shop/suhoy_korm_dlya_koshek/"),
///     "Suhoy Korm Dlya Koshek"
/// );
/// ```
pub fn category_name_from_url(category_url: &str) -> String {
    let Ok(url) = Url::parse(category_url) else {
        return category_url.to_string();
    };

    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|s| s.to_string());

    match segment {
        Some(segment) => title_case(&segment.replace('_', " ")),
        None => url.host_str().unwrap_or(category_url).to_string(),
    }
}

/// Upper-cases the first letter of every run of letters and lower-cases the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
