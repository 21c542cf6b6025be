/// Slugify a display name into a route segment: lowercase alphanumerics with
/// single dashes, leading slash ("Pricing Page v2" -> "/pricing-page-v2").
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len() + 1);
    slug.push('/');

    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && slug.len() > 1 {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.len() == 1 {
        slug.push_str("screen");
    }
    slug
}
