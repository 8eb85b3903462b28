//! URL slugs derived from community names

/// Lowercases `name`, turns every run of characters outside `[a-z0-9]` into a
/// single `-`, and trims hyphens from both ends.
///
/// The output only ever contains `[a-z0-9-]` with no leading, trailing, or
/// doubled hyphen, so `slugify(&slugify(x)) == slugify(x)`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
