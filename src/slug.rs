//! Canonical, IRI-safe slugs for entity identity.
//!
//! Two mentions of the same person or URL that differ only by case, the folded
//! Spanish accents, commas/periods or other stripped characters produce the same
//! slug, and therefore resolve to the same graph entity.

/// Normalize free text into a slug made of `[a-z0-9-]`.
///
/// Applied in order: spaces become hyphens; á é í ó ú ç (either case) fold to
/// their ASCII base letter and ñ/Ñ becomes the digraph `gn`; commas and periods
/// are removed; everything is lowercased; any remaining character outside
/// `[a-z0-9-]` is dropped.
///
/// Each step acts on a single character, so the whole pipeline is done in one
/// pass.
pub fn normalize(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' => slug.push('-'),
            'á' | 'Á' => slug.push('a'),
            'é' | 'É' => slug.push('e'),
            'í' | 'Í' => slug.push('i'),
            'ó' | 'Ó' => slug.push('o'),
            'ú' | 'Ú' => slug.push('u'),
            'ç' | 'Ç' => slug.push('c'),
            'ñ' | 'Ñ' => slug.push_str("gn"),
            ',' | '.' => {}
            other => slug.extend(other.to_lowercase().filter(|l| is_slug_char(*l))),
        }
    }
    slug
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}
