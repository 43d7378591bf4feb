//! Repair of query text that was decoded with the wrong charset.
//!
//! Need files are UTF-8, but text that passed through a Latin-1 / CP-1252
//! decoder turns every accented letter into `Ã` plus a second character.
//! Only the pairs that occur in Spanish text are mapped back.

/// Second character after `Ã` → the letter it stands for.
const MOJIBAKE: &[(char, char)] = &[
    ('¡', 'á'),
    ('©', 'é'),
    ('\u{AD}', 'í'),
    ('³', 'ó'),
    ('º', 'ú'),
    ('±', 'ñ'),
    ('¼', 'ü'),
    ('\u{81}', 'Á'),
    ('‰', 'É'),
    ('“', 'Ó'),
    ('š', 'Ú'),
    ('‘', 'Ñ'),
    ('\u{91}', 'Ñ'),
    ('œ', 'Ü'),
];

/// Trim `raw` and undo Latin-1 mojibake for Spanish letters.
///
/// Clean text is returned trimmed and otherwise unchanged, so applying this
/// twice gives the same result as applying it once.
pub fn sanitize(raw: &str) -> String {
    let text = raw.trim();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == 'Ã' {
            if let Some(&next) = chars.peek() {
                if let Some(&(_, fixed)) = MOJIBAKE.iter().find(|(k, _)| *k == next) {
                    out.push(fixed);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_spanish_letters() {
        assert_eq!(sanitize("canciÃ³n"), "canción");
        assert_eq!(sanitize("espaÃ±ol"), "español");
        assert_eq!(sanitize("ESPAÃ‘A"), "ESPAÑA");
        assert_eq!(sanitize("ESPA\u{C3}\u{91}A"), "ESPAÑA");
        assert_eq!(sanitize("mÃ¡s cafÃ© aquÃ\u{AD} Ãºltimo"), "más café aquí último");
        assert_eq!(sanitize("pingÃ¼ino"), "pingüino");
    }

    #[test]
    fn clean_text_is_only_trimmed() {
        assert_eq!(sanitize("  SELECT ?x WHERE { ?x ?p \"Ñandú\" }\n"), "SELECT ?x WHERE { ?x ?p \"Ñandú\" }");
        assert_eq!(sanitize("Ã"), "Ã");
        assert_eq!(sanitize("ÃX"), "ÃX");
    }

    #[test]
    fn idempotent() {
        for raw in ["canciÃ³n ", "ÃÃ³", "plain", "  ", "aÃ±o Ã‘u"] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once);
        }
    }
}
