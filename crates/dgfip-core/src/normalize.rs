//! # Name Normalization
//!
//! Stored names are upper-case ASCII without accents or separators, so
//! names asserted by FranceConnect are folded the same way before lookup.
//!
//! ## Known limitation
//!
//! The transliteration covers a fixed set of accented Latin letters
//! (French, Spanish, Nordic ligatures). Anything outside that set is not
//! transliterated; it is dropped by the final `[A-Za-z0-9]` filter. This is
//! not Unicode normalization and is not meant to be.

/// Map one accented Latin character to its unaccented spelling.
///
/// Returns `None` for characters outside the fixed table.
fn transliterate(c: char) -> Option<&'static str> {
    let plain = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' => "C",
        'ç' => "c",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ñ' => "N",
        'ñ' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'Ý' | 'Ÿ' => "Y",
        'ý' | 'ÿ' => "y",
        _ => return None,
    };
    Some(plain)
}

/// Fold a name into the stored form: transliterate accents, keep only
/// `[A-Za-z0-9]`, upper-case.
///
/// ```
/// use dgfip_core::normalize;
///
/// assert_eq!(normalize("Nuñez"), "NUNEZ");
/// assert_eq!(normalize("Cårløs"), "CARLOS");
/// assert_eq!(normalize("Le Bœuf-Dupré"), "LEBOEUFDUPRE");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match transliterate(c) {
            Some(plain) => out.push_str(plain),
            None if c.is_ascii_alphanumeric() => out.push(c),
            None => {}
        }
    }
    out.make_ascii_uppercase();
    out
}

/// First whitespace-separated token of a given-name claim.
///
/// FranceConnect sends every given name (`"Stéphane Louis Perceval"`);
/// the tax record only holds the first one.
pub fn first_given_name(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}
