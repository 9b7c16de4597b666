use unicode_normalization::UnicodeNormalization;

/// Canonicalizes text for locale-insensitive comparison: lowercase,
/// NFD decomposition, then strip combining diacritical marks so that
/// "Aceró" compares equal to "acero". Pure and total; empty in,
/// empty out.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn strips_diacritics_and_lowercases() {
        assert_eq!(normalize("Aceró"), "acero");
        assert_eq!(normalize("ENCABADO"), "encabado");
        assert_eq!(normalize("Ñandú"), "nandu");
    }

    #[test]
    fn empty_input_is_identity() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn plain_ascii_passes_through() {
        assert_eq!(normalize("carbon steel"), "carbon steel");
    }
}
