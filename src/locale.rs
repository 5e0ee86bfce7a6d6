//! Dictionary language resolution.

/// Language used when neither the caller, the configuration nor the
/// environment names one.
pub const DEFAULT_LANGUAGE: &str = "en_US";

/// Environment variable consulted for the default dictionary language.
pub const LANGUAGE_ENV_VAR: &str = "LANG";

/// Read the default language from the environment, if set.
pub fn env_language() -> Option<String> {
    std::env::var(LANGUAGE_ENV_VAR).ok()
}

/// Normalize a locale into a dictionary identifier.
///
/// `en_US.UTF-8` becomes `en_US`. A missing or empty locale, or one that is
/// empty once the encoding suffix is dropped, falls back to
/// [`DEFAULT_LANGUAGE`].
pub fn normalize(locale: Option<&str>) -> String {
    let primary = locale
        .map(|l| l.split('.').next().unwrap_or_default().trim())
        .unwrap_or_default();

    if primary.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        primary.to_string()
    }
}

/// Pick the first language available: explicit argument, configured value,
/// then environment. The winner is normalized.
pub fn resolve(explicit: Option<&str>, configured: Option<&str>, env: Option<&str>) -> String {
    let chosen = [explicit, configured, env]
        .into_iter()
        .flatten()
        .find(|l| !l.is_empty());
    normalize(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_encoding_suffix() {
        assert_eq!(normalize(Some("en_US.UTF-8")), "en_US");
        assert_eq!(normalize(Some("de_DE.ISO-8859-1")), "de_DE");
        assert_eq!(normalize(Some("fr_FR")), "fr_FR");
    }

    #[test]
    fn test_missing_locale_uses_default() {
        assert_eq!(normalize(None), "en_US");
        assert_eq!(normalize(Some("")), "en_US");
        assert_eq!(normalize(Some(".UTF-8")), "en_US");
    }

    #[test]
    fn test_resolution_order() {
        assert_eq!(resolve(Some("nb_NO"), Some("sv_SE"), Some("fi_FI.UTF-8")), "nb_NO");
        assert_eq!(resolve(None, Some("sv_SE"), Some("fi_FI.UTF-8")), "sv_SE");
        assert_eq!(resolve(None, None, Some("fi_FI.UTF-8")), "fi_FI");
        assert_eq!(resolve(None, Some(""), None), "en_US");
    }
}
