use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Articles and prepositions skipped when deriving initials
const STOP_WORDS: [&str; 10] = ["de", "del", "la", "las", "los", "y", "da", "do", "das", "dos"];

/// Strip diacritical marks: canonical decomposition, then drop combining marks.
/// "Clínica" -> "Clinica"
pub fn normalize(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Initials of a facility name, ignoring stop words.
/// "Hospital de la Familia" -> "HF"
pub fn initials(name: &str) -> String {
    normalize(name)
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(&token.to_lowercase().as_str()))
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Storage-key-safe token for a name.
/// "Clínica Las Condes" -> "clinica-las-condes"
pub fn slug(name: &str) -> String {
    let mut out = String::new();
    let mut pending_separator = false;

    for c in normalize(name).to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("Clínica María Ñuñoa"), "Clinica Maria Nunoa");
    }

    #[test]
    fn test_normalize_plain_ascii_unchanged() {
        assert_eq!(normalize("Hospital Sotero"), "Hospital Sotero");
    }

    #[test]
    fn test_initials_basic() {
        assert_eq!(initials("Clínica Alemana"), "CA");
    }

    #[test]
    fn test_initials_skips_stop_words() {
        assert_eq!(initials("Hospital de la Familia"), "HF");
        assert_eq!(initials("Hospital DEL Salvador"), "HS");
        assert_eq!(initials("Clínica Las Condes"), "CC");
    }

    #[test]
    fn test_initials_accented_first_letter() {
        assert_eq!(initials("Óptica Ávila"), "OA");
    }

    #[test]
    fn test_initials_empty() {
        assert_eq!(initials(""), "");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Clínica Las Condes"), "clinica-las-condes");
        assert_eq!(slug("  Hospital (Sótero) del Río  "), "hospital-sotero-del-rio");
        assert_eq!(slug("default"), "default");
    }

    #[test]
    fn test_slug_collapses_separator_runs() {
        assert_eq!(slug("a -- b__c"), "a-b-c");
        assert_eq!(slug("---"), "");
    }
}
