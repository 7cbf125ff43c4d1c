//! Small string helpers shared by the exercises' display code.

/// Upper-cases the first letter of every run of letters and lower-cases the rest,
/// so `"cabin boy"` becomes `"Cabin Boy"` and `"RLS Legacy"` becomes `"Rls Legacy"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut inside_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if inside_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            inside_word = true;
        } else {
            out.push(ch);
            inside_word = false;
        }
    }
    out
}

/// `"  Long John Silver "` -> `"long_john_silver"`.
pub fn snake_key(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}

/// `"long_john_silver"` -> `"Long John Silver"`.
pub fn display_name(key: &str) -> String {
    title_case(&key.replace('_', " "))
}

pub fn center(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    // Odd margins put the extra fill on the left only when the width is odd too.
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;

    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat(fill).take(left));
    out.push_str(text);
    out.extend(std::iter::repeat(fill).take(right));
    out
}

pub fn ljust(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

/// Trims any of the characters in `set` from both ends.
pub fn strip_chars<'a>(text: &'a str, set: &str) -> &'a str {
    text.trim_matches(|c| set.contains(c))
}

pub fn is_alpha(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}

pub fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Resolves `[start:end]` against a sequence of `len` items.
pub fn slice_bounds(len: usize, start: i64, end: i64) -> (usize, usize) {
    let clamp = |index: i64| -> usize {
        let len = len as i64;
        let resolved = if index < 0 { index + len } else { index };
        resolved.clamp(0, len) as usize
    };
    let from = clamp(start);
    let to = clamp(end);
    if to < from {
        (from, from)
    } else {
        (from, to)
    }
}

/// Character-based `text[start:end]`.
pub fn char_slice(text: &str, start: i64, end: i64) -> String {
    let chars: Vec<char> = text.chars().collect();
    let (from, to) = slice_bounds(chars.len(), start, end);
    chars[from..to].iter().collect()
}

/// Renders names the way a list of strings prints in the journal: `['Luna', 'Nox']`.
pub fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| {
            let item = item.as_ref();
            if item.contains('\'') && !item.contains('"') {
                format!("\"{}\"", item)
            } else {
                format!("'{}'", item.replace('\'', "\\'"))
            }
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list(&["Luna", "Nox"]), "['Luna', 'Nox']");
        assert_eq!(quoted_list::<&str>(&[]), "[]");
        assert_eq!(quoted_list(&["o'malley"]), "[\"o'malley\"]");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("cabin boy"), "Cabin Boy");
        assert_eq!(title_case("RLS Legacy"), "Rls Legacy");
        assert_eq!(title_case("beast_of_burden"), "Beast_Of_Burden");
        assert_eq!(title_case("o'hara 2nd"), "O'Hara 2Nd");
    }

    #[test]
    fn test_keys_and_display_names() {
        assert_eq!(snake_key("  Long John Silver "), "long_john_silver");
        assert_eq!(display_name("dr_delbert_doppler"), "Dr Delbert Doppler");
    }

    #[test]
    fn test_center_padding() {
        assert_eq!(center("ACCESS LEVEL", 15, '='), "==ACCESS LEVEL=");
        assert_eq!(center("Alpha", 15, ' '), "     Alpha     ");
        assert_eq!(center("Beta", 15, ' '), "      Beta     ");
        assert_eq!(center("ab", 5, '*'), "**ab*");
        assert_eq!(center("abc", 2, '*'), "abc");
    }

    #[test]
    fn test_strip_chars() {
        assert_eq!(strip_chars("!!Hello, crew!.. ", ".,! "), "Hello, crew");
        assert_eq!(strip_chars("...", ".,! "), "");
    }

    #[test]
    fn test_alpha_and_decimal_checks() {
        assert!(is_alpha("Amelia"));
        assert!(!is_alpha("Amelia1"));
        assert!(!is_alpha(""));
        assert!(is_decimal("0451"));
        assert!(!is_decimal("04a1"));
    }

    #[test]
    fn test_char_slice() {
        let path = r"C:\Users\CaptainAmelia\StarCharts\Treasure_Map_Coords.dat";
        assert_eq!(char_slice(path, 9, 22), "CaptainAmelia");
        assert_eq!(char_slice(path, -4, i64::MAX), ".dat");
        assert_eq!(char_slice("abc", 5, 9), "");
    }
}
