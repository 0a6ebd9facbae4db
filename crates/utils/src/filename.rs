/// Characters allowed in a sanitized name besides ASCII lowercase letters and digits.
const SAFE_PUNCTUATION: [char; 3] = ['.', '_', '-'];

/// Returns the last path component, accepting both `/` and `\` as separators.
pub fn base_name(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name)
}

/// Splits a base name into stem and extension (extension keeps its leading dot).
///
/// A leading dot does not start an extension, so `.env` has no extension.
pub fn split_extension(base: &str) -> (&str, &str) {
    match base.rfind('.') {
        Some(idx) if idx > 0 => (&base[..idx], &base[idx..]),
        _ => (base, ""),
    }
}

/// Lower-cased extension of a user-supplied filename, including the dot, or `""`.
pub fn extension_of(name: &str) -> String {
    split_extension(base_name(name)).1.to_lowercase()
}

/// Normalizes a user-supplied filename into a storage-safe fragment.
///
/// Directory and extension are dropped, the stem is lower-cased, every run of
/// characters outside `[a-z0-9._-]` becomes a single `-`, dash runs collapse
/// and leading/trailing dashes are trimmed. The result may be empty.
pub fn sanitize(original_name: &str) -> String {
    let (stem, _) = split_extension(base_name(original_name));
    let lowered = stem.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        let safe = ch.is_ascii_lowercase() || ch.is_ascii_digit() || SAFE_PUNCTUATION.contains(&ch);
        let next = if safe { ch } else { '-' };
        if next == '-' && out.ends_with('-') {
            continue;
        }
        out.push(next);
    }

    out.trim_matches('-').to_string()
}

/// Like [`sanitize`], but never empty: falls back to a random identifier.
pub fn sanitize_or_generate(original_name: &str) -> String {
    let name = sanitize(original_name);
    if name.is_empty() {
        uuid::Uuid::new_v4().simple().to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(name: &str) -> bool {
        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || SAFE_PUNCTUATION.contains(&c))
            && !name.contains("--")
            && !name.starts_with('-')
            && !name.ends_with('-')
    }

    #[test]
    fn test_sanitize_examples() {
        assert_eq!(sanitize("My Photo!! .PNG"), "my-photo");
        assert_eq!(sanitize("report_final.v2.pdf"), "report_final.v2");
        assert_eq!(sanitize("Été à Paris.jpg"), "t-paris");
        assert_eq!(sanitize("--hello---world--.txt"), "hello-world");
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("C:\\Users\\me\\Cat Pic.jpeg"), "cat-pic");
    }

    #[test]
    fn test_sanitize_output_is_always_well_formed() {
        let inputs = [
            "", "!!!", "a", "-a-", "  spaced  out  ", "emoji 🎉 party.png", ".hidden",
            "UPPER_case-Mixed.Name.TAR.GZ", "tab\tand\nnewline", "a/b\\c d.e",
        ];
        for input in inputs {
            let out = sanitize(input);
            assert!(is_well_formed(&out), "{:?} -> {:?}", input, out);
        }
    }

    #[test]
    fn test_sanitize_all_symbols_is_empty() {
        assert_eq!(sanitize("!!!@@@.png"), "");
    }

    #[test]
    fn test_sanitize_or_generate_fallback() {
        let generated = sanitize_or_generate("!!!@@@.png");
        assert_eq!(generated.len(), 32);
        assert!(is_well_formed(&generated));
        assert_eq!(sanitize_or_generate("Cat.png"), "cat");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Photo.JPG"), ".jpg");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".env"), "");
        assert_eq!(extension_of("dir.d/file"), "");
    }
}
