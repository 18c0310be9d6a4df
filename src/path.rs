//! Directory path normalization.

/// Normalizes a directory path to a canonical `/`-separated form.
///
/// Backslashes become `/`, repeated separators collapse and a trailing
/// separator is dropped (the root `/` itself is kept).
///
/// # Examples
/// ```
/// use i18n_translator::path::normalize_directory_separator;
///
/// assert_eq!(normalize_directory_separator("lang\\en\\"), "lang/en");
/// assert_eq!(normalize_directory_separator("/srv//lang/"), "/srv/lang");
/// ```
#[must_use]
pub fn normalize_directory_separator(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_was_separator = false;

    for c in path.chars() {
        let is_separator = c == '/' || c == '\\';
        if is_separator {
            if !previous_was_separator {
                normalized.push('/');
            }
        } else {
            normalized.push(c);
        }
        previous_was_separator = is_separator;
    }

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}
