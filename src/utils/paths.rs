//! Output location and file naming for finished clips

/// Longest title prefix kept in an output file name, in characters
pub const MAX_TITLE_CHARS: usize = 50;

/// Reduce a video title to characters that are safe in a file name
///
/// Keeps alphanumerics, `-`, `_`, space and `.`; path separators become `_`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(*c, '-' | '_' | ' ' | '.'))
        .take(MAX_TITLE_CHARS)
        .collect()
}

/// Default clip file name: `<title>_<start>_to_<end>.<ext>`
///
/// The time points are used as typed, with `:` swapped for `-`.
pub fn clip_file_name(title: Option<&str>, start: &str, end: &str, extension: &str) -> String {
    let safe_title = sanitize_title(title.unwrap_or("video"));
    format!(
        "{}_{}_to_{}.{}",
        safe_title,
        start.replace(':', "-"),
        end.replace(':', "-"),
        extension
    )
}
