// ── UTF-16 helpers ────────────────────────────────────────────────────────────
//
// The native dialog speaks NUL-terminated UTF-16 ("wide") strings only.
// No `unsafe` here.

use std::path::{Path, PathBuf};

/// Encode `s` as UTF-16 with a single terminating NUL.
pub fn to_wide_null(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Encode a path as UTF-16 with a terminating NUL.
///
/// On Windows the raw `OsStr` units are used so unpaired surrogates survive;
/// elsewhere the path goes through a lossy UTF-8 conversion.
pub fn path_to_wide_null(path: &Path) -> Vec<u16> {
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStrExt;
        path.as_os_str().encode_wide().chain(std::iter::once(0)).collect()
    }
    #[cfg(not(windows))]
    {
        to_wide_null(&path.to_string_lossy())
    }
}

/// The units of `buf` before the first NUL (the whole slice if there is none).
pub fn until_nul(buf: &[u16]) -> &[u16] {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    &buf[..len]
}

/// Decode a NUL-terminated UTF-16 buffer, replacing invalid sequences.
pub fn string_from_wide(buf: &[u16]) -> String {
    String::from_utf16_lossy(until_nul(buf))
}

/// Convert a NUL-terminated UTF-16 buffer to a `PathBuf`.
pub fn path_from_wide(buf: &[u16]) -> PathBuf {
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStringExt;
        PathBuf::from(std::ffi::OsString::from_wide(until_nul(buf)))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from(string_from_wide(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_single_nul() {
        assert_eq!(to_wide_null("ab"), vec![u16::from(b'a'), u16::from(b'b'), 0]);
        assert_eq!(to_wide_null(""), vec![0]);
    }

    #[test]
    fn stops_at_first_nul() {
        let mut buf = to_wide_null("C:\\a.png");
        buf.extend(to_wide_null("garbage"));
        assert_eq!(string_from_wide(&buf), "C:\\a.png");
    }

    #[test]
    fn unterminated_buffer_decodes_whole() {
        let buf: Vec<u16> = "abc".encode_utf16().collect();
        assert_eq!(string_from_wide(&buf), "abc");
    }

    #[test]
    fn non_ascii_survives() {
        let buf = to_wide_null("C:\\Bilder\\Größe.png");
        assert_eq!(path_from_wide(&buf), PathBuf::from("C:\\Bilder\\Größe.png"));
    }

    #[test]
    fn path_encoding_matches_str_encoding() {
        assert_eq!(path_to_wide_null(Path::new("dir")), to_wide_null("dir"));
    }
}
