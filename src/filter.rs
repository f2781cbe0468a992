// ── File-type filters ─────────────────────────────────────────────────────────
//
// The dialog's `lpstrFilter` is a list of NUL-terminated UTF-16 strings in
// label/pattern pairs, closed by one extra NUL:
//
//     "PNG file (*.png)\0*.PNG\0All files\0*.*\0\0"
//
// A pattern list holds one or more globs joined with `;`.

use serde::{Deserialize, Serialize};

use crate::error::{OfnError, Result};

/// One entry of the dialog's file-type drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    /// Text shown in the drop-down, e.g. `"Images (*.png;*.jpg)"`.
    pub label: String,
    /// Glob patterns, e.g. `["*.png", "*.jpg"]`.
    pub patterns: Vec<String>,
}

impl FileFilter {
    pub fn new<L, I, P>(label: L, patterns: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            label: label.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

/// An encoded, validated filter list ready to hand to the native dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterString(Vec<u16>);

impl FilterString {
    /// Encode a list of filters.
    pub fn new(filters: &[FileFilter]) -> Result<Self> {
        if filters.is_empty() {
            return Err(OfnError::InvalidFilter("filter list is empty".to_owned()));
        }

        let mut units = Vec::new();
        for filter in filters {
            if filter.label.is_empty() {
                return Err(OfnError::InvalidFilter("filter label is empty".to_owned()));
            }
            if filter.label.contains('\0') {
                return Err(OfnError::InvalidFilter(format!(
                    "label {:?} contains NUL",
                    filter.label
                )));
            }
            if filter.patterns.is_empty() {
                return Err(OfnError::InvalidFilter(format!(
                    "filter {:?} has no patterns",
                    filter.label
                )));
            }
            for pattern in &filter.patterns {
                if pattern.is_empty() || pattern.contains(['\0', ';']) {
                    return Err(OfnError::InvalidFilter(format!(
                        "pattern {pattern:?} must be non-empty and free of NUL and ';'"
                    )));
                }
            }

            units.extend(filter.label.encode_utf16());
            units.push(0);
            units.extend(filter.patterns.join(";").encode_utf16());
            units.push(0);
        }
        units.push(0);
        Ok(Self(units))
    }

    /// Validate raw filter text, e.g. `"PNG file (*.png)\0*.PNG\0\0"`.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_utf16(text.encode_utf16().collect())
    }

    /// Validate already-encoded filter units.
    pub fn from_utf16(units: Vec<u16>) -> Result<Self> {
        if units.last() != Some(&0) {
            return Err(OfnError::InvalidFilter("missing terminating NUL".to_owned()));
        }

        let segments = split_segments(&units);
        // split_segments never yields zero segments for NUL-ended input.
        let (last, entries) = segments
            .split_last()
            .ok_or_else(|| OfnError::InvalidFilter("filter text is empty".to_owned()))?;

        if !last.is_empty() {
            return Err(OfnError::InvalidFilter("missing final empty terminator".to_owned()));
        }
        if let Some(i) = entries.iter().position(|s| s.is_empty()) {
            return Err(OfnError::InvalidFilter(format!(
                "segment {i} is empty; the list would end early"
            )));
        }
        if entries.is_empty() || entries.len() % 2 != 0 {
            return Err(OfnError::InvalidFilter(format!(
                "expected label/pattern pairs, found {} segment(s)",
                entries.len()
            )));
        }
        Ok(Self(units))
    }

    /// The encoded units, including every terminator.
    pub fn as_wide(&self) -> &[u16] {
        &self.0
    }

    /// Pointer to the first unit.  Valid while `self` is borrowed.
    pub(crate) fn as_ptr(&self) -> *const u16 {
        self.0.as_ptr()
    }

    /// The NUL-terminated segments in order, decoded lossily.  The last one
    /// is always the empty list terminator.
    pub fn segments(&self) -> Vec<String> {
        split_segments(&self.0)
            .into_iter()
            .map(String::from_utf16_lossy)
            .collect()
    }

    /// Decode back into label/pattern pairs.
    pub fn filters(&self) -> Vec<FileFilter> {
        let segments = self.segments();
        segments[..segments.len() - 1]
            .chunks_exact(2)
            .map(|pair| FileFilter::new(pair[0].as_str(), pair[1].split(';')))
            .collect()
    }

    /// Number of label/pattern pairs.
    pub fn len(&self) -> usize {
        (split_segments(&self.0).len() - 1) / 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split on NUL terminators.  Units after the last NUL are ignored.
fn split_segments(units: &[u16]) -> Vec<&[u16]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, &unit) in units.iter().enumerate() {
        if unit == 0 {
            segments.push(&units[start..i]);
            start = i + 1;
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_invalid(r: Result<FilterString>) -> bool {
        matches!(r, Err(OfnError::InvalidFilter(_)))
    }

    #[test]
    fn png_filter_has_three_segments() {
        let f = FilterString::parse("PNG file (*.png)\0*.PNG\0\0").expect("valid filter");
        assert_eq!(f.segments(), vec!["PNG file (*.png)", "*.PNG", ""]);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn encoding_matches_hand_written_text() {
        let built = FilterString::new(&[
            FileFilter::new("Images", ["*.png", "*.jpg"]),
            FileFilter::new("All files", ["*.*"]),
        ])
        .expect("valid filters");
        let expected: Vec<u16> = "Images\0*.png;*.jpg\0All files\0*.*\0\0".encode_utf16().collect();
        assert_eq!(built.as_wide(), expected.as_slice());
        assert_eq!(built.as_wide().last(), Some(&0));
        assert_eq!(built.as_wide()[built.as_wide().len() - 2], 0);
    }

    #[test]
    fn decodes_back_to_filters() {
        let filters = vec![
            FileFilter::new("Images", ["*.png", "*.jpg"]),
            FileFilter::new("Text", ["*.txt"]),
        ];
        let f = FilterString::new(&filters).expect("valid filters");
        assert_eq!(f.filters(), filters);
    }

    #[test]
    fn rejects_bad_lists() {
        assert!(is_invalid(FilterString::new(&[])));
        assert!(is_invalid(FilterString::new(&[FileFilter::new("", ["*.a"])])));
        assert!(is_invalid(FilterString::new(&[FileFilter::new("A", Vec::<String>::new())])));
        assert!(is_invalid(FilterString::new(&[FileFilter::new("A", ["*.a;*.b"])])));
        assert!(is_invalid(FilterString::new(&[FileFilter::new("A\0B", ["*.a"])])));
    }

    #[test]
    fn rejects_bad_raw_text() {
        // single terminator only
        assert!(is_invalid(FilterString::parse("PNG\0*.png\0")));
        // unterminated
        assert!(is_invalid(FilterString::parse("PNG\0*.png")));
        // label without patterns
        assert!(is_invalid(FilterString::parse("PNG\0\0")));
        // empty list
        assert!(is_invalid(FilterString::parse("\0")));
        assert!(is_invalid(FilterString::parse("")));
        // early terminator hides the second pair
        assert!(is_invalid(FilterString::parse("A\0*.a\0\0B\0*.b\0\0")));
    }
}
