// ── Dialog configuration ──────────────────────────────────────────────────────
//
// Reads a JSON description of an open dialog.  Every field is optional;
// missing fields take their value from the PNG picker in `Default`.
// No `unsafe`: pure safe Rust + serde_json.

use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    comdlg::invoke::OpenFileDialog,
    error::{OfnError, Result},
    filter::FileFilter,
    flags::OpenFileFlags,
};

/// Path buffer used when the file does not set `buffer_len`.  Enough for a
/// classic `MAX_PATH` path.
const DEFAULT_BUFFER_LEN: usize = 256;

// ── On-disk type ──────────────────────────────────────────────────────────────

/// Root of the JSON configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    pub filters: Vec<FileFilter>,
    /// Flag names, e.g. `["FILEMUSTEXIST", "OFN_HIDEREADONLY"]`.
    pub flags: Vec<String>,
    /// 1-based initial filter; 0 = first.
    pub filter_index: u32,
    pub title: Option<String>,
    pub initial_dir: Option<PathBuf>,
    pub default_extension: Option<String>,
    /// Pre-filled file name.
    pub file_name: Option<String>,
    /// Path buffer length in UTF-16 units, terminator included.
    pub buffer_len: usize,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            filters: vec![FileFilter::new("PNG file (*.png)", ["*.PNG"])],
            flags: Vec::new(),
            filter_index: 0,
            title: None,
            initial_dir: None,
            default_extension: None,
            file_name: None,
            buffer_len: DEFAULT_BUFFER_LEN,
        }
    }
}

impl DialogConfig {
    /// Combine the named flags.  Unknown names are an error.
    pub fn flags(&self) -> Result<OpenFileFlags> {
        self.flags.iter().try_fold(OpenFileFlags::NONE, |acc, name| {
            OpenFileFlags::from_name(name)
                .map(|flag| acc | flag)
                .ok_or_else(|| OfnError::UnknownFlag(name.clone()))
        })
    }

    /// Build the dialog this configuration describes.
    pub fn to_dialog(&self) -> Result<OpenFileDialog> {
        let mut dialog = OpenFileDialog::new()
            .filters(self.filters.iter().cloned())
            .filter_index(self.filter_index)
            .flags(self.flags()?)
            .buffer_len(self.buffer_len);
        if let Some(title) = &self.title {
            dialog = dialog.title(title.as_str());
        }
        if let Some(dir) = &self.initial_dir {
            dialog = dialog.initial_dir(dir);
        }
        if let Some(ext) = &self.default_extension {
            dialog = dialog.default_extension(ext.as_str());
        }
        if let Some(name) = &self.file_name {
            dialog = dialog.file_name(name.as_str());
        }
        Ok(dialog)
    }
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read and parse a configuration file.
pub fn load(path: &Path) -> Result<DialogConfig> {
    let data = fs::read(path)?;
    let config: DialogConfig = serde_json::from_slice(&data)?;
    log::debug!("loaded dialog configuration from {}", path.display());
    Ok(config)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_object_is_the_png_picker() {
        let config: DialogConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, DialogConfig::default());
        assert_eq!(config.buffer_len, 256);
        assert_eq!(config.flags().expect("no flags"), OpenFileFlags::NONE);
    }

    #[test]
    fn flag_names_combine() {
        let config: DialogConfig =
            serde_json::from_str(r#"{"flags":["FILEMUSTEXIST","ofn_hidereadonly"]}"#)
                .expect("deserialize");
        assert_eq!(
            config.flags().expect("known flags"),
            OpenFileFlags::FILEMUSTEXIST | OpenFileFlags::HIDEREADONLY
        );
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let config = DialogConfig { flags: vec!["NOPE".to_owned()], ..DialogConfig::default() };
        assert!(matches!(config.flags(), Err(OfnError::UnknownFlag(name)) if name == "NOPE"));
        assert!(config.to_dialog().is_err());
    }

    #[test]
    fn to_dialog_carries_settings() {
        let config = DialogConfig {
            filters: vec![FileFilter::new("Images", ["*.png", "*.jpg"])],
            flags: vec!["EXPLORER".to_owned()],
            file_name: Some("start.png".to_owned()),
            buffer_len: 1024,
            ..DialogConfig::default()
        };
        let dialog = config.to_dialog().expect("valid config");
        assert_eq!(dialog.get_flags(), OpenFileFlags::EXPLORER);
        assert_eq!(dialog.get_buffer_len(), 1024);
        assert_eq!(dialog.get_filters(), config.filters.as_slice());
        assert_eq!(dialog.get_file_name(), Some("start.png"));
        assert_eq!(DialogConfig::default().to_dialog().expect("default").get_file_name(), None);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let json = concat!(
            r#"{"filters":[{"label":"Text","patterns":["*.txt"]}],"#,
            r#""title":"Pick","file_name":"notes.txt","buffer_len":512}"#,
        );
        file.write_all(json.as_bytes()).expect("write");

        let config = load(file.path()).expect("load");
        assert_eq!(config.filters, vec![FileFilter::new("Text", ["*.txt"])]);
        assert_eq!(config.title.as_deref(), Some("Pick"));
        assert_eq!(config.file_name.as_deref(), Some("notes.txt"));
        assert_eq!(config.buffer_len, 512);
    }

    #[test]
    fn load_reports_parse_and_io_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");
        assert!(matches!(load(file.path()), Err(OfnError::Config(_))));

        let dir = tempfile::tempdir().expect("temp dir");
        assert!(matches!(load(&dir.path().join("missing.json")), Err(OfnError::Io(_))));
    }
}
