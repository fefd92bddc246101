//! Input to output path mapping.

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Where generated sources go relative to their header.
///
/// Every directory component equal to `source_segment` is replaced by
/// `generated_segment`, and the header's extension by `suffix`:
/// `lib/include/SHISensor.h` becomes `lib/src/SHISensor_config.cpp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputLayout {
    pub source_segment: String,
    pub generated_segment: String,
    pub suffix: String,
    /// Extension of files picked up when a directory is given as input.
    pub header_extension: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            source_segment: "include".to_string(),
            generated_segment: "src".to_string(),
            suffix: "_config.cpp".to_string(),
            header_extension: "h".to_string(),
        }
    }
}

impl OutputLayout {
    /// Compute the output path for `header`.
    pub fn output_path(&self, header: &Path) -> PathBuf {
        let mut output = PathBuf::new();
        let mut replaced = false;
        if let Some(parent) = header.parent() {
            for component in parent.components() {
                match component {
                    Component::Normal(segment) if segment == OsStr::new(&self.source_segment) => {
                        output.push(&self.generated_segment);
                        replaced = true;
                    }
                    other => output.push(other.as_os_str()),
                }
            }
        }
        if !replaced {
            tracing::debug!(
                "No `{}` directory in {}, writing next to the header",
                self.source_segment,
                header.display()
            );
        }

        let stem = header.file_stem().unwrap_or_default().to_string_lossy();
        output.push(format!("{stem}{}", self.suffix));
        output
    }

    /// Whether `path` carries the header extension.
    pub fn is_header(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == OsStr::new(&self.header_extension))
    }
}
