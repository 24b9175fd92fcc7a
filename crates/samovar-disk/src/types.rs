//! Disk API types.

use serde::Deserialize;

/// A file or folder entry from a resource listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub name: Option<String>,
    /// Upstream resource type, `"dir"` for folders and `"file"` for files.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl Resource {
    /// Whether this entry is a folder.
    pub fn is_dir(&self) -> bool {
        self.kind.as_deref() == Some("dir")
    }
}

/// Quota and usage information for the disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiskInfo {
    #[serde(default)]
    pub total_space: u64,
    #[serde(default)]
    pub used_space: u64,
    #[serde(default)]
    pub trash_size: u64,
}

/// Envelope for a resource listing.
#[derive(Debug, Deserialize)]
pub struct ResourceListResponse {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub items: Vec<Resource>,
}
