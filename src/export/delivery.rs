use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::foundation::error::{NameCardError, NameCardResult};

/// Hands finished export bytes to the outside world.
///
/// Ordering contract: `deliver` is called once per file, in export order. Exporters do not
/// de-duplicate file names; a delivery that stores files side by side must keep each one.
pub trait FileDelivery {
    /// Deliver `bytes` under `filename`. Returns the name the file was actually stored under.
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> NameCardResult<String>;
}

/// Writes deliveries into a directory, creating it on first use.
///
/// A name already written by this delivery gets a numbered suffix (`Bob.png`, `Bob (1).png`, ...),
/// so repeated names never replace each other. Files left over from earlier runs are replaced
/// unless overwriting is turned off.
#[derive(Clone, Debug)]
pub struct DirectoryDelivery {
    root: PathBuf,
    overwrite: bool,
    written: HashSet<String>,
}

impl DirectoryDelivery {
    /// Deliver into `root`, overwriting existing files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overwrite: true,
            written: HashSet::new(),
        }
    }

    /// Set whether existing files may be replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Output directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file name returned by [`FileDelivery::deliver`].
    pub fn path_for(&self, stored_name: &str) -> PathBuf {
        self.root.join(stored_name)
    }

    /// First sanitized variant of `filename` this delivery has not written yet.
    fn claim_name(&mut self, filename: &str) -> String {
        let base = sanitize_file_name(filename);
        let mut name = base.clone();
        let mut n = 1u32;
        while self.written.contains(&name) {
            name = numbered_file_name(&base, n);
            n += 1;
        }
        self.written.insert(name.clone());
        name
    }
}

impl FileDelivery for DirectoryDelivery {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> NameCardResult<String> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            NameCardError::delivery(format!(
                "create output dir '{}': {e}",
                self.root.display()
            ))
        })?;

        let name = self.claim_name(filename);
        let path = self.path_for(&name);
        if !self.overwrite && path.exists() {
            return Err(NameCardError::delivery(format!(
                "refusing to overwrite '{}'",
                path.display()
            )));
        }

        std::fs::write(&path, bytes)
            .map_err(|e| NameCardError::delivery(format!("write '{}': {e}", path.display())))?;
        if name != sanitize_file_name(filename) {
            tracing::debug!(requested = filename, stored = %name, "file name already used");
        }
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "delivered");
        Ok(name)
    }
}

/// One captured delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveredFile {
    /// File name as requested by the exporter.
    pub name: String,
    /// Delivered bytes.
    pub bytes: Vec<u8>,
}

/// In-memory delivery for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryDelivery {
    files: Vec<DeliveredFile>,
}

impl InMemoryDelivery {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliveries in call order.
    pub fn files(&self) -> &[DeliveredFile] {
        &self.files
    }

    /// Delivered file names in call order.
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }
}

impl FileDelivery for InMemoryDelivery {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> NameCardResult<String> {
        self.files.push(DeliveredFile {
            name: filename.to_owned(),
            bytes: bytes.to_vec(),
        });
        Ok(filename.to_owned())
    }
}

/// Make a user-supplied name safe as a single path component.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match cleaned.trim() {
        "" | "." | ".." => "_".to_string(),
        s => s.to_string(),
    }
}

/// `Bob.png` -> `Bob (n).png`; names without an extension get the suffix at the end.
fn numbered_file_name(name: &str, n: u32) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({n}){}", &name[..dot], &name[dot..]),
        _ => format!("{name} ({n})"),
    }
}
