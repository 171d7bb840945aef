//! Sample app bundles.
//!
//! Every sample app is a small file tree compiled into the binary. A [`Bundle`]
//! is written to a scratch directory right before `cf push` picks it up.

use std::path::{Component, Path};

use tracing::debug;

use crate::error::{Error, Result};

/// A single file of a sample app bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    /// Path relative to the bundle root, `/` separated.
    pub path: &'static str,
    /// File contents.
    pub contents: &'static str,
}

/// The files that make up one sample app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    files: Vec<BundleFile>,
}

impl Bundle {
    /// Create a bundle from `(path, contents)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bundle`] if the bundle is empty, or if a path is
    /// empty, absolute, or leaves the bundle root.
    pub fn new(files: &[(&'static str, &'static str)]) -> Result<Self> {
        if files.is_empty() {
            return Err(Error::bundle("", "bundle has no files"));
        }

        let files = files
            .iter()
            .map(|&(path, contents)| {
                validate_path(path)?;
                Ok(BundleFile { path, contents })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { files })
    }

    /// The files in this bundle, in declaration order.
    #[must_use]
    pub fn files(&self) -> &[BundleFile] {
        &self.files
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false for a constructed bundle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size of all file contents in bytes.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.files.iter().map(|f| f.contents.len()).sum()
    }

    /// BLAKE3 digest over all paths and contents.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for file in &self.files {
            hasher.update(file.path.as_bytes());
            hasher.update(&[0]);
            hasher.update(&(file.contents.len() as u64).to_le_bytes());
            hasher.update(file.contents.as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Write every file below `root`, creating directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BundleWrite`] if a directory or file can't be created.
    pub fn write_to(&self, root: &Path) -> Result<()> {
        for file in &self.files {
            let target = root.join(file.path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|source| Error::BundleWrite {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(&target, file.contents).map_err(|source| Error::BundleWrite {
                path: target.clone(),
                source,
            })?;
        }
        debug!(
            "Wrote {} files ({} bytes) to {}",
            self.len(),
            self.total_size(),
            root.display()
        );
        Ok(())
    }
}

fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::bundle(path, "empty path"));
    }
    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(Error::bundle(path, "path escapes the bundle root"));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::bundle(path, "path must be relative"));
            }
        }
    }
    Ok(())
}

macro_rules! asset {
    ($app:literal, $path:literal) => {
        ($path, include_str!(concat!("../assets/", $app, "/", $path)))
    };
}

/// Go web server using only the standard library.
///
/// # Errors
///
/// Returns an error if the embedded bundle is malformed.
pub fn golang_sample_app() -> Result<Bundle> {
    Bundle::new(&[asset!("golang", "go.mod"), asset!("golang", "main.go")])
}

/// Python web server using only the standard library.
///
/// # Errors
///
/// Returns an error if the embedded bundle is malformed.
pub fn python_sample_app() -> Result<Bundle> {
    Bundle::new(&[
        asset!("python", "app.py"),
        asset!("python", "requirements.txt"),
        asset!("python", "Procfile"),
    ])
}

/// Single PHP page.
///
/// # Errors
///
/// Returns an error if the embedded bundle is malformed.
pub fn php_sample_app() -> Result<Bundle> {
    Bundle::new(&[asset!("php", "index.php")])
}

/// Static HTML page for the staticfile buildpack.
///
/// # Errors
///
/// Returns an error if the embedded bundle is malformed.
pub fn staticfile_sample_app() -> Result<Bundle> {
    Bundle::new(&[
        asset!("staticfile", "Staticfile"),
        asset!("staticfile", "index.html"),
    ])
}

/// Swift package serving plain text over a raw socket.
///
/// # Errors
///
/// Returns an error if the embedded bundle is malformed.
pub fn swift_sample_app() -> Result<Bundle> {
    Bundle::new(&[
        asset!("swift", "Package.swift"),
        asset!("swift", "Sources/Hello/main.swift"),
        asset!("swift", "Procfile"),
    ])
}

/// Node.js server using the `http` module.
///
/// # Errors
///
/// Returns an error if the embedded bundle is malformed.
pub fn nodejs_sample_app() -> Result<Bundle> {
    Bundle::new(&[asset!("nodejs", "package.json"), asset!("nodejs", "server.js")])
}

/// Sinatra app served by Puma.
///
/// # Errors
///
/// Returns an error if the embedded bundle is malformed.
pub fn ruby_sample_app() -> Result<Bundle> {
    Bundle::new(&[
        asset!("ruby", "Gemfile"),
        asset!("ruby", "Gemfile.lock"),
        asset!("ruby", "app.rb"),
        asset!("ruby", "config.ru"),
    ])
}
