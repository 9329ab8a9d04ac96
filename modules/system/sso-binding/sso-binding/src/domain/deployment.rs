//! Deployment units and their resource roots.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::AttachmentError;
use super::extension::RequestExtension;

/// Read access to the files shipped with a deployment.
pub trait ResourceRoot: Send + Sync {
    /// Open the resource at `path` (relative to the root).
    ///
    /// Returns `Ok(None)` if no such resource exists.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the resource exists but cannot be opened.
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + Send>>>;
}

/// Exploded deployment on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryRoot {
    root: PathBuf,
}

impl DirectoryRoot {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceRoot for DirectoryRoot {
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + Send>>> {
        match File::open(self.root.join(path)) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// In-memory resource root.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoot {
    files: HashMap<String, Arc<[u8]>>,
}

impl MemoryRoot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        let contents: Vec<u8> = contents.into();
        self.files.insert(path.into(), Arc::from(contents));
        self
    }
}

impl ResourceRoot for MemoryRoot {
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + Send>>> {
        Ok(self
            .files
            .get(path)
            .map(|bytes| Box::new(Cursor::new(Arc::clone(bytes))) as Box<dyn Read + Send>))
    }
}

#[derive(Default)]
struct Attachments {
    extensions: Vec<Arc<RequestExtension>>,
    aborted: bool,
}

/// One application being installed into the hosting environment.
///
/// Owns the ordered list of request extensions attached during deployment.
pub struct DeploymentUnit {
    name: String,
    root: Box<dyn ResourceRoot>,
    attachments: Mutex<Attachments>,
}

impl DeploymentUnit {
    #[must_use]
    pub fn new(name: impl Into<String>, root: impl ResourceRoot + 'static) -> Self {
        Self {
            name: name.into(),
            root: Box::new(root),
            attachments: Mutex::new(Attachments::default()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open a resource shipped with this deployment.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the resource exists but cannot be opened.
    pub fn open_resource(&self, path: &str) -> io::Result<Option<Box<dyn Read + Send>>> {
        self.root.open(path)
    }

    /// Append `extension` to this deployment's request pipeline.
    ///
    /// Existing entries are never removed or reordered.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError`] if the deployment has been aborted.
    pub fn attach_extension(
        &self,
        extension: Arc<RequestExtension>,
    ) -> Result<(), AttachmentError> {
        let mut attachments = self.attachments.lock();
        if attachments.aborted {
            return Err(AttachmentError {
                deployment: self.name.clone(),
                reason: "deployment has been aborted".to_owned(),
            });
        }
        attachments.extensions.push(extension);
        Ok(())
    }

    /// Snapshot of the attached extensions, in attachment order.
    #[must_use]
    pub fn extensions(&self) -> Vec<Arc<RequestExtension>> {
        self.attachments.lock().extensions.clone()
    }

    /// Abort the deployment and discard everything attached so far.
    ///
    /// Attached extensions only hold shared provider references, so dropping
    /// them releases nothing the providers own.
    pub fn abort(&self) {
        let discarded = {
            let mut attachments = self.attachments.lock();
            attachments.aborted = true;
            std::mem::take(&mut attachments.extensions)
        };
        tracing::debug!(
            deployment = %self.name,
            discarded = discarded.len(),
            "Deployment aborted"
        );
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.attachments.lock().aborted
    }
}

impl std::fmt::Debug for DeploymentUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentUnit")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
