//! Description template store
//!
//! The two structural description documents are externally owned; this
//! module only reads them and substitutes the robot identity placeholder.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::topic::RobotIndex;

/// Environment override for the share directory location.
pub const SHARE_DIR_VAR: &'static str = "FLEET_SHARE_DIR";

const SINGLE_DESCRIPTION: &'static str = "go2.urdf";
const MULTI_DESCRIPTION: &'static str = "multi_go2.urdf";
const IDENTITY_PLACEHOLDER: &'static str = "{robot_num}";

/// Errors raised while reading the description documents.
#[derive(Debug)]
pub enum TemplateError {
    /// Document is missing or unreadable
    Io { path: PathBuf, source: std::io::Error },
    /// Multi-robot document carries no identity placeholder
    MissingPlaceholder(PathBuf),
    /// Single-robot document unexpectedly carries a placeholder
    UnexpectedPlaceholder(PathBuf),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read description '{}': {}", path.display(), source)
            }
            Self::MissingPlaceholder(path) => write!(
                f,
                "description '{}' carries no '{}' placeholder",
                path.display(),
                IDENTITY_PLACEHOLDER
            ),
            Self::UnexpectedPlaceholder(path) => write!(
                f,
                "single-robot description '{}' must not carry a '{}' placeholder",
                path.display(),
                IDENTITY_PLACEHOLDER
            ),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Package share directory holding description documents and unit
/// parameter files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareDir {
    root: PathBuf,
}

impl ShareDir {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the share directory: `FLEET_SHARE_DIR` if set, otherwise the
    /// assets shipped with this package.
    pub fn resolve() -> Self {
        match std::env::var(SHARE_DIR_VAR) {
            Ok(dir) => Self::new(dir),
            Err(_) => Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
        }
    }

    pub fn urdf(&self, name: &str) -> PathBuf {
        self.root.join("urdf").join(name)
    }

    pub fn config(&self, name: &str) -> PathBuf {
        self.root.join("config").join(name)
    }
}

/// Both description documents, read fully at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionTemplates {
    single: String,
    multi: String,
}

impl DescriptionTemplates {
    /// Read and validate both documents from the share directory.
    pub fn load(share: &ShareDir) -> Result<Self, TemplateError> {
        let single_path = share.urdf(SINGLE_DESCRIPTION);
        let multi_path = share.urdf(MULTI_DESCRIPTION);
        Self::from_parts(
            read_document(&single_path)?,
            single_path,
            read_document(&multi_path)?,
            multi_path,
        )
    }

    /// Validate already-loaded document contents. The single-robot form must
    /// carry zero placeholders; the multi-robot form must carry the identity
    /// placeholder.
    pub fn from_parts(
        single: String,
        single_path: PathBuf,
        multi: String,
        multi_path: PathBuf,
    ) -> Result<Self, TemplateError> {
        if single.contains(IDENTITY_PLACEHOLDER) {
            return Err(TemplateError::UnexpectedPlaceholder(single_path));
        }
        if !multi.contains(IDENTITY_PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder(multi_path));
        }
        Ok(Self { single, multi })
    }

    /// Single-robot document, used verbatim.
    pub fn single(&self) -> &str {
        &self.single
    }

    /// Instantiate the multi-robot document for one robot.
    pub fn instantiate(&self, robot: RobotIndex) -> String {
        self.multi.replace(IDENTITY_PLACEHOLDER, &robot.namespace())
    }
}

fn read_document(path: &Path) -> Result<String, TemplateError> {
    std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_owned(),
        source,
    })
}
