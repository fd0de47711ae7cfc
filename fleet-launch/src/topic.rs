//! Robot identity and topic name scoping
//!
//! Namespace, topic prefix, and template identity all derive from a single
//! [`RobotIndex`] formatting site so the three use sites cannot drift.

use std::fmt;

/// Errors that can occur while scoping topic names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicNameError {
    /// Topic name is empty
    Empty,
    /// Topic name contains invalid characters
    InvalidCharacters(String),
}

impl fmt::Display for TopicNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "topic name is empty"),
            Self::InvalidCharacters(s) => {
                write!(f, "topic name contains invalid characters: {}", s)
            }
        }
    }
}

impl std::error::Error for TopicNameError {}

/// Validate a topic name component (between slashes).
/// Components must start with a letter or underscore, followed by
/// alphanumerics or underscores.
fn is_valid_topic_component(component: &str) -> bool {
    if component.is_empty() {
        return false;
    }
    let bytes = component.as_bytes();
    if !bytes[0].is_ascii_alphabetic() && bytes[0] != b'_' {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Zero-based position of a robot within the fleet address list.
///
/// Formats as the robot's namespace (`robot0`, `robot1`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RobotIndex(pub usize);

impl fmt::Display for RobotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "robot{}", self.0)
    }
}

impl RobotIndex {
    pub fn namespace(&self) -> String {
        self.to_string()
    }

    /// Prefix a relative name (topic or TF frame) with this robot's namespace.
    pub fn scoped(&self, name: &str) -> String {
        format!("{self}/{name}")
    }
}

/// Qualify a relative topic name under an optional robot namespace.
///
/// Shared, unnamespaced units pass `None` and get the name back unchanged;
/// per-robot units in a multi-robot fleet get the `robot{i}/` prefix.
pub fn scoped_topic(scope: Option<RobotIndex>, name: &str) -> Result<String, TopicNameError> {
    if name.is_empty() {
        return Err(TopicNameError::Empty);
    }
    for part in name.split('/') {
        if !is_valid_topic_component(part) {
            return Err(TopicNameError::InvalidCharacters(format!(
                "invalid component '{}'",
                part
            )));
        }
    }
    Ok(match scope {
        Some(robot) => robot.scoped(name),
        None => name.to_owned(),
    })
}
