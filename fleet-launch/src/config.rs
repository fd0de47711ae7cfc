//! Environment snapshot for topology resolution
//! Captured once at start-up; nothing downstream reads the process environment

use std::collections::HashMap;

pub const ROBOT_IP: &'static str = "ROBOT_IP";
pub const ROBOT_TOKEN: &'static str = "ROBOT_TOKEN";
pub const MAP_NAME: &'static str = "MAP_NAME";
pub const MAP_SAVE: &'static str = "MAP_SAVE";
pub const CONN_TYPE: &'static str = "CONN_TYPE";
pub const USE_SIM_TIME: &'static str = "USE_SIM_TIME";
pub const NO_RVIZ2: &'static str = "NO_RVIZ2";

/// Immutable view of the launch-relevant environment variables.
#[derive(Debug, Default, Clone)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Snapshot the current process environment.
    pub fn capture() -> Self {
        std::env::vars().collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Lax boolean parsing: `true`/`false` in any case, anything else keeps
    /// the default.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            _ => default,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
