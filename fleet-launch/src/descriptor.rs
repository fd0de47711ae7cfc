use serde::{Serialize, Serializer};

use crate::config::{self, EnvSnapshot};

/// Fatal configuration errors raised while building a [`FleetDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The address list resolved to zero robots
    EmptyFleet,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFleet => write!(
                f,
                "no robot addresses configured ({} is empty or unset)",
                config::ROBOT_IP
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Default, Hash, strum::Display, Eq, PartialEq, Clone, Copy)]
pub enum ConnectionMode {
    #[default]
    #[strum(serialize = "single")]
    Single,
    #[strum(serialize = "multi")]
    Multi,
}

/// Transport used between the driver and the robots. The set is open:
/// unknown values are carried through verbatim and only affect the
/// visualization profile fallback.
#[derive(Debug, Default, Hash, strum::EnumString, strum::Display, Eq, PartialEq, Clone)]
pub enum Transport {
    #[default]
    #[strum(serialize = "webrtc")]
    WebRtc,
    #[strum(serialize = "cyclonedds")]
    CycloneDds,
    #[strum(default)]
    Other(String),
}

impl Serialize for Transport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Strongly typed description of the fleet addressed by one resolution pass.
///
/// The connection mode is never stored: it is a pure function of the address
/// count and is exposed through [`FleetDescriptor::mode`] so it can never
/// drift out of sync with the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetDescriptor {
    pub addresses: Vec<String>,
    pub token: String,
    pub transport: Transport,
    pub map_name: String,
    pub save_map: bool,
    pub use_sim_time: bool,
    pub no_rviz: bool,
}

impl FleetDescriptor {
    /// Build a descriptor from an environment snapshot.
    ///
    /// Total over missing variables (each has a default), but a fleet of
    /// zero robots is a fatal configuration error.
    pub fn parse(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        // Whitespace is stripped from the whole list before splitting, so
        // tokens never carry embedded spaces; empty tokens from stray
        // commas are dropped.
        let raw = env.get_or(config::ROBOT_IP, "").replace(' ', "");
        let addresses: Vec<String> = raw
            .split(',')
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect();
        if addresses.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }

        let transport = match env.get(config::CONN_TYPE) {
            Some(s) => s.parse().unwrap_or_default(),
            None => Transport::default(),
        };

        let descriptor = Self {
            addresses,
            token: env.get_or(config::ROBOT_TOKEN, "").to_owned(),
            transport,
            map_name: env.get_or(config::MAP_NAME, "3d_map").to_owned(),
            save_map: env.get_bool(config::MAP_SAVE, true),
            use_sim_time: env.get_bool(config::USE_SIM_TIME, false),
            no_rviz: env.get_bool(config::NO_RVIZ2, false),
        };
        tracing::debug!(
            mode = %descriptor.mode(),
            addresses = ?descriptor.addresses,
            "resolved fleet addresses"
        );
        Ok(descriptor)
    }

    pub fn mode(&self) -> ConnectionMode {
        if self.addresses.len() == 1 {
            ConnectionMode::Single
        } else {
            ConnectionMode::Multi
        }
    }
}
