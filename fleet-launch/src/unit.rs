use std::path::PathBuf;

use serde::Serialize;

use crate::descriptor::{ConnectionMode, Transport};

/// Executable kind of a per-robot processing unit.
#[derive(Debug, Hash, strum::Display, Eq, PartialEq, Clone, Copy)]
pub enum UnitKind {
    #[strum(serialize = "robot_state_publisher")]
    StatePublisher,
    #[strum(serialize = "go2_video")]
    VideoBridge,
    #[strum(serialize = "pointcloud_to_laserscan")]
    ScanConverter,
}

/// Remapping from a unit's default topic name to the bus topic actually used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remap {
    pub from: String,
    pub to: String,
}

/// Publishes the robot's structural description and TF tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatePublisherSpec {
    pub namespace: String,
    /// Fully resolved description document, identity already substituted.
    pub description: String,
    pub use_sim_time: bool,
}

/// Bridges the robot's camera stream onto the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoBridgeSpec {
    pub namespace: String,
    pub address: String,
    pub token: String,
}

/// Flattens the robot's point cloud into a planar laser scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanConverterSpec {
    pub namespace: String,
    pub remap: Remap,
    pub target_frame: String,
    pub max_height: f64,
}

/// One per-robot processing unit with its resolved parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitSpec {
    StatePublisher(StatePublisherSpec),
    VideoBridge(VideoBridgeSpec),
    ScanConverter(ScanConverterSpec),
}

impl UnitSpec {
    pub fn kind(&self) -> UnitKind {
        match self {
            Self::StatePublisher(_) => UnitKind::StatePublisher,
            Self::VideoBridge(_) => UnitKind::VideoBridge,
            Self::ScanConverter(_) => UnitKind::ScanConverter,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Self::StatePublisher(x) => &x.namespace,
            Self::VideoBridge(x) => &x.namespace,
            Self::ScanConverter(x) => &x.namespace,
        }
    }
}

/// Visualization profile loaded by the viewer.
#[derive(Debug, Hash, strum::Display, Eq, PartialEq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RvizProfile {
    #[strum(serialize = "robot_mapper_conf.rviz")]
    RobotMapper,
    #[strum(serialize = "cyclonedds_config.rviz")]
    CycloneDds,
}

impl RvizProfile {
    /// Profile file name under the share directory's `config/`.
    pub fn file_name(&self) -> String {
        self.to_string()
    }

    /// Exhaustive profile selection. The transport-specific profile wins
    /// regardless of connection mode; every other combination gets the
    /// default mapper profile.
    pub fn select(mode: ConnectionMode, transport: &Transport) -> Self {
        match (mode, transport) {
            (_, Transport::CycloneDds) => Self::CycloneDds,
            (ConnectionMode::Single, _) | (ConnectionMode::Multi, _) => Self::RobotMapper,
        }
    }
}

/// Driver process for the whole fleet. Receives the full ordered address
/// list and fans out per-robot connections internally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverSpec {
    pub addresses: Vec<String>,
    pub token: String,
    pub transport: Transport,
}

/// Accumulates per-robot lidar output into the shared map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapAccumulatorSpec {
    pub addresses: Vec<String>,
    pub map_name: String,
    pub save_map: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizationSpec {
    pub profile: RvizProfile,
    pub config: PathBuf,
    pub suppressed: bool,
}

/// Joystick reader, teleop mapper, and command mux. Mode-independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeleopChainSpec {
    pub joystick_params: PathBuf,
    pub mux_params: PathBuf,
    pub use_sim_time: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlamSpec {
    pub params: PathBuf,
    pub use_sim_time: bool,
}

/// Fleet-wide units emitted exactly once per resolution, whatever the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedPipelineSpec {
    pub driver: DriverSpec,
    pub map_accumulator: MapAccumulatorSpec,
    pub visualization: VisualizationSpec,
    pub teleop: TeleopChainSpec,
    pub slam: SlamSpec,
}
