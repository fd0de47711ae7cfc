//! Topology resolution
//!
//! Maps a [`FleetDescriptor`] into the complete, non-conflicting launch
//! plan: per-robot unit triples plus the fleet-wide shared pipeline. The
//! whole pass is a pure computation over the descriptor and the loaded
//! templates; it either produces the full plan or fails before emitting
//! anything.

use serde::Serialize;

use crate::descriptor::{ConnectionMode, FleetDescriptor, Transport};
use crate::template::{DescriptionTemplates, ShareDir};
use crate::topic::{RobotIndex, scoped_topic};
use crate::unit::{
    DriverSpec, MapAccumulatorSpec, Remap, RvizProfile, ScanConverterSpec, SharedPipelineSpec,
    SlamSpec, StatePublisherSpec, TeleopChainSpec, UnitSpec, VideoBridgeSpec, VisualizationSpec,
};
use crate::{Builder, Result};

const CLOUD_TOPIC: &'static str = "point_cloud2";
const SCAN_TOPIC: &'static str = "scan";
const BASE_FRAME: &'static str = "base_link";

const JOYSTICK_PARAMS: &'static str = "joystick.yaml";
const MUX_PARAMS: &'static str = "twist_mux.yaml";
const SLAM_PARAMS: &'static str = "mapper_params_online_async.yaml";

/// Height ceiling for the scan converter with a single robot.
pub const SINGLE_MAX_HEIGHT: f64 = 0.5;
/// Tighter ceiling with multiple robots; the sensor geometry differs per
/// mode, so the two values are not unified.
pub const MULTI_MAX_HEIGHT: f64 = 0.1;

/// The resolved topology: ordered per-robot units plus the shared pipeline.
///
/// Consumed by an external instantiation layer; resolution never observes
/// the instantiated units' outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchPlan {
    pub units: Vec<UnitSpec>,
    pub shared: SharedPipelineSpec,
}

impl LaunchPlan {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds a [`LaunchPlan`] from a descriptor, loading the description
/// templates from the share directory.
pub struct TopologyBuilder {
    descriptor: FleetDescriptor,
    share: ShareDir,
}

impl TopologyBuilder {
    pub fn new(descriptor: FleetDescriptor) -> Self {
        Self {
            descriptor,
            share: ShareDir::resolve(),
        }
    }

    pub fn with_share_dir(mut self, share: ShareDir) -> Self {
        self.share = share;
        self
    }
}

impl Builder for TopologyBuilder {
    type Output = LaunchPlan;

    fn build(self) -> Result<LaunchPlan> {
        let templates = DescriptionTemplates::load(&self.share)?;
        resolve(&self.descriptor, &templates, &self.share)
    }
}

/// Resolve the full topology for the given fleet.
///
/// Per-robot units are emitted in ascending index order, one
/// publisher/bridge/converter triple per robot, so downstream index-keyed
/// references stay aligned.
pub fn resolve(
    descriptor: &FleetDescriptor,
    templates: &DescriptionTemplates,
    share: &ShareDir,
) -> Result<LaunchPlan> {
    let mode = descriptor.mode();
    let mut units = Vec::with_capacity(3 * descriptor.addresses.len());

    match mode {
        ConnectionMode::Single => {
            units.push(UnitSpec::StatePublisher(StatePublisherSpec {
                namespace: String::new(),
                description: templates.single().to_owned(),
                use_sim_time: descriptor.use_sim_time,
            }));
            units.push(UnitSpec::VideoBridge(VideoBridgeSpec {
                namespace: String::new(),
                address: descriptor.addresses[0].clone(),
                token: descriptor.token.clone(),
            }));
            units.push(UnitSpec::ScanConverter(ScanConverterSpec {
                namespace: String::new(),
                remap: Remap {
                    from: scoped_topic(None, CLOUD_TOPIC)?,
                    to: scoped_topic(None, SCAN_TOPIC)?,
                },
                target_frame: BASE_FRAME.to_owned(),
                max_height: SINGLE_MAX_HEIGHT,
            }));
        }
        ConnectionMode::Multi => {
            for (i, address) in descriptor.addresses.iter().enumerate() {
                let robot = RobotIndex(i);
                units.push(UnitSpec::StatePublisher(StatePublisherSpec {
                    namespace: robot.namespace(),
                    description: templates.instantiate(robot),
                    use_sim_time: descriptor.use_sim_time,
                }));
                units.push(UnitSpec::VideoBridge(VideoBridgeSpec {
                    namespace: robot.namespace(),
                    address: address.clone(),
                    token: descriptor.token.clone(),
                }));
                units.push(UnitSpec::ScanConverter(ScanConverterSpec {
                    namespace: robot.namespace(),
                    remap: Remap {
                        from: scoped_topic(Some(robot), CLOUD_TOPIC)?,
                        to: scoped_topic(Some(robot), SCAN_TOPIC)?,
                    },
                    target_frame: robot.scoped(BASE_FRAME),
                    max_height: MULTI_MAX_HEIGHT,
                }));
            }
        }
    }

    if let Transport::Other(name) = &descriptor.transport {
        tracing::warn!(
            transport = %name,
            "unknown transport, falling back to the default visualization profile"
        );
    }
    let profile = RvizProfile::select(mode, &descriptor.transport);

    let shared = SharedPipelineSpec {
        driver: DriverSpec {
            addresses: descriptor.addresses.clone(),
            token: descriptor.token.clone(),
            transport: descriptor.transport.clone(),
        },
        map_accumulator: MapAccumulatorSpec {
            addresses: descriptor.addresses.clone(),
            map_name: descriptor.map_name.clone(),
            save_map: descriptor.save_map,
        },
        visualization: VisualizationSpec {
            profile,
            config: share.config(&profile.file_name()),
            suppressed: descriptor.no_rviz,
        },
        teleop: TeleopChainSpec {
            joystick_params: share.config(JOYSTICK_PARAMS),
            mux_params: share.config(MUX_PARAMS),
            use_sim_time: descriptor.use_sim_time,
        },
        slam: SlamSpec {
            params: share.config(SLAM_PARAMS),
            use_sim_time: descriptor.use_sim_time,
        },
    };

    Ok(LaunchPlan { units, shared })
}
