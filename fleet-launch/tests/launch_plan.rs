use std::collections::HashSet;

use fleet_launch::Builder;
use fleet_launch::config::{self, EnvSnapshot};
use fleet_launch::descriptor::{ConfigError, ConnectionMode, FleetDescriptor};
use fleet_launch::template::ShareDir;
use fleet_launch::topology::{MULTI_MAX_HEIGHT, SINGLE_MAX_HEIGHT, TopologyBuilder};
use fleet_launch::unit::{RvizProfile, UnitKind, UnitSpec};

fn share_dir() -> ShareDir {
    ShareDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
}

fn resolve(pairs: &[(&str, &str)]) -> fleet_launch::topology::LaunchPlan {
    let env: EnvSnapshot = pairs.iter().copied().collect();
    let descriptor = FleetDescriptor::parse(&env).unwrap();
    TopologyBuilder::new(descriptor)
        .with_share_dir(share_dir())
        .build()
        .unwrap()
}

#[test]
fn single_robot_plan() {
    let plan = resolve(&[(config::ROBOT_IP, "10.0.0.1")]);

    assert_eq!(plan.units.len(), 3);
    assert!(plan.units.iter().all(|u| u.namespace() == ""));

    match &plan.units[0] {
        UnitSpec::StatePublisher(spec) => {
            // single-robot description used verbatim, no substitution
            assert!(spec.description.contains("<robot name=\"go2\">"));
            assert!(!spec.description.contains("{robot_num}"));
        }
        other => panic!("expected state publisher, got {:?}", other.kind()),
    }
    match &plan.units[1] {
        UnitSpec::VideoBridge(spec) => assert_eq!(spec.address, "10.0.0.1"),
        other => panic!("expected video bridge, got {:?}", other.kind()),
    }
    match &plan.units[2] {
        UnitSpec::ScanConverter(spec) => {
            assert_eq!(spec.remap.from, "point_cloud2");
            assert_eq!(spec.remap.to, "scan");
            assert_eq!(spec.target_frame, "base_link");
            assert_eq!(spec.max_height, SINGLE_MAX_HEIGHT);
        }
        other => panic!("expected scan converter, got {:?}", other.kind()),
    }
}

#[test]
fn two_robot_plan() {
    let plan = resolve(&[(config::ROBOT_IP, "10.0.0.1, 10.0.0.2")]);

    assert_eq!(plan.units.len(), 6);
    for kind in [
        UnitKind::StatePublisher,
        UnitKind::VideoBridge,
        UnitKind::ScanConverter,
    ] {
        let namespaces: Vec<&str> = plan
            .units
            .iter()
            .filter(|u| u.kind() == kind)
            .map(|u| u.namespace())
            .collect();
        assert_eq!(namespaces, vec!["robot0", "robot1"]);
    }

    let remaps: Vec<(&str, &str)> = plan
        .units
        .iter()
        .filter_map(|u| match u {
            UnitSpec::ScanConverter(spec) => {
                assert_eq!(spec.max_height, MULTI_MAX_HEIGHT);
                Some((spec.remap.from.as_str(), spec.remap.to.as_str()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        remaps,
        vec![
            ("robot0/point_cloud2", "robot0/scan"),
            ("robot1/point_cloud2", "robot1/scan"),
        ]
    );

    // the multi-robot description is instantiated per robot
    let descriptions: Vec<&str> = plan
        .units
        .iter()
        .filter_map(|u| match u {
            UnitSpec::StatePublisher(spec) => Some(spec.description.as_str()),
            _ => None,
        })
        .collect();
    assert!(descriptions[0].contains("robot0/base_link"));
    assert!(descriptions[1].contains("robot1/base_link"));
    assert!(descriptions.iter().all(|d| !d.contains("{robot_num}")));
}

#[test]
fn empty_address_list_is_fatal() {
    let env: EnvSnapshot = [(config::ROBOT_IP, "")].into_iter().collect();
    assert_eq!(
        FleetDescriptor::parse(&env).unwrap_err(),
        ConfigError::EmptyFleet
    );
}

#[test]
fn cyclonedds_profile_overrides_single_mode_default() {
    let plan = resolve(&[
        (config::ROBOT_IP, "10.0.0.1"),
        (config::CONN_TYPE, "cyclonedds"),
    ]);
    assert_eq!(plan.shared.visualization.profile, RvizProfile::CycloneDds);
    assert!(
        plan.shared
            .visualization
            .config
            .ends_with("config/cyclonedds_config.rviz")
    );
}

#[test]
fn namespaces_unique_per_kind() {
    let plan = resolve(&[(config::ROBOT_IP, "a1,a2,a3,a4,a5")]);
    for kind in [
        UnitKind::StatePublisher,
        UnitKind::VideoBridge,
        UnitKind::ScanConverter,
    ] {
        let namespaces: Vec<&str> = plan
            .units
            .iter()
            .filter(|u| u.kind() == kind)
            .map(|u| u.namespace())
            .collect();
        let unique: HashSet<&str> = namespaces.iter().copied().collect();
        assert_eq!(namespaces.len(), 5);
        assert_eq!(unique.len(), namespaces.len());
    }
}

#[test]
fn mode_derived_from_address_count() {
    let env: EnvSnapshot = [(config::ROBOT_IP, "a1")].into_iter().collect();
    assert_eq!(
        FleetDescriptor::parse(&env).unwrap().mode(),
        ConnectionMode::Single
    );
    let env: EnvSnapshot = [(config::ROBOT_IP, "a1,a2,a3")].into_iter().collect();
    assert_eq!(
        FleetDescriptor::parse(&env).unwrap().mode(),
        ConnectionMode::Multi
    );
}

#[test]
fn plan_round_trips_through_json() {
    let plan = resolve(&[(config::ROBOT_IP, "10.0.0.1,10.0.0.2")]);
    let json = plan.to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["units"].as_array().unwrap().len(), 6);
    assert_eq!(value["units"][0]["kind"], "state_publisher");
    assert_eq!(value["shared"]["driver"]["transport"], "webrtc");
    assert_eq!(value["shared"]["visualization"]["suppressed"], false);
}
