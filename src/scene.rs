//! Scene loading, parsing, and validation logic.
//!
//! A scene places the vehicles, describes the sidelink resource pool and the
//! propagation environment, and optionally restricts statistics to regions.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use thiserror::Error;

use crate::NodeId;
use crate::geometry::{BoundingBox, GeometryError, Point, PolygonKind, PosEnabler};
use crate::pool::{PoolConfig, PoolError, ResourcePool};
use crate::propagation::PropagationParameters;

const MAX_NODES: usize = 10000;
const MIN_TX_POWER_DBM: f64 = -50.0;
const MAX_TX_POWER_DBM: f64 = 50.0;

/// Error type for scene loading failures.
#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("Failed to read file: {0}")]
    FileReadError(String),
    #[error("Failed to parse JSON: {0}")]
    ParseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

fn default_tx_power_dbm() -> f64 {
    23.0
}

/// A vehicle of the scene.
#[derive(Debug, Deserialize, Clone)]
pub struct NodeSpec {
    pub node_id: NodeId,
    pub position: Point,
    /// Velocity in m/s.
    #[serde(default)]
    pub velocity: Point,
    #[serde(default = "default_tx_power_dbm")]
    pub tx_power_dbm: f64,
}

/// Statistics regions.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RegionConfig {
    #[serde(default)]
    pub tx_polygon: Option<Vec<Point>>,
    #[serde(default)]
    pub rx_polygon: Option<Vec<Point>>,
    #[serde(default)]
    pub bounding_boxes: Vec<BoundingBox>,
    /// Only nodes inside a bounding box take part when set.
    #[serde(default)]
    pub enable_checker: bool,
}

/// Root structure representing the entire scene.
#[derive(Debug, Deserialize, Clone)]
pub struct Scene {
    pub world_top_left: Point,
    pub world_bottom_right: Point,
    pub nodes: Vec<NodeSpec>,
    pub pool: PoolConfig,
    #[serde(default = "PropagationParameters::highway")]
    pub propagation: PropagationParameters,
    #[serde(default)]
    pub regions: RegionConfig,
}

impl Scene {
    pub fn width(&self) -> f64 {
        self.world_bottom_right.x - self.world_top_left.x
    }

    pub fn height(&self) -> f64 {
        self.world_bottom_right.y - self.world_top_left.y
    }

    pub fn contains(&self, p: &Point) -> bool {
        (self.world_top_left.x..=self.world_bottom_right.x).contains(&p.x)
            && (self.world_top_left.y..=self.world_bottom_right.y).contains(&p.y)
    }

    /// Bring a point that left the world back in on the opposite side.
    pub fn wrap(&self, p: Point) -> Point {
        let wrap_axis = |v: f64, lo: f64, span: f64| if span > 0.0 { lo + (v - lo).rem_euclid(span) } else { v };
        Point::new(
            wrap_axis(p.x, self.world_top_left.x, self.width()),
            wrap_axis(p.y, self.world_top_left.y, self.height()),
        )
    }

    pub fn resource_pool(&self) -> Result<ResourcePool, PoolError> {
        ResourcePool::set_pool(self.pool.clone())
    }

    /// Region gate described by the scene.
    pub fn pos_enabler(&self) -> Result<PosEnabler, GeometryError> {
        let mut enabler = PosEnabler::new();
        if let Some(vertices) = &self.regions.tx_polygon {
            enabler.set_polygon(PolygonKind::Tx, vertices.clone())?;
        }
        if let Some(vertices) = &self.regions.rx_polygon {
            enabler.set_polygon(PolygonKind::Rx, vertices.clone())?;
        }
        enabler.set_bounding_boxes(self.regions.bounding_boxes.clone())?;
        if self.regions.enable_checker {
            enabler.enable_checker();
        }
        Ok(enabler)
    }
}

/// Loads and validates a scene from a JSON file.
///
/// # Arguments
/// * `path` - Path to the scene JSON file
///
/// # Returns
/// * `Ok(Scene)` if loading and validation succeeded
/// * `Err(SceneLoadError)` with details about what went wrong
pub fn load_scene(path: &str) -> Result<Scene, SceneLoadError> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))
        .map_err(|e| SceneLoadError::FileReadError(e.to_string()))?;
    parse_scene(&data)
}

/// Parses and validates a scene from JSON text.
pub fn parse_scene(data: &str) -> Result<Scene, SceneLoadError> {
    let scene: Scene = serde_json::from_str(data)
        .context("Invalid JSON format")
        .map_err(|e| SceneLoadError::ParseError(format!("{:#}", e)))?;
    validate_scene(&scene).map_err(SceneLoadError::ValidationError)?;
    Ok(scene)
}

/// Validates scene data for correctness and consistency.
///
/// Checks:
/// - Node count limits (1 to 10,000)
/// - Unique node IDs
/// - Node positions inside the world and finite velocities
/// - Transmit power range
/// - World bounds are a real rectangle
/// - The resource pool and the regions can be built
pub fn validate_scene(scene: &Scene) -> Result<(), String> {
    if scene.width() <= 0.0 || scene.height() < 0.0 {
        return Err(format!(
            "World bounds invalid: top-left ({}, {}) must be left of and above bottom-right ({}, {})",
            scene.world_top_left.x, scene.world_top_left.y, scene.world_bottom_right.x, scene.world_bottom_right.y
        ));
    }

    if scene.nodes.is_empty() {
        return Err("Scene must contain at least one node".to_string());
    }
    if scene.nodes.len() > MAX_NODES {
        return Err(format!("Too many nodes: {} (maximum: {})", scene.nodes.len(), MAX_NODES));
    }

    let mut seen_ids = HashSet::new();
    for node in &scene.nodes {
        if !seen_ids.insert(node.node_id) {
            return Err(format!("Duplicate node_id: {}", node.node_id));
        }
        if !scene.contains(&node.position) {
            return Err(format!(
                "Node {} position ({}, {}) is outside the world",
                node.node_id, node.position.x, node.position.y
            ));
        }
        if !(node.velocity.x.is_finite() && node.velocity.y.is_finite()) {
            return Err(format!("Node {} velocity must be finite", node.node_id));
        }
        if !(MIN_TX_POWER_DBM..=MAX_TX_POWER_DBM).contains(&node.tx_power_dbm) {
            return Err(format!(
                "Node {} tx_power_dbm {} out of range [{}, {}]",
                node.node_id, node.tx_power_dbm, MIN_TX_POWER_DBM, MAX_TX_POWER_DBM
            ));
        }
    }

    scene.resource_pool().map_err(|e| format!("Invalid resource pool: {}", e))?;
    scene.pos_enabler().map_err(|e| format!("Invalid regions: {}", e))?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const POOL_JSON: &str = r#"{
        "type": "ue_selected",
        "sc_cp_len": "normal",
        "sc_period": "sf40",
        "sc_tf_resource_config": {
            "prb_num": 1, "prb_start": 0, "prb_end": 1,
            "subframe_bitmap": "1111111100000000000000000000000000000000"
        },
        "data_cp_len": "normal",
        "data_tf_resource_config": {
            "prb_num": 10, "prb_start": 0, "prb_end": 19,
            "subframe_bitmap": "0000000011111111111111111111111111111111"
        },
        "sc_tx_parameters": { "alpha": "al1", "p0": -40 },
        "data_tx_parameters": { "alpha": "al1", "p0": -40 }
    }"#;

    pub(crate) fn scene_json(nodes: &str) -> String {
        format!(
            r#"{{
                "world_top_left": {{ "x": 0.0, "y": 0.0 }},
                "world_bottom_right": {{ "x": 1000.0, "y": 20.0 }},
                "nodes": [{}],
                "pool": {},
                "propagation": {{ "scenario": "highway", "shadowing": false }}
            }}"#,
            nodes, POOL_JSON
        )
    }

    #[test]
    fn parses_a_highway_scene() {
        let scene = parse_scene(&scene_json(
            r#"{ "node_id": 1, "position": { "x": 10.0, "y": 5.0 }, "velocity": { "x": 30.0, "y": 0.0 } },
               { "node_id": 2, "position": { "x": 200.0, "y": 15.0 } }"#,
        ))
        .unwrap();
        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.nodes[1].tx_power_dbm, 23.0);
        assert_eq!(scene.nodes[1].velocity, Point::default());
        let pool = scene.resource_pool().unwrap();
        assert_eq!(pool.period(), 40);
        assert_eq!(pool.subchannel_count(10), 2);
        assert!(!scene.propagation.shadowing);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_scene(&scene_json(
            r#"{ "node_id": 1, "position": { "x": 10.0, "y": 5.0 } },
               { "node_id": 1, "position": { "x": 20.0, "y": 5.0 } }"#,
        ))
        .unwrap_err();
        assert!(matches!(err, SceneLoadError::ValidationError(msg) if msg.contains("Duplicate")));
    }

    #[test]
    fn nodes_outside_the_world_are_rejected() {
        let err = parse_scene(&scene_json(r#"{ "node_id": 1, "position": { "x": 1010.0, "y": 5.0 } }"#)).unwrap_err();
        assert!(matches!(err, SceneLoadError::ValidationError(_)));
    }

    #[test]
    fn empty_scene_is_rejected() {
        assert!(matches!(parse_scene(&scene_json("")).unwrap_err(), SceneLoadError::ValidationError(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(parse_scene("{ nodes: ").unwrap_err(), SceneLoadError::ParseError(_)));
        let bad_pool = scene_json(r#"{ "node_id": 1, "position": { "x": 1.0, "y": 1.0 } }"#).replace("sf40", "sf50");
        assert!(matches!(parse_scene(&bad_pool).unwrap_err(), SceneLoadError::ParseError(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(load_scene("/nonexistent/scene.json").unwrap_err(), SceneLoadError::FileReadError(_)));
    }

    #[test]
    fn wrap_brings_points_back() {
        let scene = parse_scene(&scene_json(r#"{ "node_id": 1, "position": { "x": 1.0, "y": 1.0 } }"#)).unwrap();
        let p = scene.wrap(Point::new(1030.0, 5.0));
        assert!((p.x - 30.0).abs() < 1e-9);
        assert_eq!(p.y, 5.0);
        assert!(scene.contains(&scene.wrap(Point::new(-5.0, 25.0))));
    }

    #[test]
    fn regions_build_a_pos_enabler() {
        let mut scene = parse_scene(&scene_json(r#"{ "node_id": 1, "position": { "x": 1.0, "y": 1.0 } }"#)).unwrap();
        scene.regions.rx_polygon = Some(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 20.0)]);
        let enabler = scene.pos_enabler().unwrap();
        assert!(enabler.is_inside(PolygonKind::Rx, &Point::new(90.0, 5.0)));
        assert!(!enabler.is_inside(PolygonKind::Rx, &Point::new(500.0, 5.0)));
        scene.regions.tx_polygon = Some(vec![Point::new(0.0, 0.0)]);
        assert!(validate_scene(&scene).is_err());
    }
}
