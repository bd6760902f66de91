//! Connector routing between stage segments
//!
//! Normal connections travel along the outside of the stage ring, bulging
//! into the band between stages and categories. Alternative connections
//! leave from the inner edge of the stage ring and dip through the core, so
//! return paths never overlap the forward flow.

use serde::Serialize;

use super::geometry::{signed_angle_delta, CubicBezier, Point};
use super::{LayoutConfig, StageLayout};
use crate::data::{Connection, ConnectionType};

/// Angular half-width of a self-loop
const SELF_LOOP_SPREAD: f64 = 0.15;

#[derive(Debug, Clone, Serialize)]
pub struct ConnectorLayout {
    pub from: String,
    pub to: String,
    pub kind: ConnectionType,
    pub curve: CubicBezier,
    /// Triangle: left base corner, tip, right base corner
    pub arrowhead: [Point; 3],
}

impl ConnectorLayout {
    pub fn is_dashed(&self) -> bool {
        self.kind.is_dashed()
    }
}

/// Route every connection whose endpoints resolve to laid-out stages.
pub fn route_connectors(
    connections: &[Connection],
    stages: &[StageLayout],
    config: &LayoutConfig,
) -> Vec<ConnectorLayout> {
    connections
        .iter()
        .filter_map(|conn| {
            let from = stages.iter().find(|s| s.name == conn.from);
            let to = stages.iter().find(|s| s.name == conn.to);
            match (from, to) {
                (Some(from), Some(to)) => Some(route(conn, from, to, config)),
                _ => {
                    tracing::debug!(
                        "Skipping connection {} -> {}: unknown stage",
                        conn.from,
                        conn.to
                    );
                    None
                }
            }
        })
        .collect()
}

fn route(
    conn: &Connection,
    from: &StageLayout,
    to: &StageLayout,
    config: &LayoutConfig,
) -> ConnectorLayout {
    let a0 = from.arc.mid_angle();
    let a1 = to.arc.mid_angle();

    let curve = match conn.kind {
        ConnectionType::Normal => {
            let radius = config.stage_ring.outer;
            if from.name == to.name {
                self_loop(radius, a0, config.connector_bulge * 2.0)
            } else {
                outer_arc(radius, a0, a1, config.connector_bulge)
            }
        }
        ConnectionType::Alternative => {
            let radius = config.stage_ring.inner;
            if from.name == to.name {
                self_loop(radius, a0, -config.connector_bulge * 2.0)
            } else {
                through_core(radius, a0, a1, config.return_curvature)
            }
        }
    };

    ConnectorLayout {
        from: conn.from.clone(),
        to: conn.to.clone(),
        kind: conn.kind,
        arrowhead: arrowhead(&curve, config.arrow_size),
        curve,
    }
}

/// Curve hugging the circle of `radius`, bulging outward by `bulge`
fn outer_arc(radius: f64, a0: f64, a1: f64, bulge: f64) -> CubicBezier {
    let delta = signed_angle_delta(a0, a1);
    let ctrl_radius = radius + bulge;
    CubicBezier {
        start: Point::polar(radius, a0),
        ctrl1: Point::polar(ctrl_radius, a0 + delta / 3.0),
        ctrl2: Point::polar(ctrl_radius, a0 + 2.0 * delta / 3.0),
        end: Point::polar(radius, a1),
    }
}

/// Chord pulled toward the centre by `curvature` (0 = straight line, 1 = through origin)
fn through_core(radius: f64, a0: f64, a1: f64, curvature: f64) -> CubicBezier {
    let curvature = curvature.clamp(0.0, 1.0);
    let start = Point::polar(radius, a0);
    let end = Point::polar(radius, a1);
    CubicBezier {
        start,
        ctrl1: start.scale(1.0 - curvature),
        ctrl2: end.scale(1.0 - curvature),
        end,
    }
}

fn self_loop(radius: f64, angle: f64, reach: f64) -> CubicBezier {
    let anchor = Point::polar(radius, angle);
    CubicBezier {
        start: anchor,
        ctrl1: Point::polar(radius + reach, angle - SELF_LOOP_SPREAD),
        ctrl2: Point::polar(radius + reach, angle + SELF_LOOP_SPREAD),
        end: anchor,
    }
}

fn arrowhead(curve: &CubicBezier, size: f64) -> [Point; 3] {
    let tip = curve.end;
    let Some(dir) = curve.end_direction() else {
        return [tip, tip, tip];
    };
    let base = tip.sub(dir.scale(size));
    let half = dir.perpendicular().scale(size / 2.0);
    [base.add(half), tip, base.sub(half)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::data::{LifecycleData, Stage};
    use approx::assert_relative_eq;

    fn two_stages(kind: ConnectionType) -> LifecycleData {
        let stage = |name: &str| Stage {
            name: name.to_string(),
            description: String::new(),
            color: "#90be66".to_string(),
        };
        LifecycleData {
            stages: vec![stage("Collect"), stage("Process")],
            connections: vec![Connection {
                from: "Collect".to_string(),
                to: "Process".to_string(),
                kind,
            }],
            exemplars: vec![],
        }
    }

    #[test]
    fn test_normal_connector_anchors_on_stage_ring() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&two_stages(ConnectionType::Normal), &config, None);
        assert_eq!(layout.connectors.len(), 1);

        let conn = &layout.connectors[0];
        assert!(!conn.is_dashed());
        assert_relative_eq!(conn.curve.start.length(), config.stage_ring.outer, epsilon = 1e-9);
        assert_relative_eq!(conn.curve.end.length(), config.stage_ring.outer, epsilon = 1e-9);
        assert!(conn.curve.ctrl1.length() > config.stage_ring.outer);
        assert_eq!(conn.arrowhead[1], conn.curve.end);
    }

    #[test]
    fn test_alternative_connector_passes_through_core() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&two_stages(ConnectionType::Alternative), &config, None);
        let conn = &layout.connectors[0];

        assert!(conn.is_dashed());
        assert_relative_eq!(conn.curve.start.length(), config.stage_ring.inner, epsilon = 1e-9);
        assert!(conn.curve.point_at(0.5).length() < config.stage_ring.inner);
    }

    #[test]
    fn test_arrowhead_size() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&two_stages(ConnectionType::Normal), &config, None);
        let [left, tip, right] = layout.connectors[0].arrowhead;

        assert_relative_eq!(left.sub(right).length(), config.arrow_size, epsilon = 1e-9);
        let base_mid = left.add(right).scale(0.5);
        assert_relative_eq!(tip.sub(base_mid).length(), config.arrow_size, epsilon = 1e-9);
    }

    fn self_loop_layout(kind: ConnectionType) -> (LayoutConfig, ConnectorLayout) {
        let mut data = two_stages(kind);
        data.connections[0].to = "Collect".to_string();
        let config = LayoutConfig::default();
        let mut layout = compute_layout(&data, &config, None);
        assert_eq!(layout.connectors.len(), 1);
        (config, layout.connectors.remove(0))
    }

    fn assert_arrowhead_open(conn: &ConnectorLayout, size: f64) {
        let [left, tip, right] = conn.arrowhead;
        assert_eq!(tip, conn.curve.end);
        assert_relative_eq!(left.sub(right).length(), size, epsilon = 1e-9);
        assert!(tip.sub(left).length() > 0.0);
    }

    #[test]
    fn test_normal_self_loop_bulges_outward() {
        let (config, conn) = self_loop_layout(ConnectionType::Normal);
        let radius = config.stage_ring.outer;
        let reach = radius + 2.0 * config.connector_bulge;

        assert_eq!(conn.from, conn.to);
        assert_eq!(conn.curve.start, conn.curve.end);
        assert_relative_eq!(conn.curve.start.length(), radius, epsilon = 1e-9);
        assert_relative_eq!(conn.curve.ctrl1.length(), reach, epsilon = 1e-9);
        assert_relative_eq!(conn.curve.ctrl2.length(), reach, epsilon = 1e-9);
        assert!(conn.curve.point_at(0.5).length() > radius);
        assert_arrowhead_open(&conn, config.arrow_size);
    }

    #[test]
    fn test_alternative_self_loop_dips_inward() {
        let (config, conn) = self_loop_layout(ConnectionType::Alternative);
        let radius = config.stage_ring.inner;
        let reach = radius - 2.0 * config.connector_bulge;

        assert!(conn.is_dashed());
        assert_eq!(conn.curve.start, conn.curve.end);
        assert_relative_eq!(conn.curve.start.length(), radius, epsilon = 1e-9);
        assert_relative_eq!(conn.curve.ctrl1.length(), reach, epsilon = 1e-9);
        assert_relative_eq!(conn.curve.ctrl2.length(), reach, epsilon = 1e-9);
        assert!(conn.curve.point_at(0.5).length() < radius);
        assert_arrowhead_open(&conn, config.arrow_size);
    }

    #[test]
    fn test_unknown_endpoint_skipped() {
        let mut data = two_stages(ConnectionType::Normal);
        data.connections[0].to = "Nowhere".to_string();
        let layout = compute_layout(&data, &LayoutConfig::default(), None);
        assert!(layout.connectors.is_empty());
    }
}
