use crate::error::{Error, Result};
use crate::graph::Point;
use serde::{Deserialize, Serialize};

/// Layout options. Always passed in explicitly; the engine never reads ambient settings.
///
/// Deserializes from the camelCase keys used by the hosting application (`nodeWidth`,
/// `levelSpacing`, `collisionDetection`, ...). Missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Footprint width for nodes that do not declare one.
    pub node_width: f64,
    /// Footprint height for nodes that do not declare one.
    pub node_height: f64,
    /// Vertical distance between consecutive depth levels.
    pub level_spacing: f64,
    /// Minimum horizontal gap between neighbouring nodes on the same level. Zero lets nodes touch.
    pub sibling_spacing: f64,
    /// Vertical step between children stacked by the incremental placer.
    pub child_spacing: f64,
    /// Translate the finished layout so its bounding box is centered on `origin`.
    pub center_alignment: bool,
    /// Run the collision resolver after the two-pass positioner.
    pub collision_detection: bool,
    pub origin: Point,
    pub collision: CollisionOptions,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 60.0,
            level_spacing: 200.0,
            sibling_spacing: 40.0,
            child_spacing: 80.0,
            center_alignment: true,
            collision_detection: false,
            origin: Point::ORIGIN,
            collision: CollisionOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollisionOptions {
    /// Extra clearance added to `max(width_a, width_b)` when testing a pair.
    pub margin: f64,
    /// Upper bound on relaxation passes; residual overlap is accepted past this point.
    pub max_iterations: usize,
    /// Fraction of the vertical repulsion component that is applied (0 pins nodes to their row).
    pub vertical_damping: f64,
}

impl Default for CollisionOptions {
    fn default() -> Self {
        Self {
            margin: 20.0,
            max_iterations: 50,
            vertical_damping: 0.1,
        }
    }
}

impl CollisionOptions {
    pub fn validate(&self) -> Result<()> {
        non_negative("collision.margin", self.margin)?;
        if !(0.0..=1.0).contains(&self.vertical_damping) {
            return Err(Error::InvalidConfig {
                option: "collision.verticalDamping",
                value: self.vertical_damping,
                requirement: "within [0, 1]",
            });
        }
        Ok(())
    }
}

impl LayoutConfig {
    /// Deserializes a (possibly partial) JSON config object and validates it.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let config = LayoutConfig::deserialize(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects spacing and size values the layout cannot honor.
    pub fn validate(&self) -> Result<()> {
        positive("nodeWidth", self.node_width)?;
        positive("nodeHeight", self.node_height)?;
        positive("levelSpacing", self.level_spacing)?;
        non_negative("siblingSpacing", self.sibling_spacing)?;
        positive("childSpacing", self.child_spacing)?;
        finite("origin.x", self.origin.x)?;
        finite("origin.y", self.origin.y)?;
        self.collision.validate()
    }
}

fn positive(option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(Error::InvalidConfig {
        option,
        value,
        requirement: "a finite value > 0",
    })
}

fn non_negative(option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(Error::InvalidConfig {
        option,
        value,
        requirement: "a finite value >= 0",
    })
}

fn finite(option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        return Ok(());
    }
    Err(Error::InvalidConfig {
        option,
        value,
        requirement: "finite",
    })
}

#[cfg(test)]
mod tests {
    use super::LayoutConfig;
    use serde_json::json;

    #[test]
    fn partial_json_keeps_defaults_for_missing_keys() {
        let cfg = LayoutConfig::from_value(&json!({
            "levelSpacing": 120.0,
            "collision": { "margin": 5.0 }
        }))
        .unwrap();
        assert_eq!(cfg.level_spacing, 120.0);
        assert_eq!(cfg.node_width, 160.0);
        assert_eq!(cfg.collision.margin, 5.0);
        assert_eq!(cfg.collision.max_iterations, 50);
    }

    #[test]
    fn nan_is_rejected_like_non_positive() {
        let cfg = LayoutConfig {
            node_height: f64::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
