//! Joint-related type definitions

use serde::{Deserialize, Serialize};

/// Joint type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    #[default]
    Fixed,
    Revolute,
    Continuous,
    Prismatic,
    Floating,
    Planar,
}

impl JointType {
    /// Check if this joint type has an axis
    pub fn has_axis(&self) -> bool {
        !matches!(self, JointType::Fixed)
    }

    /// Check if this joint type carries limit bounds
    pub fn has_limits(&self) -> bool {
        !matches!(self, JointType::Fixed)
    }

    /// Whether an actuator transmission is generated for this joint
    pub fn needs_transmission(&self) -> bool {
        !matches!(self, JointType::Fixed)
    }

    /// Value of the `type` attribute in URDF
    pub fn urdf_name(&self) -> &'static str {
        match self {
            JointType::Fixed => "fixed",
            JointType::Revolute => "revolute",
            JointType::Continuous => "continuous",
            JointType::Prismatic => "prismatic",
            JointType::Floating => "floating",
            JointType::Planar => "planar",
        }
    }

    /// All joint types
    pub fn all() -> &'static [JointType] {
        &[
            JointType::Fixed,
            JointType::Revolute,
            JointType::Continuous,
            JointType::Prismatic,
            JointType::Floating,
            JointType::Planar,
        ]
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.urdf_name())
    }
}

/// Joint position limits as authored in the CAD host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct JointLimits {
    /// Lower position limit (rad or m)
    pub lower: f64,
    /// Upper position limit (rad or m)
    pub upper: f64,
}

impl JointLimits {
    /// Create limits with specified range
    pub fn with_range(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_fixed_skips_transmission() {
        for joint_type in JointType::all() {
            assert_eq!(
                joint_type.needs_transmission(),
                *joint_type != JointType::Fixed
            );
        }
    }

    #[test]
    fn test_urdf_name_round_trips_through_serde() {
        for joint_type in JointType::all() {
            let encoded = serde_json::to_string(joint_type).unwrap();
            assert_eq!(encoded, format!("\"{}\"", joint_type.urdf_name()));
        }
    }
}
