//! Coordinate resolution
//!
//! URDF wants each joint origin relative to its parent link, while the CAD host
//! reports every link in one global frame. Resolution happens in two phases:
//! [`AbsolutePositions::build`] records the absolute position of every link that
//! has body data, then [`AbsolutePositions::relative_origin`] turns each joint
//! into `parent - child` from the completed map.

use std::collections::HashMap;

use glam::DVec3;

use crate::error::{SynthError, SynthResult};
use crate::snapshot::{AssemblySnapshot, JointSnapshot, ROOT_LINK};

/// Decimal places kept in joint origins
pub const ORIGIN_PRECISION: i32 = 6;

/// Absolute link positions for one synthesis run
#[derive(Debug, Clone, Default)]
pub struct AbsolutePositions {
    positions: HashMap<String, DVec3>,
}

impl AbsolutePositions {
    /// Build the map from the complete snapshot.
    ///
    /// The root link sits at the origin regardless of input. Every other link
    /// takes the absolute position carried by the joint that owns it, provided
    /// the host reported a body for it.
    pub fn build(snapshot: &AssemblySnapshot) -> Self {
        let bodies = snapshot.body_index();
        let mut positions = HashMap::with_capacity(snapshot.joints.len() + 1);
        positions.insert(ROOT_LINK.to_string(), DVec3::ZERO);

        for joint in &snapshot.joints {
            if joint.child == ROOT_LINK || !bodies.contains_key(joint.child.as_str()) {
                continue;
            }
            positions.insert(joint.child.clone(), joint.origin);
        }

        Self { positions }
    }

    /// Absolute position of a link, if resolved
    pub fn get(&self, link: &str) -> Option<DVec3> {
        self.positions.get(link).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Joint origin as `round(parent - child)`
    pub fn relative_origin(&self, joint: &JointSnapshot) -> SynthResult<DVec3> {
        match (self.get(&joint.parent), self.get(&joint.child)) {
            (Some(parent), Some(child)) => Ok(round_vec(parent - child, ORIGIN_PRECISION)),
            _ => Err(SynthError::StructuralInconsistency {
                joint: joint.name.clone(),
                parent: joint.parent.clone(),
                child: joint.child.clone(),
            }),
        }
    }
}

/// Re-express a host center of mass in the link frame
pub fn adjust_center_of_mass(center_of_mass: DVec3, relative_origin: DVec3) -> DVec3 {
    center_of_mass - relative_origin
}

/// Round to `places` decimals, folding `-0` into `0`
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale + 0.0
}

/// Component-wise [`round_to`]
pub fn round_vec(v: DVec3, places: i32) -> DVec3 {
    DVec3::new(
        round_to(v.x, places),
        round_to(v.y, places),
        round_to(v.z, places),
    )
}
