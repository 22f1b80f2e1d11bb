//! Inertia tensor

use serde::{Deserialize, Serialize};

/// The six independent components of a symmetric inertia tensor (kg·m²)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InertiaTensor {
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
    pub ixy: f64,
    pub iyz: f64,
    pub ixz: f64,
}

impl InertiaTensor {
    pub fn new(ixx: f64, iyy: f64, izz: f64, ixy: f64, iyz: f64, ixz: f64) -> Self {
        Self {
            ixx,
            iyy,
            izz,
            ixy,
            iyz,
            ixz,
        }
    }

    /// Diagonal tensor (principal axes aligned with the link frame)
    pub fn diagonal(ixx: f64, iyy: f64, izz: f64) -> Self {
        Self {
            ixx,
            iyy,
            izz,
            ..Self::default()
        }
    }
}
