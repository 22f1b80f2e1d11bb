//! Read-only assembly snapshot captured from the CAD host
//!
//! The synthesis core never talks to the host directly. A host integration
//! implements [`AssemblySource`] and hands back one [`AssemblySnapshot`] per run.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};
use crate::types::{InertiaTensor, JointLimits, JointType, Rgba};

/// Reserved name of the root link
pub const ROOT_LINK: &str = "base_link";

/// Appearance of a body as reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSnapshot {
    /// Raw appearance name, may contain whitespace
    pub name: String,
    pub color: Rgba,
}

/// Mass properties and appearance of one rigid body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub name: String,
    /// Mass in kg
    pub mass: f64,
    #[serde(default)]
    pub inertia: InertiaTensor,
    /// Center of mass in the host's global frame
    #[serde(default)]
    pub center_of_mass: DVec3,
    #[serde(default)]
    pub material: Option<MaterialSnapshot>,
}

impl BodySnapshot {
    pub fn new(name: impl Into<String>, mass: f64, center_of_mass: DVec3) -> Self {
        Self {
            name: name.into(),
            mass,
            inertia: InertiaTensor::default(),
            center_of_mass,
            material: None,
        }
    }

    /// Set the inertia tensor
    pub fn inertia(mut self, inertia: InertiaTensor) -> Self {
        self.inertia = inertia;
        self
    }

    /// Set the appearance
    pub fn material(mut self, name: impl Into<String>, color: Rgba) -> Self {
        self.material = Some(MaterialSnapshot {
            name: name.into(),
            color,
        });
        self
    }
}

/// A joint as reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub joint_type: JointType,
    pub parent: String,
    pub child: String,
    /// Absolute position of the child link in the host's global frame
    pub origin: DVec3,
    #[serde(default = "default_axis")]
    pub axis: DVec3,
    #[serde(default)]
    pub limits: JointLimits,
}

fn default_axis() -> DVec3 {
    DVec3::Z
}

impl JointSnapshot {
    pub fn new(
        name: impl Into<String>,
        joint_type: JointType,
        parent: impl Into<String>,
        child: impl Into<String>,
        origin: DVec3,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type,
            parent: parent.into(),
            child: child.into(),
            origin,
            axis: DVec3::Z,
            limits: JointLimits::default(),
        }
    }

    /// Set the joint axis
    pub fn axis(mut self, axis: DVec3) -> Self {
        self.axis = axis;
        self
    }

    /// Set the joint limits
    pub fn limits(mut self, lower: f64, upper: f64) -> Self {
        self.limits = JointLimits::with_range(lower, upper);
        self
    }
}

/// Everything one synthesis run needs from the host, captured once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblySnapshot {
    pub robot_name: String,
    #[serde(default)]
    pub bodies: Vec<BodySnapshot>,
    #[serde(default)]
    pub joints: Vec<JointSnapshot>,
}

impl AssemblySnapshot {
    pub fn new(robot_name: impl Into<String>) -> Self {
        Self {
            robot_name: robot_name.into(),
            bodies: Vec::new(),
            joints: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: BodySnapshot) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn with_joint(mut self, joint: JointSnapshot) -> Self {
        self.joints.push(joint);
        self
    }

    /// Index bodies by name
    pub fn body_index(&self) -> HashMap<&str, &BodySnapshot> {
        self.bodies.iter().map(|b| (b.name.as_str(), b)).collect()
    }

    /// Reject snapshots with a missing root or colliding identifiers
    pub fn validate(&self) -> SynthResult<()> {
        let mut body_names = HashSet::new();
        for body in &self.bodies {
            if !body_names.insert(body.name.as_str()) {
                return Err(SynthError::DuplicateLink(body.name.clone()));
            }
        }
        if !body_names.contains(ROOT_LINK) {
            return Err(SynthError::MissingRootLink);
        }

        let mut joint_names = HashSet::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for joint in &self.joints {
            if !joint_names.insert(joint.name.as_str()) {
                return Err(SynthError::DuplicateJoint(joint.name.clone()));
            }
            if let Some(first) = owners.insert(joint.child.as_str(), joint.name.as_str()) {
                return Err(SynthError::DuplicateChild {
                    child: joint.child.clone(),
                    first: first.to_string(),
                    second: joint.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Parse a snapshot from RON text
    pub fn from_ron_str(content: &str) -> SynthResult<Self> {
        ron::from_str(content).map_err(|e| SynthError::Snapshot(e.to_string()))
    }

    /// Parse a snapshot from JSON text
    pub fn from_json_str(content: &str) -> SynthResult<Self> {
        serde_json::from_str(content).map_err(|e| SynthError::Snapshot(e.to_string()))
    }

    /// Load a snapshot file; `.json` is read as JSON, anything else as RON
    pub fn load(path: impl AsRef<Path>) -> SynthResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SynthError::Io(e.to_string()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_ron_str(&content)
        }
    }
}

/// Provider of the assembly snapshot for one run
pub trait AssemblySource {
    fn capture(&self) -> SynthResult<AssemblySnapshot>;
}

impl AssemblySource for AssemblySnapshot {
    fn capture(&self) -> SynthResult<AssemblySnapshot> {
        Ok(self.clone())
    }
}

/// Snapshot stored on disk by a host-side dump
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AssemblySource for SnapshotFile {
    fn capture(&self) -> SynthResult<AssemblySnapshot> {
        tracing::info!("Reading assembly snapshot from {:?}", self.path);
        AssemblySnapshot::load(&self.path)
    }
}
