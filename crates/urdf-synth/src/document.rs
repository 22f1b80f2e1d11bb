//! Document assembly
//!
//! Runs one synthesis pass over a snapshot and stitches the per-concern
//! fragments into a single `<robot>` document.

use std::collections::HashSet;

use glam::DVec3;

use crate::config::ExportConfig;
use crate::entity::{Joint, Link};
use crate::error::{SynthError, SynthResult};
use crate::material::MaterialRegistry;
use crate::resolver::{AbsolutePositions, adjust_center_of_mass};
use crate::snapshot::{AssemblySnapshot, BodySnapshot, ROOT_LINK};
use crate::xml::attr;

/// Closing tag of the root element
pub const CLOSING_TAG: &str = "</robot>\n";

/// A synthesized document, kept as its three per-concern sections
#[derive(Debug, Clone, PartialEq)]
pub struct UrdfDocument {
    pub robot_name: String,
    /// `<material>` definitions
    pub materials: String,
    /// `<transmission>` definitions
    pub transmissions: String,
    /// `<link>` then `<joint>` definitions
    pub structure: String,
}

impl UrdfDocument {
    /// XML declaration and opening root tag
    pub fn header(&self) -> String {
        format!(
            "<?xml version=\"1.0\" ?>\n<robot name=\"{}\">\n",
            attr(&self.robot_name)
        )
    }

    /// Staged artifacts as `(extension, content)`, in merge order.
    ///
    /// Concatenating the contents yields [`UrdfDocument::render`].
    pub fn sections(&self) -> [(&'static str, String); 3] {
        [
            ("material", format!("{}{}", self.header(), self.materials)),
            ("tran", self.transmissions.clone()),
            ("xacro", format!("{}{}", self.structure, CLOSING_TAG)),
        ]
    }

    /// The complete document
    pub fn render(&self) -> String {
        let mut out = self.header();
        out.push_str(&self.materials);
        out.push_str(&self.transmissions);
        out.push_str(&self.structure);
        out.push_str(CLOSING_TAG);
        out
    }
}

/// State owned by one synthesis run
struct SynthesisRun<'a> {
    snapshot: &'a AssemblySnapshot,
    config: &'a ExportConfig,
    positions: AbsolutePositions,
    materials: MaterialRegistry,
    links: String,
    joints: String,
    transmissions: String,
}

impl<'a> SynthesisRun<'a> {
    fn new(snapshot: &'a AssemblySnapshot, config: &'a ExportConfig) -> Self {
        Self {
            snapshot,
            config,
            positions: AbsolutePositions::build(snapshot),
            materials: MaterialRegistry::new(),
            links: String::new(),
            joints: String::new(),
            transmissions: String::new(),
        }
    }

    /// Resolve every joint origin from the completed position map
    fn resolve_joints(&self) -> SynthResult<Vec<Joint>> {
        self.snapshot
            .joints
            .iter()
            .map(|joint| {
                let origin = self.positions.relative_origin(joint)?;
                Ok(Joint::new(joint, origin))
            })
            .collect()
    }

    fn register_material(&mut self, body: &BodySnapshot) -> Option<String> {
        match &body.material {
            Some(material) => Some(
                self.materials
                    .register(&material.name, material.color)
                    .name
                    .clone(),
            ),
            None => {
                tracing::warn!("Body '{}' has no material", body.name);
                None
            }
        }
    }

    fn emit_link(&mut self, link: Link) {
        tracing::debug!("Emitting link '{}'", link.name);
        self.links.push_str(&link.render(&self.config.mesh));
    }

    fn emit_links(&mut self, joints: &[Joint]) -> SynthResult<()> {
        let snapshot = self.snapshot;
        let bodies = snapshot.body_index();

        let root = bodies
            .get(ROOT_LINK)
            .copied()
            .ok_or(SynthError::MissingRootLink)?;
        let material = self.register_material(root);
        self.emit_link(Link::new(root, DVec3::ZERO, root.center_of_mass).material(material));

        let mut emitted = HashSet::from([ROOT_LINK]);
        for joint in joints {
            if joint.child == ROOT_LINK {
                continue;
            }
            // resolved children always have a body
            let (Some(&body), Some(position)) = (
                bodies.get(joint.child.as_str()),
                self.positions.get(&joint.child),
            ) else {
                return Err(SynthError::StructuralInconsistency {
                    joint: joint.name.clone(),
                    parent: joint.parent.clone(),
                    child: joint.child.clone(),
                });
            };
            let material = self.register_material(body);
            let center_of_mass = adjust_center_of_mass(body.center_of_mass, joint.origin);
            self.emit_link(Link::new(body, position, center_of_mass).material(material));
            emitted.insert(body.name.as_str());
        }

        for body in &snapshot.bodies {
            if !emitted.contains(body.name.as_str()) {
                tracing::warn!("Body '{}' is not attached by any joint, skipping", body.name);
                // its appearance is still part of the material palette
                self.register_material(body);
            }
        }
        Ok(())
    }

    fn emit_joints(&mut self, joints: &[Joint]) {
        for joint in joints {
            tracing::debug!(
                "Emitting joint '{}' ({} -> {}, {})",
                joint.name,
                joint.parent,
                joint.child,
                joint.joint_type
            );
            self.joints.push_str(&joint.render(&self.config.limits));
            if let Some(transmission) = joint.render_transmission(&self.config.transmission) {
                self.transmissions.push_str(&transmission);
            }
        }
    }

    fn finish(self) -> UrdfDocument {
        let mut structure = self.links;
        structure.push_str(&self.joints);
        UrdfDocument {
            robot_name: self.snapshot.robot_name.clone(),
            materials: self.materials.render(),
            transmissions: self.transmissions,
            structure,
        }
    }
}

/// Synthesize a URDF document from an assembly snapshot
pub fn synthesize(snapshot: &AssemblySnapshot, config: &ExportConfig) -> SynthResult<UrdfDocument> {
    snapshot.validate()?;
    tracing::info!(
        "Synthesizing '{}': {} bodies, {} joints",
        snapshot.robot_name,
        snapshot.bodies.len(),
        snapshot.joints.len()
    );

    let mut run = SynthesisRun::new(snapshot, config);
    let joints = run.resolve_joints()?;
    run.emit_links(&joints)?;
    run.emit_joints(&joints);

    let document = run.finish();
    tracing::info!("Synthesized '{}'", document.robot_name);
    Ok(document)
}
