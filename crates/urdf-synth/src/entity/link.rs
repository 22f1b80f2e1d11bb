//! Link record and its `<link>` fragment

use glam::DVec3;

use crate::config::MeshConfig;
use crate::snapshot::BodySnapshot;
use crate::types::InertiaTensor;
use crate::xml::{attr, fmt_num, fmt_vec};

/// A fully resolved link
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub name: String,
    /// Absolute position in the host frame (zero for the root)
    pub position: DVec3,
    /// Center of mass in the link frame
    pub center_of_mass: DVec3,
    /// Mass in kg
    pub mass: f64,
    pub inertia: InertiaTensor,
    /// Canonical material name
    pub material: Option<String>,
}

impl Link {
    /// Link for a body whose frame quantities are already resolved
    pub fn new(body: &BodySnapshot, position: DVec3, center_of_mass: DVec3) -> Self {
        Self {
            name: body.name.clone(),
            position,
            center_of_mass,
            mass: body.mass,
            inertia: body.inertia,
            material: None,
        }
    }

    /// Set the material reference
    pub fn material(mut self, name: Option<String>) -> Self {
        self.material = name;
        self
    }

    /// Render the `<link>` element.
    ///
    /// Meshes are exported in the host frame, so the visual and collision
    /// origins undo the link's absolute position.
    pub fn render(&self, mesh: &MeshConfig) -> String {
        let mesh_origin = fmt_vec(-self.position);
        let scale = fmt_num(mesh.scale);
        let mesh_element = format!(
            "        <mesh filename=\"{}\" scale=\"{} {} {}\"/>\n",
            attr(&mesh.resource(&self.name)),
            scale,
            scale,
            scale
        );
        let i = &self.inertia;

        let mut out = String::new();
        out.push_str(&format!("  <link name=\"{}\">\n", attr(&self.name)));
        out.push_str("    <inertial>\n");
        out.push_str(&format!(
            "      <origin xyz=\"{}\" rpy=\"0 0 0\"/>\n",
            fmt_vec(self.center_of_mass)
        ));
        out.push_str(&format!("      <mass value=\"{}\"/>\n", fmt_num(self.mass)));
        out.push_str(&format!(
            "      <inertia ixx=\"{}\" iyy=\"{}\" izz=\"{}\" ixy=\"{}\" iyz=\"{}\" ixz=\"{}\"/>\n",
            fmt_num(i.ixx),
            fmt_num(i.iyy),
            fmt_num(i.izz),
            fmt_num(i.ixy),
            fmt_num(i.iyz),
            fmt_num(i.ixz)
        ));
        out.push_str("    </inertial>\n");

        out.push_str("    <visual>\n");
        out.push_str(&format!("      <origin xyz=\"{}\" rpy=\"0 0 0\"/>\n", mesh_origin));
        out.push_str("      <geometry>\n");
        out.push_str(&mesh_element);
        out.push_str("      </geometry>\n");
        if let Some(material) = &self.material {
            out.push_str(&format!("      <material name=\"{}\"/>\n", attr(material)));
        }
        out.push_str("    </visual>\n");

        out.push_str("    <collision>\n");
        out.push_str(&format!("      <origin xyz=\"{}\" rpy=\"0 0 0\"/>\n", mesh_origin));
        out.push_str("      <geometry>\n");
        out.push_str(&mesh_element);
        out.push_str("      </geometry>\n");
        out.push_str("    </collision>\n");
        out.push_str("  </link>\n");
        out
    }
}
