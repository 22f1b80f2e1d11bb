//! Joint record with its `<joint>` and `<transmission>` fragments

use glam::DVec3;

use crate::config::{LimitConfig, TransmissionConfig};
use crate::snapshot::JointSnapshot;
use crate::types::{JointLimits, JointType};
use crate::xml::{attr, fmt_num, fmt_vec};

/// A joint with its origin expressed relative to the parent link
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    pub joint_type: JointType,
    pub parent: String,
    pub child: String,
    /// Parent absolute position minus child absolute position
    pub origin: DVec3,
    pub axis: DVec3,
    pub limits: JointLimits,
}

impl Joint {
    /// Joint record from host data and its resolved origin
    pub fn new(snapshot: &JointSnapshot, origin: DVec3) -> Self {
        Self {
            name: snapshot.name.clone(),
            joint_type: snapshot.joint_type,
            parent: snapshot.parent.clone(),
            child: snapshot.child.clone(),
            origin,
            axis: snapshot.axis,
            limits: snapshot.limits,
        }
    }

    /// Render the `<joint>` element; fixed joints carry no axis or limit
    pub fn render(&self, limits: &LimitConfig) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "  <joint name=\"{}\" type=\"{}\">\n",
            attr(&self.name),
            self.joint_type.urdf_name()
        ));
        out.push_str(&format!(
            "    <origin xyz=\"{}\" rpy=\"0 0 0\"/>\n",
            fmt_vec(self.origin)
        ));
        out.push_str(&format!("    <parent link=\"{}\"/>\n", attr(&self.parent)));
        out.push_str(&format!("    <child link=\"{}\"/>\n", attr(&self.child)));
        if self.joint_type.has_axis() {
            out.push_str(&format!("    <axis xyz=\"{}\"/>\n", fmt_vec(self.axis)));
        }
        if self.joint_type.has_limits() {
            out.push_str(&format!(
                "    <limit upper=\"{}\" lower=\"{}\" effort=\"{}\" velocity=\"{}\"/>\n",
                fmt_num(self.limits.upper),
                fmt_num(self.limits.lower),
                fmt_num(limits.effort),
                fmt_num(limits.velocity)
            ));
        }
        out.push_str("  </joint>\n");
        out
    }

    /// Render the `<transmission>` element, `None` for fixed joints
    pub fn render_transmission(&self, transmission: &TransmissionConfig) -> Option<String> {
        if !self.joint_type.needs_transmission() {
            return None;
        }
        let name = attr(&self.name);
        let interface = attr(&transmission.hardware_interface);

        let mut out = String::new();
        out.push_str(&format!("  <transmission name=\"{}_tran\">\n", name));
        out.push_str("    <type>transmission_interface/SimpleTransmission</type>\n");
        out.push_str(&format!("    <joint name=\"{}\">\n", name));
        out.push_str(&format!(
            "      <hardwareInterface>{}</hardwareInterface>\n",
            interface
        ));
        out.push_str("    </joint>\n");
        out.push_str(&format!("    <actuator name=\"{}_actr\">\n", name));
        out.push_str(&format!(
            "      <hardwareInterface>{}</hardwareInterface>\n",
            interface
        ));
        out.push_str(&format!(
            "      <mechanicalReduction>{}</mechanicalReduction>\n",
            fmt_num(transmission.mechanical_reduction)
        ));
        out.push_str("    </actuator>\n");
        out.push_str("  </transmission>\n");
        Some(out)
    }
}
