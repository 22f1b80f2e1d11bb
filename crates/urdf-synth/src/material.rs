//! Material deduplication

use std::collections::HashMap;

use crate::types::Rgba;
use crate::xml::{attr, fmt_num};

/// A material definition emitted once per document
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: Rgba,
}

/// Strip every whitespace character from a host appearance name
pub fn normalize_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Per-run registry of materials in first-registration order
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    name_index: HashMap<String, usize>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its canonical definition.
    ///
    /// The first color registered under a normalized name is kept; later
    /// registrations return it unchanged.
    pub fn register(&mut self, raw_name: &str, color: Rgba) -> &Material {
        let name = normalize_name(raw_name);
        let index = match self.name_index.get(&name) {
            Some(&index) => {
                if self.materials[index].color != color {
                    tracing::debug!(
                        "Material '{}' already registered with {:?}, ignoring {:?}",
                        name,
                        self.materials[index].color,
                        color
                    );
                }
                index
            }
            None => {
                tracing::debug!("Registered material '{}'", name);
                self.materials.push(Material {
                    name: name.clone(),
                    color,
                });
                self.name_index.insert(name, self.materials.len() - 1);
                self.materials.len() - 1
            }
        };
        &self.materials[index]
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.name_index
            .get(&normalize_name(name))
            .map(|&index| &self.materials[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Render one `<material>` element per registered material
    pub fn render(&self) -> String {
        let mut out = String::new();
        for material in &self.materials {
            let [r, g, b, a] = material.color.0;
            out.push_str(&format!("  <material name=\"{}\">\n", attr(&material.name)));
            out.push_str(&format!(
                "    <color rgba=\"{} {} {} {}\"/>\n",
                fmt_num(r),
                fmt_num(g),
                fmt_num(b),
                fmt_num(a)
            ));
            out.push_str("  </material>\n");
        }
        out
    }
}
