//! Export configuration
//!
//! Settings that shape the generated document but are not part of the
//! assembly: where meshes live, how transmissions are described and which
//! effort/velocity bounds are written on joint limits. Stored as RON.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Mesh resource settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshConfig {
    /// ROS package holding the meshes
    pub package_name: String,
    /// Directory inside the package
    pub mesh_dir: String,
    /// File extension including the dot
    pub extension: String,
    /// Uniform scale from CAD units to meters
    pub scale: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            package_name: "robot_description".to_string(),
            mesh_dir: "meshes".to_string(),
            extension: ".stl".to_string(),
            scale: 0.001,
        }
    }
}

impl MeshConfig {
    /// `package://<package>/<dir>/`
    pub fn prefix(&self) -> String {
        format!("package://{}/{}/", self.package_name, self.mesh_dir)
    }

    /// Full resource path for a link's mesh
    pub fn resource(&self, link_name: &str) -> String {
        format!("{}{}{}", self.prefix(), link_name, self.extension)
    }
}

/// Transmission settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransmissionConfig {
    pub hardware_interface: String,
    pub mechanical_reduction: f64,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self {
            hardware_interface: "hardware_interface/PositionJointInterface".to_string(),
            mechanical_reduction: 1.0,
        }
    }
}

/// Bounds written on every `<limit>` element besides lower/upper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitConfig {
    /// Maximum effort (N or Nm)
    pub effort: f64,
    /// Maximum velocity (rad/s or m/s)
    pub velocity: f64,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            effort: 100.0,
            velocity: 100.0,
        }
    }
}

/// Complete export configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExportConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default)]
    pub transmission: TransmissionConfig,
    #[serde(default)]
    pub limits: LimitConfig,
}

impl ExportConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }

    /// Whether this configuration was written in the current format
    pub fn is_current_version(&self) -> bool {
        self.version == Self::CURRENT_VERSION
    }

    /// Defaults with a different mesh package
    pub fn with_package(package_name: impl Into<String>) -> Self {
        let mut config = Self::new();
        config.mesh.package_name = package_name.into();
        config
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load from a RON file, falling back to defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No config file at {:?}, using defaults", path);
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_ron_str(&content)?;
        if !config.is_current_version() {
            tracing::warn!(
                "Config {:?} has version {}, expected {}; missing fields use defaults",
                path,
                config.version,
                Self::CURRENT_VERSION
            );
        }
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save as pretty RON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        std::fs::write(path, self.to_ron_string()?).map_err(|e| ConfigError::Io(e.to_string()))?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_resource() {
        let config = ExportConfig::with_package("arm_description");
        assert_eq!(
            config.mesh.resource("link1"),
            "package://arm_description/meshes/link1.stl"
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ExportConfig::from_ron_str("(version: 1, limits: (effort: 5.0, velocity: 2.0))")
            .unwrap();
        assert_eq!(config.limits.effort, 5.0);
        assert_eq!(config.mesh, MeshConfig::default());
        assert_eq!(config.transmission, TransmissionConfig::default());
    }

    #[test]
    fn test_config_version() {
        assert!(ExportConfig::new().is_current_version());

        let unversioned =
            ExportConfig::from_ron_str("(limits: (effort: 5.0, velocity: 2.0))").unwrap();
        assert_eq!(unversioned.version, 0);
        assert!(!unversioned.is_current_version());
        assert_eq!(unversioned.limits.velocity, 2.0);
    }

    #[test]
    fn test_outdated_file_still_loads() {
        let path = std::env::temp_dir().join(format!("urdf-synth-{}.ron", uuid::Uuid::new_v4()));
        std::fs::write(&path, "(version: 0, limits: (effort: 5.0, velocity: 2.0))").unwrap();
        let config = ExportConfig::load(&path);
        let _ = std::fs::remove_file(&path);

        let config = config.unwrap();
        assert!(!config.is_current_version());
        assert_eq!(config.limits.effort, 5.0);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = ExportConfig::with_package("demo");
        let text = config.to_ron_string().unwrap();
        assert_eq!(ExportConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("urdf-synth-{}.ron", uuid::Uuid::new_v4()));
        assert_eq!(ExportConfig::load(&path).unwrap(), ExportConfig::new());
    }
}
