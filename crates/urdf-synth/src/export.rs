//! Writing a synthesized document to disk
//!
//! The three sections are staged as separate files in a fresh directory
//! `<save_dir>/.urdf-synth-<uuid>/`, merged there, and the merged file is
//! renamed to `<save_dir>/<robot>.urdf`. The staging directory belongs to the
//! run and is removed on every path, so a failed export never leaves a partial
//! document behind and never touches files it did not create.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::ExportConfig;
use crate::document::{UrdfDocument, synthesize};
use crate::error::{SynthError, SynthResult};
use crate::snapshot::AssemblySource;

/// Prefix of the per-run staging directory inside the save directory
pub const STAGING_PREFIX: &str = ".urdf-synth-";

fn io_err(context: &str, path: &Path, e: std::io::Error) -> SynthError {
    SynthError::Io(format!("{} {}: {}", context, path.display(), e))
}

/// Staging directory created by this run, removed when dropped
struct Staging {
    dir: PathBuf,
}

impl Staging {
    /// Create a new, previously nonexistent directory under `save_dir`
    fn create(save_dir: &Path) -> SynthResult<Self> {
        let dir = save_dir.join(format!("{}{}", STAGING_PREFIX, Uuid::new_v4()));
        fs::create_dir(&dir)
            .map_err(|e| io_err("Failed to create staging directory", &dir, e))?;
        Ok(Self { dir })
    }

    fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.dir) {
            tracing::warn!("Failed to remove staging directory {:?}: {}", self.dir, e);
        }
    }
}

/// Path of the final document for a robot
pub fn document_path(save_dir: &Path, robot_name: &str) -> PathBuf {
    save_dir.join(format!("{}.urdf", robot_name))
}

/// Stage, merge and commit a document. Returns the written path.
pub fn write_document(document: &UrdfDocument, save_dir: &Path) -> SynthResult<PathBuf> {
    fs::create_dir_all(save_dir)
        .map_err(|e| io_err("Failed to create save directory", save_dir, e))?;
    let staging = Staging::create(save_dir)?;

    let mut staged = Vec::new();
    for (extension, content) in document.sections() {
        let path = staging.path(&format!("{}.{}", document.robot_name, extension));
        fs::write(&path, content).map_err(|e| io_err("Failed to stage", &path, e))?;
        tracing::debug!("Staged {:?}", path);
        staged.push(path);
    }

    let mut merged = String::new();
    for path in &staged {
        let content =
            fs::read_to_string(path).map_err(|e| io_err("Failed to read staged", path, e))?;
        merged.push_str(&content);
    }

    let target = document_path(save_dir, &document.robot_name);
    let temp = staging.path(&format!("{}.urdf", document.robot_name));
    fs::write(&temp, merged).map_err(|e| io_err("Failed to write", &temp, e))?;
    fs::rename(&temp, &target).map_err(|e| io_err("Failed to commit", &target, e))?;

    tracing::info!("Wrote {:?}", target);
    Ok(target)
}

/// Capture a snapshot, synthesize it and write the document into `save_dir`
pub fn export(
    source: &dyn AssemblySource,
    config: &ExportConfig,
    save_dir: impl AsRef<Path>,
) -> SynthResult<PathBuf> {
    let snapshot = source.capture()?;
    let document = synthesize(&snapshot, config)?;
    write_document(&document, save_dir.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{AssemblySnapshot, BodySnapshot, JointSnapshot, ROOT_LINK};
    use crate::types::{JointType, Rgba};
    use glam::DVec3;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("urdf-synth-{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn snapshot() -> AssemblySnapshot {
        AssemblySnapshot::new("arm")
            .with_body(BodySnapshot::new(ROOT_LINK, 1.0, DVec3::ZERO).material("Steel - Satin", Rgba::GREY))
            .with_body(BodySnapshot::new("link1", 0.5, DVec3::new(0.1, 0.0, 0.2)))
            .with_joint(
                JointSnapshot::new(
                    "joint1",
                    JointType::Revolute,
                    ROOT_LINK,
                    "link1",
                    DVec3::new(0.0, 0.0, 0.2),
                )
                .limits(-1.0, 1.0),
            )
    }

    #[test]
    fn test_export_writes_single_document() {
        let dir = TempDir::new();
        let path = export(&snapshot(), &ExportConfig::new(), &dir.0).unwrap();

        assert_eq!(path, dir.0.join("arm.urdf"));
        let content = fs::read_to_string(&path).unwrap();
        let expected = synthesize(&snapshot(), &ExportConfig::new()).unwrap().render();
        assert_eq!(content, expected);
        assert!(urdf_rs::read_from_string(&content).is_ok());

        let entries: Vec<_> = fs::read_dir(&dir.0).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_synthesis_leaves_nothing() {
        let dir = TempDir::new();
        let broken = snapshot().with_joint(JointSnapshot::new(
            "joint2",
            JointType::Fixed,
            "link1",
            "ghost",
            DVec3::ZERO,
        ));
        let result = export(&broken, &ExportConfig::new(), &dir.0);

        assert!(matches!(result, Err(SynthError::StructuralInconsistency { .. })));
        assert!(!document_path(&dir.0, "arm").exists());
        assert_eq!(fs::read_dir(&dir.0).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_commit_cleans_staging() {
        let dir = TempDir::new();
        // a directory in the way of the final document makes the rename fail
        let blocker = document_path(&dir.0, "arm");
        fs::create_dir_all(blocker.join("occupied")).unwrap();

        let result = export(&snapshot(), &ExportConfig::new(), &dir.0);

        assert!(matches!(result, Err(SynthError::Io(_))));
        assert!(blocker.is_dir());
        let entries: Vec<_> = fs::read_dir(&dir.0)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, [std::ffi::OsString::from("arm.urdf")]);
    }

    #[test]
    fn test_existing_package_files_survive_export() {
        let dir = TempDir::new();
        let urdf_dir = dir.0.join("urdf");
        fs::create_dir_all(&urdf_dir).unwrap();
        for extension in ["xacro", "material", "tran"] {
            fs::write(urdf_dir.join(format!("arm.{}", extension)), "hand written").unwrap();
        }

        export(&snapshot(), &ExportConfig::new(), &dir.0).unwrap();

        for extension in ["xacro", "material", "tran"] {
            let path = urdf_dir.join(format!("arm.{}", extension));
            assert_eq!(fs::read_to_string(path).unwrap(), "hand written");
        }
        assert!(document_path(&dir.0, "arm").is_file());
        let leftovers = fs::read_dir(&dir.0)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(STAGING_PREFIX))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_export_overwrites_previous_document() {
        let dir = TempDir::new();
        fs::write(document_path(&dir.0, "arm"), "stale").unwrap();
        let path = export(&snapshot(), &ExportConfig::new(), &dir.0).unwrap();
        assert_ne!(fs::read_to_string(path).unwrap(), "stale");
    }
}
