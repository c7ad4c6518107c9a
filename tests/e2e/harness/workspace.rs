use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use stfu_core::{RunConfig, CONFIG_FILE_NAME};
use tempfile::TempDir;

/// Isolated directory holding an `stfu.toml` for a scenario
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Create an empty workspace
    pub fn empty() -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp directory")?;
        Ok(Self { dir })
    }

    /// Create workspace with the given config file contents
    pub fn with_config_toml(content: &str) -> Result<Self> {
        let workspace = Self::empty()?;
        workspace.write_file(CONFIG_FILE_NAME, content.as_bytes())?;
        Ok(workspace)
    }

    /// Load workspace from fixtures directory
    pub fn from_fixture(name: &str) -> Result<Self> {
        let workspace = Self::empty()?;
        let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name);

        if !fixture_path.exists() {
            anyhow::bail!("Fixture not found: {}", fixture_path.display());
        }

        copy_dir_recursive(&fixture_path, workspace.path())?;

        Ok(workspace)
    }

    /// Get workspace path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Load the run configuration from this workspace
    pub fn load_config(&self) -> Result<RunConfig> {
        Ok(RunConfig::load(self.path())?)
    }

    /// Write file to workspace
    pub fn write_file(&self, path: &str, content: &[u8]) -> Result<()> {
        let full_path = self.path().join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directories for {}", path))?;
        }

        fs::write(&full_path, content)
            .with_context(|| format!("Failed to write file: {}", path))?;

        Ok(())
    }

    /// Check if file exists
    pub fn file_exists(&self, path: &str) -> bool {
        self.path().join(path).exists()
    }
}

/// Recursively copy directory contents
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
