// Test file fixtures

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A script file in its own temporary directory
pub struct TestFixture {
    temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestFixture {
    /// Create a new temporary script with given content
    pub fn new(filename: &str, content: &str) -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join(filename);

        let mut file = fs::File::create(&path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        Ok(TestFixture { temp_dir, path })
    }

    /// Create an empty temporary script
    pub fn empty(filename: &str) -> std::io::Result<Self> {
        Self::new(filename, "")
    }

    /// Read the current content of the script
    pub fn read_content(&self) -> std::io::Result<String> {
        fs::read_to_string(&self.path)
    }

    /// Directory holding the script; downloads land here in tests
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_new() {
        let fixture = TestFixture::new("scene.py", "scene.render()").unwrap();
        assert_eq!(fixture.read_content().unwrap(), "scene.render()");
        assert!(fixture.path.starts_with(fixture.dir()));
    }

    #[test]
    fn test_fixture_empty() {
        let fixture = TestFixture::empty("empty.py").unwrap();
        assert_eq!(fixture.read_content().unwrap(), "");
    }
}
