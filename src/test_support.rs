//! Mock `redshift` scripts for tests

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::tool::Tool;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A shell script named `redshift` in its own temp directory. The script body
/// can append to `$MOCK_LOG`, which points at `calls.log` in the same directory.
pub struct MockTool {
    dir: PathBuf,
}

impl MockTool {
    pub fn new(body: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("screen-dimmer-test-{}-{id}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let log = dir.join("calls.log");
        let script = format!("#!/bin/sh\nMOCK_LOG='{}'\n{body}\n", log.display());
        let path = dir.join("redshift");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    /// Script that records its arguments and exits successfully
    pub fn recording() -> Self {
        Self::new("printf '%s\\n' \"$*\" >> \"$MOCK_LOG\"")
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join("redshift")
    }

    pub fn tool(&self) -> Tool {
        Tool::new(self.path(), "randr")
    }

    /// Lines appended to the call log so far
    pub fn calls(&self) -> Vec<String> {
        read_lines(&self.dir.join("calls.log"))
    }
}

impl Drop for MockTool {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
