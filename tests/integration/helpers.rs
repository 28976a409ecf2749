//! Shared fixtures for integration tests

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Two short slides, 50 ms each.
pub const SHORT_LESSON: &str = r#"
order = 1
id = "lesson1"
title = "Intro"

[[slides]]
title = "Hello"
content = "First slide"
duration_ms = 50

[[slides]]
title = "World"
content = "Second slide"
duration_ms = 50
"#;

/// A course directory with its own config and data directories.
pub struct Course {
    pub dir: TempDir,
}

impl Course {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write `content` to `name` inside the course, creating parents.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn progress_path(&self) -> PathBuf {
        self.data_dir().join("progress.json")
    }

    /// Run the lectern binary against this course's config and data.
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_lectern"))
            .args(args)
            .current_dir(self.dir.path())
            .env("LECTERN_CONFIG", self.config_path())
            .env("LECTERN_DATA_DIR", self.data_dir())
            .env_remove("LECTERN_LOG")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute lectern");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        (stdout, stderr, exit_code)
    }
}

/// Remove ANSI color sequences from output.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
