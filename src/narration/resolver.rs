//! Audio file layout for lecture narration.
//!
//! Narration for slide `N` (one-based) of lesson `id` lives at
//! `<root>/<id>/slide<N>.<ext>`, e.g. `audio/lesson3/slide1.mp3`.

use std::path::{Path, PathBuf};

use super::error::NarrationError;

/// Resolves narration files under a root directory.
#[derive(Debug, Clone)]
pub struct AudioResolver {
    root: PathBuf,
    extension: String,
}

impl AudioResolver {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path where narration for a frame is expected, whether or not it exists.
    ///
    /// Returns `None` for lesson ids that could escape the root directory.
    pub fn expected_path(&self, lesson_id: &str, frame_index: usize) -> Option<PathBuf> {
        if !Self::is_safe_id(lesson_id) {
            return None;
        }
        Some(
            self.root
                .join(lesson_id)
                .join(format!("slide{}.{}", frame_index + 1, self.extension)),
        )
    }

    /// Resolve an existing narration file for a frame.
    pub fn resolve(&self, lesson_id: &str, frame_index: usize) -> Result<PathBuf, NarrationError> {
        let missing = || NarrationError::Missing {
            lesson: lesson_id.to_string(),
            frame: frame_index,
        };
        let path = self
            .expected_path(lesson_id, frame_index)
            .ok_or_else(missing)?;
        if path.is_file() {
            Ok(path)
        } else {
            Err(missing())
        }
    }

    /// Count how many of `frame_count` frames have a narration file.
    pub fn coverage(&self, lesson_id: &str, frame_count: usize) -> usize {
        (0..frame_count)
            .filter(|&i| self.resolve(lesson_id, i).is_ok())
            .count()
    }

    /// Ids are single directory names: ASCII letters, digits, `-`, `_`
    /// and `.`, but not only dots.
    fn is_safe_id(lesson_id: &str) -> bool {
        lesson_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && lesson_id.chars().any(|c| c != '.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn resolver_with_files(files: &[&str]) -> (TempDir, AudioResolver) {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"ID3").unwrap();
        }
        let resolver = AudioResolver::new(dir.path(), "mp3");
        (dir, resolver)
    }

    #[test]
    fn resolves_one_based_slide_file() {
        let (_dir, resolver) = resolver_with_files(&["lesson3/slide1.mp3"]);
        let path = resolver.resolve("lesson3", 0).unwrap();
        assert!(path.ends_with("lesson3/slide1.mp3"));
    }

    #[test]
    fn missing_file_is_missing() {
        let (_dir, resolver) = resolver_with_files(&["lesson3/slide1.mp3"]);
        let err = resolver.resolve("lesson3", 1).unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn traversal_ids_are_rejected() {
        let (_dir, resolver) = resolver_with_files(&[]);
        assert!(resolver.expected_path("../etc", 0).is_none());
        assert!(resolver.expected_path("a/b", 0).is_none());
        assert!(resolver.expected_path("http://x", 0).is_none());
        assert!(resolver.expected_path("", 0).is_none());
        assert!(resolver.resolve("..", 0).unwrap_err().is_missing());
    }

    #[test]
    fn dot_ids_do_not_resolve_to_the_root() {
        let (_dir, resolver) = resolver_with_files(&["slide1.mp3", "lesson-2_b.v1/slide1.mp3"]);
        for id in [".", "...", "a\\b", "lesson 1", "c:x"] {
            assert!(resolver.expected_path(id, 0).is_none(), "{:?}", id);
        }
        assert!(resolver.resolve(".", 0).unwrap_err().is_missing());
        assert!(resolver.resolve("lesson-2_b.v1", 0).is_ok());
    }

    #[test]
    fn extension_leading_dot_is_trimmed() {
        let resolver = AudioResolver::new("/audio", ".wav");
        let path = resolver.expected_path("lesson1", 4).unwrap();
        assert_eq!(path, PathBuf::from("/audio/lesson1/slide5.wav"));
    }

    #[test]
    fn coverage_counts_existing_files() {
        let (_dir, resolver) =
            resolver_with_files(&["lesson2/slide1.mp3", "lesson2/slide3.mp3"]);
        assert_eq!(resolver.coverage("lesson2", 3), 2);
        assert_eq!(resolver.coverage("lesson9", 3), 0);
    }
}
