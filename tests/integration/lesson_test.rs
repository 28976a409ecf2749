//! Integration tests for lecture file loading

use lectern::lesson::{FrameSequence, Lesson, DEFAULT_SLIDE_DURATION_MS, SINGLE_SLIDE_DURATION_MS};

use crate::helpers::{Course, SHORT_LESSON};

#[test]
fn toml_lesson_loads_from_disk() {
    let course = Course::new();
    let path = course.write("lesson1.toml", SHORT_LESSON);

    let lesson = Lesson::load(&path, DEFAULT_SLIDE_DURATION_MS).unwrap();
    assert_eq!(lesson.id, "lesson1");
    assert_eq!(lesson.title, "Intro");
    assert_eq!(lesson.frame_count(), 2);
    assert_eq!(lesson.total_nominal_ms(), 100);
    assert_eq!(lesson.frame_start_ms(1), 50);
}

#[test]
fn json_lesson_with_defaults() {
    let course = Course::new();
    let path = course.write(
        "lesson4.json",
        r#"{"order": 4, "title": "Ranges", "slides": [{"title": "A"}, {"title": "B", "durationMs": 1500}]}"#,
    );

    let lesson = Lesson::load(&path, 8_000).unwrap();
    assert_eq!(lesson.id, "lesson4");
    assert_eq!(lesson.nominal_durations(), vec![8_000, 1_500]);
}

#[test]
fn content_only_lesson_becomes_one_slide() {
    let course = Course::new();
    let path = course.write(
        "lesson5.toml",
        "order = 5\ntitle = \"Summary\"\ncontent = \"Everything at once\"\n",
    );

    let lesson = Lesson::load(&path, DEFAULT_SLIDE_DURATION_MS).unwrap();
    assert_eq!(lesson.frame_count(), 1);
    assert_eq!(lesson.nominal_duration_ms(0), SINGLE_SLIDE_DURATION_MS);
}

#[test]
fn unsupported_extension_is_rejected() {
    let course = Course::new();
    let path = course.write("notes.txt", SHORT_LESSON);
    let err = Lesson::load(&path, DEFAULT_SLIDE_DURATION_MS).unwrap_err();
    assert!(err.to_string().contains("Unsupported"));
}

#[test]
fn missing_file_reports_path() {
    let err = Lesson::load("/nonexistent/lesson9.toml", DEFAULT_SLIDE_DURATION_MS).unwrap_err();
    assert!(err.to_string().contains("lesson9.toml"));
}
