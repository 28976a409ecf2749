//! Integration tests for the lectern CLI

use assert_cmd::Command;
use predicates::prelude::*;

use crate::helpers::{strip_ansi, Course, SHORT_LESSON};

// ============================================================================
// Help and argument errors
// ============================================================================

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("lectern")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("narrated slide lectures"));
}

#[test]
fn play_without_lesson_is_usage_error() {
    Command::cargo_bin("lectern")
        .unwrap()
        .arg("play")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<LESSON>"));
}

#[test]
fn play_missing_file_fails_with_path() {
    let course = Course::new();
    let (_stdout, stderr, code) = course.run(&["play", "--headless", "missing.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("missing.toml"), "stderr: {}", stderr);
}

#[test]
fn completions_generate_for_bash() {
    Command::cargo_bin("lectern")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lectern"));
}

#[test]
fn config_path_honours_env() {
    let course = Course::new();
    let (stdout, _stderr, code) = course.run(&["config", "path"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), course.config_path().display().to_string());
}

// ============================================================================
// info / check
// ============================================================================

#[test]
fn info_shows_slides_and_progress() {
    let course = Course::new();
    course.write("lesson1.toml", SHORT_LESSON);
    course.write("audio/lesson1/slide2.mp3", "id3");

    let (stdout, stderr, code) = course.run(&["info", "lesson1.toml"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let stdout = strip_ansi(&stdout);
    assert!(stdout.contains("Lecture 1: Intro [lesson1]"));
    assert!(stdout.contains("Hello"));
    assert!(stdout.contains("World"));
    assert!(stdout.contains("narration for 1/2"));
    assert!(stdout.contains("Not completed yet"));
}

#[test]
fn check_reports_every_file() {
    let course = Course::new();
    course.write("lesson1.toml", SHORT_LESSON);
    course.write(
        "lesson2.json",
        r#"{"order": 2, "title": "Cells", "slides": [{"title": "Rows"}]}"#,
    );

    let (stdout, stderr, code) = course.run(&["check", "."]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let stdout = strip_ansi(&stdout);
    assert!(stdout.contains("1. Intro (lesson1.toml)"));
    assert!(stdout.contains("2. Cells (lesson2.json)"));
    assert!(stdout.contains("2 file(s), 0 failed"));
}

#[test]
fn check_fails_on_broken_lecture() {
    let course = Course::new();
    course.write("lesson1.toml", SHORT_LESSON);
    course.write("lesson3.toml", "order = 3\ntitle = \"Empty\"\n");

    let (stdout, _stderr, code) = course.run(&["check", "."]);
    assert_eq!(code, 1);
    let stdout = strip_ansi(&stdout);
    assert!(stdout.contains("✗ lesson3.toml: Lecture has no slides and no content"));
    assert!(stdout.contains("2 file(s), 1 failed"));
}

// ============================================================================
// Headless playback
// ============================================================================

#[test]
fn headless_play_completes_and_records_progress() {
    let course = Course::new();
    course.write("lesson1.toml", SHORT_LESSON);

    let (stdout, stderr, code) = course.run(&[
        "play",
        "lesson1.toml",
        "--headless",
        "--no-narration",
        "--tick-ms",
        "10",
    ]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout,
        "▶ Lecture 1: Intro (2 slides, 00:00)\n\
         [1/2] Hello (timed)\n\
         [2/2] World (timed)\n\
         ✓ Lesson complete: Intro\n"
    );

    let progress = std::fs::read_to_string(course.progress_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&progress).unwrap();
    assert_eq!(json["lessons"]["lesson1"]["times_completed"], 1);
    assert_eq!(json["lessons"]["lesson1"]["slide_count"], 2);
}

#[test]
fn no_record_leaves_progress_untouched() {
    let course = Course::new();
    course.write("lesson1.toml", SHORT_LESSON);

    let (_stdout, stderr, code) = course.run(&[
        "play",
        "lesson1.toml",
        "--headless",
        "--no-narration",
        "--tick-ms",
        "10",
        "--no-record",
    ]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(!course.progress_path().exists());
}

#[test]
fn start_slide_skips_earlier_slides() {
    let course = Course::new();
    course.write("lesson1.toml", SHORT_LESSON);

    let (stdout, _stderr, code) = course.run(&[
        "play",
        "lesson1.toml",
        "--headless",
        "--no-narration",
        "--tick-ms",
        "10",
        "--start-slide",
        "2",
    ]);
    assert_eq!(code, 0);
    assert!(!stdout.contains("[1/2]"));
    assert!(stdout.contains("[2/2] World (timed)"));
}

#[test]
fn stalls_without_narration_or_timer() {
    let course = Course::new();
    course.write("lesson1.toml", SHORT_LESSON);
    course.write("config/config.toml", "[playback]\nfallback_timer = false\n");

    let (stdout, stderr, code) =
        course.run(&["play", "lesson1.toml", "--headless", "--no-narration"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("⚠ Slide 1 cannot advance"));
    assert!(strip_ansi(&stderr).contains("Stopped at slide 1"));
    assert!(!course.progress_path().exists());
}

#[cfg(unix)]
#[test]
fn narration_player_drives_slides() {
    let Some(player) = ["/bin/true", "/usr/bin/true"]
        .into_iter()
        .find(|p| std::path::Path::new(p).is_file())
    else {
        return;
    };

    let course = Course::new();
    course.write("lesson1.toml", SHORT_LESSON);
    course.write("audio/lesson1/slide1.mp3", "id3");
    course.write("audio/lesson1/slide2.mp3", "id3");
    course.write(
        "config/config.toml",
        &format!(
            "[narration]\nplayer = [\"{}\"]\nprobe = false\npoll_interval_ms = 5\n",
            player
        ),
    );

    let (stdout, stderr, code) = course.run(&["play", "lesson1.toml", "--headless"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("[1/2] Hello (narrated)"), "stdout: {}", stdout);
    assert!(stdout.contains("[2/2] World (narrated)"), "stdout: {}", stdout);
    assert!(stdout.contains("✓ Lesson complete: Intro"));
}
