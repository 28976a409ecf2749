//! Check command handler

use std::path::{Path, PathBuf};

use anyhow::Result;

use lectern::check::{check_directory, format_size, FileReport};
use lectern::narration::AudioResolver;
use lectern::player::render::format_duration;
use lectern::theme::{current_theme, Theme};
use lectern::Config;

/// Returns `false` when any file failed to parse.
#[cfg(not(tarpaulin_include))]
pub fn handle(dir: &Path, audio_dir: Option<&PathBuf>) -> Result<bool> {
    let config = Config::load()?;
    let root = audio_dir.cloned().unwrap_or_else(|| dir.join("audio"));
    let resolver = AudioResolver::new(root, config.narration.extension.as_str());
    let reports = check_directory(dir, &resolver, config.playback.default_slide_duration_ms)?;
    let theme = current_theme();

    if reports.is_empty() {
        println!(
            "{}",
            theme.secondary_text(&format!("No lecture files in {}", dir.display()))
        );
        return Ok(true);
    }

    for line in report_lines(&reports, &theme) {
        println!("{}", line);
    }
    Ok(reports.iter().all(|r| r.outcome.is_ok()))
}

/// One line per report plus a totals line.
pub fn report_lines(reports: &[FileReport], theme: &Theme) -> Vec<String> {
    let mut lines = Vec::with_capacity(reports.len() + 1);
    let mut failed = 0;

    for report in reports {
        let name = report
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match &report.outcome {
            Ok(summary) => {
                let mark = if summary.is_fully_narrated() {
                    theme.success_text("✓")
                } else {
                    theme.accent_text("~")
                };
                lines.push(format!(
                    "{} {:>3}. {} ({}): {} slides, {}, narration {}/{} ({})",
                    mark,
                    summary.order,
                    summary.title,
                    name,
                    summary.slides,
                    format_duration(summary.total_ms as f64 / 1000.0),
                    summary.narrated,
                    summary.slides,
                    format_size(summary.audio_bytes),
                ));
            }
            Err(message) => {
                failed += 1;
                lines.push(theme.error_text(&format!("✗ {}: {}", name, message)));
            }
        }
    }

    let total = format!("{} file(s), {} failed", reports.len(), failed);
    lines.push(if failed == 0 {
        theme.success_text(&total)
    } else {
        theme.error_text(&total)
    });
    lines
}
