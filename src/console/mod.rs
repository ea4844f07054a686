//! Operator-facing output on stdout.

use std::path::Path;

use colored::{Color, Colorize};
use supports_color::Stream;

use crate::application::data::Mode;
use crate::changes::ChangeKind;
use crate::filesystem::RelativePath;

const HEADER_COLOR: Color = Color::BrightYellow;

/// Enables colors only when stdout can display them.
pub fn setup_colors() {
    colored::control::set_override(supports_color::on(Stream::Stdout).is_some());
}

pub fn print_run_header(mode: Mode, source: &Path, destination: &Path) {
    println!(
        "Replicate data{}",
        format!(" => {mode}").color(HEADER_COLOR)
    );
    println!(
        "{} »{}«",
        "=> from source directory".color(HEADER_COLOR),
        source.display()
    );
    println!(
        "{} »{}«",
        "=> to   target directory".color(HEADER_COLOR),
        destination.display()
    );
}

pub fn print_ignored_empty_directory(dir: &RelativePath) {
    println!(
        "{} »{}«",
        "=> Ignoring empty source directory :".color(HEADER_COLOR),
        dir
    );
}

/// One line of the logging backend, e.g. `ADD   : docs/index.html`.
pub fn change_record(kind: ChangeKind, path: &RelativePath) -> String {
    format!("{}{}", change_label(kind).color(change_color(kind)), path)
}

fn change_label(kind: ChangeKind) -> String {
    format!("{:<5} : ", kind.to_string())
}

fn change_color(kind: ChangeKind) -> Color {
    match kind {
        ChangeKind::CreateDir => Color::BrightCyan,
        ChangeKind::AddFile => Color::BrightGreen,
        ChangeKind::ModifyFile => Color::BrightBlue,
        ChangeKind::RemoveFile => Color::BrightRed,
        ChangeKind::RemoveDir => Color::BrightMagenta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ChangeKind::CreateDir, "MKDIR : ")]
    #[case(ChangeKind::AddFile, "ADD   : ")]
    #[case(ChangeKind::ModifyFile, "MOD   : ")]
    #[case(ChangeKind::RemoveFile, "DEL   : ")]
    #[case(ChangeKind::RemoveDir, "RMDIR : ")]
    fn change_labels_are_aligned(#[case] kind: ChangeKind, #[case] expected: &str) {
        assert_eq!(change_label(kind), expected);
    }

    #[test]
    fn change_record_ends_with_path() {
        let record = change_record(ChangeKind::AddFile, &RelativePath::from("a/b/testfile"));
        assert!(record.ends_with("a/b/testfile"));
        assert!(record.contains("ADD"));
    }
}
