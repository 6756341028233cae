use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use tracing::info;

pub fn run<S: DataStore>(store: &mut S, fix: bool) -> Result<CmdResult> {
    info!(fix, "doctor");
    let report = store.doctor(fix)?;
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result.with_doctor(report));
    }

    result.add_message(CmdMessage::warning("Inconsistencies found:"));
    if !report.orphan_dirs.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "  - {} asset director{} without a student: {}",
            report.orphan_dirs.len(),
            if report.orphan_dirs.len() == 1 { "y" } else { "ies" },
            report.orphan_dirs.join(", ")
        )));
    }
    if !report.removed_dirs.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "  - Removed {} orphan director{}.",
            report.removed_dirs.len(),
            if report.removed_dirs.len() == 1 { "y" } else { "ies" }
        )));
    }
    let kept = report.orphan_dirs.len() - report.removed_dirs.len();
    if fix && kept > 0 {
        result.add_message(CmdMessage::warning(format!(
            "  - Left {} director{} with unmanaged files in place.",
            kept,
            if kept == 1 { "y" } else { "ies" }
        )));
    }
    if !report.dangling_photos.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "  - {} student(s) reference a missing photo: {}",
            report.dangling_photos.len(),
            report.dangling_photos.join(", ")
        )));
    }
    if report.cleared_photos > 0 {
        result.add_message(CmdMessage::success(format!(
            "  - Cleared {} missing photo reference(s).",
            report.cleared_photos
        )));
    }
    if !report.misplaced_photos.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "  - {} student(s) have a photo outside their own directory: {}",
            report.misplaced_photos.len(),
            report.misplaced_photos.join(", ")
        )));
    }
    if !fix && (!report.orphan_dirs.is_empty() || !report.dangling_photos.is_empty()) {
        result.add_message(CmdMessage::info("Run with --fix to repair."));
    }

    Ok(result.with_doctor(report))
}
