//! Git history lookups through the `git` CLI.

use super::date::PostDate;
use super::exec::Cmd;
use std::path::Path;

/// Date of the last commit touching `file`, as `YYYY-MM-DD`.
///
/// `None` when git is not installed, the file is outside a repository,
/// or it has no history yet.
pub fn last_edited(file: &Path) -> Option<String> {
    let dir = file.parent()?;
    let name = file.file_name()?;

    let date = Cmd::new("git")
        .args(["log", "-1", "--format=%cs", "--"])
        .arg(name)
        .cwd(dir)
        .stdout_string()
        .ok()?;

    // %cs is YYYY-MM-DD; anything else means git printed something unexpected
    PostDate::parse_iso(&date).map(|d| d.ymd())
}
