//! `course` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use course_mesh::{
    ImportGroup, ImportParams, MeshSummary, SurfaceKind, import_course, scan_course_folder,
};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct GroupReport {
    prefix: String,
    surface: SurfaceKind,
    files: Vec<FileEntry>,
}

#[derive(Serialize)]
struct FileEntry {
    path: PathBuf,
    meshes: Vec<MeshSummary>,
}

/// List groups without importing.
pub fn scan(dir: &Path, json: bool) -> Result<()> {
    let groups = scan_course_folder(dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }
    print_groups(&groups);
    Ok(())
}

fn print_groups(groups: &[ImportGroup]) {
    for group in groups {
        println!("{} [{}] {} files", group.prefix, group.surface, group.paths.len());
        for path in &group.paths {
            println!("  {}", path.display());
        }
    }
}

/// Import every group in `dir`.
pub fn run(dir: &Path, params: &ImportParams, json: bool) -> Result<()> {
    let groups = import_course(dir, params)
        .with_context(|| format!("Failed to import course {}", dir.display()))?;

    let reports: Vec<GroupReport> = groups
        .into_iter()
        .map(|group| GroupReport {
            prefix: group.prefix,
            surface: group.surface,
            files: group
                .files
                .into_iter()
                .map(|file| FileEntry {
                    meshes: file.meshes.iter().map(|m| m.summary()).collect(),
                    path: file.path,
                })
                .collect(),
        })
        .collect();

    let total: usize = reports
        .iter()
        .flat_map(|g| &g.files)
        .map(|f| f.meshes.len())
        .sum();
    info!(groups = reports.len(), meshes = total, "Course imported");

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for group in &reports {
        println!("{} [{}]", group.prefix, group.surface);
        for file in &group.files {
            println!("  {}", file.path.display());
            for summary in &file.meshes {
                println!("    {summary}");
            }
        }
    }
    Ok(())
}
