//! `inspect` command.

use std::path::Path;

use anyhow::{Context, Result};
use course_mesh::{ImportParams, MeshSummary, import_obj};
use serde::Serialize;

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    params: &'a ImportParams,
    meshes: Vec<MeshSummary>,
}

pub fn run(path: &Path, params: &ImportParams, json: bool) -> Result<()> {
    let imported =
        import_obj(path, params).with_context(|| format!("Failed to import {}", path.display()))?;
    let meshes: Vec<MeshSummary> = imported.iter().map(|m| m.summary()).collect();

    if json {
        let report = FileReport {
            path,
            params,
            meshes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({} meshes)", path.display(), meshes.len());
    for summary in &meshes {
        println!("  {summary}");
        if let Some(bounds) = summary.bounds {
            let size = bounds.size();
            println!(
                "    size {:.3} x {:.3} x {:.3}, {} weighted vertices",
                size.x, size.y, size.z, summary.blend.weighted_vertex_count
            );
        }
    }
    Ok(())
}
