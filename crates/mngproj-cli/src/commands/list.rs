//! Listing and inspection commands: ls, lsproj, query and info

use colored::Colorize;
use mngproj_fs::{ProjectPath, TreeFilter, find_projects};
use mngproj_meta::ProjectConfig;

use crate::context::Context;
use crate::error::Result;

/// Columns padded to their widest cell, separated by three spaces
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        let last = cells.len().saturating_sub(1);
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            line.push_str(cell);
            if i < last {
                let pad = widths[i] - cell.chars().count() + 3;
                line.push_str(&" ".repeat(pad));
            }
        }
        line.push('\n');
        line
    };

    let mut out = format_row(headers.to_vec());
    for row in rows {
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
    }
    out
}

/// Run the ls command
pub fn run_ls(ctx: &Context) -> Result<()> {
    let project = ctx.project()?;
    let rows: Vec<Vec<String>> = project
        .config()
        .components
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.declared_types().join(","),
                c.path.clone(),
            ]
        })
        .collect();
    print!("{}", format_table(&["Name", "Type", "Path"], &rows));
    Ok(())
}

/// Run the lsproj command
///
/// Projects that fail to load are reported on stderr and skipped.
pub fn run_lsproj(ctx: &Context) -> Result<()> {
    let roots = find_projects(&ctx.cwd, &TreeFilter::default());
    if roots.is_empty() {
        println!("No mngproj projects found in {:?}", ctx.cwd.display().to_string());
        return Ok(());
    }

    let mut rows = Vec::new();
    for root in roots {
        match ProjectConfig::load(&root.join(ProjectPath::Manifest)) {
            Ok(config) => rows.push(vec![
                ctx.relative(&root).display().to_string(),
                config.project.name,
            ]),
            Err(e) => eprintln!(
                "{} loading config for {:?}: {}",
                "error".red(),
                root.display().to_string(),
                e
            ),
        }
    }
    print!("{}", format_table(&["Project Path", "Project Name"], &rows));
    Ok(())
}

/// Run the query command: components as pretty JSON
pub fn run_query(ctx: &Context) -> Result<()> {
    let project = ctx.project()?;
    println!("{}", serde_json::to_string_pretty(&project.config().components)?);
    Ok(())
}

/// Run the info command
pub fn run_info(ctx: &Context) -> Result<()> {
    let project = ctx.project()?;
    println!("{} {}", "Project:".bold(), project.name());
    println!("{} {}", "Root:".bold(), project.root().display());
    println!("{} {}", "Presets:".bold(), ctx.presets_dir.display());
    println!(
        "{} {}",
        "Components:".bold(),
        project.config().components.len()
    );
    Ok(())
}
