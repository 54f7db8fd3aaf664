//! Page generation: Markdown files in, templated HTML pages out.

use anyhow::{Context, Result};
use colored::Colorize;
use md_html::ConvertOptions;
use std::fs;
use std::path::Path;

use crate::assets::list_files_recursive;
use crate::build::{BuildOpts, BuildReport};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Text of the first level-1 heading (`# Title`).
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or_else(|| anyhow::anyhow!("No level-1 heading ('# Title') found"))
}

/// Substitute the title and rendered content into a page template.
pub fn render_page(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Convert one Markdown file and write it through the template.
pub fn generate_page(
    from: &Path,
    template: &str,
    dest: &Path,
    options: &ConvertOptions,
) -> Result<()> {
    let markdown = fs::read_to_string(from)
        .with_context(|| format!("Failed to read {}", from.display()))?;

    let root = md_html::build_with(&markdown, options)
        .with_context(|| format!("Failed to convert {}", from.display()))?;
    let title = extract_title(&markdown).with_context(|| format!("In {}", from.display()))?;

    let page = render_page(template, &title, &root.render());

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(dest, page).with_context(|| format!("Failed to write {}", dest.display()))?;

    log::info!("generated {} from {}", dest.display(), from.display());
    Ok(())
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory layout under `dest_dir` with `.html` extensions.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
    options: &ConvertOptions,
    opts: &BuildOpts,
    report: &mut BuildReport,
) -> Result<()> {
    if !content_dir.is_dir() {
        anyhow::bail!("Content directory {} not found", content_dir.display());
    }

    for rel_path in list_files_recursive(content_dir)? {
        if rel_path.extension().and_then(|ext| ext.to_str()) != Some("md") {
            log::debug!("skipping non-markdown file {}", rel_path.display());
            continue;
        }

        let dest = dest_dir.join(&rel_path).with_extension("html");
        generate_page(&content_dir.join(&rel_path), template, &dest, options)?;
        report.pages += 1;

        if !opts.quiet {
            println!(
                "  {} {} -> {}",
                "page".dimmed(),
                rel_path.display(),
                dest.display()
            );
        }
    }

    Ok(())
}
