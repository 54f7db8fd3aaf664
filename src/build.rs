//! `mdsite build`: copy static assets and render every Markdown page.
//!
//! With `--watch` the build reruns whenever the content tree, the static tree
//! or the template changes.

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::assets;
use crate::config::SiteConfig;
use crate::generate;

/// Options passed from CLI to the build pipeline.
pub struct BuildOpts {
    pub verbose: bool,
    pub quiet: bool,
}

/// Aggregate report from one build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: usize,
    pub assets_copied: usize,
    pub assets_unchanged: usize,
    pub warnings: Vec<String>,
}

impl BuildReport {
    pub fn print_summary(&self, config: &SiteConfig) {
        let mut parts = vec![format!("{} page(s)", self.pages)];
        if self.assets_copied > 0 {
            parts.push(format!("{} asset(s) copied", self.assets_copied));
        }
        if self.assets_unchanged > 0 {
            parts.push(format!("{} unchanged", self.assets_unchanged));
        }

        println!(
            "{} {} ({})",
            "Built".green().bold(),
            config.output_dir.display(),
            parts.join(", ")
        );

        for w in &self.warnings {
            println!("{} {}", "WARNING:".yellow(), w);
        }
    }
}

/// Run one full build.
pub fn handle_build(config: &SiteConfig, opts: &BuildOpts) -> Result<BuildReport> {
    let template = std::fs::read_to_string(&config.template_path)
        .with_context(|| format!("Failed to read template {}", config.template_path.display()))?;

    let mut report = BuildReport::default();

    if !opts.quiet {
        println!(
            "{} {} -> {}",
            "Building".cyan().bold(),
            config.content_dir.display(),
            config.output_dir.display()
        );
    }

    assets::copy_static(
        &config.static_dir,
        &config.output_dir,
        config.clean_output,
        opts,
        &mut report,
    )?;

    generate::generate_pages_recursive(
        &config.content_dir,
        &template,
        &config.output_dir,
        &config.convert_options(),
        opts,
        &mut report,
    )?;

    Ok(report)
}

/// Watch the sources for changes and rebuild on each save.
///
/// Debounces rapid events (editors that write in stages) with a 200ms window.
/// Build errors are printed and the watch continues. Ctrl+C exits.
pub fn watch_and_rebuild(config: &SiteConfig, opts: &BuildOpts) -> Result<()> {
    let roots = watch_roots(config)?;

    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        config.content_dir.display()
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for (path, mode) in &roots {
        watcher
            .watch(path, *mode)
            .with_context(|| format!("Cannot watch {}", path.display()))?;
        log::info!("watching {}", path.display());
    }

    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                let relevant_kind = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                let affects_sources = event
                    .paths
                    .iter()
                    .any(|p| roots.iter().any(|(root, _)| p.starts_with(root)));

                if relevant_kind && affects_sources && last_rebuild.elapsed() > debounce {
                    // Small delay to let the editor finish writing
                    std::thread::sleep(Duration::from_millis(50));
                    log::debug!("rebuilding after {:?}", event.paths);

                    match handle_build(config, opts) {
                        Ok(report) => {
                            if !opts.quiet {
                                report.print_summary(config);
                            }
                        }
                        Err(e) => {
                            eprintln!("{} {:#}", "Build error:".red().bold(), e);
                        }
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // Keep looping
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// Canonical paths to watch: the content and static trees recursively, the
/// template file on its own. A missing static tree is simply not watched.
fn watch_roots(config: &SiteConfig) -> Result<Vec<(PathBuf, RecursiveMode)>> {
    let mut roots = vec![(canonical(&config.content_dir)?, RecursiveMode::Recursive)];
    if config.static_dir.exists() {
        roots.push((canonical(&config.static_dir)?, RecursiveMode::Recursive));
    }
    roots.push((canonical(&config.template_path)?, RecursiveMode::NonRecursive));
    Ok(roots)
}

fn canonical(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path)
        .with_context(|| format!("Cannot resolve path '{}'", path.display()))
}
