use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod assets;
mod build;
mod config;
mod generate;

#[derive(Parser)]
#[command(name = "mdsite", version, about = "Build a static site from Markdown pages")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Show per-file detail and debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy static assets and render every page of the content tree
    Build {
        /// Path to the config file (default: ./mdsite.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the Markdown pages
        #[arg(long)]
        content: Option<PathBuf>,

        /// Directory of static assets mirrored into the output
        #[arg(long = "static")]
        static_dir: Option<PathBuf>,

        /// Page template with {{ Title }} and {{ Content }} placeholders
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Rebuild whenever a source file changes
        #[arg(long)]
        watch: bool,
    },

    /// Print the HTML fragment for one Markdown file
    Render {
        /// Path to the .md file
        file: String,

        /// Keep code block contents literal
        #[arg(long)]
        opaque_code: bool,

        /// Emit a fence info string as a language-* class
        #[arg(long)]
        language_class: bool,
    },

    /// Check Markdown file(s) for structural errors
    Check {
        /// Path to the .md file(s)
        files: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Build {
            config: config_path,
            content,
            static_dir,
            template,
            out,
            watch,
        } => {
            let site = config::load_config(config_path.as_deref())?.apply(config::Overrides {
                content_dir: content,
                static_dir,
                template_path: template,
                output_dir: out,
            });
            let opts = build::BuildOpts {
                verbose: cli.verbose,
                quiet: cli.quiet,
            };

            let report = build::handle_build(&site, &opts)?;
            if !cli.quiet {
                report.print_summary(&site);
            }
            if watch {
                build::watch_and_rebuild(&site, &opts)?;
            }
        }
        Commands::Render {
            file,
            opaque_code,
            language_class,
        } => {
            let options = md_html::ConvertOptions {
                opaque_code,
                language_class,
            };
            handle_render(&file, &options)?;
        }
        Commands::Check { files } => {
            handle_check(&files, cli.verbose)?;
        }
    }

    Ok(())
}

fn handle_render(file: &str, options: &md_html::ConvertOptions) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", file, e))?;

    let root = md_html::build_with(&content, options)
        .map_err(|e| anyhow::anyhow!("{}: {}", file, e))?;

    println!("{}", root.render());
    Ok(())
}

fn handle_check(files: &[String], verbose: bool) -> Result<()> {
    let mut has_errors = false;

    for file in files {
        let content = std::fs::read_to_string(file)
            .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", file, e))?;
        let content = content.replace("\r\n", "\n");

        match md_html::parse_blocks(&content) {
            Ok(blocks) => {
                println!("{}: {} ({} blocks)", file, "OK".green(), blocks.len());
                if verbose {
                    for block in &blocks {
                        println!("  {}:{} {}", file, block.line, block.kind.to_string().dimmed());
                    }
                }
            }
            Err(e) => {
                has_errors = true;
                let line_info = match e.line() {
                    Some(line) => format!("{}:{}", file, line),
                    None => file.to_string(),
                };
                println!("{line_info}: {}: {}", "error".red().bold(), e);
            }
        }
    }

    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}
