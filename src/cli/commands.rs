//! Command dispatch: one handler per subcommand

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{group_lines, ContentBlock, OutlineTreeConvert};
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    match command {
        Commands::Tree { file } => cmd_tree(&container(cli)?, file),
        Commands::Keys { file } => cmd_keys(&container(cli)?, file),
        Commands::Find { file, key } => cmd_find(&container(cli)?, file, key),
        Commands::Extract { file, key } => cmd_extract(&container(cli)?, file, key),
        Commands::Sections { file } => cmd_sections(&container(cli)?, file),
        Commands::Reconcile {
            template,
            report,
            extract,
        } => cmd_reconcile(&container(cli)?, template, report, extract.as_deref()),
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => {
            cmd_completion(*shell);
            Ok(())
        }
    }
}

fn local_dir(cli: &Cli) -> Option<PathBuf> {
    cli.dir.clone().or_else(|| std::env::current_dir().ok())
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(local_dir(cli).as_deref())?;
    Ok(ServiceContainer::new(settings)?)
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let outline = container.outline.parse_file(file)?;
    output::info(&outline.to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_keys(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let outline = container.outline.parse_file(file)?;
    for key in outline.duplicate_content_keys() {
        output::warning(&format!("content key used by several headings: {key}"));
    }
    for line in container.outline.render_keys(&outline) {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_find(container: &ServiceContainer, file: &Path, key: &str) -> CliResult<()> {
    let outline = container.outline.parse_file(file)?;
    let matches = outline.find_all_by_content_key(key);
    let node = matches
        .first()
        .and_then(|&idx| outline.get_node(idx))
        .ok_or_else(|| CliError::SectionNotFound(key.to_string()))?;

    if matches.len() > 1 {
        output::warning(&format!(
            "{} headings share this content key, showing the first",
            matches.len()
        ));
    }
    output::header(&node.content_key);
    output::detail(&format!("level:           {}", node.level));
    output::detail(&format!("heading:         {}", node.heading()));
    output::detail(&format!("full number key: {}", node.full_number_key));
    output::detail(&format!("subsections:     {}", node.children.len()));
    output::detail(&format!("body lines:      {}", node.contents.len()));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_extract(container: &ServiceContainer, file: &Path, key: &str) -> CliResult<()> {
    let outline = container.outline.parse_file(file)?;
    print_section(container, &outline, key)
}

fn print_section(
    container: &ServiceContainer,
    outline: &crate::domain::Outline,
    key: &str,
) -> CliResult<()> {
    let lines = container.outline.extract_section(outline, key);
    if lines.is_empty() {
        return Err(CliError::SectionNotFound(key.to_string()));
    }
    for line in lines {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_sections(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let outline = container.outline.parse_file(file)?;

    let preamble = &outline.root_node().contents;
    if !preamble.is_empty() {
        output::header("(preamble)");
        print_blocks(preamble);
    }
    for (key, contents) in outline.section_map() {
        output::header(&key);
        print_blocks(&contents);
    }
    Ok(())
}

fn print_blocks(lines: &[String]) {
    for block in group_lines(lines) {
        match &block {
            ContentBlock::Text(text) => text.iter().for_each(|l| output::detail(l)),
            ContentBlock::Table(rows) => {
                output::action("table", &format!("{} rows", rows.len()));
                rows.iter().for_each(|r| output::detail(r));
            }
        }
    }
}

#[instrument(skip(container))]
fn cmd_reconcile(
    container: &ServiceContainer,
    template: &Path,
    report: &Path,
    extract: Option<&str>,
) -> CliResult<()> {
    let rec = container.outline.reconcile_files(template, report)?;

    for (key, tokens) in &rec.conflicts {
        output::warning(&format!(
            "template numbers '{}' as {}, using {}",
            key,
            tokens.join(" and "),
            tokens[0]
        ));
    }
    for correction in &rec.corrections {
        output::diff_remove(&format!("{} {}", correction.from, correction.content_key));
        output::diff_add(&format!("{} {}", correction.to, correction.content_key));
    }
    output::success(&format!("{} numbering corrections", rec.corrections.len()));

    match extract {
        Some(key) => print_section(container, &rec.outline, key),
        None => {
            for line in container.outline.render_keys(&rec.outline) {
                output::info(&line);
            }
            Ok(())
        }
    }
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    let local = local_dir(cli);
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(local.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => print_config_path("global", &path),
                None => output::warning("no global config directory on this platform"),
            }
            if let Some(dir) = &local {
                print_config_path("local", &local_config_path(dir));
            }
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no global config directory on this platform".to_string())
                })?
            } else {
                let dir = local
                    .ok_or_else(|| CliError::Usage("cannot determine current directory".to_string()))?;
                local_config_path(&dir)
            };
            init_config(&path)?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}

fn print_config_path(label: &str, path: &Path) {
    let state = if path.exists() { "exists" } else { "not found" };
    output::detail(&format!("{label}: {} ({state})", path.display()));
}

fn init_config(path: &Path) -> CliResult<()> {
    if path.exists() {
        return Err(CliError::Usage(format!(
            "config file already exists: {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| InfraError::write(parent, e))?;
    }
    std::fs::write(path, Settings::template())
        .map_err(|e| InfraError::write(path, e))?;
    debug!("init_config: wrote {}", path.display());
    Ok(())
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
