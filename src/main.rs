// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # handykit
//!
//! Command-line front end for the `handykit` library: timing a command,
//! file listing and copying, and the interactive pickers.
//!
//! Arguments are matched as a whole against the known command shapes, so
//! each command lists exactly the arguments it takes.

use std::{
    path::PathBuf,
    process::{self, Command},
};

use anyhow::{Context, Result, bail};

use handykit::{
    Tracker,
    config::{self, AppConfig},
    console::{self, ProgressCounter},
    files,
    logging::{self, LoggingConfig},
    picker::{self, PickerOptions},
};

const USAGE: &str = "\
usage: handykit <command> [args...]

  time <program> [args...]   run a program and report how long it took
  ls <dir>                   list the files in a directory
  fix-path <path>            print a path with native separators
  created <file>...          print file creation times
  cp <file>... <dir>         copy files into a directory
  mv <file>... <dir>         move files into a directory
  rename <file> <new-name>   rename a file, keeping its extension
  pick-dir [title...]        choose a directory interactively
  pick-files [title...]      choose files interactively
  config [reset]             show the settings, or write the defaults";

/// The entry point of the application.
///
/// Loads the user configuration, starts logging and dispatches on the
/// command-line arguments.
fn main() -> Result<()> {
    let config = start_up(config::try_load_config());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    run(&args, &config)
}

/// Starts logging before reporting a configuration that could not be read,
/// so the warning is not swallowed.
fn start_up(loaded: std::result::Result<AppConfig, confy::ConfyError>) -> AppConfig {
    let logging_config = loaded.as_ref().map(LoggingConfig::from).unwrap_or_default();
    logging::init_logging(logging_config);
    config::or_default(loaded)
}

fn run(args: &[&str], cfg: &AppConfig) -> Result<()> {
    match args {
        ["time", program, program_args @ ..] => time_program(program, program_args)?,

        ["ls", dir] => {
            let names = files::list_files(dir).with_context(|| format!("Failed to list {}", dir))?;
            console::print_numbered(&names, false)?;
        }

        ["fix-path", path] => println!("{}", files::fix_separators(path)),

        ["created", paths @ ..] if !paths.is_empty() => {
            let mut entries = Vec::with_capacity(paths.len());
            for path in paths {
                let created = files::creation_time(path)
                    .with_context(|| format!("Failed to read creation time of {}", path))?;
                entries.push((path.to_string(), created.format("%Y-%m-%d %H:%M:%S").to_string()));
            }
            console::print_numbered_map(entries, paths.len() > 1)?;
        }

        ["cp", sources @ .., dir] if !sources.is_empty() => {
            transfer(sources, dir, "Copy", |source, dir| files::copy_file(source, dir))?
        }
        ["mv", sources @ .., dir] if !sources.is_empty() => {
            transfer(sources, dir, "Move", |source, dir| files::move_file(source, dir))?
        }

        ["rename", source, new_name] => {
            let target = files::rename_file(source, new_name).context("Rename failed")?;
            println!("{}", target.display());
        }

        ["pick-dir", title @ ..] => {
            let title = title_or(title, "Choose a directory");
            let chosen = picker::pick_directory_with(&title, &PickerOptions::from(cfg))
                .context("Directory picker failed")?;
            match chosen {
                Some(dir) => println!("{}", dir.display()),
                None => eprintln!("cancelled"),
            }
        }

        ["pick-files", title @ ..] => {
            let title = title_or(title, "Choose files");
            let chosen = picker::pick_files_with(&title, &PickerOptions::from(cfg))
                .context("File picker failed")?;
            if chosen.is_empty() {
                eprintln!("cancelled");
            }
            for file in chosen {
                println!("{}", file.display());
            }
        }

        ["config"] => {
            let entries = [
                ("log_filter", cfg.log_filter.clone().unwrap_or_else(|| "-".into())),
                ("start_dir", cfg.start_dir.clone().unwrap_or_else(|| ".".into())),
                ("show_hidden", cfg.show_hidden.to_string()),
                ("themed_background", cfg.themed_background.to_string()),
            ];
            console::print_numbered_map(entries, false)?;
        }
        ["config", "reset"] => {
            config::save_config(&AppConfig::default()).context("Failed to write configuration")?;
            log::info!("configuration reset to defaults");
        }

        [] | ["help"] | ["-h"] | ["--help"] => println!("{}", USAGE),

        [cmd, ..] => bail!("unknown or incomplete command `{}`\n\n{}", cmd, USAGE),
    }

    Ok(())
}

/// Runs `program` to completion and reports its wall-clock time on stderr.
///
/// A failing program makes this process exit with the same code, after the
/// timing has been printed.
fn time_program(program: &str, args: &[&str]) -> Result<()> {
    let mut tracker = Tracker::new();

    tracker.begin();
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run {}", program))?;
    tracker.end();

    eprintln!("{} finished in {}", program, tracker.elapsed_string()?);

    if !status.success() {
        process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}

/// Applies `op` to each source, showing a progress count when there is more
/// than one.
fn transfer<F>(sources: &[&str], dir: &str, verb: &str, op: F) -> Result<()>
where
    F: Fn(&str, &str) -> handykit::Result<PathBuf>,
{
    let mut progress = (sources.len() > 1).then(|| ProgressCounter::new(sources.len()));

    for &source in sources {
        op(source, dir).with_context(|| format!("{} of {} failed", verb, source))?;
        if let Some(progress) = progress.as_mut() {
            progress.tick()?;
        }
    }

    if let Some(progress) = progress {
        progress.finish()?;
    }
    Ok(())
}

fn title_or(words: &[&str], default: &str) -> String {
    if words.is_empty() {
        default.to_string()
    } else {
        words.join(" ")
    }
}
