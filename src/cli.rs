// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command-line arguments.
//!
//! Help output ends with the interactive command table. Help and version
//! exit with code 0; every parse error (including no images) exits with 1.

use crate::interaction::controller::HELP_COMMANDS;
use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Compose photos into a framed grid collage.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "collage", version)]
pub struct CliArgs {
    /// Image files to place in the tiles, reused in order when there are
    /// more tiles than files.
    #[arg(required = true, num_args = 1.., value_name = "IMAGE")]
    pub images: Vec<PathBuf>,

    /// Grid layout: NxM (columns x rows) or band patterns like 3-2b-3.
    #[arg(short, long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// YAML or JSON configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File the first save writes to without asking.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Parsing stopped: print `message` and exit with `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliExit {
    pub code: u8,
    pub message: String,
}

/// The command table as shown after the options.
pub fn command_table() -> String {
    let mut table = String::from("Commands:\n");
    for (cmd, desc) in HELP_COMMANDS {
        table.push_str(&format!("  {:<22}  {}\n", cmd, desc));
    }
    table
}

impl CliArgs {
    /// Parse `args` (including the program name).
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, CliExit>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Self::command().after_help(command_table());
        let matches = command.try_get_matches_from_mut(args).map_err(|e| {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            CliExit {
                code,
                message: e.render().to_string(),
            }
        })?;

        Self::from_arg_matches(&matches).map_err(|e| CliExit {
            code: 1,
            message: e.render().to_string(),
        })
    }

    /// Make image paths absolute relative to the working directory.
    pub fn absolute_images(&self) -> Vec<PathBuf> {
        self.images
            .iter()
            .map(|p| std::path::absolute(p).unwrap_or_else(|_| p.clone()))
            .collect()
    }
}
