//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "lakeside";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    ///
    /// The script goes to stdout; installation hints go to stderr.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# Generating {} completion script", self.shell);
                eprintln!("# {hint}");
            }
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some("Add to ~/.bashrc: eval \"$(lakeside completions bash)\""),
        Shell::Zsh => Some("Save as _lakeside in a directory on your $fpath"),
        Shell::Fish => {
            Some("lakeside completions fish > ~/.config/fish/completions/lakeside.fish")
        }
        Shell::PowerShell => {
            Some("lakeside completions powershell | Out-String | Invoke-Expression")
        }
        _ => None,
    }
}
