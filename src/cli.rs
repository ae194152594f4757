//! CLI definitions for pagescript.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pagescript_protocols::{ProviderKind, TabId};

/// pagescript CLI.
#[derive(Parser)]
#[command(name = "pagescript")]
#[command(about = "Turn plain-language instructions into JavaScript and run it in a browser tab")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.pagescript/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Answer JSON-line messages on stdin/stdout (default)
    Serve,

    /// Report whether the selected provider is ready
    Status,

    /// Generate JavaScript for an instruction without running it
    Generate {
        /// Instruction, e.g. "hide all images"
        prompt: String,
    },

    /// Run JavaScript in a tab
    Execute {
        /// Target tab id
        #[arg(long)]
        tab: TabId,

        /// Code to run
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        code: Option<String>,

        /// Read the code from a file instead
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Generate JavaScript for an instruction and run it
    Run {
        /// Instruction, e.g. "make the background blue"
        prompt: String,

        /// Target tab id (default: active tab)
        #[arg(long)]
        tab: Option<TabId>,
    },

    /// Show the active tab
    CurrentTab,

    /// Summarize a page and show the summary overlay
    Summarize {
        /// Target tab id (default: active tab)
        #[arg(long)]
        tab: Option<TabId>,
    },

    /// Settings management commands
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Print the stored settings with keys masked
    Show,

    /// Update stored settings
    Set {
        /// Provider: on-device, gemini or openai
        #[arg(long)]
        provider: Option<ProviderKind>,

        /// Gemini API key
        #[arg(long)]
        gemini_key: Option<String>,

        /// OpenAI API key
        #[arg(long)]
        openai_key: Option<String>,
    },
}
