//! CLI argument definitions for the Oystr shell.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use oystr_menu::{PlatformId, UiMode};
use oystr_node::{Network, NodeType};

#[derive(Parser)]
#[command(
    name = "oystr",
    version,
    about = "Oystr shell - application menu and node switching",
    long_about = "Build and inspect the Oystr application menu, switch the backend node\n\
                  and run menu actions from the terminal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: the platform config directory).
    #[arg(long = "settings", value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the application menu for a platform and runtime state.
    Menu(MenuArgs),

    /// Switch the backend node and print the rebuilt develop menu.
    Switch(SwitchArgs),

    /// Run the action of one menu item.
    Activate(ActivateArgs),

    /// Start the node, install the menu and read item ids from stdin.
    Run,
}

#[derive(Args)]
pub struct MenuArgs {
    /// Platform to build for (default: this one).
    #[arg(long = "platform", value_parser = parse_platform)]
    pub platform: Option<PlatformId>,

    /// Interface mode (default: from settings).
    #[arg(long = "mode", value_enum)]
    pub mode: Option<UiModeArg>,

    /// Active node implementation (default: from settings).
    #[arg(long = "node", value_parser = parse_node)]
    pub node: Option<NodeType>,

    /// Active network (default: from settings).
    #[arg(long = "network", value_parser = parse_network)]
    pub network: Option<Network>,

    /// Treat the node as externally managed.
    #[arg(long = "external")]
    pub external: bool,

    /// Interface language (default: from settings or the system locale).
    #[arg(long = "language", value_name = "CODE")]
    pub language: Option<String>,

    /// Name of an open content view; repeat for several.
    #[arg(long = "view", value_name = "NAME")]
    pub views: Vec<String>,

    /// Append item ids to the outline.
    #[arg(long = "ids")]
    pub ids: bool,

    /// Print JSON instead of an outline.
    #[arg(long = "json", conflicts_with = "ids")]
    pub json: bool,
}

#[derive(Args)]
pub struct SwitchArgs {
    /// Node implementation to run.
    #[arg(value_name = "NODE", value_parser = parse_node)]
    pub node: NodeType,

    /// Network to run it on (default: keep the current one).
    #[arg(long = "network", value_parser = parse_network)]
    pub network: Option<Network>,

    /// Keep the shell attached to the node until it exits.
    #[arg(long = "keep-running")]
    pub keep_running: bool,
}

#[derive(Args)]
pub struct ActivateArgs {
    /// Menu item id, as printed by `oystr menu --ids`.
    #[arg(value_name = "ITEM_ID")]
    pub id: String,

    /// File or directory to upload instead of asking with a dialog.
    #[arg(long = "path", value_name = "PATH")]
    pub path: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UiModeArg {
    Mist,
    Wallet,
}

impl From<UiModeArg> for UiMode {
    fn from(arg: UiModeArg) -> Self {
        match arg {
            UiModeArg::Mist => UiMode::Mist,
            UiModeArg::Wallet => UiMode::Wallet,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_platform(value: &str) -> Result<PlatformId, String> {
    value.parse()
}

fn parse_node(value: &str) -> Result<NodeType, String> {
    value.parse().map_err(|e: oystr_node::NodeError| e.to_string())
}

fn parse_network(value: &str) -> Result<Network, String> {
    value.parse().map_err(|e: oystr_node::NodeError| e.to_string())
}
