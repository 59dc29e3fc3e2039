//! Subcommand implementations.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use oystr_menu::model::find_node;
use oystr_menu::{
    ContentView, LanguageCode, MenuAction, MenuConfig, MenuTreeBuilder, PlatformId, ids,
};
use oystr_node::{NodeState, NodeSwitchRequest};
use oystr_shell::app::{initial_runtime, manifest_path};
use oystr_shell::catalog::ManifestCatalog;
use oystr_shell::desktop::{ShellDirs, system_locale};
use oystr_shell::labels::EnglishLabels;
use oystr_shell::settings::Settings;
use oystr_shell::{MenuInstaller, OutlineMenu, Shell, ShellError, ShellOptions, render};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{ActivateArgs, MenuArgs, SwitchArgs};

/// How often the native menu is polled for clicks in `run`.
const MENU_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn settings_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(Settings::config_path)
}

fn assemble(
    settings: Option<PathBuf>,
    upload_source: Option<PathBuf>,
    installer: Rc<dyn MenuInstaller>,
) -> Result<Shell> {
    let options = ShellOptions {
        settings_path: settings_path(settings),
        dirs: ShellDirs::detect()?,
        platform: PlatformId::current(),
        system_locale: system_locale(),
        upload_source,
    };
    Shell::assemble(options, installer).context("failed to start the shell")
}

/// Exit code for an action result; cancelled uploads are not failures.
fn report(result: std::result::Result<(), ShellError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(ShellError::Action(err)) if err.is_cancelled() => {
            println!("{}", err.user_message());
            0
        }
        Err(err) => {
            tracing::debug!(error = %err, "Action failed");
            eprintln!("error: {} ({err})", err.user_message());
            1
        }
    }
}

pub fn run_menu(settings: Option<PathBuf>, args: MenuArgs) -> Result<i32> {
    let settings = Settings::load_from(&settings_path(settings));
    let dirs = ShellDirs::detect()?;
    let locale = system_locale();
    let platform = args.platform.unwrap_or_else(PlatformId::current);

    let catalog = ManifestCatalog::open(manifest_path(&settings, &dirs))?;
    let translator = Rc::new(EnglishLabels::new());
    let mut runtime = initial_runtime(&settings, translator.as_ref(), &locale);

    let node = args.node.unwrap_or(runtime.node.node);
    let network = args.network.unwrap_or(runtime.node.network);
    runtime.node = if args.external || !runtime.node.is_owned() {
        NodeState::external(node, network)
    } else {
        NodeState::owned(node, network)
    };
    if let Some(mode) = args.mode {
        runtime.ui_mode = mode.into();
    }
    if let Some(language) = args.language {
        runtime.language = LanguageCode::new(language);
    }
    runtime.views = args
        .views
        .iter()
        .enumerate()
        .map(|(index, name)| ContentView::new(format!("view-{index}"), name.as_str()))
        .collect();

    let builder = MenuTreeBuilder::new(
        MenuConfig::new(platform).with_system_locale(locale),
        translator,
        Rc::new(catalog),
    );
    let tree = builder.build(&runtime);

    if args.json {
        println!("{}", render::json(&tree)?);
    } else {
        print!("{}", render::outline(&tree, args.ids));
    }
    Ok(0)
}

pub async fn run_switch(settings: Option<PathBuf>, args: SwitchArgs) -> Result<i32> {
    let shell = assemble(settings, None, Rc::new(OutlineMenu::new()))?;

    if let Err(err) = shell.start_node().await {
        eprintln!("warning: {}", err.user_message());
    }

    let request = match args.network {
        Some(network) => NodeSwitchRequest::with_network(args.node, network),
        None => NodeSwitchRequest::new(args.node),
    };
    let code = report(shell.dispatch(MenuAction::SwitchNode(request)).await);

    let state = shell.node_state();
    println!("Node: {} on {}", state.node, state.network);
    if let Some(develop) = find_node(&shell.host().build(), ids::DEVELOP) {
        print!("{}", render::outline(std::slice::from_ref(develop), false));
    }

    if code == 0 && args.keep_running {
        println!("Node log: {}", shell.backend().log_path().display());
        if let Some(exit) = shell.backend().wait().await {
            println!("Node exited with code {exit}");
        }
    } else {
        shell.backend().shutdown().await?;
    }
    Ok(code)
}

pub async fn run_activate(settings: Option<PathBuf>, args: ActivateArgs) -> Result<i32> {
    let shell = assemble(settings, args.path, Rc::new(OutlineMenu::new()))?;
    let code = report(shell.activate(&args.id).await);
    shell.backend().shutdown().await?;
    Ok(code)
}

pub async fn run_console(settings: Option<PathBuf>) -> Result<i32> {
    let installer = oystr_shell::platform_installer();
    let shell = assemble(settings, None, Rc::clone(&installer))?;

    if let Err(err) = shell.start_node().await {
        eprintln!("warning: {}", err.user_message());
    }
    shell.host().rebuild()?;
    print!("{}", render::outline(&shell.host().build(), true));
    println!("Enter an item id to activate it, or an empty line to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut poll = tokio::time::interval(MENU_POLL_INTERVAL);

    while !shell.quit_requested() {
        tokio::select! {
            line = lines.next_line() => {
                let line = line.context("failed to read stdin")?;
                let Some(id) = line.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()) else {
                    break;
                };
                report(shell.activate(&id).await);
            }
            _ = poll.tick() => {
                if let Some(action) = installer.poll_action() {
                    report(shell.dispatch(action).await);
                }
            }
        }
    }

    shell.backend().shutdown().await?;
    Ok(0)
}
