//! Wiring of the shell's collaborators.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use oystr_menu::{
    BinaryCatalog, MenuAction, MenuConfig, MenuHandler, MenuServices, PlatformId, RuntimeState,
    Translator, WindowManager, paths,
};
use oystr_node::{BackendProcess, NodeState, NodeSwitchRequest, RestartCoordinator};

use crate::catalog::{MANIFEST_FILENAME, ManifestCatalog};
use crate::desktop::{DesktopShell, HeadlessWindows, ShellDirs};
use crate::error::Result;
use crate::host::{HostHooks, HostNotifier, MenuHost, MenuInstaller};
use crate::labels::EnglishLabels;
use crate::process::ProcessBackend;
use crate::settings::{Settings, SettingsStore};
use crate::swarm::SwarmGateway;
use crate::updates::{ReleaseClient, ReleaseUpdates};

/// Inputs the shell is assembled from.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Settings file.
    pub settings_path: PathBuf,
    /// Base directories for path templates.
    pub dirs: ShellDirs,
    /// Platform the menu is built for.
    pub platform: PlatformId,
    /// System locale used for the default language.
    pub system_locale: String,
    /// Answer for the next upload prompt instead of a file dialog.
    pub upload_source: Option<PathBuf>,
}

/// Client manifest location for `settings`.
#[must_use]
pub fn manifest_path(settings: &Settings, dirs: &ShellDirs) -> PathBuf {
    settings
        .node
        .manifest
        .clone()
        .unwrap_or_else(|| dirs.user_data.join(MANIFEST_FILENAME))
}

/// Runtime snapshot the shell starts with.
///
/// A saved language is only used when the translator offers it; otherwise
/// the system locale picks one.
#[must_use]
pub fn initial_runtime(
    settings: &Settings,
    translator: &dyn Translator,
    system_locale: &str,
) -> RuntimeState {
    let languages = translator.languages();
    let language = match settings.general.language.clone() {
        Some(code) if !code.is_dev() && languages.contains(&code) => code,
        Some(code) => {
            tracing::warn!(language = %code.as_str(), "Ignoring unsupported saved language");
            translator.best_match(system_locale)
        }
        None => translator.best_match(system_locale),
    };
    RuntimeState::new(
        settings.node.initial_state(),
        settings.general.ui_mode,
        language,
    )
}

/// The assembled shell.
pub struct Shell {
    settings: Rc<SettingsStore>,
    backend: Rc<ProcessBackend>,
    desktop: Rc<DesktopShell>,
    updates: Rc<ReleaseUpdates>,
    host: Rc<MenuHost>,
    handler: MenuHandler,
}

impl Shell {
    /// Wire everything up; nothing is spawned or installed yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the client manifest or HTTP client cannot be set up.
    pub fn assemble(options: ShellOptions, installer: Rc<dyn MenuInstaller>) -> Result<Self> {
        let settings = Rc::new(SettingsStore::open(options.settings_path));
        let current = settings.get();

        let catalog = Rc::new(ManifestCatalog::open(manifest_path(
            &current,
            &options.dirs,
        ))?);
        let translator = Rc::new(EnglishLabels::new());
        let runtime = initial_runtime(&current, translator.as_ref(), &options.system_locale);

        let builder = oystr_menu::MenuTreeBuilder::new(
            MenuConfig::new(options.platform).with_system_locale(&options.system_locale),
            translator,
            Rc::clone(&catalog) as Rc<dyn BinaryCatalog>,
        );
        let host = Rc::new(MenuHost::new(builder, installer, runtime));

        let windows: Rc<dyn WindowManager> = Rc::new(HeadlessWindows);
        let backend = Rc::new(ProcessBackend::new(
            Rc::clone(&catalog),
            options.dirs.resolve(paths::NODE_LOG),
            current.node.initial_state(),
            Duration::from_millis(current.node.startup_grace_ms),
        ));
        let coordinator = Rc::new(RestartCoordinator::new(
            Rc::clone(&backend) as Rc<dyn BackendProcess>,
            Rc::new(HostHooks::new(
                Rc::clone(&host),
                Rc::clone(&windows),
                current.node.interface_url.as_str(),
            )),
        ));

        let desktop =
            Rc::new(DesktopShell::new(options.dirs).with_upload_source(options.upload_source));
        let updates = Rc::new(ReleaseUpdates::new(
            ReleaseClient::new(current.updates.repository.as_str())?,
            catalog,
        ));
        let services = MenuServices {
            windows,
            shell: Rc::clone(&desktop) as _,
            uploader: Rc::new(SwarmGateway::new(current.node.swarm_gateway.as_str())),
            updates: Rc::clone(&updates) as _,
            preferences: Rc::clone(&settings) as _,
            notifier: Rc::new(HostNotifier::new(Rc::clone(&host))),
        };

        Ok(Self {
            settings,
            backend,
            desktop,
            updates,
            host,
            handler: MenuHandler::new(services, coordinator),
        })
    }

    /// Menu host.
    #[must_use]
    pub fn host(&self) -> &Rc<MenuHost> {
        &self.host
    }

    /// Node process backend.
    #[must_use]
    pub fn backend(&self) -> &Rc<ProcessBackend> {
        &self.backend
    }

    /// Persisted settings.
    #[must_use]
    pub fn settings(&self) -> &Rc<SettingsStore> {
        &self.settings
    }

    /// Committed node state.
    #[must_use]
    pub fn node_state(&self) -> NodeState {
        self.handler.coordinator().state()
    }

    /// Start the initial node and adopt whatever state it ended up in.
    ///
    /// # Errors
    ///
    /// Returns the start error; the node is then reported as stopped and the
    /// menu still reflects it.
    pub async fn start_node(&self) -> Result<()> {
        let result = self.backend.start().await;
        let state = self.handler.coordinator().sync();
        self.host.set_node(state);
        if let Err(err) = &result {
            tracing::warn!(error = %err, node = %state.node, "Initial node did not start");
        }
        Ok(result?)
    }

    /// Whether a menu action asked the shell to quit.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.desktop.quit_requested()
    }

    /// Run `action` and wait for any update check it started.
    ///
    /// A committed node switch is written to the settings so the next launch
    /// starts the same node. When a node update check replaced the binary of
    /// the running node, the node is restarted on its current network.
    ///
    /// # Errors
    ///
    /// Returns the action's error, or the error of the follow-up restart.
    pub async fn dispatch(&self, action: MenuAction) -> Result<()> {
        let switch = matches!(action, MenuAction::SwitchNode(_));
        let result = self.handler.handle(action).await;
        self.updates.settle().await;
        result?;
        self.restart_updated_node().await?;

        if switch {
            let state = self.node_state();
            if let Err(err) = self.settings.update(|settings| {
                settings.node.implementation = state.node;
                settings.node.network = state.network;
            }) {
                tracing::error!(error = %err, "Failed to save node selection");
            }
        }
        Ok(())
    }

    /// Run the action of the menu item with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the item cannot be activated or its action fails.
    pub async fn activate(&self, id: &str) -> Result<()> {
        let action = self.host.action_for(id)?;
        self.dispatch(action).await
    }

    async fn restart_updated_node(&self) -> Result<()> {
        let updated = self.updates.take_updated();
        let state = self.node_state();
        if !updated.into_iter().any(|node| state.runs_owned(node)) {
            return Ok(());
        }
        tracing::info!(node = %state.node, network = %state.network, "Restarting node after update");
        let request = NodeSwitchRequest::with_network(state.node, state.network);
        Ok(self.handler.handle(MenuAction::SwitchNode(request)).await?)
    }
}
