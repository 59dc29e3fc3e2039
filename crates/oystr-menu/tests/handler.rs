//! Menu action handling against recording collaborators.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use oystr_menu::{
    AppWindow, ExternalLink, LanguageCode, MenuAction, MenuError, MenuHandler, MenuServices,
    Notifier, OverlayKind, OverlayOptions, PathTemplate, Preferences, ShellEvent, ShellServices,
    UpdateChecker, UploadError, UploadKind, UploadRequest, Uploader, ViewId, WindowError,
    WindowManager, WindowRole,
};
use oystr_node::{
    BackendError, BackendProcess, Network, NodeState, NodeSwitchRequest, NodeType,
    RestartCoordinator, RestartError, RestartHooks,
};
use serde_json::{Value, json};

#[derive(Default)]
struct FakeWindow {
    messages: RefCell<Vec<(String, Value)>>,
    full_screen: Cell<bool>,
    devtools_toggles: Cell<usize>,
    languages: RefCell<Vec<LanguageCode>>,
    language_fails: bool,
}

impl AppWindow for FakeWindow {
    fn reload(&self, _url: &str) -> Result<(), WindowError> {
        Ok(())
    }

    fn send_message(&self, channel: &str, payload: Value) -> Result<(), WindowError> {
        self.messages
            .borrow_mut()
            .push((channel.to_string(), payload));
        Ok(())
    }

    fn toggle_dev_tools(&self) -> Result<(), WindowError> {
        self.devtools_toggles.set(self.devtools_toggles.get() + 1);
        Ok(())
    }

    fn is_full_screen(&self) -> bool {
        self.full_screen.get()
    }

    fn set_full_screen(&self, full_screen: bool) -> Result<(), WindowError> {
        self.full_screen.set(full_screen);
        Ok(())
    }

    fn set_language(&self, code: &LanguageCode) -> Result<(), WindowError> {
        if self.language_fails {
            return Err(WindowError::Failed("script error".to_string()));
        }
        self.languages.borrow_mut().push(code.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FakeWindows {
    main: Option<Rc<FakeWindow>>,
    focused: Option<Rc<FakeWindow>>,
    overlays: RefCell<Vec<(OverlayKind, OverlayOptions)>>,
}

impl WindowManager for FakeWindows {
    fn window(&self, role: WindowRole) -> Option<Rc<dyn AppWindow>> {
        match role {
            WindowRole::Main => self.main.clone().map(|w| w as Rc<dyn AppWindow>),
        }
    }

    fn focused(&self) -> Option<Rc<dyn AppWindow>> {
        self.focused.clone().map(|w| w as Rc<dyn AppWindow>)
    }

    fn create_overlay(
        &self,
        kind: OverlayKind,
        options: OverlayOptions,
    ) -> Result<(), WindowError> {
        self.overlays.borrow_mut().push((kind, options));
        Ok(())
    }
}

#[derive(Default)]
struct FakeShell {
    revealed: RefCell<Vec<PathBuf>>,
    opened: RefCell<Vec<PathBuf>>,
    external: RefCell<Vec<String>>,
    markers: RefCell<Vec<(PathBuf, String)>>,
    dirs: BTreeSet<PathBuf>,
    files: BTreeSet<PathBuf>,
    pick: RefCell<Option<PathBuf>>,
    quit: Cell<bool>,
    reveal_fails: bool,
}

impl ShellServices for FakeShell {
    fn resolve(&self, template: PathTemplate) -> PathBuf {
        let base = match template {
            PathTemplate::Home(_) => "/home/user",
            PathTemplate::AppData(_) => "/appdata",
            PathTemplate::UserData(_) => "/userdata",
        };
        Path::new(base).join(template.relative())
    }

    fn reveal_in_folder(&self, path: &Path) -> io::Result<()> {
        if self.reveal_fails {
            return Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        }
        self.revealed.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn open_path(&self, path: &Path) -> io::Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn open_external(&self, url: &str) -> io::Result<()> {
        self.external.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn write_marker(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.markers
            .borrow_mut()
            .push((path.to_path_buf(), contents.to_string()));
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.contains(path)
    }

    fn pick_upload_source(&self) -> Option<PathBuf> {
        self.pick.borrow_mut().take()
    }

    fn quit(&self) {
        self.quit.set(true);
    }
}

#[derive(Default)]
struct FakeUploader {
    requests: RefCell<Vec<UploadRequest>>,
    fails: bool,
}

impl Uploader for FakeUploader {
    fn upload(&self, request: UploadRequest) -> LocalBoxFuture<'_, Result<String, UploadError>> {
        self.requests.borrow_mut().push(request);
        let result = if self.fails {
            Err(UploadError::Swarm("connection refused".to_string()))
        } else {
            Ok("abc123".to_string())
        };
        async move { result }.boxed_local()
    }
}

#[derive(Default)]
struct FakeUpdates {
    app_checks: Cell<usize>,
    node_checks: RefCell<Vec<bool>>,
}

impl UpdateChecker for FakeUpdates {
    fn check_app_visibly(&self) {
        self.app_checks.set(self.app_checks.get() + 1);
    }

    fn check_node(&self, restart_after_update: bool) {
        self.node_checks.borrow_mut().push(restart_after_update);
    }
}

#[derive(Default)]
struct FakePreferences {
    saved: RefCell<Vec<LanguageCode>>,
    fails: bool,
}

impl Preferences for FakePreferences {
    fn set_language(&self, code: &LanguageCode) -> Result<(), String> {
        if self.fails {
            return Err("read-only file system".to_string());
        }
        self.saved.borrow_mut().push(code.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FakeNotifier {
    events: RefCell<Vec<ShellEvent>>,
}

impl Notifier for FakeNotifier {
    fn emit(&self, event: ShellEvent) {
        self.events.borrow_mut().push(event);
    }
}

struct FakeBackend {
    results: RefCell<VecDeque<Result<(), BackendError>>>,
}

impl BackendProcess for FakeBackend {
    fn current(&self) -> NodeState {
        NodeState::owned(NodeType::Geth, Network::Main)
    }

    fn restart(
        &self,
        _node: NodeType,
        _network: Network,
    ) -> LocalBoxFuture<'_, Result<(), BackendError>> {
        let result = self.results.borrow_mut().pop_front().unwrap_or(Ok(()));
        async move { result }.boxed_local()
    }
}

#[derive(Default)]
struct CountingHooks {
    reloads: Cell<usize>,
    rebuilds: Cell<usize>,
}

impl RestartHooks for CountingHooks {
    fn reload_interface(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn rebuild_menu(&self, _state: &NodeState) {
        self.rebuilds.set(self.rebuilds.get() + 1);
    }
}

struct Harness {
    main: Rc<FakeWindow>,
    windows: Rc<FakeWindows>,
    shell: Rc<FakeShell>,
    uploader: Rc<FakeUploader>,
    updates: Rc<FakeUpdates>,
    preferences: Rc<FakePreferences>,
    notifier: Rc<FakeNotifier>,
    hooks: Rc<CountingHooks>,
    handler: MenuHandler,
}

#[derive(Default)]
struct Setup {
    main: FakeWindow,
    no_main_window: bool,
    shell: FakeShell,
    uploader: FakeUploader,
    preferences: FakePreferences,
    backend_results: Vec<Result<(), BackendError>>,
}

impl Setup {
    fn build(self) -> Harness {
        let main = Rc::new(self.main);
        let windows = Rc::new(FakeWindows {
            main: (!self.no_main_window).then(|| main.clone()),
            focused: Some(main.clone()),
            overlays: RefCell::default(),
        });
        let shell = Rc::new(self.shell);
        let uploader = Rc::new(self.uploader);
        let updates = Rc::new(FakeUpdates::default());
        let preferences = Rc::new(self.preferences);
        let notifier = Rc::new(FakeNotifier::default());
        let hooks = Rc::new(CountingHooks::default());
        let backend = Rc::new(FakeBackend {
            results: RefCell::new(self.backend_results.into()),
        });
        let coordinator = Rc::new(RestartCoordinator::new(backend, hooks.clone()));

        let services = MenuServices {
            windows: windows.clone(),
            shell: shell.clone(),
            uploader: uploader.clone(),
            updates: updates.clone(),
            preferences: preferences.clone(),
            notifier: notifier.clone(),
        };

        Harness {
            main,
            windows,
            shell,
            uploader,
            updates,
            preferences,
            notifier,
            hooks,
            handler: MenuHandler::new(services, coordinator),
        }
    }
}

fn harness() -> Harness {
    Setup::default().build()
}

#[tokio::test]
async fn test_overlays_open_with_their_geometry() {
    let h = harness();
    h.handler.handle(MenuAction::About).await.unwrap();
    h.handler.handle(MenuAction::ImportPresale).await.unwrap();
    h.handler.handle(MenuAction::OpenRemix).await.unwrap();

    let overlays = h.windows.overlays.borrow();
    let kinds: Vec<_> = overlays.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(
        kinds,
        vec![
            OverlayKind::About,
            OverlayKind::ImportAccount,
            OverlayKind::Remix
        ]
    );
    assert_eq!(overlays[1].1.width, 600);
    assert_eq!(
        overlays[2].1.url.as_deref(),
        Some("https://remix.ethereum.org")
    );
}

#[tokio::test]
async fn test_check_for_node_updates_clears_skip_marker() {
    let h = harness();
    h.handler
        .handle(MenuAction::CheckForNodeUpdates)
        .await
        .unwrap();

    assert_eq!(
        *h.shell.markers.borrow(),
        vec![(
            PathBuf::from("/userdata/skippedNodeVersion.json"),
            String::new()
        )]
    );
    assert_eq!(*h.updates.node_checks.borrow(), vec![true]);

    h.handler.handle(MenuAction::CheckForUpdates).await.unwrap();
    assert_eq!(h.updates.app_checks.get(), 1);
}

#[tokio::test]
async fn test_backup_and_links() {
    let h = harness();
    h.handler
        .handle(MenuAction::BackupKeystore(PathTemplate::Home(".web3/keys")))
        .await
        .unwrap();
    h.handler.handle(MenuAction::BackupUserData).await.unwrap();
    h.handler
        .handle(MenuAction::OpenExternal(ExternalLink::Chat))
        .await
        .unwrap();
    h.handler.handle(MenuAction::Quit).await.unwrap();

    assert_eq!(
        *h.shell.revealed.borrow(),
        vec![PathBuf::from("/home/user/.web3/keys")]
    );
    assert_eq!(*h.shell.opened.borrow(), vec![PathBuf::from("/userdata/")]);
    assert_eq!(
        *h.shell.external.borrow(),
        vec!["https://gitter.im/pirl/oystr".to_string()]
    );
    assert!(h.shell.quit.get());
}

#[tokio::test]
async fn test_show_node_log_failure_is_contained() {
    let h = Setup {
        shell: FakeShell {
            reveal_fails: true,
            ..FakeShell::default()
        },
        ..Setup::default()
    }
    .build();

    assert!(h.handler.handle(MenuAction::ShowNodeLog).await.is_ok());
}

#[tokio::test]
async fn test_fullscreen_and_devtools() {
    let h = harness();
    h.handler.handle(MenuAction::ToggleFullScreen).await.unwrap();
    assert!(h.main.full_screen.get());
    h.handler.handle(MenuAction::ToggleFullScreen).await.unwrap();
    assert!(!h.main.full_screen.get());

    h.handler
        .handle(MenuAction::ToggleShellDevTools)
        .await
        .unwrap();
    assert_eq!(h.main.devtools_toggles.get(), 1);

    h.handler
        .handle(MenuAction::ToggleViewDevTools(ViewId::new("tab-7")))
        .await
        .unwrap();
    h.handler.handle(MenuAction::RunTests).await.unwrap();
    assert_eq!(
        *h.main.messages.borrow(),
        vec![
            (
                "uiAction_toggleWebviewDevTool".to_string(),
                json!("tab-7")
            ),
            ("uiAction_runTests".to_string(), json!("webview")),
        ]
    );
}

#[tokio::test]
async fn test_missing_main_window() {
    let h = Setup {
        no_main_window: true,
        ..Setup::default()
    }
    .build();

    let err = h.handler.handle(MenuAction::RunTests).await.unwrap_err();
    assert!(matches!(err, MenuError::WindowUnavailable("main")));
}

#[tokio::test]
async fn test_language_switch_persists_and_notifies() {
    let h = harness();
    let code = LanguageCode::from("de");
    h.handler
        .handle(MenuAction::SetLanguage(code.clone()))
        .await
        .unwrap();

    assert_eq!(*h.main.languages.borrow(), vec![code.clone()]);
    assert_eq!(*h.preferences.saved.borrow(), vec![code.clone()]);
    assert_eq!(
        *h.notifier.events.borrow(),
        vec![ShellEvent::LanguageChanged(code)]
    );
}

#[tokio::test]
async fn test_language_switch_survives_live_update_failure() {
    let h = Setup {
        main: FakeWindow {
            language_fails: true,
            ..FakeWindow::default()
        },
        ..Setup::default()
    }
    .build();
    let code = LanguageCode::from("zh-TW");

    h.handler
        .handle(MenuAction::SetLanguage(code.clone()))
        .await
        .unwrap();

    assert!(h.main.languages.borrow().is_empty());
    assert_eq!(*h.preferences.saved.borrow(), vec![code.clone()]);
    assert_eq!(
        *h.notifier.events.borrow(),
        vec![ShellEvent::LanguageChanged(code)]
    );
}

#[tokio::test]
async fn test_language_switch_notifies_even_if_save_fails() {
    let h = Setup {
        preferences: FakePreferences {
            fails: true,
            ..FakePreferences::default()
        },
        ..Setup::default()
    }
    .build();

    let err = h
        .handler
        .handle(MenuAction::SetLanguage(LanguageCode::from("fr")))
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::Preferences(_)));
    assert_eq!(h.notifier.events.borrow().len(), 1);
}

#[tokio::test]
async fn test_upload_directory_navigates_browser() {
    let site = PathBuf::from("/work/site");
    let h = Setup {
        shell: FakeShell {
            dirs: BTreeSet::from([site.clone()]),
            files: BTreeSet::from([site.join("index.html")]),
            pick: RefCell::new(Some(site.clone())),
            ..FakeShell::default()
        },
        ..Setup::default()
    }
    .build();

    h.handler.handle(MenuAction::UploadToSwarm).await.unwrap();

    assert_eq!(
        *h.uploader.requests.borrow(),
        vec![UploadRequest {
            path: site,
            kind: UploadKind::Directory,
            default_file: Some("/index.html".to_string()),
        }]
    );
    assert_eq!(
        *h.main.messages.borrow(),
        vec![
            (
                "uiAction_navigateTab".to_string(),
                json!({
                    "tab": "browser",
                    "url": "bzz://abc123",
                    "redirect": "bzz://abc123",
                })
            ),
            ("uiAction_selectTab".to_string(), json!("browser")),
        ]
    );
}

#[tokio::test]
async fn test_upload_file_without_default_entry() {
    let file = PathBuf::from("/work/notes.txt");
    let h = Setup {
        shell: FakeShell {
            files: BTreeSet::from([file.clone()]),
            pick: RefCell::new(Some(file.clone())),
            ..FakeShell::default()
        },
        ..Setup::default()
    }
    .build();

    h.handler.handle(MenuAction::UploadToSwarm).await.unwrap();
    let requests = h.uploader.requests.borrow();
    assert_eq!(requests[0].kind, UploadKind::File);
    assert_eq!(requests[0].default_file, None);
}

#[tokio::test]
async fn test_upload_cancelled_and_failed() {
    let h = harness();
    let err = h
        .handler
        .handle(MenuAction::UploadToSwarm)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(h.uploader.requests.borrow().is_empty());

    let h = Setup {
        shell: FakeShell {
            pick: RefCell::new(Some(PathBuf::from("/work/a.txt"))),
            ..FakeShell::default()
        },
        uploader: FakeUploader {
            fails: true,
            ..FakeUploader::default()
        },
        ..Setup::default()
    }
    .build();
    let err = h
        .handler
        .handle(MenuAction::UploadToSwarm)
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::Upload(UploadError::Swarm(_))));
    assert!(h.main.messages.borrow().is_empty());
}

#[tokio::test]
async fn test_switch_node_goes_through_coordinator() {
    let h = harness();
    h.handler
        .handle(MenuAction::SwitchNode(NodeSwitchRequest::new(NodeType::Eth)))
        .await
        .unwrap();

    assert_eq!(
        h.handler.coordinator().state(),
        NodeState::owned(NodeType::Eth, Network::Main)
    );
    assert_eq!(h.hooks.reloads.get(), 1);
    assert_eq!(h.hooks.rebuilds.get(), 1);
}

#[tokio::test]
async fn test_switch_node_failure_reports_backend_error() {
    let h = Setup {
        backend_results: vec![Err(BackendError::Unavailable(NodeType::Eth))],
        ..Setup::default()
    }
    .build();

    let err = h
        .handler
        .handle(MenuAction::SwitchNode(NodeSwitchRequest::new(NodeType::Eth)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MenuError::Restart(RestartError::Backend(BackendError::Unavailable(
            NodeType::Eth
        )))
    ));
    assert_eq!(h.handler.coordinator().state().node, NodeType::Geth);
    assert_eq!(h.hooks.reloads.get(), 0);
    assert_eq!(h.hooks.rebuilds.get(), 1);
}
