use std::sync::Arc;

use adw::prelude::*;
use relm4::prelude::*;

use crate::api::{ApiError, Credentials, HttpBackend, RecipeBackend};
use crate::config;
use crate::services::loader::{
    resolve_page, ContentLoader, EmbeddedData, NavigationToken, PageContent, PageKind,
};
use crate::services::location::{History, Location, Route};
use crate::services::settings::AppSettings;
use crate::services::toast::{FlashNotice, Severity};
use crate::services::{Database, KeyringService, SettingsService};
use crate::ui::develop_page::{DevelopInit, DevelopPage};
use crate::ui::login_dialog::{LoginDialog, LoginInit};
use crate::ui::onboarding::OnboardingWindow;
use crate::ui::pantry_page::PantryPage;
use crate::ui::recipe_view::{RecipeViewInit, RecipeViewPage};
use crate::ui::sidebar::{Sidebar, SidebarMsg, SidebarOutput};
use crate::ui::toast_stack::{ToastStack, ToastStackMsg};
use crate::ui::window::PreferencesHandles;
use crate::ui::{clear_box, PageOutput};

const SESSION_EXPIRED: &str = "Please sign in to continue.";

/// The page currently shown in the content area. Replaced wholesale on
/// every navigation, which drops the old page's session with it.
enum Page {
    Develop(Controller<DevelopPage>),
    View(Controller<RecipeViewPage>),
    Pantry(Controller<PantryPage>),
}

impl Page {
    fn widget(&self) -> gtk::Widget {
        match self {
            Page::Develop(page) => page.widget().clone().upcast(),
            Page::View(page) => page.widget().clone().upcast(),
            Page::Pantry(page) => page.widget().clone().upcast(),
        }
    }
}

pub struct App {
    db: Option<Database>,
    keyring: Option<KeyringService>,
    settings: AppSettings,
    backend: Option<Arc<dyn RecipeBackend>>,
    history: History,
    loader: ContentLoader,
    pending_flashes: Vec<FlashNotice>,
    sidebar: Controller<Sidebar>,
    toasts: Controller<ToastStack>,
    page: Option<Page>,
    page_host: gtk::Box,
    window_title: adw::WindowTitle,
    back_button: gtk::Button,
    forward_button: gtk::Button,
    initialized: bool,
    preferences: Option<PreferencesHandles>,
    login: Option<AsyncController<LoginDialog>>,
    onboarding: Option<AsyncController<OnboardingWindow>>,
}

/// Everything startup produces before the first page can load.
pub struct Startup {
    db: Database,
    keyring: Option<KeyringService>,
    settings: AppSettings,
    last_location: Location,
    backend: Arc<dyn RecipeBackend>,
    signed_in: bool,
}

impl std::fmt::Debug for Startup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Startup")
            .field("settings", &self.settings)
            .field("last_location", &self.last_location)
            .field("signed_in", &self.signed_in)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum AppMsg {
    Navigate(Location, Option<EmbeddedData>),
    ReplaceLocation(Location),
    GoBack,
    GoForward,
    Reload,
    NewRecipe,
    OpenPantry,
    RecipesChanged,
    Notify(String, Severity),
    Busy(bool),
    SessionExpired,
    SignedIn(Credentials),
    ShowRegistration,
    Registered(String),
    OnboardingFinished,
    DialogClosed,
    SignOut,
    SettingsChanged(AppSettings),
    ShowPreferences,
    ShowAbout,
    ShowShortcuts,
}

#[derive(Debug)]
pub enum AppCmd {
    Initialized(Box<Startup>),
    InitFailed(String),
    PageResolved(NavigationToken, Result<PageContent, ApiError>),
    SignedOut(Result<(), ApiError>),
}

#[relm4::component(pub, async)]
impl AsyncComponent for App {
    type Init = ();
    type Input = AppMsg;
    type Output = ();
    type CommandOutput = AppCmd;

    view! {
        adw::ApplicationWindow {
            set_title: Some(config::APP_NAME),
            set_width_request: 620,
            set_height_request: 500,

            #[local_ref]
            overlay -> gtk::Overlay {},
        }
    }

    async fn init(
        _init: Self::Init,
        root: Self::Root,
        sender: AsyncComponentSender<Self>,
    ) -> AsyncComponentParts<Self> {
        root.set_default_size(1200, 800);

        let sidebar = Sidebar::builder()
            .launch(())
            .forward(sender.input_sender(), |output| match output {
                SidebarOutput::Navigate(location) => AppMsg::Navigate(location, None),
                SidebarOutput::SignedOut => AppMsg::SessionExpired,
            });

        let toasts = ToastStack::builder().launch(()).detach();

        let page_host = gtk::Box::new(gtk::Orientation::Vertical, 0);
        page_host.set_hexpand(true);
        page_host.set_vexpand(true);

        let loading = adw::StatusPage::new();
        loading.set_title("Connecting...");
        loading.set_icon_name(Some("network-server-symbolic"));
        loading.set_vexpand(true);
        page_host.append(&loading);

        let content_header = adw::HeaderBar::new();
        content_header.set_show_start_title_buttons(false);

        let back_button = gtk::Button::builder()
            .icon_name("go-previous-symbolic")
            .tooltip_text("Back")
            .sensitive(false)
            .build();
        let sender_back = sender.input_sender().clone();
        back_button.connect_clicked(move |_| sender_back.emit(AppMsg::GoBack));

        let forward_button = gtk::Button::builder()
            .icon_name("go-next-symbolic")
            .tooltip_text("Forward")
            .sensitive(false)
            .build();
        let sender_forward = sender.input_sender().clone();
        forward_button.connect_clicked(move |_| sender_forward.emit(AppMsg::GoForward));

        content_header.pack_start(&back_button);
        content_header.pack_start(&forward_button);

        let window_title = adw::WindowTitle::new(config::APP_NAME, "");
        content_header.set_title_widget(Some(&window_title));

        let menu = gio::Menu::new();
        menu.append(Some("Preferences"), Some("app.preferences"));
        menu.append(Some("Keyboard Shortcuts"), Some("app.show-shortcuts"));
        menu.append(Some("About Sous"), Some("app.about"));

        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu)
            .build();
        content_header.pack_end(&menu_button);

        let content_toolbar = adw::ToolbarView::new();
        content_toolbar.add_top_bar(&content_header);
        content_toolbar.set_content(Some(&page_host));

        let content_page = adw::NavigationPage::builder()
            .title("Recipe")
            .tag("content")
            .child(&content_toolbar)
            .build();

        let sidebar_page = adw::NavigationPage::builder()
            .title("Recipes")
            .tag("sidebar")
            .child(sidebar.widget())
            .build();

        let split_view = adw::NavigationSplitView::new();
        split_view.set_hexpand(true);
        split_view.set_vexpand(true);
        split_view.set_min_sidebar_width(200.0);
        split_view.set_max_sidebar_width(300.0);
        split_view.set_sidebar(Some(&sidebar_page));
        split_view.set_content(Some(&content_page));

        match adw::BreakpointCondition::parse("max-width: 600px") {
            Ok(condition) => {
                let breakpoint = adw::Breakpoint::new(condition);
                breakpoint.add_setter(&split_view, "collapsed", Some(&true.to_value()));
                breakpoint.add_setter(
                    &content_header,
                    "show-start-title-buttons",
                    Some(&true.to_value()),
                );
                root.add_breakpoint(breakpoint);
            }
            Err(e) => tracing::warn!("Invalid breakpoint condition: {}", e),
        }

        let overlay = gtk::Overlay::new();
        overlay.set_child(Some(&split_view));
        overlay.add_overlay(toasts.widget());

        let model = App {
            db: None,
            keyring: None,
            settings: AppSettings::default(),
            backend: None,
            history: History::new(Location::root()),
            loader: ContentLoader::new(),
            pending_flashes: Vec::new(),
            sidebar,
            toasts,
            page: None,
            page_host,
            window_title,
            back_button,
            forward_button,
            initialized: false,
            preferences: None,
            login: None,
            onboarding: None,
        };

        let overlay = &overlay;
        let widgets = view_output!();

        let app = relm4::main_adw_application();
        for (name, accels, msg) in [
            ("preferences", &["<Control>comma"][..], AppAction::Preferences),
            ("about", &[][..], AppAction::About),
            ("show-shortcuts", &["<Control>question"][..], AppAction::Shortcuts),
            ("new-recipe", &["<Control>n"][..], AppAction::NewRecipe),
            ("pantry", &["<Control>p"][..], AppAction::Pantry),
            ("reload", &["<Control>r", "F5"][..], AppAction::Reload),
            ("back", &["<Alt>Left"][..], AppAction::Back),
            ("forward", &["<Alt>Right"][..], AppAction::Forward),
        ] {
            let sender_action = sender.input_sender().clone();
            let action = gio::SimpleAction::new(name, None);
            action.connect_activate(move |_, _| sender_action.emit(msg.into()));
            app.add_action(&action);
            if !accels.is_empty() {
                app.set_accels_for_action(&format!("app.{}", name), accels);
            }
        }

        sender.command(|out, _| {
            Box::pin(async move {
                let cmd = match Self::async_init().await {
                    Ok(startup) => AppCmd::Initialized(Box::new(startup)),
                    Err(e) => AppCmd::InitFailed(format!("{:#}", e)),
                };
                let _ = out.send(cmd);
            })
        });

        AsyncComponentParts { model, widgets }
    }

    async fn update(
        &mut self,
        msg: Self::Input,
        sender: AsyncComponentSender<Self>,
        root: &Self::Root,
    ) {
        match msg {
            AppMsg::Navigate(location, carried) => {
                if !self.initialized {
                    return;
                }
                self.history.push(location.clone());
                self.load(location, carried, &sender);
            }
            AppMsg::ReplaceLocation(location) => {
                if !self.loader.replace_visible(location.clone()) {
                    return;
                }
                self.history.replace(location.clone());
                self.sidebar.emit(SidebarMsg::SetLocation(location));
                self.sync_chrome();
                self.remember_location().await;
            }
            AppMsg::GoBack => {
                if let Some(location) = self.history.back().cloned() {
                    self.load(location, None, &sender);
                }
            }
            AppMsg::GoForward => {
                if let Some(location) = self.history.forward().cloned() {
                    self.load(location, None, &sender);
                }
            }
            AppMsg::Reload => {
                if self.initialized {
                    let location = self.history.current().clone();
                    self.load(location, None, &sender);
                }
            }
            AppMsg::NewRecipe => sender.input(AppMsg::Navigate(Location::root(), None)),
            AppMsg::OpenPantry => sender.input(AppMsg::Navigate(Location::pantry(), None)),
            AppMsg::RecipesChanged => self.sidebar.emit(SidebarMsg::Reload),
            AppMsg::Notify(message, severity) => {
                self.toasts.emit(ToastStackMsg::Notify(message, severity));
            }
            AppMsg::Busy(busy) => self.sidebar.emit(SidebarMsg::SetSensitive(!busy)),
            AppMsg::SessionExpired => {
                if self.login.is_some() || self.onboarding.is_some() {
                    return;
                }
                tracing::info!("Session expired, asking to sign in again");
                self.pending_flashes
                    .push(FlashNotice::new("info", SESSION_EXPIRED));
                self.show_login(root, &sender);
            }
            AppMsg::SignedIn(credentials) => {
                self.login = None;
                self.signed_in(credentials).await;
                let location = self.history.current().clone();
                self.load(location, None, &sender);
            }
            AppMsg::ShowRegistration => {
                self.login = None;
                if let Some(backend) = self.backend.clone() {
                    self.onboarding = Some(crate::ui::window::create_onboarding(
                        root,
                        sender.input_sender(),
                        backend,
                    ));
                }
            }
            AppMsg::Registered(username) => {
                // Registration signs the new account in.
                self.settings.username = Some(username);
                self.settings.remember_login = false;
                self.save_settings().await;
            }
            AppMsg::OnboardingFinished => {
                self.onboarding = None;
                self.history = History::new(Location::root());
                self.load(Location::root(), None, &sender);
            }
            AppMsg::DialogClosed => {
                // Dismissed without finishing; a later request will ask again.
                self.login = None;
                self.onboarding = None;
            }
            AppMsg::SignOut => {
                if let Some(handles) = self.preferences.take() {
                    handles.window.close();
                }
                let Some(backend) = self.backend.clone() else {
                    return;
                };
                sender.oneshot_command(async move { AppCmd::SignedOut(backend.logout().await) });
            }
            AppMsg::SettingsChanged(settings) => {
                self.apply_settings(settings, &sender).await;
            }
            AppMsg::ShowPreferences => {
                let Some(backend) = self.backend.clone() else {
                    return;
                };
                self.preferences = Some(crate::ui::window::create_preferences_window(
                    root,
                    sender.input_sender(),
                    backend,
                    &self.settings,
                ));
            }
            AppMsg::ShowAbout => crate::ui::window::create_about_dialog(root),
            AppMsg::ShowShortcuts => crate::ui::window::create_shortcuts_window(root),
        }
    }

    async fn update_cmd(
        &mut self,
        msg: Self::CommandOutput,
        sender: AsyncComponentSender<Self>,
        root: &Self::Root,
    ) {
        match msg {
            AppCmd::Initialized(startup) => {
                let Startup {
                    db,
                    keyring,
                    settings,
                    last_location,
                    backend,
                    signed_in,
                } = *startup;

                self.db = Some(db);
                self.keyring = keyring;
                self.toasts
                    .emit(ToastStackMsg::SetDuration(settings.toast_duration_ms));
                self.settings = settings;
                self.sidebar.emit(SidebarMsg::SetBackend(backend.clone()));
                self.backend = Some(backend);
                self.history = History::new(last_location.clone());
                self.initialized = true;

                if signed_in {
                    self.load(last_location, None, &sender);
                } else {
                    self.show_login(root, &sender);
                }
            }
            AppCmd::InitFailed(err) => {
                tracing::error!("Initialization failed: {}", err);
                clear_box(&self.page_host);
                let status = adw::StatusPage::new();
                status.set_title("Sous could not start");
                status.set_description(Some(&err));
                status.set_icon_name(Some("dialog-error-symbolic"));
                status.set_vexpand(true);
                self.page_host.append(&status);
            }
            AppCmd::PageResolved(token, Ok(content)) => {
                if !self.loader.deliver(token, content) {
                    return;
                }
                if let Some(content) = self.loader.take_ready() {
                    self.show_page(content, &sender).await;
                }
            }
            AppCmd::PageResolved(token, Err(e)) => {
                if !self.loader.is_current(token) {
                    return;
                }
                tracing::warn!("Page load failed: {}", e);
                if e.is_signed_out() {
                    sender.input(AppMsg::SessionExpired);
                }
            }
            AppCmd::SignedOut(result) => {
                if let Err(e) = result {
                    tracing::warn!("Logout request failed: {}", e);
                }
                self.forget_password().await;
                self.forget_location().await;
                self.toasts.emit(ToastStackMsg::Notify(
                    "You have been logged out.".to_string(),
                    Severity::Info,
                ));
                self.show_login(root, &sender);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum AppAction {
    Preferences,
    About,
    Shortcuts,
    NewRecipe,
    Pantry,
    Reload,
    Back,
    Forward,
}

impl From<AppAction> for AppMsg {
    fn from(action: AppAction) -> Self {
        match action {
            AppAction::Preferences => AppMsg::ShowPreferences,
            AppAction::About => AppMsg::ShowAbout,
            AppAction::Shortcuts => AppMsg::ShowShortcuts,
            AppAction::NewRecipe => AppMsg::NewRecipe,
            AppAction::Pantry => AppMsg::OpenPantry,
            AppAction::Reload => AppMsg::Reload,
            AppAction::Back => AppMsg::GoBack,
            AppAction::Forward => AppMsg::GoForward,
        }
    }
}

fn page_msg(output: PageOutput) -> AppMsg {
    match output {
        PageOutput::Navigate(location, carried) => AppMsg::Navigate(location, carried),
        PageOutput::ReplaceLocation(location) => AppMsg::ReplaceLocation(location),
        PageOutput::RecipesChanged => AppMsg::RecipesChanged,
        PageOutput::Notify(message, severity) => AppMsg::Notify(message, severity),
        PageOutput::Busy(busy) => AppMsg::Busy(busy),
        PageOutput::SignedOut => AppMsg::SessionExpired,
    }
}

impl App {
    async fn async_init() -> anyhow::Result<Startup> {
        let db = match Database::new().await {
            Ok(db) => db,
            Err(e) => {
                tracing::warn!("Settings will not persist, using an in-memory store: {:#}", e);
                Database::new_in_memory()?
            }
        };
        let keyring = match KeyringService::new().await {
            Ok(keyring) => Some(keyring),
            Err(e) => {
                tracing::warn!("Keyring unavailable, passwords will not be remembered: {:#}", e);
                None
            }
        };
        let settings = SettingsService::load(&db).await;
        let last_location = SettingsService::load_last_location(&db).await;
        let backend = Self::connect(&settings)?;
        let signed_in = Self::restore_session(backend.as_ref(), keyring.as_ref(), &settings).await;

        Ok(Startup {
            db,
            keyring,
            settings,
            last_location,
            backend,
            signed_in,
        })
    }

    fn connect(settings: &AppSettings) -> anyhow::Result<Arc<dyn RecipeBackend>> {
        let backend = HttpBackend::new(settings.effective_server_url())?;
        tracing::info!("Using recipe server {}", backend.base_url());
        Ok(Arc::new(backend))
    }

    /// Sign in with the remembered password if there is one, then ask the
    /// server whether the session is live.
    async fn restore_session(
        backend: &dyn RecipeBackend,
        keyring: Option<&KeyringService>,
        settings: &AppSettings,
    ) -> bool {
        if let (true, Some(username), Some(keyring)) =
            (settings.remember_login, settings.username.as_deref(), keyring)
        {
            let server = settings.effective_server_url();
            match keyring.password(server.as_str(), username).await {
                Ok(Some(password)) => {
                    let credentials = Credentials {
                        username: username.to_string(),
                        password,
                        remember: true,
                    };
                    match backend.login(&credentials).await {
                        Ok(()) => {
                            tracing::info!("Signed in as {} from the keyring", username);
                            return true;
                        }
                        Err(e) => tracing::warn!("Remembered sign-in failed: {}", e),
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Failed to read remembered password: {:#}", e),
            }
        }

        match backend.check_session().await {
            Ok(signed_in) => signed_in,
            Err(e) => {
                tracing::warn!("Could not check session: {}", e);
                false
            }
        }
    }

    /// Start resolving `location`. Whatever was loading before is
    /// superseded and its result will be dropped.
    fn load(
        &mut self,
        location: Location,
        carried: Option<EmbeddedData>,
        sender: &AsyncComponentSender<Self>,
    ) {
        let Some(backend) = self.backend.clone() else {
            return;
        };
        tracing::debug!("Loading {}", location);
        let token = self.loader.begin();
        let flashes = std::mem::take(&mut self.pending_flashes);
        self.sync_chrome();
        sender.oneshot_command(async move {
            let result = resolve_page(backend.as_ref(), location, carried, flashes).await;
            AppCmd::PageResolved(token, result)
        });
    }

    async fn show_page(&mut self, mut content: PageContent, sender: &AsyncComponentSender<Self>) {
        let Some(backend) = self.backend.clone() else {
            return;
        };

        let flashes = std::mem::take(&mut content.flashes);
        if !flashes.is_empty() {
            self.toasts.emit(ToastStackMsg::Flashes(flashes));
        }

        // Redirects land somewhere other than where the navigation started.
        if &content.location != self.history.current() {
            self.history.replace(content.location.clone());
        }
        let location = content.location.clone();

        let page = match content.kind {
            PageKind::Develop => Page::Develop(
                DevelopPage::builder()
                    .launch(DevelopInit {
                        backend,
                        page: content,
                    })
                    .forward(sender.input_sender(), page_msg),
            ),
            PageKind::View => Page::View(
                RecipeViewPage::builder()
                    .launch(RecipeViewInit {
                        backend,
                        page: content,
                    })
                    .forward(sender.input_sender(), page_msg),
            ),
            PageKind::Pantry => Page::Pantry(
                PantryPage::builder()
                    .launch(backend)
                    .forward(sender.input_sender(), page_msg),
            ),
        };

        clear_box(&self.page_host);
        self.page_host.append(&page.widget());
        self.page = Some(page);

        self.sidebar.emit(SidebarMsg::SetSensitive(true));
        self.sidebar.emit(SidebarMsg::SetLocation(location));
        self.sidebar.emit(SidebarMsg::Reload);
        self.sync_chrome();
        self.remember_location().await;
    }

    fn sync_chrome(&self) {
        let location = self.history.current();
        self.window_title.set_title(page_title(location));
        if self.loader.is_loading() {
            self.window_title.set_subtitle("Loading...");
        } else {
            self.window_title.set_subtitle(&location.to_string());
        }
        self.back_button.set_sensitive(self.history.can_go_back());
        self.forward_button
            .set_sensitive(self.history.can_go_forward());
    }

    fn show_login(&mut self, root: &adw::ApplicationWindow, sender: &AsyncComponentSender<Self>) {
        let Some(backend) = self.backend.clone() else {
            return;
        };
        let init = LoginInit {
            backend,
            server: self.settings.effective_server_url().to_string(),
            username: self.settings.username.clone(),
            remember: self.settings.remember_login,
        };
        self.login = Some(crate::ui::window::create_login_dialog(
            root,
            sender.input_sender(),
            init,
        ));
    }

    async fn signed_in(&mut self, credentials: Credentials) {
        let changed_user = self.settings.username.as_deref() != Some(credentials.username.as_str());
        if changed_user {
            self.forget_password().await;
        }

        self.settings.username = Some(credentials.username.clone());
        self.settings.remember_login = credentials.remember;
        self.save_settings().await;

        if credentials.remember {
            if let Some(keyring) = &self.keyring {
                let server = self.settings.effective_server_url();
                if let Err(e) = keyring
                    .store_password(server.as_str(), &credentials.username, &credentials.password)
                    .await
                {
                    tracing::warn!("Failed to remember password: {:#}", e);
                }
            }
        } else {
            self.forget_password().await;
        }
    }

    async fn forget_password(&self) {
        let (Some(keyring), Some(username)) = (&self.keyring, &self.settings.username) else {
            return;
        };
        let server = self.settings.effective_server_url();
        if let Err(e) = keyring.forget_password(server.as_str(), username).await {
            tracing::warn!("Failed to forget password: {:#}", e);
        }
    }

    async fn apply_settings(&mut self, settings: AppSettings, sender: &AsyncComponentSender<Self>) {
        // The account fields may have changed since the window opened.
        let server_changed = settings.effective_server_url() != self.settings.effective_server_url();
        self.toasts
            .emit(ToastStackMsg::SetDuration(settings.toast_duration_ms));
        self.settings.server_url = settings.server_url;
        self.settings.toast_duration_ms = settings.toast_duration_ms;
        self.save_settings().await;

        if !server_changed {
            return;
        }
        match Self::connect(&self.settings) {
            Ok(backend) => {
                self.sidebar.emit(SidebarMsg::SetBackend(backend.clone()));
                self.backend = Some(backend);
                // A new server means a new session.
                sender.input(AppMsg::SessionExpired);
            }
            Err(e) => {
                tracing::error!("Failed to connect to new server: {:#}", e);
                self.toasts.emit(ToastStackMsg::Notify(
                    "Could not connect to that server".to_string(),
                    Severity::Error,
                ));
            }
        }
    }

    /// The next account starts at the develop page.
    async fn forget_location(&mut self) {
        self.history = History::new(Location::root());
        self.sync_chrome();
        let Some(db) = &self.db else {
            return;
        };
        if let Err(e) = SettingsService::forget_last_location(db).await {
            tracing::warn!("Failed to forget last location: {:#}", e);
        }
    }

    async fn save_settings(&self) {
        let Some(db) = &self.db else {
            return;
        };
        if let Err(e) = SettingsService::save(db, &self.settings).await {
            tracing::error!("Failed to save settings: {:#}", e);
        }
    }

    /// Persist the location actually on screen, so startup can return to it.
    async fn remember_location(&self) {
        let (Some(db), Some(location)) = (&self.db, self.loader.visible()) else {
            return;
        };
        if let Err(e) = SettingsService::save_last_location(db, location).await {
            tracing::warn!("Failed to save last location: {:#}", e);
        }
    }
}

fn page_title(location: &Location) -> &'static str {
    match location.route() {
        Route::Develop => "New Recipe",
        Route::View(_) => "Recipe",
        Route::Edit(_) => "Edit Recipe",
        Route::Pantry => "My Pantry",
        Route::NotFound => config::APP_NAME,
    }
}
