use std::sync::Arc;

use adw::prelude::*;
use relm4::prelude::*;

use crate::api::RecipeBackend;
use crate::app::AppMsg;
use crate::config;
use crate::services::settings::AppSettings;
use crate::ui::login_dialog::{LoginDialog, LoginInit, LoginOutput};
use crate::ui::onboarding::{OnboardingOutput, OnboardingWindow};
use crate::ui::preferences::account_page::{AccountPage, AccountPageOutput};
use crate::ui::preferences::diet_page::{DietPage, DietPageOutput};
use crate::ui::preferences::general_page::{GeneralPage, GeneralPageOutput};

/// Returned handles from `create_preferences_window` so the caller can store them.
pub struct PreferencesHandles {
    pub window: adw::PreferencesWindow,
    pub general_page: Controller<GeneralPage>,
    pub diet_page: Controller<DietPage>,
    pub account_page: Controller<AccountPage>,
}

pub fn create_preferences_window(
    parent: &adw::ApplicationWindow,
    sender: &relm4::Sender<AppMsg>,
    backend: Arc<dyn RecipeBackend>,
    settings: &AppSettings,
) -> PreferencesHandles {
    let general_page = GeneralPage::builder()
        .launch(settings.clone())
        .forward(sender, |output| match output {
            GeneralPageOutput::SettingsChanged(s) => AppMsg::SettingsChanged(s),
        });

    let diet_page = DietPage::builder()
        .launch(backend.clone())
        .forward(sender, |output| match output {
            DietPageOutput::Notify(message, severity) => AppMsg::Notify(message, severity),
            DietPageOutput::SignedOut => AppMsg::SessionExpired,
        });

    let account_page = AccountPage::builder()
        .launch((backend, settings.username.clone()))
        .forward(sender, |output| match output {
            AccountPageOutput::Notify(message, severity) => AppMsg::Notify(message, severity),
            AccountPageOutput::SignOut => AppMsg::SignOut,
            AccountPageOutput::SignedOut => AppMsg::SessionExpired,
        });

    let prefs_window = adw::PreferencesWindow::new();
    prefs_window.set_title(Some("Preferences"));
    prefs_window.set_transient_for(Some(parent));
    prefs_window.set_modal(true);
    prefs_window.add(general_page.widget());
    prefs_window.add(diet_page.widget());
    prefs_window.add(account_page.widget());

    prefs_window.present();

    PreferencesHandles {
        window: prefs_window,
        general_page,
        diet_page,
        account_page,
    }
}

pub fn create_shortcuts_window(parent: &adw::ApplicationWindow) {
    let window = gtk::ShortcutsWindow::builder()
        .transient_for(parent)
        .modal(true)
        .build();

    let general_group = gtk::ShortcutsGroup::builder()
        .title("General")
        .build();

    for (title, accelerator) in [
        ("New recipe", "<Control>n"),
        ("Pantry", "<Control>p"),
        ("Reload", "<Control>r"),
        ("Preferences", "<Control>comma"),
        ("Keyboard shortcuts", "<Control>question"),
    ] {
        let shortcut = gtk::ShortcutsShortcut::builder()
            .title(title)
            .accelerator(accelerator)
            .build();
        general_group.add_shortcut(&shortcut);
    }

    let navigation_group = gtk::ShortcutsGroup::builder()
        .title("Navigation")
        .build();

    for (title, accelerator) in [("Go back", "<Alt>Left"), ("Go forward", "<Alt>Right")] {
        let shortcut = gtk::ShortcutsShortcut::builder()
            .title(title)
            .accelerator(accelerator)
            .build();
        navigation_group.add_shortcut(&shortcut);
    }

    let section = gtk::ShortcutsSection::builder()
        .title(config::APP_NAME)
        .build();
    section.add_group(&general_group);
    section.add_group(&navigation_group);

    window.add_section(&section);
    window.present();
}

pub fn create_about_dialog(parent: &adw::ApplicationWindow) {
    let about = adw::AboutWindow::builder()
        .application_name(config::APP_NAME)
        .version(config::VERSION)
        .developer_name("Sous Contributors")
        .license_type(gtk::License::Gpl30)
        .comments("A native GNOME client for the Remy recipe server")
        .application_icon(config::APP_ID)
        .build();
    about.set_transient_for(Some(parent));
    about.present();
}

pub fn create_login_dialog(
    parent: &adw::ApplicationWindow,
    sender: &relm4::Sender<AppMsg>,
    init: LoginInit,
) -> AsyncController<LoginDialog> {
    let login = LoginDialog::builder()
        .launch(init)
        .forward(sender, |output| match output {
            LoginOutput::SignedIn(credentials) => AppMsg::SignedIn(credentials),
            LoginOutput::Register => AppMsg::ShowRegistration,
        });

    login.widget().set_transient_for(Some(parent));
    notify_on_close(login.widget(), sender);
    login.widget().present();

    login
}

pub fn create_onboarding(
    parent: &adw::ApplicationWindow,
    sender: &relm4::Sender<AppMsg>,
    backend: Arc<dyn RecipeBackend>,
) -> AsyncController<OnboardingWindow> {
    let onboarding = OnboardingWindow::builder().launch(backend).forward(
        sender,
        |output| match output {
            OnboardingOutput::Registered(username) => AppMsg::Registered(username),
            OnboardingOutput::Notify(message, severity) => AppMsg::Notify(message, severity),
            OnboardingOutput::Finished => AppMsg::OnboardingFinished,
        },
    );

    onboarding.widget().set_transient_for(Some(parent));
    notify_on_close(onboarding.widget(), sender);
    onboarding.widget().present();

    onboarding
}

fn notify_on_close(window: &adw::Window, sender: &relm4::Sender<AppMsg>) {
    let sender = sender.clone();
    window.connect_close_request(move |_| {
        sender.emit(AppMsg::DialogClosed);
        glib::Propagation::Proceed
    });
}
