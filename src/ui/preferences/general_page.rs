use adw::prelude::*;
use relm4::prelude::*;

use crate::config;
use crate::services::settings::AppSettings;

pub struct GeneralPage {
    settings: AppSettings,
}

#[derive(Debug)]
pub enum GeneralPageMsg {
    ServerUrlApplied(String),
    ToastDurationChanged(f64),
    KeepToastsToggled(bool),
}

#[derive(Debug)]
pub enum GeneralPageOutput {
    SettingsChanged(AppSettings),
}

#[relm4::component(pub)]
impl Component for GeneralPage {
    type Init = AppSettings;
    type Input = GeneralPageMsg;
    type Output = GeneralPageOutput;
    type CommandOutput = ();

    view! {
        adw::PreferencesPage {
            set_title: "General",
            set_icon_name: Some("preferences-system-symbolic"),

            adw::PreferencesGroup {
                set_title: "Server",
                set_description: Some(&format!(
                    "The {} environment variable overrides this address",
                    config::SERVER_URL_ENV
                )),

                adw::EntryRow {
                    set_title: "Server address",
                    set_text: &model.settings.server_url,
                    set_show_apply_button: true,
                    connect_apply[sender] => move |row| {
                        sender.input(GeneralPageMsg::ServerUrlApplied(row.text().to_string()));
                    },
                },
            },

            adw::PreferencesGroup {
                set_title: "Notifications",

                adw::SwitchRow {
                    set_title: "Keep notifications until dismissed",
                    set_active: model.settings.toast_duration_ms <= 0,
                    connect_active_notify[sender] => move |row| {
                        sender.input(GeneralPageMsg::KeepToastsToggled(row.is_active()));
                    },
                },

                adw::SpinRow {
                    set_title: "Notification duration",
                    set_subtitle: "Seconds before a notification hides itself",
                    set_adjustment: Some(&gtk::Adjustment::new(5.0, 1.0, 60.0, 1.0, 5.0, 0.0)),
                    set_value: seconds(model.settings.toast_duration_ms),
                    #[watch]
                    set_sensitive: model.settings.toast_duration_ms > 0,
                    connect_value_notify[sender] => move |row| {
                        sender.input(GeneralPageMsg::ToastDurationChanged(row.value()));
                    },
                },
            },
        }
    }

    fn init(
        settings: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = Self { settings };
        let widgets = view_output!();
        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            GeneralPageMsg::ServerUrlApplied(url) => {
                let url = url.trim();
                self.settings.server_url = if url.is_empty() {
                    config::DEFAULT_SERVER_URL.to_string()
                } else {
                    url.to_string()
                };
            }
            GeneralPageMsg::ToastDurationChanged(value) => {
                if self.settings.toast_duration_ms <= 0 {
                    return;
                }
                self.settings.toast_duration_ms = (value * 1000.0) as i64;
            }
            GeneralPageMsg::KeepToastsToggled(keep) => {
                self.settings.toast_duration_ms = if keep {
                    0
                } else {
                    config::DEFAULT_TOAST_DURATION_MS
                };
            }
        }
        let _ = sender.output(GeneralPageOutput::SettingsChanged(self.settings.clone()));
    }
}

fn seconds(duration_ms: i64) -> f64 {
    if duration_ms <= 0 {
        (config::DEFAULT_TOAST_DURATION_MS / 1000) as f64
    } else {
        duration_ms as f64 / 1000.0
    }
}
