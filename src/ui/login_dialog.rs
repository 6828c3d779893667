use std::sync::Arc;

use adw::prelude::*;
use relm4::prelude::*;

use crate::api::{ApiError, Credentials, RecipeBackend};

pub struct LoginDialog {
    backend: Arc<dyn RecipeBackend>,
    username_row: adw::EntryRow,
    password_row: adw::PasswordEntryRow,
    remember_row: adw::SwitchRow,
    signing_in: bool,
    error: Option<String>,
}

pub struct LoginInit {
    pub backend: Arc<dyn RecipeBackend>,
    pub server: String,
    pub username: Option<String>,
    pub remember: bool,
}

#[derive(Debug)]
pub enum LoginMsg {
    Submit,
    Register,
}

#[derive(Debug)]
pub enum LoginOutput {
    SignedIn(Credentials),
    Register,
}

#[derive(Debug)]
pub enum LoginCmd {
    Finished(Credentials, Result<(), ApiError>),
}

#[relm4::component(pub, async)]
impl AsyncComponent for LoginDialog {
    type Init = LoginInit;
    type Input = LoginMsg;
    type Output = LoginOutput;
    type CommandOutput = LoginCmd;

    view! {
        adw::Window {
            set_title: Some("Sign In"),
            set_default_width: 420,
            set_modal: true,
            set_resizable: false,

            adw::ToolbarView {
                add_top_bar = &adw::HeaderBar {},

                #[wrap(Some)]
                set_content = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 18,
                    set_margin_all: 24,

                    gtk::Label {
                        set_label: "Welcome back",
                        add_css_class: "title-1",
                    },

                    gtk::Label {
                        set_label: &server,
                        add_css_class: "dim-label",
                    },

                    gtk::Label {
                        add_css_class: "inline-error",
                        set_wrap: true,
                        #[watch]
                        set_visible: model.error.is_some(),
                        #[watch]
                        set_label: model.error.as_deref().unwrap_or_default(),
                    },

                    adw::PreferencesGroup {
                        #[watch]
                        set_sensitive: !model.signing_in,

                        #[local_ref]
                        username_row -> adw::EntryRow {
                            set_title: "Username",
                        },

                        #[local_ref]
                        password_row -> adw::PasswordEntryRow {
                            set_title: "Password",
                            connect_entry_activated => LoginMsg::Submit,
                        },

                        #[local_ref]
                        remember_row -> adw::SwitchRow {
                            set_title: "Remember me",
                            set_subtitle: "Keep the password in the keyring",
                        },
                    },

                    gtk::Button {
                        add_css_class: "suggested-action",
                        add_css_class: "pill",
                        set_halign: gtk::Align::Center,
                        #[watch]
                        set_label: if model.signing_in { "Signing in..." } else { "Sign In" },
                        #[watch]
                        set_sensitive: !model.signing_in,
                        connect_clicked => LoginMsg::Submit,
                    },

                    gtk::Button {
                        set_label: "Create an account",
                        add_css_class: "flat",
                        set_halign: gtk::Align::Center,
                        connect_clicked => LoginMsg::Register,
                    },
                },
            },
        }
    }

    async fn init(
        init: Self::Init,
        root: Self::Root,
        _sender: AsyncComponentSender<Self>,
    ) -> AsyncComponentParts<Self> {
        let LoginInit {
            backend,
            server,
            username,
            remember,
        } = init;

        let username_row = adw::EntryRow::new();
        if let Some(username) = &username {
            username_row.set_text(username);
        }
        let remember_row = adw::SwitchRow::new();
        remember_row.set_active(remember);

        let model = Self {
            backend,
            username_row: username_row.clone(),
            password_row: adw::PasswordEntryRow::new(),
            remember_row: remember_row.clone(),
            signing_in: false,
            error: None,
        };

        let password_row = &model.password_row;
        let username_row = &model.username_row;
        let remember_row = &model.remember_row;
        let widgets = view_output!();

        if username.is_some() {
            password_row.grab_focus();
        }

        AsyncComponentParts { model, widgets }
    }

    async fn update(
        &mut self,
        msg: Self::Input,
        sender: AsyncComponentSender<Self>,
        root: &Self::Root,
    ) {
        match msg {
            LoginMsg::Submit => {
                if self.signing_in {
                    return;
                }
                let username = self.username_row.text().trim().to_string();
                let password = self.password_row.text().to_string();
                if username.is_empty() || password.is_empty() {
                    self.error = Some("Please enter your username and password.".to_string());
                    return;
                }

                self.signing_in = true;
                self.error = None;
                let credentials = Credentials {
                    username,
                    password,
                    remember: self.remember_row.is_active(),
                };
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    let result = backend.login(&credentials).await;
                    LoginCmd::Finished(credentials, result)
                });
            }
            LoginMsg::Register => {
                let _ = sender.output(LoginOutput::Register);
                root.close();
            }
        }
    }

    async fn update_cmd(
        &mut self,
        msg: Self::CommandOutput,
        sender: AsyncComponentSender<Self>,
        root: &Self::Root,
    ) {
        match msg {
            LoginCmd::Finished(credentials, Ok(())) => {
                tracing::info!("Signed in as {}", credentials.username);
                let _ = sender.output(LoginOutput::SignedIn(credentials));
                root.close();
            }
            LoginCmd::Finished(_, Err(e)) => {
                tracing::warn!("Sign-in failed: {}", e);
                self.signing_in = false;
                self.error = Some(e.message_or("Sign-in failed"));
                self.password_row.set_text("");
            }
        }
    }
}
