use std::sync::Arc;

use adw::prelude::*;
use relm4::prelude::*;

use crate::api::{ApiError, PasswordChange, RecipeBackend};
use crate::services::toast::Severity;

pub struct AccountPage {
    backend: Arc<dyn RecipeBackend>,
    changing: bool,
    current_row: adw::PasswordEntryRow,
    new_row: adw::PasswordEntryRow,
    confirm_row: adw::PasswordEntryRow,
}

#[derive(Debug)]
pub enum AccountPageMsg {
    ChangePassword,
    SignOut,
}

#[derive(Debug)]
pub enum AccountPageOutput {
    Notify(String, Severity),
    SignOut,
    SignedOut,
}

#[derive(Debug)]
pub enum AccountPageCmd {
    PasswordChanged(Result<Option<String>, ApiError>),
}

#[relm4::component(pub)]
impl Component for AccountPage {
    type Init = (Arc<dyn RecipeBackend>, Option<String>);
    type Input = AccountPageMsg;
    type Output = AccountPageOutput;
    type CommandOutput = AccountPageCmd;

    view! {
        adw::PreferencesPage {
            set_title: "Account",
            set_icon_name: Some("system-users-symbolic"),

            adw::PreferencesGroup {
                set_title: "Change Password",
                #[watch]
                set_sensitive: !model.changing,

                #[local_ref]
                current_row -> adw::PasswordEntryRow {
                    set_title: "Current password",
                },

                #[local_ref]
                new_row -> adw::PasswordEntryRow {
                    set_title: "New password",
                },

                #[local_ref]
                confirm_row -> adw::PasswordEntryRow {
                    set_title: "Confirm new password",
                    connect_entry_activated => AccountPageMsg::ChangePassword,
                },
            },

            adw::PreferencesGroup {
                gtk::Button {
                    set_halign: gtk::Align::End,
                    add_css_class: "suggested-action",
                    #[watch]
                    set_label: if model.changing { "Changing..." } else { "Change Password" },
                    #[watch]
                    set_sensitive: !model.changing,
                    connect_clicked => AccountPageMsg::ChangePassword,
                },
            },

            adw::PreferencesGroup {
                set_title: "Session",

                adw::ActionRow {
                    set_title: "Signed in as",
                    set_subtitle: username.as_deref().unwrap_or("unknown user"),

                    add_suffix = &gtk::Button {
                        set_label: "Sign Out",
                        set_valign: gtk::Align::Center,
                        add_css_class: "destructive-action",
                        connect_clicked => AccountPageMsg::SignOut,
                    },
                },
            },
        }
    }

    fn init(
        (backend, username): Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = Self {
            backend,
            changing: false,
            current_row: adw::PasswordEntryRow::new(),
            new_row: adw::PasswordEntryRow::new(),
            confirm_row: adw::PasswordEntryRow::new(),
        };

        let current_row = &model.current_row;
        let new_row = &model.new_row;
        let confirm_row = &model.confirm_row;
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            AccountPageMsg::ChangePassword => {
                let change = PasswordChange {
                    current_password: self.current_row.text().to_string(),
                    new_password: self.new_row.text().to_string(),
                    confirm_password: self.confirm_row.text().to_string(),
                };
                // Length and match rules are the server's to enforce.
                if change.current_password.is_empty()
                    || change.new_password.is_empty()
                    || change.confirm_password.is_empty()
                {
                    let _ = sender.output(AccountPageOutput::Notify(
                        "Please fill in all password fields.".to_string(),
                        Severity::Error,
                    ));
                    return;
                }

                self.changing = true;
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    AccountPageCmd::PasswordChanged(backend.change_password(&change).await)
                });
            }
            AccountPageMsg::SignOut => {
                let _ = sender.output(AccountPageOutput::SignOut);
            }
        }
    }

    fn update_cmd(
        &mut self,
        msg: Self::CommandOutput,
        sender: ComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match msg {
            AccountPageCmd::PasswordChanged(result) => {
                self.changing = false;
                match result {
                    Ok(_) => {
                        for row in [&self.current_row, &self.new_row, &self.confirm_row] {
                            row.set_text("");
                        }
                        let _ = sender.output(AccountPageOutput::Notify(
                            "Password changed successfully!".to_string(),
                            Severity::Success,
                        ));
                    }
                    Err(e) => {
                        tracing::warn!("Failed to change password: {}", e);
                        let _ = sender.output(AccountPageOutput::Notify(
                            e.message_or("Error changing password"),
                            Severity::Error,
                        ));
                        if e.is_signed_out() {
                            let _ = sender.output(AccountPageOutput::SignedOut);
                        }
                    }
                }
            }
        }
    }
}
