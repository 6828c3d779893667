use std::sync::Arc;

use adw::prelude::*;
use relm4::prelude::*;

use crate::api::{ApiError, PantryUpdate, RecipeBackend, Registration};
use crate::models::{DietType, DietaryPreferences};
use crate::services::pantry::seed_payload;
use crate::services::toast::Severity;

const STEP_ACCOUNT: &str = "account";
const STEP_PREFERENCES: &str = "preferences";
const STEP_PANTRY: &str = "pantry";

/// Three-step sign-up: account, then optional preferences and pantry.
pub struct OnboardingWindow {
    backend: Arc<dyn RecipeBackend>,
    step: &'static str,
    working: bool,
    error: Option<String>,
    username_row: adw::EntryRow,
    password_row: adw::PasswordEntryRow,
    confirm_row: adw::PasswordEntryRow,
    diet_row: adw::ComboRow,
    avoid_row: adw::EntryRow,
    love_row: adw::EntryRow,
    pantry_buffer: gtk::TextBuffer,
}

#[derive(Debug)]
pub enum OnboardingMsg {
    CreateAccount,
    SavePreferences,
    SkipPreferences,
    BackToPreferences,
    Finish,
    SkipPantry,
}

#[derive(Debug)]
pub enum OnboardingOutput {
    Registered(String),
    Notify(String, Severity),
    Finished,
}

#[derive(Debug)]
pub enum OnboardingCmd {
    Registered(String, Result<Option<String>, ApiError>),
    PreferencesSaved(Result<Option<String>, ApiError>),
    PantrySeeded(Result<PantryUpdate, ApiError>),
}

#[relm4::component(pub, async)]
impl AsyncComponent for OnboardingWindow {
    type Init = Arc<dyn RecipeBackend>;
    type Input = OnboardingMsg;
    type Output = OnboardingOutput;
    type CommandOutput = OnboardingCmd;

    view! {
        adw::Window {
            set_title: Some("Join Sous"),
            set_default_width: 520,
            set_default_height: 560,
            set_modal: true,

            adw::ToolbarView {
                add_top_bar = &adw::HeaderBar {
                    #[wrap(Some)]
                    set_title_widget = &adw::WindowTitle {
                        #[watch]
                        set_title: step_title(model.step),
                        #[watch]
                        set_subtitle: step_subtitle(model.step),
                    },
                },

                #[wrap(Some)]
                set_content = &adw::Clamp {
                    set_maximum_size: 440,
                    set_margin_top: 24,
                    set_margin_bottom: 24,

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 18,
                        #[watch]
                        set_sensitive: !model.working,

                        gtk::Label {
                            add_css_class: "inline-error",
                            set_wrap: true,
                            #[watch]
                            set_visible: model.error.is_some(),
                            #[watch]
                            set_label: model.error.as_deref().unwrap_or_default(),
                        },

                        gtk::Stack {
                            set_transition_type: gtk::StackTransitionType::SlideLeftRight,
                            set_vexpand: true,
                            #[watch]
                            set_visible_child_name: model.step,

                            add_named[Some(STEP_ACCOUNT)] = &gtk::Box {
                                set_orientation: gtk::Orientation::Vertical,
                                set_spacing: 18,

                                adw::PreferencesGroup {
                                    #[local_ref]
                                    username_row -> adw::EntryRow {
                                        set_title: "Username",
                                    },
                                    #[local_ref]
                                    password_row -> adw::PasswordEntryRow {
                                        set_title: "Password",
                                    },
                                    #[local_ref]
                                    confirm_row -> adw::PasswordEntryRow {
                                        set_title: "Confirm Password",
                                        connect_entry_activated => OnboardingMsg::CreateAccount,
                                    },
                                },

                                gtk::Button {
                                    set_halign: gtk::Align::Center,
                                    add_css_class: "suggested-action",
                                    add_css_class: "pill",
                                    #[watch]
                                    set_label: if model.working { "Creating account..." } else { "Create Account" },
                                    connect_clicked => OnboardingMsg::CreateAccount,
                                },
                            },

                            add_named[Some(STEP_PREFERENCES)] = &gtk::Box {
                                set_orientation: gtk::Orientation::Vertical,
                                set_spacing: 18,

                                adw::PreferencesGroup {
                                    set_title: "Dietary Preferences",

                                    #[local_ref]
                                    diet_row -> adw::ComboRow {
                                        set_title: "Diet",
                                    },
                                    #[local_ref]
                                    avoid_row -> adw::EntryRow {
                                        set_title: "Foods to avoid",
                                    },
                                    #[local_ref]
                                    love_row -> adw::EntryRow {
                                        set_title: "Foods I love",
                                    },
                                },

                                gtk::Box {
                                    set_spacing: 12,
                                    set_halign: gtk::Align::Center,

                                    gtk::Button {
                                        set_label: "Skip",
                                        add_css_class: "flat",
                                        connect_clicked => OnboardingMsg::SkipPreferences,
                                    },

                                    gtk::Button {
                                        add_css_class: "suggested-action",
                                        add_css_class: "pill",
                                        #[watch]
                                        set_label: if model.working { "Saving..." } else { "Continue" },
                                        connect_clicked => OnboardingMsg::SavePreferences,
                                    },
                                },
                            },

                            add_named[Some(STEP_PANTRY)] = &gtk::Box {
                                set_orientation: gtk::Orientation::Vertical,
                                set_spacing: 18,

                                gtk::Label {
                                    set_label: "What's in your kitchen? Separate items with commas or new lines.",
                                    set_wrap: true,
                                    set_xalign: 0.0,
                                },

                                gtk::TextView {
                                    set_buffer: Some(&model.pantry_buffer),
                                    set_wrap_mode: gtk::WrapMode::WordChar,
                                    set_height_request: 120,
                                    set_top_margin: 8,
                                    set_bottom_margin: 8,
                                    set_left_margin: 8,
                                    set_right_margin: 8,
                                    add_css_class: "card",
                                },

                                gtk::Box {
                                    set_spacing: 12,
                                    set_halign: gtk::Align::Center,

                                    gtk::Button {
                                        set_label: "Back",
                                        add_css_class: "flat",
                                        connect_clicked => OnboardingMsg::BackToPreferences,
                                    },

                                    gtk::Button {
                                        set_label: "Skip",
                                        add_css_class: "flat",
                                        connect_clicked => OnboardingMsg::SkipPantry,
                                    },

                                    gtk::Button {
                                        add_css_class: "suggested-action",
                                        add_css_class: "pill",
                                        #[watch]
                                        set_label: if model.working { "Setting up..." } else { "Start Cooking!" },
                                        connect_clicked => OnboardingMsg::Finish,
                                    },
                                },
                            },
                        },
                    },
                },
            },
        }
    }

    async fn init(
        backend: Self::Init,
        root: Self::Root,
        _sender: AsyncComponentSender<Self>,
    ) -> AsyncComponentParts<Self> {
        let diet_names: Vec<&str> = DietType::KNOWN.iter().map(|d| d.display_name()).collect();
        let diet_row = adw::ComboRow::new();
        diet_row.set_model(Some(&gtk::StringList::new(&diet_names)));

        let model = Self {
            backend,
            step: STEP_ACCOUNT,
            working: false,
            error: None,
            username_row: adw::EntryRow::new(),
            password_row: adw::PasswordEntryRow::new(),
            confirm_row: adw::PasswordEntryRow::new(),
            diet_row,
            avoid_row: adw::EntryRow::new(),
            love_row: adw::EntryRow::new(),
            pantry_buffer: gtk::TextBuffer::new(None::<&gtk::TextTagTable>),
        };

        let username_row = &model.username_row;
        let password_row = &model.password_row;
        let confirm_row = &model.confirm_row;
        let diet_row = &model.diet_row;
        let avoid_row = &model.avoid_row;
        let love_row = &model.love_row;
        let widgets = view_output!();

        AsyncComponentParts { model, widgets }
    }

    async fn update(
        &mut self,
        msg: Self::Input,
        sender: AsyncComponentSender<Self>,
        root: &Self::Root,
    ) {
        self.error = None;
        match msg {
            OnboardingMsg::CreateAccount => {
                let registration = Registration {
                    username: self.username_row.text().trim().to_string(),
                    password: self.password_row.text().to_string(),
                    confirm_password: self.confirm_row.text().to_string(),
                };
                if registration.username.is_empty()
                    || registration.password.is_empty()
                    || registration.confirm_password.is_empty()
                {
                    self.error = Some("Please fill in all fields.".to_string());
                    return;
                }

                self.working = true;
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    let result = backend.register(&registration).await;
                    OnboardingCmd::Registered(registration.username, result)
                });
            }
            OnboardingMsg::SavePreferences => {
                let index = self.diet_row.selected() as usize;
                let prefs = DietaryPreferences {
                    diet_type: DietType::KNOWN.get(index).cloned().unwrap_or_default(),
                    foods_to_avoid: self.avoid_row.text().trim().to_string(),
                    foods_i_love: self.love_row.text().trim().to_string(),
                };

                self.working = true;
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    OnboardingCmd::PreferencesSaved(backend.save_preferences(&prefs).await)
                });
            }
            OnboardingMsg::SkipPreferences => self.step = STEP_PANTRY,
            OnboardingMsg::BackToPreferences => self.step = STEP_PREFERENCES,
            OnboardingMsg::Finish => {
                let text = self.pantry_buffer.text(
                    &self.pantry_buffer.start_iter(),
                    &self.pantry_buffer.end_iter(),
                    false,
                );
                let items = match seed_payload(&text) {
                    Ok(Some(items)) => items,
                    Ok(None) => {
                        self.finish(&sender, root);
                        return;
                    }
                    Err(message) => {
                        self.error = Some(message.to_string());
                        return;
                    }
                };

                self.working = true;
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    OnboardingCmd::PantrySeeded(backend.replace_pantry(&items).await)
                });
            }
            OnboardingMsg::SkipPantry => self.finish(&sender, root),
        }
    }

    async fn update_cmd(
        &mut self,
        msg: Self::CommandOutput,
        sender: AsyncComponentSender<Self>,
        root: &Self::Root,
    ) {
        self.working = false;
        match msg {
            OnboardingCmd::Registered(username, Ok(_)) => {
                tracing::info!("Registered {}", username);
                let _ = sender.output(OnboardingOutput::Notify(
                    format!("Welcome, {}!", username),
                    Severity::Success,
                ));
                let _ = sender.output(OnboardingOutput::Registered(username));
                self.step = STEP_PREFERENCES;
            }
            OnboardingCmd::Registered(_, Err(e)) => {
                tracing::warn!("Registration failed: {}", e);
                self.error = Some(e.message_or("Registration failed"));
            }
            OnboardingCmd::PreferencesSaved(Ok(_)) => self.step = STEP_PANTRY,
            OnboardingCmd::PreferencesSaved(Err(e)) => {
                tracing::warn!("Failed to save preferences: {}", e);
                self.error = Some(e.message_or("Failed to save preferences"));
            }
            OnboardingCmd::PantrySeeded(Ok(_)) => {
                let _ = sender.output(OnboardingOutput::Notify(
                    "You're all set!".to_string(),
                    Severity::Success,
                ));
                self.finish(&sender, root);
            }
            OnboardingCmd::PantrySeeded(Err(e)) => {
                tracing::warn!("Failed to seed pantry: {}", e);
                self.error = Some(e.message_or("Failed to save pantry"));
            }
        }
    }
}

impl OnboardingWindow {
    fn finish(&self, sender: &AsyncComponentSender<Self>, root: &adw::Window) {
        // Output before closing; closing may tear the component down.
        let _ = sender.output(OnboardingOutput::Finished);
        root.close();
    }
}

fn step_title(step: &str) -> &'static str {
    match step {
        STEP_PREFERENCES => "Almost there!",
        STEP_PANTRY => "One more step!",
        _ => "Join Sous",
    }
}

fn step_subtitle(step: &str) -> &'static str {
    match step {
        STEP_PREFERENCES => "Customize your experience",
        STEP_PANTRY => "Stock your pantry",
        _ => "Create your account",
    }
}
