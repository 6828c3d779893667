use std::sync::Arc;

use adw::prelude::*;
use relm4::prelude::*;

use crate::api::{ApiError, RecipeBackend};
use crate::models::{DietType, DietaryPreferences};
use crate::services::toast::Severity;

pub struct DietPage {
    backend: Arc<dyn RecipeBackend>,
    loaded: Option<DietaryPreferences>,
    saving: bool,
    diet_row: adw::ComboRow,
    avoid_row: adw::EntryRow,
    love_row: adw::EntryRow,
}

#[derive(Debug)]
pub enum DietPageMsg {
    Save,
}

#[derive(Debug)]
pub enum DietPageOutput {
    Notify(String, Severity),
    SignedOut,
}

#[derive(Debug)]
pub enum DietPageCmd {
    Loaded(Result<DietaryPreferences, ApiError>),
    Saved(Result<Option<String>, ApiError>),
}

#[relm4::component(pub)]
impl Component for DietPage {
    type Init = Arc<dyn RecipeBackend>;
    type Input = DietPageMsg;
    type Output = DietPageOutput;
    type CommandOutput = DietPageCmd;

    view! {
        adw::PreferencesPage {
            set_title: "Diet",
            set_icon_name: Some("emoji-food-symbolic"),

            adw::PreferencesGroup {
                set_title: "Dietary Preferences",
                set_description: Some("Taken into account whenever a recipe is generated"),
                #[watch]
                set_sensitive: model.loaded.is_some() && !model.saving,

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

            adw::PreferencesGroup {
                gtk::Button {
                    set_halign: gtk::Align::End,
                    add_css_class: "suggested-action",
                    #[watch]
                    set_label: if model.saving { "Saving..." } else { "Save Preferences" },
                    #[watch]
                    set_sensitive: model.loaded.is_some() && !model.saving,
                    connect_clicked => DietPageMsg::Save,
                },
            },
        }
    }

    fn init(
        backend: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = Self {
            backend,
            loaded: None,
            saving: false,
            diet_row: adw::ComboRow::new(),
            avoid_row: adw::EntryRow::new(),
            love_row: adw::EntryRow::new(),
        };

        let diet_row = &model.diet_row;
        let avoid_row = &model.avoid_row;
        let love_row = &model.love_row;
        let widgets = view_output!();

        let backend = model.backend.clone();
        sender.oneshot_command(async move { DietPageCmd::Loaded(backend.preferences().await) });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            DietPageMsg::Save => {
                let Some(loaded) = &self.loaded else {
                    return;
                };
                let prefs = DietaryPreferences {
                    diet_type: self.selected_diet(loaded),
                    foods_to_avoid: self.avoid_row.text().trim().to_string(),
                    foods_i_love: self.love_row.text().trim().to_string(),
                };

                self.saving = true;
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    DietPageCmd::Saved(backend.save_preferences(&prefs).await)
                });
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
            DietPageCmd::Loaded(Ok(prefs)) => {
                self.show(&prefs);
                self.loaded = Some(prefs);
            }
            DietPageCmd::Loaded(Err(e)) => {
                tracing::warn!("Failed to load preferences: {}", e);
                self.report_error(e, "Error loading preferences", &sender);
            }
            DietPageCmd::Saved(Ok(_)) => {
                self.saving = false;
                let _ = sender.output(DietPageOutput::Notify(
                    "Preferences saved successfully!".to_string(),
                    Severity::Success,
                ));
            }
            DietPageCmd::Saved(Err(e)) => {
                self.saving = false;
                tracing::warn!("Failed to save preferences: {}", e);
                self.report_error(e, "Error saving preferences", &sender);
            }
        }
    }
}

impl DietPage {
    /// Known diets fill the combo; a diet only the server knows is listed
    /// last so saving keeps it.
    fn show(&self, prefs: &DietaryPreferences) {
        let mut names: Vec<&str> = DietType::KNOWN.iter().map(|d| d.display_name()).collect();
        let selected = match DietType::KNOWN.iter().position(|d| *d == prefs.diet_type) {
            Some(index) => index,
            None => {
                names.push(prefs.diet_type.display_name());
                names.len() - 1
            }
        };
        self.diet_row.set_model(Some(&gtk::StringList::new(&names)));
        self.diet_row.set_selected(selected as u32);
        self.avoid_row.set_text(&prefs.foods_to_avoid);
        self.love_row.set_text(&prefs.foods_i_love);
    }

    fn selected_diet(&self, loaded: &DietaryPreferences) -> DietType {
        DietType::KNOWN
            .get(self.diet_row.selected() as usize)
            .cloned()
            .unwrap_or_else(|| loaded.diet_type.clone())
    }

    fn report_error(&self, e: ApiError, fallback: &str, sender: &ComponentSender<Self>) {
        let _ = sender.output(DietPageOutput::Notify(e.message_or(fallback), Severity::Error));
        if e.is_signed_out() {
            let _ = sender.output(DietPageOutput::SignedOut);
        }
    }
}
