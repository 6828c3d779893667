use std::sync::Arc;

use anyhow::Context;
use gtk::prelude::*;
use relm4::prelude::*;

use crate::api::{ApiError, RecipeBackend};
use crate::config::APP_NAME;
use crate::models::{RecipeContent, RecipeId, RecipeVersion, VersionId};
use crate::services::display::RecipeDisplay;
use crate::services::export;
use crate::services::loader::{EmbeddedData, PageContent};
use crate::services::location::Location;
use crate::services::navigator::{
    interim_version, InitialTrigger, VersionListing, VersionNavigator,
};
use crate::services::session::PageSession;
use crate::services::toast::Severity;
use crate::ui::recipe_content::{RecipeContentMsg, RecipeContentView};
use crate::ui::version_list::{VersionList, VersionListMsg, VersionListOutput};
use crate::ui::{confirm, PageOutput};

const DELETE_FAILED: &str = "Error deleting recipe";

pub struct RecipeViewInit {
    pub backend: Arc<dyn RecipeBackend>,
    pub page: PageContent,
}

/// `/{id}`: one saved recipe, its versions, and what can be done with it.
pub struct RecipeViewPage {
    backend: Arc<dyn RecipeBackend>,
    session: PageSession,
    navigator: VersionNavigator,
    displayed: Option<RecipeContent>,
    deleting: bool,
    recipe: Controller<RecipeContentView>,
    versions: Controller<VersionList>,
}

#[derive(Debug)]
pub enum RecipeViewMsg {
    Start(InitialTrigger, Option<RecipeVersion>),
    SelectVersion(VersionId),
    Edit,
    Delete,
    ConfirmDelete,
    Print,
}

#[derive(Debug)]
pub enum RecipeViewCmd {
    VersionLoaded(VersionId, Result<RecipeVersion, ApiError>),
    Deleted(Result<Option<String>, ApiError>),
}

#[relm4::component(pub)]
impl Component for RecipeViewPage {
    type Init = RecipeViewInit;
    type Input = RecipeViewMsg;
    type Output = PageOutput;
    type CommandOutput = RecipeViewCmd;

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Horizontal,

            gtk::ScrolledWindow {
                set_hexpand: true,
                set_vexpand: true,
                set_hscrollbar_policy: gtk::PolicyType::Never,

                adw::Clamp {
                    set_maximum_size: 760,

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,

                        gtk::Box {
                            set_orientation: gtk::Orientation::Horizontal,
                            set_spacing: 8,
                            set_margin_top: 12,
                            set_margin_start: 18,
                            set_margin_end: 18,
                            set_halign: gtk::Align::End,
                            #[watch]
                            set_sensitive: !model.deleting && model.displayed.is_some(),

                            gtk::Button {
                                set_label: "Edit",
                                add_css_class: "suggested-action",
                                connect_clicked => RecipeViewMsg::Edit,
                            },

                            gtk::Button {
                                set_icon_name: "printer-symbolic",
                                set_tooltip_text: Some("Print"),
                                connect_clicked => RecipeViewMsg::Print,
                            },

                            gtk::Button {
                                set_icon_name: "user-trash-symbolic",
                                set_tooltip_text: Some("Delete Recipe"),
                                add_css_class: "destructive-action",
                                connect_clicked => RecipeViewMsg::Delete,
                            },
                        },

                        model.recipe.widget().clone(),
                    },
                },
            },

            gtk::Separator {
                set_orientation: gtk::Orientation::Vertical,
            },

            gtk::ScrolledWindow {
                set_width_request: 240,
                set_hscrollbar_policy: gtk::PolicyType::Never,

                gtk::Box {
                    set_margin_all: 12,

                    model.versions.widget().clone(),
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let RecipeViewInit { backend, page } = init;

        let recipe = RecipeContentView::builder()
            .launch(String::new())
            .detach();

        let versions = VersionList::builder()
            .launch(())
            .forward(sender.input_sender(), |output| match output {
                VersionListOutput::Selected(id) => RecipeViewMsg::SelectVersion(id),
            });

        let trigger = InitialTrigger::select(page.embedded.as_ref(), &page.location);
        let interim = interim_version(page.embedded.as_ref()).cloned();

        let mut session = PageSession::new(page.location);
        let mut navigator = VersionNavigator::new();
        if let Some(EmbeddedData::Recipe {
            recipe_id,
            versions,
            ..
        }) = page.embedded
        {
            session.recipe_id = Some(recipe_id);
            navigator.set_listing(VersionListing::Listed(versions));
        }

        let model = Self {
            backend,
            session,
            navigator,
            displayed: None,
            deleting: false,
            recipe,
            versions,
        };

        let widgets = view_output!();

        sender.input(RecipeViewMsg::Start(trigger, interim));

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, root: &Self::Root) {
        match msg {
            RecipeViewMsg::Start(trigger, interim) => {
                match trigger {
                    InitialTrigger::Fetch(version_id) => {
                        // Not adopted: the list marks nothing until the fetch lands.
                        if let Some(version) = interim {
                            self.session.version_id = Some(version.id);
                            self.show(version.content);
                        }
                        self.fetch_version(version_id, &sender);
                    }
                    InitialTrigger::Adopt(version) => {
                        let location = self
                            .navigator
                            .adopt_into(&mut self.session, Some(version.id));
                        let _ = sender.output(PageOutput::ReplaceLocation(location));
                        self.show(version.content);
                    }
                    other => tracing::debug!("View page has nothing to show for {:?}", other),
                }
                self.render_versions();
            }
            RecipeViewMsg::SelectVersion(version_id) => {
                self.fetch_version(version_id, &sender);
            }
            RecipeViewMsg::Edit => {
                let (Some(link), Some(recipe_id), Some(content)) = (
                    self.session.edit_link(),
                    self.session.recipe_id,
                    self.displayed.clone(),
                ) else {
                    return;
                };
                let carried = EmbeddedData::EditRecipe {
                    recipe_id,
                    version_id: self.session.version_id,
                    content,
                };
                let _ = sender.output(PageOutput::Navigate(link, Some(carried)));
            }
            RecipeViewMsg::Delete => {
                let title = self
                    .displayed
                    .as_ref()
                    .map(|content| content.title.clone())
                    .unwrap_or_default();
                let sender_dlg = sender.input_sender().clone();
                confirm(
                    root,
                    "Delete Recipe?",
                    &format!("Are you sure you want to delete \"{}\"?", title),
                    "Delete",
                    move || sender_dlg.emit(RecipeViewMsg::ConfirmDelete),
                );
            }
            RecipeViewMsg::ConfirmDelete => {
                let Some(recipe_id) = self.session.recipe_id else {
                    return;
                };
                self.deleting = true;
                let _ = sender.output(PageOutput::Busy(true));
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    RecipeViewCmd::Deleted(delete(backend, recipe_id).await)
                });
            }
            RecipeViewMsg::Print => {
                let Some(content) = &self.displayed else {
                    return;
                };
                if let Err(e) = print(&RecipeDisplay::from(content)) {
                    tracing::error!("Failed to print recipe: {:#}", e);
                    let _ = sender.output(PageOutput::Notify(
                        "Failed to open the print view".to_string(),
                        Severity::Error,
                    ));
                }
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
            RecipeViewCmd::VersionLoaded(version_id, Ok(version)) => {
                if !self.navigator.apply_loaded(&version) {
                    return;
                }
                let location = self.session.adopt_version(Some(version_id));
                let _ = sender.output(PageOutput::ReplaceLocation(location));
                self.show(version.content);
                self.render_versions();
            }
            RecipeViewCmd::VersionLoaded(version_id, Err(e)) => {
                if let Some(message) = self.navigator.apply_failure(version_id, &e) {
                    self.recipe.emit(RecipeContentMsg::ShowError(message));
                }
                if e.is_signed_out() {
                    let _ = sender.output(PageOutput::SignedOut);
                }
            }
            RecipeViewCmd::Deleted(result) => {
                self.deleting = false;
                let _ = sender.output(PageOutput::Busy(false));
                match result {
                    Ok(message) => {
                        if let Some(message) = message {
                            let _ = sender.output(PageOutput::Notify(message, Severity::Success));
                        }
                        let _ = sender.output(PageOutput::RecipesChanged);
                        let _ = sender.output(PageOutput::Navigate(Location::root(), None));
                    }
                    Err(e) => {
                        tracing::warn!("Failed to delete recipe: {}", e);
                        let _ = sender.output(PageOutput::Notify(
                            e.message_or(DELETE_FAILED),
                            Severity::Error,
                        ));
                        if e.is_signed_out() {
                            let _ = sender.output(PageOutput::SignedOut);
                        }
                    }
                }
            }
        }
    }
}

impl RecipeViewPage {
    fn fetch_version(&mut self, version_id: VersionId, sender: &ComponentSender<Self>) {
        let version_id = self.navigator.request(version_id);
        let backend = self.backend.clone();
        sender.oneshot_command(async move {
            RecipeViewCmd::VersionLoaded(version_id, backend.version(version_id).await)
        });
    }

    fn render_versions(&self) {
        self.versions
            .emit(VersionListMsg::Show(self.navigator.list_view()));
    }

    fn show(&mut self, content: RecipeContent) {
        self.recipe
            .emit(RecipeContentMsg::Show(RecipeDisplay::from(&content)));
        self.displayed = Some(content);
    }
}

async fn delete(
    backend: Arc<dyn RecipeBackend>,
    recipe_id: RecipeId,
) -> Result<Option<String>, ApiError> {
    tracing::info!("Deleting recipe {}", recipe_id);
    backend.delete_recipe(recipe_id).await
}

/// Write the print page to the cache directory and hand it to the
/// desktop's default browser.
fn print(recipe: &RecipeDisplay) -> anyhow::Result<()> {
    let dir = glib::user_cache_dir()
        .join(APP_NAME.to_lowercase())
        .join("print");
    let path = export::write_print_page(recipe, &dir)?;
    let uri = glib::filename_to_uri(&path, None).context("Invalid print page path")?;
    gio::AppInfo::launch_default_for_uri(&uri, None::<&gio::AppLaunchContext>)
        .context("No application can open the print page")?;
    tracing::info!("Opened print page {}", path.display());
    Ok(())
}
