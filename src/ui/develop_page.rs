use std::sync::Arc;

use gtk::prelude::*;
use relm4::factory::FactoryVecDeque;
use relm4::prelude::*;

use crate::api::{ApiError, GenerateResponse, RecipeBackend};
use crate::models::{ConversationTurn, RecipeContent, RecipeVersion, Role, VersionId, VersionSummary};
use crate::services::display::RecipeDisplay;
use crate::services::generator::{Generation, RecipeGenerator};
use crate::services::loader::PageContent;
use crate::services::navigator::{InitialTrigger, VersionListing, VersionNavigator};
use crate::services::session::PageSession;
use crate::ui::recipe_content::{RecipeContentMsg, RecipeContentView};
use crate::ui::version_list::{VersionList, VersionListMsg, VersionListOutput};
use crate::ui::PageOutput;

const START_HINT: &str = "Start a conversation to generate a recipe...";

// --- ChatBubble factory component ---

#[derive(Debug)]
pub struct ChatBubble {
    turn: ConversationTurn,
}

#[relm4::factory(pub)]
impl FactoryComponent for ChatBubble {
    type Init = ConversationTurn;
    type Input = ();
    type Output = ();
    type CommandOutput = ();
    type ParentWidget = gtk::Box;

    view! {
        gtk::Box {
            set_margin_bottom: 10,
            set_halign: match self.turn.role {
                Role::User => gtk::Align::End,
                Role::Assistant => gtk::Align::Start,
                Role::System => gtk::Align::Center,
            },

            gtk::Label {
                set_label: &self.turn.text,
                set_wrap: true,
                set_wrap_mode: gtk::pango::WrapMode::WordChar,
                set_max_width_chars: 60,
                set_xalign: 0.0,
                set_selectable: true,
                add_css_class: "chat-bubble",
                add_css_class: self.turn.role.as_str(),
            },
        }
    }

    fn init_model(turn: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self { turn }
    }
}

// --- DevelopPage component ---

pub struct DevelopInit {
    pub backend: Arc<dyn RecipeBackend>,
    pub page: PageContent,
}

/// Chat on the left, the recipe being developed and its versions on the
/// right. Also serves `/recipes/{id}/edit`, seeded with the recipe.
pub struct DevelopPage {
    backend: Arc<dyn RecipeBackend>,
    session: PageSession,
    generator: RecipeGenerator,
    navigator: VersionNavigator,
    turns: FactoryVecDeque<ChatBubble>,
    recipe: Controller<RecipeContentView>,
    versions: Controller<VersionList>,
    prompt: gtk::Entry,
    chat_scroll: gtk::ScrolledWindow,
}

#[derive(Debug)]
pub enum DevelopMsg {
    Start(InitialTrigger),
    Send,
    SelectVersion(VersionId),
    Back,
}

#[derive(Debug)]
pub enum DevelopCmd {
    Generated(Result<GenerateResponse, ApiError>),
    VersionLoaded(VersionId, Result<RecipeVersion, ApiError>),
    VersionsListed(Result<Vec<VersionSummary>, ApiError>),
}

#[relm4::component(pub)]
impl Component for DevelopPage {
    type Init = DevelopInit;
    type Input = DevelopMsg;
    type Output = PageOutput;
    type CommandOutput = DevelopCmd;

    view! {
        gtk::Paned {
            set_orientation: gtk::Orientation::Horizontal,
            set_wide_handle: true,
            set_shrink_start_child: false,
            set_shrink_end_child: false,
            set_position: 420,

            #[wrap(Some)]
            set_start_child = &gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_width_request: 320,

                #[local_ref]
                chat_scroll -> gtk::ScrolledWindow {
                    set_vexpand: true,
                    set_hscrollbar_policy: gtk::PolicyType::Never,

                    #[local_ref]
                    turn_list -> gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_margin_all: 16,
                    },
                },

                gtk::Separator {
                    set_orientation: gtk::Orientation::Horizontal,
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 8,
                    set_margin_all: 12,

                    #[local_ref]
                    prompt -> gtk::Entry {
                        set_hexpand: true,
                        set_placeholder_text: Some("Describe the recipe you want..."),
                        #[watch]
                        set_sensitive: !model.generator.is_busy(),
                        connect_activate => DevelopMsg::Send,
                    },

                    gtk::Button {
                        add_css_class: "suggested-action",
                        #[watch]
                        set_label: if model.generator.is_busy() { "Sending..." } else { "Send" },
                        #[watch]
                        set_sensitive: !model.generator.is_busy(),
                        connect_clicked => DevelopMsg::Send,
                    },
                },
            },

            #[wrap(Some)]
            set_end_child = &gtk::Overlay {
                set_width_request: 320,

                gtk::ScrolledWindow {
                    set_vexpand: true,
                    set_hscrollbar_policy: gtk::PolicyType::Never,

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 12,
                        set_margin_bottom: 18,

                        gtk::Button {
                            set_halign: gtk::Align::Start,
                            set_margin_start: 12,
                            set_margin_top: 12,
                            add_css_class: "flat",
                            #[watch]
                            set_visible: model.session.view_link().is_some(),
                            #[watch]
                            set_sensitive: !model.generator.is_busy(),
                            connect_clicked => DevelopMsg::Back,

                            #[wrap(Some)]
                            set_child = &adw::ButtonContent {
                                set_icon_name: "go-previous-symbolic",
                                set_label: "Back to recipe",
                            },
                        },

                        model.recipe.widget().clone(),

                        gtk::Box {
                            set_margin_start: 18,
                            set_margin_end: 18,
                            #[watch]
                            set_sensitive: !model.generator.is_busy(),

                            model.versions.widget().clone(),
                        },
                    },
                },

                add_overlay = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 12,
                    set_halign: gtk::Align::Fill,
                    set_valign: gtk::Align::Fill,
                    add_css_class: "loading-overlay",
                    #[watch]
                    set_visible: model.generator.is_busy(),

                    gtk::Spinner {
                        set_spinning: true,
                        set_vexpand: true,
                        set_valign: gtk::Align::End,
                        set_width_request: 32,
                        set_height_request: 32,
                    },

                    gtk::Label {
                        set_label: "Generating your recipe...",
                        set_vexpand: true,
                        set_valign: gtk::Align::Start,
                    },
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let DevelopInit { backend, page } = init;

        let turns = FactoryVecDeque::builder()
            .launch(gtk::Box::default())
            .detach();

        let recipe = RecipeContentView::builder()
            .launch(START_HINT.to_string())
            .detach();

        let versions = VersionList::builder()
            .launch(())
            .forward(sender.input_sender(), |output| match output {
                VersionListOutput::Selected(id) => DevelopMsg::SelectVersion(id),
            });

        let trigger = InitialTrigger::select(page.embedded.as_ref(), &page.location);

        let model = Self {
            backend,
            session: PageSession::new(page.location),
            generator: RecipeGenerator::new(),
            navigator: VersionNavigator::new(),
            turns,
            recipe,
            versions,
            prompt: gtk::Entry::new(),
            chat_scroll: gtk::ScrolledWindow::new(),
        };

        let turn_list = model.turns.widget();
        let prompt = &model.prompt;
        let chat_scroll = &model.chat_scroll;
        let widgets = view_output!();

        sender.input(DevelopMsg::Start(trigger));

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            DevelopMsg::Start(trigger) => match trigger {
                InitialTrigger::Embedded {
                    recipe_id,
                    version_id,
                    content,
                } => {
                    self.session.recipe_id = Some(recipe_id);
                    self.navigator.adopt(version_id);
                    let location = self.session.adopt_version(version_id);
                    let _ = sender.output(PageOutput::ReplaceLocation(location));
                    self.show_editing(&content);
                    self.reload_versions(&sender);
                }
                InitialTrigger::Fetch(version_id) => {
                    self.render_versions();
                    self.fetch_version(version_id, &sender);
                }
                InitialTrigger::Adopt(version) => {
                    self.session.recipe_id = version.recipe_id;
                    self.navigator.adopt(Some(version.id));
                    self.session.version_id = Some(version.id);
                    self.show_editing(&version.content);
                    self.reload_versions(&sender);
                }
                InitialTrigger::None => {
                    self.render_versions();
                    self.prompt.grab_focus();
                }
            },
            DevelopMsg::Send => {
                let text = self.prompt.text().to_string();
                let Some(request) = self.generator.begin(&text, &mut self.session) else {
                    return;
                };
                self.show_last_turn();
                self.prompt.set_text("");
                let _ = sender.output(PageOutput::Busy(true));

                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    DevelopCmd::Generated(backend.generate(request).await)
                });
            }
            DevelopMsg::SelectVersion(version_id) => {
                if self.generator.is_busy() {
                    return;
                }
                self.fetch_version(version_id, &sender);
            }
            DevelopMsg::Back => {
                if let Some(link) = self.session.view_link() {
                    let _ = sender.output(PageOutput::Navigate(link, None));
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
            DevelopCmd::Generated(result) => {
                let generation = self.generator.finish(result, &mut self.session);
                self.show_last_turn();
                match generation {
                    Generation::Generated {
                        content,
                        version_id,
                        location,
                        ..
                    } => {
                        self.recipe
                            .emit(RecipeContentMsg::Show(RecipeDisplay::from(&content)));
                        self.navigator.adopt(version_id);
                        let _ = sender.output(PageOutput::ReplaceLocation(location));
                        self.reload_versions(&sender);
                        let _ = sender.output(PageOutput::RecipesChanged);
                    }
                    Generation::Failed { signed_out, .. } => {
                        if signed_out {
                            let _ = sender.output(PageOutput::SignedOut);
                        }
                    }
                }
                let _ = sender.output(PageOutput::Busy(false));
                self.prompt.grab_focus();
            }
            DevelopCmd::VersionLoaded(version_id, Ok(version)) => {
                if !self.navigator.apply_loaded(&version) {
                    return;
                }
                self.session.recipe_id = version.recipe_id.or(self.session.recipe_id);
                let location = self.session.adopt_version(Some(version_id));
                let _ = sender.output(PageOutput::ReplaceLocation(location));
                self.show_editing(&version.content);
                // The recipe may only be known now that its version arrived.
                if *self.navigator.listing() == VersionListing::NoRecipe {
                    self.reload_versions(&sender);
                } else {
                    self.render_versions();
                }
            }
            DevelopCmd::VersionLoaded(version_id, Err(e)) => {
                if let Some(message) = self.navigator.apply_failure(version_id, &e) {
                    self.recipe.emit(RecipeContentMsg::ShowError(message));
                }
                if e.is_signed_out() {
                    let _ = sender.output(PageOutput::SignedOut);
                }
            }
            DevelopCmd::VersionsListed(result) => {
                if let Err(e) = &result {
                    if e.is_signed_out() {
                        let _ = sender.output(PageOutput::SignedOut);
                    }
                }
                self.navigator.apply_listing(result);
                self.render_versions();
            }
        }
    }
}

impl DevelopPage {
    fn fetch_version(&mut self, version_id: VersionId, sender: &ComponentSender<Self>) {
        let version_id = self.navigator.request(version_id);
        let backend = self.backend.clone();
        sender.oneshot_command(async move {
            DevelopCmd::VersionLoaded(version_id, backend.version(version_id).await)
        });
    }

    fn reload_versions(&mut self, sender: &ComponentSender<Self>) {
        let Some(recipe_id) = self.session.recipe_id else {
            self.navigator.set_listing(VersionListing::NoRecipe);
            self.render_versions();
            return;
        };
        self.navigator.set_listing(VersionListing::Loading);
        self.render_versions();

        let backend = self.backend.clone();
        sender.oneshot_command(async move {
            DevelopCmd::VersionsListed(backend.list_versions(recipe_id).await)
        });
    }

    fn render_versions(&self) {
        self.versions
            .emit(VersionListMsg::Show(self.navigator.list_view()));
    }

    fn show_editing(&mut self, content: &RecipeContent) {
        self.recipe
            .emit(RecipeContentMsg::Show(RecipeDisplay::from(content)));
        self.session
            .push_turn(Role::System, format!("Editing recipe: {}", content.title));
        self.show_last_turn();
    }

    fn show_last_turn(&mut self) {
        if let Some(turn) = self.session.conversation.last() {
            self.turns.guard().push_back(turn.clone());
        }
        let scroll = self.chat_scroll.clone();
        glib::idle_add_local_once(move || {
            let adjustment = scroll.vadjustment();
            adjustment.set_value(adjustment.upper() - adjustment.page_size());
        });
    }
}
