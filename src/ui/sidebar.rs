use std::sync::Arc;

use adw::prelude::*;
use relm4::factory::FactoryVecDeque;
use relm4::prelude::*;

use crate::api::{ApiError, RecipeBackend};
use crate::models::RecipeSummary;
use crate::services::location::Location;
use crate::services::sidebar::{RecipeIndex, SidebarEntry, SidebarView};

// --- RecipeRow factory component ---

#[derive(Debug)]
pub struct RecipeRow {
    pub entry: SidebarEntry,
}

#[relm4::factory(pub)]
impl FactoryComponent for RecipeRow {
    type Init = SidebarEntry;
    type Input = ();
    type Output = ();
    type CommandOutput = ();
    type ParentWidget = gtk::ListBox;

    view! {
        gtk::Box {
            set_margin_all: 6,
            add_css_class: "sidebar-recipe",
            set_class_active: ("active", self.entry.active),

            gtk::Label {
                set_label: &self.entry.title,
                set_halign: gtk::Align::Start,
                set_ellipsize: gtk::pango::EllipsizeMode::End,
                set_max_width_chars: 30,
            },
        }
    }

    fn init_model(entry: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self { entry }
    }
}

// --- Sidebar component ---

pub struct Sidebar {
    backend: Option<Arc<dyn RecipeBackend>>,
    index: RecipeIndex,
    location: Location,
    recipes: FactoryVecDeque<RecipeRow>,
    message: Option<(&'static str, bool)>,
    sensitive: bool,
}

#[derive(Debug)]
pub enum SidebarMsg {
    Reload,
    SetBackend(Arc<dyn RecipeBackend>),
    SetLocation(Location),
    SetSensitive(bool),
    SearchChanged(String),
    RecipeActivated(usize),
    NewRecipe,
    OpenPantry,
}

#[derive(Debug)]
pub enum SidebarOutput {
    Navigate(Location),
    SignedOut,
}

#[derive(Debug)]
pub enum SidebarCmd {
    Loaded(Result<Vec<RecipeSummary>, ApiError>),
}

#[relm4::component(pub)]
impl Component for Sidebar {
    type Init = ();
    type Input = SidebarMsg;
    type Output = SidebarOutput;
    type CommandOutput = SidebarCmd;

    view! {
        adw::ToolbarView {
            #[watch]
            set_sensitive: model.sensitive,

            add_top_bar = &adw::HeaderBar {
                set_show_end_title_buttons: false,

                pack_start = &gtk::Button {
                    set_icon_name: "list-add-symbolic",
                    set_tooltip_text: Some("New Recipe"),
                    connect_clicked => SidebarMsg::NewRecipe,
                },

                pack_end = &gtk::Button {
                    set_icon_name: "view-list-bullet-symbolic",
                    set_tooltip_text: Some("Pantry"),
                    connect_clicked => SidebarMsg::OpenPantry,
                },

                #[wrap(Some)]
                set_title_widget = &adw::WindowTitle {
                    set_title: "Recipes",
                },
            },

            #[wrap(Some)]
            set_content = &gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 0,

                gtk::SearchEntry {
                    set_placeholder_text: Some("Search recipes..."),
                    set_margin_start: 8,
                    set_margin_end: 8,
                    set_margin_top: 4,
                    set_margin_bottom: 4,
                    connect_search_changed[sender] => move |entry| {
                        sender.input(SidebarMsg::SearchChanged(entry.text().to_string()));
                    },
                },

                gtk::Label {
                    set_margin_all: 12,
                    set_wrap: true,
                    #[watch]
                    set_visible: model.message.is_some(),
                    #[watch]
                    set_label: model.message.map(|(text, _)| text).unwrap_or_default(),
                    #[watch]
                    set_class_active: ("inline-error", model.message.is_some_and(|(_, error)| error)),
                    #[watch]
                    set_class_active: ("dim-label", model.message.is_some_and(|(_, error)| !error)),
                },

                gtk::ScrolledWindow {
                    set_hscrollbar_policy: gtk::PolicyType::Never,
                    set_vexpand: true,

                    #[local_ref]
                    recipe_list -> gtk::ListBox {
                        set_selection_mode: gtk::SelectionMode::None,
                        add_css_class: "navigation-sidebar",
                    },
                },
            },
        }
    }

    fn init(
        _init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let recipes = FactoryVecDeque::builder()
            .launch(gtk::ListBox::default())
            .detach();

        let model = Self {
            backend: None,
            index: RecipeIndex::new(),
            location: Location::root(),
            recipes,
            message: None,
            sensitive: true,
        };

        let recipe_list = model.recipes.widget();
        let widgets = view_output!();

        let sender_row = sender.input_sender().clone();
        model.recipes.widget().connect_row_activated(move |_, row| {
            sender_row.emit(SidebarMsg::RecipeActivated(row.index() as usize));
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            SidebarMsg::Reload => {
                let Some(backend) = self.backend.clone() else {
                    return;
                };
                sender.oneshot_command(async move {
                    SidebarCmd::Loaded(backend.list_recipes().await)
                });
            }
            SidebarMsg::SetBackend(backend) => {
                self.backend = Some(backend);
            }
            SidebarMsg::SetLocation(location) => {
                self.location = location;
                self.render();
            }
            SidebarMsg::SetSensitive(sensitive) => {
                self.sensitive = sensitive;
            }
            SidebarMsg::SearchChanged(query) => {
                self.index.set_query(&query);
                self.render();
            }
            SidebarMsg::RecipeActivated(index) => {
                let id = self.recipes.guard().get(index).map(|row| row.entry.id);
                if let Some(id) = id {
                    let _ = sender.output(SidebarOutput::Navigate(Location::recipe(id)));
                }
            }
            SidebarMsg::NewRecipe => {
                let _ = sender.output(SidebarOutput::Navigate(Location::root()));
            }
            SidebarMsg::OpenPantry => {
                let _ = sender.output(SidebarOutput::Navigate(Location::pantry()));
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
            SidebarCmd::Loaded(Ok(recipes)) => {
                tracing::debug!("Loaded {} recipes", recipes.len());
                self.index.apply_loaded(recipes);
            }
            SidebarCmd::Loaded(Err(e)) => {
                tracing::warn!("Failed to load recipes: {}", e);
                self.index.apply_failure();
                if e.is_signed_out() {
                    let _ = sender.output(SidebarOutput::SignedOut);
                }
            }
        }
        // An active search is re-applied over the fresh snapshot.
        self.render();
    }
}

impl Sidebar {
    fn render(&mut self) {
        let mut guard = self.recipes.guard();
        guard.clear();
        self.message = match self.index.view(&self.location) {
            SidebarView::Entries(entries) => {
                for entry in entries {
                    guard.push_back(entry);
                }
                None
            }
            SidebarView::Placeholder(text) => Some((text, false)),
            SidebarView::Error(text) => Some((text, true)),
        };
    }
}
