use std::sync::Arc;

use gtk::prelude::*;
use relm4::factory::FactoryVecDeque;
use relm4::prelude::*;

use crate::api::{ApiError, PantryUpdate, RecipeBackend};
use crate::models::PantryItem;
use crate::services::pantry::{parse_pantry_input, PantryView};
use crate::services::toast::Severity;
use crate::ui::{confirm, PageOutput};

// --- PantryChip factory component ---

#[derive(Debug)]
pub struct PantryChip {
    item: PantryItem,
}

#[derive(Debug)]
pub enum PantryChipOutput {
    Remove(i64, String),
}

#[relm4::factory(pub)]
impl FactoryComponent for PantryChip {
    type Init = PantryItem;
    type Input = ();
    type Output = PantryChipOutput;
    type CommandOutput = ();
    type ParentWidget = gtk::FlowBox;

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Horizontal,
            set_spacing: 4,
            add_css_class: "pantry-chip",

            gtk::Label {
                set_label: &self.item.name,
            },

            gtk::Button {
                set_icon_name: "window-close-symbolic",
                set_tooltip_text: Some("Remove item"),
                add_css_class: "flat",
                add_css_class: "circular",
                set_visible: self.item.is_removable(),
                connect_clicked[sender, item = self.item.clone()] => move |_| {
                    if let Some(id) = item.id {
                        let _ = sender.output(PantryChipOutput::Remove(id, item.name.clone()));
                    }
                },
            },
        }
    }

    fn init_model(item: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self { item }
    }
}

// --- PantryPage component ---

/// `/pantry`: what the user has on hand, used when generating recipes.
pub struct PantryPage {
    backend: Arc<dyn RecipeBackend>,
    view: PantryView,
    chips: FactoryVecDeque<PantryChip>,
    input: gtk::TextBuffer,
    adding: bool,
}

#[derive(Debug)]
pub enum PantryMsg {
    Load,
    Add,
    Remove(i64, String),
    ConfirmRemove(i64),
}

#[derive(Debug)]
pub enum PantryCmd {
    Loaded(Result<Vec<PantryItem>, ApiError>),
    Added(Result<PantryUpdate, ApiError>),
    Removed(Result<PantryUpdate, ApiError>),
}

#[relm4::component(pub)]
impl Component for PantryPage {
    type Init = Arc<dyn RecipeBackend>;
    type Input = PantryMsg;
    type Output = PageOutput;
    type CommandOutput = PantryCmd;

    view! {
        gtk::ScrolledWindow {
            set_hscrollbar_policy: gtk::PolicyType::Never,
            set_vexpand: true,

            adw::Clamp {
                set_maximum_size: 640,
                set_margin_top: 24,
                set_margin_bottom: 24,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 18,
                    set_margin_start: 12,
                    set_margin_end: 12,

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,

                        gtk::Label {
                            set_label: "My Pantry",
                            set_hexpand: true,
                            set_xalign: 0.0,
                            add_css_class: "title-2",
                        },

                        gtk::Label {
                            add_css_class: "dim-label",
                            #[watch]
                            set_label: &model.view.count_label().unwrap_or_default(),
                        },
                    },

                    gtk::Label {
                        set_wrap: true,
                        #[watch]
                        set_visible: model.view.placeholder().is_some(),
                        #[watch]
                        set_label: &model.view.placeholder().unwrap_or_default(),
                        #[watch]
                        set_class_active: ("inline-error", matches!(model.view, PantryView::Error(_))),
                        #[watch]
                        set_class_active: ("dim-label", !matches!(model.view, PantryView::Error(_))),
                    },

                    #[local_ref]
                    chip_box -> gtk::FlowBox {
                        set_selection_mode: gtk::SelectionMode::None,
                        set_column_spacing: 6,
                        set_row_spacing: 6,
                        set_homogeneous: false,
                        #[watch]
                        set_visible: matches!(model.view, PantryView::Items(_)),
                    },

                    gtk::Label {
                        set_label: "Add ingredients, separated by commas or new lines",
                        set_xalign: 0.0,
                        add_css_class: "heading",
                    },

                    gtk::TextView {
                        set_buffer: Some(&model.input),
                        set_wrap_mode: gtk::WrapMode::WordChar,
                        set_height_request: 80,
                        set_top_margin: 8,
                        set_bottom_margin: 8,
                        set_left_margin: 8,
                        set_right_margin: 8,
                        add_css_class: "card",
                        #[watch]
                        set_sensitive: !model.adding,
                    },

                    gtk::Button {
                        set_halign: gtk::Align::End,
                        add_css_class: "suggested-action",
                        #[watch]
                        set_label: if model.adding { "Adding..." } else { "Add to Pantry" },
                        #[watch]
                        set_sensitive: !model.adding,
                        connect_clicked => PantryMsg::Add,
                    },
                },
            },
        }
    }

    fn init(
        backend: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let chips = FactoryVecDeque::builder()
            .launch(gtk::FlowBox::default())
            .forward(sender.input_sender(), |output| match output {
                PantryChipOutput::Remove(id, name) => PantryMsg::Remove(id, name),
            });

        let model = Self {
            backend,
            view: PantryView::Loading,
            chips,
            input: gtk::TextBuffer::new(None::<&gtk::TextTagTable>),
            adding: false,
        };

        let chip_box = model.chips.widget();
        let widgets = view_output!();

        sender.input(PantryMsg::Load);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, root: &Self::Root) {
        match msg {
            PantryMsg::Load => {
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    PantryCmd::Loaded(backend.pantry_items().await)
                });
            }
            PantryMsg::Add => {
                let text = self
                    .input
                    .text(&self.input.start_iter(), &self.input.end_iter(), false)
                    .to_string();
                let items = match parse_pantry_input(&text) {
                    Ok(items) => items,
                    Err(message) => {
                        let _ = sender.output(PageOutput::Notify(message.to_string(), Severity::Error));
                        return;
                    }
                };
                self.adding = true;
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    PantryCmd::Added(backend.add_pantry_items(&items).await)
                });
            }
            PantryMsg::Remove(id, name) => {
                let sender_dlg = sender.input_sender().clone();
                confirm(
                    root,
                    "Remove Item?",
                    &format!("Remove \"{}\" from your pantry?", name),
                    "Remove",
                    move || sender_dlg.emit(PantryMsg::ConfirmRemove(id)),
                );
            }
            PantryMsg::ConfirmRemove(id) => {
                let backend = self.backend.clone();
                sender.oneshot_command(async move {
                    PantryCmd::Removed(backend.remove_pantry_item(id).await)
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
            PantryCmd::Loaded(result) => {
                self.view = match result {
                    Ok(items) => PantryView::from_items(items),
                    Err(e) => {
                        tracing::warn!("Failed to load pantry: {}", e);
                        if e.is_signed_out() {
                            let _ = sender.output(PageOutput::SignedOut);
                        }
                        PantryView::Error(e.message_or("Failed to load pantry"))
                    }
                };
                let mut guard = self.chips.guard();
                guard.clear();
                if let PantryView::Items(items) = &self.view {
                    for item in items {
                        guard.push_back(item.clone());
                    }
                }
            }
            PantryCmd::Added(result) => {
                self.adding = false;
                if self.report(result, "Items added successfully!", "Error adding items", &sender) {
                    self.input.set_text("");
                }
            }
            PantryCmd::Removed(result) => {
                self.report(result, "Item removed successfully!", "Error removing item", &sender);
            }
        }
    }
}

impl PantryPage {
    /// Toast the outcome of a change and reload on success.
    fn report(
        &self,
        result: Result<PantryUpdate, ApiError>,
        success: &str,
        failure: &str,
        sender: &ComponentSender<Self>,
    ) -> bool {
        match result {
            Ok(update) => {
                let message = update.message.unwrap_or_else(|| success.to_string());
                let _ = sender.output(PageOutput::Notify(message, Severity::Success));
                sender.input(PantryMsg::Load);
                true
            }
            Err(e) => {
                tracing::warn!("Pantry update failed: {}", e);
                let _ = sender.output(PageOutput::Notify(e.message_or(failure), Severity::Error));
                if e.is_signed_out() {
                    let _ = sender.output(PageOutput::SignedOut);
                }
                false
            }
        }
    }
}
