use gtk::prelude::*;
use relm4::factory::FactoryVecDeque;
use relm4::prelude::*;

use crate::models::VersionId;
use crate::services::navigator::{VersionEntry, VersionListView};

#[derive(Debug)]
pub struct VersionRow {
    entry: VersionEntry,
}

#[relm4::factory(pub)]
impl FactoryComponent for VersionRow {
    type Init = VersionEntry;
    type Input = ();
    type Output = ();
    type CommandOutput = ();
    type ParentWidget = gtk::ListBox;

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 2,
            set_margin_all: 6,
            add_css_class: "version-row",
            set_class_active: ("active", self.entry.active),

            gtk::Label {
                set_label: &self.entry.label,
                set_xalign: 0.0,
                add_css_class: "heading",
            },

            gtk::Label {
                set_label: &self.entry.title,
                set_xalign: 0.0,
                set_ellipsize: gtk::pango::EllipsizeMode::End,
                add_css_class: "dim-label",
                add_css_class: "caption",
            },
        }
    }

    fn init_model(entry: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self { entry }
    }
}

/// Version history beside a recipe; reports which version was picked.
pub struct VersionList {
    rows: FactoryVecDeque<VersionRow>,
    message: Option<(&'static str, bool)>,
}

#[derive(Debug)]
pub enum VersionListMsg {
    Show(VersionListView),
    Activated(usize),
}

#[derive(Debug)]
pub enum VersionListOutput {
    Selected(VersionId),
}

#[relm4::component(pub)]
impl Component for VersionList {
    type Init = ();
    type Input = VersionListMsg;
    type Output = VersionListOutput;
    type CommandOutput = ();

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 6,

            gtk::Label {
                set_label: "Versions",
                set_xalign: 0.0,
                add_css_class: "heading",
            },

            gtk::Label {
                set_wrap: true,
                set_xalign: 0.0,
                #[watch]
                set_visible: model.message.is_some(),
                #[watch]
                set_label: model.message.map(|(text, _)| text).unwrap_or_default(),
                #[watch]
                set_class_active: ("inline-error", model.message.is_some_and(|(_, error)| error)),
                #[watch]
                set_class_active: ("dim-label", model.message.is_some_and(|(_, error)| !error)),
            },

            #[local_ref]
            version_list -> gtk::ListBox {
                set_selection_mode: gtk::SelectionMode::None,
                add_css_class: "navigation-sidebar",
                #[watch]
                set_visible: model.message.is_none(),
            },
        }
    }

    fn init(
        _init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let rows = FactoryVecDeque::builder()
            .launch(gtk::ListBox::default())
            .detach();

        let model = Self {
            rows,
            message: None,
        };

        let version_list = model.rows.widget();
        let widgets = view_output!();

        let sender_row = sender.input_sender().clone();
        model.rows.widget().connect_row_activated(move |_, row| {
            sender_row.emit(VersionListMsg::Activated(row.index() as usize));
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            VersionListMsg::Show(view) => {
                let mut guard = self.rows.guard();
                guard.clear();
                self.message = match view {
                    VersionListView::Entries(entries) => {
                        for entry in entries {
                            guard.push_back(entry);
                        }
                        None
                    }
                    VersionListView::Placeholder(text) => Some((text, false)),
                    VersionListView::Error(text) => Some((text, true)),
                };
            }
            VersionListMsg::Activated(index) => {
                let id = self.rows.guard().get(index).map(|row| row.entry.id);
                if let Some(id) = id {
                    let _ = sender.output(VersionListOutput::Selected(id));
                }
            }
        }
    }
}
