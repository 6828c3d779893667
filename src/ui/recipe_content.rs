use gtk::prelude::*;
use relm4::prelude::*;

use crate::services::display::RecipeDisplay;
use crate::ui::clear_box;

/// The recipe body: title, description, ingredients, steps and tips.
pub struct RecipeContentView {
    recipe: Option<RecipeDisplay>,
    placeholder: String,
    error: Option<String>,
    ingredients_box: gtk::Box,
    steps_box: gtk::Box,
}

#[derive(Debug)]
pub enum RecipeContentMsg {
    Show(RecipeDisplay),
    /// Inline failure; whatever was displayed stays.
    ShowError(String),
}

#[relm4::component(pub)]
impl Component for RecipeContentView {
    type Init = String;
    type Input = RecipeContentMsg;
    type Output = ();
    type CommandOutput = ();

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 12,
            set_margin_all: 18,

            gtk::Label {
                add_css_class: "inline-error",
                set_wrap: true,
                set_xalign: 0.0,
                #[watch]
                set_visible: model.error.is_some(),
                #[watch]
                set_label: model.error.as_deref().unwrap_or_default(),
            },

            gtk::Label {
                add_css_class: "dim-label",
                set_wrap: true,
                set_xalign: 0.0,
                set_label: &model.placeholder,
                #[watch]
                set_visible: model.recipe.is_none(),
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                #[watch]
                set_visible: model.recipe.is_some(),

                gtk::Label {
                    add_css_class: "title-2",
                    set_wrap: true,
                    set_xalign: 0.0,
                    set_selectable: true,
                    #[watch]
                    set_label: model.recipe.as_ref().map(|r| r.title.as_str()).unwrap_or_default(),
                },

                gtk::Label {
                    set_wrap: true,
                    set_xalign: 0.0,
                    set_selectable: true,
                    #[watch]
                    set_visible: model.description().is_some(),
                    #[watch]
                    set_label: model.description().unwrap_or_default(),
                },

                gtk::Label {
                    set_label: "Ingredients",
                    set_xalign: 0.0,
                    add_css_class: "heading",
                },

                #[local_ref]
                ingredients_box -> gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 4,
                },

                gtk::Label {
                    set_label: "Steps",
                    set_xalign: 0.0,
                    add_css_class: "heading",
                },

                #[local_ref]
                steps_box -> gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 6,
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 6,
                    add_css_class: "recipe-tips",
                    #[watch]
                    set_visible: model.tips().is_some(),

                    gtk::Label {
                        set_label: "Tips",
                        set_xalign: 0.0,
                        add_css_class: "heading",
                    },

                    gtk::Label {
                        set_wrap: true,
                        set_xalign: 0.0,
                        set_selectable: true,
                        #[watch]
                        set_label: model.tips().unwrap_or_default(),
                    },
                },
            },
        }
    }

    fn init(
        placeholder: Self::Init,
        root: Self::Root,
        _sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = Self {
            recipe: None,
            placeholder,
            error: None,
            ingredients_box: gtk::Box::new(gtk::Orientation::Vertical, 4),
            steps_box: gtk::Box::new(gtk::Orientation::Vertical, 6),
        };

        let ingredients_box = &model.ingredients_box;
        let steps_box = &model.steps_box;
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            RecipeContentMsg::Show(recipe) => {
                self.error = None;
                fill_lines(&self.ingredients_box, &recipe.ingredients, |_, line| {
                    format!("•  {}", line)
                });
                fill_lines(&self.steps_box, &recipe.steps, |i, line| {
                    format!("{}.  {}", i + 1, line)
                });
                self.recipe = Some(recipe);
            }
            RecipeContentMsg::ShowError(message) => {
                self.error = Some(message);
            }
        }
    }
}

impl RecipeContentView {
    fn description(&self) -> Option<&str> {
        self.recipe.as_ref()?.description.as_deref()
    }

    fn tips(&self) -> Option<&str> {
        self.recipe.as_ref()?.tips.as_deref()
    }
}

fn fill_lines(container: &gtk::Box, lines: &[String], format: impl Fn(usize, &str) -> String) {
    clear_box(container);
    for (i, line) in lines.iter().enumerate() {
        let label = gtk::Label::builder()
            .label(format(i, line))
            .wrap(true)
            .xalign(0.0)
            .selectable(true)
            .build();
        container.append(&label);
    }
}
