use gtk::prelude::*;
use relm4::factory::FactoryVecDeque;
use relm4::prelude::*;

use crate::config::{DEFAULT_TOAST_DURATION_MS, TOAST_EXIT_TRANSITION_MS};
use crate::services::toast::{FlashNotice, Severity, Toast, ToastId, ToastQueue};

// --- ToastRow factory component ---

#[derive(Debug)]
pub struct ToastRow {
    toast: Toast,
    revealed: bool,
}

#[derive(Debug)]
pub enum ToastRowMsg {
    Hide,
}

#[derive(Debug)]
pub enum ToastRowOutput {
    Dismiss(ToastId),
}

#[relm4::factory(pub)]
impl FactoryComponent for ToastRow {
    type Init = Toast;
    type Input = ToastRowMsg;
    type Output = ToastRowOutput;
    type CommandOutput = ();
    type ParentWidget = gtk::Box;

    view! {
        gtk::Revealer {
            set_transition_type: gtk::RevealerTransitionType::SlideDown,
            set_transition_duration: TOAST_EXIT_TRANSITION_MS as u32,
            #[watch]
            set_reveal_child: self.revealed,

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 10,
                add_css_class: "toast",
                add_css_class: self.toast.severity.css_class(),

                gtk::Image {
                    set_icon_name: Some(self.toast.severity.icon_name()),
                    add_css_class: "toast-icon",
                },

                gtk::Label {
                    set_label: &self.toast.message,
                    set_wrap: true,
                    set_xalign: 0.0,
                    set_hexpand: true,
                    set_max_width_chars: 48,
                },

                gtk::Button {
                    set_icon_name: "window-close-symbolic",
                    set_tooltip_text: Some("Dismiss"),
                    set_valign: gtk::Align::Center,
                    add_css_class: "flat",
                    add_css_class: "circular",
                    connect_clicked[sender, id = self.toast.id] => move |_| {
                        let _ = sender.output(ToastRowOutput::Dismiss(id));
                    },
                },
            },
        }
    }

    fn init_model(toast: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self {
            toast,
            revealed: true,
        }
    }

    fn update(&mut self, msg: Self::Input, _sender: FactorySender<Self>) {
        match msg {
            ToastRowMsg::Hide => self.revealed = false,
        }
    }
}

// --- ToastStack component ---

/// The window's toast container. Stays hidden until the first toast.
pub struct ToastStack {
    queue: ToastQueue,
    rows: FactoryVecDeque<ToastRow>,
    duration_ms: i64,
}

#[derive(Debug)]
pub enum ToastStackMsg {
    Notify(String, Severity),
    Flashes(Vec<FlashNotice>),
    SetDuration(i64),
    Dismiss(ToastId),
    Detach(ToastId),
}

#[relm4::component(pub)]
impl Component for ToastStack {
    type Init = ();
    type Input = ToastStackMsg;
    type Output = ();
    type CommandOutput = ();

    view! {
        gtk::Box {
            set_halign: gtk::Align::End,
            set_valign: gtk::Align::Start,
            set_margin_top: 12,
            set_margin_end: 12,
            add_css_class: "toast-container",
            #[watch]
            set_visible: model.queue.container_created(),

            #[local_ref]
            toast_list -> gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
            },
        }
    }

    fn init(
        _init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let rows = FactoryVecDeque::builder()
            .launch(gtk::Box::default())
            .forward(sender.input_sender(), |output| match output {
                ToastRowOutput::Dismiss(id) => ToastStackMsg::Dismiss(id),
            });

        let model = Self {
            queue: ToastQueue::new(),
            rows,
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        };

        let toast_list = model.rows.widget();
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            ToastStackMsg::Notify(message, severity) => {
                let (id, expiry) = self.queue.notify(message, severity, self.duration_ms);
                if let Some(toast) = self.queue.get(id).cloned() {
                    self.rows.guard().push_back(toast);
                }
                if let Some(delay) = expiry {
                    schedule(&sender, delay, ToastStackMsg::Dismiss(id));
                }
            }
            ToastStackMsg::Flashes(mut flashes) => {
                let shown = self.queue.drain_flashes(&mut flashes, self.duration_ms);
                let mut guard = self.rows.guard();
                for (toast, expiry) in shown {
                    let id = toast.id;
                    guard.push_back(toast);
                    if let Some(delay) = expiry {
                        schedule(&sender, delay, ToastStackMsg::Dismiss(id));
                    }
                }
            }
            ToastStackMsg::SetDuration(duration_ms) => {
                self.duration_ms = duration_ms;
            }
            ToastStackMsg::Dismiss(id) => {
                let Some(delay) = self.queue.begin_removal(id) else {
                    return;
                };
                if let Some(index) = self.queue.index_of(id) {
                    self.rows.send(index, ToastRowMsg::Hide);
                }
                schedule(&sender, delay, ToastStackMsg::Detach(id));
            }
            ToastStackMsg::Detach(id) => {
                let index = self.queue.index_of(id);
                if self.queue.detach(id) {
                    if let Some(index) = index {
                        self.rows.guard().remove(index);
                    }
                }
            }
        }
    }
}

fn schedule(sender: &ComponentSender<ToastStack>, delay: std::time::Duration, msg: ToastStackMsg) {
    let sender = sender.input_sender().clone();
    glib::timeout_add_local_once(delay, move || {
        sender.emit(msg);
    });
}
