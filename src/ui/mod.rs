pub mod develop_page;
pub mod login_dialog;
pub mod onboarding;
pub mod pantry_page;
pub mod preferences;
pub mod recipe_content;
pub mod recipe_view;
pub mod sidebar;
pub mod toast_stack;
pub mod version_list;
pub mod window;

use adw::prelude::*;

use crate::services::loader::EmbeddedData;
use crate::services::location::Location;
use crate::services::toast::Severity;

/// What every page reports up to the window.
#[derive(Debug)]
pub enum PageOutput {
    /// Push a new history entry and load it.
    Navigate(Location, Option<EmbeddedData>),
    /// Rewrite the current history entry without reloading.
    ReplaceLocation(Location),
    /// Something changed the recipe collection.
    RecipesChanged,
    Notify(String, Severity),
    /// A request is outstanding; the sidebar goes insensitive meanwhile.
    Busy(bool),
    SignedOut,
}

/// Ask before a destructive action; `on_confirm` runs only on the
/// destructive response.
pub fn confirm(
    widget: &impl IsA<gtk::Widget>,
    heading: &str,
    body: &str,
    action_label: &str,
    on_confirm: impl Fn() + 'static,
) {
    let dialog = adw::AlertDialog::builder()
        .heading(heading)
        .body(body)
        .build();
    dialog.add_response("cancel", "Cancel");
    dialog.add_response("confirm", action_label);
    dialog.set_response_appearance("confirm", adw::ResponseAppearance::Destructive);
    dialog.set_default_response(Some("cancel"));
    dialog.set_close_response("cancel");
    dialog.connect_response(None, move |_dialog, response| {
        if response == "confirm" {
            on_confirm();
        }
    });

    if let Some(window) = widget
        .root()
        .and_then(|root| root.downcast::<gtk::Window>().ok())
    {
        dialog.present(Some(&window));
    }
}

/// Remove every child of a box that is rebuilt from scratch.
pub fn clear_box(container: &gtk::Box) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }
}
