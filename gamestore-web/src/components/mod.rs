pub mod confirm_dialog;
pub mod field;
pub mod header;
pub mod modal;
pub mod notice_stack;
pub mod status_badge;

pub use confirm_dialog::ConfirmDialog;
pub use field::{SelectField, TextField, field_error};
pub use header::Header;
pub use modal::Modal;
pub use notice_stack::NoticeStack;
pub use status_badge::StatusBadge;

use yew::prelude::{Classes, classes};

/// Merge fixed base classes with caller-supplied extras.
#[must_use]
pub fn class_list(base: &[&'static str], extra: &Classes) -> Classes {
    let mut list = classes!();
    for item in base {
        list.push(*item);
    }
    list.push(extra.clone());
    list
}
