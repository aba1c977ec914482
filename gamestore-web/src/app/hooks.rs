use crate::dom::{js_error_message, sleep_ms};
use gamestore_core::constants::NOTICE_TTL_MS;
use gamestore_core::{Debounce, NoticeTimers, ViewEpoch};
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;

/// Epoch that advances when the screen unmounts, so late results are dropped.
#[hook]
pub fn use_view_epoch() -> Rc<ViewEpoch> {
    let epoch = use_memo((), |_| ViewEpoch::new());
    {
        let epoch = Rc::clone(&epoch);
        use_effect_with((), move |_| {
            move || {
                epoch.advance();
            }
        });
    }
    epoch
}

#[hook]
pub fn use_debounce() -> Rc<Debounce> {
    let debounce = use_memo((), |_| Debounce::new());
    {
        let debounce = Rc::clone(&debounce);
        use_effect_with((), move |_| move || debounce.cancel());
    }
    debounce
}

/// Schedule auto-dismissal for every visible notice that has no timer yet.
#[hook]
pub fn use_notice_timer(visible: Vec<u64>, dismiss: Callback<u64>) {
    let timers = use_mut_ref(NoticeTimers::default);
    use_effect_with(visible, move |visible| {
        for id in timers.borrow_mut().unscheduled(visible) {
            let dismiss = dismiss.clone();
            spawn_local(async move {
                if let Err(err) = sleep_ms(NOTICE_TTL_MS).await {
                    log::warn!("notice timer failed: {}", js_error_message(&err));
                }
                dismiss.emit(id);
            });
        }
    });
}

/// Wait out the debounce window; `true` when this keystroke is still the latest.
pub async fn settle(debounce: &Debounce, ticket: gamestore_core::Ticket, delay_ms: u32) -> bool {
    if let Err(err) = sleep_ms(delay_ms).await {
        log::warn!("debounce timer failed: {}", js_error_message(&err));
    }
    debounce.should_fire(ticket)
}
