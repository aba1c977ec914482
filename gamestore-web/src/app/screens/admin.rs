//! Admin tables. Every screen shares one list hook and the same mutation
//! plumbing; only the fetch, save, and delete calls differ.
use crate::app::context::{Client, ScreenProps};
use crate::app::hooks::{use_notice_timer, use_view_epoch};
use crate::components::NoticeStack;
use crate::pages::admin::games::AdminGamesPage;
use crate::pages::admin::inventory::AdminInventoryPage;
use crate::pages::admin::orders::AdminOrdersPage;
use crate::pages::admin::users::AdminUsersPage;
use crate::pages::admin::{Editor, TableActions};
use crate::state::{AdminAction, AdminModel};
use gamestore_core::admin::games::save_game;
use gamestore_core::admin::inventory::save_stock;
use gamestore_core::admin::orders::save_order_status;
use gamestore_core::admin::users::save_user;
use gamestore_core::{
    AdminEntity, AdminUser, ApiError, FormModel, Game, GameForm, InventoryRow, Mutation, Order,
    OrderStatusForm, StockDrafts, UserForm, ViewEpoch,
};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;

type Pending<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>>>>;
type Fetcher<E> = fn(Rc<Client>) -> Pending<Vec<E>>;
type Deleter = fn(Rc<Client>, i64) -> Pending<()>;

struct AdminHandle<E: AdminEntity + 'static> {
    model: UseReducerHandle<AdminModel<E>>,
    mounted: Rc<ViewEpoch>,
    client: Rc<Client>,
}

impl<E: AdminEntity + 'static> Clone for AdminHandle<E> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            mounted: Rc::clone(&self.mounted),
            client: Rc::clone(&self.client),
        }
    }
}

impl<E: AdminEntity + 'static> AdminHandle<E> {
    fn table_actions(&self) -> TableActions {
        let term = self.model.dispatcher();
        let category = self.model.dispatcher();
        let retry = self.model.dispatcher();
        TableActions {
            on_term: Callback::from(move |t: String| term.dispatch(AdminAction::Term(t))),
            on_category: Callback::from(move |c| category.dispatch(AdminAction::Category(c))),
            on_retry: Callback::from(move |()| retry.dispatch(AdminAction::Refresh)),
        }
    }

    /// Mark `key` busy, await `request`, and fold the result into the list.
    fn commit<F>(&self, key: Option<i64>, request: F, on_ok: impl FnOnce() + 'static)
    where
        F: Future<Output = Result<Mutation<E>, ApiError>> + 'static,
    {
        let dispatcher = self.model.dispatcher();
        let mounted = Rc::clone(&self.mounted);
        let ticket = mounted.ticket();
        dispatcher.dispatch(AdminAction::Begin(key));
        spawn_local(async move {
            let result = request.await;
            if let Some(result) = mounted.accept(ticket, result) {
                if result.is_ok() {
                    on_ok();
                }
                dispatcher.dispatch(AdminAction::Settle(key, result));
            }
        });
    }

    fn on_request_delete(&self) -> Callback<i64> {
        let dispatcher = self.model.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(AdminAction::RequestDelete(id)))
    }

    fn on_cancel_delete(&self) -> Callback<()> {
        let dispatcher = self.model.dispatcher();
        Callback::from(move |()| dispatcher.dispatch(AdminAction::CancelDelete))
    }

    /// Send the delete held by the confirmation dialog, if any.
    fn on_confirm_delete(&self, send: Deleter) -> Callback<()> {
        let handle = self.clone();
        Callback::from(move |()| {
            let Some(id) = handle.model.list.pending_delete else {
                return;
            };
            handle.model.dispatch(AdminAction::CancelDelete);
            let request = send(Rc::clone(&handle.client), id);
            handle.commit(
                Some(id),
                async move { request.await.map(|()| Mutation::Deleted(id)) },
                || (),
            );
        })
    }

    fn on_dismiss(&self) -> Callback<u64> {
        let dispatcher = self.model.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(AdminAction::Dismiss(id)))
    }
}

/// Load the list on mount and again whenever a reload is requested.
#[hook]
fn use_admin_list<E: AdminEntity + 'static>(client: Rc<Client>, fetch: Fetcher<E>) -> AdminHandle<E> {
    let model = use_reducer(AdminModel::<E>::default);
    let loads = use_view_epoch();
    let mounted = use_view_epoch();
    {
        let client = Rc::clone(&client);
        let dispatcher = model.dispatcher();
        use_effect_with(model.reloads, move |_| {
            let ticket = loads.advance();
            dispatcher.dispatch(AdminAction::LoadStarted);
            spawn_local(async move {
                let result = fetch(client).await;
                if let Some(result) = loads.accept(ticket, result) {
                    dispatcher.dispatch(AdminAction::Loaded(result));
                }
            });
        });
    }
    use_notice_timer(model.list.notices.ids(), {
        let dispatcher = model.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(AdminAction::Dismiss(id)))
    });
    AdminHandle {
        model,
        mounted,
        client,
    }
}

/// Callbacks driving an editor modal: field input, submit, cancel.
struct EditorCallbacks {
    on_input: Callback<(String, String)>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
}

/// Wire an editor to `save`. Success closes the modal and reconciles the
/// list; failure keeps it open with the server message as a banner.
fn editor_callbacks<E, F, S>(
    handle: &AdminHandle<E>,
    editor: &UseStateHandle<Option<Editor<F>>>,
    save: S,
) -> EditorCallbacks
where
    E: AdminEntity + 'static,
    F: FormModel + 'static,
    S: Fn(Option<i64>, F::Payload) -> Option<Pending<Mutation<E>>> + 'static,
{
    let on_input = {
        let editor = editor.clone();
        Callback::from(move |(field, value): (String, String)| {
            if let Some(mut next) = (*editor).clone() {
                next.form.edit(&field, value);
                editor.set(Some(next));
            }
        })
    };
    let on_submit = {
        let editor = editor.clone();
        let handle = handle.clone();
        Callback::from(move |()| {
            let Some(mut next) = (*editor).clone() else {
                return;
            };
            let Some(payload) = next.form.begin_submit() else {
                editor.set(Some(next));
                return;
            };
            let key = next.editing;
            let Some(request) = save(key, payload) else {
                editor.set(None);
                return;
            };
            editor.set(Some(next.clone()));
            let dispatcher = handle.model.dispatcher();
            let mounted = Rc::clone(&handle.mounted);
            let ticket = mounted.ticket();
            let editor = editor.clone();
            dispatcher.dispatch(AdminAction::Begin(key));
            spawn_local(async move {
                let Some(result) = mounted.accept(ticket, request.await) else {
                    return;
                };
                match result {
                    Ok(mutation) => {
                        editor.set(None);
                        dispatcher.dispatch(AdminAction::Settle(key, Ok(mutation)));
                    }
                    Err(err) => {
                        log::error!("saving {} failed: {err}", E::NOUN);
                        next.form.fail(err.user_message(&format!("Failed to save {}", E::NOUN)));
                        editor.set(Some(next));
                        dispatcher.dispatch(AdminAction::Release(key));
                    }
                }
            });
        })
    };
    let on_cancel = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(None))
    };
    EditorCallbacks {
        on_input,
        on_submit,
        on_cancel,
    }
}

fn fetch_games(client: Rc<Client>) -> Pending<Vec<Game>> {
    Box::pin(async move { client.admin_games().await })
}

fn delete_game(client: Rc<Client>, id: i64) -> Pending<()> {
    Box::pin(async move { client.delete_game(id).await })
}

#[function_component(AdminGamesScreen)]
pub fn admin_games_screen(props: &ScreenProps) -> Html {
    let handle = use_admin_list(Rc::clone(&props.ctx.client), fetch_games as Fetcher<Game>);
    let editor = use_state(|| None::<Editor<GameForm>>);

    let client = Rc::clone(&handle.client);
    let form = editor_callbacks(&handle, &editor, move |key, payload| {
        let client = Rc::clone(&client);
        Some(Box::pin(async move { save_game(&client, key, &payload).await }) as Pending<_>)
    });
    let on_new = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(Some(Editor::create())))
    };
    let on_edit = {
        let editor = editor.clone();
        let list = handle.model.list.clone();
        Callback::from(move |id: i64| {
            if let Some(game) = list.get(id) {
                editor.set(Some(Editor::edit(id, GameForm::from_game(game))));
            }
        })
    };

    html! {
        <>
            <AdminGamesPage list={handle.model.list.clone()} editor={(*editor).clone()}
                actions={handle.table_actions()} on_new={on_new} on_edit={on_edit}
                on_delete={handle.on_request_delete()}
                on_confirm_delete={handle.on_confirm_delete(delete_game)}
                on_cancel_delete={handle.on_cancel_delete()}
                on_form_input={form.on_input} on_form_submit={form.on_submit}
                on_form_cancel={form.on_cancel} />
            <NoticeStack notices={handle.model.list.notices.clone()} on_dismiss={handle.on_dismiss()} />
        </>
    }
}

fn fetch_users(client: Rc<Client>) -> Pending<Vec<AdminUser>> {
    Box::pin(async move { client.admin_users().await })
}

fn delete_user(client: Rc<Client>, id: i64) -> Pending<()> {
    Box::pin(async move { client.delete_user(id).await })
}

#[function_component(AdminUsersScreen)]
pub fn admin_users_screen(props: &ScreenProps) -> Html {
    let handle = use_admin_list(Rc::clone(&props.ctx.client), fetch_users as Fetcher<AdminUser>);
    let editor = use_state(|| None::<Editor<UserForm>>);

    let client = Rc::clone(&handle.client);
    let form = editor_callbacks(&handle, &editor, move |key, payload| {
        let client = Rc::clone(&client);
        Some(Box::pin(async move { save_user(&client, key, &payload).await }) as Pending<_>)
    });
    let on_new = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(Some(Editor::create())))
    };
    let on_edit = {
        let editor = editor.clone();
        let list = handle.model.list.clone();
        Callback::from(move |id: i64| {
            if let Some(user) = list.get(id) {
                editor.set(Some(Editor::edit(id, UserForm::from_user(user))));
            }
        })
    };

    html! {
        <>
            <AdminUsersPage list={handle.model.list.clone()} editor={(*editor).clone()}
                actions={handle.table_actions()} on_new={on_new} on_edit={on_edit}
                on_delete={handle.on_request_delete()}
                on_confirm_delete={handle.on_confirm_delete(delete_user)}
                on_cancel_delete={handle.on_cancel_delete()}
                on_form_input={form.on_input} on_form_submit={form.on_submit}
                on_form_cancel={form.on_cancel} />
            <NoticeStack notices={handle.model.list.notices.clone()} on_dismiss={handle.on_dismiss()} />
        </>
    }
}

fn fetch_orders(client: Rc<Client>) -> Pending<Vec<Order>> {
    Box::pin(async move { client.admin_orders().await })
}

fn delete_order(client: Rc<Client>, id: i64) -> Pending<()> {
    Box::pin(async move { client.delete_order(id).await })
}

#[function_component(AdminOrdersScreen)]
pub fn admin_orders_screen(props: &ScreenProps) -> Html {
    let handle = use_admin_list(Rc::clone(&props.ctx.client), fetch_orders as Fetcher<Order>);
    let editor = use_state(|| None::<Editor<OrderStatusForm>>);

    let client = Rc::clone(&handle.client);
    let rows = handle.model.list.clone();
    let form = editor_callbacks(&handle, &editor, move |key, status| {
        let order = key.and_then(|id| rows.get(id)).cloned()?;
        let client = Rc::clone(&client);
        Some(Box::pin(async move { save_order_status(&client, &order, &status).await }) as Pending<_>)
    });
    let on_edit = {
        let editor = editor.clone();
        let list = handle.model.list.clone();
        Callback::from(move |id: i64| {
            if let Some(order) = list.get(id) {
                editor.set(Some(Editor::edit(id, OrderStatusForm::from_order(order))));
            }
        })
    };

    html! {
        <>
            <AdminOrdersPage list={handle.model.list.clone()} editor={(*editor).clone()}
                actions={handle.table_actions()} on_edit={on_edit}
                on_delete={handle.on_request_delete()}
                on_confirm_delete={handle.on_confirm_delete(delete_order)}
                on_cancel_delete={handle.on_cancel_delete()}
                on_form_input={form.on_input} on_form_submit={form.on_submit}
                on_form_cancel={form.on_cancel} />
            <NoticeStack notices={handle.model.list.notices.clone()} on_dismiss={handle.on_dismiss()} />
        </>
    }
}

fn fetch_inventory(client: Rc<Client>) -> Pending<Vec<InventoryRow>> {
    Box::pin(async move { client.inventory().await })
}

/// Apply `edit` to the draft of row `id`, if the row is still listed.
fn draft_edit<A: 'static>(
    handle: &AdminHandle<InventoryRow>,
    drafts: &UseStateHandle<StockDrafts>,
    edit: fn(&mut StockDrafts, &InventoryRow, A),
) -> Callback<(i64, A)> {
    let list = handle.model.list.clone();
    let drafts = drafts.clone();
    Callback::from(move |(id, arg): (i64, A)| {
        if let Some(row) = list.get(id) {
            let mut next = (*drafts).clone();
            edit(&mut next, row, arg);
            drafts.set(next);
        }
    })
}

#[function_component(AdminInventoryScreen)]
pub fn admin_inventory_screen(props: &ScreenProps) -> Html {
    let handle = use_admin_list(
        Rc::clone(&props.ctx.client),
        fetch_inventory as Fetcher<InventoryRow>,
    );
    let drafts = use_state(StockDrafts::default);

    let on_increment = draft_edit(&handle, &drafts, |d, row, ()| d.increment(row))
        .reform(|id: i64| (id, ()));
    let on_decrement = draft_edit(&handle, &drafts, |d, row, ()| d.decrement(row))
        .reform(|id: i64| (id, ()));
    let on_input = draft_edit(&handle, &drafts, |d, row, text: String| d.set_input(row, &text));
    let on_discard = {
        let drafts = drafts.clone();
        Callback::from(move |id: i64| {
            let mut next = (*drafts).clone();
            next.discard(id);
            drafts.set(next);
        })
    };
    let on_save = {
        let handle = handle.clone();
        let drafts = drafts.clone();
        Callback::from(move |id: i64| {
            let Some(row) = handle.model.list.get(id).cloned() else {
                return;
            };
            if !drafts.is_dirty(&row) || handle.model.list.is_busy(id) {
                return;
            }
            let quantity = drafts.value(&row);
            let client = Rc::clone(&handle.client);
            let drafts = drafts.clone();
            handle.commit(
                Some(id),
                async move { save_stock(&client, &row, quantity).await },
                move || {
                    let mut next = (*drafts).clone();
                    next.discard(id);
                    drafts.set(next);
                },
            );
        })
    };

    html! {
        <>
            <AdminInventoryPage list={handle.model.list.clone()} drafts={(*drafts).clone()}
                actions={handle.table_actions()} on_increment={on_increment}
                on_decrement={on_decrement} on_input={on_input}
                on_save={on_save} on_discard={on_discard} />
            <NoticeStack notices={handle.model.list.notices.clone()} on_dismiss={handle.on_dismiss()} />
        </>
    }
}
