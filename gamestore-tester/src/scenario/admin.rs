use anyhow::{Context, Result, anyhow, bail, ensure};
use async_trait::async_trait;
use chrono::Utc;
use gamestore_core::admin::games::save_game;
use gamestore_core::admin::inventory::save_stock;
use gamestore_core::admin::orders::save_order_status;
use gamestore_core::admin::users::save_user;
use gamestore_core::{
    AdminList, AdminUser, FormModel, Game, GameForm, InventoryRow, Order, OrderStatus, Settled,
    StockDrafts, UserForm,
};

use super::orders::place_one_order;
use super::{Scenario, ScenarioCtx};

/// Create, edit and delete through the four admin tables.
pub struct AdminScenario;

fn fill<F: FormModel>(mut form: F, fields: &[(&str, &str)]) -> Result<F::Payload> {
    for (field, value) in fields {
        form.set_field(field, (*value).to_string());
    }
    form.validate().map_err(|errors| anyhow!("form rejected: {errors:?}"))
}

fn expect_applied(settled: &Settled, what: &str) -> Result<()> {
    match settled {
        Settled::Patched | Settled::Reloaded => Ok(()),
        Settled::Failed(message) => bail!("{what} failed: {message}"),
    }
}

async fn games_table(ctx: &ScenarioCtx, suffix: &str) -> Result<()> {
    let client = &ctx.client;
    let mut games: AdminList<Game> = AdminList::default();
    games.load_with(client.admin_games()).await;
    if let Some(error) = &games.error {
        bail!("admin games did not load: {error}");
    }

    let title = format!("Contract Run {suffix}");
    ctx.step(&format!("create game \"{title}\""));
    let payload = fill(
        GameForm::default(),
        &[
            ("title", title.as_str()),
            ("price", "12.50"),
            ("genre", "Puzzle"),
            ("platform", "PC"),
            ("stock_quantity", "4"),
        ],
    )?;
    let settled = games
        .commit(None, save_game(client, None, &payload), || client.admin_games())
        .await;
    expect_applied(&settled, "create game")?;
    let created = games
        .items
        .iter()
        .find(|g| g.title == title)
        .cloned()
        .context("created game is not in the table")?;
    ensure!(
        created.price.to_decimal_string() == "12.50",
        "created price is {}",
        created.price
    );

    ctx.step("edit its price");
    let payload = fill(GameForm::from_game(&created), &[("price", "7.25")])?;
    let id = created.game_id;
    let settled = games
        .commit(Some(id), save_game(client, Some(id), &payload), || client.admin_games())
        .await;
    expect_applied(&settled, "update game")?;
    let updated = games.get(id).context("edited game left the table")?;
    ensure!(
        updated.price.to_decimal_string() == "7.25",
        "edited price is {}",
        updated.price
    );
    ensure!(!games.is_busy(id), "row still marked busy");

    if let Some(fake) = &ctx.fake {
        ctx.step("a mutation without an echoed row reloads the table");
        fake.set_terse_mutations(true);
        let payload = fill(GameForm::from_game(updated), &[("genre", "Strategy")])?;
        let settled = games
            .commit(Some(id), save_game(client, Some(id), &payload), || client.admin_games())
            .await;
        fake.set_terse_mutations(false);
        ensure!(settled == Settled::Reloaded, "expected a reload, got {settled:?}");
        ensure!(
            games.get(id).is_some_and(|g| g.genre == "Strategy"),
            "reloaded table lacks the edit"
        );
    }

    ctx.step("cancelling a delete keeps the row");
    games.request_delete(id);
    games.cancel_delete();
    ensure!(games.get(id).is_some(), "cancelled delete removed the row");

    ctx.step("confirming a delete removes it");
    games.request_delete(id);
    let settled = games
        .confirm_delete(|id| client.delete_game(id), || client.admin_games())
        .await
        .context("confirm had no pending delete")?;
    expect_applied(&settled, "delete game")?;
    ensure!(games.get(id).is_none(), "deleted game is still listed");
    Ok(())
}

async fn users_table(ctx: &ScenarioCtx, suffix: &str) -> Result<()> {
    let client = &ctx.client;
    let mut users: AdminList<AdminUser> = AdminList::default();
    users.load_with(client.admin_users()).await;
    if let Some(error) = &users.error {
        bail!("admin users did not load: {error}");
    }

    let email = format!("contract-{suffix}@example.com");
    ctx.step(&format!("create user {email}"));
    let username = format!("contract{suffix}");
    let payload = fill(
        UserForm::default(),
        &[
            ("username", username.as_str()),
            ("email", email.as_str()),
            ("password", "s3cret-pass"),
            ("role", "user"),
        ],
    )?;
    let settled = users
        .commit(None, save_user(client, None, &payload), || client.admin_users())
        .await;
    expect_applied(&settled, "create user")?;
    let created = users
        .items
        .iter()
        .find(|u| u.email == email)
        .cloned()
        .context("created user is not in the table")?;
    ensure!(!created.role.is_admin(), "new user got the admin role");

    ctx.step("editing without a password keeps it");
    let payload = fill(UserForm::from_user(&created), &[("username", "renamed")])?;
    ensure!(payload.password.is_none(), "blank password was sent on edit");
    let id = created.user_id;
    let settled = users
        .commit(Some(id), save_user(client, Some(id), &payload), || client.admin_users())
        .await;
    expect_applied(&settled, "update user")?;
    ensure!(
        users.get(id).is_some_and(|u| u.username == "renamed"),
        "rename not applied"
    );

    users.request_delete(id);
    let settled = users
        .confirm_delete(|id| client.delete_user(id), || client.admin_users())
        .await
        .context("confirm had no pending delete")?;
    expect_applied(&settled, "delete user")?;
    ensure!(users.get(id).is_none(), "deleted user is still listed");
    Ok(())
}

async fn orders_table(ctx: &ScenarioCtx, placed: &Order) -> Result<()> {
    let client = &ctx.client;
    let mut orders: AdminList<Order> = AdminList::default();
    orders.load_with(client.admin_orders()).await;
    if let Some(error) = &orders.error {
        bail!("admin orders did not load: {error}");
    }
    let row = orders
        .get(placed.order_id)
        .cloned()
        .with_context(|| format!("order #{} missing from the admin table", placed.order_id))?;

    ctx.step(&format!("mark order #{} shipped", row.order_id));
    let settled = orders
        .commit(
            Some(row.order_id),
            save_order_status(client, &row, &OrderStatus::Shipped),
            || client.admin_orders(),
        )
        .await;
    expect_applied(&settled, "status update")?;
    ensure!(
        orders
            .get(row.order_id)
            .is_some_and(|o| o.status == OrderStatus::Shipped),
        "status change not applied"
    );
    orders.set_category(Some(OrderStatus::Shipped.label()));
    ensure!(
        orders.visible().iter().any(|o| o.order_id == row.order_id),
        "shipped order hidden by the Shipped filter"
    );
    Ok(())
}

async fn inventory_table(ctx: &ScenarioCtx) -> Result<()> {
    let client = &ctx.client;
    let mut inventory: AdminList<InventoryRow> = AdminList::default();
    inventory.load_with(client.inventory()).await;
    if let Some(error) = &inventory.error {
        bail!("inventory did not load: {error}");
    }
    let row = inventory
        .items
        .first()
        .cloned()
        .context("inventory is empty")?;
    let target = row.stock_quantity + 5;

    ctx.step(&format!("draft and save stock {target} for {}", row.title));
    let mut drafts = StockDrafts::default();
    drafts.set_input(&row, &target.to_string());
    ensure!(drafts.is_dirty(&row), "draft not recorded");
    let settled = inventory
        .commit(
            Some(row.game_id),
            save_stock(client, &row, drafts.value(&row)),
            || client.inventory(),
        )
        .await;
    expect_applied(&settled, "stock update")?;
    drafts.discard(row.game_id);
    let saved = inventory.get(row.game_id).context("row left the table")?;
    ensure!(
        saved.stock_quantity == target,
        "stock is {} after saving {target}",
        saved.stock_quantity
    );
    ensure!(!drafts.is_dirty(saved), "draft survived the save");
    if let Some(fake) = &ctx.fake {
        ensure!(fake.stock(row.game_id) == Some(target), "backend stock unchanged");
    }
    Ok(())
}

#[async_trait(?Send)]
impl Scenario for AdminScenario {
    fn key(&self) -> &'static str {
        "admin"
    }

    fn description(&self) -> &'static str {
        "Manage games, users, order status and stock as an admin"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        ctx.step("shoppers are refused admin endpoints");
        ctx.sign_in(&ctx.accounts.shopper).await?;
        let refused = ctx.client.admin_games().await.err();
        ensure!(
            refused.as_ref().is_some_and(|e| e.is_unauthorized()),
            "shopper reached the admin API: {refused:?}"
        );
        let placed = place_one_order(ctx).await?;

        let admin = ctx.sign_in(&ctx.accounts.admin).await?;
        ensure!(admin.is_admin(), "{} is not an admin", admin.email);

        let suffix = Utc::now().timestamp_millis().to_string();
        games_table(ctx, &suffix).await?;
        users_table(ctx, &suffix).await?;
        orders_table(ctx, &placed).await?;
        inventory_table(ctx).await
    }
}
