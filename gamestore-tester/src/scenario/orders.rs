use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use gamestore_core::{
    AddOutcome, CartController, Method, Order, OrderStatus, OrdersController,
};

use super::cart::pick_game;
use super::{Scenario, ScenarioCtx};

/// Order history: status filter, chips, id search, local filtering, expansion.
pub struct OrdersScenario;

pub(super) async fn place_one_order(ctx: &ScenarioCtx) -> Result<Order> {
    let game = pick_game(ctx, 1).await?;
    let mut cart = CartController::new(ctx.client.clone());
    if let other @ (AddOutcome::StockLimited(_) | AddOutcome::Failed(_)) =
        cart.add_to_cart(game.game_id, 1).await
    {
        bail!("add to cart failed: {other:?}");
    }
    cart.load_cart().await;
    cart.start_checkout();
    cart.place_order().await.context("order was not placed")
}

#[async_trait(?Send)]
impl Scenario for OrdersScenario {
    fn key(&self) -> &'static str {
        "orders"
    }

    fn description(&self) -> &'static str {
        "Filter, search and expand the order history"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        ctx.sign_in(&ctx.accounts.shopper).await?;
        ctx.step("place an order to have history");
        let placed = place_one_order(ctx).await?;
        let id = placed.order_id;

        let mut orders = OrdersController::new(ctx.client.clone());
        ctx.step("the unfiltered list holds the new order");
        orders.load_orders(None).await;
        let state = orders.state();
        if let Some(error) = &state.error {
            bail!("orders did not load: {error}");
        }
        ensure!(
            state.visible.iter().any(|o| o.order_id == id),
            "order #{id} missing from the history"
        );
        let chips = state.status_chips();
        let all = chips.first().context("no status chips")?;
        ensure!(all.label == "All" && all.count >= 1, "bad leading chip {all:?}");
        ensure!(
            chips.iter().any(|c| c.status == Some(OrderStatus::Pending)),
            "no Pending chip for a pending order"
        );

        ctx.step("filtering by status");
        orders.load_orders(Some(OrderStatus::Pending)).await;
        let state = orders.state();
        ensure!(state.filter == Some(OrderStatus::Pending), "filter not kept");
        ensure!(
            state.visible.iter().all(|o| o.status == OrderStatus::Pending),
            "non-pending order under the Pending filter"
        );
        if let Some(fake) = &ctx.fake {
            let sent = fake
                .requests()
                .into_iter()
                .rev()
                .find(|r| r.method == Method::Get && r.path == "/orders")
                .context("no order listing request logged")?;
            ensure!(
                sent.query_value("status") == Some("pending"),
                "status filter sent as {:?}",
                sent.query_value("status")
            );
        }

        ctx.step(&format!("search for order #{id}"));
        orders.search_orders(&id.to_string()).await;
        let state = orders.state();
        ensure!(!state.searching, "search never settled");
        ensure!(
            state.visible.len() == 1 && state.visible[0].order_id == id,
            "id search returned {:?}",
            state.visible.iter().map(|o| o.order_id).collect::<Vec<_>>()
        );

        ctx.step("non-numeric terms filter locally");
        orders.search_orders("x").await;
        ensure!(orders.state().visible.is_empty(), "letters matched an order id");
        orders.search_orders("  ").await;
        let state = orders.state();
        ensure!(state.visible == state.scoped, "clearing the term did not restore the list");

        ctx.step("an unknown id reports a search error");
        orders.search_orders(&i64::MAX.to_string()).await;
        let state = orders.state();
        ensure!(
            state.search_error.is_some() || state.visible.is_empty(),
            "unknown id produced results"
        );

        ctx.step("expand and collapse an order");
        orders.toggle_expand(id);
        ensure!(orders.state().is_expanded(id), "order did not expand");
        orders.toggle_expand(id);
        ensure!(!orders.state().is_expanded(id), "order did not collapse");
        Ok(())
    }
}
