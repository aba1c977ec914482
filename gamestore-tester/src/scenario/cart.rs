use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use gamestore_core::{AddOutcome, CartController, Game, Method, cart_total};

use super::{Scenario, ScenarioCtx, SharedTransport};

/// Add, change, over-order and remove one game, checking the recomputed total.
pub struct CartScenario;

/// First game with at least `min_stock` units on hand.
pub(super) async fn pick_game(ctx: &ScenarioCtx, min_stock: u32) -> Result<Game> {
    let games = ctx.client.games().await.context("load the catalog")?;
    games
        .into_iter()
        .find(|g| g.stock_quantity >= min_stock)
        .with_context(|| format!("no game with {min_stock}+ units in stock"))
}

/// Load the cart and remove whatever an earlier run left behind.
pub(super) async fn empty_cart(cart: &mut CartController<SharedTransport>) -> Result<()> {
    cart.load_cart().await;
    if let Some(error) = &cart.state().error {
        bail!("cart did not load: {error}");
    }
    let leftovers: Vec<i64> = cart.state().lines.iter().map(|l| l.cart_id).collect();
    for cart_id in leftovers {
        cart.remove_item(cart_id).await;
    }
    ensure!(cart.state().lines.is_empty(), "cart still holds items after clearing");
    Ok(())
}

#[async_trait(?Send)]
impl Scenario for CartScenario {
    fn key(&self) -> &'static str {
        "cart"
    }

    fn description(&self) -> &'static str {
        "Add, update, over-order and remove cart lines"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        ctx.sign_in(&ctx.accounts.shopper).await?;
        let mut cart = CartController::new(ctx.client.clone());
        empty_cart(&mut cart).await?;
        let game = pick_game(ctx, 3).await?;

        ctx.step(&format!("add one {}", game.title));
        match cart.add_to_cart(game.game_id, 1).await {
            AddOutcome::Added(count) => ensure!(
                count.is_none_or(|n| n >= 1),
                "header count after adding is {count:?}"
            ),
            other => bail!("add to cart failed: {other:?}"),
        }
        cart.load_cart().await;
        let line = cart
            .state()
            .lines
            .iter()
            .find(|l| l.game_id == game.game_id)
            .cloned()
            .context("added game is missing from the cart")?;
        ensure!(line.quantity == 1, "expected quantity 1, got {}", line.quantity);

        ctx.step("a quantity below one is never sent");
        let before = ctx.fake.as_ref().map(|f| f.calls(Method::Post, "/cart/update"));
        ensure!(
            !cart.update_quantity(line.cart_id, 0).await,
            "quantity 0 was accepted"
        );
        let after = ctx.fake.as_ref().map(|f| f.calls(Method::Post, "/cart/update"));
        ensure!(before == after, "quantity 0 reached the backend");

        ctx.step("raise the quantity to two");
        ensure!(cart.update_quantity(line.cart_id, 2).await, "update was not sent");
        let state = cart.state();
        let updated = state.line(line.cart_id).context("line vanished after update")?;
        ensure!(updated.quantity == 2, "expected quantity 2, got {}", updated.quantity);
        ensure!(
            state.total == cart_total(&state.lines),
            "total {} does not match the lines",
            state.total
        );
        ensure!(
            state.total == line.price * 2,
            "total {} is not twice {}",
            state.total,
            line.price
        );

        ctx.step("ordering past the stock is refused with the available quantity");
        match cart.add_to_cart(game.game_id, game.stock_quantity).await {
            AddOutcome::StockLimited(available) => {
                if ctx.fake.is_some() {
                    ensure!(
                        available == game.stock_quantity,
                        "reported {available} available, stock is {}",
                        game.stock_quantity
                    );
                }
            }
            other => bail!("over-ordering was not refused: {other:?}"),
        }
        ensure!(
            cart.state().notices.latest_id().is_some(),
            "stock refusal raised no notice"
        );

        ctx.step("remove the line");
        ensure!(cart.remove_item(line.cart_id).await, "removal was not sent");
        ensure!(
            cart.state().line(line.cart_id).is_none(),
            "line still present after removal"
        );
        ensure!(
            !cart.remove_item(line.cart_id).await,
            "removing an unknown line was sent"
        );
        Ok(())
    }
}
