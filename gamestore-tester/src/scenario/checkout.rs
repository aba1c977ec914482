use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use gamestore_core::{
    AddOutcome, CartController, CheckoutPhase, Method, OrderStatus, PaymentMethod,
};

use super::cart::{empty_cart, pick_game};
use super::{Scenario, ScenarioCtx};

/// Cart to payment to confirmation, and the guards around placing an order.
pub struct CheckoutScenario;

#[async_trait(?Send)]
impl Scenario for CheckoutScenario {
    fn key(&self) -> &'static str {
        "checkout"
    }

    fn description(&self) -> &'static str {
        "Walk the three checkout steps and place an order"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        ctx.sign_in(&ctx.accounts.shopper).await?;
        let mut cart = CartController::new(ctx.client.clone());
        empty_cart(&mut cart).await?;

        ctx.step("an empty cart cannot start checkout");
        cart.start_checkout();
        ensure!(
            cart.state().phase == CheckoutPhase::Cart,
            "empty cart moved to {:?}",
            cart.state().phase
        );
        ensure!(cart.place_order().await.is_none(), "empty cart placed an order");
        if let Some(fake) = &ctx.fake {
            ensure!(
                fake.calls(Method::Post, "/orders/create") == 0,
                "an empty cart reached the order endpoint"
            );
        }

        let game = pick_game(ctx, 2).await?;
        ctx.step(&format!("add two {} and open payment", game.title));
        if let other @ (AddOutcome::StockLimited(_) | AddOutcome::Failed(_)) =
            cart.add_to_cart(game.game_id, 2).await
        {
            bail!("add to cart failed: {other:?}");
        }
        cart.load_cart().await;
        let expected_total = cart.state().total;
        cart.start_checkout();
        ensure!(
            cart.state().phase == CheckoutPhase::Payment,
            "checkout stayed on {:?}",
            cart.state().phase
        );

        ctx.step("going back keeps the cart");
        cart.cancel_checkout();
        ensure!(cart.state().phase == CheckoutPhase::Cart, "cancel did not return to the cart");
        ensure!(!cart.state().lines.is_empty(), "cancel emptied the cart");
        cart.start_checkout();

        ctx.step("pay by gift card");
        cart.select_payment_method(PaymentMethod::GiftCard);
        let order = cart
            .place_order()
            .await
            .with_context(|| {
                let notice = cart.state().notices.latest().map(|n| n.text.clone());
                format!("order was not placed: {notice:?}")
            })?;
        let state = cart.state();
        ensure!(state.phase == CheckoutPhase::Confirmation, "no confirmation step");
        ensure!(state.lines.is_empty() && state.item_count == 0, "cart not cleared");
        ensure!(
            order.total_amount == expected_total,
            "order total {} differs from cart total {expected_total}",
            order.total_amount
        );
        ensure!(order.status == OrderStatus::Pending, "new order is {}", order.status);
        ensure!(
            order.payment_method.as_deref() == Some(PaymentMethod::GiftCard.label()),
            "payment method sent as {:?}",
            order.payment_method
        );

        ctx.step("a confirmed checkout cannot place again");
        ensure!(cart.place_order().await.is_none(), "second order placed");
        if let Some(fake) = &ctx.fake {
            ensure!(
                fake.calls(Method::Post, "/orders/create") == 1,
                "expected exactly one order request"
            );
            ensure!(
                fake.stock(game.game_id) == Some(game.stock_quantity - 2),
                "stock was not reduced by the order"
            );
        }
        Ok(())
    }
}
