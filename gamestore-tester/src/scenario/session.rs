use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use gamestore_core::{
    ApiError, Credentials, GuardOutcome, MemorySessionStorage, Role, RouteAccess, SessionCache,
    check_access, sign_out,
};

use super::{Scenario, ScenarioCtx};

/// Login, route gating by role, logout, and the cached-session fallback.
pub struct SessionScenario;

#[async_trait(?Send)]
impl Scenario for SessionScenario {
    fn key(&self) -> &'static str {
        "session"
    }

    fn description(&self) -> &'static str {
        "Sign in, gate routes by role, sign out"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        let cache = SessionCache::load(MemorySessionStorage::default());
        let shopper = &ctx.accounts.shopper;

        ctx.step("signed-out visitors are sent to the entry page");
        let outcome = check_access(&ctx.client, &cache, RouteAccess::UserOnly).await;
        ensure!(
            outcome == GuardOutcome::RedirectToEntry,
            "expected a redirect to login, got {outcome:?}"
        );

        ctx.step("a wrong password is rejected");
        let wrong = Credentials {
            email: shopper.email.clone(),
            password: format!("{}-wrong", shopper.password),
        };
        let err = ctx
            .client
            .login(&wrong)
            .await
            .err()
            .context("login with a wrong password succeeded")?;
        ensure!(
            matches!(err, ApiError::Status { .. }),
            "expected a status rejection, got {err}"
        );

        ctx.step("signing in opens the shopper routes only");
        let user = ctx.sign_in(shopper).await?;
        ensure!(!user.is_admin(), "{} signed in with the admin role", user.email);
        let outcome = check_access(&ctx.client, &cache, RouteAccess::UserOnly).await;
        ensure!(outcome == GuardOutcome::Allow, "shopper route refused: {outcome:?}");
        ensure!(
            cache.read().map(|u| u.id) == Some(user.id),
            "session snapshot was not refreshed by the guard"
        );
        let outcome = check_access(&ctx.client, &cache, RouteAccess::AdminOnly).await;
        ensure!(
            outcome == GuardOutcome::RedirectToHome(Role::User),
            "admin route should send a shopper home, got {outcome:?}"
        );

        if let Some(fake) = &ctx.fake {
            ctx.step("an unreachable backend falls back to the cached session");
            fake.set_offline(true);
            let outcome = check_access(&ctx.client, &cache, RouteAccess::UserOnly).await;
            fake.set_offline(false);
            ensure!(
                outcome == GuardOutcome::Allow,
                "cached session ignored while offline: {outcome:?}"
            );
        }

        ctx.step("signing out clears the session");
        sign_out(&ctx.client, &cache).await;
        ensure!(cache.read().is_none(), "session snapshot survived logout");
        let outcome = check_access(&ctx.client, &cache, RouteAccess::UserOnly).await;
        ensure!(
            outcome == GuardOutcome::RedirectToEntry,
            "signed-out guard let the visitor through: {outcome:?}"
        );
        Ok(())
    }
}
