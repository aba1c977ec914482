use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::Colorize;
use gamestore_core::mock::FakeBackend;
use gamestore_core::{Credentials, SessionUser, StoreClient, Transport};
use std::rc::Rc;

use crate::transport::HttpTransport;
use crate::util::split_csv;

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod session;

pub type SharedTransport = Rc<dyn Transport>;

/// Where scenarios send their requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// A freshly seeded in-memory backend per scenario.
    Fake,
    Live { base_url: String },
}

/// The two accounts scenarios sign in with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accounts {
    pub shopper: Credentials,
    pub admin: Credentials,
}

/// One scenario run: a client with its own session, plus the in-memory
/// backend when running in contract mode.
pub struct ScenarioCtx {
    pub client: StoreClient<SharedTransport>,
    pub accounts: Accounts,
    pub fake: Option<FakeBackend>,
    pub verbose: bool,
}

impl ScenarioCtx {
    /// # Errors
    /// Fails when the HTTP client cannot be built.
    pub fn connect(backend: &Backend, accounts: &Accounts, verbose: bool) -> Result<Self> {
        let (transport, fake) = match backend {
            Backend::Fake => {
                let fake = FakeBackend::seeded();
                let transport: SharedTransport = Rc::new(fake.clone());
                (transport, Some(fake))
            }
            Backend::Live { base_url } => {
                let transport: SharedTransport = Rc::new(HttpTransport::new(base_url)?);
                (transport, None)
            }
        };
        Ok(Self {
            client: StoreClient::new(transport),
            accounts: accounts.clone(),
            fake,
            verbose,
        })
    }

    pub fn step(&self, message: &str) {
        log::info!("{message}");
        if self.verbose {
            println!("   {} {message}", "→".dimmed());
        }
    }

    /// # Errors
    /// Returns the rejected login with the account in context.
    pub async fn sign_in(&self, who: &Credentials) -> Result<SessionUser> {
        self.client
            .login(who)
            .await
            .with_context(|| format!("login as {}", who.email))
    }
}

#[async_trait(?Send)]
pub trait Scenario {
    fn key(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn run(&self, ctx: &ScenarioCtx) -> Result<()>;
}

fn registry() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(session::SessionScenario),
        Box::new(cart::CartScenario),
        Box::new(checkout::CheckoutScenario),
        Box::new(orders::OrdersScenario),
        Box::new(admin::AdminScenario),
    ]
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    registry()
        .iter()
        .map(|s| (s.key(), s.description()))
        .collect()
}

#[must_use]
pub fn get_scenario(name: &str) -> Option<Box<dyn Scenario>> {
    registry().into_iter().find(|s| s.key() == name)
}

/// Split the `--scenarios` argument; `all` expands to every registered key.
#[must_use]
pub fn expand_scenarios(arg: &str) -> Vec<String> {
    let mut scenarios: Vec<String> = Vec::new();
    for name in split_csv(arg) {
        if name == "all" {
            for (key, _) in list_scenarios() {
                if !scenarios.iter().any(|s| s == key) {
                    scenarios.push(key.to_string());
                }
            }
        } else if !scenarios.contains(&name) {
            scenarios.push(name);
        }
    }
    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_in_registry_order() {
        assert_eq!(
            expand_scenarios("all"),
            vec!["session", "cart", "checkout", "orders", "admin"]
        );
        assert_eq!(
            expand_scenarios("cart, all"),
            vec!["cart", "session", "checkout", "orders", "admin"]
        );
    }

    #[test]
    fn unknown_names_are_kept_for_reporting() {
        assert_eq!(expand_scenarios("cart,nope,cart"), vec!["cart", "nope"]);
        assert!(get_scenario("nope").is_none());
        assert_eq!(get_scenario("orders").map(|s| s.key()), Some("orders"));
    }

    #[test]
    fn every_scenario_has_a_description() {
        for (key, description) in list_scenarios() {
            assert!(!description.is_empty(), "{key} has no description");
        }
    }
}
