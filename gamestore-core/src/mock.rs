//! In-memory backend speaking the storefront's HTTP contract.
//!
//! Used by the integration tests and by the tester's contract mode. It keeps
//! a request log so tests can assert which endpoints were (not) called, and
//! supports going offline or answering one request with a canned response.
use crate::admin::{AdminUser, InventoryRow};
use crate::api::{ApiRequest, ApiResponse, Method, Transport};
use crate::auth::{Role, SessionUser};
use crate::cart::{CartLine, cart_total};
use crate::catalog::Game;
use crate::error::ApiError;
use crate::money::Money;
use crate::orders::{Order, OrderItem, OrderStatus};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

#[derive(Debug, Clone)]
struct Account {
    user: AdminUser,
    password: String,
}

#[derive(Debug, Clone)]
struct Canned {
    method: Method,
    path: String,
    response: ApiResponse,
}

#[derive(Debug, Default)]
struct FakeState {
    games: Vec<Game>,
    accounts: Vec<Account>,
    session: Option<i64>,
    cart: Vec<CartLine>,
    /// (owner user id, order)
    orders: Vec<(i64, Order)>,
    next_id: i64,
    log: Vec<ApiRequest>,
    offline: bool,
    canned: VecDeque<Canned>,
    terse_mutations: bool,
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct SignupBody {
    username: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartBody {
    #[serde(default)]
    game_id: Option<i64>,
    #[serde(default)]
    cart_id: Option<i64>,
    #[serde(default)]
    quantity: Option<i64>,
}

#[derive(Deserialize)]
struct GameBody {
    title: String,
    #[serde(default)]
    description: String,
    price: Money,
    genre: String,
    platform: String,
    stock_quantity: u32,
    #[serde(default)]
    gameicon: Option<String>,
}

#[derive(Deserialize)]
struct UserBody {
    username: String,
    email: String,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    role: Role,
}

fn respond(status: u16, body: Value) -> ApiResponse {
    ApiResponse::new(status, body)
}

fn message(status: u16, text: &str) -> ApiResponse {
    respond(status, json!({"message": text}))
}

fn body_as<B: DeserializeOwned>(request: &ApiRequest) -> Result<B, ApiResponse> {
    request
        .body
        .clone()
        .ok_or_else(|| message(400, "Missing request body"))
        .and_then(|body| {
            serde_json::from_value(body).map_err(|err| message(400, &format!("Invalid body: {err}")))
        })
}

fn parse_id(raw: &str) -> Result<i64, ApiResponse> {
    raw.parse().map_err(|_| message(400, "Invalid id"))
}

fn unwrap_response(result: Result<ApiResponse, ApiResponse>) -> ApiResponse {
    result.unwrap_or_else(|response| response)
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn current_account(&self) -> Option<&Account> {
        let id = self.session?;
        self.accounts.iter().find(|a| a.user.user_id == id)
    }

    fn require_user(&self) -> Result<i64, ApiResponse> {
        self.current_account()
            .map(|a| a.user.user_id)
            .ok_or_else(|| message(401, "Not authenticated"))
    }

    fn require_admin(&self) -> Result<(), ApiResponse> {
        match self.current_account() {
            Some(account) if account.user.role.is_admin() => Ok(()),
            Some(_) => Err(message(403, "Admin access required")),
            None => Err(message(401, "Not authenticated")),
        }
    }

    fn session_user(account: &Account) -> SessionUser {
        SessionUser {
            id: account.user.user_id,
            username: account.user.username.clone(),
            email: account.user.email.clone(),
            role: account.user.role,
        }
    }

    fn mutation_reply(&self, text: &str, key: &str, row: Value) -> ApiResponse {
        if self.terse_mutations {
            message(200, text)
        } else {
            respond(200, json!({"message": text, key: row}))
        }
    }

    fn route(&mut self, request: &ApiRequest) -> ApiResponse {
        let path = request.path.trim_matches('/').to_string();
        let segments: Vec<&str> = path.split('/').collect();
        let result = match (request.method, segments.as_slice()) {
            (Method::Get, ["auth", "status"]) => Ok(self.auth_status()),
            (Method::Post, ["auth", "login"]) => self.login(request),
            (Method::Post, ["auth", "signup"]) => self.signup(request),
            (Method::Get, ["auth", "logout"]) => {
                self.session = None;
                Ok(message(200, "Logged out"))
            }
            (Method::Get, ["games"]) => Ok(respond(200, json!(self.games))),
            (Method::Get, ["games", "search"]) => Ok(self.search_games(request)),
            (Method::Get, ["games", "filter"]) => Ok(self.filter_games(request)),
            (Method::Get, ["games", "genres"]) => Ok(self.genres()),
            (Method::Get, ["games", id]) => self.game(id),
            (Method::Get, ["cart"]) => self.cart(),
            (Method::Get, ["cart", "count"]) => self.cart_count(),
            (Method::Post, ["cart", "add"]) => self.cart_add(request),
            (Method::Post, ["cart", "update"]) => self.cart_update(request),
            (Method::Post, ["cart", "remove"]) => self.cart_remove(request),
            (Method::Post, ["orders", "create"]) => self.create_order(request),
            (Method::Get, ["orders"]) => self.list_orders(request),
            (Method::Get, ["orders", "search"]) => self.search_order(request),
            (_, ["admin", rest @ ..]) => self.require_admin().and_then(|()| self.admin(request, rest)),
            _ => Err(message(404, "Not found")),
        };
        unwrap_response(result)
    }

    fn auth_status(&self) -> ApiResponse {
        match self.current_account() {
            Some(account) => respond(
                200,
                json!({"isAuthenticated": true, "user": Self::session_user(account)}),
            ),
            None => respond(200, json!({"isAuthenticated": false, "user": null})),
        }
    }

    fn login(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let body: LoginBody = body_as(request)?;
        let account = self
            .accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(&body.email) && a.password == body.password)
            .cloned()
            .ok_or_else(|| message(401, "Invalid email or password"))?;
        self.session = Some(account.user.user_id);
        Ok(respond(
            200,
            json!({"message": "Login successful", "user": Self::session_user(&account)}),
        ))
    }

    fn signup(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let body: SignupBody = body_as(request)?;
        if self
            .accounts
            .iter()
            .any(|a| a.user.email.eq_ignore_ascii_case(&body.email))
        {
            return Err(message(409, "Email already registered"));
        }
        let user = AdminUser {
            user_id: self.next_id(),
            username: body.username,
            email: body.email,
            role: Role::User,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        self.accounts.push(Account {
            user: user.clone(),
            password: body.password,
        });
        Ok(respond(201, json!({"message": "Account created", "user": user})))
    }

    fn search_games(&self, request: &ApiRequest) -> ApiResponse {
        let title = request.query_value("title").unwrap_or_default().to_lowercase();
        let found: Vec<&Game> = self
            .games
            .iter()
            .filter(|g| g.title.to_lowercase().contains(&title))
            .collect();
        respond(200, json!(found))
    }

    fn filter_games(&self, request: &ApiRequest) -> ApiResponse {
        let genre = request.query_value("genre").unwrap_or_default();
        let found: Vec<&Game> = self
            .games
            .iter()
            .filter(|g| g.genre.eq_ignore_ascii_case(genre))
            .collect();
        respond(200, json!(found))
    }

    fn genres(&self) -> ApiResponse {
        let rows: Vec<Value> = self
            .games
            .iter()
            .map(|g| g.genre.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .map(|genre| json!({"genre": genre}))
            .collect();
        respond(200, json!(rows))
    }

    fn game(&self, id: &str) -> Result<ApiResponse, ApiResponse> {
        let id = parse_id(id)?;
        self.games
            .iter()
            .find(|g| g.game_id == id)
            .map(|g| respond(200, json!(g)))
            .ok_or_else(|| message(404, "Game not found"))
    }

    fn cart(&self) -> Result<ApiResponse, ApiResponse> {
        self.require_user()?;
        let count: u32 = self.cart.iter().map(|l| l.quantity).sum();
        Ok(respond(
            200,
            json!({
                "cartItems": self.cart,
                "itemCount": count,
                "total": cart_total(&self.cart),
            }),
        ))
    }

    fn cart_count(&self) -> Result<ApiResponse, ApiResponse> {
        self.require_user()?;
        let count: u32 = self.cart.iter().map(|l| l.quantity).sum();
        Ok(respond(200, json!({"itemCount": count})))
    }

    fn stock_error(available: u32) -> ApiResponse {
        respond(
            400,
            json!({
                "message": "Requested quantity exceeds available stock",
                "availableQuantity": available,
            }),
        )
    }

    fn cart_add(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        self.require_user()?;
        let body: CartBody = body_as(request)?;
        let game_id = body.game_id.ok_or_else(|| message(400, "gameId is required"))?;
        let quantity = u32::try_from(body.quantity.unwrap_or(1))
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| message(400, "Invalid quantity"))?;
        let game = self
            .games
            .iter()
            .find(|g| g.game_id == game_id)
            .cloned()
            .ok_or_else(|| message(404, "Game not found"))?;
        let existing = self
            .cart
            .iter()
            .find(|l| l.game_id == game_id)
            .map_or(0, |l| l.quantity);
        if existing + quantity > game.stock_quantity {
            return Err(Self::stock_error(game.stock_quantity));
        }
        if let Some(line) = self.cart.iter_mut().find(|l| l.game_id == game_id) {
            line.quantity += quantity;
        } else {
            let cart_id = self.next_id();
            self.cart.push(CartLine {
                cart_id,
                game_id,
                title: game.title,
                price: game.price,
                quantity,
                gameicon: game.gameicon,
            });
        }
        Ok(message(200, "Added to cart"))
    }

    fn cart_update(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        self.require_user()?;
        let body: CartBody = body_as(request)?;
        let cart_id = body.cart_id.ok_or_else(|| message(400, "cartId is required"))?;
        let quantity = u32::try_from(body.quantity.unwrap_or(0))
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| message(400, "Invalid quantity"))?;
        let game_id = self
            .cart
            .iter()
            .find(|l| l.cart_id == cart_id)
            .map(|l| l.game_id)
            .ok_or_else(|| message(404, "Cart item not found"))?;
        let stock = self
            .games
            .iter()
            .find(|g| g.game_id == game_id)
            .map_or(0, |g| g.stock_quantity);
        if quantity > stock {
            return Err(Self::stock_error(stock));
        }
        if let Some(line) = self.cart.iter_mut().find(|l| l.cart_id == cart_id) {
            line.quantity = quantity;
        }
        Ok(message(200, "Cart updated"))
    }

    fn cart_remove(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        self.require_user()?;
        let body: CartBody = body_as(request)?;
        let cart_id = body.cart_id.ok_or_else(|| message(400, "cartId is required"))?;
        let before = self.cart.len();
        self.cart.retain(|l| l.cart_id != cart_id);
        if self.cart.len() == before {
            return Err(message(404, "Cart item not found"));
        }
        Ok(message(200, "Item removed"))
    }

    fn create_order(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let owner = self.require_user()?;
        let method = request
            .body
            .as_ref()
            .and_then(|b| b.get("paymentMethod"))
            .and_then(Value::as_str)
            .ok_or_else(|| message(400, "Payment method is required"))?
            .to_string();
        if self.cart.is_empty() {
            return Err(message(400, "Cart is empty"));
        }
        for line in &self.cart {
            let stock = self
                .games
                .iter()
                .find(|g| g.game_id == line.game_id)
                .map_or(0, |g| g.stock_quantity);
            if line.quantity > stock {
                return Err(message(400, &format!("Insufficient stock for {}", line.title)));
            }
        }
        let lines = std::mem::take(&mut self.cart);
        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            if let Some(game) = self.games.iter_mut().find(|g| g.game_id == line.game_id) {
                game.stock_quantity -= line.quantity;
            }
            items.push(OrderItem {
                order_item_id: self.next_id(),
                title: Some(line.title.clone()),
                price: line.price,
                quantity: line.quantity,
                subtotal: line.subtotal(),
            });
        }
        let account = self.current_account().cloned();
        let order = Order {
            order_id: self.next_id(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            status: OrderStatus::Pending,
            total_amount: cart_total(&lines),
            payment_method: Some(method),
            items,
            username: account.as_ref().map(|a| a.user.username.clone()),
            email: account.map(|a| a.user.email),
        };
        self.orders.push((owner, order.clone()));
        Ok(respond(201, json!({"message": "Order created", "order": order})))
    }

    fn own_orders(&self, owner: i64) -> impl Iterator<Item = &Order> {
        self.orders
            .iter()
            .filter(move |(o, _)| *o == owner)
            .map(|(_, order)| order)
    }

    fn list_orders(&self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let owner = self.require_user()?;
        let filter = request.query_value("status").map(OrderStatus::parse);
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for order in self.own_orders(owner) {
            *counts.entry(order.status.label()).or_insert(0) += 1;
        }
        let orders: Vec<&Order> = self
            .own_orders(owner)
            .filter(|o| filter.as_ref().is_none_or(|f| &o.status == f))
            .collect();
        Ok(respond(200, json!({"orders": orders, "statusCounts": counts})))
    }

    fn search_order(&self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let owner = self.require_user()?;
        let id = parse_id(request.query_value("orderId").unwrap_or_default())?;
        self.own_orders(owner)
            .find(|o| o.order_id == id)
            .map(|o| respond(200, json!({"order": o})))
            .ok_or_else(|| message(404, "Order not found"))
    }

    fn admin(&mut self, request: &ApiRequest, rest: &[&str]) -> Result<ApiResponse, ApiResponse> {
        match (request.method, rest) {
            (Method::Get, ["games"]) => Ok(respond(200, json!({"games": self.games}))),
            (Method::Post, ["games"]) => {
                let body: GameBody = body_as(request)?;
                let game = Game {
                    game_id: self.next_id(),
                    title: body.title,
                    description: body.description,
                    price: body.price,
                    genre: body.genre,
                    platform: body.platform,
                    stock_quantity: body.stock_quantity,
                    gameicon: body.gameicon,
                    created_at: Some(chrono::Utc::now().to_rfc3339()),
                };
                self.games.push(game.clone());
                Ok(self.mutation_reply("Game created", "game", json!(game)))
            }
            (Method::Put, ["games", id]) => {
                let id = parse_id(id)?;
                let body: GameBody = body_as(request)?;
                let game = self
                    .games
                    .iter_mut()
                    .find(|g| g.game_id == id)
                    .ok_or_else(|| message(404, "Game not found"))?;
                game.title = body.title;
                game.description = body.description;
                game.price = body.price;
                game.genre = body.genre;
                game.platform = body.platform;
                game.stock_quantity = body.stock_quantity;
                game.gameicon = body.gameicon;
                let row = json!(game);
                Ok(self.mutation_reply("Game updated", "game", row))
            }
            (Method::Delete, ["games", id]) => {
                let id = parse_id(id)?;
                let before = self.games.len();
                self.games.retain(|g| g.game_id != id);
                if self.games.len() == before {
                    return Err(message(404, "Game not found"));
                }
                Ok(message(200, "Game deleted"))
            }
            (Method::Get, ["users"]) => {
                let users: Vec<&AdminUser> = self.accounts.iter().map(|a| &a.user).collect();
                Ok(respond(200, json!(users)))
            }
            (Method::Post, ["users"]) => {
                let body: UserBody = body_as(request)?;
                if self
                    .accounts
                    .iter()
                    .any(|a| a.user.email.eq_ignore_ascii_case(&body.email))
                {
                    return Err(message(409, "Email already registered"));
                }
                let password = body
                    .password
                    .ok_or_else(|| message(400, "Password is required"))?;
                let user = AdminUser {
                    user_id: self.next_id(),
                    username: body.username,
                    email: body.email,
                    role: body.role,
                    created_at: Some(chrono::Utc::now().to_rfc3339()),
                };
                self.accounts.push(Account {
                    user: user.clone(),
                    password,
                });
                Ok(self.mutation_reply("User created", "user", json!(user)))
            }
            (Method::Put, ["users", id]) => {
                let id = parse_id(id)?;
                let body: UserBody = body_as(request)?;
                let account = self
                    .accounts
                    .iter_mut()
                    .find(|a| a.user.user_id == id)
                    .ok_or_else(|| message(404, "User not found"))?;
                account.user.username = body.username;
                account.user.email = body.email;
                account.user.role = body.role;
                if let Some(password) = body.password {
                    account.password = password;
                }
                let row = json!(account.user);
                Ok(self.mutation_reply("User updated", "user", row))
            }
            (Method::Delete, ["users", id]) => {
                let id = parse_id(id)?;
                let before = self.accounts.len();
                self.accounts.retain(|a| a.user.user_id != id);
                if self.accounts.len() == before {
                    return Err(message(404, "User not found"));
                }
                Ok(message(200, "User deleted"))
            }
            (Method::Get, ["orders"]) => {
                let orders: Vec<&Order> = self.orders.iter().map(|(_, o)| o).collect();
                Ok(respond(200, json!({"orders": orders})))
            }
            (Method::Put, ["orders", id, "status"]) => {
                let id = parse_id(id)?;
                let status = request
                    .body
                    .as_ref()
                    .and_then(|b| b.get("status"))
                    .and_then(Value::as_str)
                    .map(OrderStatus::parse)
                    .ok_or_else(|| message(400, "Status is required"))?;
                if matches!(status, OrderStatus::Other(_)) {
                    return Err(message(400, "Invalid status"));
                }
                let order = self
                    .orders
                    .iter_mut()
                    .map(|(_, o)| o)
                    .find(|o| o.order_id == id)
                    .ok_or_else(|| message(404, "Order not found"))?;
                order.status = status;
                let row = json!(order);
                Ok(self.mutation_reply("Order status updated", "order", row))
            }
            (Method::Delete, ["orders", id]) => {
                let id = parse_id(id)?;
                let before = self.orders.len();
                self.orders.retain(|(_, o)| o.order_id != id);
                if self.orders.len() == before {
                    return Err(message(404, "Order not found"));
                }
                Ok(message(200, "Order deleted"))
            }
            (Method::Get, ["inventory"]) => {
                let rows: Vec<InventoryRow> = self.games.iter().map(inventory_row).collect();
                Ok(respond(200, json!(rows)))
            }
            (Method::Put, ["inventory", id]) => {
                let id = parse_id(id)?;
                let stock = request
                    .body
                    .as_ref()
                    .and_then(|b| b.get("stock_quantity"))
                    .and_then(Value::as_i64)
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| message(400, "Stock must be zero or more"))?;
                let game = self
                    .games
                    .iter_mut()
                    .find(|g| g.game_id == id)
                    .ok_or_else(|| message(404, "Game not found"))?;
                game.stock_quantity = stock;
                let row = json!(inventory_row(game));
                Ok(self.mutation_reply("Stock updated", "game", row))
            }
            _ => Err(message(404, "Not found")),
        }
    }
}

fn inventory_row(game: &Game) -> InventoryRow {
    InventoryRow {
        game_id: game.game_id,
        title: game.title.clone(),
        platform: game.platform.clone(),
        genre: game.genre.clone(),
        stock_quantity: game.stock_quantity,
    }
}

/// Shared handle to the fake backend; clones see the same data and log.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Rc<RefCell<FakeState>>,
}

impl FakeBackend {
    /// Empty store with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A small catalog plus `shopper@example.com` / `password` and
    /// `admin@example.com` / `admin`.
    #[must_use]
    pub fn seeded() -> Self {
        let backend = Self::new();
        backend.add_account("shopper", "shopper@example.com", "password", Role::User);
        backend.add_account("admin", "admin@example.com", "admin", Role::Admin);
        for (title, price, genre, platform, stock, created) in [
            ("Hades", "19.99", "Roguelike", "PC", 10, "2024-01-10T00:00:00Z"),
            ("Celeste", "5.00", "Platformer", "Switch", 3, "2023-06-01T00:00:00Z"),
            ("Stardew Valley", "0.00", "Simulation", "PC", 25, "2024-04-20T00:00:00Z"),
            ("Disco Elysium", "39.99", "RPG", "PC", 0, "2022-11-05T00:00:00Z"),
        ] {
            backend.add_game(title, price, genre, platform, stock, created);
        }
        backend
    }

    pub fn add_account(&self, username: &str, email: &str, password: &str, role: Role) -> i64 {
        let mut state = self.state.borrow_mut();
        let user_id = state.next_id();
        state.accounts.push(Account {
            user: AdminUser {
                user_id,
                username: username.to_string(),
                email: email.to_string(),
                role,
                created_at: None,
            },
            password: password.to_string(),
        });
        user_id
    }

    pub fn add_game(
        &self,
        title: &str,
        price: &str,
        genre: &str,
        platform: &str,
        stock_quantity: u32,
        created_at: &str,
    ) -> i64 {
        let mut state = self.state.borrow_mut();
        let game_id = state.next_id();
        state.games.push(Game {
            game_id,
            title: title.to_string(),
            description: format!("{title} for {platform}"),
            price: Money::parse_or_zero(price),
            genre: genre.to_string(),
            platform: platform.to_string(),
            stock_quantity,
            gameicon: None,
            created_at: Some(created_at.to_string()),
        });
        game_id
    }

    /// Sign in without a login request. Unknown emails sign out.
    pub fn sign_in_as(&self, email: &str) {
        let mut state = self.state.borrow_mut();
        state.session = state
            .accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(email))
            .map(|a| a.user.user_id);
    }

    /// Fail every request with a transport error while `true`.
    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    /// Answer admin mutations with a bare message instead of echoing the row.
    pub fn set_terse_mutations(&self, terse: bool) {
        self.state.borrow_mut().terse_mutations = terse;
    }

    /// Answer the next `method path` request with `status` and `body`.
    pub fn respond_once(&self, method: Method, path: &str, status: u16, body: Value) {
        self.state.borrow_mut().canned.push_back(Canned {
            method,
            path: path.to_string(),
            response: ApiResponse::new(status, body),
        });
    }

    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().log.clone()
    }

    /// Number of logged requests for `method path`.
    #[must_use]
    pub fn calls(&self, method: Method, path: &str) -> usize {
        self.state
            .borrow()
            .log
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    #[must_use]
    pub fn game_id(&self, title: &str) -> Option<i64> {
        self.state
            .borrow()
            .games
            .iter()
            .find(|g| g.title == title)
            .map(|g| g.game_id)
    }

    #[must_use]
    pub fn stock(&self, game_id: i64) -> Option<u32> {
        self.state
            .borrow()
            .games
            .iter()
            .find(|g| g.game_id == game_id)
            .map(|g| g.stock_quantity)
    }

    #[must_use]
    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.state.borrow().cart.clone()
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut state = self.state.borrow_mut();
        state.log.push(request.clone());
        if state.offline {
            return Err(ApiError::Transport(String::from("connection refused")));
        }
        let canned = state
            .canned
            .iter()
            .position(|c| c.method == request.method && c.path == request.path);
        if let Some(response) = canned
            .and_then(|idx| state.canned.remove(idx))
            .map(|c| c.response)
        {
            return Ok(response);
        }
        Ok(state.route(&request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn routes_login_and_status() {
        let backend = FakeBackend::seeded();
        let reply = block_on(backend.send(ApiRequest::post(
            "/auth/login",
            json!({"email": "shopper@example.com", "password": "password"}),
        )))
        .unwrap();
        assert_eq!(reply.status, 200);
        let status = block_on(backend.send(ApiRequest::get("/auth/status"))).unwrap();
        assert_eq!(status.body["isAuthenticated"], true);
        assert_eq!(backend.calls(Method::Get, "/auth/status"), 1);
    }

    #[test]
    fn canned_responses_are_used_once() {
        let backend = FakeBackend::seeded();
        backend.respond_once(Method::Get, "/games", 500, json!({"message": "boom"}));
        let first = block_on(backend.send(ApiRequest::get("/games"))).unwrap();
        let second = block_on(backend.send(ApiRequest::get("/games"))).unwrap();
        assert_eq!(first.status, 500);
        assert_eq!(second.status, 200);
    }

    #[test]
    fn admin_routes_require_admin_role() {
        let backend = FakeBackend::seeded();
        backend.sign_in_as("shopper@example.com");
        let reply = block_on(backend.send(ApiRequest::get("/admin/games"))).unwrap();
        assert_eq!(reply.status, 403);
        backend.set_offline(true);
        assert!(block_on(backend.send(ApiRequest::get("/games"))).is_err());
    }
}
