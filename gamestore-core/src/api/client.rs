use super::transport::{ApiRequest, Transport};
use crate::admin::{AdminUser, GamePayload, InventoryRow, UserPayload};
use crate::auth::{AuthStatus, Credentials, NewAccount, SessionUser};
use crate::cart::CartSnapshot;
use crate::catalog::{Game, GenreEntry};
use crate::checkout::PaymentMethod;
use crate::error::ApiError;
use crate::orders::{Order, OrderListing, OrderStatus, RawListing};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ApiError> {
    serde_json::from_value(value).map_err(ApiError::from)
}

/// Pull `key` out of a wrapping object, or keep the body when it is not wrapped.
fn unwrap_key(body: Value, key: &str) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    }
}

/// Decode a list that may arrive bare or wrapped as `{key: [...]}`.
fn decode_list<R: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<R>, ApiError> {
    match unwrap_key(body, key) {
        Value::Null => Ok(Vec::new()),
        list => decode(list),
    }
}

/// Decode the row a mutation echoed back, if it echoed one.
fn decode_echo<R: DeserializeOwned>(body: Value, key: &str) -> Option<R> {
    let row = unwrap_key(body, key);
    serde_json::from_value(row)
        .map_err(|err| log::debug!("mutation response carried no `{key}` row: {err}"))
        .ok()
}

/// Typed endpoints of the storefront backend.
#[derive(Debug, Clone)]
pub struct StoreClient<T> {
    transport: T,
}

impl<T: Transport> StoreClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, request: ApiRequest) -> Result<Value, ApiError> {
        log::debug!("{} {}", request.method, request.path);
        self.transport.send(request).await?.into_result()
    }

    // -- auth ------------------------------------------------------------

    /// # Errors
    /// Transport failures and non-2xx statuses are returned unchanged so the
    /// session guard can tell them apart.
    pub async fn auth_status(&self) -> Result<AuthStatus, ApiError> {
        decode(self.call(ApiRequest::get("/auth/status")).await?)
    }

    /// # Errors
    /// Returns the backend rejection (bad credentials) or a transport error.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser, ApiError> {
        let body = self
            .call(ApiRequest::post("/auth/login", json!(credentials)))
            .await?;
        decode(unwrap_key(body, "user"))
    }

    /// # Errors
    /// Returns the backend rejection (duplicate email, …) or a transport error.
    pub async fn signup(&self, account: &NewAccount) -> Result<Value, ApiError> {
        self.call(ApiRequest::post("/auth/signup", json!(account)))
            .await
    }

    /// # Errors
    /// Returns any failure; callers clear the local session regardless.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.call(ApiRequest::get("/auth/logout")).await.map(|_| ())
    }

    // -- catalog ---------------------------------------------------------

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn games(&self) -> Result<Vec<Game>, ApiError> {
        decode_list(self.call(ApiRequest::get("/games")).await?, "games")
    }

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn search_games(&self, title: &str) -> Result<Vec<Game>, ApiError> {
        let request = ApiRequest::get("/games/search").with_query("title", title);
        decode_list(self.call(request).await?, "games")
    }

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn games_by_genre(&self, genre: &str) -> Result<Vec<Game>, ApiError> {
        let request = ApiRequest::get("/games/filter").with_query("genre", genre);
        decode_list(self.call(request).await?, "games")
    }

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn genres(&self) -> Result<Vec<String>, ApiError> {
        let entries: Vec<GenreEntry> =
            decode_list(self.call(ApiRequest::get("/games/genres")).await?, "genres")?;
        Ok(entries.into_iter().map(GenreEntry::into_name).collect())
    }

    /// # Errors
    /// A missing game comes back as a 404 status error (see [`ApiError::is_not_found`]).
    pub async fn game(&self, game_id: i64) -> Result<Game, ApiError> {
        let body = self
            .call(ApiRequest::get(format!("/games/{game_id}")))
            .await?;
        decode(unwrap_key(body, "game"))
    }

    // -- cart ------------------------------------------------------------

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn cart(&self) -> Result<CartSnapshot, ApiError> {
        decode(self.call(ApiRequest::get("/cart")).await?)
    }

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn cart_count(&self) -> Result<u32, ApiError> {
        let body = self.call(ApiRequest::get("/cart/count")).await?;
        Ok(body
            .get("itemCount")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0))
    }

    /// # Errors
    /// Stock-limit rejections surface through [`ApiError::stock_exceeded`].
    pub async fn add_to_cart(&self, game_id: i64, quantity: u32) -> Result<(), ApiError> {
        let body = json!({"gameId": game_id, "quantity": quantity});
        self.call(ApiRequest::post("/cart/add", body)).await.map(|_| ())
    }

    /// # Errors
    /// Stock-limit rejections surface through [`ApiError::stock_exceeded`].
    pub async fn update_cart_item(&self, cart_id: i64, quantity: u32) -> Result<(), ApiError> {
        let body = json!({"cartId": cart_id, "quantity": quantity});
        self.call(ApiRequest::post("/cart/update", body))
            .await
            .map(|_| ())
    }

    /// # Errors
    /// Returns transport or status failures.
    pub async fn remove_cart_item(&self, cart_id: i64) -> Result<(), ApiError> {
        let body = json!({"cartId": cart_id});
        self.call(ApiRequest::post("/cart/remove", body))
            .await
            .map(|_| ())
    }

    // -- orders ----------------------------------------------------------

    /// # Errors
    /// The backend's message is carried verbatim in the status error.
    pub async fn create_order(&self, method: PaymentMethod) -> Result<Order, ApiError> {
        let body = json!({"paymentMethod": method.label()});
        let body = self
            .call(ApiRequest::post("/orders/create", body))
            .await?;
        decode(unwrap_key(body, "order"))
    }

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn orders(&self, status: Option<&OrderStatus>) -> Result<OrderListing, ApiError> {
        let mut request = ApiRequest::get("/orders");
        if let Some(status) = status {
            request = request.with_query("status", status.as_wire());
        }
        let body = self.call(request).await?;
        if body.is_array() {
            return Ok(OrderListing {
                orders: decode(body)?,
                ..OrderListing::default()
            });
        }
        decode::<RawListing>(body).map(OrderListing::from)
    }

    /// Look up one order by id. No match (404) is an empty result, not an error.
    ///
    /// # Errors
    /// Returns transport failures and non-404 statuses.
    pub async fn search_order(&self, order_id: i64) -> Result<Vec<Order>, ApiError> {
        let request =
            ApiRequest::get("/orders/search").with_query("orderId", order_id.to_string());
        let body = match self.call(request).await {
            Ok(body) => body,
            Err(err) if err.is_not_found() => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        match body {
            Value::Object(mut map) => {
                if let Some(order) = map.remove("order") {
                    return Ok(decode::<Option<Order>>(order)?.into_iter().collect());
                }
                decode_list(Value::Object(map), "orders")
            }
            other => decode_list(other, "orders"),
        }
    }

    // -- admin -----------------------------------------------------------

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn admin_games(&self) -> Result<Vec<Game>, ApiError> {
        decode_list(self.call(ApiRequest::get("/admin/games")).await?, "games")
    }

    /// Create a game; `Ok(None)` when the backend did not echo the new row.
    ///
    /// # Errors
    /// Returns the backend validation message or a transport failure.
    pub async fn create_game(&self, game: &GamePayload) -> Result<Option<Game>, ApiError> {
        let body = self
            .call(ApiRequest::post("/admin/games", json!(game)))
            .await?;
        Ok(decode_echo(body, "game"))
    }

    /// # Errors
    /// Returns the backend validation message or a transport failure.
    pub async fn update_game(
        &self,
        game_id: i64,
        game: &GamePayload,
    ) -> Result<Option<Game>, ApiError> {
        let body = self
            .call(ApiRequest::put(format!("/admin/games/{game_id}"), json!(game)))
            .await?;
        Ok(decode_echo(body, "game"))
    }

    /// # Errors
    /// Returns transport or status failures.
    pub async fn delete_game(&self, game_id: i64) -> Result<(), ApiError> {
        self.call(ApiRequest::delete(format!("/admin/games/{game_id}")))
            .await
            .map(|_| ())
    }

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        decode_list(self.call(ApiRequest::get("/admin/users")).await?, "users")
    }

    /// # Errors
    /// Returns the backend validation message or a transport failure.
    pub async fn create_user(&self, user: &UserPayload) -> Result<Option<AdminUser>, ApiError> {
        let body = self
            .call(ApiRequest::post("/admin/users", json!(user)))
            .await?;
        Ok(decode_echo(body, "user"))
    }

    /// # Errors
    /// Returns the backend validation message or a transport failure.
    pub async fn update_user(
        &self,
        user_id: i64,
        user: &UserPayload,
    ) -> Result<Option<AdminUser>, ApiError> {
        let body = self
            .call(ApiRequest::put(format!("/admin/users/{user_id}"), json!(user)))
            .await?;
        Ok(decode_echo(body, "user"))
    }

    /// # Errors
    /// Returns transport or status failures.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        self.call(ApiRequest::delete(format!("/admin/users/{user_id}")))
            .await
            .map(|_| ())
    }

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn admin_orders(&self) -> Result<Vec<Order>, ApiError> {
        decode_list(self.call(ApiRequest::get("/admin/orders")).await?, "orders")
    }

    /// # Errors
    /// Returns the backend validation message or a transport failure.
    pub async fn update_order_status(
        &self,
        order_id: i64,
        status: &OrderStatus,
    ) -> Result<Option<Order>, ApiError> {
        let body = json!({"status": status.as_wire()});
        let body = self
            .call(ApiRequest::put(format!("/admin/orders/{order_id}/status"), body))
            .await?;
        Ok(decode_echo(body, "order"))
    }

    /// # Errors
    /// Returns transport or status failures.
    pub async fn delete_order(&self, order_id: i64) -> Result<(), ApiError> {
        self.call(ApiRequest::delete(format!("/admin/orders/{order_id}")))
            .await
            .map(|_| ())
    }

    /// # Errors
    /// Returns transport, status or decode failures.
    pub async fn inventory(&self) -> Result<Vec<InventoryRow>, ApiError> {
        decode_list(self.call(ApiRequest::get("/admin/inventory")).await?, "inventory")
    }

    /// # Errors
    /// Returns the backend validation message or a transport failure.
    pub async fn update_stock(
        &self,
        game_id: i64,
        stock_quantity: u32,
    ) -> Result<Option<InventoryRow>, ApiError> {
        let body = json!({"stock_quantity": stock_quantity});
        let body = self
            .call(ApiRequest::put(format!("/admin/inventory/{game_id}"), body))
            .await?;
        Ok(decode_echo(body, "game"))
    }
}
