//! Order history: records, status normalization, filter chips and search.
use crate::api::{StoreClient, Transport};
use crate::money::{Money, null_as_default};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Order status normalized at the boundary.
///
/// Endpoints disagree on casing (`"Pending"` vs `"pending"`) and spelling
/// (`"cancelled"`); everything folds into these variants on the way in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Canceled,
    Other(String),
}

impl OrderStatus {
    pub const KNOWN: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Canceled,
    ];

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "canceled" | "cancelled" => Self::Canceled,
            other => Self::Other(other.to_string()),
        }
    }

    /// Lowercase wire value used for query parameters and updates.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
            Self::Other(raw) => raw.as_str(),
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        let wire = self.as_wire();
        let mut chars = wire.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    #[must_use]
    pub const fn badge(&self) -> StatusBadge {
        let (icon, tone) = match self {
            Self::Pending => (BadgeIcon::Clock, BadgeTone::Yellow),
            Self::Processing => (BadgeIcon::Refresh, BadgeTone::Blue),
            Self::Shipped => (BadgeIcon::Truck, BadgeTone::Indigo),
            Self::Delivered => (BadgeIcon::Check, BadgeTone::Green),
            Self::Canceled => (BadgeIcon::Ban, BadgeTone::Red),
            Self::Other(_) => (BadgeIcon::Neutral, BadgeTone::Gray),
        };
        StatusBadge { icon, tone }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|raw| Self::parse(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeIcon {
    Clock,
    Refresh,
    Truck,
    Check,
    Ban,
    Neutral,
}

impl BadgeIcon {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Refresh => "refresh",
            Self::Truck => "truck",
            Self::Check => "check",
            Self::Ban => "ban",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Yellow,
    Blue,
    Indigo,
    Green,
    Red,
    Gray,
}

impl BadgeTone {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Green => "green",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub icon: BadgeIcon,
    pub tone: BadgeTone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(alias = "id", default)]
    pub order_item_id: i64,
    /// `None` when the game behind the line has been deleted.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Money,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    /// Server-computed; shown as-is.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtotal: Money,
}

impl OrderItem {
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unavailable title")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOrder")]
pub struct Order {
    pub order_id: i64,
    pub created_at: Option<String>,
    pub status: OrderStatus,
    pub total_amount: Money,
    pub payment_method: Option<String>,
    pub items: Vec<OrderItem>,
    /// Customer columns present on admin listings.
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct RawOrder {
    #[serde(alias = "id")]
    order_id: i64,
    #[serde(default)]
    order_date: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    order_status: Option<String>,
    #[serde(default)]
    total_amount: Option<Money>,
    #[serde(default)]
    payment_method: Option<String>,
    #[serde(default)]
    items: Option<Vec<Option<OrderItem>>>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl From<RawOrder> for Order {
    fn from(raw: RawOrder) -> Self {
        let status = raw
            .status
            .or(raw.order_status)
            .map_or(OrderStatus::Pending, |s| OrderStatus::parse(&s));
        Self {
            order_id: raw.order_id,
            created_at: raw.order_date.or(raw.created_at),
            status,
            total_amount: raw.total_amount.unwrap_or_default(),
            payment_method: raw.payment_method,
            items: raw.items.unwrap_or_default().into_iter().flatten().collect(),
            username: raw.username,
            email: raw.email,
        }
    }
}

impl Order {
    /// Items gone server-side render as an explicit "no longer available" state.
    #[must_use]
    pub fn items_unavailable(&self) -> bool {
        self.items.is_empty()
    }

    /// Human date such as `Mar 01, 2024`, falling back to the raw value.
    #[must_use]
    pub fn display_date(&self) -> String {
        let Some(raw) = self.created_at.as_deref() else {
            return String::from("-");
        };
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
            .map_or_else(|_| raw.to_string(), |dt| dt.format("%b %d, %Y").to_string())
    }

    #[must_use]
    pub fn id_matches(&self, term: &str) -> bool {
        self.order_id.to_string().contains(term.trim())
    }
}

/// `GET /orders` payload after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListing {
    pub orders: Vec<Order>,
    pub status_counts: BTreeMap<OrderStatus, u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountValue {
    Num(u64),
    Text(String),
}

impl CountValue {
    fn value(&self) -> u32 {
        match self {
            Self::Num(n) => u32::try_from(*n).unwrap_or(u32::MAX),
            Self::Text(t) => t.trim().parse().unwrap_or(0),
        }
    }
}

#[derive(Deserialize)]
struct CountRow {
    #[serde(alias = "order_status")]
    status: String,
    count: CountValue,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCounts {
    Map(BTreeMap<String, CountValue>),
    Rows(Vec<CountRow>),
}

#[derive(Deserialize)]
pub(crate) struct RawListing {
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(rename = "statusCounts", default)]
    status_counts: Option<RawCounts>,
}

impl From<RawListing> for OrderListing {
    fn from(raw: RawListing) -> Self {
        let mut status_counts = BTreeMap::new();
        let pairs: Vec<(String, u32)> = match raw.status_counts {
            Some(RawCounts::Map(map)) => map.into_iter().map(|(k, v)| (k, v.value())).collect(),
            Some(RawCounts::Rows(rows)) => rows
                .into_iter()
                .map(|row| (row.status, row.count.value()))
                .collect(),
            None => Vec::new(),
        };
        for (status, count) in pairs {
            *status_counts.entry(OrderStatus::parse(&status)).or_insert(0) += count;
        }
        Self {
            orders: raw.orders,
            status_counts,
        }
    }
}

/// One filter control: `status == None` is the "All" chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChip {
    pub status: Option<OrderStatus>,
    pub label: String,
    pub count: u32,
}

/// What a (debounced) search term should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPlan {
    /// Empty term: show the filter-scoped list again.
    Restore,
    /// Purely numeric: ask the backend for that order id.
    ById(i64),
    /// Anything else: substring match on the loaded ids.
    Local(String),
}

#[must_use]
pub fn plan_search(term: &str) -> SearchPlan {
    let term = term.trim();
    if term.is_empty() {
        return SearchPlan::Restore;
    }
    if term.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(id) = term.parse::<i64>() {
            return SearchPlan::ById(id);
        }
    }
    SearchPlan::Local(term.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrdersEvent {
    LoadStarted(Option<OrderStatus>),
    Loaded(OrderListing),
    LoadFailed(String),
    TermChanged(String),
    Restored,
    LocalFiltered(String),
    SearchStarted,
    SearchResults(Vec<Order>),
    SearchFailed(String),
    Toggled(i64),
    Highlight(Order),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrdersState {
    /// Last filter-scoped listing from the backend.
    pub scoped: Vec<Order>,
    /// What the list renders after any search.
    pub visible: Vec<Order>,
    pub status_counts: BTreeMap<OrderStatus, u32>,
    pub filter: Option<OrderStatus>,
    pub term: String,
    pub expanded: Option<i64>,
    pub loading: bool,
    pub searching: bool,
    pub error: Option<String>,
    pub search_error: Option<String>,
    /// Order just created by checkout, shown as a banner.
    pub highlight: Option<Order>,
}

impl OrdersState {
    pub fn apply(&mut self, event: OrdersEvent) {
        match event {
            OrdersEvent::LoadStarted(filter) => {
                self.filter = filter;
                self.loading = true;
                self.error = None;
            }
            OrdersEvent::Loaded(listing) => {
                self.loading = false;
                self.scoped = listing.orders;
                self.status_counts = listing.status_counts;
                self.visible = self.scoped.clone();
                self.term.clear();
                self.search_error = None;
                if let Some(open) = self.expanded {
                    if !self.visible.iter().any(|o| o.order_id == open) {
                        self.expanded = None;
                    }
                }
            }
            OrdersEvent::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            OrdersEvent::TermChanged(term) => self.term = term,
            OrdersEvent::Restored => {
                self.searching = false;
                self.search_error = None;
                self.visible = self.scoped.clone();
            }
            OrdersEvent::LocalFiltered(term) => {
                self.searching = false;
                self.search_error = None;
                self.visible = self
                    .scoped
                    .iter()
                    .filter(|o| o.id_matches(&term))
                    .cloned()
                    .collect();
            }
            OrdersEvent::SearchStarted => {
                self.searching = true;
                self.search_error = None;
            }
            OrdersEvent::SearchResults(orders) => {
                self.searching = false;
                self.visible = orders;
            }
            OrdersEvent::SearchFailed(message) => {
                self.searching = false;
                self.search_error = Some(message);
            }
            OrdersEvent::Toggled(order_id) => {
                self.expanded = if self.expanded == Some(order_id) {
                    None
                } else {
                    Some(order_id)
                };
            }
            OrdersEvent::Highlight(order) => self.highlight = Some(order),
        }
    }

    #[must_use]
    pub fn is_expanded(&self, order_id: i64) -> bool {
        self.expanded == Some(order_id)
    }

    /// "All" plus one chip per status present.
    ///
    /// Counts come from the backend aggregate when it sent one, otherwise
    /// from the orders currently loaded.
    #[must_use]
    pub fn status_chips(&self) -> Vec<StatusChip> {
        let counts = if self.status_counts.is_empty() {
            let mut counted = BTreeMap::new();
            for order in &self.scoped {
                *counted.entry(order.status.clone()).or_insert(0_u32) += 1;
            }
            counted
        } else {
            self.status_counts.clone()
        };
        let total = counts.values().copied().sum();
        let mut chips = vec![StatusChip {
            status: None,
            label: String::from("All"),
            count: total,
        }];
        chips.extend(counts.into_iter().filter(|(_, n)| *n > 0).map(|(status, count)| {
            StatusChip {
                label: status.label(),
                status: Some(status),
                count,
            }
        }));
        chips
    }
}

/// Fetch the filter-scoped listing.
pub async fn fetch_orders<T: Transport>(
    client: &StoreClient<T>,
    filter: Option<&OrderStatus>,
) -> OrdersEvent {
    match client.orders(filter).await {
        Ok(listing) => OrdersEvent::Loaded(listing),
        Err(err) => {
            log::error!("failed to load orders: {err}");
            OrdersEvent::LoadFailed(err.user_message("Failed to load your orders"))
        }
    }
}

/// Run a settled (post-debounce) search term.
pub async fn run_search<T: Transport>(client: &StoreClient<T>, term: &str) -> OrdersEvent {
    match plan_search(term) {
        SearchPlan::Restore => OrdersEvent::Restored,
        SearchPlan::Local(term) => OrdersEvent::LocalFiltered(term),
        SearchPlan::ById(order_id) => match client.search_order(order_id).await {
            Ok(found) => OrdersEvent::SearchResults(found),
            Err(err) => OrdersEvent::SearchFailed(err.user_message("Search failed")),
        },
    }
}

/// Order history view bound to a client.
pub struct OrdersController<T> {
    client: StoreClient<T>,
    state: OrdersState,
}

impl<T: Transport> OrdersController<T> {
    #[must_use]
    pub fn new(client: StoreClient<T>) -> Self {
        Self {
            client,
            state: OrdersState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &OrdersState {
        &self.state
    }

    pub async fn load_orders(&mut self, filter: Option<OrderStatus>) {
        self.state.apply(OrdersEvent::LoadStarted(filter.clone()));
        let event = fetch_orders(&self.client, filter.as_ref()).await;
        self.state.apply(event);
    }

    pub async fn search_orders(&mut self, term: &str) {
        self.state.apply(OrdersEvent::TermChanged(term.to_string()));
        if matches!(plan_search(term), SearchPlan::ById(_)) {
            self.state.apply(OrdersEvent::SearchStarted);
        }
        let event = run_search(&self.client, term).await;
        self.state.apply(event);
    }

    pub fn toggle_expand(&mut self, order_id: i64) {
        self.state.apply(OrdersEvent::Toggled(order_id));
    }
}
