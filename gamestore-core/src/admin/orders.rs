use super::{AdminEntity, Mutation};
use crate::api::{StoreClient, Transport};
use crate::error::ApiError;
use crate::forms::{FieldErrors, FormModel};
use crate::orders::{Order, OrderStatus};

impl AdminEntity for Order {
    const NOUN: &'static str = "order";

    fn id(&self) -> i64 {
        self.order_id
    }

    fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self.id_matches(&needle)
            || self
                .username
                .as_deref()
                .is_some_and(|u| u.to_lowercase().contains(&needle))
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle))
    }

    fn category(&self) -> String {
        self.status.label()
    }
}

/// Status dropdown in the order edit modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderStatusForm {
    pub status: String,
}

impl OrderStatusForm {
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            status: order.status.as_wire().to_string(),
        }
    }
}

impl FormModel for OrderStatusForm {
    type Payload = OrderStatus;

    fn set_field(&mut self, field: &str, value: String) {
        if field == "status" {
            self.status = value;
        } else {
            log::warn!("order form has no field `{field}`");
        }
    }

    fn validate(&self) -> Result<OrderStatus, FieldErrors> {
        let mut errors = FieldErrors::default();
        let status = OrderStatus::parse(&self.status);
        if self.status.trim().is_empty() {
            errors.insert("status", "Status is required");
        } else if matches!(status, OrderStatus::Other(_)) {
            errors.insert("status", "Unknown order status");
        }
        errors.into_result(|| status)
    }
}

/// Change an order's status. Without an echoed row the known row is
/// patched with the new status.
///
/// # Errors
/// Returns the backend rejection or a transport failure.
pub async fn save_order_status<T: Transport>(
    client: &StoreClient<T>,
    order: &Order,
    status: &OrderStatus,
) -> Result<Mutation<Order>, ApiError> {
    let echoed = client.update_order_status(order.order_id, status).await?;
    let row = echoed.unwrap_or_else(|| Order {
        status: status.clone(),
        ..order.clone()
    });
    Ok(Mutation::Updated(order.order_id, Some(row)))
}
