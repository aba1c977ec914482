//! Checkout phases and payment methods.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear checkout flow held entirely client-side.
///
/// `Cart → Payment → Confirmation`, with `Payment → Cart` as the only way
/// back. `Confirmation` is terminal; leaving it means navigating away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Cart,
    Payment,
    Confirmation,
}

impl CheckoutPhase {
    /// Step number shown in the progress indicator.
    #[must_use]
    pub const fn step(self) -> u8 {
        match self {
            Self::Cart => 1,
            Self::Payment => 2,
            Self::Confirmation => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cart => "Cart",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Digital Wallet")]
    DigitalWallet,
    #[serde(rename = "Gift Card")]
    GiftCard,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::DigitalWallet, Self::GiftCard];

    /// Value sent as `paymentMethod` and shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::DigitalWallet => "Digital Wallet",
            Self::GiftCard => "Gift Card",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
