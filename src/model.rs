//! Data models for the storefront
//!
//! Records shared by the stores and the view layer, plus the drafts and
//! patches used to create and edit them. JSON field names are camelCase,
//! matching the persisted snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Numeric record identifier, assigned by the stores.
pub type Id = u64;

/// Catalog category a product is filed under.
///
/// Products created before categories existed carry an empty category.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Boys,
    Girls,
    Baby,
    Accessories,
    #[default]
    #[serde(rename = "")]
    Unassigned,
}

/// A catalog product.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub price: f64,

    /// Price before discount; shown struck through when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,

    pub image: String,

    #[serde(default)]
    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sale: Option<bool>,

    pub rating: u8,
}

impl Product {
    pub fn is_new(&self) -> bool {
        self.is_new.unwrap_or(false)
    }

    pub fn is_on_sale(&self) -> bool {
        self.is_sale.unwrap_or(false)
    }
}

/// Admin form payload for a new product.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    pub image: String,
    pub category: Category,
    #[serde(default)]
    pub is_new: Option<bool>,
    #[serde(default)]
    pub is_sale: Option<bool>,
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    5
}

/// Partial edit of a product; absent fields are left untouched.
///
/// The optional product fields take three states: absent (keep), `null`
/// (clear) or a value (set). `{"originalPrice": null, "isSale": null}` takes
/// a product off sale.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "clearable")]
    pub original_price: Option<Option<f64>>,
    pub image: Option<String>,
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "clearable")]
    pub is_new: Option<Option<bool>>,
    #[serde(default, deserialize_with = "clearable")]
    pub is_sale: Option<Option<bool>>,
    pub rating: Option<u8>,
}

/// Present keys become `Some`, so an explicit `null` reads as `Some(None)`.
fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Order lifecycle state. Any state may be set from any other.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Customer-facing explanation shown on the tracking page.
    pub fn description(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Your order has been received and is pending processing.",
            OrderStatus::Processing => "Your order is being processed and prepared for shipping.",
            OrderStatus::Completed => "Your order has been delivered successfully.",
            OrderStatus::Cancelled => "This order has been cancelled.",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Bank,
    Card,
}

/// Customer-facing order identifier, rendered as `NK-<sequence>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderNumber(pub u64);

impl OrderNumber {
    pub const PREFIX: &'static str = "NK-";

    pub fn sequence(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("order numbers look like NK-10001")]
pub struct ParseOrderNumberError;

impl FromStr for OrderNumber {
    type Err = ParseOrderNumberError;

    /// Accepts exactly `NK-` followed by a decimal number without leading zeros.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(Self::PREFIX).ok_or(ParseOrderNumberError)?;
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseOrderNumberError);
        }
        digits.parse().map(OrderNumber).map_err(|_| ParseOrderNumberError)
    }
}

impl Serialize for OrderNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A placed order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Id,
    pub order_number: OrderNumber,
    pub customer: String,
    pub date: NaiveDate,
    pub total: f64,
    pub status: OrderStatus,
    /// Line descriptions such as `"Cotton Jumpsuit (x2)"`.
    pub items: Vec<String>,
    /// Email address or phone number.
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

/// Everything an order carries except its id and order number.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer: String,
    pub date: NaiveDate,
    pub total: f64,
    pub status: OrderStatus,
    pub items: Vec<String>,
    pub contact: String,
    pub payment_method: Option<PaymentMethod>,
}

/// The only post-creation edit an order accepts.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// A contact-form submission.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub read: bool,
}

/// Contact form payload.
#[derive(Deserialize, Debug, Clone)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A contact request stamped with the day it arrived.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub request: ContactRequest,
    pub received: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePatch {
    pub read: Option<bool>,
}

/// A customer testimonial shown on the home page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub id: Id,
    pub name: String,
    pub location: String,
    pub image: String,
    pub rating: u8,
    pub text: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TestimonialDraft {
    pub name: String,
    pub location: String,
    pub image: String,
    pub rating: u8,
    pub text: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TestimonialPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub rating: Option<u8>,
    pub text: Option<String>,
}

/// One cart line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Id of the product this line was added from.
    pub id: Id,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Description used in the order's item list.
    pub fn describe(&self) -> String {
        format!("{} (x{})", self.name, self.quantity)
    }
}

/// Marketing tile in the home page "Explore Collections" block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryTile {
    pub id: String,
    pub image: String,
    pub title: String,
    pub link: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
}
