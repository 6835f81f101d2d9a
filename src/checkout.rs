//! Checkout flow
//!
//! Turns the cart into an order. Validation runs before anything is
//! mutated, so a rejected submission leaves both the cart and the order
//! store exactly as they were.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::CheckoutError;
use crate::model::{Order, OrderDraft, OrderNumber, OrderStatus, PaymentMethod};
use crate::store::OrderStore;

/// Shipping block of the checkout form. Every field is required.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub phone: String,
}

/// Bank transfer details. Captured only, never checked against a bank.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BankDetails {
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
    pub reference: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CardDetails {
    pub card_number: String,
    pub cardholder_name: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "paymentMethod", rename_all = "lowercase")]
pub enum PaymentDetails {
    Cash,
    Bank(BankDetails),
    Card(CardDetails),
}

impl PaymentDetails {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Cash => PaymentMethod::Cash,
            PaymentDetails::Bank(_) => PaymentMethod::Bank,
            PaymentDetails::Card(_) => PaymentMethod::Card,
        }
    }
}

/// A submitted checkout form, e.g.
///
/// ```json
/// { "fullName": "Ahmed Benali", "email": "...", "address": "...", "city": "...",
///   "zipCode": "...", "phone": "...", "paymentMethod": "card",
///   "cardNumber": "4111111111111111", "cardholderName": "...",
///   "expiryMonth": "09", "expiryYear": "27", "cvv": "123" }
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct CheckoutForm {
    #[serde(flatten)]
    pub shipping: ShippingDetails,
    #[serde(flatten)]
    pub payment: PaymentDetails,
}

/// Result of a successful checkout.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order: Order,
    /// Where the storefront sends the customer next.
    pub redirect_to: String,
    pub message: String,
}

/// Checkout may only be entered with something in the cart.
pub fn ensure_cart_ready(cart: &Cart) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(())
}

pub fn validate(form: &CheckoutForm) -> Result<(), CheckoutError> {
    let shipping = &form.shipping;
    let required = [
        ("full name", &shipping.full_name),
        ("email", &shipping.email),
        ("address", &shipping.address),
        ("city", &shipping.city),
        ("zip code", &shipping.zip_code),
        ("phone", &shipping.phone),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::MissingField(field));
        }
    }

    match &form.payment {
        PaymentDetails::Card(card) => validate_card(card),
        PaymentDetails::Cash | PaymentDetails::Bank(_) => Ok(()),
    }
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn validate_card(card: &CardDetails) -> Result<(), CheckoutError> {
    let number: String = card.card_number.chars().filter(|c| *c != ' ').collect();
    if number.len() != 16 || !all_digits(&number) {
        return Err(CheckoutError::InvalidCardNumber);
    }
    if card.cardholder_name.trim().is_empty() {
        return Err(CheckoutError::MissingCardholder);
    }

    let month = card.expiry_month.trim();
    let year = card.expiry_year.trim();
    let month_ok = month.len() <= 2
        && all_digits(month)
        && month.parse::<u8>().is_ok_and(|m| (1..=12).contains(&m));
    let year_ok = year.len() == 2 && all_digits(year);
    if !month_ok || !year_ok {
        return Err(CheckoutError::InvalidExpiry);
    }

    let cvv = card.cvv.trim();
    if !(3..=4).contains(&cvv.len()) || !all_digits(cvv) {
        return Err(CheckoutError::InvalidCvv);
    }
    Ok(())
}

/// Tracking page location for an order number.
pub fn tracking_path(order_number: OrderNumber) -> String {
    format!("/track-order?order={order_number}")
}

/// Places an order from the cart
///
/// 1. Rejects an empty cart
/// 2. Validates the shipping block and the payment details
/// 3. Records the order, which assigns its id and order number
/// 4. Empties the cart
///
/// Steps 1 and 2 run before anything is touched, so on error the cart and
/// the order store are unchanged.
pub fn place_order(
    cart: &mut Cart,
    orders: &mut OrderStore,
    form: &CheckoutForm,
    today: NaiveDate,
) -> Result<Receipt, CheckoutError> {
    ensure_cart_ready(cart)?;
    validate(form)?;

    let shipping = &form.shipping;

    let order = orders.add_order(OrderDraft {
        customer: shipping.full_name.clone(),
        date: today,
        total: cart.total(),
        status: OrderStatus::Pending,
        items: cart.items().iter().map(|i| i.describe()).collect(),
        contact: shipping.email.clone(),
        payment_method: Some(form.payment.method()),
    });
    cart.clear();

    Ok(Receipt {
        redirect_to: tracking_path(order.order_number),
        message: format!(
            "Order placed successfully! Your order number is {}",
            order.order_number
        ),
        order,
    })
}
