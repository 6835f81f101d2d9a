//! Application context
//!
//! All stores are built once at startup and owned here. Views receive the
//! context instead of reaching for global state.

use chrono::{NaiveDate, Utc};
use redb::Database;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::{AuthGate, Credentials};
use crate::cart::Cart;
use crate::checkout::{self, CheckoutForm, Receipt};
use crate::database::{
    MemoryRepository, RedbRepository, CATEGORY_STORAGE, MESSAGE_STORAGE, ORDER_STORAGE,
    PRODUCT_STORAGE, SOCIAL_STORAGE, TESTIMONIAL_STORAGE,
};
use crate::error::CheckoutError;
use crate::model::{ContactRequest, Message};
use crate::seed;
use crate::store::{
    CategoryStore, MessageStore, OrderStore, ProductStore, SocialStore, TestimonialStore,
};

pub struct AppContext {
    pub products: ProductStore,
    pub orders: OrderStore,
    pub messages: MessageStore,
    pub testimonials: TestimonialStore,
    pub categories: CategoryStore,
    pub social: SocialStore,
    pub cart: Cart,
    pub auth: AuthGate,
}

impl AppContext {
    /// Stores backed by the redb file, seeded where nothing was saved yet.
    pub fn open(db: Arc<Database>, admin: Credentials) -> Self {
        Self {
            products: ProductStore::load(
                RedbRepository::new(Arc::clone(&db), PRODUCT_STORAGE),
                PRODUCT_STORAGE,
                seed::products,
            ),
            orders: OrderStore::load(
                RedbRepository::new(Arc::clone(&db), ORDER_STORAGE),
                ORDER_STORAGE,
                seed::orders,
            ),
            messages: MessageStore::load(
                RedbRepository::new(Arc::clone(&db), MESSAGE_STORAGE),
                MESSAGE_STORAGE,
                seed::messages,
            ),
            testimonials: TestimonialStore::load(
                RedbRepository::new(Arc::clone(&db), TESTIMONIAL_STORAGE),
                TESTIMONIAL_STORAGE,
                seed::testimonials,
            ),
            categories: CategoryStore::load(
                RedbRepository::new(Arc::clone(&db), CATEGORY_STORAGE),
                CATEGORY_STORAGE,
                seed::category_tiles,
            ),
            social: SocialStore::load(
                RedbRepository::new(db, SOCIAL_STORAGE),
                SOCIAL_STORAGE,
                seed::social_links,
            ),
            cart: Cart::new(),
            auth: AuthGate::new(admin),
        }
    }

    /// Seeded stores that are never written to disk.
    pub fn in_memory(admin: Credentials) -> Self {
        Self {
            products: ProductStore::load(MemoryRepository::new(), PRODUCT_STORAGE, seed::products),
            orders: OrderStore::load(MemoryRepository::new(), ORDER_STORAGE, seed::orders),
            messages: MessageStore::load(MemoryRepository::new(), MESSAGE_STORAGE, seed::messages),
            testimonials: TestimonialStore::load(
                MemoryRepository::new(),
                TESTIMONIAL_STORAGE,
                seed::testimonials,
            ),
            categories: CategoryStore::load(
                MemoryRepository::new(),
                CATEGORY_STORAGE,
                seed::category_tiles,
            ),
            social: SocialStore::load(MemoryRepository::new(), SOCIAL_STORAGE, seed::social_links),
            cart: Cart::new(),
            auth: AuthGate::new(admin),
        }
    }

    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Places an order from the current cart.
    pub fn checkout(&mut self, form: &CheckoutForm) -> Result<Receipt, CheckoutError> {
        checkout::place_order(&mut self.cart, &mut self.orders, form, Self::today())
    }

    pub fn submit_contact(&mut self, request: ContactRequest) -> Message {
        self.messages.add_message(request, Self::today())
    }
}

/// Application state shared across all request handlers
///
/// Handlers run one at a time against the context: each locks it, runs a
/// synchronous store operation and releases it before responding.
#[derive(Clone)]
pub struct AppState {
    ctx: Arc<Mutex<AppContext>>,
}

impl AppState {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx: Arc::new(Mutex::new(ctx)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, AppContext> {
        // Store operations either apply fully or not at all; poisoned data is consistent.
        self.ctx.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{PaymentDetails, ShippingDetails};
    use crate::database::init_db;
    use crate::model::OrderStatus;
    use tempfile::NamedTempFile;

    fn form() -> CheckoutForm {
        CheckoutForm {
            shipping: ShippingDetails {
                full_name: "Yasmine Alaoui".into(),
                email: "yasmine@example.com".into(),
                address: "3 Avenue Hassan II".into(),
                city: "Rabat".into(),
                zip_code: "10000".into(),
                phone: "+212 600 000000".into(),
            },
            payment: PaymentDetails::Cash,
        }
    }

    #[test]
    fn state_survives_restart() {
        let temp_db = NamedTempFile::new().unwrap();
        let db = Arc::new(init_db(temp_db.path().to_str().unwrap()).unwrap());

        let order_number = {
            let mut ctx = AppContext::open(Arc::clone(&db), Credentials::default());
            let dress = ctx.products.get(1).cloned().unwrap();
            ctx.cart.add_item(&dress, 1);
            let receipt = ctx.checkout(&form()).unwrap();
            ctx.orders.update_order_status(receipt.order.id, OrderStatus::Processing);
            ctx.products.remove(12);
            receipt.order.order_number
        };

        let ctx = AppContext::open(db, Credentials::default());
        let order = ctx.orders.get_order_by_number(order_number).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(ctx.orders.latest_order_number(), order_number.sequence());
        assert!(ctx.products.get(12).is_none());
        assert!(ctx.orders.is_persistent());

        // The cart is session state and starts empty
        assert!(ctx.cart.is_empty());
    }

    #[test]
    fn contact_messages_are_dated_today() {
        let mut ctx = AppContext::in_memory(Credentials::default());
        let message = ctx.submit_contact(ContactRequest {
            name: "Omar".into(),
            email: "omar@example.com".into(),
            subject: "Wholesale".into(),
            message: "Do you sell to shops?".into(),
        });
        assert_eq!(message.date, AppContext::today());
        assert!(!message.read);
    }
}
