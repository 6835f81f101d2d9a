//! Initial store contents, used when nothing has been persisted yet.

use chrono::NaiveDate;

use crate::model::{
    Category, CategoryTile, Message, Order, OrderNumber, OrderStatus, Product, SocialLinks,
    Testimonial,
};
use crate::store::{EntityStore, OrderState};

/// Order number of the last sample order; the first real order gets the next one.
pub const INITIAL_ORDER_NUMBER: u64 = 10003;

fn photo(id: &str, size: &str) -> String {
    format!("https://images.unsplash.com/photo-{id}?auto=format&fit=crop&{size}&q=80")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn products() -> Vec<Product> {
    // (id, name, price, original price, photo, category, new, sale, rating)
    let catalog = [
        (1, "Moroccan Print Dress", 249.0, Some(299.0), "1515488042361-ee00e0ddd4e4", Category::Girls, false, true, 5),
        (2, "Boys Summer T-shirt", 129.0, None, "1562157873-818bc0726f68", Category::Boys, true, false, 4),
        (3, "Cotton Jumpsuit", 189.0, None, "1518831959646-28f35d4d8fbc", Category::Baby, false, false, 5),
        (4, "Traditional Kaftan", 349.0, Some(399.0), "1555585466-703f14e9c14f", Category::Girls, false, true, 4),
        (5, "Summer Hat Collection", 89.0, None, "1544816155-12df9643f363", Category::Accessories, true, false, 5),
        (6, "Lightweight Linen Shorts", 149.0, None, "1471286174890-9c112ffca5b4", Category::Boys, true, false, 4),
        (7, "Embroidered Blouse", 199.0, None, "1519238263530-99bdd11df2ea", Category::Girls, true, false, 4),
        (8, "Patterned Leggings", 119.0, None, "1567113463300-102a7eb3cb26", Category::Girls, true, false, 5),
        (9, "Soft Cotton Pajamas", 169.0, Some(199.0), "1568337356249-fa4ac5f1d270", Category::Baby, false, true, 5),
        (10, "Casual Denim Set", 289.0, None, "1503944583220-79d8926ad5e2", Category::Boys, false, false, 5),
        (11, "Handmade School Bag", 229.0, Some(249.0), "1566454419290-57a0af3a0b6a", Category::Accessories, false, true, 4),
        (12, "Winter Coat with Hood", 399.0, None, "1622290291468-a28f7a7dc6a8", Category::Boys, false, false, 5),
    ];

    catalog
        .into_iter()
        .map(|(id, name, price, original_price, photo_id, category, is_new, is_sale, rating)| Product {
            id,
            name: name.to_string(),
            price,
            original_price,
            image: photo(photo_id, "w=800"),
            category,
            is_new: is_new.then_some(true),
            is_sale: is_sale.then_some(true),
            rating,
        })
        .collect()
}

pub fn orders() -> OrderState {
    let order = |id, sequence, customer: &str, date, total, status, items: &[&str], contact: &str| Order {
        id,
        order_number: OrderNumber(sequence),
        customer: customer.to_string(),
        date,
        total,
        status,
        items: items.iter().map(|i| i.to_string()).collect(),
        contact: contact.to_string(),
        payment_method: None,
    };

    // Newest first, matching how the store lists orders
    let orders = vec![
        order(3, 10003, "Karim Idrissi", day(2025, 5, 5), 578.0, OrderStatus::Processing,
            &["Traditional Kaftan", "Winter Coat with Hood"], "+212 677 123456"),
        order(2, 10002, "Yasmine Alaoui", day(2025, 5, 6), 189.0, OrderStatus::Completed,
            &["Cotton Jumpsuit"], "yasmine@example.com"),
        order(1, 10001, "Ahmed Benali", day(2025, 5, 7), 398.0, OrderStatus::Pending,
            &["Moroccan Print Dress", "Boys Summer T-shirt"], "+212 622 345678"),
    ];

    OrderState {
        orders: EntityStore::new(orders),
        latest_order_number: INITIAL_ORDER_NUMBER,
    }
}

pub fn messages() -> Vec<Message> {
    vec![
        Message {
            id: 1,
            name: "Sara Ahmed".into(),
            email: "sara.ahmed@example.com".into(),
            subject: "Size question".into(),
            message: "Hello, do you have the blue dress in size 6 years?".into(),
            date: day(2025, 5, 8),
            read: true,
        },
        Message {
            id: 2,
            name: "Mohammed Tazi".into(),
            email: "mtazi@example.com".into(),
            subject: "International shipping".into(),
            message: "Do you ship to France? How much would it cost?".into(),
            date: day(2025, 5, 7),
            read: false,
        },
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    let testimonial = |id, name: &str, location: &str, photo_id: &str, rating, text: &str| Testimonial {
        id,
        name: name.to_string(),
        location: location.to_string(),
        image: photo(photo_id, "w=150&h=150"),
        rating,
        text: text.to_string(),
    };

    vec![
        testimonial(1, "Amina B.", "Casablanca", "1494790108377-be9c29b29330", 5,
            "The quality of the clothes is exceptional! The fabrics are soft on my daughter's skin, and the traditional patterns are beautiful."),
        testimonial(2, "Karim M.", "Rabat", "1507003211169-0a1dd7228f2d", 5,
            "My son loves his new kaftan! The size guide was very accurate, and the clothes fit perfectly."),
        testimonial(3, "Leila T.", "Marrakech", "1534528741775-53994a69daeb", 4,
            "I ordered the summer collection for my twins and I'm very impressed. I only wish they had more color options."),
    ]
}

pub fn category_tiles() -> Vec<CategoryTile> {
    let tile = |id: &str, photo_id: &str, title: &str, link: &str| CategoryTile {
        id: id.to_string(),
        image: photo(photo_id, "w=300"),
        title: title.to_string(),
        link: link.to_string(),
    };

    vec![
        tile("1", "1505693416388-ac5ce068fe85", "Girls", "/girls"),
        tile("2", "1555009393-f20bdb245c4d", "Boys", "/boys"),
        tile("3", "1607453998774-d533f65dac99", "Baby", "/baby"),
    ]
}

pub fn social_links() -> SocialLinks {
    SocialLinks {
        facebook: "https://facebook.com".into(),
        instagram: "https://instagram.com".into(),
        twitter: "https://twitter.com".into(),
    }
}
