//! Product catalog store and listing queries.

use serde::Deserialize;

use super::{Record, ResourceStore};
use crate::error::ValidationError;
use crate::model::{Category, Id, Product, ProductDraft, ProductPatch};

pub type ProductStore = ResourceStore<Product>;

impl Record for Product {
    const COLLECTION: &'static str = "products";
    type Draft = ProductDraft;
    type Patch = ProductPatch;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            original_price: draft.original_price,
            image: draft.image,
            category: draft.category,
            is_new: draft.is_new,
            is_sale: draft.is_sale,
            rating: draft.rating,
        }
    }

    fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = original_price;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(is_new) = patch.is_new {
            self.is_new = is_new;
        }
        if let Some(is_sale) = patch.is_sale {
            self.is_sale = is_sale;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
    }
}

/// Category selector of the catalog page.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Boys,
    Girls,
    Baby,
    Accessories,
}

impl CategoryFilter {
    fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Boys => category == Category::Boys,
            CategoryFilter::Girls => category == Category::Girls,
            CategoryFilter::Baby => category == Category::Baby,
            CategoryFilter::Accessories => category == Category::Accessories,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Default,
    PriceLowHigh,
    PriceHighLow,
    /// New arrivals first, otherwise keeping catalog order.
    Newest,
}

/// Query parameters of the catalog listing, e.g. `?category=girls&sort=price-low-high`.
#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct CatalogQuery {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub sort: SortOrder,
}

impl ResourceStore<Product> {
    pub fn catalog(&self, query: CatalogQuery) -> Vec<Product> {
        let mut listed: Vec<Product> = self
            .all()
            .iter()
            .filter(|p| query.category.matches(p.category))
            .cloned()
            .collect();

        match query.sort {
            SortOrder::Default => {}
            SortOrder::PriceLowHigh => listed.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceHighLow => listed.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::Newest => listed.sort_by_key(|p| !p.is_new()),
        }
        listed
    }

    pub fn new_arrivals(&self) -> Vec<Product> {
        self.all().iter().filter(|p| p.is_new()).cloned().collect()
    }

    pub fn on_sale(&self) -> Vec<Product> {
        self.all().iter().filter(|p| p.is_on_sale()).cloned().collect()
    }
}

/// Field rules of the admin product form.
///
/// 1. Name of at least 3 characters
/// 2. Positive price, and an original price above it when one is given
/// 3. An http(s) image URL
/// 4. A category and a rating of at most 5
pub fn validate_draft(draft: &ProductDraft) -> Result<(), ValidationError> {
    validate_name(&draft.name)?;
    validate_price("price", draft.price)?;
    validate_discount(draft.price, draft.original_price)?;
    validate_image(&draft.image)?;
    if draft.category == Category::Unassigned {
        return Err(ValidationError::new("category", "Category is required"));
    }
    validate_rating(draft.rating)
}

/// Checks an edit of `current`. The price pair is checked on the merged
/// result, so lowering `originalPrice` alone can still be rejected.
pub fn validate_patch(current: &Product, patch: &ProductPatch) -> Result<(), ValidationError> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(price) = patch.price {
        validate_price("price", price)?;
    }
    let price = patch.price.unwrap_or(current.price);
    let original_price = patch.original_price.unwrap_or(current.original_price);
    validate_discount(price, original_price)?;
    if let Some(image) = &patch.image {
        validate_image(image)?;
    }
    if patch.category == Some(Category::Unassigned) {
        return Err(ValidationError::new("category", "Category is required"));
    }
    match patch.rating {
        Some(rating) => validate_rating(rating),
        None => Ok(()),
    }
}

fn validate_discount(price: f64, original_price: Option<f64>) -> Result<(), ValidationError> {
    let Some(original) = original_price else {
        return Ok(());
    };
    validate_price("originalPrice", original)?;
    if original <= price {
        return Err(ValidationError::new(
            "originalPrice",
            "Original price must be higher than the price",
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < 3 {
        return Err(ValidationError::new("name", "Name must be at least 3 characters"));
    }
    Ok(())
}

fn validate_price(field: &'static str, price: f64) -> Result<(), ValidationError> {
    if !(price.is_finite() && price > 0.0) {
        return Err(ValidationError::new(field, "Price must be positive"));
    }
    Ok(())
}

fn validate_image(image: &str) -> Result<(), ValidationError> {
    let rest = image
        .strip_prefix("https://")
        .or_else(|| image.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ValidationError::new("image", "Must be a valid URL")),
    }
}

fn validate_rating(rating: u8) -> Result<(), ValidationError> {
    if rating > 5 {
        return Err(ValidationError::new("rating", "Rating must be between 0 and 5"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryRepository;
    use crate::seed;

    fn store() -> ProductStore {
        ResourceStore::load(MemoryRepository::new(), "product-storage", seed::products)
    }

    fn draft(name: &str, price: f64) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            price,
            original_price: None,
            image: "https://images.example.com/p.jpg".into(),
            category: Category::Baby,
            is_new: Some(true),
            is_sale: None,
            rating: 4,
        }
    }

    #[test]
    fn added_product_gets_next_id_and_lands_last() {
        let mut products = store();
        let max = products.all().iter().map(|p| p.id).max().unwrap();

        let created = products.add(draft("Knitted Booties", 99.0));
        assert_eq!(created.id, max + 1);
        assert_eq!(products.all().last(), Some(&created));
    }

    #[test]
    fn edit_keeps_untouched_fields() {
        let mut products = store();
        let before = products.get(1).cloned().unwrap();

        let after = products
            .update(1, ProductPatch { price: Some(199.0), ..Default::default() })
            .unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.price, 199.0);
    }

    #[test]
    fn catalog_filters_by_category() {
        let products = store();
        let girls = products.catalog(CatalogQuery { category: CategoryFilter::Girls, sort: SortOrder::Default });
        assert!(!girls.is_empty());
        assert!(girls.iter().all(|p| p.category == Category::Girls));
    }

    #[test]
    fn catalog_sorts_by_price() {
        let products = store();
        let ascending = products.catalog(CatalogQuery { sort: SortOrder::PriceLowHigh, ..Default::default() });
        assert!(ascending.windows(2).all(|w| w[0].price <= w[1].price));

        let descending = products.catalog(CatalogQuery { sort: SortOrder::PriceHighLow, ..Default::default() });
        assert!(descending.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn newest_puts_new_arrivals_first_and_keeps_order() {
        let products = store();
        let listed = products.catalog(CatalogQuery { sort: SortOrder::Newest, ..Default::default() });

        let first_old = listed.iter().position(|p| !p.is_new()).unwrap_or(listed.len());
        assert!(listed[..first_old].iter().all(Product::is_new));
        assert!(listed[first_old..].iter().all(|p| !p.is_new()));

        let expected_new: Vec<Id> = products.new_arrivals().iter().map(|p| p.id).collect();
        let listed_new: Vec<Id> = listed[..first_old].iter().map(|p| p.id).collect();
        assert_eq!(listed_new, expected_new);
    }

    #[test]
    fn edit_can_take_a_product_off_sale() {
        let mut products = store();
        let patch: ProductPatch =
            serde_json::from_str(r#"{"originalPrice": null, "isSale": null}"#).unwrap();
        assert_eq!(patch.original_price, Some(None));
        assert!(patch.price.is_none());

        let after = products.update(1, patch).unwrap();
        assert_eq!(after.original_price, None);
        assert!(!after.is_on_sale());
        assert_eq!(after.price, 249.0);
        assert!(!products.on_sale().iter().any(|p| p.id == 1));
    }

    #[test]
    fn absent_optional_fields_are_kept() {
        let mut products = store();
        let patch: ProductPatch = serde_json::from_str(r#"{"name": "Printed Dress"}"#).unwrap();
        assert_eq!(patch.original_price, None);

        let after = products.update(1, patch).unwrap();
        assert_eq!(after.original_price, Some(299.0));
        assert!(after.is_on_sale());
    }

    #[test]
    fn original_price_must_exceed_price() {
        let mut marked_up = draft("Knitted Booties", 299.0);
        marked_up.original_price = Some(99.0);
        assert_eq!(validate_draft(&marked_up).unwrap_err().field, "originalPrice");

        marked_up.original_price = Some(299.0);
        assert_eq!(validate_draft(&marked_up).unwrap_err().field, "originalPrice");

        marked_up.original_price = Some(349.0);
        assert!(validate_draft(&marked_up).is_ok());
    }

    #[test]
    fn edit_price_pair_is_checked_against_the_merged_product() {
        let products = store();
        // Product 1 sells at 249 down from 299
        let dress = products.get(1).unwrap();

        let raise = ProductPatch { price: Some(320.0), ..Default::default() };
        assert_eq!(validate_patch(dress, &raise).unwrap_err().field, "originalPrice");

        let lower_original = ProductPatch { original_price: Some(Some(200.0)), ..Default::default() };
        assert_eq!(validate_patch(dress, &lower_original).unwrap_err().field, "originalPrice");

        let both = ProductPatch {
            price: Some(320.0),
            original_price: Some(Some(399.0)),
            ..Default::default()
        };
        assert!(validate_patch(dress, &both).is_ok());

        let clear = ProductPatch { price: Some(320.0), original_price: Some(None), ..Default::default() };
        assert!(validate_patch(dress, &clear).is_ok());
    }

    #[test]
    fn draft_validation_rejects_bad_fields() {
        assert!(validate_draft(&draft("Knitted Booties", 99.0)).is_ok());
        assert_eq!(validate_draft(&draft("Ab", 99.0)).unwrap_err().field, "name");
        assert_eq!(validate_draft(&draft("Knitted Booties", 0.0)).unwrap_err().field, "price");

        let mut no_url = draft("Knitted Booties", 99.0);
        no_url.image = "booties.jpg".into();
        assert_eq!(validate_draft(&no_url).unwrap_err().field, "image");

        let mut no_category = draft("Knitted Booties", 99.0);
        no_category.category = Category::Unassigned;
        assert_eq!(validate_draft(&no_category).unwrap_err().field, "category");

        let mut too_good = draft("Knitted Booties", 99.0);
        too_good.rating = 6;
        assert_eq!(validate_draft(&too_good).unwrap_err().field, "rating");
    }
}
