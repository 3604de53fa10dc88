use serde::{Deserialize, Serialize};

use ordermill_core::{
    DomainError, DomainResult, Entity, EntityId, Registered, Registry, Shared,
    impl_entity_id_newtype,
};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl_entity_id_newtype!(ProductId);

/// Priced, discounted, stocked item.
///
/// Monetary amounts and quantities are plain `f64` in major units; the
/// discount is a percentage in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    discount: f64,
    stock_qty: f64,
    sku: String,
}

impl Product {
    /// Construct and register a product.
    ///
    /// Validates the discount range (`InvalidDiscount`), derives the SKU
    /// slug, and fails with `DuplicateEntity` on a SKU collision.
    pub fn create(
        registry: &mut Registry<Product>,
        name: impl Into<String>,
        price: f64,
        discount: f64,
        stock_qty: f64,
    ) -> DomainResult<Shared<Product>> {
        if !(0.0..=100.0).contains(&discount) {
            return Err(DomainError::InvalidDiscount(discount));
        }

        let name = name.into();
        let sku = slugify(&name);

        registry.register(Self {
            id: ProductId::new(),
            name,
            price,
            discount,
            stock_qty,
            sku,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn stock_qty(&self) -> f64 {
        self.stock_qty
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Price after discount. Pure.
    pub fn final_price(&self) -> f64 {
        self.price - (self.price * self.discount / 100.0)
    }

    /// Deduct sold quantity from stock.
    ///
    /// Fails with `InsufficientStock` when `sold_qty` exceeds the current
    /// stock; stock never goes below zero.
    pub fn reduce_stock(&mut self, sold_qty: f64) -> DomainResult<()> {
        if sold_qty > self.stock_qty {
            return Err(DomainError::InsufficientStock {
                requested: sold_qty,
                available: self.stock_qty,
            });
        }

        self.stock_qty -= sold_qty;
        Ok(())
    }
}

/// Lowercase slug of the product name: `,.'/:` stripped, whitespace runs
/// joined by `-`.
fn slugify(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '\'' | '/' | ':'))
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Registered for Product {
    const KIND: &'static str = "product";

    fn is_duplicate_of(&self, other: &Self) -> bool {
        self.sku == other.sku
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> Registry<Product> {
        Registry::new()
    }

    #[test]
    fn final_price_applies_discount() {
        let mut products = test_registry();
        let product = Product::create(&mut products, "Some product", 300.0, 10.0, 13.0).unwrap();

        assert_eq!(product.borrow().final_price(), 270.0);
    }

    #[test]
    fn zero_and_full_discount_are_accepted() {
        let mut products = test_registry();
        let free = Product::create(&mut products, "Giveaway", 100.0, 100.0, 1.0).unwrap();
        let full = Product::create(&mut products, "Regular", 100.0, 0.0, 1.0).unwrap();

        assert_eq!(free.borrow().final_price(), 0.0);
        assert_eq!(full.borrow().final_price(), 100.0);
    }

    #[test]
    fn out_of_range_discount_is_rejected() {
        let mut products = test_registry();

        for discount in [-1.0, 100.5, 250.0] {
            let err =
                Product::create(&mut products, "Some product", 300.0, discount, 13.0).unwrap_err();
            assert_eq!(err, DomainError::InvalidDiscount(discount));
        }
        assert!(products.is_empty());
    }

    #[test]
    fn sku_strips_punctuation_and_joins_words() {
        let mut products = test_registry();
        let product = Product::create(&mut products, "Some, Product.", 10.0, 0.0, 1.0).unwrap();

        assert_eq!(product.borrow().sku(), "some-product");
    }

    #[test]
    fn sku_keeps_distinct_names_distinct() {
        let mut products = test_registry();
        let a = Product::create(&mut products, "Some product", 10.0, 0.0, 1.0).unwrap();
        let b = Product::create(&mut products, "Some product 1", 10.0, 0.0, 1.0).unwrap();

        assert_eq!(a.borrow().sku(), "some-product");
        assert_eq!(b.borrow().sku(), "some-product-1");
    }

    #[test]
    fn duplicate_sku_is_rejected() {
        let mut products = test_registry();
        Product::create(&mut products, "Some product", 10.0, 0.0, 1.0).unwrap();

        // Punctuation-only differences collapse to the same slug.
        let err = Product::create(&mut products, "Some, product.", 20.0, 5.0, 2.0).unwrap_err();
        assert_eq!(err, DomainError::DuplicateEntity("product"));
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn reduce_stock_decrements_within_bounds() {
        let mut products = test_registry();
        let product = Product::create(&mut products, "Some product", 10.0, 0.0, 13.0).unwrap();

        product.borrow_mut().reduce_stock(5.0).unwrap();
        assert_eq!(product.borrow().stock_qty(), 8.0);
    }

    #[test]
    fn reduce_stock_rejects_overdraw() {
        let mut products = test_registry();
        let product = Product::create(&mut products, "Some product", 10.0, 0.0, 13.0).unwrap();

        let err = product.borrow_mut().reduce_stock(14.0).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                requested: 14.0,
                available: 13.0
            }
        );
        assert_eq!(product.borrow().stock_qty(), 13.0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a valid discount never pushes the final price
            /// outside `[0, price]`.
            #[test]
            fn final_price_stays_within_bounds(
                price in 0.0f64..1_000_000.0,
                discount in 0.0f64..=100.0
            ) {
                let mut products = Registry::new();
                let product =
                    Product::create(&mut products, "Prop product", price, discount, 1.0).unwrap();
                let final_price = product.borrow().final_price();

                prop_assert!(final_price >= 0.0);
                prop_assert!(final_price <= price);
            }

            /// Property: slugs never contain stripped punctuation, spaces,
            /// or uppercase letters.
            #[test]
            fn slug_is_normalized(name in "[A-Za-z,.':/ ]{1,40}") {
                let slug = slugify(&name);

                prop_assert!(!slug.chars().any(|c| matches!(c, ',' | '.' | '\'' | '/' | ':' | ' ')));
                prop_assert!(!slug.chars().any(|c| c.is_ascii_uppercase()));
            }
        }
    }
}
