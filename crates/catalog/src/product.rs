use core::str::FromStr;

use serde::{Deserialize, Serialize};

use cafekiosk_core::{DomainError, DomainResult, ProductId};

/// How a product is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Handmade,
    Bottle,
    Bakery,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Handmade => "handmade",
            ProductType::Bottle => "bottle",
            ProductType::Bakery => "bakery",
        }
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "handmade" => Ok(ProductType::Handmade),
            "bottle" => Ok(ProductType::Bottle),
            "bakery" => Ok(ProductType::Bakery),
            other => Err(DomainError::validation(format!(
                "unknown product type: {other}"
            ))),
        }
    }
}

/// Selling status lifecycle of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSellingStatus {
    Selling,
    Hold,
    StopSelling,
}

impl ProductSellingStatus {
    /// Statuses shown on the kiosk menu. `StopSelling` entries stay hidden.
    pub fn for_display() -> [ProductSellingStatus; 2] {
        [ProductSellingStatus::Selling, ProductSellingStatus::Hold]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSellingStatus::Selling => "selling",
            ProductSellingStatus::Hold => "hold",
            ProductSellingStatus::StopSelling => "stop_selling",
        }
    }
}

impl FromStr for ProductSellingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "selling" => Ok(ProductSellingStatus::Selling),
            "hold" => Ok(ProductSellingStatus::Hold),
            "stop_selling" => Ok(ProductSellingStatus::StopSelling),
            other => Err(DomainError::validation(format!(
                "unknown selling status: {other}"
            ))),
        }
    }
}

/// Catalog entry.
///
/// The business identifier is `product_number`, a sequential zero-padded
/// numeric string. `id` is the row identity used by storage.
///
/// Immutable after construction; changes go through repository updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    product_number: String,
    product_type: ProductType,
    selling_status: ProductSellingStatus,
    name: String,
    /// Price in the smallest currency unit. Non-negative by construction.
    price: u64,
}

impl Product {
    pub fn builder() -> ProductBuilder {
        ProductBuilder::default()
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn product_number(&self) -> &str {
        &self.product_number
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn selling_status(&self) -> ProductSellingStatus {
        self.selling_status
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> u64 {
        self.price
    }
}

/// Builder for [`Product`].
///
/// `build()` validates required fields and rejects empty identifiers/names.
#[derive(Debug, Default)]
pub struct ProductBuilder {
    id: Option<ProductId>,
    product_number: Option<String>,
    product_type: Option<ProductType>,
    selling_status: Option<ProductSellingStatus>,
    name: Option<String>,
    price: Option<u64>,
}

impl ProductBuilder {
    /// Row identity. Defaults to a fresh UUIDv7 when not supplied.
    pub fn id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn product_number(mut self, product_number: impl Into<String>) -> Self {
        self.product_number = Some(product_number.into());
        self
    }

    pub fn product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    pub fn selling_status(mut self, selling_status: ProductSellingStatus) -> Self {
        self.selling_status = Some(selling_status);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn build(self) -> DomainResult<Product> {
        let product_number = self
            .product_number
            .ok_or_else(|| DomainError::validation("product number is required"))?;
        if product_number.trim().is_empty() {
            return Err(DomainError::validation("product number cannot be empty"));
        }

        let name = self
            .name
            .ok_or_else(|| DomainError::validation("name is required"))?;
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let product_type = self
            .product_type
            .ok_or_else(|| DomainError::validation("product type is required"))?;
        let selling_status = self
            .selling_status
            .ok_or_else(|| DomainError::validation("selling status is required"))?;
        let price = self
            .price
            .ok_or_else(|| DomainError::validation("price is required"))?;

        Ok(Product {
            id: self.id.unwrap_or_default(),
            product_number,
            product_type,
            selling_status,
            name,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn americano() -> ProductBuilder {
        Product::builder()
            .product_number("001")
            .product_type(ProductType::Handmade)
            .selling_status(ProductSellingStatus::Selling)
            .name("americano")
            .price(4000)
    }

    #[test]
    fn builder_builds_a_product() {
        let product = americano().build().unwrap();

        assert_eq!(product.product_number(), "001");
        assert_eq!(product.product_type(), ProductType::Handmade);
        assert_eq!(product.selling_status(), ProductSellingStatus::Selling);
        assert_eq!(product.name(), "americano");
        assert_eq!(product.price(), 4000);
    }

    #[test]
    fn builder_rejects_empty_name() {
        let err = americano().name("   ").build().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn builder_rejects_empty_product_number() {
        let err = americano().product_number("").build().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn builder_rejects_missing_price() {
        let err = Product::builder()
            .product_number("001")
            .product_type(ProductType::Handmade)
            .selling_status(ProductSellingStatus::Selling)
            .name("americano")
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn display_statuses_exclude_stop_selling() {
        let display = ProductSellingStatus::for_display();

        assert!(display.contains(&ProductSellingStatus::Selling));
        assert!(display.contains(&ProductSellingStatus::Hold));
        assert!(!display.contains(&ProductSellingStatus::StopSelling));
    }

    #[test]
    fn status_round_trips_through_wire_form() {
        for status in [
            ProductSellingStatus::Selling,
            ProductSellingStatus::Hold,
            ProductSellingStatus::StopSelling,
        ] {
            assert_eq!(status.as_str().parse::<ProductSellingStatus>().unwrap(), status);
        }
        assert!("discontinued".parse::<ProductSellingStatus>().is_err());
    }
}
