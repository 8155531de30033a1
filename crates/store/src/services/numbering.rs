use cafekiosk_catalog::{next_product_number, INITIAL_PRODUCT_NUMBER};

use crate::repository::ProductRepository;
use crate::services::ServiceError;

/// Assigns sequential product numbers from the latest persisted one.
///
/// Stateless: every call re-reads the latest number from storage. Two
/// concurrent calls can observe the same latest number and hand out
/// duplicates; callers that need uniqueness under concurrent product creation
/// must serialize it externally or move the numbering into the database.
#[derive(Debug, Clone)]
pub struct ProductNumberFactory<R> {
    products: R,
}

impl<R> ProductNumberFactory<R>
where
    R: ProductRepository,
{
    pub fn new(products: R) -> Self {
        Self { products }
    }

    /// Next product number: `"001"` for an empty catalog, otherwise the
    /// latest persisted number plus one with its padding kept.
    pub async fn create_next_product_number(&self) -> Result<String, ServiceError> {
        match self.products.find_latest_product_number().await? {
            None => Ok(INITIAL_PRODUCT_NUMBER.to_string()),
            Some(latest) => Ok(next_product_number(&latest)?),
        }
    }
}
