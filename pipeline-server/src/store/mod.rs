//! Customer/product data provider
//!
//! The pipeline treats the store as an opaque, read-only collaborator.
//! It is constructed explicitly and injected into the orchestrator; there
//! is no process-wide singleton. Lookups are async and side-effect-free,
//! and must be safe for concurrent reads by multiple in-flight runs.

use async_trait::async_trait;
use dashmap::DashMap;
use shared::{Address, Customer, MembershipTier, Product, ProductCategory};

/// Read-only async lookup of customers and products
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn customer_by_id(&self, id: &str) -> anyhow::Result<Option<Customer>>;
    async fn product_by_id(&self, id: &str) -> anyhow::Result<Option<Product>>;
}

/// In-memory data provider backed by concurrent maps
#[derive(Debug, Default)]
pub struct InMemoryStore {
    customers: DashMap<String, Customer>,
    products: DashMap<String, Product>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the demo catalog used by the server and tests
    pub fn with_demo_data() -> Self {
        let store = Self::new();

        store.insert_customer(Customer {
            id: "c1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            membership: MembershipTier::Gold,
            address: Address {
                street: "1 Main".into(),
                city: "City".into(),
                state: None,
                country: "AR".into(),
                zip: "1000".into(),
            },
            is_active: true,
        });
        store.insert_customer(Customer {
            id: "c2".into(),
            name: "Bob".into(),
            email: "bob@example.com".into(),
            membership: MembershipTier::Silver,
            address: Address {
                street: "2 Main".into(),
                city: "City".into(),
                state: None,
                country: "AR".into(),
                zip: "1000".into(),
            },
            is_active: false,
        });

        store.insert_product(Product {
            id: "p1".into(),
            name: "T-Shirt".into(),
            category: ProductCategory::Clothing,
            price: 20.0,
            stock: 100,
            tax_rate: None,
        });
        store.insert_product(Product {
            id: "p2".into(),
            name: "Laptop".into(),
            category: ProductCategory::Electronics,
            price: 1200.0,
            stock: 5,
            tax_rate: Some(0.27),
        });
        store.insert_product(Product {
            id: "p3".into(),
            name: "Bread".into(),
            category: ProductCategory::Food,
            price: 2.5,
            stock: 1000,
            tax_rate: Some(0.1),
        });

        store
    }

    pub fn insert_customer(&self, customer: Customer) {
        self.customers.insert(customer.id.clone(), customer);
    }

    pub fn insert_product(&self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }
}

#[async_trait]
impl DataProvider for InMemoryStore {
    async fn customer_by_id(&self, id: &str) -> anyhow::Result<Option<Customer>> {
        Ok(self.customers.get(id).map(|c| c.clone()))
    }

    async fn product_by_id(&self, id: &str) -> anyhow::Result<Option<Product>> {
        Ok(self.products.get(id).map(|p| p.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_data_lookup() {
        let store = InMemoryStore::with_demo_data();

        let alice = store.customer_by_id("c1").await.unwrap().unwrap();
        assert_eq!(alice.membership, MembershipTier::Gold);
        assert!(alice.is_active);

        let laptop = store.product_by_id("p2").await.unwrap().unwrap();
        assert_eq!(laptop.tax_rate, Some(0.27));

        assert!(store.customer_by_id("nobody").await.unwrap().is_none());
        assert!(store.product_by_id("p99").await.unwrap().is_none());
    }
}
