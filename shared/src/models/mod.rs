//! Domain models

pub mod customer;
pub mod order;
pub mod product;

pub use customer::{Address, Customer, MembershipTier};
pub use order::{Discount, DiscountKind, Order, OrderItem, OrderStatus};
pub use product::{Product, ProductCategory};
