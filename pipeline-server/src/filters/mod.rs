//! Business-rule filter implementations
//!
//! Each filter is a stateless unit implementing
//! [`OrderFilter`](crate::pipeline::OrderFilter). The master chain order
//! is defined in [`OrderPipeline::master`](crate::pipeline::OrderPipeline::master).

pub mod payment;
pub mod pricing;
pub mod shipping;
pub mod tax;
pub mod validation;

pub use payment::PaymentProcessingFilter;
pub use pricing::{MembershipDiscountFilter, PriceCalculationFilter, VolumeDiscountFilter};
pub use shipping::ShippingCostFilter;
pub use tax::TaxCalculationFilter;
pub use validation::{CustomerValidationFilter, DataIntegrityFilter, ProductValidationFilter};
