//! Validation filters
//!
//! Structural order checks, customer lookup/eligibility and per-item
//! product availability. These run before any pricing filter.

use std::time::Instant;

use async_trait::async_trait;
use shared::Order;

use crate::pipeline::{FilterError, FilterResult, OrderFilter, ProcessingContext};

/// Stock level below which a non-fatal low-stock warning is emitted
const LOW_STOCK_THRESHOLD: i64 = 10;

/// Pure structural check, no external lookups.
///
/// Accumulates one error per violated rule instead of short-circuiting,
/// so a malformed order reports everything wrong with it at once.
pub struct DataIntegrityFilter;

#[async_trait]
impl OrderFilter for DataIntegrityFilter {
    fn name(&self) -> &'static str {
        "DataIntegrityFilter"
    }

    async fn process(
        &self,
        order: Order,
        _ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError> {
        let started = Instant::now();
        let mut errors = Vec::new();

        if order.customer_id.is_empty() {
            errors.push("customer id is required".to_string());
        }
        if order.items.is_empty() {
            errors.push("items are required".to_string());
        }
        if order.items.iter().any(|i| i.quantity <= 0) {
            errors.push("invalid item quantity".to_string());
        }

        if errors.is_empty() {
            Ok(FilterResult::ok(self.name(), order, started))
        } else {
            Ok(FilterResult::failed(self.name(), order, started, errors))
        }
    }
}

/// Looks up the order's customer and checks eligibility
pub struct CustomerValidationFilter;

#[async_trait]
impl OrderFilter for CustomerValidationFilter {
    fn name(&self) -> &'static str {
        "CustomerValidationFilter"
    }

    async fn process(
        &self,
        order: Order,
        ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError> {
        let started = Instant::now();

        let Some(customer) = ctx.customer_by_id(&order.customer_id).await? else {
            return Ok(FilterResult::failed(
                self.name(),
                order,
                started,
                vec!["customer not found".to_string()],
            ));
        };
        if !customer.is_active {
            return Ok(FilterResult::failed(
                self.name(),
                order,
                started,
                vec!["customer inactive".to_string()],
            ));
        }
        if !email_is_valid(&customer.email) {
            return Ok(FilterResult::failed(
                self.name(),
                order,
                started,
                vec!["invalid customer email".to_string()],
            ));
        }

        Ok(FilterResult::ok(self.name(), order, started))
    }
}

/// `local@domain.tld`-shaped check: non-empty local part and a dot in the
/// domain with characters on both sides
fn email_is_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Per-item product lookup, stock check and low-stock warnings.
///
/// Unlike [`DataIntegrityFilter`] this fails immediately on the first
/// violating item; warnings accumulate across items and never fail the
/// filter.
pub struct ProductValidationFilter;

#[async_trait]
impl OrderFilter for ProductValidationFilter {
    fn name(&self) -> &'static str {
        "ProductValidationFilter"
    }

    async fn process(
        &self,
        order: Order,
        ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError> {
        let started = Instant::now();
        let mut warnings = Vec::new();

        for item in &order.items {
            let Some(product) = ctx.product_by_id(&item.product_id).await? else {
                return Ok(FilterResult::failed(
                    self.name(),
                    order.clone(),
                    started,
                    vec![format!("product {} not found", item.product_id)],
                ));
            };
            if item.quantity > product.stock {
                return Ok(FilterResult::failed(
                    self.name(),
                    order.clone(),
                    started,
                    vec![format!("insufficient stock for {}", item.product_id)],
                ));
            }
            if item.quantity <= 0 {
                return Ok(FilterResult::failed(
                    self.name(),
                    order.clone(),
                    started,
                    vec![format!("invalid quantity for {}", item.product_id)],
                ));
            }
            if product.stock < LOW_STOCK_THRESHOLD {
                warnings.push(format!("low stock for {}", item.product_id));
            }
        }

        Ok(FilterResult::ok_with_warnings(
            self.name(),
            order,
            started,
            warnings,
        ))
    }
}
