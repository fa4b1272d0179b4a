//! Normalization from backend wire types to domain types.
//!
//! Id-shape collapsing, empty-string-to-`None` cleanup, and price parsing
//! all happen here, once, so the engine and the server never see wire
//! quirks. Products and variants normalize into [`corium_core`] types; cart,
//! order, user and customer records normalize into [`crate::model`].

use corium_core::{Product, ProductImage, Variant};

use crate::error::CommerceError;
use crate::model::{AdminUser, Cart, CartLine, Customer, Order};
use crate::types::{
    ApiCart, ApiCartItem, ApiCustomer, ApiOrder, ApiProduct, ApiUser, ApiVariant, RawPrice,
};

/// Normalizes a raw [`ApiProduct`] into a [`Product`].
///
/// A product with no variants is valid — the storefront falls back to the
/// product-level base price — but a missing base price on such a product is
/// a normalization error, since there would be nothing to display.
///
/// # Errors
///
/// Returns [`CommerceError::Normalization`] on an unparseable price, or when
/// a variantless product has no base price.
pub fn normalize_product(product: ApiProduct) -> Result<Product, CommerceError> {
    let id = product.id.canonicalize();

    let base_price = match product.base_price {
        Some(raw) => parse_price(&raw, &format!("product {id}"))?,
        None if product.variants.is_empty() => {
            return Err(CommerceError::Normalization {
                entity: format!("product {id}"),
                reason: "no variants and no base price".into(),
            });
        }
        None => 0,
    };

    let variants = product
        .variants
        .into_iter()
        .map(|v| normalize_variant(v, &id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product {
        id,
        name: product.name,
        description: non_empty(product.description),
        category: non_empty(product.category),
        base_price,
        aggregate_stock: product.stock,
        images: product
            .images
            .into_iter()
            .map(|i| ProductImage {
                url: i.url,
                alt: non_empty(i.alt),
            })
            .collect(),
        variants,
    })
}

/// Normalizes a raw [`ApiVariant`] into a [`Variant`].
///
/// # Errors
///
/// Returns [`CommerceError::Normalization`] if the price cannot be parsed.
fn normalize_variant(variant: ApiVariant, product_id: &str) -> Result<Variant, CommerceError> {
    let id = variant.id.canonicalize();
    let price = parse_price(&variant.price, &format!("product {product_id} variant {id}"))?;

    // Legacy records carry an empty SKU; the id is the only stable code then.
    let sku = non_empty(variant.sku).unwrap_or_else(|| id.clone());

    Ok(Variant {
        id,
        sku,
        color: non_empty(variant.color),
        size: non_empty(variant.size),
        price,
        stock: variant.stock,
        image_url: non_empty(variant.image_url),
        available: variant.available,
    })
}

/// Normalizes a cart, recomputing the total locally when the backend omits it.
///
/// # Errors
///
/// Returns [`CommerceError::Normalization`] if any amount fails to parse.
pub fn normalize_cart(cart: ApiCart) -> Result<Cart, CommerceError> {
    let id = cart.id.canonicalize();
    let items = cart
        .items
        .into_iter()
        .map(|i| normalize_cart_item(i, &id))
        .collect::<Result<Vec<_>, _>>()?;

    let total = match cart.total {
        Some(raw) => parse_price(&raw, &format!("cart {id}"))?,
        None => items.iter().map(|l| l.line_total).sum(),
    };

    Ok(Cart { id, items, total })
}

fn normalize_cart_item(item: ApiCartItem, owner: &str) -> Result<CartLine, CommerceError> {
    let unit_price = parse_price(&item.unit_price, &format!("cart/order {owner} line"))?;
    Ok(CartLine {
        product_id: item.product_id.canonicalize(),
        variant_id: item.variant_id.canonicalize(),
        name: item.name,
        quantity: item.quantity,
        unit_price,
        line_total: unit_price * i64::from(item.quantity),
        image_url: non_empty(item.image_url),
    })
}

/// Normalizes an order.
///
/// # Errors
///
/// Returns [`CommerceError::Normalization`] if any amount fails to parse.
pub fn normalize_order(order: ApiOrder) -> Result<Order, CommerceError> {
    let id = order.id.canonicalize();
    let items = order
        .items
        .into_iter()
        .map(|i| normalize_cart_item(i, &order.number))
        .collect::<Result<Vec<_>, _>>()?;
    let total = parse_price(&order.total, &format!("order {}", order.number))?;

    Ok(Order {
        id,
        number: order.number,
        status: order.status,
        customer_name: non_empty(order.customer_name),
        customer_email: non_empty(order.customer_email),
        total,
        created_at: order.created_at,
        items,
    })
}

#[must_use]
pub fn normalize_user(user: ApiUser) -> AdminUser {
    AdminUser {
        id: user.id.canonicalize(),
        name: user.name,
        email: user.email,
        role: user.role,
        active: user.active,
        created_at: user.created_at,
    }
}

#[must_use]
pub fn normalize_customer(customer: ApiCustomer) -> Customer {
    Customer {
        id: customer.id.canonicalize(),
        name: customer.name,
        email: customer.email,
        phone: non_empty(customer.phone),
        city: non_empty(customer.city),
        order_count: customer.order_count,
        created_at: customer.created_at,
    }
}

/// Parses a wire price into whole guaraníes, rejecting negatives and
/// non-integer strings.
fn parse_price(raw: &RawPrice, entity: &str) -> Result<i64, CommerceError> {
    let amount = match raw {
        RawPrice::Number(n) => *n,
        RawPrice::Text(s) => {
            s.trim()
                .parse::<i64>()
                .map_err(|_| CommerceError::Normalization {
                    entity: entity.to_owned(),
                    reason: format!("unparseable price '{s}'"),
                })?
        }
    };
    if amount < 0 {
        return Err(CommerceError::Normalization {
            entity: entity.to_owned(),
            reason: format!("negative price {amount}"),
        });
    }
    Ok(amount)
}

/// Treats the backend's empty strings as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
