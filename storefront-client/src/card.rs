//! Product card view model
//!
//! What a storefront card needs: the product, the currently selected
//! variant, the resulting price, and a WhatsApp link that opens a chat
//! with the vendor pre-filled with the order.

use rust_decimal::Decimal;

use shared::models::{Product, ProductVariant, StoreOwner};

const WHATSAPP_BASE: &str = "https://wa.me";

/// Card state for one product
#[derive(Debug, Clone)]
pub struct ProductCard<'a> {
    product: &'a Product,
    owner: Option<&'a StoreOwner>,
    selected: Option<&'a ProductVariant>,
}

impl<'a> ProductCard<'a> {
    /// New card with the first surfaced variant selected
    pub fn new(product: &'a Product, owner: Option<&'a StoreOwner>) -> Self {
        Self {
            product,
            owner,
            selected: product.variants.first(),
        }
    }

    pub fn product(&self) -> &'a Product {
        self.product
    }

    pub fn image_url(&self) -> Option<&'a str> {
        self.product.image_url.as_deref()
    }

    /// Variants offered for selection
    pub fn variants(&self) -> &'a [ProductVariant] {
        &self.product.variants
    }

    pub fn selected_variant(&self) -> Option<&'a ProductVariant> {
        self.selected
    }

    /// Select a variant by id; unknown ids leave the selection unchanged
    pub fn select_variant(&mut self, variant_id: &str) -> bool {
        match self.product.variant(variant_id) {
            Some(variant) => {
                self.selected = Some(variant);
                true
            }
            None => false,
        }
    }

    /// Base price plus the selected variant's modifier
    pub fn unit_price(&self) -> Decimal {
        self.product.price_with(self.selected)
    }

    /// Price rounded to cents with a currency symbol
    pub fn display_price(&self, currency_symbol: &str) -> String {
        format_money(self.unit_price(), currency_symbol)
    }

    /// Whether anything on the card can be ordered
    pub fn in_stock(&self) -> bool {
        match self.selected {
            Some(variant) => variant.is_purchasable(),
            None => self.product.stock_quantity > 0,
        }
    }

    /// WhatsApp deep link pre-filled with an order for `quantity` units.
    ///
    /// `None` when the store has no usable contact number.
    pub fn contact_link(&self, quantity: u32) -> Option<String> {
        let owner = self.owner?;
        let digits = owner.whatsapp_digits()?;
        let quantity = quantity.max(1);
        let total = self.unit_price() * Decimal::from(quantity);

        let mut message = format!(
            "Hello {}! I'd like to order {} x {}",
            owner.store_name, quantity, self.product.name
        );
        if let Some(variant) = self.selected {
            message.push_str(&format!(" ({})", variant.name));
        }
        let sku = self.selected.map_or(self.product.sku.as_str(), |v| v.sku.as_str());
        if !sku.is_empty() {
            message.push_str(&format!(" [SKU {sku}]"));
        }
        message.push_str(&format!(". Total: {}", format_money(total, "")));

        reqwest::Url::parse_with_params(&format!("{WHATSAPP_BASE}/{digits}"), &[("text", message)])
            .ok()
            .map(String::from)
    }
}

fn format_money(amount: Decimal, currency_symbol: &str) -> String {
    format!("{currency_symbol}{:.2}", amount.round_dp(2))
}
