//! Canonical rows and the document-level context they are built from.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A canonical field that an extractor can populate.
///
/// The `snake_case` name of each variant is the column name a schema must
/// use to select it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Source id (file name minus extension).
    Mid,
    /// Vendor label.
    Company,
    EmailTimestamp,
    Year,
    Month,
    Day,
    /// Markup receipts: order identifier.
    TransactionId,
    /// Markup receipts: delivery address.
    Address,
    ItemBill,
    HandlingFee,
    ConvenienceFee,
    DeliveryFee,
    GrandTotal,
    /// Markup receipts: quantity prefix of a line-item cell.
    ProductSequence,
    ProductName,
    ProductPrice,
    /// Text receipts: order identifier.
    OrderId,
    CustomerName,
    DeliveryAddress,
    RestaurantName,
    RestaurantAddress,
    DeliveryPartner,
    OrderConvenienceFee,
    OrderDeliveryFee,
    OrderCodFee,
    OrderGiftWrappingFee,
    ProductQuantity,
    ProductTotal,
    ProductMrp,
    ProductDiscount,
    OrderSubtotal,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 31] = [
        Field::Mid,
        Field::Company,
        Field::EmailTimestamp,
        Field::Year,
        Field::Month,
        Field::Day,
        Field::TransactionId,
        Field::Address,
        Field::ItemBill,
        Field::HandlingFee,
        Field::ConvenienceFee,
        Field::DeliveryFee,
        Field::GrandTotal,
        Field::ProductSequence,
        Field::ProductName,
        Field::ProductPrice,
        Field::OrderId,
        Field::CustomerName,
        Field::DeliveryAddress,
        Field::RestaurantName,
        Field::RestaurantAddress,
        Field::DeliveryPartner,
        Field::OrderConvenienceFee,
        Field::OrderDeliveryFee,
        Field::OrderCodFee,
        Field::OrderGiftWrappingFee,
        Field::ProductQuantity,
        Field::ProductTotal,
        Field::ProductMrp,
        Field::ProductDiscount,
        Field::OrderSubtotal,
    ];

    /// Column name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Mid => "mid",
            Field::Company => "company",
            Field::EmailTimestamp => "email_timestamp",
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::TransactionId => "transaction_id",
            Field::Address => "address",
            Field::ItemBill => "item_bill",
            Field::HandlingFee => "handling_fee",
            Field::ConvenienceFee => "convenience_fee",
            Field::DeliveryFee => "delivery_fee",
            Field::GrandTotal => "grand_total",
            Field::ProductSequence => "product_sequence",
            Field::ProductName => "product_name",
            Field::ProductPrice => "product_price",
            Field::OrderId => "order_id",
            Field::CustomerName => "customer_name",
            Field::DeliveryAddress => "delivery_address",
            Field::RestaurantName => "restaurant_name",
            Field::RestaurantAddress => "restaurant_address",
            Field::DeliveryPartner => "delivery_partner",
            Field::OrderConvenienceFee => "order_convenience_fee",
            Field::OrderDeliveryFee => "order_delivery_fee",
            Field::OrderCodFee => "order_cod_fee",
            Field::OrderGiftWrappingFee => "order_gift_wrapping_fee",
            Field::ProductQuantity => "product_quantity",
            Field::ProductTotal => "product_total",
            Field::ProductMrp => "product_mrp",
            Field::ProductDiscount => "product_discount",
            Field::OrderSubtotal => "order_subtotal",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ();

    /// Exact, case-sensitive match on the column name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or(())
    }
}

/// Document-level fields shared by every line item of one source document.
///
/// Built once per document and only read afterwards; rows copy from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentContext {
    values: BTreeMap<Field, String>,
}

impl DocumentContext {
    /// Start a context with the source id and vendor label.
    pub fn new(source_id: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self::default()
            .with(Field::Mid, source_id)
            .with(Field::Company, vendor)
    }

    /// Set a field, replacing any earlier value.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// Set a field only when a value was found.
    pub fn with_opt(self, field: Field, value: Option<String>) -> Self {
        match value {
            Some(value) => self.with(field, value),
            None => self,
        }
    }

    /// Set several fields at once.
    pub fn with_all<I, V>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = (Field, V)>,
        V: Into<String>,
    {
        fields
            .into_iter()
            .fold(self, |ctx, (field, value)| ctx.with(field, value))
    }

    /// Get a field value.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }
}

/// One extracted line item together with its document-level context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalRow {
    values: BTreeMap<Field, String>,
}

impl CanonicalRow {
    /// Start a row from a copy of the document context.
    pub fn from_context(context: &DocumentContext) -> Self {
        Self {
            values: context.values.clone(),
        }
    }

    /// Add an item-specific field.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// Get a field value.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Look up a value by column name. Unknown names yield `None`.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        name.parse::<Field>().ok().and_then(|field| self.get(field))
    }
}
