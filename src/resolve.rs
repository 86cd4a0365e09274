//! Logical-field lookup over a normalized row.
use crate::row::Row;

/// Alternate key spellings understood to denote one logical field, plus an
/// optional set of substrings for a contains-based fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVariants {
    pub keys: &'static [&'static str],
    pub contains: &'static [&'static str],
}

impl FieldVariants {
    /// Resolve the field: exact variants first, then the contains fallback.
    pub fn resolve(&self, row: &Row) -> String {
        let value = resolve(row, self.keys);
        if !value.is_empty() || self.contains.is_empty() {
            return value;
        }
        resolve_by_contains(row, self.contains)
    }
}

pub const ORDER_NUMBER: FieldVariants = FieldVariants {
    keys: &["order number", "order_number", "ORDER NUMBER", "Order Number"],
    contains: &[],
};

pub const NAME: FieldVariants = FieldVariants {
    keys: &["name", "NAME", "Name"],
    contains: &[],
};

pub const PHONE: FieldVariants = FieldVariants {
    keys: &["phone", "PHONE", "Phone"],
    contains: &[],
};

pub const ALT_PHONE: FieldVariants = FieldVariants {
    keys: &["alt no", "alt_no", "ALT NO", "Alt No", "alt phone", "alt_phone"],
    contains: &[],
};

pub const PRODUCT_NAME: FieldVariants = FieldVariants {
    keys: &["product name", "product_name", "PRODUCT NAME", "Product Name"],
    contains: &[],
};

pub const AMOUNT: FieldVariants = FieldVariants {
    keys: &["amount", "AMOUNT", "Amount"],
    contains: &[],
};

pub const ADDRESS: FieldVariants = FieldVariants {
    keys: &["address", "ADDRESS", "Address"],
    contains: &[],
};

pub const CITY: FieldVariants = FieldVariants {
    keys: &["city", "CITY", "City"],
    contains: &[],
};

pub const AGENT_PHONE: FieldVariants = FieldVariants {
    keys: &["agent phone", "agent_phone", "AGENT PHONE", "Agent Phone"],
    contains: &["agent", "phone"],
};

/// First non-blank value among the candidate keys, trimmed; empty otherwise.
pub fn resolve<K: AsRef<str>>(row: &Row, keys: &[K]) -> String {
    keys.iter()
        .filter_map(|key| row.get(key.as_ref()))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Value of the first entry, in row order, whose key contains every
/// substring (case-insensitive) and whose value is non-blank.
pub fn resolve_by_contains<S: AsRef<str>>(row: &Row, substrings: &[S]) -> String {
    let wanted: Vec<String> = substrings
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect();
    row.iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .find(|(key, _)| {
            let key = key.to_lowercase();
            wanted.iter().all(|want| key.contains(want.as_str()))
        })
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}
