//! Outbound SMS body.
//!
//! The body is always six lines:
//!
//! ```text
//! Oda Namba <order number>
//! <customer name>
//! <customer phone>/<alt phone>
//! <product name>
//! <amount>
//! <address>, <city>
//! ```
use crate::phone::CallingCodePolicy;
use crate::resolve;
use crate::row::Row;

pub const ORDER_LINE_PREFIX: &str = "Oda Namba";
pub const PLACEHOLDER: &str = "-";
pub const LINE_COUNT: usize = 6;

/// Build the six-line message for a row. Empty fields render as `-`.
pub fn format_message(row: &Row, policy: &CallingCodePolicy) -> String {
    let order_number = resolve::ORDER_NUMBER.resolve(row);
    let order_line = if order_number.is_empty() {
        String::new()
    } else {
        format!("{ORDER_LINE_PREFIX} {order_number}")
    };

    let lines = [
        order_line,
        resolve::NAME.resolve(row),
        phone_line(row, policy),
        resolve::PRODUCT_NAME.resolve(row),
        resolve::AMOUNT.resolve(row),
        location_line(row),
    ];
    lines
        .iter()
        .map(|line| if line.is_empty() { PLACEHOLDER } else { line.as_str() })
        .collect::<Vec<_>>()
        .join("\n")
}

fn phone_line(row: &Row, policy: &CallingCodePolicy) -> String {
    let phones: Vec<String> = [
        resolve::PHONE.resolve(row),
        resolve::ALT_PHONE.resolve(row),
    ]
    .iter()
    .map(|raw| policy.display_form(raw))
    .filter(|phone| !phone.is_empty())
    .collect();
    phones.join("/")
}

fn location_line(row: &Row) -> String {
    let address = resolve::ADDRESS.resolve(row);
    let city = resolve::CITY.resolve(row);
    match (address.is_empty(), city.is_empty()) {
        (false, false) => format!("{address}, {city}"),
        (false, true) => address,
        (true, false) => city,
        (true, true) => String::new(),
    }
}
