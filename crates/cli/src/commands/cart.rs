//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! shopcart add Widget 9.99
//! shopcart remove Widget
//! shopcart show [--summary] [--html]
//! ```

use rust_decimal::Decimal;
use shopcart_storefront::{Storefront, StorefrontError};
use shopcart_storefront::storage::KeyValueStore;
use shopcart_storefront::views::{render_cart_summary, render_cart_table};

use super::CliError;

/// Parse a price argument.
fn parse_price(raw: &str) -> Result<Decimal, CliError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| CliError::InvalidPrice(raw.to_string(), e.to_string()))
}

/// Add one unit of `name` at `price`.
///
/// # Errors
///
/// Returns an error if the price does not parse or the storefront rejects it.
pub fn add<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    name: &str,
    price: &str,
) -> Result<(), CliError> {
    let price = parse_price(price)?;
    let notice = shop.add_item(name, price)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{notice}");
        println!("Cart: {} item(s)", shop.item_count());
    }
    Ok(())
}

/// Remove the line for `name`.
///
/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub fn remove<S: KeyValueStore>(shop: &mut Storefront<S>, name: &str) -> Result<(), CliError> {
    let removed = shop.remove_item(name)?;

    let message = if removed {
        format!("Removed {name} from cart")
    } else {
        format!("{name} is not in the cart")
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{message}");
    }
    Ok(())
}

/// Print the cart as a table, or as rendered HTML rows.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn show<S: KeyValueStore>(
    shop: &Storefront<S>,
    summary: bool,
    html: bool,
) -> Result<(), CliError> {
    let view = shop.cart_view();

    let output = if html {
        let rendered = if summary {
            render_cart_summary(&view)
        } else {
            render_cart_table(&view)
        };
        rendered.map_err(StorefrontError::from)?
    } else {
        let mut lines: Vec<String> = view
            .items
            .iter()
            .map(|item| {
                if summary {
                    format!("{:<30} {:>5} {:>12}", item.name, item.quantity, item.line_price)
                } else {
                    format!(
                        "{:<30} {:>10} {:>5} {:>12}",
                        item.name, item.price, item.quantity, item.line_price
                    )
                }
            })
            .collect();
        lines.push(format!("Items: {}  Total: {}", view.item_count, view.total));
        lines.join("\n")
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("9.99").unwrap(), Decimal::new(999, 2));
        assert_eq!(parse_price(" 4.50 ").unwrap(), Decimal::new(450, 2));
        assert!(matches!(
            parse_price("cheap"),
            Err(CliError::InvalidPrice(_, _))
        ));
    }
}
