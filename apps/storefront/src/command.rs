//! Console commands, one per storefront button.

use std::str::FromStr;

use jackmar_core::validation::parse_quantity;

use crate::error::AppError;

/// Printed by `help`.
pub const HELP: &str = "\
Commands:
  add <product-id> [quantity]   add a product (default quantity 1)
  remove <index>                remove the cart line at <index>
  open | close                  show or hide the cart panel
  zoom <product-id>             open a product's image
  unzoom <product-id>           close a product's image
  checkout                      save the receipt and empty the cart
  products                      list the catalog
  help                          this text
  quit                          leave the store";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { product_id: String, quantity: i64 },
    Remove { index: usize },
    Open,
    Close,
    Zoom { product_id: String },
    Unzoom { product_id: String },
    Checkout,
    Products,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| AppError::command("Empty command"))?
            .to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (verb.as_str(), args.as_slice()) {
            ("add", [id]) => Command::Add {
                product_id: id.to_string(),
                quantity: 1,
            },
            ("add", [id, qty]) => Command::Add {
                product_id: id.to_string(),
                quantity: parse_quantity(qty)?,
            },
            ("remove" | "rm", [index]) => Command::Remove {
                index: index.parse().map_err(|_| {
                    AppError::command(format!("'{}' is not a cart line number", index))
                })?,
            },
            ("open" | "cart", []) => Command::Open,
            ("close", []) => Command::Close,
            ("zoom", [id]) => Command::Zoom {
                product_id: id.to_string(),
            },
            ("unzoom", [id]) => Command::Unzoom {
                product_id: id.to_string(),
            },
            ("checkout", []) => Command::Checkout,
            ("products" | "ls", []) => Command::Products,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => {
                return Err(AppError::command(format!(
                    "Unknown command '{}'. Type 'help' for the list.",
                    line.trim()
                )))
            }
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_add() {
        assert_eq!(
            "add rice-25kg".parse::<Command>().unwrap(),
            Command::Add {
                product_id: "rice-25kg".to_string(),
                quantity: 1
            }
        );
        assert_eq!(
            "ADD sugar 3".parse::<Command>().unwrap(),
            Command::Add {
                product_id: "sugar".to_string(),
                quantity: 3
            }
        );
    }

    #[test]
    fn test_bad_quantity_is_validation_error() {
        let err = "add sugar 0".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = "add sugar lots".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_parse_remove() {
        assert_eq!(
            "remove 2".parse::<Command>().unwrap(),
            Command::Remove { index: 2 }
        );
        let err = "remove -1".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);
    }

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!("open".parse::<Command>().unwrap(), Command::Open);
        assert_eq!("  checkout  ".parse::<Command>().unwrap(), Command::Checkout);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!(
            "zoom rice".parse::<Command>().unwrap(),
            Command::Zoom {
                product_id: "rice".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_or_malformed() {
        assert_eq!(
            "dance".parse::<Command>().unwrap_err().code,
            ErrorCode::InvalidCommand
        );
        assert_eq!(
            "checkout now".parse::<Command>().unwrap_err().code,
            ErrorCode::InvalidCommand
        );
        assert!("".parse::<Command>().is_err());
    }
}
