//! CLI subcommands.

mod edit;
mod show;

use std::io::{self, Write};

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use thiserror::Error;

use bozor_core::{CartError, CartStore, CartSurface, ItemId, ProductRef, Store};

/// Command failures.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Product fields an add control carries.
#[derive(Debug, Clone, Args)]
pub struct ProductArgs {
    /// Product id
    pub id: String,

    /// Display name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Unit price in UZS
    #[arg(long, default_value = "0")]
    pub price: Decimal,

    /// Cover image URL
    #[arg(long, default_value = "")]
    pub cover: String,

    /// Total stock amount shown in the cart row
    #[arg(long)]
    pub amount: Option<Decimal>,
}

impl ProductArgs {
    #[must_use]
    pub fn product(&self) -> ProductRef {
        let product = ProductRef::new(
            self.id.as_str(),
            self.name.as_str(),
            self.price,
            self.cover.as_str(),
        );
        match self.amount {
            Some(amount) => product.with_amount(amount),
            None => product,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add units of a product
    Add {
        #[command(flatten)]
        product: ProductArgs,

        /// Units to add
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        qty: Decimal,

        /// Units per set
        #[arg(long, default_value = "1")]
        set_size: Decimal,

        /// Replace the quantity instead of adding to it
        #[arg(long)]
        replace: bool,
    },
    /// Add whole sets of a product
    AddSet {
        #[command(flatten)]
        product: ProductArgs,

        /// Units per set
        #[arg(long)]
        set_size: Decimal,

        /// Sets to add
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        sets: Decimal,

        /// Replace the set count instead of adding to it
        #[arg(long)]
        replace: bool,
    },
    /// Add one unit to a line
    Increase {
        /// Product id
        id: String,
    },
    /// Take one unit off a line
    Decrease {
        /// Product id
        id: String,

        /// Units per set
        #[arg(long, default_value = "1")]
        set_size: Decimal,
    },
    /// Take one set off a line
    DecreaseSet {
        /// Product id
        id: String,

        /// Units per set
        #[arg(long)]
        set_size: Decimal,
    },
    /// Set a line's quantity as typed into the cart
    SetQty {
        /// Product id
        id: String,

        /// Quantity text; anything below one is ignored
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: String,

        /// Product name, for the log
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Delete a cart line
    Delete {
        /// Product id
        id: String,
    },
    /// Erase the whole storage namespace
    Clear,
    /// Print the cart
    Show {
        /// Print the cart view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the badge count
    Count,
}

/// Run `command` against `cart`, writing the result to `out`.
///
/// # Errors
///
/// Returns `CommandError` if the store fails or output cannot be written.
pub fn execute<S, U>(
    cart: &mut CartStore<S, U>,
    command: Command,
    out: &mut impl Write,
) -> Result<(), CommandError>
where
    S: Store,
    U: CartSurface,
{
    let outcome = match command {
        Command::Show { json } => return show::cart(cart, json, out),
        Command::Count => return show::count(cart, out),
        Command::Add {
            product,
            qty,
            set_size,
            replace,
        } => edit::add(cart, &product.product(), qty, set_size, replace)?,
        Command::AddSet {
            product,
            set_size,
            sets,
            replace,
        } => edit::add_set(cart, &product.product(), set_size, sets, replace)?,
        Command::Increase { id } => cart.increase(&ItemId::new(id))?,
        Command::Decrease { id, set_size } => cart.decrease(&ItemId::new(id), set_size)?,
        Command::DecreaseSet { id, set_size } => {
            cart.decrease_set(&ItemId::new(id), set_size)?
        }
        Command::SetQty { id, value } => cart.update_from_text_input(&ItemId::new(id), &value)?,
        Command::Remove { id, name } => cart.remove(&ItemId::new(id), &name)?,
        Command::Delete { id } => cart.delete_item(&ItemId::new(id))?,
        Command::Clear => cart.clear_all()?,
    };
    show::outcome(cart, outcome, out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bozor_core::{CartConfig, MemoryStore, NoticeKind, RecordingSurface};

    use super::*;

    fn engine() -> CartStore<MemoryStore, RecordingSurface> {
        CartStore::with_surface(
            MemoryStore::new(),
            RecordingSurface::default(),
            CartConfig::default(),
        )
    }

    fn product(id: &str) -> ProductArgs {
        ProductArgs {
            id: id.to_string(),
            name: "Qatiq".to_string(),
            price: Decimal::from(2500),
            cover: String::new(),
            amount: None,
        }
    }

    fn run(
        cart: &mut CartStore<MemoryStore, RecordingSurface>,
        command: Command,
    ) -> String {
        let mut out = Vec::new();
        execute(cart, command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_then_count() {
        let mut cart = engine();
        let printed = run(
            &mut cart,
            Command::Add {
                product: product("5"),
                qty: Decimal::from(3),
                set_size: Decimal::ONE,
                replace: false,
            },
        );
        assert!(printed.starts_with("added"));
        assert_eq!(run(&mut cart, Command::Count).trim(), "3");
    }

    #[test]
    fn test_set_qty_ignores_text() {
        let mut cart = engine();
        run(
            &mut cart,
            Command::Add {
                product: product("5"),
                qty: Decimal::from(2),
                set_size: Decimal::ONE,
                replace: false,
            },
        );
        let printed = run(
            &mut cart,
            Command::SetQty {
                id: "5".to_string(),
                value: "abc".to_string(),
            },
        );
        assert!(printed.starts_with("unchanged"));
        assert_eq!(run(&mut cart, Command::Count).trim(), "2");
    }

    #[test]
    fn test_show_json() {
        let mut cart = engine();
        run(
            &mut cart,
            Command::AddSet {
                product: product("9"),
                set_size: Decimal::from(6),
                sets: Decimal::from(2),
                replace: false,
            },
        );
        let printed = run(&mut cart, Command::Show { json: true });
        let view: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(view["item_count"], 1);
        assert_eq!(view["rows"][0]["id"], "9");
        assert_eq!(view["rows"][0]["qty"], "12");
    }

    #[test]
    fn test_clear_notifies() {
        let mut cart = engine();
        run(
            &mut cart,
            Command::Add {
                product: product("1"),
                qty: Decimal::ONE,
                set_size: Decimal::ONE,
                replace: false,
            },
        );
        let printed = run(&mut cart, Command::Clear);
        assert!(printed.starts_with("cleared"));

        let kinds: Vec<NoticeKind> = cart.surface().notices().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Added, NoticeKind::Cleared]);
        assert!(run(&mut cart, Command::Show { json: false }).contains("Корзина пуста"));
    }
}
