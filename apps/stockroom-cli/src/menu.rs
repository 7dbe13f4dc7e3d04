//! # Menu Loop
//!
//! The interactive text front end. All store logic lives in
//! `stockroom-core`; this module only prints, reads and parses.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. List all products   ──► numbered Store::active_products()          │
//! │  2. Show total amount   ──► Store::total_quantity()                    │
//! │  3. Make an order       ──► "<number> <qty>" lines until "done"        │
//! │                             └─► Store::order(lines)                    │
//! │  4. Quit                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Generic over `BufRead`/`Write` so tests can script a whole session.

use std::io::{self, BufRead, Write};

use stockroom_core::{OrderLine, ProductId, Store};
use tracing::{debug, info, warn};

const MENU: &str = "\n=== Store Management System ===
1. List all products in store
2. Show total amount in store
3. Make an order
4. Quit
============================";

/// Parses `"<product_number> <quantity>"`.
///
/// Product numbers are 1-based as shown in the listing. Quantity is passed
/// through unchecked; the core rejects non-positive values.
pub fn parse_order_entry(input: &str) -> Option<(usize, i64)> {
    let mut parts = input.split_whitespace();
    let number = parts.next()?.parse().ok()?;
    let quantity = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((number, quantity))
}

/// Runs the menu until the user quits or input ends.
pub fn run<R: BufRead, W: Write>(
    store: &mut Store,
    store_name: &str,
    input: R,
    output: W,
) -> io::Result<()> {
    Menu {
        store,
        input,
        output,
    }
    .run(store_name)
}

struct Menu<'a, R, W> {
    store: &'a mut Store,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self, store_name: &str) -> io::Result<()> {
        writeln!(self.output, "Welcome to {store_name}!")?;

        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("\nEnter your choice (1-4): ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.list_products()?,
                "2" => self.show_total_amount()?,
                "3" => self.make_order()?,
                "4" => break,
                other => {
                    debug!(choice = other, "Unknown menu choice");
                    writeln!(
                        self.output,
                        "\nInvalid choice! Please enter a number between 1 and 4."
                    )?;
                }
            }
        }

        writeln!(self.output, "\nThank you for using the Store Management System!")?;
        self.output.flush()
    }

    /// Writes `text`, then reads one trimmed line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn list_products(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nAvailable Products:")?;
        writeln!(self.output, "-----------------")?;
        for (idx, product) in self.store.active_products().iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, product.show())?;
        }
        Ok(())
    }

    fn show_total_amount(&mut self) -> io::Result<()> {
        let total = self.store.total_quantity();
        writeln!(self.output, "\nTotal amount of items in store: {total}")
    }

    fn make_order(&mut self) -> io::Result<()> {
        // Numbering stays fixed for the whole order, even if a product sells
        // out while lines are being collected.
        let available: Vec<ProductId> = self
            .store
            .active_products()
            .iter()
            .map(|p| p.id())
            .collect();

        if available.is_empty() {
            writeln!(self.output, "\nNo active products available for purchase!")?;
            return Ok(());
        }

        let mut lines: Vec<OrderLine> = Vec::new();
        loop {
            self.list_products()?;
            writeln!(
                self.output,
                "\nEnter product number and quantity (e.g., '1 5'), or 'done' to finish:"
            )?;

            let Some(entry) = self.prompt("> ")? else {
                break;
            };
            if entry.eq_ignore_ascii_case("done") {
                break;
            }

            match parse_order_entry(&entry) {
                Some((number, quantity)) if (1..=available.len()).contains(&number) => {
                    let id = available[number - 1];
                    lines.push(OrderLine::new(id, quantity));
                    let name = self.store.product(id).map(|p| p.name()).unwrap_or_default();
                    writeln!(self.output, "Added to cart: {quantity}x {name}")?;
                }
                Some(_) => writeln!(self.output, "Invalid product number!")?,
                None => writeln!(
                    self.output,
                    "Invalid input! Please use format 'product_number quantity'"
                )?,
            }
        }

        if lines.is_empty() {
            writeln!(self.output, "\nNo items in order!")?;
            return Ok(());
        }

        match self.store.order(&lines) {
            Ok(total) => {
                info!(lines = lines.len(), total, "Order completed");
                writeln!(self.output, "\nOrder completed! Total price: ${total:.2}")
            }
            Err(error) => {
                warn!(lines = lines.len(), %error, "Order failed");
                writeln!(self.output, "\nError processing order: {error}")
            }
        }
    }
}
