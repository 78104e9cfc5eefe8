//! # Kirana Register Entry Point
//!
//! A line-oriented terminal harness around the register session. This is
//! deliberately not a UI: no layout, no widgets, no keyboard wiring —
//! just enough of a front-end to drive every command and render the
//! receipt with the deployment locale's currency format.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Build the mock catalog (300 ms artificial latency)
//! 3. Construct the register session with the catalog injected
//! 4. Read commands from stdin until `quit`

use std::io::{self, BufRead, Write};

use kirana_catalog::MockCatalog;
use kirana_core::{Item, Money};
use kirana_register::session::{ReceiptView, Register};
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  scan <barcode>     look up a barcode and add it to the receipt
  find <text>        search item descriptions (case-insensitive)
  add <n>            add result n of the last search to the receipt
  select <n>         select receipt row n (1-based)
  qty <n>            override the selected row's quantity
  price <amount>     override the selected row's unit price
  return             mark the selected row as a return
  void               void (remove) the selected row
  disc <amount>      set the flat receipt discount
  total              show the current total
  receipt            print the receipt
  json               print the receipt as JSON
  offline            offline receipt (stub)
  abort              abort the receipt (asks for confirmation)
  help               show this help
  quit               exit";

#[tokio::main]
async fn main() {
    init_tracing();
    info!("Starting Kirana POS register");

    let register = Register::new(MockCatalog::new());
    let mut last_search: Vec<Item> = Vec::new();

    println!("Kirana POS register. Type 'help' for commands.");
    let stdin = io::stdin();
    loop {
        print!("pos> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }
        let mut parts = line.trim().splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let arg = parts.next().unwrap_or("").trim();

        match command {
            "" => {}
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,

            "scan" => match register.scan_barcode(arg).await {
                Ok(view) => print_receipt(&view),
                Err(err) => println!("!! {}", err.message),
            },

            "find" => match register.search(arg).await {
                Ok(results) if results.is_empty() => println!("No items found."),
                Ok(results) => {
                    for (i, item) in results.iter().enumerate() {
                        println!(
                            "  {}. {}  [{}]  {}",
                            i + 1,
                            item.description,
                            item.barcode,
                            item.price()
                        );
                    }
                    last_search = results;
                }
                Err(err) => println!("!! {}", err.message),
            },

            "add" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 && n <= last_search.len() => {
                    let view = register.add_search_result(last_search[n - 1].clone());
                    print_receipt(&view);
                }
                _ => println!("!! pick a search result number (run 'find' first)"),
            },

            "select" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => report(register.select_line(n - 1)),
                _ => println!("!! select takes a 1-based row number"),
            },

            "qty" => report(register.set_quantity(arg)),
            "price" => report(register.set_unit_price(arg)),
            "return" => report(register.mark_return()),
            "disc" => report(register.apply_discount(arg)),

            "void" => match register.void_selected().await {
                Ok(view) => print_receipt(&view),
                Err(err) => println!("!! {}", err.message),
            },

            "total" => println!("Current total: {}", register.summary().total),
            "receipt" => print_receipt(&register.receipt()),

            "json" => match serde_json::to_string_pretty(&register.receipt()) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("!! {err}"),
            },

            "offline" => {
                register.offline_receipt();
                println!("Offline receipt is not implemented in this version.");
            }

            "abort" => {
                // Destructive: the session clears unconditionally, so the
                // confirmation lives here at the front-end
                print!("Abort the entire receipt? [y/N] ");
                let _ = io::stdout().flush();
                let mut answer = String::new();
                if stdin.lock().read_line(&mut answer).is_ok()
                    && answer.trim().eq_ignore_ascii_case("y")
                {
                    print_receipt(&register.abort_receipt());
                } else {
                    println!("Abort cancelled.");
                }
            }

            other => println!("!! unknown command '{other}' (try 'help')"),
        }
    }

    info!("Register session ended");
}

/// Prints either the refreshed receipt or the error message.
fn report(result: Result<ReceiptView, kirana_register::RegisterError>) {
    match result {
        Ok(view) => print_receipt(&view),
        Err(err) => println!("!! {}", err.message),
    }
}

/// Renders the receipt table and summary.
fn print_receipt(view: &ReceiptView) {
    if view.items.is_empty() {
        println!("(empty receipt)");
    }
    for (i, line) in view.items.iter().enumerate() {
        let marker = if view.selected_index == Some(i) { ">" } else { " " };
        let flag = if line.is_returned { " R" } else { "" };
        println!(
            "{} {:2}. {:<36} {:>4} x {:>10} = {:>10}{}",
            marker,
            i + 1,
            line.description,
            line.quantity,
            Money::from_paise(line.unit_price_paise).to_string(),
            Money::from_paise(line.line_total_paise).to_string(),
            flag,
        );
    }
    let s = &view.summary;
    println!("  ----------------------------------------");
    println!("  Items: {}   Subtotal: {}", s.item_count, s.subtotal);
    println!("  Discount: {}   Net: {}", s.discount, s.net);
    println!("  Tax (5%): {}   TOTAL: {}", s.tax, s.total);
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kirana=trace` - Show trace for kirana crates only
/// - Default: INFO level, debug for kirana crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kirana=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
