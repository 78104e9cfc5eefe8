//! # Register Session
//!
//! The cashier-facing command surface: one method per user action, each
//! delegating to the transaction engine and returning the refreshed
//! receipt view.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register Commands                                    │
//! │                                                                         │
//! │  Cashier Action           Session Command          State Change         │
//! │  ──────────────           ───────────────          ────────────         │
//! │                                                                         │
//! │  Scan barcode ───────────► scan_barcode() ───────► lookup + append      │
//! │  Type search text ───────► search() ─────────────► (read only)          │
//! │  Pick search result ─────► add_search_result() ──► append               │
//! │  Click a row ────────────► select_line() ────────► selection moves      │
//! │  Void key ───────────────► void_selected() ──────► ack + remove row     │
//! │  Qty prompt ─────────────► set_quantity() ───────► row qty changes      │
//! │  Price prompt ───────────► set_unit_price() ─────► row price changes    │
//! │  Return key ─────────────► mark_return() ────────► row goes negative    │
//! │  Discount prompt ────────► apply_discount() ─────► receipt discount     │
//! │  Abort (confirmed) ──────► abort_receipt() ──────► everything cleared   │
//! │                                                                         │
//! │  scan/search/void call the catalog and are guarded by the busy flag:    │
//! │  while one is pending, submitting another fails fast with Busy. A       │
//! │  drop guard clears the flag whether the call resolves, rejects, or is   │
//! │  abandoned mid-flight; no cancellation exists.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is injected at construction. There is deliberately no
//! global hook for input widgets to discover the session; a front-end
//! holds the `Register` it was handed and nothing else.

use kirana_catalog::Catalog;
use kirana_core::transaction::Transaction;
use kirana_core::validation::{normalize_query, parse_discount, parse_price, parse_quantity};
use kirana_core::{Item, LineItem, Summary, TransactionError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RegisterError;
use crate::state::{BusyFlag, BusyGuard, TransactionState};

// =============================================================================
// View DTOs
// =============================================================================

/// One receipt row as shown to the cashier.
///
/// ## Why a DTO?
/// The engine's `LineItem` derives its total on demand; the view carries
/// the computed number so a front-end never re-implements the arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    pub barcode: String,
    pub description: String,
    pub quantity: i64,
    pub weight: f64,
    pub unit_price_paise: i64,
    pub line_total_paise: i64,
    pub is_returned: bool,
}

impl From<&LineItem> for LineItemView {
    fn from(line: &LineItem) -> Self {
        LineItemView {
            barcode: line.barcode.clone(),
            description: line.description.clone(),
            quantity: line.quantity,
            weight: line.weight,
            unit_price_paise: line.unit_price.paise(),
            line_total_paise: line.line_total().paise(),
            is_returned: line.is_returned,
        }
    }
}

/// The full receipt: rows, selection and derived summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    pub items: Vec<LineItemView>,
    pub selected_index: Option<usize>,
    pub summary: Summary,
}

impl From<&Transaction> for ReceiptView {
    fn from(txn: &Transaction) -> Self {
        ReceiptView {
            items: txn.items().iter().map(LineItemView::from).collect(),
            selected_index: txn.selected_index(),
            summary: txn.summary(),
        }
    }
}

// =============================================================================
// Register
// =============================================================================

/// A register session: the injected catalog, the shared transaction state
/// and the single in-flight-request flag.
///
/// Every command takes `&self`; the shared state wrappers carry their own
/// synchronization, so a front-end bridge may hold the session behind an
/// `Arc` and call it from wherever input arrives.
#[derive(Debug)]
pub struct Register<C: Catalog> {
    catalog: C,
    txn: TransactionState,
    busy: BusyFlag,
}

impl<C: Catalog> Register<C> {
    /// Creates a session over an empty transaction.
    pub fn new(catalog: C) -> Self {
        Register {
            catalog,
            txn: TransactionState::new(),
            busy: BusyFlag::new(),
        }
    }

    /// Whether a catalog call is pending. Front-ends disable the scan and
    /// search inputs while this is true.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    /// Claims the busy flag for one catalog call, failing fast if another
    /// is already in flight. The guard clears the flag on drop, including
    /// when the caller abandons the future mid-await.
    fn begin_catalog_call(&self) -> Result<BusyGuard, RegisterError> {
        self.busy.acquire().ok_or_else(RegisterError::busy)
    }

    // -------------------------------------------------------------------------
    // Catalog-backed commands
    // -------------------------------------------------------------------------

    /// Scans a barcode: looks it up and appends the item to the receipt.
    ///
    /// A lookup miss surfaces as `NotFound` and leaves the transaction
    /// unchanged.
    pub async fn scan_barcode(&self, barcode: &str) -> Result<ReceiptView, RegisterError> {
        debug!(barcode = %barcode, "scan_barcode command");
        let _busy = self.begin_catalog_call()?;
        let item = self.catalog.lookup(barcode).await?;

        Ok(self.txn.with_txn_mut(|t| {
            t.add_item(&item);
            ReceiptView::from(&*t)
        }))
    }

    /// Searches the catalog by description.
    ///
    /// An empty or whitespace-only query short-circuits to no results
    /// without calling the catalog at all.
    pub async fn search(&self, query: &str) -> Result<Vec<Item>, RegisterError> {
        let Some(query) = normalize_query(query) else {
            debug!("search skipped: empty query");
            return Ok(Vec::new());
        };

        debug!(query = %query, "search command");
        let _busy = self.begin_catalog_call()?;
        Ok(self.catalog.search(&query).await?)
    }

    /// Appends an item the cashier picked from search results.
    pub fn add_search_result(&self, item: Item) -> ReceiptView {
        debug!(barcode = %item.barcode, "add_search_result command");
        self.txn.with_txn_mut(|t| {
            t.add_item(&item);
            ReceiptView::from(&*t)
        })
    }

    /// Voids the selected row: acknowledges with the catalog, then removes
    /// the row and clears the selection.
    ///
    /// If the acknowledgment fails, the transaction is left exactly as it
    /// was — the row stays, the selection stays.
    pub async fn void_selected(&self) -> Result<ReceiptView, RegisterError> {
        let barcode = self
            .txn
            .with_txn(|t| t.selected_item().map(|line| line.barcode.clone()))
            .ok_or_else(|| RegisterError::from(TransactionError::NoSelection))?;

        debug!(barcode = %barcode, "void_selected command");
        let _busy = self.begin_catalog_call()?;
        self.catalog.acknowledge_void(&barcode).await?;

        let view = self.txn.with_txn_mut(|t| {
            t.remove_selected()?;
            Ok::<ReceiptView, TransactionError>(ReceiptView::from(&*t))
        })?;
        info!(barcode = %barcode, "line item voided");
        Ok(view)
    }

    // -------------------------------------------------------------------------
    // Engine commands (synchronous)
    // -------------------------------------------------------------------------

    /// Selects the row at `index`.
    pub fn select_line(&self, index: usize) -> Result<ReceiptView, RegisterError> {
        debug!(index = index, "select_line command");
        Ok(self.txn.with_txn_mut(|t| {
            t.select(index)?;
            Ok::<ReceiptView, TransactionError>(ReceiptView::from(&*t))
        })?)
    }

    /// Overrides the selected row's quantity from prompt input.
    pub fn set_quantity(&self, input: &str) -> Result<ReceiptView, RegisterError> {
        debug!(input = %input, "set_quantity command");
        let qty = parse_quantity(input)?;
        Ok(self.txn.with_txn_mut(|t| {
            t.set_quantity(qty)?;
            Ok::<ReceiptView, TransactionError>(ReceiptView::from(&*t))
        })?)
    }

    /// Overrides the selected row's unit price from prompt input.
    pub fn set_unit_price(&self, input: &str) -> Result<ReceiptView, RegisterError> {
        debug!(input = %input, "set_unit_price command");
        let price = parse_price(input)?;
        Ok(self.txn.with_txn_mut(|t| {
            t.set_unit_price(price)?;
            Ok::<ReceiptView, TransactionError>(ReceiptView::from(&*t))
        })?)
    }

    /// Marks the selected row as a return.
    pub fn mark_return(&self) -> Result<ReceiptView, RegisterError> {
        debug!("mark_return command");
        Ok(self.txn.with_txn_mut(|t| {
            t.mark_return()?;
            Ok::<ReceiptView, TransactionError>(ReceiptView::from(&*t))
        })?)
    }

    /// Sets the flat receipt discount from prompt input.
    pub fn apply_discount(&self, input: &str) -> Result<ReceiptView, RegisterError> {
        debug!(input = %input, "apply_discount command");
        let amount = parse_discount(input)?;
        Ok(self.txn.with_txn_mut(|t| {
            t.apply_discount(amount)?;
            Ok::<ReceiptView, TransactionError>(ReceiptView::from(&*t))
        })?)
    }

    /// Aborts the receipt. Callers obtain explicit confirmation first;
    /// this method clears unconditionally.
    pub fn abort_receipt(&self) -> ReceiptView {
        info!("abort_receipt command");
        self.txn.with_txn_mut(|t| {
            t.abort();
            ReceiptView::from(&*t)
        })
    }

    /// Offline receipt stub. Printing/persistence does not exist in this
    /// version; the command logs and returns.
    pub fn offline_receipt(&self) {
        info!("offline receipt requested (no-op in this version)");
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The current receipt view.
    pub fn receipt(&self) -> ReceiptView {
        self.txn.with_txn(|t| ReceiptView::from(t))
    }

    /// The current summary, recomputed from state.
    pub fn summary(&self) -> Summary {
        self.txn.with_txn(|t| t.summary())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use kirana_catalog::{CatalogError, CatalogResult, MockCatalog};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const DOVE: &str = "1234567890123"; // ₹25.00
    const SHAMPOO: &str = "1234567890124"; // ₹120.00

    fn register() -> Register<MockCatalog> {
        Register::new(MockCatalog::with_latency(Duration::ZERO))
    }

    /// Catalog double whose void acknowledgment always fails.
    struct VoidRejectingCatalog {
        inner: MockCatalog,
    }

    #[async_trait]
    impl Catalog for VoidRejectingCatalog {
        async fn lookup(&self, barcode: &str) -> CatalogResult<Item> {
            self.inner.lookup(barcode).await
        }

        async fn search(&self, query: &str) -> CatalogResult<Vec<Item>> {
            self.inner.search(query).await
        }

        async fn acknowledge_void(&self, barcode: &str) -> CatalogResult<()> {
            Err(CatalogError::VoidRejected(barcode.to_string()))
        }
    }

    /// Catalog double counting how often search is actually invoked.
    struct CountingCatalog {
        inner: MockCatalog,
        searches: AtomicUsize,
    }

    #[async_trait]
    impl Catalog for CountingCatalog {
        async fn lookup(&self, barcode: &str) -> CatalogResult<Item> {
            self.inner.lookup(barcode).await
        }

        async fn search(&self, query: &str) -> CatalogResult<Vec<Item>> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            self.inner.search(query).await
        }

        async fn acknowledge_void(&self, barcode: &str) -> CatalogResult<()> {
            self.inner.acknowledge_void(barcode).await
        }
    }

    #[tokio::test]
    async fn test_scan_adds_and_selects() {
        let register = register();
        let view = register.scan_barcode(DOVE).await.unwrap();

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.selected_index, Some(0));
        assert_eq!(view.items[0].line_total_paise, 2500);
        assert_eq!(view.summary.total.paise(), 2625);
        assert!(!register.is_busy());
    }

    #[tokio::test]
    async fn test_scan_unknown_barcode_changes_nothing() {
        let register = register();
        register.scan_barcode(DOVE).await.unwrap();

        let err = register.scan_barcode("0000000000000").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let view = register.receipt();
        assert_eq!(view.items.len(), 1);
        // Busy flag cleared on the reject path too
        assert!(!register.is_busy());
    }

    #[tokio::test]
    async fn test_search_finds_soap() {
        let register = register();
        let results = register.search("soap").await.unwrap();
        let descriptions: Vec<&str> =
            results.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Dove Soap Original 100g", "Lux Soap Rose 100g"]
        );
    }

    #[tokio::test]
    async fn test_empty_search_never_reaches_catalog() {
        let catalog = CountingCatalog {
            inner: MockCatalog::with_latency(Duration::ZERO),
            searches: AtomicUsize::new(0),
        };
        let register = Register::new(catalog);

        assert!(register.search("").await.unwrap().is_empty());
        assert!(register.search("   ").await.unwrap().is_empty());
        assert_eq!(register.catalog.searches.load(Ordering::SeqCst), 0);

        register.search("soap").await.unwrap();
        assert_eq!(register.catalog.searches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_add_search_result_appends() {
        let register = register();
        let results = register.search("butter").await.unwrap();
        assert_eq!(results.len(), 1);

        let view = register.add_search_result(results[0].clone());
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.selected_index, Some(0));
        assert_eq!(view.items[0].unit_price_paise, 25000);
    }

    #[tokio::test]
    async fn test_void_selected_removes_row() {
        let register = register();
        register.scan_barcode(DOVE).await.unwrap();
        register.scan_barcode(SHAMPOO).await.unwrap();
        register.select_line(0).unwrap();

        let view = register.void_selected().await.unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.selected_index, None);
        assert_eq!(view.items[0].barcode, SHAMPOO);
    }

    #[tokio::test]
    async fn test_void_without_selection_fails() {
        let register = register();
        let err = register.void_selected().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoSelection);
    }

    #[tokio::test]
    async fn test_void_rejection_leaves_transaction_untouched() {
        let register = Register::new(VoidRejectingCatalog {
            inner: MockCatalog::with_latency(Duration::ZERO),
        });
        register.scan_barcode(DOVE).await.unwrap();
        let before = register.receipt();

        let err = register.void_selected().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OperationFailed);

        let after = register.receipt();
        assert_eq!(after.items.len(), before.items.len());
        assert_eq!(after.selected_index, before.selected_index);
        assert!(!register.is_busy());
    }

    #[tokio::test]
    async fn test_quantity_and_price_prompts() {
        let register = register();
        register.scan_barcode(SHAMPOO).await.unwrap();

        let view = register.set_quantity("3").unwrap();
        assert_eq!(view.items[0].quantity, 3);
        assert_eq!(view.items[0].line_total_paise, 36000);

        let view = register.set_unit_price("100.00").unwrap();
        assert_eq!(view.items[0].line_total_paise, 30000);

        assert_eq!(
            register.set_quantity("0").unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            register.set_unit_price("abc").unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }

    #[tokio::test]
    async fn test_return_flow_through_session() {
        let register = register();
        register.scan_barcode(SHAMPOO).await.unwrap();

        let view = register.mark_return().unwrap();
        assert_eq!(view.items[0].quantity, -1);
        assert_eq!(view.items[0].line_total_paise, -12000);
        assert!(view.items[0].is_returned);

        assert_eq!(
            register.mark_return().unwrap_err().code,
            ErrorCode::AlreadyReturned
        );

        // Quantity override keeps the return sign
        let view = register.set_quantity("3").unwrap();
        assert_eq!(view.items[0].quantity, -3);
    }

    #[tokio::test]
    async fn test_discount_and_summary() {
        // Two ₹14.00 lines, ₹3.00 off → net ₹25.00, tax ₹1.25, total ₹26.25
        let register = register();
        register.scan_barcode("1234567890129").await.unwrap();
        register.scan_barcode("1234567890129").await.unwrap();

        let view = register.apply_discount("3.00").unwrap();
        assert_eq!(view.summary.subtotal.paise(), 5600); // default qty is 2
        // Maggi's default quantity is 2, so adjust both rows down to 1 each
        register.select_line(0).unwrap();
        register.set_quantity("1").unwrap();
        register.select_line(1).unwrap();
        let view = register.set_quantity("1").unwrap();

        assert_eq!(view.summary.subtotal.paise(), 2800);
        assert_eq!(view.summary.net.paise(), 2500);
        assert_eq!(view.summary.tax.paise(), 125);
        assert_eq!(view.summary.total.paise(), 2625);

        assert_eq!(
            register.apply_discount("-1").unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }

    #[tokio::test]
    async fn test_abort_resets_receipt() {
        let register = register();
        register.scan_barcode(DOVE).await.unwrap();
        register.apply_discount("5").unwrap();

        let view = register.abort_receipt();
        assert!(view.items.is_empty());
        assert_eq!(view.selected_index, None);
        assert_eq!(view.summary, Summary::empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_catalog_call_fails_busy() {
        let register = Register::new(MockCatalog::with_latency(Duration::from_millis(300)));

        let scan = register.scan_barcode(DOVE);
        let contender = async {
            // Let the scan claim the flag and park on its latency first
            tokio::time::sleep(Duration::from_millis(10)).await;
            assert!(register.is_busy());
            register.search("soap").await
        };

        let (scanned, contended) = tokio::join!(scan, contender);
        scanned.unwrap();
        assert_eq!(contended.unwrap_err().code, ErrorCode::Busy);
        assert!(!register.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_catalog_call_clears_busy() {
        let register = Register::new(MockCatalog::with_latency(Duration::from_secs(60)));

        // Give up on a slow lookup; dropping the future must release the flag
        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), register.scan_barcode(DOVE)).await;
        assert!(abandoned.is_err());
        assert!(!register.is_busy());

        // The next call goes through (the abandoned one never landed a row)
        let view = register.scan_barcode(DOVE).await.unwrap();
        assert_eq!(view.items.len(), 1);
    }

    #[tokio::test]
    async fn test_receipt_view_serializes_camel_case() {
        let register = register();
        register.scan_barcode(DOVE).await.unwrap();

        let json = serde_json::to_value(register.receipt()).unwrap();
        assert_eq!(json["items"][0]["lineTotalPaise"], 2500);
        assert_eq!(json["selectedIndex"], 0);
    }
}
