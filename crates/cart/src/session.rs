use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adhcart_catalog::{Catalog, Product, ProductId};
use adhcart_core::{Aggregate, AggregateRoot, DomainError, DomainResult, Money, SessionId};
use adhcart_events::Event;

use crate::receipt::{Receipt, ReceiptLine};

/// One cart position: a product reference (non-owning catalog key) and a
/// positive quantity. A line whose quantity would reach zero is removed,
/// never kept around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self, unit_price: Money) -> Money {
        unit_price.times(self.quantity)
    }
}

/// Aggregate root: one interactive shopping session.
///
/// Owns both the catalog (whose products only ever mutate their stock) and
/// the ordered cart lines — the single ownership domain for every
/// stock-quantity invariant. For a given product at most one line exists;
/// `line quantity + product stock` stays constant under every operation
/// except checkout, which sells the reserved units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSession {
    id: SessionId,
    catalog: Catalog,
    lines: Vec<CartLine>,
    version: u64,
}

impl CartSession {
    pub fn new(id: SessionId, catalog: Catalog) -> Self {
        Self {
            id,
            catalog,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Case- and trim-insensitive catalog lookup. No side effects.
    pub fn find_product(&self, raw_id: &str) -> DomainResult<&Product> {
        self.catalog.find(raw_id)
    }

    /// The line at a 1-based cart position.
    pub fn line(&self, line_no: u32) -> Option<&CartLine> {
        line_no
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx as usize))
    }

    /// Itemized summary of the current cart with the grand total.
    pub fn receipt(&self) -> Receipt {
        let mut lines = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if let Some(product) = self.catalog.get(&line.product_id) {
                lines.push(ReceiptLine {
                    product_id: line.product_id.clone(),
                    name: product.name().to_string(),
                    quantity: line.quantity,
                    unit_price: product.unit_price(),
                    subtotal: line.subtotal(product.unit_price()),
                });
            }
        }
        let total = lines.iter().map(|l| l.subtotal).sum();
        Receipt { lines, total }
    }

    fn line_position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.product_id == product_id)
    }
}

impl AggregateRoot for CartSession {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddToCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCart {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateQuantity (1-based cart position, absolute new quantity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuantity {
    pub session_id: SessionId,
    pub line_no: u32,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddToCart(AddToCart),
    UpdateQuantity(UpdateQuantity),
    Checkout(Checkout),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityUpdated (line kept, quantity changed to a positive value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdated {
    pub session_id: SessionId,
    pub line_no: u32,
    pub product_id: ProductId,
    pub old_quantity: u32,
    pub new_quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved (full line quantity returns to stock).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub session_id: SessionId,
    pub line_no: u32,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckedOut (cart cleared; stock not restored — units are sold).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedOut {
    pub session_id: SessionId,
    pub receipt: Receipt,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    QuantityUpdated(QuantityUpdated),
    ItemRemoved(ItemRemoved),
    CheckedOut(CheckedOut),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item_added",
            CartEvent::QuantityUpdated(_) => "cart.quantity_updated",
            CartEvent::ItemRemoved(_) => "cart.item_removed",
            CartEvent::CheckedOut(_) => "cart.checked_out",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::QuantityUpdated(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::CheckedOut(e) => e.occurred_at,
        }
    }
}

impl Aggregate for CartSession {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                match self.line_position(&e.product_id) {
                    Some(idx) => self.lines[idx].quantity += e.quantity,
                    None => self.lines.push(CartLine {
                        product_id: e.product_id.clone(),
                        quantity: e.quantity,
                    }),
                }
                if let Some(product) = self.catalog.get_mut(&e.product_id) {
                    product.reserve(e.quantity);
                }
            }
            CartEvent::QuantityUpdated(e) => {
                let idx = (e.line_no - 1) as usize;
                if let Some(line) = self.lines.get_mut(idx) {
                    line.quantity = e.new_quantity;
                }
                if let Some(product) = self.catalog.get_mut(&e.product_id) {
                    if e.new_quantity > e.old_quantity {
                        product.reserve(e.new_quantity - e.old_quantity);
                    } else {
                        product.restock(e.old_quantity - e.new_quantity);
                    }
                }
            }
            CartEvent::ItemRemoved(e) => {
                let idx = (e.line_no - 1) as usize;
                if idx < self.lines.len() {
                    self.lines.remove(idx);
                }
                if let Some(product) = self.catalog.get_mut(&e.product_id) {
                    product.restock(e.quantity);
                }
            }
            CartEvent::CheckedOut(_) => {
                self.lines.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddToCart(cmd) => self.handle_add(cmd),
            CartCommand::UpdateQuantity(cmd) => self.handle_update(cmd),
            CartCommand::Checkout(cmd) => self.handle_checkout(cmd),
        }
    }
}

impl CartSession {
    fn ensure_session(&self, session_id: SessionId) -> Result<(), DomainError> {
        if self.id != session_id {
            return Err(DomainError::invariant("session mismatch"));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddToCart) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session(cmd.session_id)?;

        if cmd.quantity == 0 {
            return Err(DomainError::validation(
                "quantity must be a positive whole number",
            ));
        }

        let product = self
            .catalog
            .get(&cmd.product_id)
            .ok_or_else(|| DomainError::unknown_product(cmd.product_id.as_str()))?;

        if product.is_out_of_stock() {
            return Err(DomainError::out_of_stock(product.name()));
        }

        // Stock already excludes units reserved by this product's existing
        // line, so the requested increment checks against it directly.
        if cmd.quantity > product.stock() {
            return Err(DomainError::insufficient_stock(
                product.name(),
                product.stock(),
            ));
        }

        Ok(vec![CartEvent::ItemAdded(ItemAdded {
            session_id: cmd.session_id,
            product_id: cmd.product_id.clone(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateQuantity) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session(cmd.session_id)?;

        if self.lines.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let line = self
            .line(cmd.line_no)
            .ok_or_else(|| DomainError::unknown_line(cmd.line_no))?;

        let product = self
            .catalog
            .get(&line.product_id)
            .ok_or_else(|| DomainError::invariant("cart line references unknown product"))?;

        if cmd.quantity == line.quantity {
            // No change requested; nothing to emit.
            return Ok(Vec::new());
        }

        if cmd.quantity == 0 {
            return Ok(vec![CartEvent::ItemRemoved(ItemRemoved {
                session_id: cmd.session_id,
                line_no: cmd.line_no,
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                occurred_at: cmd.occurred_at,
            })]);
        }

        if cmd.quantity > line.quantity {
            let delta = cmd.quantity - line.quantity;
            if delta > product.stock() {
                return Err(DomainError::insufficient_stock(
                    product.name(),
                    product.stock(),
                ));
            }
        }

        Ok(vec![CartEvent::QuantityUpdated(QuantityUpdated {
            session_id: cmd.session_id,
            line_no: cmd.line_no,
            product_id: line.product_id.clone(),
            old_quantity: line.quantity,
            new_quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_checkout(&self, cmd: &Checkout) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session(cmd.session_id)?;

        if self.lines.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        Ok(vec![CartEvent::CheckedOut(CheckedOut {
            session_id: cmd.session_id,
            receipt: self.receipt(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
