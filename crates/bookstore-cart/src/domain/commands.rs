//! Commands for the Cart context.

use bookstore_catalog::BookId;
use bookstore_core::command::Command;
use uuid::Uuid;

/// Command to reserve units of a catalog book.
#[derive(Debug, Clone)]
pub struct AddToCart {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The catalog book to reserve.
    pub book_id: BookId,
    /// Units requested.
    pub quantity: u32,
}

impl Command for AddToCart {
    fn command_type(&self) -> &'static str {
        "cart.add_to_cart"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.cart_id
    }
}

/// Command to drop a book from the cart.
#[derive(Debug, Clone)]
pub struct RemoveFromCart {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The book to remove.
    pub book_id: BookId,
}

impl Command for RemoveFromCart {
    fn command_type(&self) -> &'static str {
        "cart.remove_from_cart"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.cart_id
    }
}

/// Command to set a reservation to an absolute quantity.
#[derive(Debug, Clone)]
pub struct UpdateQuantity {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The book whose reservation changes.
    pub book_id: BookId,
    /// The new quantity.
    pub quantity: u32,
}

impl Command for UpdateQuantity {
    fn command_type(&self) -> &'static str {
        "cart.update_quantity"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.cart_id
    }
}

/// Command to step a reservation up or down by a relative amount.
#[derive(Debug, Clone)]
pub struct AdjustQuantity {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The book whose reservation changes.
    pub book_id: BookId,
    /// Signed change, usually `1` or `-1`.
    pub delta: i32,
}

impl Command for AdjustQuantity {
    fn command_type(&self) -> &'static str {
        "cart.adjust_quantity"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.cart_id
    }
}

/// Command to show or hide the cart panel.
#[derive(Debug, Clone)]
pub struct ToggleCart {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The cart identifier.
    pub cart_id: Uuid,
}

impl Command for ToggleCart {
    fn command_type(&self) -> &'static str {
        "cart.toggle_cart"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.cart_id
    }
}

/// Command to check the cart out.
#[derive(Debug, Clone)]
pub struct Checkout {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The cart identifier.
    pub cart_id: Uuid,
}

impl Command for Checkout {
    fn command_type(&self) -> &'static str {
        "cart.checkout"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.cart_id
    }
}
