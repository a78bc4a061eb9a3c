//! Command abstractions.

use uuid::Uuid;

/// An intent issued by the view layer against a single aggregate.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted type name, e.g. `cart.add_to_cart`, used in logs.
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the events it causes.
    fn correlation_id(&self) -> Uuid;

    /// The aggregate stream this command targets.
    fn aggregate_id(&self) -> Uuid;
}
