//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two line items with the same
/// description, quantity and prices are the same line item. They are built once
/// and never mutated in place; to "change" one, build a new value.
///
/// - **Value Object**: `LineItem`, `AnalysisResult`, `GeneratedInvoice`
/// - **Entity**: `Order`, `Customer`, `InvoiceRecord` (compared by id)
///
/// The bounds keep value objects cheap to copy around, comparable in tests and
/// printable in logs.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
