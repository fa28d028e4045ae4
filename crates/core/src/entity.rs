//! Records that keep their identity while their fields change.

/// A record identified by a stable id rather than by its field values.
///
/// Orders, customers and invoice records are entities: an order that moves
/// from `pending` to `completed` is still the same order.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> &Self::Id;

    /// True when both values denote the same record, whatever their fields say.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderId;

    struct Ticket {
        id: OrderId,
        label: &'static str,
    }

    impl Entity for Ticket {
        type Id = OrderId;

        fn id(&self) -> &OrderId {
            &self.id
        }
    }

    #[test]
    fn identity_ignores_field_changes() {
        let id = OrderId::new();
        let before = Ticket { id, label: "pending" };
        let after = Ticket { id, label: "completed" };
        assert_ne!(before.label, after.label);
        assert!(before.same_identity(&after));
        assert!(!before.same_identity(&Ticket { id: OrderId::new(), label: "pending" }));
    }
}
