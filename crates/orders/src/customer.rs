use serde::{Deserialize, Serialize};

use sarthi_core::{CustomerId, Entity};

/// Customer master record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub gst_number: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            email: None,
            phone: None,
            address: None,
            city: None,
            state: None,
            pincode: None,
            gst_number: None,
        }
    }

    pub fn with_postal_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        self.address = Some(address.into());
        self.city = Some(city.into());
        self.state = Some(state.into());
        self.pincode = Some(pincode.into());
        self
    }

    /// Single-line postal address: street, city, state, pincode joined by `", "`.
    ///
    /// Missing or blank parts are skipped so no stray separators remain.
    pub fn formatted_address(&self) -> String {
        [&self.address, &self.city, &self.state, &self.pincode]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_address_joins_all_parts() {
        let c = Customer::new("Rajesh Kumar").with_postal_address(
            "123 MG Road",
            "Mumbai",
            "Maharashtra",
            "400001",
        );
        assert_eq!(c.formatted_address(), "123 MG Road, Mumbai, Maharashtra, 400001");
    }

    #[test]
    fn empty_parts_leave_no_stray_separators() {
        let mut c = Customer::new("Walk-in");
        c.city = Some("Pune".to_string());
        c.state = Some("  ".to_string());
        assert_eq!(c.formatted_address(), "Pune");

        let bare = Customer::new("Nobody");
        assert_eq!(bare.formatted_address(), "");
    }

    #[test]
    fn leading_parts_missing() {
        let mut c = Customer::new("Priya");
        c.state = Some("Karnataka".to_string());
        c.pincode = Some("560001".to_string());
        assert_eq!(c.formatted_address(), "Karnataka, 560001");
    }
}
