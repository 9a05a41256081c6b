//! Vehicles from the sales inventory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A `vehicles` document. Unlike a driver's [`Vehicle`](crate::domain::Vehicle)
/// these are standalone documents used for paging and aggregations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryVehicle {
    /// Sale price.
    pub price: f64,
    /// Paint colour.
    pub color: String,
    /// Manufacturer, lower case.
    pub make: String,
    /// Date of sale.
    pub sold: NaiveDate,
    /// "new", "good" or "okay".
    pub condition: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_inventory_vehicle() {
        let vehicle: InventoryVehicle = serde_json::from_str(
            r#"{ "price" : 10000, "color" : "white", "make" : "honda", "sold" : "2016-10-28", "condition": "okay"}"#,
        )
        .unwrap();

        assert_eq!(vehicle.price, 10000.0);
        assert_eq!(vehicle.make, "honda");
        assert_eq!(vehicle.sold, NaiveDate::from_ymd_opt(2016, 10, 28).unwrap());
    }

    #[test]
    fn test_reject_malformed_sale_date() {
        let result = serde_json::from_str::<InventoryVehicle>(
            r#"{ "price" : 10000, "color" : "white", "make" : "honda", "sold" : "28/10/2016", "condition": "okay"}"#,
        );
        assert!(result.is_err());
    }
}
