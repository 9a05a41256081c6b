//! Drivers and the vehicles they own.

use serde::{Deserialize, Serialize};

/// Root of a `drivers` document: `{"driver": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverContainer {
    /// The driver.
    pub driver: Driver,
}

/// A driver with an ordered list of vehicles, mapped nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Family name.
    pub last_name: String,
    /// Owned vehicles, in document order.
    #[serde(rename = "vehicle", default)]
    pub vehicles: Vec<Vehicle>,
}

/// A vehicle inside a driver document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
}

impl Driver {
    /// Check whether the driver owns a vehicle of the given make and model.
    pub fn owns(&self, make: &str, model: &str) -> bool {
        self.vehicles
            .iter()
            .any(|v| v.make == make && v.model == model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_driver_container() {
        let container: DriverContainer = serde_json::from_str(
            r#"{"driver":{"last_name":"McQueen", "vehicle":[{"make":"Powell Motors", "model":"Canyonero"}, {"make":"Miller-Meteor", "model":"Ecto-1"} ] } }"#,
        )
        .unwrap();

        assert_eq!(container.driver.last_name, "McQueen");
        assert_eq!(container.driver.vehicles.len(), 2);
        assert_eq!(container.driver.vehicles[1].model, "Ecto-1");
        assert!(container.driver.owns("Powell Motors", "Canyonero"));
        assert!(!container.driver.owns("Powell Motors", "Ecto-1"));
    }

    #[test]
    fn test_driver_without_vehicles() {
        let driver: Driver = serde_json::from_str(r#"{"last_name":"Hudson"}"#).unwrap();
        assert!(driver.vehicles.is_empty());
    }
}
