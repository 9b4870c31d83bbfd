//! Resource model.
//!
//! Resources are what a task consumes: crews, machines, materials, or
//! allocated money. Cost is `quantity × cost_per_unit`.

use serde::{Deserialize, Serialize};

/// A resource consumed by a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name. Together with `kind`, identifies a shared resource.
    pub name: String,
    /// Resource classification.
    pub kind: ResourceKind,
    /// Amount consumed (non-negative).
    pub quantity: f64,
    /// Unit of `quantity` (e.g. "days", "m3", "tons").
    pub unit: String,
    /// Price per unit (non-negative).
    #[serde(default)]
    pub cost_per_unit: f64,
    /// Fraction of the resource available to the project (0.0..=1.0).
    #[serde(default = "full_availability")]
    pub availability: f64,
}

fn full_availability() -> f64 {
    1.0
}

/// Resource classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Crews and trades.
    Labor,
    /// Machines and tools.
    Equipment,
    /// Consumed building material.
    Material,
    /// Money set aside for the task.
    Budget,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Labor => "labor",
            ResourceKind::Equipment => "equipment",
            ResourceKind::Material => "material",
            ResourceKind::Budget => "budget",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Resource {
    /// Creates a resource with zero cost and full availability.
    pub fn new(id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            quantity: 0.0,
            unit: String::new(),
            cost_per_unit: 0.0,
            availability: 1.0,
        }
    }

    /// Creates a labor resource.
    pub fn labor(id: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Labor)
    }

    /// Creates an equipment resource.
    pub fn equipment(id: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Equipment)
    }

    /// Creates a material resource.
    pub fn material(id: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Material)
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets quantity and unit.
    pub fn with_quantity(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.quantity = quantity.max(0.0);
        self.unit = unit.into();
        self
    }

    /// Sets the unit cost.
    pub fn with_cost(mut self, cost_per_unit: f64) -> Self {
        self.cost_per_unit = cost_per_unit.max(0.0);
        self
    }

    /// Sets availability, clamped to 0.0..=1.0.
    pub fn with_availability(mut self, availability: f64) -> Self {
        self.availability = availability.clamp(0.0, 1.0);
        self
    }

    /// Total cost: quantity × unit cost.
    #[inline]
    pub fn total_cost(&self) -> f64 {
        self.quantity * self.cost_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_builder() {
        let r = Resource::material("R1")
            .with_name("Concrete")
            .with_quantity(40.0, "m3")
            .with_cost(120.0)
            .with_availability(0.8);

        assert_eq!(r.id, "R1");
        assert_eq!(r.name, "Concrete");
        assert_eq!(r.kind, ResourceKind::Material);
        assert_eq!(r.unit, "m3");
        assert!((r.total_cost() - 4800.0).abs() < 1e-10);
        assert!((r.availability - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_resource_defaults() {
        let r = Resource::labor("L1");
        assert!((r.cost_per_unit - 0.0).abs() < 1e-10);
        assert!((r.availability - 1.0).abs() < 1e-10);
        assert!((r.total_cost() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_clamping() {
        let r = Resource::equipment("E1")
            .with_quantity(-3.0, "days")
            .with_cost(-10.0)
            .with_availability(1.5);
        assert!((r.quantity - 0.0).abs() < 1e-10);
        assert!((r.cost_per_unit - 0.0).abs() < 1e-10);
        assert!((r.availability - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_deserialize_defaults() {
        let r: Resource = serde_json::from_str(
            r#"{"id":"L1","name":"Crew","kind":"labor","quantity":2.0,"unit":"days"}"#,
        )
        .unwrap();
        assert_eq!(r.kind, ResourceKind::Labor);
        assert!((r.availability - 1.0).abs() < 1e-10);
        assert!((r.cost_per_unit - 0.0).abs() < 1e-10);
    }
}
