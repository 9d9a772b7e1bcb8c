//! Vehicle predicates
//!
//! Filters handed to the query engine are plain predicates over a single
//! `Vehicle`. Callers compose them (field equality, membership, logical AND)
//! before calling the engine.

use crate::models::{BodyStyle, Condition, Drivetrain, FuelType, Transmission, Vehicle};

/// Single-argument boolean test over a vehicle
pub trait VehiclePredicate: Send + Sync {
    fn matches(&self, vehicle: &Vehicle) -> bool;
}

impl<F> VehiclePredicate for F
where
    F: Fn(&Vehicle) -> bool + Send + Sync,
{
    fn matches(&self, vehicle: &Vehicle) -> bool {
        self(vehicle)
    }
}

/// Logical AND of two predicates
pub struct And<A, B>(pub A, pub B);

impl<A: VehiclePredicate, B: VehiclePredicate> VehiclePredicate for And<A, B> {
    fn matches(&self, vehicle: &Vehicle) -> bool {
        self.0.matches(vehicle) && self.1.matches(vehicle)
    }
}

/// Sidebar filter: every populated criterion must hold
///
/// List criteria are membership checks (any of), scalar criteria are
/// equality checks. An unknown attribute never satisfies a criterion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub makes: Vec<String>,
    pub model_years: Vec<i32>,
    pub sold: Option<bool>,
    pub condition: Option<Condition>,
    pub drivetrain: Option<Drivetrain>,
    pub transmission: Option<Transmission>,
    pub fuel_type: Option<FuelType>,
    pub body_style: Option<BodyStyle>,
}

impl VehicleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_makes<I, S>(mut self, makes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.makes = makes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_model_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.model_years = years.into_iter().collect();
        self
    }

    pub fn with_sold(mut self, sold: bool) -> Self {
        self.sold = Some(sold);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_drivetrain(mut self, drivetrain: Drivetrain) -> Self {
        self.drivetrain = Some(drivetrain);
        self
    }

    pub fn with_transmission(mut self, transmission: Transmission) -> Self {
        self.transmission = Some(transmission);
        self
    }

    pub fn with_fuel_type(mut self, fuel_type: FuelType) -> Self {
        self.fuel_type = Some(fuel_type);
        self
    }

    pub fn with_body_style(mut self, body_style: BodyStyle) -> Self {
        self.body_style = Some(body_style);
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn and<P: VehiclePredicate>(self, other: P) -> And<Self, P> {
        And(self, other)
    }
}

fn equals<T: PartialEq>(wanted: &Option<T>, actual: &Option<T>) -> bool {
    match wanted {
        Some(w) => actual.as_ref() == Some(w),
        None => true,
    }
}

impl VehiclePredicate for VehicleFilter {
    fn matches(&self, vehicle: &Vehicle) -> bool {
        if !self.makes.is_empty() {
            let Some(make) = vehicle.make.as_deref() else {
                return false;
            };
            if !self.makes.iter().any(|m| m.eq_ignore_ascii_case(make)) {
                return false;
            }
        }

        if !self.model_years.is_empty() {
            match vehicle.model_year {
                Some(year) if self.model_years.contains(&year) => {}
                _ => return false,
            }
        }

        equals(&self.sold, &vehicle.sold)
            && equals(&self.condition, &vehicle.condition)
            && equals(&self.drivetrain, &vehicle.drivetrain)
            && equals(&self.transmission, &vehicle.transmission)
            && equals(&self.fuel_type, &vehicle.fuel_type)
            && equals(&self.body_style, &vehicle.body_style)
    }
}
