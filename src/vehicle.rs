// EcoTrace 🌱 AGPL-3.0 License

//! Vehicle profiles.
//!
//! Maps a vehicle make and body type to the representative engine size and
//! mileage the regression model is queried with.

use std::fmt;
use std::str::FromStr;

use crate::features::FeatureVector;

/// Vehicle manufacturer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Make {
    Honda,
    Mazda,
    Mitsubishi,
    Hyundai,
    Kia,
    Toyota,
    Nissan,
    Audi,
    MercedesBenz,
    Porsche,
    Jeep,
    Volkswagen,
    Volvo,
    /// Any make not listed.
    Others,
}

impl Make {
    /// Every make in the table.
    pub const ALL: [Self; 14] = [
        Self::Honda,
        Self::Mazda,
        Self::Mitsubishi,
        Self::Hyundai,
        Self::Kia,
        Self::Toyota,
        Self::Nissan,
        Self::Audi,
        Self::MercedesBenz,
        Self::Porsche,
        Self::Jeep,
        Self::Volkswagen,
        Self::Volvo,
        Self::Others,
    ];

    /// Name as sent by clients.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Honda => "Honda",
            Self::Mazda => "Mazda",
            Self::Mitsubishi => "Mitsubishi",
            Self::Hyundai => "Hyundai",
            Self::Kia => "Kia",
            Self::Toyota => "Toyota",
            Self::Nissan => "Nissan",
            Self::Audi => "Audi",
            Self::MercedesBenz => "Mercedes_Benz",
            Self::Porsche => "Porsche",
            Self::Jeep => "Jeep",
            Self::Volkswagen => "Volkswagen",
            Self::Volvo => "Volvo",
            Self::Others => "Others",
        }
    }
}

impl fmt::Display for Make {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Make {
    type Err = VehicleLookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|make| make.as_str().to_lowercase() == normalized)
            .ok_or_else(|| VehicleLookupError::UnknownMake(s.to_string()))
    }
}

/// Vehicle body type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Hatchback,
    Sedan,
    Suv,
}

impl VehicleType {
    /// Name as sent by clients.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hatchback => "Hatchback",
            Self::Sedan => "Sedan",
            Self::Suv => "Suv",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = VehicleLookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hatchback" => Ok(Self::Hatchback),
            "sedan" => Ok(Self::Sedan),
            "suv" => Ok(Self::Suv),
            _ => Err(VehicleLookupError::UnknownVehicleType(s.to_string())),
        }
    }
}

/// A make and body type resolved to model features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProfile {
    pub make: Make,
    pub vehicle_type: VehicleType,
    pub features: FeatureVector,
}

impl VehicleProfile {
    /// Look up the profile for a make and body type.
    #[must_use]
    pub const fn new(make: Make, vehicle_type: VehicleType) -> Self {
        Self {
            make,
            vehicle_type,
            features: features_for(make, vehicle_type),
        }
    }

    /// Parse a make and body type by name and look up the profile.
    ///
    /// # Errors
    ///
    /// Returns [`VehicleLookupError`] if either name is unknown.
    pub fn lookup(make: &str, vehicle_type: &str) -> Result<Self, VehicleLookupError> {
        Ok(Self::new(make.parse()?, vehicle_type.parse()?))
    }
}

/// `(engine_size, mileage)` per make and body type.
#[must_use]
pub const fn features_for(make: Make, vehicle_type: VehicleType) -> FeatureVector {
    use Make as M;
    use VehicleType as T;

    let (engine_size, mileage) = match (make, vehicle_type) {
        (M::Honda, T::Hatchback) => (2.0, 11.0),
        (M::Honda, T::Sedan) => (2.0, 7.5),
        (M::Honda, T::Suv) => (2.0, 11.0),
        (M::Mazda, T::Hatchback) => (2.0, 8.6),
        (M::Mazda, T::Sedan) => (2.5, 8.0),
        (M::Mazda, T::Suv) => (2.5, 8.8),
        (M::Mitsubishi, T::Hatchback) => (2.0, 9.0),
        (M::Mitsubishi, T::Sedan) => (1.8, 0.0),
        (M::Mitsubishi, T::Suv) => (1.8, 9.1),
        (M::Hyundai, T::Hatchback) => (1.6, 10.1),
        (M::Hyundai, T::Sedan) => (2.0, 8.0),
        (M::Hyundai, T::Suv) => (2.0, 10.0),
        (M::Kia, T::Hatchback) => (1.6, 10.5),
        (M::Kia, T::Sedan) => (2.0, 8.0),
        (M::Kia, T::Suv) => (2.0, 10.5),
        (M::Toyota, T::Hatchback) => (1.6, 10.1),
        (M::Toyota, T::Sedan) => (2.0, 9.0),
        (M::Toyota, T::Suv) => (2.0, 10.0),
        (M::Nissan, T::Hatchback) => (1.6, 11.0),
        (M::Nissan, T::Sedan) => (1.8, 8.0),
        (M::Nissan, T::Suv) => (1.8, 11.0),
        (M::Audi, T::Hatchback) => (2.0, 10.3),
        (M::Audi, T::Sedan) => (3.0, 10.5),
        (M::Audi, T::Suv) => (3.0, 10.0),
        (M::MercedesBenz, T::Hatchback) => (2.0, 11.7),
        (M::MercedesBenz, T::Sedan) => (3.0, 10.5),
        (M::MercedesBenz, T::Suv) => (3.0, 10.0),
        (M::Porsche | M::Jeep, T::Hatchback | T::Sedan) => (0.0, 0.0),
        (M::Porsche, T::Suv) => (3.5, 12.3),
        (M::Jeep, T::Suv) => (2.4, 10.0),
        (M::Volkswagen, T::Hatchback) => (2.0, 8.5),
        (M::Volkswagen, T::Sedan) => (2.0, 8.1),
        (M::Volkswagen, T::Suv) => (2.0, 10.7),
        (M::Volvo, T::Hatchback | T::Sedan) => (2.0, 9.4),
        (M::Volvo, T::Suv) => (2.1, 10.0),
        (M::Others, T::Hatchback) => (1.6, 10.0),
        (M::Others, T::Sedan) => (2.0, 9.0),
        (M::Others, T::Suv) => (2.0, 9.0),
    };

    FeatureVector::new(engine_size, mileage)
}

/// Error returned when a make or vehicle type isn't in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleLookupError {
    UnknownMake(String),
    UnknownVehicleType(String),
}

impl fmt::Display for VehicleLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMake(make) => write!(f, "Invalid make or vehicle type: unknown make '{make}'"),
            Self::UnknownVehicleType(ty) => {
                write!(f, "Invalid make or vehicle type: unknown vehicle type '{ty}'")
            }
        }
    }
}

impl std::error::Error for VehicleLookupError {}
