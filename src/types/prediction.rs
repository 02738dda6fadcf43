use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance-to-ocean category accepted by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OceanProximity {
    #[default]
    #[serde(rename = "NEAR OCEAN")]
    NearOcean,
    #[serde(rename = "INLAND")]
    Inland,
    #[serde(rename = "<1H OCEAN")]
    LessThanOneHourOcean,
    #[serde(rename = "ISLAND")]
    Island,
    #[serde(rename = "NEAR BAY")]
    NearBay,
}

impl OceanProximity {
    pub const ALL: [OceanProximity; 5] = [
        Self::NearOcean,
        Self::Inland,
        Self::LessThanOneHourOcean,
        Self::Island,
        Self::NearBay,
    ];

    /// Wire value, e.g. `"<1H OCEAN"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NearOcean => "NEAR OCEAN",
            Self::Inland => "INLAND",
            Self::LessThanOneHourOcean => "<1H OCEAN",
            Self::Island => "ISLAND",
            Self::NearBay => "NEAR BAY",
        }
    }
}

impl fmt::Display for OceanProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ocean proximity {0:?}; expected one of NEAR OCEAN, INLAND, <1H OCEAN, ISLAND, NEAR BAY")]
pub struct ParseOceanProximityError(pub String);

impl FromStr for OceanProximity {
    type Err = ParseOceanProximityError;

    /// Accepts the wire value; case and `_`/`-` separators are forgiven so
    /// `near_bay` works on a command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], " ").to_uppercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ParseOceanProximityError(s.to_string()))
    }
}

/// Body of `POST /predict`, sent verbatim.
///
/// No cross-field checks (e.g. bedrooms <= rooms): the backend owns
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: f64,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    pub median_income: f64,
    pub ocean_proximity: OceanProximity,
}

impl Default for PredictionRequest {
    /// The form's initial values before anything was cached.
    fn default() -> Self {
        Self {
            longitude: -122.64,
            latitude: 38.01,
            housing_median_age: 36.0,
            total_rooms: 1336.0,
            total_bedrooms: 258.0,
            population: 678.0,
            households: 249.0,
            median_income: 5.5789,
            ocean_proximity: OceanProximity::NearOcean,
        }
    }
}

/// Response of `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: f64,
}

/// One entry of `GET /predictions`; its shape is owned by the backend.
pub type PredictionRecord = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ocean_proximity_wire_values() {
        for p in OceanProximity::ALL {
            let v = serde_json::to_value(p).unwrap();
            assert_eq!(v, json!(p.as_str()));
            let back: OceanProximity = serde_json::from_value(v).unwrap();
            assert_eq!(back, p);
        }
        assert!(serde_json::from_value::<OceanProximity>(json!("near ocean")).is_err());
    }

    #[test]
    fn ocean_proximity_from_str_is_forgiving() {
        assert_eq!("<1H OCEAN".parse(), Ok(OceanProximity::LessThanOneHourOcean));
        assert_eq!("near_bay".parse(), Ok(OceanProximity::NearBay));
        assert_eq!("Near-Ocean".parse(), Ok(OceanProximity::NearOcean));
        assert!("coastal".parse::<OceanProximity>().is_err());
    }

    #[test]
    fn prediction_request_serializes_field_names() {
        let v = serde_json::to_value(PredictionRequest::default()).unwrap();
        assert_eq!(
            v,
            json!({
                "longitude": -122.64,
                "latitude": 38.01,
                "housing_median_age": 36.0,
                "total_rooms": 1336.0,
                "total_bedrooms": 258.0,
                "population": 678.0,
                "households": 249.0,
                "median_income": 5.5789,
                "ocean_proximity": "NEAR OCEAN"
            })
        );
    }

    #[test]
    fn integer_fields_deserialize_as_floats() {
        let req: PredictionRequest = serde_json::from_value(json!({
            "longitude": -120, "latitude": 35, "housing_median_age": 10,
            "total_rooms": 800, "total_bedrooms": 100, "population": 300,
            "households": 90, "median_income": 3, "ocean_proximity": "INLAND"
        }))
        .unwrap();
        assert_eq!(req.total_rooms, 800.0);
        assert_eq!(req.ocean_proximity, OceanProximity::Inland);
    }
}
