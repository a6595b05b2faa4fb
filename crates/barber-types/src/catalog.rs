use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;
use std::str::FromStr;

use crate::id::ServiceId;

/// The three fixed service categories offered by the shop.
///
/// Each category carries a display description and a canonical price used
/// when the catalog is seeded with defaults. Input also accepts the legacy
/// Portuguese names `BARBA` and `CABELO`; output always uses the English ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    #[serde(alias = "BARBA")]
    Beard,
    #[serde(alias = "CABELO")]
    Haircut,
    Combo,
}

impl ServiceType {
    /// Every service type, in catalog order.
    pub const ALL: [ServiceType; 3] = [ServiceType::Beard, ServiceType::Haircut, ServiceType::Combo];

    pub fn description(&self) -> &'static str {
        match self {
            ServiceType::Beard => "Beard",
            ServiceType::Haircut => "Haircut",
            ServiceType::Combo => "Beard and Haircut",
        }
    }

    pub fn default_price(&self) -> Price {
        match self {
            ServiceType::Beard => Price::from_cents(3_000),
            ServiceType::Haircut => Price::from_cents(4_000),
            ServiceType::Combo => Price::from_cents(6_500),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Beard => write!(f, "BEARD"),
            ServiceType::Haircut => write!(f, "HAIRCUT"),
            ServiceType::Combo => write!(f, "COMBO"),
        }
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BEARD" | "BARBA" => Ok(ServiceType::Beard),
            "HAIRCUT" | "CABELO" => Ok(ServiceType::Haircut),
            "COMBO" => Ok(ServiceType::Combo),
            other => Err(format!("invalid service type: '{other}'")),
        }
    }
}

/// A non-negative amount of money with two fractional digits.
///
/// Stored as integer cents so arithmetic and comparisons are exact. On the
/// wire it is a decimal string (`"30.00"`); input also accepts JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || format!("invalid price '{s}'");

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Price)
            .ok_or_else(invalid)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl Visitor<'_> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative decimal amount with at most two fractional digits")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Price)
                    .ok_or_else(|| E::custom("price out of range"))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
                if v < 0 {
                    return Err(E::custom("price cannot be negative"));
                }
                self.visit_u64(v as u64)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
                if !v.is_finite() || v < 0.0 {
                    return Err(E::custom("price must be a non-negative number"));
                }
                let cents = (v * 100.0).round();
                if (cents / 100.0 - v).abs() > 1e-9 {
                    return Err(E::custom("price has more than two fractional digits"));
                }
                if cents > i64::MAX as f64 {
                    return Err(E::custom("price out of range"));
                }
                Ok(Price(cents as i64))
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

/// A service the shop offers, at most one per [`ServiceType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: ServiceId,
    pub service_type: ServiceType,
    pub price: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceOffering {
    /// A fresh offering at the type's canonical price.
    pub fn with_default_price(service_type: ServiceType) -> Self {
        let now = Utc::now();
        Self {
            id: ServiceId::new(),
            service_type,
            price: service_type.default_price(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request to add an offering. The price defaults to the type's canonical price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub service_type: ServiceType,
    #[serde(default)]
    pub price: Option<Price>,
}

/// Full replacement of an offering's type and price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub service_type: ServiceType,
    pub price: Price,
}
