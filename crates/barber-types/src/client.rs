use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ClientId;

/// A registered client of the barbershop.
///
/// Clients are referenced (not owned) by appointments. The national ID is the
/// natural key used for duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    /// CPF, stored as exactly 11 digits.
    pub national_id: String,
    /// 10 or 11 digits, no punctuation.
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to register a new client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub national_id: String,
    pub phone: String,
}

/// Full replacement of a client's mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClientRequest {
    pub name: String,
    pub national_id: String,
    pub phone: String,
}

/// Client fields after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFields {
    pub name: String,
    pub national_id: String,
    pub phone: String,
}

impl ClientFields {
    /// Validate and normalize raw client input.
    ///
    /// The name is trimmed, the national ID has `.`/`-`/spaces stripped and is
    /// checked as a CPF, and the phone must be 10 or 11 digits.
    pub fn parse(name: &str, national_id: &str, phone: &str) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("name cannot be blank".to_string());
        }

        let national_id = normalize_national_id(national_id);
        if national_id.is_empty() {
            return Err("national ID cannot be blank".to_string());
        }
        if !is_valid_cpf(&national_id) {
            return Err(format!("invalid national ID '{national_id}'"));
        }

        let phone = phone.trim();
        if phone.is_empty() {
            return Err("phone cannot be blank".to_string());
        }
        if !is_valid_phone(phone) {
            return Err("phone must contain 10 or 11 numeric digits".to_string());
        }

        Ok(Self {
            name: name.to_string(),
            national_id,
            phone: phone.to_string(),
        })
    }
}

/// Strip the usual CPF punctuation (`123.456.789-09` -> `12345678909`).
pub fn normalize_national_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '.' | '-' | ' '))
        .collect()
}

/// Check an 11-digit CPF, including both check digits.
///
/// Sequences of a single repeated digit pass the checksum but are not issued,
/// so they are rejected.
///
/// # Examples
///
/// ```
/// use barber_types::client::is_valid_cpf;
///
/// assert!(is_valid_cpf("52998224725"));
/// assert!(!is_valid_cpf("52998224726"));
/// assert!(!is_valid_cpf("11111111111"));
/// ```
pub fn is_valid_cpf(cpf: &str) -> bool {
    if cpf.len() != 11 || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = cpf.bytes().map(|b| u32::from(b - b'0')).collect();
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        let rest = (sum * 10) % 11;
        if rest == 10 { 0 } else { rest }
    };

    check(9) == digits[9] && check(10) == digits[10]
}

/// A phone number is 10 or 11 ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    (10..=11).contains(&phone.len()) && phone.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_known_valid() {
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("11144477735"));
    }

    #[test]
    fn test_cpf_wrong_check_digit() {
        assert!(!is_valid_cpf("52998224715"));
        assert!(!is_valid_cpf("11144477736"));
    }

    #[test]
    fn test_cpf_wrong_length_or_letters() {
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529982247250"));
        assert!(!is_valid_cpf("5299822472a"));
    }

    #[test]
    fn test_cpf_repeated_digits_rejected() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert!(!is_valid_cpf(&cpf), "{cpf} should be rejected");
        }
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize_national_id("529.982.247-25"), "52998224725");
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone("1133334444"));
        assert!(is_valid_phone("11987654321"));
        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone("(11)98765-4321"));
    }

    #[test]
    fn test_client_fields_parse_normalizes() {
        let fields = ClientFields::parse("  Ana Souza ", "529.982.247-25", "11987654321").unwrap();
        assert_eq!(fields.name, "Ana Souza");
        assert_eq!(fields.national_id, "52998224725");
    }

    #[test]
    fn test_client_fields_parse_rejects_blank_name() {
        let err = ClientFields::parse("   ", "52998224725", "11987654321").unwrap_err();
        assert!(err.contains("name"));
    }

    #[test]
    fn test_client_fields_parse_rejects_bad_phone() {
        let err = ClientFields::parse("Ana", "52998224725", "12345").unwrap_err();
        assert!(err.contains("phone"));
    }
}
