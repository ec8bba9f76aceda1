//! Schema-validated forms. Validation failures stay inside the form layer
//! and block submission; no request is issued for an invalid form.

use chrono::{NaiveDate, NaiveTime};
use shared::{
    domain::PackageId,
    protocol::{
        CreateContactRequest, CreateOrderRequest, CreatePackageRequest, LoginRequest,
        PackageRecord,
    },
};
use validator::{Validate, ValidationError, ValidationErrors};

/// Indonesian mobile number: optional +62/62 country prefix or a leading 0,
/// then an 08xx block, 9 to 14 digits total once normalized.
fn validate_phone_id(value: &str) -> Result<(), ValidationError> {
    let normalized = value
        .strip_prefix("+62")
        .or_else(|| value.strip_prefix("62"))
        .map(|rest| format!("0{rest}"))
        .unwrap_or_else(|| value.to_string());
    let bytes = normalized.as_bytes();
    let valid = (9..=14).contains(&normalized.len())
        && normalized.starts_with("08")
        && bytes[2] != b'0'
        && normalized.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Nomor HP Indonesia tidak valid".into()))
    }
}

/// Accepts an empty string; otherwise the value must parse as a URL.
fn validate_optional_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    url::Url::parse(value.trim())
        .map(|_| ())
        .map_err(|_| ValidationError::new("url").with_message("URL gambar tidak valid".into()))
}

fn validate_contact_name(value: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < 2 {
        Err(ValidationError::new("length").with_message("Nama minimal 2 karakter".into()))
    } else if len > 100 {
        Err(ValidationError::new("length").with_message("Terlalu panjang".into()))
    } else {
        Ok(())
    }
}

fn validate_contact_message(value: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < 10 {
        Err(ValidationError::new("length").with_message("Pesan minimal 10 karakter".into()))
    } else if len > 1000 {
        Err(ValidationError::new("length").with_message("Maksimal 1000 karakter".into()))
    } else {
        Ok(())
    }
}

fn optional_trimmed(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Flattens validation errors for display, one `(field, message)` pair per
/// failure.
pub fn field_messages(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Periksa kembali isian ini.".to_string());
                (field.to_string(), message)
            })
        })
        .collect();
    messages.sort();
    messages
}

#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Email tidak valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password minimal 6 karakter"))]
    pub password: String,
}

impl LoginForm {
    pub fn into_request(self) -> Result<LoginRequest, ValidationErrors> {
        self.validate()?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct BookingForm {
    #[validate(length(min = 2, message = "Nama minimal 2 karakter"))]
    pub name: String,
    #[validate(email(message = "Email tidak valid"))]
    pub email: String,
    #[validate(custom(function = validate_phone_id))]
    pub phone: String,
    #[validate(length(min = 1, message = "Pilih paket"))]
    pub package_id: String,
    #[validate(length(min = 2, message = "Venue wajib diisi"))]
    pub venue: String,
    pub event_date: Option<NaiveDate>,
    pub notes: String,
}

impl BookingForm {
    pub fn into_request(self) -> Result<CreateOrderRequest, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        let Some(date) = self.event_date else {
            errors.add(
                "event_date",
                ValidationError::new("required").with_message("Pilih tanggal acara".into()),
            );
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CreateOrderRequest {
            package_id: PackageId(self.package_id),
            customer_name: self.name.trim().to_string(),
            customer_email: self.email.trim().to_string(),
            customer_phone: self.phone.trim().to_string(),
            event_date: date.and_time(NaiveTime::MIN).and_utc(),
            venue: self.venue.trim().to_string(),
            notes: optional_trimmed(self.notes),
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ContactForm {
    #[validate(custom(function = validate_contact_name))]
    pub name: String,
    #[validate(email(message = "Email tidak valid"), length(max = 160, message = "Terlalu panjang"))]
    pub email: String,
    #[validate(custom(function = validate_contact_message))]
    pub message: String,
}

impl ContactForm {
    pub fn into_request(self) -> Result<CreateContactRequest, ValidationErrors> {
        self.validate()?;
        Ok(CreateContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

/// Shared by the create and update screens; `PUT` takes the same body as
/// `POST`.
#[derive(Debug, Clone, Validate)]
pub struct PackageForm {
    #[validate(length(min = 2, message = "Nama minimal 2 karakter"))]
    pub name: String,
    #[validate(length(max = 500, message = "Maksimal 500 karakter"))]
    pub description: String,
    #[validate(range(min = 1, message = "Harga harus > 0"))]
    pub price: i64,
    pub is_active: bool,
    #[validate(custom(function = validate_optional_url))]
    pub image_url: String,
}

impl Default for PackageForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0,
            is_active: true,
            image_url: String::new(),
        }
    }
}

impl PackageForm {
    pub fn from_record(record: &PackageRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            price: record.price,
            is_active: record.is_active,
            image_url: record.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn into_request(self) -> Result<CreatePackageRequest, ValidationErrors> {
        self.validate()?;
        Ok(CreatePackageRequest {
            name: self.name.trim().to_string(),
            description: optional_trimmed(self.description),
            price: self.price,
            is_active: self.is_active,
            image_url: optional_trimmed(self.image_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_indonesian_phone_formats() {
        for phone in ["081234567890", "+6281234567890", "6281234567890", "0895123456"] {
            assert!(validate_phone_id(phone).is_ok(), "rejected {phone}");
        }
    }

    #[test]
    fn rejects_malformed_phones() {
        for phone in ["021555123", "08012345678", "8123456789", "0812abc4567", "08123"] {
            assert!(validate_phone_id(phone).is_err(), "accepted {phone}");
        }
    }

    #[test]
    fn booking_requires_event_date() {
        let form = BookingForm {
            name: "Rina".to_string(),
            email: "rina@example.com".to_string(),
            phone: "081234567890".to_string(),
            package_id: "pkg_1".to_string(),
            venue: "Bandung".to_string(),
            event_date: None,
            notes: String::new(),
        };
        let errors = form.into_request().expect_err("must fail");
        let messages = field_messages(&errors);
        assert!(messages
            .iter()
            .any(|(field, message)| field == "event_date" && message == "Pilih tanggal acara"));
    }

    #[test]
    fn valid_booking_builds_request_with_optional_notes_dropped() {
        let form = BookingForm {
            name: " Rina ".to_string(),
            email: "rina@example.com".to_string(),
            phone: "081234567890".to_string(),
            package_id: "pkg_1".to_string(),
            venue: "Gedung Serbaguna".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 6, 20),
            notes: "   ".to_string(),
        };
        let request = form.into_request().expect("valid form");
        assert_eq!(request.customer_name, "Rina");
        assert!(request.notes.is_none());
        assert_eq!(request.package_id.as_str(), "pkg_1");
    }

    #[test]
    fn contact_form_bounds_message_length() {
        let form = ContactForm {
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            message: "pendek".to_string(),
        };
        let errors = form.into_request().expect_err("too short");
        assert!(field_messages(&errors)
            .iter()
            .any(|(field, message)| field == "message" && message == "Pesan minimal 10 karakter"));
    }

    #[test]
    fn package_form_rejects_non_positive_price_and_bad_url() {
        let form = PackageForm {
            name: "Paket Silver".to_string(),
            price: 0,
            image_url: "not a url".to_string(),
            ..PackageForm::default()
        };
        let errors = form.validate().expect_err("invalid");
        let messages = field_messages(&errors);
        assert!(messages
            .iter()
            .any(|(field, message)| field == "price" && message == "Harga harus > 0"));
        assert!(messages
            .iter()
            .any(|(field, message)| field == "image_url" && message == "URL gambar tidak valid"));
    }

    #[test]
    fn package_form_maps_empty_optionals_to_none() {
        let form = PackageForm {
            name: "Paket Silver".to_string(),
            price: 25_000_000,
            ..PackageForm::default()
        };
        let request = form.into_request().expect("valid form");
        assert!(request.description.is_none());
        assert!(request.image_url.is_none());
        assert!(request.is_active);
    }
}
