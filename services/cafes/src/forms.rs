//! Submitted forms and their validation
//!
//! Each form keeps the raw text the user typed so that a rejected submission
//! can be rendered again with the entered values and per-field messages.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::{
    error::AppError,
    models::{Cafe, CafeFields},
    validation::{
        parse_yes_no, validate_email, validate_http_url, validate_max_len, validate_required,
        yes_no,
    },
};

/// Field name to message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn check(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    fn into_result<T>(self, value: T) -> Result<T, AppError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(AppError::ValidationFailed(self))
        }
    }
}

/// Registration form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Validated registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration, AppError> {
        let mut errors = FieldErrors::default();
        errors.check("email", validate_email(&self.email));
        errors.check("name", validate_required(&self.name));
        errors.check("name", validate_max_len(self.name.trim(), 250));
        errors.check("password", validate_required(&self.password));

        errors.into_result(Registration {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Login form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Validated login attempt
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, AppError> {
        let mut errors = FieldErrors::default();
        errors.check("email", validate_email(&self.email));
        errors.check("password", validate_required(&self.password));

        errors.into_result(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Add/edit cafe form
///
/// The four amenity flags are free text; see [`parse_yes_no`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CafeForm {
    pub name: String,
    pub location: String,
    pub map_url: String,
    pub img_url: String,
    pub seats: String,
    pub coffee_price: String,
    pub has_toilet: String,
    pub has_wifi: String,
    pub has_sockets: String,
    pub can_take_calls: String,
}

impl CafeForm {
    /// Pre-populate the form from a stored cafe
    pub fn from_cafe(cafe: &Cafe) -> Self {
        Self {
            name: cafe.name.clone(),
            location: cafe.location.clone(),
            map_url: cafe.map_url.clone(),
            img_url: cafe.img_url.clone(),
            seats: cafe.seats.clone(),
            coffee_price: cafe.coffee_price.clone().unwrap_or_default(),
            has_toilet: yes_no(cafe.has_toilet).to_string(),
            has_wifi: yes_no(cafe.has_wifi).to_string(),
            has_sockets: yes_no(cafe.has_sockets).to_string(),
            can_take_calls: yes_no(cafe.can_take_calls).to_string(),
        }
    }

    pub fn validate(&self) -> Result<CafeFields, AppError> {
        let mut errors = FieldErrors::default();
        for (field, value, max) in [
            ("name", &self.name, 250),
            ("location", &self.location, 250),
            ("map_url", &self.map_url, 500),
            ("img_url", &self.img_url, 500),
            ("seats", &self.seats, 250),
        ] {
            errors.check(field, validate_required(value));
            errors.check(field, validate_max_len(value.trim(), max));
        }
        errors.check("coffee_price", validate_max_len(self.coffee_price.trim(), 250));
        for (field, value) in [("map_url", &self.map_url), ("img_url", &self.img_url)] {
            if !value.trim().is_empty() {
                errors.check(field, validate_http_url(value));
            }
        }

        let coffee_price = self.coffee_price.trim();
        errors.into_result(CafeFields {
            name: self.name.trim().to_string(),
            map_url: self.map_url.trim().to_string(),
            img_url: self.img_url.trim().to_string(),
            location: self.location.trim().to_string(),
            seats: self.seats.trim().to_string(),
            has_toilet: parse_yes_no(&self.has_toilet),
            has_wifi: parse_yes_no(&self.has_wifi),
            has_sockets: parse_yes_no(&self.has_sockets),
            can_take_calls: parse_yes_no(&self.can_take_calls),
            coffee_price: (!coffee_price.is_empty()).then(|| coffee_price.to_string()),
        })
    }
}

/// Deletion confirmation, one field per submit button
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeletionForm {
    pub cancel: Option<String>,
    pub delete: Option<String>,
}

/// What the confirmation form asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionChoice {
    Cancel,
    Delete,
    Undecided,
}

impl DeletionForm {
    pub fn choice(&self) -> DeletionChoice {
        if self.cancel.is_some() {
            DeletionChoice::Cancel
        } else if self.delete.is_some() {
            DeletionChoice::Delete
        } else {
            DeletionChoice::Undecided
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe_form() -> CafeForm {
        CafeForm {
            name: " Bike Shed ".to_string(),
            location: "Shoreditch".to_string(),
            map_url: "https://maps.example/1".to_string(),
            img_url: "https://img.example/1.jpg".to_string(),
            seats: "20-30".to_string(),
            coffee_price: "".to_string(),
            has_toilet: "No".to_string(),
            has_wifi: "yes".to_string(),
            has_sockets: "maybe".to_string(),
            can_take_calls: "YES".to_string(),
        }
    }

    fn errors_of(result: Result<impl std::fmt::Debug, AppError>) -> FieldErrors {
        match result {
            Err(AppError::ValidationFailed(errors)) => errors,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_cafe_form_normalises_flags() {
        let fields = cafe_form().validate().unwrap();
        assert_eq!(fields.name, "Bike Shed");
        assert!(!fields.has_toilet);
        assert!(fields.has_wifi);
        assert!(!fields.has_sockets);
        assert!(fields.can_take_calls);
        assert_eq!(fields.coffee_price, None);
    }

    #[test]
    fn test_cafe_form_requires_fields() {
        let form = CafeForm {
            name: "  ".to_string(),
            seats: String::new(),
            ..cafe_form()
        };
        let errors = errors_of(form.validate());
        assert!(errors.get("name").is_some());
        assert!(errors.get("seats").is_some());
        assert!(errors.get("location").is_none());
        assert!(errors.get("coffee_price").is_none());
    }

    #[test]
    fn test_cafe_form_rejects_script_links() {
        let form = CafeForm {
            map_url: "javascript:alert(document.cookie)".to_string(),
            img_url: "data:image/svg+xml,<svg/onload=alert(1)>".to_string(),
            ..cafe_form()
        };
        let errors = errors_of(form.validate());
        assert!(errors.get("map_url").is_some());
        assert!(errors.get("img_url").is_some());
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_cafe_form_blank_flags_are_false() {
        let form = CafeForm {
            has_toilet: String::new(),
            has_wifi: String::new(),
            has_sockets: String::new(),
            can_take_calls: String::new(),
            coffee_price: "£3".to_string(),
            ..cafe_form()
        };
        let fields = form.validate().unwrap();
        assert!(!fields.has_toilet && !fields.has_wifi && !fields.has_sockets);
        assert!(!fields.can_take_calls);
        assert_eq!(fields.coffee_price.as_deref(), Some("£3"));
    }

    #[test]
    fn test_cafe_form_from_cafe_renders_yes_no() {
        let cafe = Cafe {
            id: 5,
            name: "Bike Shed".to_string(),
            map_url: "m".to_string(),
            img_url: "i".to_string(),
            location: "l".to_string(),
            seats: "s".to_string(),
            has_toilet: true,
            has_wifi: false,
            has_sockets: true,
            can_take_calls: false,
            coffee_price: None,
        };
        let form = CafeForm::from_cafe(&cafe);
        assert_eq!(form.has_toilet, "Yes");
        assert_eq!(form.has_wifi, "No");
        assert_eq!(form.has_sockets, "Yes");
        assert_eq!(form.can_take_calls, "No");
        assert_eq!(form.coffee_price, "");

        assert_eq!(form.validate().unwrap(), cafe.fields());
    }

    #[test]
    fn test_register_form() {
        let form = RegisterForm {
            email: "a@x.com".to_string(),
            name: "Ann".to_string(),
            password: "pw123".to_string(),
        };
        let registration = form.validate().unwrap();
        assert_eq!(registration.email, "a@x.com");
        assert_eq!(registration.password, "pw123");

        let errors = errors_of(RegisterForm::default().validate());
        assert!(errors.get("email").is_some());
        assert!(errors.get("name").is_some());
        assert!(errors.get("password").is_some());

        let bad_email = RegisterForm {
            email: "ann".to_string(),
            ..form
        };
        assert_eq!(
            errors_of(bad_email.validate()).get("email"),
            Some("Invalid email address.")
        );
    }

    #[test]
    fn test_login_form() {
        let errors = errors_of(
            LoginForm {
                email: "a@x.com".to_string(),
                password: String::new(),
            }
            .validate(),
        );
        assert!(errors.get("email").is_none());
        assert_eq!(errors.get("password"), Some("This field is required."));
    }

    #[test]
    fn test_deletion_choice() {
        let cancel = DeletionForm {
            cancel: Some("Cancel".to_string()),
            delete: None,
        };
        let delete = DeletionForm {
            cancel: None,
            delete: Some("Delete".to_string()),
        };
        assert_eq!(cancel.choice(), DeletionChoice::Cancel);
        assert_eq!(delete.choice(), DeletionChoice::Delete);
        assert_eq!(DeletionForm::default().choice(), DeletionChoice::Undecided);
    }
}
