use serde::{Deserialize, Serialize};

/// A supplier record, presented to users as a "student"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub email: Option<String>,
    pub phone: String,
    /// Last known URL of the supplier's photo; the only link to the stored object
    pub photo_url: Option<String>,
}

impl Supplier {
    pub fn from_draft(id: i64, draft: SupplierDraft) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            email: draft.email,
            phone: draft.phone,
            photo_url: draft.photo_url,
        }
    }
}

/// Raw form fields as submitted by the browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierForm {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub email: String,
    pub phone: String,
    pub photo_url: String,
}

/// A validation message attached to a form field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            msg: msg.into(),
        }
    }
}

/// Trimmed, validated supplier fields ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub email: Option<String>,
    pub phone: String,
    pub photo_url: Option<String>,
}

const PHONE_MESSAGE: &str = "Phone number should be 10 digit number plus optional country code";

impl SupplierForm {
    /// Form pre-filled from an existing record, used by the edit page
    pub fn from_supplier(supplier: &Supplier) -> Self {
        Self {
            id: supplier.id.to_string(),
            name: supplier.name.clone(),
            address: supplier.address.clone(),
            city: supplier.city.clone(),
            state: supplier.state.clone(),
            email: supplier.email.clone().unwrap_or_default(),
            phone: supplier.phone.clone(),
            photo_url: supplier.photo_url.clone().unwrap_or_default(),
        }
    }

    /// Copy of the form with every field trimmed, as it is re-rendered on errors
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            photo_url: self.photo_url.trim().to_string(),
        }
    }

    /// Trim and validate the fields, collecting every error
    pub fn validate(&self) -> Result<SupplierDraft, Vec<FieldError>> {
        let form = self.trimmed();
        let mut errors = Vec::new();

        for (field, value) in [
            ("name", &form.name),
            ("address", &form.address),
            ("city", &form.city),
            ("state", &form.state),
        ] {
            if value.is_empty() {
                errors.push(FieldError::new(
                    field,
                    format!("The student {} is required", field),
                ));
            }
        }

        if !is_mobile_phone(&form.phone) {
            errors.push(FieldError::new("phone", PHONE_MESSAGE));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SupplierDraft {
            name: form.name,
            address: form.address,
            city: form.city,
            state: form.state,
            email: non_empty(form.email),
            phone: form.phone,
            photo_url: non_empty(form.photo_url),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Ten digit number with an optional `+` and 1-3 digit country code.
/// Spaces, dots, dashes and parentheses are ignored.
fn is_mobile_phone(value: &str) -> bool {
    let rest = value.strip_prefix('+').unwrap_or(value);
    let mut digits = 0;

    for c in rest.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return false,
        }
    }

    (10..=13).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SupplierForm {
        SupplierForm {
            name: "  Ada Lovelace ".to_string(),
            address: "12 St James's Square".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            phone: "+44 2071234567".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let draft = valid_form().validate().unwrap();
        assert_eq!(draft.name, "Ada Lovelace");
        assert_eq!(draft.email, None);
        assert_eq!(draft.photo_url, None);
    }

    #[test]
    fn test_required_fields() {
        let errors = SupplierForm::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "address", "city", "state", "phone"]);
        assert_eq!(errors[0].msg, "The student name is required");
    }

    #[test]
    fn test_phone_numbers() {
        assert!(is_mobile_phone("5551234567"));
        assert!(is_mobile_phone("+1 (555) 123-4567"));
        assert!(is_mobile_phone("+351912345678"));
        assert!(!is_mobile_phone("12345"));
        assert!(!is_mobile_phone("555-123-456x"));
        assert!(!is_mobile_phone("+12345678901234"));
        assert!(!is_mobile_phone(""));
    }

    #[test]
    fn test_form_round_trips_supplier() {
        let supplier = Supplier::from_draft(3, valid_form().validate().unwrap());
        let form = SupplierForm::from_supplier(&supplier);
        assert_eq!(form.id, "3");
        assert_eq!(form.validate().unwrap().name, supplier.name);
    }
}
