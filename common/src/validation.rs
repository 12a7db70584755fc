use serde::{Deserialize, Serialize};
use std::fmt;
use crate::mac::{normalize_mac, validate_mac, MAC_FIELD};
use crate::types::{DeviceStatus, NewDevice};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Per-field errors collected from one form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
        f.write_str(&joined)
    }
}

/// Raw creation input as typed by a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceForm {
    pub name: String,
    pub model: String,
    pub mac_address: String,
    pub location: String,
    pub status: DeviceStatus,
    #[serde(rename = "type")]
    pub device_type: String,
    pub manufacturer: Option<String>,
    pub description: Option<String>,
}

impl DeviceForm {
    /// Checks every required field and the MAC format, reporting all
    /// failures at once. On success the MAC is in canonical form.
    pub fn validate(&self) -> Result<NewDevice, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "model", &self.model, "Model is required");

        let mac = self.mac_address.trim();
        if mac.is_empty() {
            errors.push(FieldError::new(MAC_FIELD, "MAC address is required"));
        } else if let Err(e) = validate_mac(mac) {
            errors.push(e);
        }

        require(&mut errors, "location", &self.location, "Location is required");
        require(&mut errors, "type", &self.device_type, "Type is required");

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewDevice {
            name: self.name.trim().to_string(),
            model: self.model.trim().to_string(),
            mac_address: normalize_mac(mac),
            location: self.location.trim().to_string(),
            status: self.status,
            device_type: self.device_type.trim().to_string(),
            manufacturer: optional(&self.manufacturer),
            description: optional(&self.description),
        })
    }
}

fn require(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> DeviceForm {
        DeviceForm {
            name: " Router Sala ".to_string(),
            model: "TP-Link Archer C7".to_string(),
            mac_address: "00-1b-44-11-3a-b7".to_string(),
            location: "Recepção".to_string(),
            status: DeviceStatus::Online,
            device_type: "router".to_string(),
            manufacturer: Some("  ".to_string()),
            description: Some("Front desk router".to_string()),
        }
    }

    #[test]
    fn accepts_and_normalizes_valid_form() {
        let device = valid_form().validate().unwrap();
        assert_eq!(device.name, "Router Sala");
        assert_eq!(device.mac_address, "00:1B:44:11:3A:B7");
        assert_eq!(device.status, DeviceStatus::Online);
        assert_eq!(device.manufacturer, None);
        assert_eq!(device.description.as_deref(), Some("Front desk router"));
    }

    #[test]
    fn reports_empty_name_and_bad_mac_together() {
        let form = DeviceForm {
            name: String::new(),
            mac_address: "00:1B:44".to_string(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.has_field("name"));
        assert!(errors.has_field("macAddress"));
        assert_eq!(errors.errors().len(), 2);
    }

    #[test]
    fn reports_every_missing_required_field() {
        let errors = DeviceForm::default().validate().unwrap_err();
        for field in ["name", "model", "macAddress", "location", "type"] {
            assert!(errors.has_field(field), "missing error for {}", field);
        }
    }

    #[test]
    fn form_deserializes_from_camel_case_json() {
        let form: DeviceForm = serde_json::from_str(
            r#"{"name":"AP","model":"UniFi","macAddress":"aabbccddeeff","location":"Lab","type":"access-point"}"#,
        )
        .unwrap();
        assert_eq!(form.status, DeviceStatus::Offline);
        // Unformatted input must go through format_mac before submission.
        assert!(form.validate().unwrap_err().has_field("macAddress"));
    }
}
