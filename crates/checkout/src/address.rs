//! Shipping address form and validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// States and union territories offered by the address form's state picker.
pub const INDIAN_STATES: [&str; 29] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
];

/// Required fields of the address form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressField {
    FullName,
    Phone,
    Email,
    AddressLine1,
    City,
    State,
    Pincode,
}

impl AddressField {
    /// Returns the field's form key.
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressField::FullName => "fullName",
            AddressField::Phone => "phone",
            AddressField::Email => "email",
            AddressField::AddressLine1 => "addressLine1",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::Pincode => "pincode",
        }
    }

    /// Returns the message shown when the field is left blank.
    pub fn required_message(&self) -> &'static str {
        match self {
            AddressField::FullName => "Full name is required",
            AddressField::Phone => "Phone number is required",
            AddressField::Email => "Email address is required",
            AddressField::AddressLine1 => "Address line 1 is required",
            AddressField::City => "City is required",
            AddressField::State => "State is required",
            AddressField::Pincode => "Pincode is required",
        }
    }
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field-level validation messages for a rejected address form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressErrors(BTreeMap<AddressField, String>);

impl AddressErrors {
    fn insert(&mut self, field: AddressField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Returns the message for a field, if it failed validation.
    pub fn get(&self, field: AddressField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns true if the field failed validation.
    pub fn contains(&self, field: AddressField) -> bool {
        self.0.contains_key(&field)
    }

    /// Returns the failing fields and their messages in form order.
    pub fn iter(&self) -> impl Iterator<Item = (AddressField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AddressErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw address form input as typed by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub landmark: String,
}

impl AddressForm {
    /// Validates the form.
    ///
    /// Every required field must be non-empty after trimming. All missing
    /// fields are reported together.
    pub fn validate(&self) -> Result<ShippingAddress, AddressErrors> {
        let mut errors = AddressErrors::default();
        let mut required = |field: AddressField, value: &str| -> String {
            let value = value.trim();
            if value.is_empty() {
                errors.insert(field, field.required_message());
            }
            value.to_string()
        };

        let full_name = required(AddressField::FullName, &self.full_name);
        let phone = required(AddressField::Phone, &self.phone);
        let email = required(AddressField::Email, &self.email);
        let address_line1 = required(AddressField::AddressLine1, &self.address_line1);
        let city = required(AddressField::City, &self.city);
        let state = required(AddressField::State, &self.state);
        let pincode = required(AddressField::Pincode, &self.pincode);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ShippingAddress {
            full_name,
            phone,
            email,
            address_line1,
            address_line2: optional(&self.address_line2),
            city,
            state,
            pincode,
            landmark: optional(&self.landmark),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl From<&ShippingAddress> for AddressForm {
    fn from(address: &ShippingAddress) -> Self {
        Self {
            full_name: address.full_name.clone(),
            phone: address.phone.clone(),
            email: address.email.clone(),
            address_line1: address.address_line1.clone(),
            address_line2: address.address_line2.clone().unwrap_or_default(),
            city: address.city.clone(),
            state: address.state.clone(),
            pincode: address.pincode.clone(),
            landmark: address.landmark.clone().unwrap_or_default(),
        }
    }
}

/// A validated shipping address.
///
/// Built by [`AddressForm::validate`]. Deserialization runs the same
/// validation, so required fields are never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AddressRecord")]
pub struct ShippingAddress {
    full_name: String,
    phone: String,
    email: String,
    address_line1: String,
    address_line2: Option<String>,
    city: String,
    state: String,
    pincode: String,
    landmark: Option<String>,
}

impl ShippingAddress {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address_line1(&self) -> &str {
        &self.address_line1
    }

    pub fn address_line2(&self) -> Option<&str> {
        self.address_line2.as_deref()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn pincode(&self) -> &str {
        &self.pincode
    }

    pub fn landmark(&self) -> Option<&str> {
        self.landmark.as_deref()
    }
}

/// Serialized shape of a [`ShippingAddress`], checked before use.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressRecord {
    full_name: String,
    phone: String,
    email: String,
    address_line1: String,
    #[serde(default)]
    address_line2: Option<String>,
    city: String,
    state: String,
    pincode: String,
    #[serde(default)]
    landmark: Option<String>,
}

impl TryFrom<AddressRecord> for ShippingAddress {
    type Error = AddressErrors;

    fn try_from(record: AddressRecord) -> Result<Self, Self::Error> {
        AddressForm {
            full_name: record.full_name,
            phone: record.phone,
            email: record.email,
            address_line1: record.address_line1,
            address_line2: record.address_line2.unwrap_or_default(),
            city: record.city,
            state: record.state,
            pincode: record.pincode,
            landmark: record.landmark.unwrap_or_default(),
        }
        .validate()
    }
}

impl std::fmt::Display for ShippingAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.full_name, self.address_line1)?;
        if let Some(line2) = &self.address_line2 {
            write!(f, ", {line2}")?;
        }
        write!(f, ", {}, {} - {}", self.city, self.state, self.pincode)
    }
}
