//! Typed QR content and payload encoding.
//!
//! Every content type carries its own strongly typed field record. The
//! [`encode`] function turns a record into the string a scanner expects:
//! plain text, `mailto:`/`tel:`/`sms:` URIs, a `WIFI:` config string or a
//! vCard 3.0 card.

mod encoder;
mod fields;

pub use encoder::{encode, percent_encode, wifi_escape};
pub use fields::{fields_for, FieldKind, FieldDef};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when content is addressed by name.
///
/// Encoding itself never fails: missing required fields just produce an
/// empty payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Invalid content type: {0} (expected url, text, email, phone, sms, wifi or vcard)")]
    InvalidContentType(String),

    #[error("Unknown field '{field}' for content type {content_type}")]
    UnknownField {
        content_type: ContentType,
        field: String,
    },

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidFieldValue { field: String, value: String },
}

/// The kind of content a QR code carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Url,
    Text,
    Email,
    Phone,
    Sms,
    Wifi,
    Vcard,
}

impl ContentType {
    /// All content types in display order.
    pub const ALL: [ContentType; 7] = [
        ContentType::Url,
        ContentType::Text,
        ContentType::Email,
        ContentType::Phone,
        ContentType::Sms,
        ContentType::Wifi,
        ContentType::Vcard,
    ];

    /// Machine name, as used on the command line and in history.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Text => "text",
            ContentType::Email => "email",
            ContentType::Phone => "phone",
            ContentType::Sms => "sms",
            ContentType::Wifi => "wifi",
            ContentType::Vcard => "vcard",
        }
    }

    /// Human label for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Url => "URL",
            ContentType::Text => "Text",
            ContentType::Email => "Email",
            ContentType::Phone => "Phone",
            ContentType::Sms => "SMS",
            ContentType::Wifi => "Wi-Fi",
            ContentType::Vcard => "vCard",
        }
    }

    /// Next type in display order, wrapping around.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous type in display order, wrapping around.
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "url" => Ok(ContentType::Url),
            "text" => Ok(ContentType::Text),
            "email" => Ok(ContentType::Email),
            "phone" => Ok(ContentType::Phone),
            "sms" => Ok(ContentType::Sms),
            "wifi" | "wi-fi" => Ok(ContentType::Wifi),
            "vcard" => Ok(ContentType::Vcard),
            _ => Err(PayloadError::InvalidContentType(s.to_string())),
        }
    }
}

/// Wi-Fi security type, written into the `T:` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiEncryption {
    pub const ALL: [WifiEncryption; 3] = [WifiEncryption::Wpa, WifiEncryption::Wep, WifiEncryption::NoPass];

    pub fn as_str(&self) -> &'static str {
        match self {
            WifiEncryption::Wpa => "WPA",
            WifiEncryption::Wep => "WEP",
            WifiEncryption::NoPass => "nopass",
        }
    }
}

impl FromStr for WifiEncryption {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // An unset select falls back to WPA.
            "" | "wpa" | "wpa2" => Ok(WifiEncryption::Wpa),
            "wep" => Ok(WifiEncryption::Wep),
            "nopass" | "none" | "open" => Ok(WifiEncryption::NoPass),
            _ => Err(PayloadError::InvalidFieldValue {
                field: "encryption".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlFields {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFields {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailFields {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneFields {
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsFields {
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiFields {
    pub ssid: String,
    pub password: String,
    pub encryption: WifiEncryption,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VcardFields {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub org: String,
    pub title: String,
    pub url: String,
}

impl VcardFields {
    /// First and last name joined by a space, empty parts dropped.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Content of one QR code, tagged by its type.
///
/// Serialized as `{"type": "wifi", "data": {...}}` so history entries keep
/// the type next to the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ContentRecord {
    Url(UrlFields),
    Text(TextFields),
    Email(EmailFields),
    Phone(PhoneFields),
    Sms(SmsFields),
    Wifi(WifiFields),
    Vcard(VcardFields),
}

impl ContentRecord {
    /// An empty record of the given type.
    pub fn empty(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Url => ContentRecord::Url(UrlFields::default()),
            ContentType::Text => ContentRecord::Text(TextFields::default()),
            ContentType::Email => ContentRecord::Email(EmailFields::default()),
            ContentType::Phone => ContentRecord::Phone(PhoneFields::default()),
            ContentType::Sms => ContentRecord::Sms(SmsFields::default()),
            ContentType::Wifi => ContentRecord::Wifi(WifiFields::default()),
            ContentType::Vcard => ContentRecord::Vcard(VcardFields::default()),
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            ContentRecord::Url(_) => ContentType::Url,
            ContentRecord::Text(_) => ContentType::Text,
            ContentRecord::Email(_) => ContentType::Email,
            ContentRecord::Phone(_) => ContentType::Phone,
            ContentRecord::Sms(_) => ContentType::Sms,
            ContentRecord::Wifi(_) => ContentType::Wifi,
            ContentRecord::Vcard(_) => ContentType::Vcard,
        }
    }

    /// Encodes this record. Shorthand for [`encode`].
    pub fn encode(&self) -> String {
        encode(self)
    }

    /// Short label used for history entries.
    pub fn label(&self) -> String {
        fn or(value: &str, fallback: &str) -> String {
            if value.is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        }

        match self {
            ContentRecord::Url(d) => or(&d.url, "URL"),
            ContentRecord::Text(d) => {
                let head: String = d.text.chars().take(20).collect();
                or(&head, "Text")
            }
            ContentRecord::Email(d) => or(&d.to, "Email"),
            ContentRecord::Phone(d) => or(&d.phone, "Phone"),
            ContentRecord::Sms(d) => or(&d.phone, "SMS"),
            ContentRecord::Wifi(d) => or(&d.ssid, "Wi-Fi"),
            ContentRecord::Vcard(d) => or(&d.full_name(), "vCard"),
        }
    }

    /// Reads a field by name, formatted as text.
    ///
    /// Accepts the camelCase names of the field table and snake_case aliases.
    pub fn field(&self, name: &str) -> Option<String> {
        let value = match (self, normalize(name).as_str()) {
            (ContentRecord::Url(d), "url") => d.url.clone(),
            (ContentRecord::Text(d), "text") => d.text.clone(),
            (ContentRecord::Email(d), "to") => d.to.clone(),
            (ContentRecord::Email(d), "subject") => d.subject.clone(),
            (ContentRecord::Email(d), "body") => d.body.clone(),
            (ContentRecord::Phone(d), "phone") => d.phone.clone(),
            (ContentRecord::Sms(d), "phone") => d.phone.clone(),
            (ContentRecord::Sms(d), "message") => d.message.clone(),
            (ContentRecord::Wifi(d), "ssid") => d.ssid.clone(),
            (ContentRecord::Wifi(d), "password") => d.password.clone(),
            (ContentRecord::Wifi(d), "encryption") => d.encryption.as_str().to_string(),
            (ContentRecord::Wifi(d), "hidden") => d.hidden.to_string(),
            (ContentRecord::Vcard(d), "firstname") => d.first_name.clone(),
            (ContentRecord::Vcard(d), "lastname") => d.last_name.clone(),
            (ContentRecord::Vcard(d), "phone") => d.phone.clone(),
            (ContentRecord::Vcard(d), "email") => d.email.clone(),
            (ContentRecord::Vcard(d), "org") => d.org.clone(),
            (ContentRecord::Vcard(d), "title") => d.title.clone(),
            (ContentRecord::Vcard(d), "url") => d.url.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Writes a field by name.
    ///
    /// Text fields take the value verbatim. `hidden` accepts true/false,
    /// yes/no, on/off and 1/0; `encryption` accepts WPA, WEP and nopass.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), PayloadError> {
        let content_type = self.content_type();
        let slot: &mut String = match (self, normalize(name).as_str()) {
            (ContentRecord::Url(d), "url") => &mut d.url,
            (ContentRecord::Text(d), "text") => &mut d.text,
            (ContentRecord::Email(d), "to") => &mut d.to,
            (ContentRecord::Email(d), "subject") => &mut d.subject,
            (ContentRecord::Email(d), "body") => &mut d.body,
            (ContentRecord::Phone(d), "phone") => &mut d.phone,
            (ContentRecord::Sms(d), "phone") => &mut d.phone,
            (ContentRecord::Sms(d), "message") => &mut d.message,
            (ContentRecord::Wifi(d), "ssid") => &mut d.ssid,
            (ContentRecord::Wifi(d), "password") => &mut d.password,
            (ContentRecord::Wifi(d), "encryption") => {
                d.encryption = value.parse()?;
                return Ok(());
            }
            (ContentRecord::Wifi(d), "hidden") => {
                d.hidden = parse_flag(value).ok_or_else(|| PayloadError::InvalidFieldValue {
                    field: "hidden".to_string(),
                    value: value.to_string(),
                })?;
                return Ok(());
            }
            (ContentRecord::Vcard(d), "firstname") => &mut d.first_name,
            (ContentRecord::Vcard(d), "lastname") => &mut d.last_name,
            (ContentRecord::Vcard(d), "phone") => &mut d.phone,
            (ContentRecord::Vcard(d), "email") => &mut d.email,
            (ContentRecord::Vcard(d), "org") => &mut d.org,
            (ContentRecord::Vcard(d), "title") => &mut d.title,
            (ContentRecord::Vcard(d), "url") => &mut d.url,
            _ => {
                return Err(PayloadError::UnknownField {
                    content_type,
                    field: name.to_string(),
                })
            }
        };
        *slot = value.to_string();
        Ok(())
    }
}

/// Folds `firstName`, `first_name` and `first-name` to one key.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}
