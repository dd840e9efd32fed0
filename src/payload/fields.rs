//! Per-type form layout used by interactive front-ends.

use super::ContentType;

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Line,
    /// Free text that may contain newlines.
    Multiline,
    /// Secret text, masked on screen.
    Password,
    /// One of a fixed set of options.
    Select(&'static [&'static str]),
    /// Boolean switch.
    Toggle,
}

/// Describes one input field of a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name accepted by [`super::ContentRecord::set_field`].
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, label: &'static str, placeholder: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef {
        name,
        label,
        placeholder,
        kind,
    }
}

const URL_FIELDS: &[FieldDef] = &[field("url", "URL", "https://example.com", FieldKind::Line)];

const TEXT_FIELDS: &[FieldDef] = &[field("text", "Text", "Enter any text…", FieldKind::Multiline)];

const EMAIL_FIELDS: &[FieldDef] = &[
    field("to", "To", "recipient@example.com", FieldKind::Line),
    field("subject", "Subject", "Optional subject", FieldKind::Line),
    field("body", "Body", "Optional message", FieldKind::Multiline),
];

const PHONE_FIELDS: &[FieldDef] = &[field("phone", "Phone number", "+1 555 000 0000", FieldKind::Line)];

const SMS_FIELDS: &[FieldDef] = &[
    field("phone", "Phone number", "+1 555 000 0000", FieldKind::Line),
    field("message", "Message", "Pre-filled message (optional)", FieldKind::Multiline),
];

const WIFI_FIELDS: &[FieldDef] = &[
    field("ssid", "Network name (SSID)", "My WiFi Network", FieldKind::Line),
    field("password", "Password", "Leave blank for open networks", FieldKind::Password),
    field("encryption", "Security type", "", FieldKind::Select(&["WPA", "WEP", "nopass"])),
    field("hidden", "Hidden network", "", FieldKind::Toggle),
];

const VCARD_FIELDS: &[FieldDef] = &[
    field("firstName", "First name", "John", FieldKind::Line),
    field("lastName", "Last name", "Doe", FieldKind::Line),
    field("phone", "Phone", "+1 555 000 0000", FieldKind::Line),
    field("email", "Email", "john@example.com", FieldKind::Line),
    field("org", "Organization", "Company name", FieldKind::Line),
    field("title", "Job title", "Software Engineer", FieldKind::Line),
    field("url", "Website", "https://example.com", FieldKind::Line),
];

/// Returns the ordered input fields of a content type.
pub fn fields_for(content_type: ContentType) -> &'static [FieldDef] {
    match content_type {
        ContentType::Url => URL_FIELDS,
        ContentType::Text => TEXT_FIELDS,
        ContentType::Email => EMAIL_FIELDS,
        ContentType::Phone => PHONE_FIELDS,
        ContentType::Sms => SMS_FIELDS,
        ContentType::Wifi => WIFI_FIELDS,
        ContentType::Vcard => VCARD_FIELDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ContentRecord;

    #[test]
    fn test_every_field_is_addressable() {
        for ty in ContentType::ALL {
            let mut record = ContentRecord::empty(ty);
            for def in fields_for(ty) {
                let value = match def.kind {
                    FieldKind::Select(options) => options[0],
                    FieldKind::Toggle => "true",
                    _ => "x",
                };
                record
                    .set_field(def.name, value)
                    .unwrap_or_else(|e| panic!("{}.{}: {}", ty, def.name, e));
                assert!(record.field(def.name).is_some());
            }
        }
    }
}
