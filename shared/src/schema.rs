//! Response-schema descriptors shared by prompt construction and validation.
//!
//! The prompt builder renders these descriptors into the JSON structure the
//! model is asked for, and the validator checks the parsed answer against
//! the same descriptor, so the requested shape and the accepted shape cannot
//! drift apart.

use crate::error::AppError;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    TextList,
}

/// One field of a model response.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Dutch hint interpolated into the prompt template.
    pub hint: &'static str,
}

/// The full shape of one task's model response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Shape of a page-content answer.
pub const CONTENT_SCHEMA: ResponseSchema = ResponseSchema {
    name: "content",
    fields: &[
        FieldSpec {
            name: "title",
            kind: FieldKind::Text,
            required: true,
            hint: "Pakkende titel voor de pagina (max 60 tekens)",
        },
        FieldSpec {
            name: "metaDescription",
            kind: FieldKind::Text,
            required: true,
            hint: "SEO meta description (max 155 tekens)",
        },
        FieldSpec {
            name: "introText",
            kind: FieldKind::Text,
            required: true,
            hint: "Korte intro van 2-3 zinnen over de bestemming",
        },
        FieldSpec {
            name: "mainContent",
            kind: FieldKind::Text,
            required: true,
            hint: "Uitgebreid artikel over de bestemming",
        },
        FieldSpec {
            name: "tips",
            kind: FieldKind::TextList,
            required: false,
            hint: "Praktische tip",
        },
    ],
};

/// Shape of a full destination-profile answer.
pub const PROFILE_SCHEMA: ResponseSchema = ResponseSchema {
    name: "profile",
    fields: &[
        FieldSpec {
            name: "name",
            kind: FieldKind::Text,
            required: true,
            hint: "Naam van de bestemming",
        },
        FieldSpec {
            name: "country",
            kind: FieldKind::Text,
            required: true,
            hint: "Land van de bestemming",
        },
        FieldSpec {
            name: "countryCode",
            kind: FieldKind::Text,
            required: false,
            hint: "ISO landcode (bijv. IT)",
        },
        FieldSpec {
            name: "slug",
            kind: FieldKind::Text,
            required: true,
            hint: "url-friendly slug van de naam",
        },
        FieldSpec {
            name: "lat",
            kind: FieldKind::Number,
            required: true,
            hint: "latitude als nummer (bijv. 41.9028)",
        },
        FieldSpec {
            name: "lng",
            kind: FieldKind::Number,
            required: true,
            hint: "longitude als nummer (bijv. 12.4964)",
        },
        FieldSpec {
            name: "shortDescription",
            kind: FieldKind::Text,
            required: true,
            hint: "Pakkende beschrijving van 2-3 zinnen over waarom je hier naartoe moet",
        },
        FieldSpec {
            name: "highlights",
            kind: FieldKind::TextList,
            required: true,
            hint: "Hoogtepunt",
        },
        FieldSpec {
            name: "bestTimeToVisit",
            kind: FieldKind::Text,
            required: false,
            hint: "Beste periode om te bezoeken (bijv. April - Oktober)",
        },
        FieldSpec {
            name: "averageTemperature",
            kind: FieldKind::Text,
            required: false,
            hint: "Gemiddelde temperatuur range (bijv. 15-28°C)",
        },
        FieldSpec {
            name: "currency",
            kind: FieldKind::Text,
            required: false,
            hint: "Valuta met symbool (bijv. Euro (€))",
        },
        FieldSpec {
            name: "language",
            kind: FieldKind::Text,
            required: false,
            hint: "Hoofdtaal die gesproken wordt",
        },
        FieldSpec {
            name: "nearestAirport",
            kind: FieldKind::Text,
            required: false,
            hint: "Naam van dichtstbijzijnde luchthaven met IATA code (bijv. Rome Fiumicino (FCO))",
        },
    ],
};

impl ResponseSchema {
    /// Render the JSON structure the model is asked to return.
    pub fn prompt_template(&self) -> String {
        let mut out = String::from("{\n");
        for (i, field) in self.fields.iter().enumerate() {
            let value = match field.kind {
                FieldKind::Text => format!("\"{}\"", field.hint),
                FieldKind::Number => field.hint.to_string(),
                FieldKind::TextList => format!(
                    "[\"{} 1\", \"{} 2\", \"{} 3\"]",
                    field.hint, field.hint, field.hint
                ),
            };
            out.push_str("  \"");
            out.push_str(field.name);
            out.push_str("\": ");
            out.push_str(&value);
            if i + 1 < self.fields.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push('}');
        out
    }

    /// Check the parsed answer for the required fields.
    ///
    /// All-or-nothing per record. Length limits in the hints are advisory to
    /// the model and are not enforced here.
    pub fn validate(&self, value: &Value) -> Result<(), AppError> {
        let obj = value.as_object().ok_or_else(|| {
            AppError::MalformedResponse(format!("{} response is not a JSON object", self.name))
        })?;
        for field in self.fields.iter().filter(|f| f.required) {
            let ok = match obj.get(field.name) {
                None | Some(Value::Null) => false,
                Some(v) => match field.kind {
                    FieldKind::Text => v.as_str().is_some_and(|s| !s.trim().is_empty()),
                    FieldKind::Number => v.is_number(),
                    FieldKind::TextList => v.as_array().is_some_and(|a| !a.is_empty()),
                },
            };
            if !ok {
                return Err(AppError::MalformedResponse(format!(
                    "missing required field: {}",
                    field.name
                )));
            }
        }
        Ok(())
    }
}
