use {
    crate::{error::ValidationError, hex},
    serde::{Deserialize, Serialize, Serializer},
};

/// Memo type the payment hook tooling tags its memos with.
pub const DEFAULT_MEMO_TYPE: &str = "huxtext";
pub const DEFAULT_MEMO_FORMAT: &str = "text";

/// A transaction memo. The ledger does not interpret memos; by convention the
/// data, type and format fields each hold hex encoded text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memo {
    pub data: Vec<u8>,
    pub memo_type: Vec<u8>,
    pub format: Vec<u8>,
}

impl Memo {
    pub fn from_text(data: &str, memo_type: &str, format: &str) -> Self {
        Self {
            data: data.as_bytes().to_vec(),
            memo_type: memo_type.as_bytes().to_vec(),
            format: format.as_bytes().to_vec(),
        }
    }

    /// Decodes the three fields as UTF-8 text, replacing invalid sequences.
    pub fn to_text(&self) -> MemoText {
        MemoText {
            data: String::from_utf8_lossy(&self.data).into_owned(),
            memo_type: String::from_utf8_lossy(&self.memo_type).into_owned(),
            format: String::from_utf8_lossy(&self.format).into_owned(),
        }
    }

    pub fn data_hex(&self) -> String {
        hex::encode_bytes(&self.data)
    }

    pub fn type_hex(&self) -> String {
        hex::encode_bytes(&self.memo_type)
    }

    pub fn format_hex(&self) -> String {
        hex::encode_bytes(&self.format)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoText {
    pub data: String,
    pub memo_type: String,
    pub format: String,
}

/// The ledger wraps every memo in a single-key `Memo` object.
impl Serialize for Memo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Fields {
            memo_data: String,
            memo_type: String,
            memo_format: String,
        }

        #[derive(Serialize)]
        struct Wrapper {
            #[serde(rename = "Memo")]
            memo: Fields,
        }

        Wrapper {
            memo: Fields {
                memo_data: self.data_hex(),
                memo_type: self.type_hex(),
                memo_format: self.format_hex(),
            },
        }
        .serialize(serializer)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawMemoWrapper {
    #[serde(rename = "Memo")]
    memo: RawMemo,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
struct RawMemo {
    memo_data: Option<String>,
    memo_type: Option<String>,
    memo_format: Option<String>,
}

impl TryFrom<RawMemoWrapper> for Memo {
    type Error = ValidationError;

    fn try_from(raw: RawMemoWrapper) -> Result<Self, Self::Error> {
        let RawMemo {
            memo_data,
            memo_type,
            memo_format,
        } = raw.memo;
        Ok(Self {
            data: decode_field("MemoData", memo_data)?,
            memo_type: decode_field("MemoType", memo_type)?,
            format: decode_field("MemoFormat", memo_format)?,
        })
    }
}

fn decode_field(field: &'static str, value: Option<String>) -> Result<Vec<u8>, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    hex::decode_bytes(&value).map_err(|err| ValidationError::InvalidHex {
        field,
        value: value.clone(),
        reason: err.to_string(),
    })
}
