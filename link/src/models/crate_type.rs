use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Data type ids reported by CrateDB in the `col_types` field of a SQL response.
///
/// | Id  | Type          |
/// |-----|---------------|
/// | 0   | Null          |
/// | 1   | Not Supported |
/// | 2   | Byte          |
/// | 3   | Boolean       |
/// | 4   | String        |
/// | 5   | Ip            |
/// | 6   | Double        |
/// | 7   | Float         |
/// | 8   | Short         |
/// | 9   | Integer       |
/// | 10  | Long          |
/// | 11  | Timestamp     |
/// | 12  | Object        |
/// | 13  | GeoPoint      |
/// | 100 | Array         |
/// | 101 | Set           |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CrateType {
    Null,
    NotSupported,
    Byte,
    Boolean,
    String,
    Ip,
    Double,
    Float,
    Short,
    Integer,
    Long,
    Timestamp,
    Object,
    GeoPoint,
    Array,
    Set,
}

impl CrateType {
    pub const ALL: [CrateType; 16] = [
        CrateType::Null,
        CrateType::NotSupported,
        CrateType::Byte,
        CrateType::Boolean,
        CrateType::String,
        CrateType::Ip,
        CrateType::Double,
        CrateType::Float,
        CrateType::Short,
        CrateType::Integer,
        CrateType::Long,
        CrateType::Timestamp,
        CrateType::Object,
        CrateType::GeoPoint,
        CrateType::Array,
        CrateType::Set,
    ];

    /// Wire id of this type
    pub fn id(self) -> i64 {
        match self {
            CrateType::Null => 0,
            CrateType::NotSupported => 1,
            CrateType::Byte => 2,
            CrateType::Boolean => 3,
            CrateType::String => 4,
            CrateType::Ip => 5,
            CrateType::Double => 6,
            CrateType::Float => 7,
            CrateType::Short => 8,
            CrateType::Integer => 9,
            CrateType::Long => 10,
            CrateType::Timestamp => 11,
            CrateType::Object => 12,
            CrateType::GeoPoint => 13,
            CrateType::Array => 100,
            CrateType::Set => 101,
        }
    }

    /// Look up a type by its wire id
    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Symbolic name, as used in CrateDB's REST documentation
    pub fn name(self) -> &'static str {
        match self {
            CrateType::Null => "NULL",
            CrateType::NotSupported => "NOT_SUPPORTED",
            CrateType::Byte => "BYTE",
            CrateType::Boolean => "BOOLEAN",
            CrateType::String => "STRING",
            CrateType::Ip => "IP",
            CrateType::Double => "DOUBLE",
            CrateType::Float => "FLOAT",
            CrateType::Short => "SHORT",
            CrateType::Integer => "INTEGER",
            CrateType::Long => "LONG",
            CrateType::Timestamp => "TIMESTAMP",
            CrateType::Object => "OBJECT",
            CrateType::GeoPoint => "GEO_POINT",
            CrateType::Array => "ARRAY",
            CrateType::Set => "SET",
        }
    }

    pub fn is_collection(self) -> bool {
        matches!(self, CrateType::Array | CrateType::Set)
    }
}

impl TryFrom<i64> for CrateType {
    type Error = String;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown CrateDB type id {}", id))
    }
}

impl From<CrateType> for i64 {
    fn from(t: CrateType) -> Self {
        t.id()
    }
}

impl fmt::Display for CrateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded entry of the `col_types` array.
///
/// Scalars are reported as a bare id (`11`). Collections are reported as a
/// pair of the collection id and the element type (`[100, 4]`), nested for
/// multi-dimensional arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    Scalar(CrateType),
    Collection {
        kind: CrateType,
        element: Box<ColumnType>,
    },
    /// Anything this client does not recognise, kept verbatim.
    Unknown(JsonValue),
}

impl ColumnType {
    pub fn from_wire(value: &JsonValue) -> Self {
        if let Some(id) = value.as_i64() {
            return match CrateType::from_id(id) {
                Some(t) => ColumnType::Scalar(t),
                None => ColumnType::Unknown(value.clone()),
            };
        }

        if let Some([outer, inner]) = value.as_array().map(Vec::as_slice) {
            if let Some(kind) = outer.as_i64().and_then(CrateType::from_id) {
                if kind.is_collection() {
                    return ColumnType::Collection {
                        kind,
                        element: Box::new(ColumnType::from_wire(inner)),
                    };
                }
            }
        }

        ColumnType::Unknown(value.clone())
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, ColumnType::Scalar(CrateType::Timestamp))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Scalar(t) => write!(f, "{}", t),
            ColumnType::Collection { kind, element } => write!(f, "{}({})", kind, element),
            ColumnType::Unknown(raw) => write!(f, "UNKNOWN({})", raw),
        }
    }
}
