use serde::{Deserialize, Serialize};

/// Semantic type of a filterable attribute.
///
/// The set of types is closed; everything that depends on the type (default
/// operators, value formatting) is an enum-keyed lookup rather than a trait.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Date,
    Boolean,
    Dropdown,
}

/// Comparison operator offered for a filter field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    StartsWith,
    EndsWith,
    /// Inclusive range, the only operator taking two operands
    Between,
}

const STRING_OPERATORS: &[Operator] = &[
    Operator::Contains,
    Operator::Eq,
    Operator::Ne,
    Operator::StartsWith,
    Operator::EndsWith,
];

const ORDERED_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Lt,
    Operator::Lte,
    Operator::Gt,
    Operator::Gte,
    Operator::Between,
];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::Eq];

const DROPDOWN_OPERATORS: &[Operator] = &[Operator::Eq, Operator::Ne];

impl FieldType {
    /// Operators offered when a field does not list its own, in display order.
    pub fn default_operators(&self) -> &'static [Operator] {
        match self {
            FieldType::String => STRING_OPERATORS,
            FieldType::Number | FieldType::Date => ORDERED_OPERATORS,
            FieldType::Boolean => BOOLEAN_OPERATORS,
            FieldType::Dropdown => DROPDOWN_OPERATORS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Dropdown => "dropdown",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Operator {
    pub const ALL: &'static [Operator] = &[
        Operator::Eq,
        Operator::Ne,
        Operator::Lt,
        Operator::Lte,
        Operator::Gt,
        Operator::Gte,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Between,
    ];

    /// Name as it appears in wire parameter keys (`{field}_{name}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::Between => "between",
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Operator::Between)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eq" => Ok(Operator::Eq),
            "ne" => Ok(Operator::Ne),
            "lt" => Ok(Operator::Lt),
            "lte" => Ok(Operator::Lte),
            "gt" => Ok(Operator::Gt),
            "gte" => Ok(Operator::Gte),
            "contains" => Ok(Operator::Contains),
            "startswith" => Ok(Operator::StartsWith),
            "endswith" => Ok(Operator::EndsWith),
            "between" => Ok(Operator::Between),
            _ => Err(format!(
                "Invalid operator '{}'. Valid operators: eq, ne, lt, lte, gt, gte, contains, startsWith, endsWith, between",
                s
            )),
        }
    }
}
