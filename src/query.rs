/// Query-string scalar value.
///
/// The Pump.fun API takes only flat scalar parameters; booleans are sent as
/// lowercase `true`/`false`.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn render(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
        }
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered query-parameter builder.
///
/// Absent optional values are dropped entirely before serialization, so the
/// resulting URL never carries the key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(String, Scalar)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Appends a parameter only when a value is present.
    pub fn push_opt<V: Into<Scalar>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(name, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Stringifies all parameters in insertion order for URL encoding.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.clone(), value.render()))
            .collect()
    }
}
