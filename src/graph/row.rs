//! Row and streaming types for SPARQL query results.

use std::collections::HashMap;
use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

/// A stream of rows from a query result.
///
/// Uses `futures::Stream` so backends that page or stream results can yield
/// rows on demand.
pub type RowStream<'a> = Pin<Box<dyn Stream<Item = Result<Row, AppError>> + Send + 'a>>;

/// The value bound to one variable in a result row
/// (SPARQL 1.1 Query Results JSON Format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// `uri`, `literal` or `bnode`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Binding {
    pub fn iri(value: impl Into<String>) -> Self {
        Self {
            kind: "uri".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn literal(value: impl Into<String>, lang: Option<&str>) -> Self {
        Self {
            kind: "literal".to_string(),
            value: value.into(),
            datatype: None,
            lang: lang.map(str::to_string),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            kind: "literal".to_string(),
            value: value.to_string(),
            datatype: Some(XSD_BOOLEAN.to_string()),
            lang: None,
        }
    }

    /// Reads an `xsd:boolean` literal.
    pub fn as_bool(&self) -> Result<bool, AppError> {
        let typed = self.kind == "literal"
            && self.datatype.as_deref().map_or(true, |dt| dt == XSD_BOOLEAN);
        match self.value.as_str() {
            "true" | "1" if typed => Ok(true),
            "false" | "0" if typed => Ok(false),
            _ => Err(AppError::Decode(format!(
                "expected a boolean literal, got {:?} ({:?})",
                self.value, self.datatype
            ))),
        }
    }
}

/// A single row from a query result.
///
/// Unbound variables are absent from the row.
#[derive(Debug, Clone, Default)]
pub struct Row {
    data: HashMap<String, Binding>,
}

impl Row {
    /// Creates a new row from a map of variable names to bindings.
    pub fn new(data: HashMap<String, Binding>) -> Self {
        Self { data }
    }

    /// Gets the binding of a variable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Decode`] if the variable is unbound.
    pub fn get(&self, key: &str) -> Result<&Binding, AppError> {
        self.data
            .get(key)
            .ok_or_else(|| AppError::Decode(format!("variable not bound: {}", key)))
    }

    /// Gets the lexical value of a bound variable.
    pub fn value(&self, key: &str) -> Result<&str, AppError> {
        self.get(key).map(|b| b.value.as_str())
    }

    /// Returns the bindings of all variables named `<prefix><index>`,
    /// ordered by the numeric index.
    ///
    /// String order would put `probe10` before `probe2`; callers that zip
    /// these bindings back against an input list depend on numeric order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Decode`] for a variable that does not follow the
    /// `<prefix><digits>` pattern.
    pub fn indexed(&self, prefix: &str) -> Result<Vec<(usize, &Binding)>, AppError> {
        let mut fields = self
            .data
            .iter()
            .map(|(name, binding)| {
                let index = name
                    .strip_prefix(prefix)
                    .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|digits| digits.parse::<usize>().ok())
                    .ok_or_else(|| {
                        AppError::Decode(format!(
                            "unexpected variable {:?}, expected {}<index>",
                            name, prefix
                        ))
                    })?;
                Ok((index, binding))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        fields.sort_by_key(|(index, _)| *index);
        Ok(fields)
    }

}

impl From<HashMap<String, Binding>> for Row {
    fn from(data: HashMap<String, Binding>) -> Self {
        Self::new(data)
    }
}

impl<K: Into<String>> FromIterator<(K, Binding)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Binding)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Response envelope of a SELECT query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub head: ResultsHead,
    pub results: ResultsBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsBody {
    pub bindings: Vec<HashMap<String, Binding>>,
}

impl SparqlResults {
    pub fn into_rows(self) -> Vec<Row> {
        self.results.bindings.into_iter().map(Row::new).collect()
    }
}
